use crate::transport::{Method, Request, Response, Transport, TransportError};
use std::time::Duration;

/// Connection-level settings of the BaseX HTTP server, resolved once when a transport is built.
///
/// Defaults to `http://127.0.0.1:8984` with the `admin` account, which is how a fresh BaseX HTTP server starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// `http` or `https`.
    pub scheme: String,
    /// Host name or IP address of the server.
    pub host: String,
    /// Port the BaseX HTTP server listens on.
    pub port: u16,
    /// User name for HTTP basic auth.
    pub user: String,
    /// Password for HTTP basic auth.
    pub password: String,
    /// Limit for a whole round trip, response body included. `None` waits indefinitely, with either transport.
    pub timeout: Option<Duration>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            scheme: "http".to_owned(),
            host: "127.0.0.1".to_owned(),
            port: 8984,
            user: "admin".to_owned(),
            password: "admin".to_owned(),
            timeout: None,
        }
    }
}

impl ConnectionOptions {
    /// Options for the given server and credentials, over plain HTTP.
    pub fn new(host: &str, port: u16, user: &str, password: &str) -> Self {
        Self {
            host: host.to_owned(),
            port,
            user: user.to_owned(),
            password: password.to_owned(),
            ..Self::default()
        }
    }

    /// Sets the URL scheme, `http` or `https`.
    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_owned();
        self
    }

    /// Sets the round trip timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The server origin, e.g. `http://127.0.0.1:8984`.
    pub fn origin(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// Absolute URL of a request URI.
    pub(crate) fn url(&self, uri: &str) -> String {
        format!("{}{}", self.origin(), uri)
    }
}

pub(crate) fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Error text for a response with an error status, e.g. ``POST /rest resulted in a `400 Bad Request` response``.
pub(crate) fn status_message(request_method: Method, uri: &str, status: reqwest::StatusCode) -> String {
    format!("{} {} resulted in a `{}` response", request_method, uri, status)
}

pub(crate) fn headers(map: &reqwest::header::HeaderMap) -> Vec<(String, String)> {
    map.iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|value| (name.as_str().to_owned(), value.to_owned())))
        .collect()
}

pub(crate) fn connection_error(request_method: Method, uri: &str, error: reqwest::Error) -> TransportError {
    TransportError::without_response(format!("{} {} failed: {}", request_method, uri, error), Some(Box::new(error)))
}

/// Blocking [`Transport`] over [`reqwest`], authenticating every request with HTTP basic auth.
///
/// Must not be used from within an async runtime, see [`asynchronous::AsyncHttpTransport`] for that.
///
/// [`asynchronous::AsyncHttpTransport`]: crate::asynchronous::AsyncHttpTransport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    options: ConnectionOptions,
}

impl HttpTransport {
    /// Builds the HTTP client for the given server.
    pub fn new(options: ConnectionOptions) -> std::result::Result<Self, TransportError> {
        // The blocking client defaults to a 30 second limit, `None` lifts it.
        let client = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| TransportError::without_response("failed to build HTTP client", Some(Box::new(e))))?;

        Ok(Self { client, options })
    }

    /// The options this transport was built with.
    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: Request) -> std::result::Result<Response, TransportError> {
        let Request {
            method: request_method,
            uri,
            headers: request_headers,
            body,
        } = request;
        tracing::debug!(method = %request_method, %uri, "sending request to BaseX");

        let mut builder = self
            .client
            .request(method(request_method), self.options.url(&uri))
            .basic_auth(&self.options.user, Some(&self.options.password));
        for (name, value) in &request_headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(body)
            .send()
            .map_err(|e| connection_error(request_method, &uri, e))?;

        let status = response.status();
        let response_headers = headers(response.headers());
        let body = response
            .bytes()
            .map_err(|e| connection_error(request_method, &uri, e))?
            .to_vec();
        let response = Response {
            status: status.as_u16(),
            headers: response_headers,
            body,
        };

        if status.is_client_error() || status.is_server_error() {
            return Err(TransportError::with_response(
                status_message(request_method, &uri, status),
                response,
            ));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_point_to_local_server() {
        let options = ConnectionOptions::default();

        assert_eq!("http://127.0.0.1:8984", options.origin());
        assert_eq!("http://127.0.0.1:8984/rest", options.url("/rest"));
    }

    #[test]
    fn test_options_builder() {
        let options = ConnectionOptions::new("basex.local", 443, "reader", "secret")
            .with_scheme("https")
            .with_timeout(Duration::from_secs(5));

        assert_eq!("https://basex.local:443", options.origin());
        assert_eq!(Some(Duration::from_secs(5)), options.timeout);
        assert_eq!("reader", options.user);
    }

    #[test]
    fn test_status_message_names_request() {
        let message = status_message(Method::Post, "/rest", reqwest::StatusCode::BAD_REQUEST);

        assert_eq!("POST /rest resulted in a `400 Bad Request` response", message);
    }
}

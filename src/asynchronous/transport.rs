use crate::http::{connection_error, headers, method, status_message, ConnectionOptions};
use crate::transport::{Request, Response, TransportError};
use async_trait::async_trait;
use std::sync::Arc;

/// Sends [`Request`]s to the BaseX HTTP server without blocking.
///
/// Same contract as [`Transport`]: an error status must come back as a [`TransportError`] carrying the response.
///
/// [`Transport`]: crate::Transport
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    /// Executes one request/response round trip.
    async fn send(&self, request: Request) -> std::result::Result<Response, TransportError>;
}

#[async_trait]
impl<T: AsyncTransport + ?Sized> AsyncTransport for Arc<T> {
    async fn send(&self, request: Request) -> std::result::Result<Response, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: AsyncTransport + ?Sized> AsyncTransport for Box<T> {
    async fn send(&self, request: Request) -> std::result::Result<Response, TransportError> {
        (**self).send(request).await
    }
}

/// [`AsyncTransport`] over [`reqwest`], authenticating every request with HTTP basic auth.
#[derive(Debug, Clone)]
pub struct AsyncHttpTransport {
    client: reqwest::Client,
    options: ConnectionOptions,
}

impl AsyncHttpTransport {
    /// Builds the HTTP client for the given server.
    pub fn new(options: ConnectionOptions) -> std::result::Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::without_response("failed to build HTTP client", Some(Box::new(e))))?;

        Ok(Self { client, options })
    }

    /// The options this transport was built with.
    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }
}

#[async_trait]
impl AsyncTransport for AsyncHttpTransport {
    async fn send(&self, request: Request) -> std::result::Result<Response, TransportError> {
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
            .await
            .map_err(|e| connection_error(request_method, &uri, e))?;

        let status = response.status();
        let response_headers = headers(response.headers());
        let body = response
            .bytes()
            .await
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

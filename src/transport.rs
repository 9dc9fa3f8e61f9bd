use std::error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// HTTP method of a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Runs a query envelope.
    Post,
    /// Stores a document.
    Put,
    /// Removes a document.
    Delete,
}

impl Method {
    /// The method name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// The `uri` is absolute-path form (e.g. `/rest/library/a/a.xml`). Resolving it against a host and applying
/// credentials is the job of the [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method.
    pub method: Method,
    /// Absolute path, starting with `/rest`.
    pub uri: String,
    /// Header names and values, in the order they are sent.
    pub headers: Vec<(String, String)>,
    /// The request body, empty when there is none.
    pub body: Vec<u8>,
}

impl Request {
    /// Creates a request without headers and with an empty body.
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Appends a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// Header names and values as received. Values that are not visible ASCII are left out.
    pub headers: Vec<(String, String)>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Returns the first value of the header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Failure of a [`Transport`] round trip.
///
/// When the server answered with an error status the error carries that [`Response`]. When no response was
/// obtained at all (refused connection, timeout, TLS failure) there is none, and the underlying cause is exposed
/// through [`source`].
///
/// [`source`]: std::error::Error::source
#[derive(Debug)]
pub struct TransportError {
    message: String,
    response: Option<Response>,
    source: Option<Box<dyn error::Error + Send + Sync>>,
}

impl TransportError {
    /// The server responded, but with a client or server error status.
    pub fn with_response(message: impl Into<String>, response: Response) -> Self {
        Self {
            message: message.into(),
            response: Some(response),
            source: None,
        }
    }

    /// No response was obtained.
    pub fn without_response(message: impl Into<String>, source: Option<Box<dyn error::Error + Send + Sync>>) -> Self {
        Self {
            message: message.into(),
            response: None,
            source,
        }
    }

    /// Describes the failed round trip.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The server's response, if there was one.
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl error::Error for TransportError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn error::Error + 'static))
    }
}

/// Sends [`Request`]s to the BaseX HTTP server.
///
/// Implementations decide on connection pooling, TLS, authentication, timeouts and retries. An error status
/// (400 and above) must be reported as a [`TransportError`] carrying the response, so the client can tell a
/// rejected request from an unreachable server.
pub trait Transport {
    /// Executes one request/response round trip.
    fn send(&self, request: Request) -> std::result::Result<Response, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: Request) -> std::result::Result<Response, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: Request) -> std::result::Result<Response, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: Request) -> std::result::Result<Response, TransportError> {
        (**self).send(request)
    }
}

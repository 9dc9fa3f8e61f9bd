use crate::transport::TransportError;
use std::error;
use std::fmt::{Display, Formatter};
use std::io;
use std::string::FromUtf8Error;

/// The error type for the operations of the [`Client`] and its collaborators.
///
/// Every variant keeps the context needed to diagnose the failure without running the call again. Nothing is
/// retried or downgraded by the client.
///
/// [`Client`]: crate::client::Client
#[derive(Debug)]
pub enum ClientError {
    /// No query template is registered under the given name. No request was sent.
    TemplateNotFound {
        /// The requested template name.
        name: String,
    },
    /// The query template exists but could not be read.
    Template(io::Error),
    /// The server rejected the request with an error status.
    RemoteQuery(RemoteQueryError),
    /// No response was obtained from the server.
    Transport(TransportError),
    /// The byte sequence being parsed is not a valid UTF-8 sequence.
    Utf8Parse(FromUtf8Error),
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::TemplateNotFound { name } => write!(f, "query template '{}' not found", name),
            ClientError::Template(ref e) => e.fmt(f),
            ClientError::RemoteQuery(ref e) => e.fmt(f),
            ClientError::Transport(ref e) => e.fmt(f),
            ClientError::Utf8Parse(ref e) => e.fmt(f),
        }
    }
}

impl error::Error for ClientError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ClientError::TemplateNotFound { .. } => None,
            ClientError::Template(ref e) => Some(e),
            ClientError::RemoteQuery(ref e) => Some(e),
            ClientError::Transport(ref e) => Some(e),
            ClientError::Utf8Parse(ref e) => Some(e),
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> ClientError {
        ClientError::Transport(err)
    }
}

impl From<FromUtf8Error> for ClientError {
    fn from(err: FromUtf8Error) -> ClientError {
        ClientError::Utf8Parse(err)
    }
}

/// The server answered a query or document request with a client or server error status.
///
/// Holds the full response body and, for queries, the full envelope that was sent. Both may contain sensitive
/// data, so be careful where this error ends up being logged.
#[derive(Debug)]
pub struct RemoteQueryError {
    status: u16,
    body: String,
    envelope: Option<String>,
    cause: TransportError,
}

impl RemoteQueryError {
    pub(crate) fn new(status: u16, body: String, envelope: Option<String>, cause: TransportError) -> Self {
        Self {
            status,
            body,
            envelope,
            cause,
        }
    }

    /// The HTTP status code returned by the server.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The error text reported by the transport.
    pub fn message(&self) -> &str {
        self.cause.message()
    }

    /// The full response body, lossily decoded as UTF-8.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The full response body as the server sent it.
    pub fn body_bytes(&self) -> &[u8] {
        self.cause.response().map(|response| response.body.as_slice()).unwrap_or_default()
    }

    /// The query envelope that was sent. Is `None` for document operations.
    pub fn envelope(&self) -> Option<&str> {
        self.envelope.as_deref()
    }
}

impl Display for RemoteQueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Client error in BaseX: {}. Full Response: {}.", self.message(), self.body)?;
        if let Some(envelope) = &self.envelope {
            write!(f, " xQuery: {}", envelope)?;
        }
        Ok(())
    }
}

impl error::Error for RemoteQueryError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Response;
    use std::error::Error;

    fn rejected() -> TransportError {
        let response = Response {
            status: 400,
            headers: vec![],
            body: b"bad syntax".to_vec(),
        };
        TransportError::with_response("POST /rest resulted in a `400 Bad Request` response", response)
    }

    #[test]
    fn test_template_not_found_formats_with_name() {
        let error = ClientError::TemplateNotFound { name: "GetBook".to_owned() };
        assert_eq!("query template 'GetBook' not found", error.to_string());
        assert!(error.source().is_none());
    }

    #[test]
    fn test_template_formats_as_debug() {
        let error = ClientError::Template(io::Error::new(io::ErrorKind::Other, "test"));
        let _ = format!("{:?}", error);
    }

    #[test]
    fn test_utf8_parse_formats_as_display() {
        let error = ClientError::Utf8Parse(String::from_utf8(vec![0xa0 as u8, 0xa1]).unwrap_err());
        let _ = format!("{}", error);
    }

    #[test]
    fn test_remote_query_formats_with_body_and_envelope() {
        let error = RemoteQueryError::new(400, "bad syntax".to_owned(), Some("<query/>".to_owned()), rejected());

        assert_eq!(
            "Client error in BaseX: POST /rest resulted in a `400 Bad Request` response. Full Response: bad syntax. \
             xQuery: <query/>",
            error.to_string()
        );
    }

    #[test]
    fn test_remote_query_without_envelope_omits_query_clause() {
        let error = RemoteQueryError::new(400, "bad syntax".to_owned(), None, rejected());

        assert!(!error.to_string().contains("xQuery"));
        assert!(error.envelope().is_none());
    }

    #[test]
    fn test_remote_query_keeps_raw_body_bytes() {
        let response = Response {
            status: 500,
            headers: vec![],
            body: vec![b'e', 0xff, 0xfe, b'!'],
        };
        let cause = TransportError::with_response("POST /rest resulted in a `500 Internal Server Error` response", response);
        let body = String::from_utf8_lossy(&[b'e', 0xff, 0xfe, b'!']).into_owned();

        let error = RemoteQueryError::new(500, body, None, cause);

        assert_eq!(&[b'e', 0xff, 0xfe, b'!'][..], error.body_bytes());
        assert_eq!("e\u{FFFD}\u{FFFD}!", error.body());
    }

    #[test]
    fn test_remote_query_chains_transport_error() {
        let error = ClientError::RemoteQuery(RemoteQueryError::new(400, "bad syntax".to_owned(), None, rejected()));

        let remote = error.source().unwrap();
        let transport = remote.source().unwrap();
        assert!(transport.to_string().contains("400 Bad Request"));
    }
}

use crate::errors::{ClientError, RemoteQueryError};
use crate::transport::{Response, TransportError};
use crate::Result;

/// What the server answered, passed on without interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    status: u16,
    content_type: String,
    body: Vec<u8>,
}

impl RestResponse {
    pub(crate) fn new(status: u16, content_type: String, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Value of the `Content-Type` header. Empty when the server sent none.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The raw body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consumes the response, returning the raw body.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Decodes the body as UTF-8.
    pub fn text(&self) -> Result<String> {
        Ok(String::from_utf8(self.body.clone())?)
    }
}

impl From<Response> for RestResponse {
    fn from(response: Response) -> Self {
        let content_type = response.header("content-type").unwrap_or_default().to_owned();
        RestResponse::new(response.status, content_type, response.body)
    }
}

/// Turns the outcome of a round trip into the client's result.
///
/// A failure carrying a response becomes a [`RemoteQueryError`] with the response body and, for queries, the
/// `envelope` that was sent. A failure without response is passed on unchanged.
pub(crate) fn normalize(
    outcome: std::result::Result<Response, TransportError>,
    envelope: Option<&str>,
) -> Result<RestResponse> {
    match outcome {
        Ok(response) => Ok(response.into()),
        Err(error) => match error.response() {
            Some(response) => {
                let status = response.status;
                let body = String::from_utf8_lossy(&response.body).into_owned();
                tracing::warn!(status, "BaseX rejected the request: {}", error.message());
                Err(ClientError::RemoteQuery(RemoteQueryError::new(
                    status,
                    body,
                    envelope.map(str::to_owned),
                    error,
                )))
            }
            None => Err(ClientError::Transport(error)),
        },
    }
}

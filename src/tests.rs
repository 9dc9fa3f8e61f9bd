use crate::transport::{Request, Response, Transport, TransportError};
use std::sync::{Arc, Mutex};

/// Records every request and answers all of them with the same canned outcome.
#[derive(Debug, Clone)]
pub(crate) struct MockTransport {
    requests: Arc<Mutex<Vec<Request>>>,
    response: Response,
    rejected: bool,
}

impl MockTransport {
    fn new(response: Response, rejected: bool) -> Self {
        Self {
            requests: Arc::new(Mutex::new(vec![])),
            response,
            rejected,
        }
    }

    /// Answers with status 200 and the given content type and body.
    pub(crate) fn ok(content_type: &str, body: &str) -> Self {
        let headers = match content_type {
            "" => vec![],
            _ => vec![("content-type".to_owned(), content_type.to_owned())],
        };
        Self::new(
            Response {
                status: 200,
                headers,
                body: body.as_bytes().to_vec(),
            },
            false,
        )
    }

    /// Fails with a transport error carrying a response of the given status and body.
    pub(crate) fn rejected(status: u16, body: &str) -> Self {
        Self::new(
            Response {
                status,
                headers: vec![("content-type".to_owned(), "text/plain".to_owned())],
                body: body.as_bytes().to_vec(),
            },
            true,
        )
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> Request {
        self.requests().pop().expect("no request was sent")
    }

    pub(crate) fn last_body(&self) -> String {
        String::from_utf8(self.last_request().body).unwrap()
    }

    pub(crate) fn respond(&self, request: Request) -> Result<Response, TransportError> {
        let message = format!("{} {} resulted in a `{}` response", request.method, request.uri, self.response.status);
        self.requests.lock().unwrap().push(request);

        if self.rejected {
            Err(TransportError::with_response(message, self.response.clone()))
        } else {
            Ok(self.response.clone())
        }
    }
}

impl Transport for MockTransport {
    fn send(&self, request: Request) -> Result<Response, TransportError> {
        self.respond(request)
    }
}

/// Never reaches the server.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FailingTransport;

impl FailingTransport {
    pub(crate) fn fail(&self) -> TransportError {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        TransportError::without_response("POST /rest failed", Some(Box::new(cause)))
    }
}

impl Transport for FailingTransport {
    fn send(&self, _request: Request) -> Result<Response, TransportError> {
        Err(self.fail())
    }
}

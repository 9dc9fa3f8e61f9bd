use crate::asynchronous::AsyncTransport;
use crate::tests::{FailingTransport, MockTransport};
use crate::transport::{Request, Response, TransportError};
use async_trait::async_trait;

#[async_trait]
impl AsyncTransport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        self.respond(request)
    }
}

#[async_trait]
impl AsyncTransport for FailingTransport {
    async fn send(&self, _request: Request) -> Result<Response, TransportError> {
        Err(self.fail())
    }
}

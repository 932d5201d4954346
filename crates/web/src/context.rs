//! Per-request context handed to every middleware.

use weft_http::protocol::RequestHeader;

use crate::{RedirectTarget, Response, ResponseError};

/// The request head and the response model of one request/response cycle.
///
/// The context owns both; the response only ever borrows the request, for redirects.
#[derive(Debug)]
pub struct Context {
    request: RequestHeader,
    response: Response,
}

impl Context {
    /// Creates a context with a fresh, writable [`Response`].
    pub fn new(request: RequestHeader) -> Self {
        Self::with_response(request, Response::new())
    }

    pub fn with_response(request: RequestHeader, response: Response) -> Self {
        Self { request, response }
    }

    pub fn request(&self) -> &RequestHeader {
        &self.request
    }

    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn response_mut(&mut self) -> &mut Response {
        &mut self.response
    }

    /// Shorthand for [`Response::redirect`] against this context's request.
    ///
    /// # Errors
    ///
    /// [`ResponseError::NotWritable`] once the response is finalized.
    pub fn redirect(&mut self, target: impl Into<RedirectTarget>) -> Result<(), ResponseError> {
        self.response.redirect(&self.request, target)
    }

    pub fn into_parts(self) -> (RequestHeader, Response) {
        (self.request, self.response)
    }
}

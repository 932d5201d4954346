//! The materialized response handed to the transport layer.

use http::{HeaderMap, Response, StatusCode};

use crate::protocol::PayloadBody;

/// Type alias for HTTP response headers.
///
/// `http::Response<()>` with an empty body placeholder, used when only the head of a
/// payload is inspected.
pub type ResponseHead = Response<()>;

/// A frozen response: status, headers and an optional body.
///
/// A payload is produced exactly once per request and is the only thing the transport
/// sees of the response layer. `body` is `None` when nothing is to be sent.
#[derive(Debug)]
pub struct ServerPayload {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<PayloadBody>,
}

impl ServerPayload {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Option<PayloadBody>) -> Self {
        Self { status, headers, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&PayloadBody> {
        self.body.as_ref()
    }

    pub fn into_parts(self) -> (StatusCode, HeaderMap, Option<PayloadBody>) {
        (self.status, self.headers, self.body)
    }

    /// Returns the status line and headers without the body.
    pub fn head(&self) -> ResponseHead {
        let mut head = Response::new(());
        *head.status_mut() = self.status;
        head.headers_mut().clone_from(&self.headers);
        head
    }
}

impl From<ServerPayload> for Response<PayloadBody> {
    fn from(payload: ServerPayload) -> Self {
        let mut response = Response::new(payload.body.unwrap_or_else(PayloadBody::empty));
        *response.status_mut() = payload.status;
        *response.headers_mut() = payload.headers;
        response
    }
}

impl From<Response<PayloadBody>> for ServerPayload {
    fn from(response: Response<PayloadBody>) -> Self {
        let (parts, body) = response.into_parts();
        Self { status: parts.status, headers: parts.headers, body: Some(body) }
    }
}

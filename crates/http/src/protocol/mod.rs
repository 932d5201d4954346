//! Protocol types shared between the response layer and the transport.
//!
//! # Architecture
//!
//! - **Request head** ([`request`]): read-only view of the incoming request
//!   - [`RequestHeader`]: header lookup plus `Accept` negotiation
//!
//! - **Negotiation** ([`accept`]): media type hint resolution and `Accept` matching
//!
//! - **Response payload** ([`response`]): what the transport writes
//!   - [`ServerPayload`]: status, headers and optional body
//!   - [`ResponseHead`]: type alias for response headers without a body
//!
//! - **Body** ([`body`]): buffered or streamed response body
//!   - [`PayloadBody`]: implements `http_body::Body`
//!
//! - **Error Handling** ([`error`]):
//!   - [`BodyError`]: errors raised while polling a body

pub mod accept;

mod request;
pub use request::RequestHeader;

mod response;
pub use response::ResponseHead;
pub use response::ServerPayload;

mod error;
pub use error::BodyError;

mod body;
pub use body::PayloadBody;

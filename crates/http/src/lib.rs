//! Protocol boundary of the weft response layer.
//!
//! This crate holds the types that sit between a response model and the outside world:
//!
//! - [`protocol::RequestHeader`]: the read-only request head, with header lookup and
//!   `Accept` negotiation
//! - [`protocol::ServerPayload`]: the frozen response a transport writes to the socket
//! - [`protocol::PayloadBody`]: a buffered or streamed body implementing `http_body::Body`
//!
//! A payload converts into `http::Response<PayloadBody>`, so any server built on the `http`
//! and `http-body` crates can transmit it.
//!
//! # Example
//!
//! ```
//! use http::{HeaderMap, Response, StatusCode};
//! use weft_http::protocol::{PayloadBody, ServerPayload};
//!
//! let payload = ServerPayload::new(StatusCode::OK, HeaderMap::new(), Some(PayloadBody::from("hello")));
//! let response: Response<PayloadBody> = payload.into();
//! assert_eq!(response.status(), StatusCode::OK);
//! ```

pub mod protocol;

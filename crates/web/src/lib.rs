//! The response model of the weft middleware framework.
//!
//! Every request gets one [`Response`]. Middleware mutate it in sequence (body, headers,
//! status, media type hint, redirects) and the pipeline finalizes it once into a
//! [`ServerPayload`](weft_http::protocol::ServerPayload) for the transport.
//!
//! # Example
//!
//! ```
//! use http::StatusCode;
//! use http::header::CONTENT_TYPE;
//! use weft_web::{Body, Response};
//!
//! let mut response = Response::new();
//! assert_eq!(response.status(), StatusCode::NOT_FOUND);
//!
//! response.set_body(Body::json(serde_json::json!({ "ok": true }))).unwrap();
//! assert_eq!(response.status(), StatusCode::OK);
//!
//! let payload = response.to_server_payload().unwrap();
//! assert_eq!(payload.headers()[CONTENT_TYPE], "application/json; charset=UTF-8");
//! assert!(response.set_body("too late").is_err());
//! ```

mod body;
mod context;
mod error;
mod escape;
mod html;
mod mime_lookup;
mod redirect;
mod request;
mod response;
mod utils;

pub use body::Body;
pub use body::Primitive;
pub use body::Structured;
pub use context::Context;
pub use error::ResponseError;
pub use escape::encode_uri;
pub use escape::encode_url;
pub use html::is_html;
pub use mime_lookup::DefaultMimeLookup;
pub use mime_lookup::MimeLookup;
pub use redirect::RedirectTarget;
pub use request::Negotiate;
pub use response::Response;
pub use response::ResponseBuilder;

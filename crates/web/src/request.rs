//! The view of the request the response model is allowed to see.
//!
//! The model does not own or outlive the request. It only needs two queries, both used by
//! [`Response::redirect`](crate::Response::redirect): a header lookup for the referrer and
//! an `Accept` negotiation check.

use http::HeaderName;
use weft_http::protocol::RequestHeader;

/// Read-only request queries used for content negotiation.
pub trait Negotiate {
    /// Returns the value of the named header, if present and readable as text.
    fn header(&self, name: &HeaderName) -> Option<String>;

    /// Whether the client accepts the media type named by `hint`, e.g. `"html"`.
    fn accepts(&self, hint: &str) -> bool;
}

impl Negotiate for RequestHeader {
    fn header(&self, name: &HeaderName) -> Option<String> {
        RequestHeader::header(self, name).map(str::to_owned)
    }

    fn accepts(&self, hint: &str) -> bool {
        RequestHeader::accepts(self, hint)
    }
}

impl<T: Negotiate + ?Sized> Negotiate for &T {
    fn header(&self, name: &HeaderName) -> Option<String> {
        (**self).header(name)
    }

    fn accepts(&self, hint: &str) -> bool {
        (**self).accepts(hint)
    }
}

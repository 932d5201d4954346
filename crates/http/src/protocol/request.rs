//! Read-only request head handed to the response layer.
//!
//! The response model never owns the request; it only needs header lookups (for the
//! referrer used by redirect-back) and content negotiation (for redirect bodies).

use http::header::{ACCEPT, AsHeaderName, REFERER};
use http::request::Parts;
use http::{HeaderMap, Method, Request, Uri, Version};

use crate::protocol::accept;

/// Represents an HTTP request header.
///
/// This struct wraps a `http::Request<()>` to provide:
/// - Access to standard HTTP header fields
/// - Content negotiation against the `Accept` header
#[derive(Debug)]
pub struct RequestHeader {
    inner: Request<()>,
}

impl AsRef<Request<()>> for RequestHeader {
    fn as_ref(&self) -> &Request<()> {
        &self.inner
    }
}

impl RequestHeader {
    /// Consumes the header and returns the inner `Request<()>`.
    pub fn into_inner(self) -> Request<()> {
        self.inner
    }

    /// Returns a reference to the request's HTTP method.
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    /// Returns a reference to the request's URI.
    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    /// Returns the request's HTTP version.
    pub fn version(&self) -> Version {
        self.inner.version()
    }

    /// Returns a reference to the request's headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Looks up a header by name, case-insensitively.
    ///
    /// Values that are not visible ASCII are treated as absent.
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers().get(name).and_then(|value| value.to_str().ok())
    }

    /// The `Referer` header, if the client sent one.
    pub fn referrer(&self) -> Option<&str> {
        self.header(REFERER)
    }

    /// Whether the client accepts the media type named by `hint`.
    ///
    /// `hint` can be a short name (`"html"`), an extension or a full MIME type.
    pub fn accepts(&self, hint: &str) -> bool {
        accept::accepts(self.headers().get_all(ACCEPT), hint)
    }
}

/// Converts request parts into a RequestHeader.
impl From<Parts> for RequestHeader {
    #[inline]
    fn from(parts: Parts) -> Self {
        Self { inner: Request::from_parts(parts, ()) }
    }
}

/// Converts a bodyless request into a RequestHeader.
impl From<Request<()>> for RequestHeader {
    #[inline]
    fn from(inner: Request<()>) -> Self {
        Self { inner }
    }
}

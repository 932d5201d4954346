//! Redirect helper.
//!
//! ```
//! use http::{Request, StatusCode};
//! use weft_http::protocol::RequestHeader;
//! use weft_web::{RedirectTarget, Response};
//!
//! let request = RequestHeader::from(Request::builder().header("Referer", "/cart").body(()).unwrap());
//! let mut response = Response::new();
//! response.redirect(&request, RedirectTarget::back()).unwrap();
//!
//! assert_eq!(response.status(), StatusCode::FOUND);
//! assert_eq!(response.headers()["location"], "/cart");
//! ```

use http::header::{LOCATION, REFERER};
use http::{HeaderValue, StatusCode, Uri};
use std::fmt;
use tracing::debug;

use crate::escape::{encode_uri, encode_url};
use crate::request::Negotiate;
use crate::utils::ensure;
use crate::{Response, ResponseError};

const DEFAULT_BACK: &str = "/";

/// Where [`Response::redirect`] sends the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Back to the request's `Referer`, or to `alt` (default `/`) without one.
    Back { alt: Option<String> },
    Url(String),
}

impl RedirectTarget {
    pub fn back() -> Self {
        Self::Back { alt: None }
    }

    pub fn back_or(alt: impl fmt::Display) -> Self {
        Self::Back { alt: Some(alt.to_string()) }
    }

    pub fn url(url: impl fmt::Display) -> Self {
        Self::Url(url.to_string())
    }

    fn resolve<R: Negotiate + ?Sized>(self, request: &R) -> String {
        match self {
            Self::Back { alt } => request
                .header(&REFERER)
                .or(alt)
                .unwrap_or_else(|| DEFAULT_BACK.to_owned()),
            Self::Url(url) => url,
        }
    }
}

impl From<&str> for RedirectTarget {
    fn from(url: &str) -> Self {
        Self::Url(url.to_owned())
    }
}

impl From<String> for RedirectTarget {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

impl From<Uri> for RedirectTarget {
    fn from(uri: Uri) -> Self {
        Self::Url(uri.to_string())
    }
}

impl From<&Uri> for RedirectTarget {
    fn from(uri: &Uri) -> Self {
        Self::Url(uri.to_string())
    }
}

impl Response {
    /// Redirects the client to `target`.
    ///
    /// Sets `Location` to the escaped target and, unless a redirect status was already chosen,
    /// the status to `302 Found`. The body is a short message with a link when the client
    /// accepts HTML, plain text otherwise.
    ///
    /// # Errors
    ///
    /// [`ResponseError::NotWritable`] once the response is finalized.
    pub fn redirect<R>(&mut self, request: &R, target: impl Into<RedirectTarget>) -> Result<(), ResponseError>
    where
        R: Negotiate + ?Sized,
    {
        ensure!(self.is_writable(), ResponseError::NotWritable);

        let url = target.into().resolve(request);
        let location = HeaderValue::try_from(encode_url(&url)).map_err(ResponseError::invalid_header)?;
        self.headers_mut()?.insert(LOCATION, location);
        debug!(location = %url, "redirecting");

        if !self.explicit_status().is_some_and(|status| status.is_redirection()) {
            self.set_status(StatusCode::FOUND)?;
        }

        if request.accepts("html") {
            let url = encode_uri(&url);
            self.set_type("text/html; charset=utf-8")?;
            self.set_body(format!("Redirecting to <a href=\"{url}\">{url}</a>."))
        } else {
            self.set_type("text/plain; charset=utf-8")?;
            self.set_body(format!("Redirecting to {url}."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RedirectTarget;
    use crate::Response;
    use crate::request::Negotiate;
    use bytes::Bytes;
    use http::header::{CONTENT_TYPE, LOCATION, REFERER};
    use http::{HeaderName, Request, StatusCode, Uri};
    use mockall::mock;
    use mockall::predicate::eq;
    use weft_http::protocol::{PayloadBody, RequestHeader};

    mock! {
        Client {}

        impl Negotiate for Client {
            fn header(&self, name: &HeaderName) -> Option<String>;
            fn accepts(&self, hint: &str) -> bool;
        }
    }

    fn client(referrer: Option<&'static str>, accepts_html: bool) -> MockClient {
        let mut request = MockClient::new();
        request.expect_header().with(eq(REFERER)).returning(move |_| referrer.map(str::to_owned));
        request.expect_accepts().with(eq("html")).return_const(accepts_html);
        request
    }

    fn body_text(response: &mut Response) -> String {
        let payload = response.to_server_payload().unwrap();
        let bytes = payload.body().and_then(PayloadBody::as_bytes).cloned().unwrap_or_default();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn back_without_referrer_goes_to_root() {
        let mut response = Response::new();
        response.redirect(&client(None, false), RedirectTarget::back()).unwrap();

        assert_eq!(response.headers()[LOCATION], "/");
        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[test]
    fn back_uses_referrer() {
        let mut response = Response::new();
        response.redirect(&client(Some("/basket?item=1"), false), RedirectTarget::back_or("/home")).unwrap();

        assert_eq!(response.headers()[LOCATION], "/basket?item=1");
    }

    #[test]
    fn back_falls_back_to_alt() {
        let mut response = Response::new();
        response.redirect(&client(None, false), RedirectTarget::back_or("/home")).unwrap();

        assert_eq!(response.headers()[LOCATION], "/home");
    }

    #[test]
    fn explicit_url_is_escaped() {
        let mut request = MockClient::new();
        request.expect_header().never();
        request.expect_accepts().return_const(false);

        let mut response = Response::new();
        response.redirect(&request, "/search?q=a b&lang=en").unwrap();

        assert_eq!(response.headers()[LOCATION], "/search?q=a%20b&lang=en");
    }

    #[test]
    fn uri_target_is_stringified() {
        let uri: Uri = "https://example.com/login?next=%2Fhome".parse().unwrap();
        let mut response = Response::new();
        response.redirect(&client(None, false), &uri).unwrap();

        assert_eq!(response.headers()[LOCATION], "https://example.com/login?next=%2Fhome");
    }

    #[test]
    fn plain_text_client_gets_text_message() {
        let mut response = Response::new();
        response.redirect(&client(None, false), "/next").unwrap();

        assert_eq!(response.type_(), Some("text/plain; charset=utf-8"));
        assert_eq!(body_text(&mut response), "Redirecting to /next.");
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain; charset=utf-8");
    }

    #[test]
    fn html_client_gets_anchor() {
        let mut response = Response::new();
        response.redirect(&client(None, true), "/a b").unwrap();

        assert_eq!(response.type_(), Some("text/html; charset=utf-8"));
        assert_eq!(body_text(&mut response), r#"Redirecting to <a href="/a%20b">/a%20b</a>."#);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
    }

    #[test]
    fn existing_redirect_status_is_kept() {
        let mut response = Response::new();
        response.set_status(StatusCode::MOVED_PERMANENTLY).unwrap();
        response.redirect(&client(None, false), "/moved").unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    }

    #[test]
    fn non_redirect_status_is_replaced() {
        let mut response = Response::new();
        response.set_status(StatusCode::CREATED).unwrap();
        response.redirect(&client(None, false), "/created").unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[test]
    fn redirect_replaces_location_and_body() {
        let mut response = Response::new();
        response.set_body(Bytes::from_static(b"old")).unwrap();
        response.insert_header(LOCATION, "/old").unwrap();
        response.redirect(&client(None, false), "/new").unwrap();

        assert_eq!(response.headers().get_all(LOCATION).iter().count(), 1);
        assert_eq!(response.headers()[LOCATION], "/new");
        assert_eq!(body_text(&mut response), "Redirecting to /new.");
    }

    #[test]
    fn redirect_after_finalize_fails() {
        let mut request = MockClient::new();
        request.expect_header().never();
        request.expect_accepts().never();

        let mut response = Response::new();
        response.to_server_payload().unwrap();

        assert!(response.redirect(&request, "/late").unwrap_err().is_not_writable());
    }

    #[test]
    fn redirect_with_real_request_header() {
        let request = RequestHeader::from(
            Request::builder().header("Referer", "/from").header("Accept", "text/html").body(()).unwrap(),
        );
        let mut response = Response::new();
        response.redirect(&request, RedirectTarget::back()).unwrap();

        assert_eq!(response.headers()[LOCATION], "/from");
        assert_eq!(body_text(&mut response), r#"Redirecting to <a href="/from">/from</a>."#);
    }
}

//! Media type lookup for the response `type` hint.
//!
//! The response model never consults a global MIME table; it asks the [`MimeLookup`] it was
//! built with. [`DefaultMimeLookup`] covers short names, file extensions and full MIME
//! strings, and any `Fn(&str) -> Option<String>` works as a lookup too.

use mime::Mime;
use weft_http::protocol::accept::media_type_of;

/// Resolves a short media type hint to a full `Content-Type` value.
pub trait MimeLookup: Send + Sync {
    fn lookup(&self, hint: &str) -> Option<String>;
}

impl<F> MimeLookup for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn lookup(&self, hint: &str) -> Option<String> {
        (self)(hint)
    }
}

/// Lookup backed by `mime_guess`.
///
/// Textual types (`text/*`, JSON and JavaScript) without an explicit charset get
/// `charset=UTF-8` appended.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMimeLookup;

impl MimeLookup for DefaultMimeLookup {
    fn lookup(&self, hint: &str) -> Option<String> {
        let mime = media_type_of(hint)?;
        if mime.get_param(mime::CHARSET).is_none() && is_textual(&mime) {
            Some(format!("{mime}; charset=UTF-8"))
        } else {
            Some(mime.to_string())
        }
    }
}

fn is_textual(mime: &Mime) -> bool {
    mime.type_() == mime::TEXT
        || mime.subtype() == mime::JSON
        || mime.suffix() == Some(mime::JSON)
        || mime.subtype() == mime::JAVASCRIPT
}

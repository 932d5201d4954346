//! Percent-encoding for redirect targets.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

const URL: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']');

const URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Encodes a URL for the `Location` header.
///
/// Bytes outside the URL-safe set are percent-encoded. Existing `%XX` escapes are kept as
/// they are, a lone `%` becomes `%25`.
pub fn encode_url(url: &str) -> String {
    let bytes = url.as_bytes();
    let mut encoded = String::with_capacity(url.len());
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if is_escape(&bytes[i..]) {
            encoded.extend(utf8_percent_encode(&url[run_start..i], URL));
            encoded.push_str(&url[i..i + 3]);
            i += 3;
            run_start = i;
        } else {
            i += 1;
        }
    }
    encoded.extend(utf8_percent_encode(&url[run_start..], URL));

    encoded
}

/// Encodes a full URI, escaping `%` as well, the way `encodeURI` does.
pub fn encode_uri(uri: &str) -> String {
    utf8_percent_encode(uri, URI).to_string()
}

fn is_escape(bytes: &[u8]) -> bool {
    matches!(bytes, [b'%', hi, lo, ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::{encode_uri, encode_url};

    #[test]
    fn url_keeps_reserved_characters() {
        assert_eq!(encode_url("/"), "/");
        assert_eq!(
            encode_url("https://example.com/a/b?x=1&y=[2]#top"),
            "https://example.com/a/b?x=1&y=[2]#top"
        );
    }

    #[test]
    fn url_escapes_unsafe_bytes() {
        assert_eq!(encode_url("/a b"), "/a%20b");
        assert_eq!(encode_url("/\"quoted\"<>"), "/%22quoted%22%3C%3E");
        assert_eq!(encode_url("/café"), "/caf%C3%A9");
        assert_eq!(encode_url("/line\nbreak"), "/line%0Abreak");
    }

    #[test]
    fn url_keeps_existing_escapes() {
        assert_eq!(encode_url("/a%20b"), "/a%20b");
        assert_eq!(encode_url("/100%"), "/100%25");
        assert_eq!(encode_url("/%zz"), "/%25zz");
        assert_eq!(encode_url("%41%"), "%41%25");
        assert_eq!(encode_url("/%C3%A9 é"), "/%C3%A9%20%C3%A9");
    }

    #[test]
    fn uri_escapes_percent_and_brackets() {
        assert_eq!(encode_uri("/a%20b"), "/a%2520b");
        assert_eq!(encode_uri("/x?y=[1]"), "/x?y=%5B1%5D");
        assert_eq!(encode_uri("/a b"), "/a%20b");
        assert_eq!(encode_uri("https://example.com/?q=1#frag"), "https://example.com/?q=1#frag");
    }
}

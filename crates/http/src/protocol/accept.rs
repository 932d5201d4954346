//! `Accept` header negotiation.
//!
//! Media type hints are either full MIME strings (`text/html`) or short names and file
//! extensions (`html`, `.json`), the latter resolved through `mime_guess`. `text` and `form`
//! are accepted as aliases for `text/plain` and `application/x-www-form-urlencoded`.

use http::HeaderValue;
use mime::Mime;
use tracing::trace;

/// Resolves a media type hint to a [`Mime`], `None` if the hint is unknown.
pub fn media_type_of(hint: &str) -> Option<Mime> {
    let hint = hint.trim();
    if hint.contains('/') {
        return hint.parse().ok();
    }

    let ext = hint.trim_start_matches('.').to_ascii_lowercase();
    match ext.as_str() {
        "text" => Some(mime::TEXT_PLAIN),
        "form" => Some(mime::APPLICATION_WWW_FORM_URLENCODED),
        _ => mime_guess::from_ext(&ext).first(),
    }
}

/// Returns whether a client sending `accept` values is willing to receive `hint`.
///
/// A request without any `Accept` header accepts everything. Otherwise the most specific
/// matching media range decides, and it must carry a non-zero quality.
pub fn accepts<'a, I>(accept: I, hint: &str) -> bool
where
    I: IntoIterator<Item = &'a HeaderValue>,
{
    let mut ranges = accept.into_iter().filter_map(|value| value.to_str().ok()).peekable();
    if ranges.peek().is_none() {
        return true;
    }

    let Some(target) = media_type_of(hint) else {
        return false;
    };

    let mut best: Option<(u8, f32)> = None;
    for range in ranges.flat_map(|value| value.split(',')).filter_map(parse_range) {
        let Some(specificity) = specificity(&range, &target) else {
            continue;
        };
        if best.is_none_or(|(current, _)| specificity > current) {
            best = Some((specificity, quality(&range)));
        }
    }

    best.is_some_and(|(_, q)| q > 0.0)
}

fn parse_range(range: &str) -> Option<Mime> {
    match range.trim().parse() {
        Ok(mime) => Some(mime),
        Err(e) => {
            trace!(range, cause = %e, "ignoring malformed media range");
            None
        }
    }
}

fn specificity(range: &Mime, target: &Mime) -> Option<u8> {
    if range.type_() == mime::STAR && range.subtype() == mime::STAR {
        Some(0)
    } else if range.type_() != target.type_() {
        None
    } else if range.subtype() == mime::STAR {
        Some(1)
    } else if range.subtype() == target.subtype() {
        Some(2)
    } else {
        None
    }
}

fn quality(range: &Mime) -> f32 {
    range.get_param("q").and_then(|q| q.as_str().parse::<f32>().ok()).unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::{accepts, media_type_of};
    use http::HeaderValue;

    fn accept(value: &'static str) -> Vec<HeaderValue> {
        vec![HeaderValue::from_static(value)]
    }

    #[test]
    fn media_type_from_short_name_and_extension() {
        assert_eq!(media_type_of("html").unwrap(), mime::TEXT_HTML);
        assert_eq!(media_type_of(".json").unwrap(), mime::APPLICATION_JSON);
        assert_eq!(media_type_of("text/plain").unwrap(), mime::TEXT_PLAIN);
        assert_eq!(media_type_of("HTML").unwrap(), mime::TEXT_HTML);
        assert_eq!(media_type_of("form").unwrap(), mime::APPLICATION_WWW_FORM_URLENCODED);
        assert!(media_type_of("no-such-thing").is_none());
    }

    #[test]
    fn missing_accept_header_accepts_everything() {
        assert!(accepts(Vec::<HeaderValue>::new().iter(), "html"));
    }

    #[test]
    fn browser_accept_header_accepts_html() {
        let values = accept("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8");
        assert!(accepts(values.iter(), "html"));
        assert!(accepts(values.iter(), "json"));
    }

    #[test]
    fn json_only_client_rejects_html() {
        let values = accept("application/json");
        assert!(!accepts(values.iter(), "html"));
        assert!(accepts(values.iter(), "json"));
    }

    #[test]
    fn type_wildcard_matches() {
        let values = accept("text/*");
        assert!(accepts(values.iter(), "html"));
        assert!(!accepts(values.iter(), "json"));
    }

    #[test]
    fn specific_zero_quality_beats_wildcard() {
        let values = accept("text/html;q=0, */*");
        assert!(!accepts(values.iter(), "html"));
        assert!(accepts(values.iter(), "text/plain"));
    }

    #[test]
    fn malformed_ranges_are_skipped() {
        let values = accept("not a range, text/html");
        assert!(accepts(values.iter(), "html"));

        let values = accept("garbage");
        assert!(!accepts(values.iter(), "html"));
    }

    #[test]
    fn multiple_header_values_are_combined() {
        let values = vec![HeaderValue::from_static("application/json"), HeaderValue::from_static("text/html")];
        assert!(accepts(values.iter(), "html"));
    }
}

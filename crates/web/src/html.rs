//! Markup detection for text bodies.

use std::collections::HashSet;

const DOCUMENT_TAGS: [&str; 4] = ["!doctype", "html", "head", "body"];

/// Whether `text` looks like HTML.
///
/// True when the text, after leading whitespace, opens with a document level tag
/// (`<!doctype`, `<html`, `<head`, `<body`), or when it contains an element with a matching
/// closing tag such as `<p>..</p>`. Tag names compare case-insensitively.
pub fn is_html(text: &str) -> bool {
    starts_with_document_tag(text.trim_start()) || has_element_pair(&text.to_ascii_lowercase())
}

fn starts_with_document_tag(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('<') else {
        return false;
    };

    DOCUMENT_TAGS.iter().any(|tag| {
        rest.get(..tag.len()).is_some_and(|prefix| prefix.eq_ignore_ascii_case(tag))
            && rest.as_bytes().get(tag.len()).is_none_or(|&b| is_tag_boundary(b))
    })
}

// expects lowercase input, single forward pass
fn has_element_pair(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut opened = HashSet::new();
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('<') {
        let start = cursor + offset + 1;
        cursor = start;

        let closing = bytes.get(start) == Some(&b'/');
        let name_start = if closing { start + 1 } else { start };
        let Some(name) = tag_name(text, name_start) else {
            continue;
        };
        let name_end = name_start + name.len();

        if closing {
            if opened.contains(name) && bytes.get(name_end).is_some_and(|&b| b == b'>' || b.is_ascii_whitespace()) {
                return true;
            }
            cursor = name_end;
        } else {
            if !bytes.get(name_end).is_some_and(|&b| is_tag_boundary(b)) {
                continue;
            }
            let Some(tag_close) = text[name_end..].find('>') else {
                return false;
            };
            opened.insert(name);
            cursor = name_end + tag_close + 1;
        }
    }

    false
}

fn tag_name(text: &str, start: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    if !bytes.get(start).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }
    let len = bytes[start..].iter().take_while(|b| b.is_ascii_alphanumeric() || **b == b'-').count();
    Some(&text[start..start + len])
}

fn is_tag_boundary(b: u8) -> bool {
    b == b'>' || b == b'/' || b.is_ascii_whitespace()
}

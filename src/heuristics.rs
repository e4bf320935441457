use memchr::{memchr_iter, memmem};
use std::borrow::Cow;

/// Return the trimmed interior of the first complete ``` fenced block, or
/// the input unchanged when no fence is present.
///
/// An opening marker with no matching close is treated as "no fence found":
/// a single dangling fence usually means the fence itself, not its payload,
/// is still incomplete. An alphabetic language tag on the opening marker
/// line (```json) belongs to the marker, not the payload.
pub fn extract_fenced_block(text: &str) -> &str {
    let bytes = text.as_bytes();
    let Some(open) = memmem::find(bytes, b"```") else {
        return text;
    };
    let mut inner = open + 3;
    let tag_start = inner;
    while inner < bytes.len() && bytes[inner].is_ascii_alphabetic() {
        inner += 1;
    }
    if matches!(bytes.get(inner), Some(b'\n' | b'\r')) {
        inner += 1;
    } else if inner > tag_start {
        // alpha run not followed by a newline: payload, not a language tag
        inner = tag_start;
    }
    let Some(close) = memmem::find(&bytes[inner..], b"```") else {
        return text;
    };
    // all scanned offsets sit on ASCII bytes, so slicing stays on char
    // boundaries
    text[inner..inner + close].trim()
}

/// Append one closing `"` when the text contains an odd number of unescaped
/// double quotes; return the input unchanged otherwise.
///
/// This targets the single most common truncation artifact: a string value
/// cut off mid-token.
pub fn close_unbalanced_quote(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut unescaped = 0usize;
    for pos in memchr_iter(b'"', bytes) {
        let mut backslashes = 0usize;
        while backslashes < pos && bytes[pos - 1 - backslashes] == b'\\' {
            backslashes += 1;
        }
        if backslashes % 2 == 0 {
            unescaped += 1;
        }
    }
    if unescaped % 2 == 1 {
        let mut owned = String::with_capacity(text.len() + 1);
        owned.push_str(text);
        owned.push('"');
        Cow::Owned(owned)
    } else {
        Cow::Borrowed(text)
    }
}

//! The `Content-Length` field, from
//! [RFC 9110 section 8.6](https://www.rfc-editor.org/rfc/rfc9110#section-8.6).

use crate::{
    core_rules::DIGIT,
    end,
    repetition,
    Anchored,
};
use once_cell::sync::Lazy;

// Content-Length = 1*DIGIT
static CONTENT_LENGTH_PARSER: Lazy<Anchored> = Lazy::new(|| end(repetition(DIGIT, 1, None)));

/// Parse the value of a `Content-Length` header field.  `None` is returned
/// if the value doesn't match the field's grammar, or if the length is too
/// large to represent.
#[must_use]
pub fn parse_content_length(value: &str) -> Option<u64> {
    let parsed = match CONTENT_LENGTH_PARSER.parse(value) {
        Some(parsed) => parsed,
        None => {
            tracing::trace!(value, "Content-Length value does not match grammar");
            return None;
        },
    };
    match parsed.parse() {
        Ok(length) => Some(length),
        Err(_) => {
            tracing::trace!(value, "Content-Length out of range");
            None
        },
    }
}

//! The `Content-Encoding` field, from
//! [RFC 9110 section 8.4](https://www.rfc-editor.org/rfc/rfc9110#section-8.4).

use crate::{
    end,
    optional,
    repetition,
    syntax::{
        split_list,
        OWS,
        TOKEN,
    },
    Anchored,
};
use once_cell::sync::Lazy;

// Content-Encoding = [ content-coding *( OWS "," OWS content-coding ) ]
static CONTENT_ENCODING_PARSER: Lazy<Anchored> = Lazy::new(|| {
    end(optional(concatenate![
        &*TOKEN,
        repetition(concatenate![&*OWS, ',', &*OWS, &*TOKEN], 0, None),
    ]))
});

/// Parse the value of a `Content-Encoding` header field into the list of
/// content codings applied, in the order they were applied.  An empty value
/// is an empty list.  `None` is returned if the value doesn't match the
/// field's grammar.
#[must_use]
pub fn parse_content_encoding(value: &str) -> Option<Vec<String>> {
    let parsed = match CONTENT_ENCODING_PARSER.parse(value) {
        Some(parsed) => parsed,
        None => {
            tracing::trace!(value, "Content-Encoding value does not match grammar");
            return None;
        },
    };
    if parsed.is_empty() {
        return Some(vec![]);
    }
    Some(split_list(parsed).map(str::to_string).collect())
}

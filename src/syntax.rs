//! Rules shared by many header fields, from
//! [RFC 9110 section 5.6](https://www.rfc-editor.org/rfc/rfc9110#section-5.6),
//! along with the helpers used to take validated field text apart again.

use crate::{
    core_rules::{
        ALPHA,
        DIGIT,
        DQUOTE,
        HTAB,
        SP,
        VCHAR,
    },
    end,
    repetition,
    Anchored,
    Rule,
};
use once_cell::sync::Lazy;

/// OWS = *( SP / HTAB ) ; optional whitespace
pub static OWS: Lazy<Rule> = Lazy::new(|| repetition(alternatives![SP, HTAB], 0, None));

/// BWS = OWS ; "bad" whitespace, tolerated around `=` in parameters
pub static BWS: Lazy<Rule> = Lazy::new(|| OWS.clone());

/// tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" / "-" / "." /
///         "^" / "_" / "`" / "|" / "~" / DIGIT / ALPHA
pub static TCHAR: Lazy<Rule> = Lazy::new(|| {
    alternatives![
        '!', '#', '$', '%', '&', '\'', '*', '+', '-', '.', '^', '_', '`', '|', '~',
        DIGIT,
        &*ALPHA,
    ]
});

/// token = 1*tchar
pub static TOKEN: Lazy<Rule> = Lazy::new(|| repetition(&*TCHAR, 1, None));

/// token68 = 1*( ALPHA / DIGIT / "-" / "." / "_" / "~" / "+" / "/" ) *"="
///
/// The leading run is allowed to be empty here; callers that need a
/// non-empty token68 check for that themselves.
pub static TOKEN68: Lazy<Rule> = Lazy::new(|| {
    concatenate![
        repetition(alternatives![&*ALPHA, DIGIT, '-', '.', '_', '~', '+', '/'], 0, None),
        repetition('=', 0, None),
    ]
});

/// obs-text = %x80-FF
pub const OBS_TEXT: (char, char) = ('\u{80}', '\u{ff}');

/// qdtext = HTAB / SP / "!" / %x23-5B / %x5D-7E / obs-text
pub static QDTEXT: Lazy<Rule> = Lazy::new(|| {
    alternatives![HTAB, SP, '!', ('\u{23}', '\u{5b}'), ('\u{5d}', '\u{7e}'), OBS_TEXT]
});

/// quoted-pair = "\" ( HTAB / SP / VCHAR / obs-text )
pub static QUOTED_PAIR: Lazy<Rule> =
    Lazy::new(|| concatenate!['\\', alternatives![HTAB, SP, VCHAR, OBS_TEXT]]);

/// quoted-string = DQUOTE *( qdtext / quoted-pair ) DQUOTE
pub static QUOTED_STRING: Lazy<Rule> = Lazy::new(|| {
    concatenate![
        DQUOTE,
        repetition(alternatives![&*QDTEXT, &*QUOTED_PAIR], 0, None),
        DQUOTE,
    ]
});

static TOKEN_PARSER: Lazy<Anchored> = Lazy::new(|| end(&*TOKEN));

/// Determine whether the given text is a single, complete token.
#[must_use]
pub fn is_token(text: &str) -> bool {
    TOKEN_PARSER.parse(text).is_some()
}

/// Take a parameter value that has already been validated as either a
/// `token` or a `quoted-string` and return the value it represents.  Tokens
/// are returned as they are.  Quoted strings lose their surrounding quotes,
/// and each `quoted-pair` within is replaced by the character it escapes.
#[must_use]
pub fn unquote(value: &str) -> String {
    let inner = match value
        .strip_prefix(DQUOTE)
        .and_then(|value| value.strip_suffix(DQUOTE))
    {
        Some(inner) => inner,
        None => return value.to_string(),
    };
    let mut unquoted = String::with_capacity(inner.len());
    let mut rest = inner;
    while let Some(next) = rest.chars().next() {
        match QUOTED_PAIR.parse(rest) {
            Some(pair) => {
                unquoted.extend(pair.consumed.chars().skip(1));
                rest = pair.remainder;
            },
            None => {
                unquoted.push(next);
                rest = &rest[next.len_utf8()..];
            },
        }
    }
    unquoted
}

/// Produce the text for a parameter value: the value itself if it is a
/// token, or otherwise a quoted string with `"` and `\` escaped.
#[must_use]
pub fn quote_if_needed(value: &str) -> String {
    if is_token(value) {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push(DQUOTE);
    for c in value.chars() {
        if c == DQUOTE || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push(DQUOTE);
    quoted
}

/// Split the given text at the first occurrence of the given delimiter,
/// dropping the delimiter.
#[must_use]
pub fn split_at(
    composite: &str,
    delimiter: char,
) -> Option<(&str, &str)> {
    composite.find(delimiter).map(|delimiter_index| {
        (
            &composite[..delimiter_index],
            &composite[delimiter_index + delimiter.len_utf8()..],
        )
    })
}

/// Take apart a parameter already validated as
/// `token BWS "=" BWS ( token / quoted-string )`, returning its name and
/// the value it represents.
#[must_use]
pub fn name_value(parameter: &str) -> Option<(String, String)> {
    let (name, value) = split_at(parameter, '=')?;
    let name = name.trim_end_matches(|c| c == SP || c == HTAB);
    let value = value.trim_start_matches(|c| c == SP || c == HTAB);
    Some((name.to_string(), unquote(value)))
}

/// Split the text of a list already validated as
/// `element *( OWS "," OWS element )` into its elements.
pub fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(|element| element.trim_matches(|c| c == SP || c == HTAB))
}

//! The `Content-Type` field, from
//! [RFC 9110 section 8.3](https://www.rfc-editor.org/rfc/rfc9110#section-8.3).

use crate::{
    end,
    optional,
    repetition,
    syntax::{
        name_value,
        quote_if_needed,
        OWS,
        QUOTED_STRING,
        TOKEN,
    },
    Anchored,
    Error,
    Rule,
};
use once_cell::sync::Lazy;
use std::{
    collections::BTreeMap,
    fmt,
};

/// This is the media type given by a `Content-Type` field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MediaType {
    pub r#type: String,
    pub subtype: String,

    /// The parameters that followed the subtype, with quoted values
    /// already unquoted, or `None` if there were none.
    pub parameters: Option<BTreeMap<String, String>>,
}

// parameter = parameter-name "=" parameter-value
static PARAMETER: Lazy<Rule> =
    Lazy::new(|| concatenate![&*TOKEN, '=', alternatives![&*TOKEN, &*QUOTED_STRING]]);

static PARAMETER_DELIMITER: Lazy<Rule> = Lazy::new(|| concatenate![&*OWS, ';', &*OWS]);

// media-type = type "/" subtype parameters
// parameters = *( OWS ";" OWS [ parameter ] )
static CONTENT_TYPE_PARSER: Lazy<Anchored> = Lazy::new(|| {
    end(concatenate![
        &*TOKEN,
        '/',
        &*TOKEN,
        repetition(concatenate![&*PARAMETER_DELIMITER, optional(&*PARAMETER)], 0, None),
    ])
});

// Empty parameters, as in `a/b;;c=d`, are skipped.
fn parse_parameters(mut parameters: &str) -> Option<BTreeMap<String, String>> {
    let mut parsed = BTreeMap::new();
    while !parameters.is_empty() {
        parameters = PARAMETER_DELIMITER.parse(parameters)?.remainder;
        if let Some(parameter) = PARAMETER.parse(parameters) {
            let (name, value) = name_value(parameter.consumed)?;
            parsed.insert(name, value);
            parameters = parameter.remainder;
        }
    }
    Some(parsed)
}

/// Parse the value of a `Content-Type` header field.  `None` is returned if
/// the value doesn't match the field's grammar.
#[must_use]
pub fn parse_content_type(value: &str) -> Option<MediaType> {
    let parsed = match CONTENT_TYPE_PARSER.parse(value) {
        Some(parsed) => parsed,
        None => {
            tracing::trace!(value, "Content-Type value does not match grammar");
            return None;
        },
    };
    let r#type = TOKEN.parse(parsed)?;
    let subtype = TOKEN.parse(r#type.remainder.strip_prefix('/')?)?;
    let parameters = parse_parameters(subtype.remainder)?;
    Some(MediaType {
        r#type: r#type.consumed.to_string(),
        subtype: subtype.consumed.to_string(),
        parameters: if parameters.is_empty() {
            None
        } else {
            Some(parameters)
        },
    })
}

impl fmt::Display for MediaType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}/{}", self.r#type, self.subtype)?;
        for (name, value) in self.parameters.iter().flatten() {
            write!(f, "; {}={}", name, quote_if_needed(value))?;
        }
        Ok(())
    }
}

impl std::str::FromStr for MediaType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_content_type(value).ok_or_else(|| Error::InvalidContentType(value.into()))
    }
}

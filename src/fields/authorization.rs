//! The `Authorization` field, from
//! [RFC 9110 section 11.6.2](https://www.rfc-editor.org/rfc/rfc9110#section-11.6.2).

use crate::{
    core_rules::SP,
    end,
    optional,
    repetition,
    syntax::{
        name_value,
        quote_if_needed,
        BWS,
        OWS,
        QUOTED_STRING,
        TOKEN,
        TOKEN68,
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

/// This is what follows the authentication scheme in a set of credentials.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CredentialParams {
    /// An opaque `token68` value, as given.
    Token68(String),

    /// A list of named parameters, with quoted values already unquoted.
    Params(BTreeMap<String, String>),
}

/// This holds the credentials given by an `Authorization` field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Credentials {
    pub scheme: String,
    pub params: Option<CredentialParams>,
}

// auth-param = token BWS "=" BWS ( token / quoted-string )
static AUTH_PARAM: Lazy<Rule> = Lazy::new(|| {
    concatenate![&*TOKEN, &*BWS, '=', &*BWS, alternatives![&*TOKEN, &*QUOTED_STRING]]
});

static PARAM_DELIMITER: Lazy<Rule> = Lazy::new(|| concatenate![&*OWS, ',', &*OWS]);

static AUTH_PARAMS: Lazy<Rule> = Lazy::new(|| {
    concatenate![&*AUTH_PARAM, repetition(concatenate![&*PARAM_DELIMITER, &*AUTH_PARAM], 0, None)]
});

// credentials = auth-scheme [ 1*SP ( token68 / [ auth-param *( OWS "," OWS auth-param ) ] ) ]
//
// The parameter list goes first: a token68 would stop right after the `=`
// of the first parameter.  An empty token68 covers the missing list.
static AUTHORIZATION_PARSER: Lazy<Anchored> = Lazy::new(|| {
    end(concatenate![
        &*TOKEN,
        optional(concatenate![repetition(SP, 1, None), alternatives![&*AUTH_PARAMS, &*TOKEN68]]),
    ])
});

static AUTH_PARAMS_PARSER: Lazy<Anchored> = Lazy::new(|| end(&*AUTH_PARAMS));

fn parse_params(mut params: &str) -> Option<BTreeMap<String, String>> {
    let mut parsed = BTreeMap::new();
    loop {
        let param = AUTH_PARAM.parse(params)?;
        let (name, value) = name_value(param.consumed)?;
        parsed.insert(name, value);
        if param.remainder.is_empty() {
            return Some(parsed);
        }
        params = PARAM_DELIMITER.parse(param.remainder)?.remainder;
    }
}

/// Parse the value of an `Authorization` header field.  `None` is returned
/// if the value doesn't match the field's grammar.
#[must_use]
pub fn parse_authorization(value: &str) -> Option<Credentials> {
    let parsed = match AUTHORIZATION_PARSER.parse(value) {
        Some(parsed) => parsed,
        None => {
            tracing::trace!(value, "Authorization value does not match grammar");
            return None;
        },
    };
    let scheme = TOKEN.parse(parsed)?;
    let rest = scheme.remainder.trim_start_matches(SP);
    let params = if rest.is_empty() {
        None
    } else if AUTH_PARAMS_PARSER.parse(rest).is_some() {
        Some(CredentialParams::Params(parse_params(rest)?))
    } else {
        Some(CredentialParams::Token68(rest.to_string()))
    };
    Some(Credentials {
        scheme: scheme.consumed.to_string(),
        params,
    })
}

impl fmt::Display for Credentials {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.scheme)?;
        match &self.params {
            Some(CredentialParams::Token68(token68)) => write!(f, " {}", token68),
            Some(CredentialParams::Params(params)) => {
                for (i, (name, value)) in params.iter().enumerate() {
                    let delimiter = if i == 0 { " " } else { ", " };
                    write!(f, "{}{}={}", delimiter, name, quote_if_needed(value))?;
                }
                Ok(())
            },
            None => Ok(()),
        }
    }
}

impl std::str::FromStr for Credentials {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_authorization(value).ok_or_else(|| Error::InvalidAuthorization(value.into()))
    }
}

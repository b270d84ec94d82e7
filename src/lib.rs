#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

// The rule module comes first so that its macros are in scope for every
// module declared after it.
#[macro_use]
mod rule;

pub mod core_rules;
mod error;
mod field_parser;
mod fields;
pub mod syntax;

pub use crate::error::Error;
pub use crate::field_parser::FieldParser;
pub use crate::fields::{
    parse_authorization,
    parse_content_encoding,
    parse_content_length,
    parse_content_type,
    parse_date,
    parse_host,
    parse_range,
    CredentialParams,
    Credentials,
    Host,
    HttpDate,
    MediaType,
    RangeSpec,
    RangesSpecifier,
};
pub use crate::rule::{
    alternatives,
    concatenate,
    end,
    literal,
    optional,
    range_alternatives,
    repetition,
    terminal,
    Anchored,
    Match,
    Rule,
};

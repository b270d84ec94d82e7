//! The `Range` field, from
//! [RFC 9110 section 14.2](https://www.rfc-editor.org/rfc/rfc9110#section-14.2).

use crate::{
    core_rules::DIGIT,
    end,
    repetition,
    syntax::{
        split_at,
        split_list,
        OWS,
        TOKEN,
    },
    Anchored,
    Error,
    Rule,
};
use once_cell::sync::Lazy;
use std::fmt;

/// This is one element of the set of ranges requested by a `Range` field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RangeSpec {
    /// A range starting at `first`, and ending at `last` (inclusive) or
    /// else at the end of the representation.
    Int {
        first: u64,
        last: Option<u64>,
    },

    /// The final `length` units of the representation.
    Suffix {
        length: u64,
    },

    /// Any other range, as given.  Its meaning depends on the range unit.
    Other(String),
}

/// This is the value of a `Range` field: a range unit and the set of
/// ranges requested in that unit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RangesSpecifier {
    pub unit: String,
    pub set: Vec<RangeSpec>,
}

// int-range = first-pos "-" [ last-pos ]
static INT_RANGE: Lazy<Rule> =
    Lazy::new(|| concatenate![repetition(DIGIT, 1, None), '-', repetition(DIGIT, 0, None)]);

// suffix-range = "-" suffix-length
static SUFFIX_RANGE: Lazy<Rule> = Lazy::new(|| concatenate!['-', repetition(DIGIT, 1, None)]);

// other-range = 1*( %x21-2B / %x2D-7E )
static OTHER_CHAR: Lazy<Rule> =
    Lazy::new(|| alternatives![('\u{21}', '\u{2b}'), ('\u{2d}', '\u{7e}')]);

static OTHER_RANGE: Lazy<Rule> = Lazy::new(|| repetition(&*OTHER_CHAR, 1, None));

// range-spec = int-range / suffix-range / other-range
//
// Both int-range and suffix-range only use characters of other-range, so a
// range like `1-a` starts with an int-range that is a prefix of a longer
// other-range.  Whatever follows the chosen alternative is taken as part of
// the same range, and extraction decides what kind of range it really is.
static RANGE_SPEC: Lazy<Rule> = Lazy::new(|| {
    concatenate![
        alternatives![&*INT_RANGE, &*SUFFIX_RANGE, &*OTHER_RANGE],
        repetition(&*OTHER_CHAR, 0, None),
    ]
});

// ranges-specifier = range-unit "=" range-set
// range-set = range-spec *( OWS "," OWS range-spec )
static RANGE_PARSER: Lazy<Anchored> = Lazy::new(|| {
    end(concatenate![
        &*TOKEN,
        '=',
        &*RANGE_SPEC,
        repetition(concatenate![&*OWS, ',', &*OWS, &*RANGE_SPEC], 0, None),
    ])
});

static INT_RANGE_PARSER: Lazy<Anchored> = Lazy::new(|| end(&*INT_RANGE));

static SUFFIX_RANGE_PARSER: Lazy<Anchored> = Lazy::new(|| end(&*SUFFIX_RANGE));

// Returns `None` only if a position is too large to represent.
fn parse_range_spec(spec: &str) -> Option<RangeSpec> {
    if INT_RANGE_PARSER.parse(spec).is_some() {
        let (first, last) = split_at(spec, '-')?;
        let first = first.parse().ok()?;
        let last = if last.is_empty() {
            None
        } else {
            Some(last.parse().ok()?)
        };
        Some(RangeSpec::Int {
            first,
            last,
        })
    } else if SUFFIX_RANGE_PARSER.parse(spec).is_some() {
        let length = spec[1..].parse().ok()?;
        Some(RangeSpec::Suffix {
            length,
        })
    } else {
        Some(RangeSpec::Other(spec.to_string()))
    }
}

/// Parse the value of a `Range` header field.  `None` is returned if the
/// value doesn't match the field's grammar, or if a range position is too
/// large to represent.
#[must_use]
pub fn parse_range(value: &str) -> Option<RangesSpecifier> {
    let parsed = match RANGE_PARSER.parse(value) {
        Some(parsed) => parsed,
        None => {
            tracing::trace!(value, "Range value does not match grammar");
            return None;
        },
    };
    let (unit, set) = split_at(parsed, '=')?;
    let set = match split_list(set).map(parse_range_spec).collect::<Option<Vec<_>>>() {
        Some(set) => set,
        None => {
            tracing::trace!(value, "Range position out of range");
            return None;
        },
    };
    Some(RangesSpecifier {
        unit: unit.to_string(),
        set,
    })
}

impl fmt::Display for RangeSpec {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Int {
                first,
                last: Some(last),
            } => write!(f, "{}-{}", first, last),
            Self::Int {
                first,
                last: None,
            } => write!(f, "{}-", first),
            Self::Suffix {
                length,
            } => write!(f, "-{}", length),
            Self::Other(spec) => write!(f, "{}", spec),
        }
    }
}

impl fmt::Display for RangesSpecifier {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}=", self.unit)?;
        for (i, spec) in self.set.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", spec)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for RangesSpecifier {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_range(value).ok_or_else(|| Error::InvalidRange(value.into()))
    }
}

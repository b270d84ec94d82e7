//! The `Date` field and the `HTTP-date` format, from
//! [RFC 9110 section 5.6.7](https://www.rfc-editor.org/rfc/rfc9110#section-5.6.7).
//! Three formats are accepted: the preferred IMF-fixdate and the two
//! obsolete formats, RFC 850 and asctime.

use crate::{
    core_rules::{
        DIGIT,
        SP,
    },
    end,
    literal,
    repetition,
    Anchored,
    Error,
    Rule,
};
use chrono::{
    DateTime,
    NaiveDate,
    TimeZone as _,
    Utc,
};
use once_cell::sync::Lazy;
use std::fmt;

/// This is the value of a field given as an `HTTP-date`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HttpDate {
    /// The date and time given, in UTC.
    Valid(DateTime<Utc>),

    /// The value has the shape of an `HTTP-date` but doesn't name a real
    /// date and time (for example, minute 72).  The text is kept as given.
    Invalid(String),
}

impl HttpDate {
    /// Determine whether the value named a real date and time.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Get the date and time, if the value named a real one.
    #[must_use]
    pub fn as_date_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Valid(date_time) => Some(*date_time),
            Self::Invalid(_) => None,
        }
    }
}

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const DAY_NAMES_LONG: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn digits(count: usize) -> Rule {
    repetition(DIGIT, count, Some(count))
}

fn names(names: &[&str]) -> Rule {
    crate::alternatives(names.iter().map(|name| literal(name)))
}

static DAY_NAME: Lazy<Rule> = Lazy::new(|| names(&DAY_NAMES));

static DAY_NAME_L: Lazy<Rule> = Lazy::new(|| names(&DAY_NAMES_LONG));

static MONTH: Lazy<Rule> = Lazy::new(|| names(&MONTHS));

// time-of-day = hour ":" minute ":" second
static TIME_OF_DAY: Lazy<Rule> =
    Lazy::new(|| concatenate![digits(2), ':', digits(2), ':', digits(2)]);

// IMF-fixdate = day-name "," SP date1 SP time-of-day SP GMT
// date1 = day SP month SP year
static IMF_FIXDATE: Lazy<Rule> = Lazy::new(|| {
    concatenate![
        &*DAY_NAME,
        ',',
        SP,
        concatenate![digits(2), SP, &*MONTH, SP, digits(4)],
        SP,
        &*TIME_OF_DAY,
        SP,
        "GMT",
    ]
});

// rfc850-date = day-name-l "," SP date2 SP time-of-day SP GMT
// date2 = day "-" month "-" 2DIGIT
static RFC850_DATE: Lazy<Rule> = Lazy::new(|| {
    concatenate![
        &*DAY_NAME_L,
        ',',
        SP,
        concatenate![digits(2), '-', &*MONTH, '-', digits(2)],
        SP,
        &*TIME_OF_DAY,
        SP,
        "GMT",
    ]
});

// asctime-date = day-name SP date3 SP time-of-day SP year
// date3 = month SP ( 2DIGIT / ( SP DIGIT ) )
static ASCTIME_DATE: Lazy<Rule> = Lazy::new(|| {
    concatenate![
        &*DAY_NAME,
        SP,
        concatenate![&*MONTH, SP, alternatives![digits(2), concatenate![SP, DIGIT]]],
        SP,
        &*TIME_OF_DAY,
        SP,
        digits(4),
    ]
});

// HTTP-date = IMF-fixdate / obs-date
// obs-date = rfc850-date / asctime-date
static DATE_PARSER: Lazy<Anchored> = Lazy::new(|| {
    end(alternatives![
        &*IMF_FIXDATE,
        alternatives![&*RFC850_DATE, &*ASCTIME_DATE],
    ])
});

static RFC850_DATE_PARSER: Lazy<Anchored> = Lazy::new(|| end(&*RFC850_DATE));

static ASCTIME_DATE_PARSER: Lazy<Anchored> = Lazy::new(|| end(&*ASCTIME_DATE));

// The parts of a date, still as the text that was matched.
struct DateParts<'a> {
    day: &'a str,
    month: &'a str,
    year: &'a str,
    time_of_day: &'a str,
}

fn imf_fixdate_parts(date: &str) -> Option<DateParts<'_>> {
    // Sun, 06 Nov 1994 08:49:37 GMT
    let (_, date) = date.split_once(", ")?;
    let mut parts = date.split(SP);
    Some(DateParts {
        day: parts.next()?,
        month: parts.next()?,
        year: parts.next()?,
        time_of_day: parts.next()?,
    })
}

fn rfc850_date_parts(date: &str) -> Option<DateParts<'_>> {
    // Sunday, 06-Nov-94 08:49:37 GMT
    let (_, date) = date.split_once(", ")?;
    let (date, time_of_day) = date.split_once(SP)?;
    let mut date = date.split('-');
    Some(DateParts {
        day: date.next()?,
        month: date.next()?,
        year: date.next()?,
        time_of_day: time_of_day.split(SP).next()?,
    })
}

fn asctime_date_parts(date: &str) -> Option<DateParts<'_>> {
    // Sun Nov  6 08:49:37 1994
    let mut parts = date.split_whitespace().skip(1);
    Some(DateParts {
        month: parts.next()?,
        day: parts.next()?,
        time_of_day: parts.next()?,
        year: parts.next()?,
    })
}

// Two-digit years from the RFC 850 format are placed in the century which
// puts them nearest to the year 2000.
fn expand_two_digit_year(year: i32) -> i32 {
    if year < 50 {
        2000 + year
    } else {
        1900 + year
    }
}

fn to_date_time(
    parts: &DateParts<'_>,
    two_digit_year: bool,
) -> Option<DateTime<Utc>> {
    let mut year = parts.year.parse::<i32>().ok()?;
    if two_digit_year {
        year = expand_two_digit_year(year);
    }
    let month = MONTHS.iter().position(|month| *month == parts.month)?;
    let month = u32::try_from(month + 1).ok()?;
    let day = parts.day.parse::<u32>().ok()?;
    let mut time_of_day = parts.time_of_day.split(':').map(str::parse::<u32>);
    let hour = time_of_day.next()?.ok()?;
    let minute = time_of_day.next()?.ok()?;
    let second = time_of_day.next()?.ok()?;
    let naive = NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(hour, minute, second)?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Parse a value given in any of the `HTTP-date` formats, such as that of a
/// `Date` header field.  `None` is returned if the value doesn't have the
/// shape of an `HTTP-date`.  A value with the right shape which doesn't name
/// a real date and time gives [`HttpDate::Invalid`].
#[must_use]
pub fn parse_date(value: &str) -> Option<HttpDate> {
    let parsed = match DATE_PARSER.parse(value) {
        Some(parsed) => parsed,
        None => {
            tracing::trace!(value, "Date value does not match grammar");
            return None;
        },
    };
    let date_time = if RFC850_DATE_PARSER.parse(parsed).is_some() {
        rfc850_date_parts(parsed).and_then(|parts| to_date_time(&parts, true))
    } else if ASCTIME_DATE_PARSER.parse(parsed).is_some() {
        // asctime carries no zone; it is read as GMT.
        asctime_date_parts(parsed).and_then(|parts| to_date_time(&parts, false))
    } else {
        imf_fixdate_parts(parsed).and_then(|parts| to_date_time(&parts, false))
    };
    match date_time {
        Some(date_time) => Some(HttpDate::Valid(date_time)),
        None => {
            tracing::trace!(value, "Date value is not a calendar date");
            Some(HttpDate::Invalid(parsed.to_string()))
        },
    }
}

impl fmt::Display for HttpDate {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Valid(date_time) => {
                write!(f, "{}", date_time.format("%a, %d %b %Y %H:%M:%S GMT"))
            },
            Self::Invalid(text) => write!(f, "{}", text),
        }
    }
}

impl From<DateTime<Utc>> for HttpDate {
    fn from(date_time: DateTime<Utc>) -> Self {
        Self::Valid(date_time)
    }
}

impl std::str::FromStr for HttpDate {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_date(value).ok_or_else(|| Error::InvalidDate(value.into()))
    }
}

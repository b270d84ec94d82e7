use crate::{
    fields::{
        parse_authorization,
        parse_content_encoding,
        parse_content_length,
        parse_content_type,
        parse_date,
        parse_host,
        parse_range,
        Credentials,
        Host,
        HttpDate,
        MediaType,
        RangesSpecifier,
    },
    Error,
};

/// This is a front end to the field parsers which refuses overly long
/// values before any grammar sees them, and reports failures as [`Error`]
/// values naming the field that was rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldParser {
    /// The maximum number of characters accepted in a field value, or
    /// `None` to accept values of any length.
    pub value_limit: Option<usize>,
}

impl FieldParser {
    fn parse<T>(
        &self,
        value: &str,
        parse: fn(&str) -> Option<T>,
        error: fn(String) -> Error,
    ) -> Result<T, Error> {
        if let Some(limit) = self.value_limit {
            let length = value.chars().count();
            if length > limit {
                tracing::debug!(length, limit, "Field value exceeds limit");
                return Err(Error::ValueTooLong(length));
            }
        }
        parse(value).ok_or_else(|| error(value.into()))
    }

    pub fn authorization(
        &self,
        value: &str,
    ) -> Result<Credentials, Error> {
        self.parse(value, parse_authorization, Error::InvalidAuthorization)
    }

    pub fn content_encoding(
        &self,
        value: &str,
    ) -> Result<Vec<String>, Error> {
        self.parse(value, parse_content_encoding, Error::InvalidContentEncoding)
    }

    pub fn content_length(
        &self,
        value: &str,
    ) -> Result<u64, Error> {
        self.parse(value, parse_content_length, Error::InvalidContentLength)
    }

    pub fn content_type(
        &self,
        value: &str,
    ) -> Result<MediaType, Error> {
        self.parse(value, parse_content_type, Error::InvalidContentType)
    }

    /// Parse an HTTP-date.  A date which matches the grammar but names no
    /// real instant is returned as [`HttpDate::Invalid`], not as an error.
    pub fn date(
        &self,
        value: &str,
    ) -> Result<HttpDate, Error> {
        self.parse(value, parse_date, Error::InvalidDate)
    }

    pub fn host(
        &self,
        value: &str,
    ) -> Result<Host, Error> {
        self.parse(value, parse_host, Error::InvalidHost)
    }

    #[must_use]
    pub fn new() -> Self {
        Self {
            value_limit: Some(8000),
        }
    }

    pub fn range(
        &self,
        value: &str,
    ) -> Result<RangesSpecifier, Error> {
        self.parse(value, parse_range, Error::InvalidRange)
    }
}

impl Default for FieldParser {
    fn default() -> Self {
        Self::new()
    }
}

/// This is the enumeration of all the different kinds of errors which this
/// crate generates.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The attached value is not a valid `Authorization` field value.
    #[error("invalid Authorization header value")]
    InvalidAuthorization(String),

    /// The attached value is not a valid `Content-Encoding` field value.
    #[error("invalid Content-Encoding header value")]
    InvalidContentEncoding(String),

    /// The attached value is not a valid `Content-Length` field value,
    /// or is too large to represent.
    #[error("invalid Content-Length header value")]
    InvalidContentLength(String),

    /// The attached value is not a valid `Content-Type` field value.
    #[error("invalid Content-Type header value")]
    InvalidContentType(String),

    /// The attached value does not match any of the HTTP-date formats.
    #[error("invalid HTTP-date")]
    InvalidDate(String),

    /// The attached value is not a valid `Host` field value, or its port
    /// is out of range.
    #[error("invalid Host header value")]
    InvalidHost(String),

    /// The attached value is not a valid `Range` field value, or one of its
    /// positions is too large to represent.
    #[error("invalid Range header value")]
    InvalidRange(String),

    /// The field value, whose length in characters is attached, exceeds the
    /// configured limit.
    #[error("header value exceeds maximum length limit")]
    ValueTooLong(usize),
}

mod authorization;
mod content_encoding;
mod content_length;
mod content_type;
mod date;
mod host;
mod range;

pub use authorization::{
    parse_authorization,
    CredentialParams,
    Credentials,
};
pub use content_encoding::parse_content_encoding;
pub use content_length::parse_content_length;
pub use content_type::{
    parse_content_type,
    MediaType,
};
pub use date::{
    parse_date,
    HttpDate,
};
pub use host::{
    parse_host,
    Host,
};
pub use range::{
    parse_range,
    RangeSpec,
    RangesSpecifier,
};

//! The `Host` field, from
//! [RFC 9110 section 7.2](https://www.rfc-editor.org/rfc/rfc9110#section-7.2),
//! whose value is the authority component of a URI as defined in
//! [RFC 3986 section 3.2](https://www.rfc-editor.org/rfc/rfc3986#section-3.2).

use crate::{
    core_rules::{
        ALPHA,
        DIGIT,
        HEXDIG,
    },
    end,
    optional,
    repetition,
    Anchored,
    Error,
    Rule,
};
use once_cell::sync::Lazy;
use std::fmt;

/// This holds the host and optional port given by a `Host` field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Host {
    /// The host, exactly as it appeared, including the square brackets
    /// around an IP literal.
    pub host: String,

    /// The port, if one was given.
    pub port: Option<u16>,
}

// h16 = 1*4HEXDIG
static H16: Lazy<Rule> = Lazy::new(|| repetition(&*HEXDIG, 1, Some(4)));

// dec-octet, with the longest forms first since the first alternative that
// matches is kept.
static DEC_OCTET: Lazy<Rule> = Lazy::new(|| {
    alternatives![
        concatenate!["25", ('0', '5')],
        concatenate!['2', ('0', '4'), DIGIT],
        concatenate!['1', DIGIT, DIGIT],
        concatenate![('1', '9'), DIGIT],
        DIGIT,
    ]
});

static IPV4_ADDRESS: Lazy<Rule> = Lazy::new(|| {
    concatenate![&*DEC_OCTET, '.', &*DEC_OCTET, '.', &*DEC_OCTET, '.', &*DEC_OCTET]
});

// ls32 = ( h16 ":" h16 ) / IPv4address
//
// IPv4address is tried first, because `h16 ":" h16` would otherwise take
// the first octet of an embedded IPv4 address for a hex group.
static LS32: Lazy<Rule> =
    Lazy::new(|| alternatives![&*IPV4_ADDRESS, concatenate![&*H16, ':', &*H16]]);

fn h16_colon(count: usize) -> Rule {
    repetition(concatenate![&*H16, ':'], count, Some(count))
}

// [ *n( h16 ":" ) h16 ], written as `h16 *n( ":" h16 )` so that the
// repetition can't consume the first colon of the "::" which follows.
fn prefix(n: usize) -> Rule {
    optional(concatenate![&*H16, repetition(concatenate![':', &*H16], 0, Some(n))])
}

static IPV6_ADDRESS: Lazy<Rule> = Lazy::new(|| {
    alternatives![
        concatenate![h16_colon(6), &*LS32],
        concatenate!["::", h16_colon(5), &*LS32],
        concatenate![optional(&*H16), "::", h16_colon(4), &*LS32],
        concatenate![prefix(1), "::", h16_colon(3), &*LS32],
        concatenate![prefix(2), "::", h16_colon(2), &*LS32],
        concatenate![prefix(3), "::", &*H16, ':', &*LS32],
        concatenate![prefix(4), "::", &*LS32],
        concatenate![prefix(5), "::", &*H16],
        concatenate![prefix(6), "::"],
    ]
});

static SUB_DELIMS: Lazy<Rule> =
    Lazy::new(|| alternatives!['!', '$', '&', '\'', '(', ')', '*', '+', ',', ';', '=']);

static UNRESERVED: Lazy<Rule> = Lazy::new(|| alternatives![&*ALPHA, DIGIT, '-', '.', '_', '~']);

static IPV_FUTURE: Lazy<Rule> = Lazy::new(|| {
    concatenate![
        'v',
        repetition(&*HEXDIG, 1, None),
        '.',
        repetition(alternatives![&*UNRESERVED, &*SUB_DELIMS, ':'], 1, None),
    ]
});

static IP_LITERAL: Lazy<Rule> =
    Lazy::new(|| concatenate!['[', alternatives![&*IPV6_ADDRESS, &*IPV_FUTURE], ']']);

static PCT_ENCODED: Lazy<Rule> = Lazy::new(|| concatenate!['%', &*HEXDIG, &*HEXDIG]);

static REG_NAME: Lazy<Rule> = Lazy::new(|| {
    repetition(alternatives![&*UNRESERVED, &*PCT_ENCODED, &*SUB_DELIMS], 0, None)
});

// host = IP-literal / IPv4address / reg-name
//
// Every IPv4address is also a reg-name, and the two produce the same host
// text.  Trying IPv4address on its own would commit to the dotted quad at
// the front of a name like `10.0.0.1.nip.io` and then fail on the rest.
static HOST: Lazy<Rule> = Lazy::new(|| alternatives![&*IP_LITERAL, &*REG_NAME]);

static PORT: Lazy<Rule> = Lazy::new(|| repetition(DIGIT, 0, None));

static HOST_PARSER: Lazy<Anchored> =
    Lazy::new(|| end(concatenate![&*HOST, optional(concatenate![':', &*PORT])]));

/// Parse the value of a `Host` header field.  `None` is returned if the
/// value doesn't match the field's grammar, or if the port is too large.
#[must_use]
pub fn parse_host(value: &str) -> Option<Host> {
    let parsed = match HOST_PARSER.parse(value) {
        Some(parsed) => parsed,
        None => {
            tracing::trace!(value, "Host value does not match grammar");
            return None;
        },
    };
    let host = HOST.parse(parsed)?;
    let port = match host.remainder.strip_prefix(':') {
        Some(port) if !port.is_empty() => match port.parse() {
            Ok(port) => Some(port),
            Err(_) => {
                tracing::trace!(value, "Host port out of range");
                return None;
            },
        },
        _ => None,
    };
    Some(Host {
        host: host.consumed.to_string(),
        port,
    })
}

impl fmt::Display for Host {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Host {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_host(value).ok_or_else(|| Error::InvalidHost(value.into()))
    }
}

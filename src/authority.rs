//! Authority decomposition.
//!
//! # Grammar Reference
//!
//! ```abnf
//! authority = [ userinfo "@" ] host [ ":" port ]
//! userinfo  = user [ ":" password ]
//! host      = "[" *( not "]" ) "]" / *( not "[" / ":" )
//! port      = *DIGIT
//! ```
//!
//! The userinfo ends at the first `@`; a plain host may itself contain `@`.

use crate::constants::UNSPECIFIED_PORT;
use crate::error::ParseErrorKind;
use crate::percent;

/// The decoded components of an authority block.
///
/// Decoded components are raw bytes; escapes may produce any byte value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Authority {
    pub username: Vec<u8>,
    pub password: Vec<u8>,
    pub host: Vec<u8>,
    pub port: u16,
}

/// Splits an authority into decoded userinfo, host and port.
///
/// The port is validated on its raw form; it is never percent-decoded.
pub(crate) fn parse_authority(input: &str) -> Result<Authority, ParseErrorKind> {
    let (userinfo, host_port) = match input.split_once('@') {
        Some((userinfo, rest)) => (Some(userinfo), rest),
        None => (None, input),
    };

    let (host, port) = split_host_port(input, host_port)?;
    let port = port.map_or(Ok(UNSPECIFIED_PORT), parse_port)?;

    let (username, password) = match userinfo {
        Some(info) => match info.split_once(':') {
            Some((user, pass)) => (
                percent::decode_owned(user)?,
                percent::decode_owned(pass)?,
            ),
            None => (percent::decode_owned(info)?, Vec::new()),
        },
        None => (Vec::new(), Vec::new()),
    };

    Ok(Authority {
        username,
        password,
        host: percent::decode_owned(host)?,
        port,
    })
}

/// Returns the raw host and the raw port substring following `:`, if any.
fn split_host_port<'a>(
    authority: &str,
    input: &'a str,
) -> Result<(&'a str, Option<&'a str>), ParseErrorKind> {
    let host_end = if input.starts_with('[') {
        let closing = input
            .find(']')
            .ok_or_else(|| invalid(authority, "missing closing bracket for IPv6 literal"))?;
        closing + 1
    } else {
        input.find(['[', ':']).unwrap_or(input.len())
    };

    let (host, rest) = input.split_at(host_end);
    if rest.is_empty() {
        return Ok((host, None));
    }

    match rest.strip_prefix(':') {
        Some(port) => Ok((host, Some(port))),
        None if rest.starts_with('[') => {
            Err(invalid(authority, "'[' may only open an IPv6 literal"))
        }
        None => Err(invalid(authority, "expected ':' after IPv6 closing bracket")),
    }
}

fn parse_port(raw: &str) -> Result<u16, ParseErrorKind> {
    if raw.is_empty() {
        return Ok(UNSPECIFIED_PORT);
    }

    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseErrorKind::InvalidPort {
            value: raw.to_string(),
            reason: "port must contain only decimal digits",
        });
    }

    // All digits, so the only possible failure is overflow.
    raw.parse::<u16>().map_err(|_| ParseErrorKind::InvalidPort {
        value: raw.to_string(),
        reason: "port must be 0-65535",
    })
}

fn invalid(authority: &str, reason: &'static str) -> ParseErrorKind {
    ParseErrorKind::InvalidAuthority {
        authority: authority.to_string(),
        reason,
    }
}

//! Error types for URI parsing.

use std::fmt;

/// Errors that can occur when parsing a URI.
///
/// `input` is always the complete string handed to [`Uri::parse`]; the
/// [`kind`](ParseErrorKind) carries the offending substring.
///
/// [`Uri::parse`]: crate::Uri::parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input does not match `scheme ":" rest`
    InvalidUri {
        /// Reason for rejection
        reason: &'static str,
    },
    /// The authority block following `//` is malformed
    InvalidAuthority {
        /// The raw authority substring
        authority: String,
        /// Reason for rejection
        reason: &'static str,
    },
    /// The port is not a decimal number in 0-65535
    InvalidPort {
        /// The raw port substring
        value: String,
        /// Reason for rejection
        reason: &'static str,
    },
    /// A percent escape is truncated or not two hexadecimal digits
    MalformedEscape(DecodeError),
}

impl ParseError {
    pub(crate) fn new(input: &str, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse URI '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::InvalidUri { reason } => write!(f, "invalid URI: {reason}"),
            ParseErrorKind::InvalidAuthority { authority, reason } => {
                write!(f, "invalid authority '{authority}': {reason}")
            }
            ParseErrorKind::InvalidPort { value, reason } => {
                write!(f, "invalid port '{value}': {reason}")
            }
            ParseErrorKind::MalformedEscape(e) => write!(f, "malformed escape: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::MalformedEscape(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors for percent-decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// The string that was being decoded
    pub value: String,
    /// Byte offset in `value` of the escape (or raw byte) where decoding failed
    pub position: usize,
    /// Reason for rejection
    pub reason: &'static str,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot decode '{}' at byte {}: {}",
            self.value, self.position, self.reason
        )
    }
}

impl std::error::Error for DecodeError {}

impl From<DecodeError> for ParseErrorKind {
    fn from(e: DecodeError) -> Self {
        Self::MalformedEscape(e)
    }
}

//! Percent-decoding of `%XX` escapes.
//!
//! Decoding works on bytes: every escape yields exactly one byte and every
//! other byte is copied through. Escapes must be complete; `%` followed by
//! fewer than two hexadecimal digits is an error rather than a best-effort
//! guess.
//!
//! ```
//! use artanis_uri::percent;
//!
//! assert_eq!(percent::decode_str("100%25").unwrap(), "100%");
//! assert_eq!(&*percent::decode("%ff").unwrap(), &[0xff]);
//! assert!(percent::decode("%2").is_err());
//! ```

use std::borrow::Cow;

use crate::error::DecodeError;

/// Decodes percent escapes into raw bytes.
///
/// Returns the input unchanged (borrowed) when it contains no `%`.
///
/// # Errors
///
/// Returns `DecodeError` if a `%` is not followed by two hexadecimal digits.
pub fn decode(input: &str) -> Result<Cow<'_, [u8]>, DecodeError> {
    let bytes = input.as_bytes();
    let Some(first) = bytes.iter().position(|&b| b == b'%') else {
        return Ok(Cow::Borrowed(bytes));
    };

    let mut out = Vec::with_capacity(bytes.len());
    out.extend_from_slice(&bytes[..first]);

    let mut i = first;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value);
            let lo = bytes.get(i + 2).copied().and_then(hex_value);
            match (hi, lo) {
                (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
                _ => {
                    let reason = if bytes.len() < i + 3 {
                        "escape is truncated"
                    } else {
                        "escape is not two hexadecimal digits"
                    };
                    return Err(DecodeError {
                        value: input.to_string(),
                        position: i,
                        reason,
                    });
                }
            }
            i += 3;
        } else {
            out.push(b);
            i += 1;
        }
    }

    Ok(Cow::Owned(out))
}

/// Decodes percent escapes and requires the result to be UTF-8.
///
/// # Errors
///
/// Returns `DecodeError` if an escape is malformed or the decoded bytes are
/// not valid UTF-8. In the latter case `position` is the offset in `input` of
/// the escape or byte that produced the first invalid byte.
pub fn decode_str(input: &str) -> Result<Cow<'_, str>, DecodeError> {
    match decode(input)? {
        Cow::Borrowed(_) => Ok(Cow::Borrowed(input)),
        Cow::Owned(bytes) => String::from_utf8(bytes).map(Cow::Owned).map_err(|e| DecodeError {
            value: input.to_string(),
            position: input_offset(input, e.utf8_error().valid_up_to()),
            reason: "decoded bytes are not valid UTF-8",
        }),
    }
}

/// Decodes into an owned byte buffer, the form stored in [`Uri`](crate::Uri).
pub(crate) fn decode_owned(input: &str) -> Result<Vec<u8>, DecodeError> {
    decode(input).map(Cow::into_owned)
}

/// Maps an offset in the decoded output back to `input`, which is known to
/// hold only well-formed escapes.
fn input_offset(input: &str, decoded: usize) -> usize {
    let bytes = input.as_bytes();
    let mut i = 0;
    for _ in 0..decoded {
        i += if bytes[i] == b'%' { 3 } else { 1 };
    }
    i
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

//! Main URI type.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::authority::{Authority, parse_authority};
use crate::constants::{
    AUTHORITY_PREFIX, FRAGMENT_DELIMITER, QUERY_DELIMITER, SCHEME_SEPARATOR, UNSPECIFIED_PORT,
};
use crate::error::{ParseError, ParseErrorKind};
use crate::percent;
use crate::query::QueryParams;

/// A URI decomposed into its components.
///
/// # Structure
///
/// ```text
/// scheme ":" [ "//" authority ] path [ "?" query ] [ "#" fragment ]
/// ```
///
/// Parsing runs in a single linear pass over the input. A `Uri` is either
/// fully constructed or not constructed at all, and never changes afterwards;
/// query parameters are extracted during parsing, so a `Uri` can be shared
/// across threads freely.
///
/// Decoded components are kept as raw bytes, since an escape such as `%E9`
/// may produce bytes that are not UTF-8. The `*_bytes` accessors return them
/// exactly; the string accessors replace invalid sequences with U+FFFD.
///
/// # Examples
///
/// ```
/// use artanis_uri::Uri;
///
/// let uri = Uri::parse("HTTP://user:pw@[::1]:8080/a%20b?x=1&y#top").unwrap();
/// assert_eq!(uri.scheme(), "http");
/// assert!(uri.has_authority());
/// assert_eq!(uri.username(), "user");
/// assert_eq!(uri.host(), "[::1]");
/// assert_eq!(uri.hostname(), "::1");
/// assert_eq!(uri.port(), 8080);
/// assert_eq!(uri.path(), "/a b");
/// assert_eq!(uri.query(), "x=1&y");
/// assert_eq!(uri.query_params().get("y"), Some(""));
/// assert_eq!(uri.fragment(), "top");
/// assert_eq!(uri.authority(), "user:pw@[::1]:8080");
/// ```
#[derive(Debug, Clone)]
pub struct Uri {
    scheme: String,
    has_authority: bool,
    username: Vec<u8>,
    password: Vec<u8>,
    host: Vec<u8>,
    port: u16,
    path: Vec<u8>,
    query: Vec<u8>,
    fragment: Vec<u8>,
    query_params: QueryParams,
    /// The string this URI was parsed from
    input: String,
}

impl Uri {
    /// Parses a URI from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The input does not start with a valid scheme followed by ':'
    /// - The authority is malformed (e.g. an unterminated IPv6 literal)
    /// - The port is not a decimal number in 0-65535
    /// - A percent escape is truncated or not two hexadecimal digits
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_inner(input).map_err(|kind| ParseError::new(input, kind))
    }

    /// Returns the scheme, lowercased.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns true if the URI has an authority (the part after `scheme:` starts with `//`).
    #[must_use]
    pub const fn has_authority(&self) -> bool {
        self.has_authority
    }

    /// Returns the decoded username, or an empty string.
    #[must_use]
    pub fn username(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.username)
    }

    /// Returns the decoded username bytes.
    #[must_use]
    pub fn username_bytes(&self) -> &[u8] {
        &self.username
    }

    /// Returns the decoded password, or an empty string.
    #[must_use]
    pub fn password(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.password)
    }

    /// Returns the decoded password bytes.
    #[must_use]
    pub fn password_bytes(&self) -> &[u8] {
        &self.password
    }

    /// Returns the decoded host. IPv6 literals keep their brackets.
    #[must_use]
    pub fn host(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.host)
    }

    /// Returns the decoded host bytes.
    #[must_use]
    pub fn host_bytes(&self) -> &[u8] {
        &self.host
    }

    /// Returns the port, or `0` if none was given.
    ///
    /// An explicit `:0` also yields `0`, so the two cases cannot be told
    /// apart through this accessor.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the path.
    ///
    /// When the URI has an authority the path is percent-decoded; otherwise
    /// it is everything between `scheme:` and the query, verbatim.
    #[must_use]
    pub fn path(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.path)
    }

    /// Returns the path bytes.
    #[must_use]
    pub fn path_bytes(&self) -> &[u8] {
        &self.path
    }

    /// Returns the decoded query, or an empty string.
    #[must_use]
    pub fn query(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.query)
    }

    /// Returns the decoded query bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use artanis_uri::Uri;
    ///
    /// let uri = Uri::parse("http://h/?name=Jos%E9").unwrap();
    /// assert_eq!(uri.query_bytes(), b"name=Jos\xe9");
    /// assert_eq!(uri.query(), "name=Jos\u{fffd}");
    /// ```
    #[must_use]
    pub fn query_bytes(&self) -> &[u8] {
        &self.query
    }

    /// Returns the decoded fragment, or an empty string.
    #[must_use]
    pub fn fragment(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.fragment)
    }

    /// Returns the decoded fragment bytes.
    #[must_use]
    pub fn fragment_bytes(&self) -> &[u8] {
        &self.fragment
    }

    /// Returns the parameters of the decoded query, in query order.
    #[must_use]
    pub const fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    /// Returns the string this URI was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.input
    }

    /// Reconstructs the authority from its decoded components.
    ///
    /// The userinfo is omitted when both username and password are empty,
    /// and the port is omitted when it is `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use artanis_uri::Uri;
    ///
    /// let uri = Uri::parse("http://u:p@h:8080/").unwrap();
    /// assert_eq!(uri.authority(), "u:p@h:8080");
    ///
    /// let uri = Uri::parse("http://h/").unwrap();
    /// assert_eq!(uri.authority(), "h");
    /// ```
    #[must_use]
    pub fn authority(&self) -> String {
        match String::from_utf8(self.authority_bytes()) {
            Ok(authority) => authority,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }

    /// Reconstructs the authority from its decoded components, as bytes.
    #[must_use]
    pub fn authority_bytes(&self) -> Vec<u8> {
        let mut result =
            Vec::with_capacity(self.host.len() + self.username.len() + self.password.len() + 8);

        if !self.username.is_empty() || !self.password.is_empty() {
            result.extend_from_slice(&self.username);
            if !self.password.is_empty() {
                result.push(b':');
                result.extend_from_slice(&self.password);
            }
            result.push(b'@');
        }

        result.extend_from_slice(&self.host);

        if self.port != UNSPECIFIED_PORT {
            result.push(b':');
            result.extend_from_slice(self.port.to_string().as_bytes());
        }

        result
    }

    /// Returns the host with IPv6 literal brackets removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use artanis_uri::Uri;
    ///
    /// assert_eq!(Uri::parse("coap://[::1]/").unwrap().hostname(), "::1");
    /// assert_eq!(Uri::parse("coap://example.com/").unwrap().hostname(), "example.com");
    /// ```
    #[must_use]
    pub fn hostname(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.hostname_bytes())
    }

    /// Returns the host bytes with IPv6 literal brackets removed.
    #[must_use]
    pub fn hostname_bytes(&self) -> &[u8] {
        match self.host.strip_prefix(b"[") {
            Some(inner) => inner.strip_suffix(b"]").unwrap_or(inner),
            None => &self.host,
        }
    }

    fn parse_inner(input: &str) -> Result<Self, ParseErrorKind> {
        let (scheme, rest) = Self::split_scheme(input)?;

        // Split off fragment
        let (rest, fragment) = match rest.split_once(FRAGMENT_DELIMITER) {
            Some((rest, fragment)) => (rest, percent::decode_owned(fragment)?),
            None => (rest, Vec::new()),
        };

        // Split off query
        let (authority_and_path, query) = match rest.split_once(QUERY_DELIMITER) {
            Some((rest, query)) => (rest, percent::decode_owned(query)?),
            None => (rest, Vec::new()),
        };

        // Without a leading "//" the whole block is an opaque path
        let (has_authority, authority, path) =
            match authority_and_path.strip_prefix(AUTHORITY_PREFIX) {
                Some(block) => {
                    let (authority, path) =
                        block.find('/').map_or((block, ""), |i| block.split_at(i));
                    let authority = parse_authority(authority)?;
                    (true, authority, percent::decode_owned(path)?)
                }
                None => (
                    false,
                    Authority::default(),
                    authority_and_path.as_bytes().to_vec(),
                ),
            };

        let query_params = QueryParams::parse(&String::from_utf8_lossy(&query));

        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            has_authority,
            username: authority.username,
            password: authority.password,
            host: authority.host,
            port: authority.port,
            path,
            query,
            fragment,
            query_params,
            input: input.to_string(),
        })
    }

    /// Splits `scheme ":" rest`, validating `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
    fn split_scheme(input: &str) -> Result<(&str, &str), ParseErrorKind> {
        let (scheme, rest) = input
            .split_once(SCHEME_SEPARATOR)
            .ok_or(ParseErrorKind::InvalidUri {
                reason: "missing ':' after scheme",
            })?;

        let mut chars = scheme.bytes();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            Some(_) => {
                return Err(ParseErrorKind::InvalidUri {
                    reason: "scheme must start with a letter",
                });
            }
            None => {
                return Err(ParseErrorKind::InvalidUri {
                    reason: "scheme cannot be empty",
                });
            }
        }

        if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, b'+' | b'-' | b'.')) {
            return Err(ParseErrorKind::InvalidUri {
                reason: "scheme may only contain letters, digits, '+', '-' and '.'",
            });
        }

        Ok((scheme, rest))
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.input)
    }
}

impl FromStr for Uri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.input
    }
}

impl TryFrom<&str> for Uri {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

// Every other field is a function of the input, so the input alone decides equality.
impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.input == other.input
    }
}

impl Eq for Uri {}

impl Hash for Uri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.input.hash(state);
    }
}

impl PartialOrd for Uri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.input.cmp(&other.input)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.input)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

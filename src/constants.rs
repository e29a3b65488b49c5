//! Constants for URI decomposition.

/// Port value meaning "no port specified".
///
/// An explicit `:0` in the authority also yields this value.
pub const UNSPECIFIED_PORT: u16 = 0;

/// Marker that introduces an authority after the scheme separator.
pub const AUTHORITY_PREFIX: &str = "//";

/// Separates the scheme from the rest of the URI.
pub const SCHEME_SEPARATOR: char = ':';

/// Introduces the query component.
pub const QUERY_DELIMITER: char = '?';

/// Introduces the fragment component.
pub const FRAGMENT_DELIMITER: char = '#';

/// Separates query parameters.
pub const PARAM_SEPARATOR: char = '&';

/// Separates a query parameter name from its value.
pub const PARAM_VALUE_SEPARATOR: char = '=';

//! Query parameter extraction.

use std::slice;

use crate::constants::{PARAM_SEPARATOR, PARAM_VALUE_SEPARATOR};

/// Query parameters extracted from a URI's decoded query string.
///
/// Parameters keep the order in which they appear in the query, and repeated
/// names are preserved rather than merged.
///
/// # Examples
///
/// ```
/// use artanis_uri::QueryParams;
///
/// let params = QueryParams::parse("a=1&b=&c&a=2");
/// let pairs: Vec<_> = params.iter().collect();
/// assert_eq!(pairs, vec![("a", "1"), ("b", ""), ("c", ""), ("a", "2")]);
/// assert_eq!(params.get("a"), Some("1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QueryParams {
    params: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty query params instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts parameters from a query string (without leading '?').
    ///
    /// Parameters are separated by `&` and have the form `name[=value]`. A
    /// parameter with an empty name is dropped, as is one containing more
    /// than one `=`. The input is taken as already decoded; names and values
    /// are not decoded again.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let params = input
            .split(PARAM_SEPARATOR)
            .filter_map(Self::split_param)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Self { params }
    }

    /// Returns the value of the first parameter with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for the given name, in query order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.params
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if a parameter with the given name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.params.iter().any(|(n, _)| n == name)
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of parameters, counting repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns an iterator over `(name, value)` pairs in query order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the parameters as a slice of owned pairs.
    #[must_use]
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.params
    }

    fn split_param(param: &str) -> Option<(&str, &str)> {
        let (name, value) = param
            .split_once(PARAM_VALUE_SEPARATOR)
            .unwrap_or((param, ""));

        if name.is_empty() || value.contains(PARAM_VALUE_SEPARATOR) {
            return None;
        }

        Some((name, value))
    }
}

impl From<&str> for QueryParams {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = &'a (String, String);
    type IntoIter = slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(q: &str) -> Vec<(String, String)> {
        QueryParams::parse(q).as_slice().to_vec()
    }

    fn owned(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn parse_empty() {
        let params = QueryParams::parse("");
        assert!(params.is_empty());
        assert_eq!(params.len(), 0);
    }

    #[test]
    fn parse_single_param() {
        let params = QueryParams::parse("version=2.0");
        assert_eq!(params.get("version"), Some("2.0"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn missing_value_is_empty() {
        assert_eq!(
            pairs("a=1&b=&c"),
            owned(&[("a", "1"), ("b", ""), ("c", "")])
        );
    }

    #[test]
    fn empty_name_is_dropped() {
        assert_eq!(pairs("=x&a=1"), owned(&[("a", "1")]));
        assert_eq!(pairs("a=1&&b=2&"), owned(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn extra_equals_drops_param() {
        assert_eq!(pairs("x=1&a=b=c&y=2"), owned(&[("x", "1"), ("y", "2")]));
    }

    #[test]
    fn duplicates_are_preserved_in_order() {
        let params = QueryParams::parse("tag=b&x=1&tag=a");
        assert_eq!(params.len(), 3);
        assert_eq!(params.get("tag"), Some("b"));
        assert_eq!(params.get_all("tag").collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn values_are_not_decoded_again() {
        assert_eq!(pairs("q=%41"), owned(&[("q", "%41")]));
    }

    #[test]
    fn contains_and_missing_get() {
        let params = QueryParams::parse("flag");
        assert!(params.contains("flag"));
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("other"), None);
    }

    #[test]
    fn iter_and_into_iter_agree() {
        let params = QueryParams::parse("z=1&a=2");
        let borrowed: Vec<_> = params.iter().collect();
        assert_eq!(borrowed, vec![("z", "1"), ("a", "2")]);

        let mut names = Vec::new();
        for (name, _) in &params {
            names.push(name.as_str());
        }
        assert_eq!(names, vec!["z", "a"]);
    }
}

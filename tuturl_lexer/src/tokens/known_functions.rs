//! Names the reclassification pass promotes to Function tokens
use crate::config::runtime::{parse_name_list, DEFAULT_KNOWN_FUNCTIONS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnownFunctions(BTreeSet<String>);

impl KnownFunctions {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Comma-separated list as found in environment variables
    pub fn parse_list(value: &str) -> Self {
        parse_name_list(value).into_iter().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for KnownFunctions {
    fn default() -> Self {
        DEFAULT_KNOWN_FUNCTIONS.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for KnownFunctions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_contains_print() {
        let known = KnownFunctions::default();
        assert!(known.contains("print"));
        assert_eq!(known.len(), 1);
    }

    #[test]
    fn test_parse_list() {
        let known = KnownFunctions::parse_list("print, read ,");
        assert_eq!(known.iter().collect::<Vec<_>>(), ["print", "read"]);
        assert!(KnownFunctions::parse_list("").is_empty());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut known = KnownFunctions::new();
        assert!(known.insert("show"));
        assert!(!known.insert("show"));
        assert!(known.contains("show"));
        assert!(!known.contains("Show"));
    }
}

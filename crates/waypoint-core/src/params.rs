//! Raw query/form parameter access.
//!
//! Handlers read parameters by name and decide themselves how to parse them,
//! so the extractor never rejects a request on its own. When a key repeats,
//! the first occurrence wins.

use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Decode an `application/x-www-form-urlencoded` string (a query string
    /// or a form body).
    pub fn parse(raw: &str) -> Self {
        Self {
            pairs: form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Decode an optional raw query string.
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    /// First value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, or the empty string when absent.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Combine two parameter sets; values in `self` shadow those in `other`.
    pub fn merged_over(mut self, other: Params) -> Self {
        self.pairs.extend(other.pairs);
        self
    }
}

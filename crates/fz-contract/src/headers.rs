// SPDX-License-Identifier: MIT OR Apache-2.0
//! Case-insensitive, duplicate-preserving header storage.
//!
//! Transport implementations must normalize header names to lowercase but
//! must *not* collapse repeated headers (e.g. multiple `Set-Cookie` values),
//! per the transport contract. A `HashMap<String, String>` cannot represent
//! that, so headers are stored as an ordered list with case-insensitive
//! lookup helpers instead.

use serde::{Deserialize, Serialize};

/// An ordered, case-insensitive, duplicate-preserving header collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderMultiMap(Vec<(String, String)>);

impl HeaderMultiMap {
    /// Create an empty header collection.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a header, preserving any existing entry with the same name.
    /// The name is stored lowercased.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into().to_ascii_lowercase(), value.into()));
    }

    /// Return the first value for `name` (case-insensitive), if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let needle = name.to_ascii_lowercase();
        self.0
            .iter()
            .find(|(k, _)| *k == needle)
            .map(|(_, v)| v.as_str())
    }

    /// Return every value for `name` (case-insensitive), in insertion order.
    pub fn get_all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> {
        let needle = name.to_ascii_lowercase();
        self.0
            .iter()
            .filter(move |(k, _)| *k == needle)
            .map(|(_, v)| v.as_str())
    }

    /// Return `true` if any header with `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over every `(name, value)` pair, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of header entries, counting duplicates separately.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if no headers are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for HeaderMultiMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.push(k, v);
        }
        map
    }
}

//! Lookup keys and directory entries

use serde::Serialize;

/// Key used to look up a remote entity
///
/// An opaque, user-supplied string (usually a display name). It is not
/// guaranteed unique at the instant of lookup but is expected to become
/// resolvable within a bounded time window. A key lives for a single
/// resolution; nothing is persisted across calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LookupKey(String);

impl LookupKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LookupKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for LookupKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// A single result returned by a directory listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// Opaque identifier assigned by the remote service (e.g. a UUID)
    pub id: String,
    /// The human-readable label the lookup filter matched on
    pub label: String,
    /// Raw attribute document as returned by the listing, for callers
    /// that need more than the identifier
    pub attributes: serde_json::Value,
}

impl Entry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            attributes: serde_json::Value::Null,
        }
    }

    pub fn with_attributes(mut self, attributes: serde_json::Value) -> Self {
        self.attributes = attributes;
        self
    }
}

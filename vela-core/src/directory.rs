//! Directory - Trait abstracting remote listing/filter lookups
//!
//! A Directory performs one read-only listing or filter call against a
//! remote service. It never retries: the resolver owns the retry loop and
//! decides whether an outcome is worth polling again.

use async_trait::async_trait;
use thiserror::Error;

use crate::entry::{Entry, LookupKey};

/// Errors reported by a directory lookup
///
/// Every variant is permanent from the resolver's point of view: a
/// directory that got an answer it cannot use reports it here and the
/// resolver aborts immediately. "No matches yet" is not an error, it is
/// an empty result set.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The request never produced an HTTP response
    #[error("transport error: {0}")]
    Transport(String),

    /// The service rejected our credentials
    #[error("authorization failed (status {status})")]
    Auth { status: u16 },

    /// The service answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The directory was misconfigured (missing credentials, bad region)
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl DirectoryError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// One observation of the remote directory
///
/// The tri-state consumed by the polling loop: a hit carries every entry
/// that satisfied the filter, a miss means the key matched nothing and is
/// expected to self-heal on retry (eventual consistency).
#[derive(Debug)]
pub enum Probe {
    Hit(Vec<Entry>),
    Miss,
}

impl Probe {
    /// Collapse a listing result into a probe; an empty listing is a miss.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        if entries.is_empty() {
            Self::Miss
        } else {
            Self::Hit(entries)
        }
    }
}

/// Read-only remote listing/filter API
///
/// Implementations perform exactly one logical listing pass per `find`
/// call (a single filtered request, or one pagination walk for endpoints
/// without a server-side filter). Each call must be idempotent.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Entity type this directory serves (e.g. "routing_skill")
    fn entity_type(&self) -> &'static str;

    /// Return every entry matching the key, or an empty vec if none do
    async fn find(&self, key: &LookupKey) -> DirectoryResult<Vec<Entry>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listing_is_a_miss() {
        assert!(matches!(Probe::from_entries(vec![]), Probe::Miss));
    }

    #[test]
    fn non_empty_listing_is_a_hit() {
        let probe = Probe::from_entries(vec![Entry::new("id-1", "one")]);
        match probe {
            Probe::Hit(entries) => assert_eq!(entries.len(), 1),
            Probe::Miss => panic!("expected a hit"),
        }
    }

    #[test]
    fn directory_error_display() {
        let err = DirectoryError::Auth { status: 403 };
        assert_eq!(err.to_string(), "authorization failed (status 403)");

        let err = DirectoryError::Api {
            status: 500,
            message: "internal error".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 500): internal error");
    }
}

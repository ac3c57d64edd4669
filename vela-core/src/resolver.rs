//! Resolver - Bounded polling lookup of names against a directory
//!
//! Remote directories are eventually consistent: an entity created a
//! moment ago may not show up in listings yet. The resolver bridges that
//! gap by polling a one-shot lookup until it matches, the deadline
//! elapses, or the lookup fails for a reason retrying cannot fix.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::directory::{Directory, DirectoryError, Probe};
use crate::entry::{Entry, LookupKey};

/// How long and how often to poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum total wait before giving up
    pub max_wait: Duration,
    /// Pause between poll attempts
    pub interval: Duration,
}

impl RetryPolicy {
    /// Observed propagation window for directory listings
    pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(15);
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

    /// Build a policy; a zero interval is raised to 1ms so the loop
    /// always yields between attempts.
    pub fn new(max_wait: Duration, interval: Duration) -> Self {
        Self {
            max_wait,
            interval: interval.max(Duration::from_millis(1)),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_wait: Self::DEFAULT_MAX_WAIT,
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}

/// Terminal outcomes of a resolution other than success
///
/// `Timeout` and `Lookup` are deliberately distinct: the first means the
/// entity may simply not have propagated yet, the second means retrying
/// would never have helped.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Deadline elapsed while the directory kept reporting no matches
    #[error(
        "timed out after {waited:?} waiting for {entity} \"{key}\": the entity may not exist or has not yet propagated"
    )]
    Timeout {
        entity: String,
        key: LookupKey,
        waited: Duration,
    },

    /// The directory reported a failure that retrying will not fix
    #[error("lookup for {entity} \"{key}\" failed")]
    Lookup {
        entity: String,
        key: LookupKey,
        #[source]
        source: DirectoryError,
    },

    /// More than one entry matched the key
    #[error("{count} {entity} entries match \"{key}\"; the key must identify exactly one")]
    Ambiguous {
        entity: String,
        key: LookupKey,
        count: usize,
    },

    /// The caller abandoned the operation mid-resolution
    #[error("resolution of {entity} \"{key}\" was cancelled")]
    Cancelled { entity: String, key: LookupKey },

    /// No directory is registered for the requested entity type
    #[error("no directory registered for entity type \"{entity}\"")]
    UnknownEntity { entity: String },
}

impl ResolveError {
    /// Entity type the failed resolution was for
    pub fn entity_type(&self) -> &str {
        match self {
            Self::Timeout { entity, .. }
            | Self::Lookup { entity, .. }
            | Self::Ambiguous { entity, .. }
            | Self::Cancelled { entity, .. }
            | Self::UnknownEntity { entity } => entity,
        }
    }

    /// Key that was being resolved, if the resolution got that far
    pub fn key(&self) -> Option<&LookupKey> {
        match self {
            Self::Timeout { key, .. }
            | Self::Lookup { key, .. }
            | Self::Ambiguous { key, .. }
            | Self::Cancelled { key, .. } => Some(key),
            Self::UnknownEntity { .. } => None,
        }
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Poll a probe closure until it yields exactly one entry
///
/// The generic engine behind [`Resolver::resolve`]. The probe performs
/// one idempotent observation of the remote directory per call; this
/// function owns the loop: a miss is retried on a fixed interval until
/// `policy.max_wait` elapses, a directory error aborts immediately with
/// zero further attempts, and an ambiguous hit aborts immediately as
/// well. The wait between attempts is raced against `cancel` so a dead
/// request never sits out its full interval.
pub async fn poll_until_resolved<F, Fut>(
    entity: &str,
    key: &LookupKey,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    mut probe: F,
) -> ResolveResult<Entry>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Probe, DirectoryError>>,
{
    let start = Instant::now();
    let mut attempt: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled {
                entity: entity.to_string(),
                key: key.clone(),
            });
        }

        attempt += 1;
        match probe().await {
            Ok(Probe::Hit(mut entries)) => match entries.len() {
                1 => {
                    let entry = entries.remove(0);
                    debug!(entity, %key, id = %entry.id, attempt, "resolved");
                    return Ok(entry);
                }
                count => {
                    return Err(ResolveError::Ambiguous {
                        entity: entity.to_string(),
                        key: key.clone(),
                        count,
                    });
                }
            },
            Ok(Probe::Miss) => {
                debug!(entity, %key, attempt, "no match yet");
            }
            Err(source) => {
                return Err(ResolveError::Lookup {
                    entity: entity.to_string(),
                    key: key.clone(),
                    source,
                });
            }
        }

        let waited = start.elapsed();
        if waited >= policy.max_wait {
            return Err(ResolveError::Timeout {
                entity: entity.to_string(),
                key: key.clone(),
                waited,
            });
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                return Err(ResolveError::Cancelled {
                    entity: entity.to_string(),
                    key: key.clone(),
                });
            }
            _ = tokio::time::sleep(policy.interval) => {}
        }
    }
}

/// Name resolver
///
/// Resolves a [`LookupKey`] to the single [`Entry`] it identifies,
/// within the policy's deadline. Holds no state across calls; it is
/// cheap to clone and safe to share between concurrent resolutions,
/// each of which owns only its loop-local state.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    policy: RetryPolicy,
}

impl Resolver {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Resolve `key` against `dir`, polling until it matches exactly one
    /// entry or a terminal outcome is reached.
    pub async fn resolve(
        &self,
        dir: &dyn Directory,
        key: &LookupKey,
        cancel: &CancellationToken,
    ) -> ResolveResult<Entry> {
        poll_until_resolved(dir.entity_type(), key, &self.policy, cancel, || {
            let fut = dir.find(key);
            async move { Ok(Probe::from_entries(fut.await?)) }
        })
        .await
    }
}

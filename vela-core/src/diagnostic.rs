//! Diagnostic - User-facing rendering of resolution failures
//!
//! The resolver surfaces errors verbatim; this module converts them into
//! the structured diagnostic an operator sees at the edge (CLI, logs).

use std::error::Error as _;

use crate::resolver::ResolveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// Structured report of a failed resolution: the entity type, the key
/// that was searched for, and the underlying cause if one exists.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub entity_type: String,
    pub key: Option<String>,
    pub summary: String,
    pub detail: Option<String>,
}

impl Diagnostic {
    pub fn from_resolve_error(err: &ResolveError) -> Self {
        Self {
            severity: Severity::Error,
            entity_type: err.entity_type().to_string(),
            key: err.key().map(|k| k.to_string()),
            summary: err.to_string(),
            detail: err.source().map(|cause| cause.to_string()),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.summary)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

impl From<&ResolveError> for Diagnostic {
    fn from(err: &ResolveError) -> Self {
        Self::from_resolve_error(err)
    }
}

//! Vela Core
//!
//! Core library for resolving human-readable names to opaque identifiers
//! against eventually consistent remote directories

pub mod diagnostic;
pub mod directory;
pub mod entry;
pub mod registry;
pub mod resolver;

pub use diagnostic::{Diagnostic, Severity};
pub use directory::{Directory, DirectoryError, DirectoryResult, Probe};
pub use entry::{Entry, LookupKey};
pub use registry::DirectoryRegistry;
pub use resolver::{ResolveError, ResolveResult, Resolver, RetryPolicy, poll_until_resolved};

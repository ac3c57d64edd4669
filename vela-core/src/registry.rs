//! Registry - Explicit mapping from entity types to directories
//!
//! Built once at startup and passed to whoever resolves names; there is
//! no ambient global registration.

use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::directory::Directory;
use crate::entry::{Entry, LookupKey};
use crate::resolver::{ResolveError, ResolveResult, Resolver};

/// Directories keyed by their entity type name
#[derive(Default)]
pub struct DirectoryRegistry {
    directories: HashMap<&'static str, Arc<dyn Directory>>,
}

impl DirectoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory under its own entity type; re-registering a
    /// type replaces the previous directory.
    pub fn register(&mut self, directory: Arc<dyn Directory>) {
        self.directories.insert(directory.entity_type(), directory);
    }

    pub fn with_directory(mut self, directory: Arc<dyn Directory>) -> Self {
        self.register(directory);
        self
    }

    pub fn get(&self, entity_type: &str) -> Option<Arc<dyn Directory>> {
        self.directories.get(entity_type).cloned()
    }

    /// Registered entity type names, sorted
    pub fn entity_types(&self) -> Vec<&'static str> {
        let mut types: Vec<&'static str> = self.directories.keys().copied().collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    /// Resolve a key against the directory registered for `entity_type`
    pub async fn resolve(
        &self,
        resolver: &Resolver,
        entity_type: &str,
        key: &LookupKey,
        cancel: &CancellationToken,
    ) -> ResolveResult<Entry> {
        let directory = self
            .get(entity_type)
            .ok_or_else(|| ResolveError::UnknownEntity {
                entity: entity_type.to_string(),
            })?;
        resolver.resolve(directory.as_ref(), key, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::directory::DirectoryResult;

    struct FixedDirectory {
        entity: &'static str,
        id: &'static str,
    }

    #[async_trait]
    impl Directory for FixedDirectory {
        fn entity_type(&self) -> &'static str {
            self.entity
        }

        async fn find(&self, key: &LookupKey) -> DirectoryResult<Vec<Entry>> {
            Ok(vec![Entry::new(self.id, key.as_str())])
        }
    }

    fn sample_registry() -> DirectoryRegistry {
        DirectoryRegistry::new()
            .with_directory(Arc::new(FixedDirectory {
                entity: "routing_skill",
                id: "skill-1",
            }))
            .with_directory(Arc::new(FixedDirectory {
                entity: "flow",
                id: "flow-1",
            }))
    }

    #[test]
    fn entity_types_are_sorted() {
        let registry = sample_registry();
        assert_eq!(registry.entity_types(), vec!["flow", "routing_skill"]);
    }

    #[tokio::test]
    async fn resolves_through_the_registered_directory() {
        let registry = sample_registry();
        let resolver = Resolver::default();

        let entry = registry
            .resolve(
                &resolver,
                "routing_skill",
                &"Support".into(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(entry.id, "skill-1");
    }

    #[tokio::test]
    async fn unknown_entity_type_is_an_error() {
        let registry = sample_registry();
        let resolver = Resolver::default();

        let err = registry
            .resolve(
                &resolver,
                "queue",
                &"Support".into(),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnknownEntity { entity } if entity == "queue"));
    }
}

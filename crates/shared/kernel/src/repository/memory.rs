use super::{Repository, RepositoryResult};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::fmt;
use tracing::debug;

/// In-process [`Repository`] backed by a map. Useful for tests and local tooling.
pub struct MemoryRepository<E> {
    entries: RwLock<FxHashMap<String, E>>,
}

impl<E> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self { entries: RwLock::new(FxHashMap::default()) }
    }
}

impl<E> fmt::Debug for MemoryRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRepository").field("entries", &self.entries.read().len()).finish()
    }
}

impl<E> MemoryRepository<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }
}

impl<E> Repository<E> for MemoryRepository<E>
where
    E: Clone + Send + Sync,
{
    async fn create(&self, identifier: &str, entity: E) -> RepositoryResult<E> {
        let mut entries = self.entries.write();
        if entries.contains_key(identifier) {
            debug!(identifier, "create rejected, entity exists");
            return RepositoryResult::failed(format!("'{identifier}' already exists"));
        }
        entries.insert(identifier.to_owned(), entity.clone());
        RepositoryResult::ok(Some(entity))
    }

    async fn retrieve(&self, identifier: &str) -> RepositoryResult<E> {
        self.entries.read().get(identifier).cloned().map_or_else(
            || RepositoryResult::failed(format!("'{identifier}' not found")),
            |entity| RepositoryResult::ok(Some(entity)),
        )
    }

    async fn replace(&self, identifier: &str, entity: E) -> RepositoryResult<E> {
        let mut entries = self.entries.write();
        let Some(slot) = entries.get_mut(identifier) else {
            return RepositoryResult::failed(format!("'{identifier}' not found"));
        };
        *slot = entity.clone();
        RepositoryResult::ok(Some(entity))
    }

    async fn delete(&self, identifier: &str) -> RepositoryResult<E> {
        self.entries.write().remove(identifier).map_or_else(
            || RepositoryResult::failed(format!("'{identifier}' not found")),
            |_| RepositoryResult::ok(None),
        )
    }
}

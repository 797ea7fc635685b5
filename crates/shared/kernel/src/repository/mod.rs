//! Repository client seam used by remote sync adapters.
//!
//! The tree, lifecycle and serializer never call into this module. Adapters
//! receive a [`Repository`] and perform one round trip per call; cancelling a
//! call means dropping its future.

mod memory;

pub use memory::MemoryRepository;

use std::future::Future;

/// Outcome of a repository call. Failures are reported, not raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryResult<E> {
    pub success: bool,
    pub entity: Option<E>,
    pub messages: Option<String>,
}

impl<E> RepositoryResult<E> {
    #[must_use]
    pub const fn ok(entity: Option<E>) -> Self {
        Self { success: true, entity, messages: None }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, entity: None, messages: Some(message.into()) }
    }
}

/// CRUD access to entities keyed by an absolute string identifier.
pub trait Repository<E>: Send + Sync {
    fn create(
        &self,
        identifier: &str,
        entity: E,
    ) -> impl Future<Output = RepositoryResult<E>> + Send;

    fn retrieve(&self, identifier: &str) -> impl Future<Output = RepositoryResult<E>> + Send;

    fn replace(
        &self,
        identifier: &str,
        entity: E,
    ) -> impl Future<Output = RepositoryResult<E>> + Send;

    fn delete(&self, identifier: &str) -> impl Future<Output = RepositoryResult<E>> + Send;
}

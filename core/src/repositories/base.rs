//! Generic repository contract shared by all entity stores

use async_trait::async_trait;
use uuid::Uuid;

use signet_shared::types::{Page, Pagination};

use crate::errors::{DomainError, DomainResult};

/// A persistable domain entity with a stable identity
pub trait Entity: Send + Sync + Clone {
    /// The entity's unique id
    fn id(&self) -> Uuid;

    /// Resource name used in not-found errors, e.g. "account"
    fn resource_name() -> &'static str;
}

/// Operations every entity repository supports.
///
/// All methods return [`DomainResult`] so storage failures surface as
/// domain errors; implementations map connectivity problems to
/// [`DomainError::Unavailable`] and constraint violations to
/// [`DomainError::Conflict`].
#[async_trait]
pub trait Repository<E: Entity + 'static>: Send + Sync {
    /// Look up one entity, `None` when absent
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<E>>;

    /// Fetch entities for a set of ids. Missing ids are skipped; the
    /// result carries no particular order.
    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<E>>;

    /// One page of entities plus the total count
    async fn list(&self, pagination: &Pagination) -> DomainResult<Page<E>>;

    /// Total number of stored entities
    async fn count(&self) -> DomainResult<u64>;

    /// Persist a new entity. Fails with [`DomainError::Conflict`] when a
    /// uniqueness constraint is violated.
    async fn create(&self, entity: &E) -> DomainResult<E>;

    /// Persist a batch atomically: either every entity is stored or none
    /// is.
    async fn create_many(&self, entities: &[E]) -> DomainResult<Vec<E>>;

    /// Update an existing entity, failing with [`DomainError::NotFound`]
    /// when it does not exist.
    async fn update(&self, entity: &E) -> DomainResult<E>;

    /// Delete by id, returning whether anything was deleted
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    /// Like [`find_by_id`](Repository::find_by_id) but absent entities
    /// are an error.
    async fn get_by_id(&self, id: Uuid) -> DomainResult<E> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(E::resource_name()))
    }

    /// Whether an entity with this id exists. Implementations backed by
    /// a database should override this with an existence query.
    async fn exists(&self, id: Uuid) -> DomainResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

//! Store Module
//!
//! The backing-store contract the entity cache reads through, plus an
//! in-memory implementation.

mod memory;

use std::sync::Arc;

use crate::error::StoreResult;

pub use memory::{MemoryStore, StoreCalls};

/// CRUD and paginated search against the authoritative record store.
///
/// An empty `term` matches every record. Result order is the store's own.
pub trait Store<T>: Send + Sync {
    /// Gets a record by its id.
    fn find_by_id(&self, id: i64) -> StoreResult<Option<T>>;

    /// Gets one page of records matching `term`.
    fn search(&self, term: &str, limit: usize, offset: usize) -> StoreResult<Vec<T>>;

    /// Counts all records matching `term`.
    fn count(&self, term: &str) -> StoreResult<u64>;

    /// Creates a record and returns its generated id.
    fn insert(&self, entity: &T) -> StoreResult<i64>;

    /// Replaces an existing record.
    fn update(&self, entity: &T) -> StoreResult<()>;

    /// Deletes a record by its id.
    fn delete(&self, id: i64) -> StoreResult<()>;
}

impl<T, S> Store<T> for Arc<S>
where
    S: Store<T> + ?Sized,
{
    fn find_by_id(&self, id: i64) -> StoreResult<Option<T>> {
        (**self).find_by_id(id)
    }

    fn search(&self, term: &str, limit: usize, offset: usize) -> StoreResult<Vec<T>> {
        (**self).search(term, limit, offset)
    }

    fn count(&self, term: &str) -> StoreResult<u64> {
        (**self).count(term)
    }

    fn insert(&self, entity: &T) -> StoreResult<i64> {
        (**self).insert(entity)
    }

    fn update(&self, entity: &T) -> StoreResult<()> {
        (**self).update(entity)
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        (**self).delete(id)
    }
}

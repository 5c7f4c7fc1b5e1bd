//! In-memory record store.
//!
//! Records are kept in id order; search returns them in that order. Call
//! counters and one-shot failure injection make cache behaviour observable.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::{debug, warn};

use super::Store;
use crate::domain::Entity;
use crate::error::{StoreError, StoreResult};

// == Store Calls ==
/// Number of calls received per store operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreCalls {
    pub find_by_id: u64,
    pub search: u64,
    pub count: u64,
    pub insert: u64,
    pub update: u64,
    pub delete: u64,
}

#[derive(Debug, Default)]
struct CallCounters {
    find_by_id: AtomicU64,
    search: AtomicU64,
    count: AtomicU64,
    insert: AtomicU64,
    update: AtomicU64,
    delete: AtomicU64,
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

// == Memory Store ==
#[derive(Debug)]
pub struct MemoryStore<T> {
    records: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
    calls: CallCounters,
    pending_failure: Mutex<Option<StoreError>>,
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            calls: CallCounters::default(),
            pending_failure: Mutex::new(None),
        }
    }

    /// Builds a store pre-loaded with `records`, assigning fresh ids.
    pub fn with_records(records: impl IntoIterator<Item = T>) -> StoreResult<Self> {
        let store = Self::new();
        for record in records {
            store.put(record)?;
        }
        Ok(store)
    }

    /// Snapshot of per-operation call counts.
    pub fn calls(&self) -> StoreCalls {
        StoreCalls {
            find_by_id: self.calls.find_by_id.load(Ordering::Relaxed),
            search: self.calls.search.load(Ordering::Relaxed),
            count: self.calls.count.load(Ordering::Relaxed),
            insert: self.calls.insert.load(Ordering::Relaxed),
            update: self.calls.update.load(Ordering::Relaxed),
            delete: self.calls.delete.load(Ordering::Relaxed),
        }
    }

    /// Makes the next store call fail with `error`.
    pub fn fail_next(&self, error: StoreError) {
        match self.pending_failure.lock() {
            Ok(mut slot) => *slot = Some(error),
            Err(poisoned) => *poisoned.into_inner() = Some(error),
        }
    }

    /// Number of records held.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn take_failure(&self) -> StoreResult<()> {
        let pending = match self.pending_failure.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match pending {
            Some(error) => {
                debug!(entity = T::KIND, %error, "Injected store failure");
                Err(error)
            }
            None => Ok(()),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<i64, T>>> {
        self.records.read().map_err(|_| {
            warn!(entity = T::KIND, "Memory store lock poisoned");
            StoreError::Connection(format!("{} store lock poisoned", T::KIND))
        })
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<i64, T>>> {
        self.records.write().map_err(|_| {
            warn!(entity = T::KIND, "Memory store lock poisoned");
            StoreError::Connection(format!("{} store lock poisoned", T::KIND))
        })
    }

    fn put(&self, entity: T) -> StoreResult<i64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut record = entity;
        record.set_id(id);
        self.write()?.insert(id, record);
        Ok(id)
    }

    fn matching<'a>(
        records: &'a BTreeMap<i64, T>,
        term: &'a str,
    ) -> impl Iterator<Item = &'a T> + 'a {
        records
            .values()
            .filter(move |record| term.is_empty() || record.matches(term))
    }
}

impl<T: Entity> Store<T> for MemoryStore<T> {
    fn find_by_id(&self, id: i64) -> StoreResult<Option<T>> {
        bump(&self.calls.find_by_id);
        self.take_failure()?;
        Ok(self.read()?.get(&id).cloned())
    }

    fn search(&self, term: &str, limit: usize, offset: usize) -> StoreResult<Vec<T>> {
        bump(&self.calls.search);
        self.take_failure()?;
        let term = term.trim().to_lowercase();
        let records = self.read()?;
        Ok(Self::matching(&records, &term)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn count(&self, term: &str) -> StoreResult<u64> {
        bump(&self.calls.count);
        self.take_failure()?;
        let term = term.trim().to_lowercase();
        let records = self.read()?;
        Ok(Self::matching(&records, &term).count() as u64)
    }

    fn insert(&self, entity: &T) -> StoreResult<i64> {
        bump(&self.calls.insert);
        self.take_failure()?;
        self.put(entity.clone())
    }

    fn update(&self, entity: &T) -> StoreResult<()> {
        bump(&self.calls.update);
        self.take_failure()?;
        let mut records = self.write()?;
        match records.get_mut(&entity.id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: T::KIND,
                id: entity.id(),
            }),
        }
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        bump(&self.calls.delete);
        self.take_failure()?;
        match self.write()?.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound {
                entity: T::KIND,
                id,
            }),
        }
    }
}

//! Clinic Cache - read-through caching for clinic records
//!
//! Per-entity LRU by-id caches, TTL-bounded search memoization and
//! write-through invalidation in front of a record store, served over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use cache::EntityCache;
pub use config::{CacheConfig, Config};
pub use error::{AppError, StoreError};
pub use tasks::spawn_sweep_task;

//! Response DTOs for the entity API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for `GET /{entity}`
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
    /// The requested page
    pub items: Vec<T>,
    /// Total matches across all pages
    pub total: u64,
    pub limit: usize,
    pub offset: usize,
}

/// Response body for `GET /{entity}/count`
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub total: u64,
}

/// Response body for `POST`, `PUT` and `DELETE` on an entity
#[derive(Debug, Clone, Serialize)]
pub struct MutationResponse {
    /// Success message
    pub message: String,
    /// The id of the record written
    pub id: i64,
}

impl MutationResponse {
    pub fn created(kind: &str, id: i64) -> Self {
        Self {
            message: format!("{} {} created successfully", kind, id),
            id,
        }
    }

    pub fn updated(kind: &str, id: i64) -> Self {
        Self {
            message: format!("{} {} updated successfully", kind, id),
            id,
        }
    }

    pub fn deleted(kind: &str, id: i64) -> Self {
        Self {
            message: format!("{} {} deleted successfully", kind, id),
            id,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// One snapshot per entity cache
    pub caches: Vec<CacheStats>,
    /// By-id hit rate across all caches
    pub id_hit_rate: f64,
    /// Search hit rate across all caches
    pub search_hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache snapshots
    pub fn new(caches: Vec<CacheStats>) -> Self {
        let rate = |hits: u64, misses: u64| {
            let total = hits + misses;
            if total > 0 {
                hits as f64 / total as f64
            } else {
                0.0
            }
        };
        let (id_hits, id_misses) = caches
            .iter()
            .fold((0, 0), |(h, m), c| (h + c.by_id.hits, m + c.by_id.misses));
        let (search_hits, search_misses) = caches
            .iter()
            .fold((0, 0), |(h, m), c| (h + c.search.hits, m + c.search.misses));

        Self {
            id_hit_rate: rate(id_hits, id_misses),
            search_hit_rate: rate(search_hits, search_misses),
            caches,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

//! API Handlers
//!
//! HTTP request handlers shared by every entity resource, plus the service
//! level stats and health endpoints.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::cache::{CacheStats, Clock, EntityCache, SystemClock};
use crate::config::CacheConfig;
use crate::domain::{
    Appointment, Doctor, Entity, MedicalInventory, Patient, PatientFeedback, Prescription,
};
use crate::error::{AppError, Result};
use crate::models::{
    CountParams, CountResponse, HealthResponse, MutationResponse, PageResponse, SearchParams,
    StatsResponse,
};
use crate::store::{MemoryStore, Store};

/// One entity cache behind a lock, shared by every request for that entity.
pub type SharedCache<T, S = MemoryStore<T>> = Arc<RwLock<EntityCache<T, S>>>;

/// Wraps a cache for sharing between handlers.
pub fn shared<T: Entity, S: Store<T>>(cache: EntityCache<T, S>) -> SharedCache<T, S> {
    Arc::new(RwLock::new(cache))
}

/// Application state shared across all handlers.
///
/// One independent cache per entity type; a mutation on one entity never
/// touches another entity's cache.
#[derive(Clone)]
pub struct AppState {
    pub patients: SharedCache<Patient>,
    pub doctors: SharedCache<Doctor>,
    pub appointments: SharedCache<Appointment>,
    pub prescriptions: SharedCache<Prescription>,
    pub inventory: SharedCache<MedicalInventory>,
    pub feedback: SharedCache<PatientFeedback>,
}

impl AppState {
    /// Creates empty in-memory stores, each fronted by a cache sized from
    /// `config`.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Same as [`AppState::from_config`] with an explicit time source.
    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        fn build<T: Entity>(config: &CacheConfig, clock: &Arc<dyn Clock>) -> SharedCache<T> {
            shared(EntityCache::with_config(
                MemoryStore::new(),
                *config,
                Arc::clone(clock),
            ))
        }

        Self {
            patients: build(config, &clock),
            doctors: build(config, &clock),
            appointments: build(config, &clock),
            prescriptions: build(config, &clock),
            inventory: build(config, &clock),
            feedback: build(config, &clock),
        }
    }

    /// Snapshot of every entity cache.
    pub async fn stats(&self) -> Vec<CacheStats> {
        vec![
            self.patients.read().await.stats(),
            self.doctors.read().await.stats(),
            self.appointments.read().await.stats(),
            self.prescriptions.read().await.stats(),
            self.inventory.read().await.stats(),
            self.feedback.read().await.stats(),
        ]
    }

    /// Drops expired search entries from every cache.
    ///
    /// Returns the total number removed. Each lock is held only for its own
    /// cache.
    pub async fn purge_expired(&self) -> usize {
        let mut removed = 0;
        removed += self.patients.write().await.purge_expired();
        removed += self.doctors.write().await.purge_expired();
        removed += self.appointments.write().await.purge_expired();
        removed += self.prescriptions.write().await.purge_expired();
        removed += self.inventory.write().await.purge_expired();
        removed += self.feedback.write().await.purge_expired();
        removed
    }
}

/// Handler for GET /{entity}/:id
///
/// Reads through the by-id cache.
pub async fn find_handler<T, S>(
    State(cache): State<SharedCache<T, S>>,
    Path(id): Path<i64>,
) -> Result<Json<T>>
where
    T: Entity + Serialize,
    S: Store<T> + 'static,
{
    // Write lock: a hit still moves the entry to the front of the LRU
    let mut guard = cache.write().await;
    match guard.find_by_id(id)? {
        Some(entity) => Ok(Json(entity)),
        None => Err(AppError::NotFound(format!("{} {}", T::KIND, id))),
    }
}

/// Handler for GET /{entity}?q=&limit=&offset=&sort=
///
/// Returns one page of matches plus the total match count.
pub async fn search_handler<T, S>(
    State(cache): State<SharedCache<T, S>>,
    Query(params): Query<SearchParams<T::Sort>>,
) -> Result<Json<PageResponse<T>>>
where
    T: Entity + Serialize,
    T::Sort: DeserializeOwned,
    S: Store<T> + 'static,
{
    if let Some(error_msg) = params.validate() {
        return Err(AppError::Validation(error_msg));
    }
    let limit = params.limit();
    let offset = params.offset();

    let mut guard = cache.write().await;
    let items = guard.search(params.q.as_deref(), limit, offset, params.sort)?;
    let total = guard.count(params.q.as_deref(), params.sort)?;

    Ok(Json(PageResponse {
        items,
        total,
        limit,
        offset,
    }))
}

/// Handler for GET /{entity}/count?q=&sort=
pub async fn count_handler<T, S>(
    State(cache): State<SharedCache<T, S>>,
    Query(params): Query<CountParams<T::Sort>>,
) -> Result<Json<CountResponse>>
where
    T: Entity,
    T::Sort: DeserializeOwned,
    S: Store<T> + 'static,
{
    let guard = cache.read().await;
    let total = guard.count(params.q.as_deref(), params.sort)?;

    Ok(Json(CountResponse { total }))
}

/// Handler for POST /{entity}
///
/// Any id in the body is ignored; the store assigns one.
pub async fn create_handler<T, S>(
    State(cache): State<SharedCache<T, S>>,
    Json(mut entity): Json<T>,
) -> Result<Json<MutationResponse>>
where
    T: Entity + DeserializeOwned,
    S: Store<T> + 'static,
{
    if let Some(error_msg) = entity.validate() {
        return Err(AppError::Validation(error_msg));
    }
    entity.set_id(0);

    let mut guard = cache.write().await;
    let id = guard.insert(entity)?;

    Ok(Json(MutationResponse::created(T::KIND, id)))
}

/// Handler for PUT /{entity}/:id
///
/// The path id wins over any id in the body.
pub async fn update_handler<T, S>(
    State(cache): State<SharedCache<T, S>>,
    Path(id): Path<i64>,
    Json(mut entity): Json<T>,
) -> Result<Json<MutationResponse>>
where
    T: Entity + DeserializeOwned,
    S: Store<T> + 'static,
{
    entity.set_id(id);
    if let Some(error_msg) = entity.validate() {
        return Err(AppError::Validation(error_msg));
    }

    let mut guard = cache.write().await;
    guard.update(&entity)?;

    Ok(Json(MutationResponse::updated(T::KIND, id)))
}

/// Handler for DELETE /{entity}/:id
pub async fn delete_handler<T, S>(
    State(cache): State<SharedCache<T, S>>,
    Path(id): Path<i64>,
) -> Result<Json<MutationResponse>>
where
    T: Entity,
    S: Store<T> + 'static,
{
    let mut guard = cache.write().await;
    guard.delete(id)?;

    Ok(Json(MutationResponse::deleted(T::KIND, id)))
}

/// Handler for GET /stats
///
/// Returns a snapshot of every entity cache.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.stats().await))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn test_state() -> AppState {
        AppState::from_config(&CacheConfig::default())
    }

    fn search_params<S>(q: Option<&str>, sort: Option<S>) -> SearchParams<S> {
        SearchParams {
            q: q.map(str::to_string),
            limit: None,
            offset: None,
            sort,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_handler() {
        let state = test_state();

        let created = create_handler(
            State(state.patients.clone()),
            Json(Patient::new("Ada", "Lovelace")),
        )
        .await
        .unwrap();
        assert_eq!(created.id, 1);

        let found = find_handler(State(state.patients.clone()), Path(created.id))
            .await
            .unwrap();
        assert_eq!(found.first_name, "Ada");
        assert_eq!(found.id, 1);
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found() {
        let state = test_state();

        let result = find_handler(State(state.doctors.clone()), Path(99)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_entity() {
        let state = test_state();

        let result = create_handler(State(state.patients.clone()), Json(Patient::new("", "X"))).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(state.patients.read().await.store().calls().insert, 0);
    }

    #[tokio::test]
    async fn test_search_handler_page_and_total() {
        let state = test_state();
        for last in ["Smith", "Smythe", "Smithers", "Jones"] {
            create_handler(State(state.patients.clone()), Json(Patient::new("A", last)))
                .await
                .unwrap();
        }

        let mut params = search_params(Some("smith"), None);
        params.limit = Some(1);
        let page = search_handler(State(state.patients.clone()), Query(params))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 2);
        assert_eq!(page.limit, 1);
    }

    #[tokio::test]
    async fn test_search_handler_rejects_oversized_limit() {
        let state = test_state();

        let mut params = search_params(None, None);
        params.limit = Some(10_000);
        let result = search_handler(State(state.patients.clone()), Query(params)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_uses_path_id() {
        let state = test_state();
        create_handler(State(state.patients.clone()), Json(Patient::new("Ada", "Lovelace")))
            .await
            .unwrap();

        let mut body = Patient::new("Ada", "King");
        body.id = 77;
        update_handler(State(state.patients.clone()), Path(1), Json(body))
            .await
            .unwrap();

        let found = find_handler(State(state.patients.clone()), Path(1)).await.unwrap();
        assert_eq!(found.last_name, "King");
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();
        create_handler(State(state.patients.clone()), Json(Patient::new("Ada", "Lovelace")))
            .await
            .unwrap();

        delete_handler(State(state.patients.clone()), Path(1))
            .await
            .unwrap();

        let result = find_handler(State(state.patients.clone()), Path(1)).await;
        assert!(result.is_err());

        let again = delete_handler(State(state.patients.clone()), Path(1)).await;
        assert!(matches!(
            again,
            Err(AppError::Store(StoreError::NotFound { id: 1, .. }))
        ));
    }

    #[tokio::test]
    async fn test_store_error_passes_through() {
        let state = test_state();
        state
            .patients
            .read()
            .await
            .store()
            .fail_next(StoreError::Timeout("slow disk".to_string()));

        let result = find_handler(State(state.patients.clone()), Path(1)).await;
        assert!(matches!(
            result,
            Err(AppError::Store(StoreError::Timeout(ref msg))) if msg == "slow disk"
        ));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();
        let _ = find_handler(State(state.patients.clone()), Path(1)).await;

        let response = stats_handler(State(state)).await;
        assert_eq!(response.caches.len(), 6);
        assert_eq!(response.caches[0].entity, "Patient");
        assert_eq!(response.caches[0].by_id.misses, 1);
        assert_eq!(response.caches[0].by_id.capacity, 100);
    }

    #[tokio::test]
    async fn test_purge_expired_across_caches() {
        let clock = crate::cache::ManualClock::new(0);
        let state = AppState::with_clock(&CacheConfig::default(), Arc::new(clock.clone()));

        search_handler(State(state.patients.clone()), Query(search_params(None, None)))
            .await
            .unwrap();
        search_handler(State(state.doctors.clone()), Query(search_params(None, None)))
            .await
            .unwrap();
        assert_eq!(state.purge_expired().await, 0);

        clock.advance(std::time::Duration::from_secs(61));
        assert_eq!(state.purge_expired().await, 2);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}

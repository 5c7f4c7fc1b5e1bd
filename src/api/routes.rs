//! API Routes
//!
//! Configures the Axum router: one nested resource per entity type plus the
//! stats and health endpoints.

use axum::{routing::get, Router};
use serde::{de::DeserializeOwned, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    count_handler, create_handler, delete_handler, find_handler, health_handler, search_handler,
    stats_handler, update_handler, AppState, SharedCache,
};
use crate::domain::Entity;
use crate::store::Store;

/// Routes for one entity resource, bound to its own cache.
///
/// # Endpoints
/// - `GET /` - Paged search (`q`, `limit`, `offset`, `sort`)
/// - `POST /` - Create
/// - `GET /count` - Match count (`q`, `sort`)
/// - `GET /:id` - Find by id
/// - `PUT /:id` - Update
/// - `DELETE /:id` - Delete
pub fn entity_routes<T, S, R>(cache: SharedCache<T, S>) -> Router<R>
where
    T: Entity + Serialize + DeserializeOwned,
    T::Sort: DeserializeOwned,
    S: Store<T> + 'static,
    R: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(search_handler::<T, S>).post(create_handler::<T, S>),
        )
        .route("/count", get(count_handler::<T, S>))
        .route(
            "/:id",
            get(find_handler::<T, S>)
                .put(update_handler::<T, S>)
                .delete(delete_handler::<T, S>),
        )
        .with_state(cache)
}

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `/patients`, `/doctors`, `/appointments`, `/prescriptions`,
///   `/inventory`, `/feedback` - Entity resources, see [`entity_routes`]
/// - `GET /stats` - Per-entity cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/patients", entity_routes(state.patients.clone()))
        .nest("/doctors", entity_routes(state.doctors.clone()))
        .nest("/appointments", entity_routes(state.appointments.clone()))
        .nest("/prescriptions", entity_routes(state.prescriptions.clone()))
        .nest("/inventory", entity_routes(state.inventory.clone()))
        .nest("/feedback", entity_routes(state.feedback.clone()))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

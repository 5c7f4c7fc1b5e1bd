//! API Module
//!
//! HTTP handlers and routing for the clinic records REST API.
//!
//! # Endpoints
//! - `GET /{entity}` - Paged, sorted search
//! - `GET /{entity}/count` - Match count
//! - `GET /{entity}/:id` - Find by id
//! - `POST /{entity}` - Create
//! - `PUT /{entity}/:id` - Update
//! - `DELETE /{entity}/:id` - Delete
//! - `GET /stats` - Per-entity cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, entity_routes};

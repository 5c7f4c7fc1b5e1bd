//! Request and Response models for the entity API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CountParams, SearchParams, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use responses::{CountResponse, HealthResponse, MutationResponse, PageResponse, StatsResponse};

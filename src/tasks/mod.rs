//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Search sweep: Drops expired search entries from every entity cache

mod sweep;

pub use sweep::spawn_sweep_task;

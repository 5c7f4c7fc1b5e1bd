//! Domain Module
//!
//! Clinic record types, their search predicates, sort tables and field
//! validation.

mod appointment;
mod doctor;
mod feedback;
mod inventory;
mod ordering;
mod patient;
mod prescription;

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use chrono::NaiveDate;

pub use appointment::{Appointment, AppointmentSort, AppointmentStatus};
pub use doctor::{Doctor, DoctorSort};
pub use feedback::{FeedbackSort, PatientFeedback};
pub use inventory::{InventorySort, MedicalInventory};
pub use ordering::{by_key, text_key, DateWindow, Direction};
pub use patient::{Patient, PatientSort};
pub use prescription::{Prescription, PrescriptionSort};

// == Entity ==
/// A record with an integer identity that the entity cache can hold.
///
/// An id of `0` means "not yet assigned by the store".
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Human-readable kind, used in errors, logs and stats
    const KIND: &'static str;

    /// Orderings (and filter-orderings) this entity supports
    type Sort: SortOption<Self>;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    /// Whether any searchable field contains `term`.
    ///
    /// `term` is non-empty and already lowercased.
    fn matches(&self, term: &str) -> bool;

    /// Date consulted by date-window filter sorts.
    fn window_date(&self) -> Option<NaiveDate> {
        None
    }

    /// Field validation. Returns an error message if invalid, None if valid.
    fn validate(&self) -> Option<String>;
}

// == Sort Option ==
/// One entry of an entity's sort table.
///
/// Every comparator is a total order: nulls last when ascending, nulls first
/// when descending, ties broken by id.
pub trait SortOption<T>: Copy + Debug + Eq + Hash + Send + Sync + 'static {
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Date-window predicate for filter sorts, `None` for plain sorts.
    fn window(&self) -> Option<DateWindow> {
        None
    }
}

// == Validation Helpers ==
pub(crate) fn require(field: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{} cannot be empty", field))
    } else {
        None
    }
}

pub(crate) fn require_id(field: &str, value: i64) -> Option<String> {
    if value <= 0 {
        Some(format!("{} must be a positive id", field))
    } else {
        None
    }
}

pub(crate) fn check_email(value: Option<&str>) -> Option<String> {
    match value {
        Some(email) if !email.is_empty() && !email.contains('@') => {
            Some(format!("Invalid email address: {}", email))
        }
        _ => None,
    }
}

/// Case-insensitive substring match on an optional field.
pub(crate) fn field_contains(field: Option<&str>, term: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(term))
}

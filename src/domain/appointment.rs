//! Appointment records.
//!
//! Besides plain date sorts, appointments support filter sorts (`TODAY`,
//! `NEXT_7`, `NEXT_30`) that keep only appointments falling in a window
//! relative to the current date and order them by date ascending.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::ordering::{by_key, DateWindow, Direction};
use super::{field_contains, require_id, Entity, SortOption};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(default)]
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub scheduled_at: Option<NaiveDateTime>,
    pub reason: Option<String>,
    #[serde(default)]
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn new(patient_id: i64, doctor_id: i64, scheduled_at: Option<NaiveDateTime>) -> Self {
        Self {
            id: 0,
            patient_id,
            doctor_id,
            scheduled_at,
            reason: None,
            status: AppointmentStatus::Scheduled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentSort {
    DateAsc,
    DateDesc,
    Today,
    #[serde(rename = "NEXT_7")]
    Next7,
    #[serde(rename = "NEXT_30")]
    Next30,
}

impl SortOption<Appointment> for AppointmentSort {
    fn compare(&self, a: &Appointment, b: &Appointment) -> Ordering {
        let direction = match self {
            AppointmentSort::DateDesc => Direction::Desc,
            _ => Direction::Asc,
        };
        by_key((a.scheduled_at, a.id), (b.scheduled_at, b.id), direction)
    }

    fn window(&self) -> Option<DateWindow> {
        match self {
            AppointmentSort::Today => Some(DateWindow::Today),
            AppointmentSort::Next7 => Some(DateWindow::NextDays(7)),
            AppointmentSort::Next30 => Some(DateWindow::NextDays(30)),
            AppointmentSort::DateAsc | AppointmentSort::DateDesc => None,
        }
    }
}

impl Entity for Appointment {
    const KIND: &'static str = "Appointment";
    type Sort = AppointmentSort;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn matches(&self, term: &str) -> bool {
        field_contains(self.reason.as_deref(), term) || self.status.as_str().contains(term)
    }

    fn window_date(&self) -> Option<NaiveDate> {
        self.scheduled_at.map(|at| at.date())
    }

    fn validate(&self) -> Option<String> {
        require_id("patient_id", self.patient_id).or_else(|| require_id("doctor_id", self.doctor_id))
    }
}

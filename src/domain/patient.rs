//! Patient records.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ordering::{by_key, text_key, Direction};
use super::{check_email, field_contains, require, Entity, SortOption};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(default)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl Patient {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth: None,
            gender: None,
            phone: None,
            email: None,
            address: None,
        }
    }

    /// "last first", lowercased; the key name sorts use.
    fn name_key(&self) -> Option<String> {
        text_key(&format!("{} {}", self.last_name, self.first_name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatientSort {
    NameAsc,
    NameDesc,
    DobAsc,
    DobDesc,
}

impl SortOption<Patient> for PatientSort {
    fn compare(&self, a: &Patient, b: &Patient) -> Ordering {
        match self {
            PatientSort::NameAsc => {
                by_key((a.name_key(), a.id), (b.name_key(), b.id), Direction::Asc)
            }
            PatientSort::NameDesc => {
                by_key((a.name_key(), a.id), (b.name_key(), b.id), Direction::Desc)
            }
            PatientSort::DobAsc => by_key(
                (a.date_of_birth, a.id),
                (b.date_of_birth, b.id),
                Direction::Asc,
            ),
            PatientSort::DobDesc => by_key(
                (a.date_of_birth, a.id),
                (b.date_of_birth, b.id),
                Direction::Desc,
            ),
        }
    }
}

impl Entity for Patient {
    const KIND: &'static str = "Patient";
    type Sort = PatientSort;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn matches(&self, term: &str) -> bool {
        field_contains(Some(&self.first_name), term)
            || field_contains(Some(&self.last_name), term)
            || field_contains(self.phone.as_deref(), term)
            || field_contains(self.email.as_deref(), term)
    }

    fn validate(&self) -> Option<String> {
        require("First name", &self.first_name)
            .or_else(|| require("Last name", &self.last_name))
            .or_else(|| check_email(self.email.as_deref()))
    }
}

//! Prescription records.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ordering::{by_key, text_key, Direction};
use super::{field_contains, require, require_id, Entity, SortOption};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    #[serde(default)]
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub medication: String,
    pub dosage: String,
    pub instructions: Option<String>,
    pub issued_on: Option<NaiveDate>,
    pub refills: Option<u32>,
}

impl Prescription {
    pub fn new(
        patient_id: i64,
        doctor_id: i64,
        medication: impl Into<String>,
        dosage: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            patient_id,
            doctor_id,
            medication: medication.into(),
            dosage: dosage.into(),
            instructions: None,
            issued_on: None,
            refills: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrescriptionSort {
    DateAsc,
    DateDesc,
    MedicationAsc,
    MedicationDesc,
}

impl SortOption<Prescription> for PrescriptionSort {
    fn compare(&self, a: &Prescription, b: &Prescription) -> Ordering {
        let issued = |p: &Prescription| (p.issued_on, p.id);
        let medication = |p: &Prescription| (text_key(&p.medication), p.id);

        match self {
            PrescriptionSort::DateAsc => by_key(issued(a), issued(b), Direction::Asc),
            PrescriptionSort::DateDesc => by_key(issued(a), issued(b), Direction::Desc),
            PrescriptionSort::MedicationAsc => by_key(medication(a), medication(b), Direction::Asc),
            PrescriptionSort::MedicationDesc => {
                by_key(medication(a), medication(b), Direction::Desc)
            }
        }
    }
}

impl Entity for Prescription {
    const KIND: &'static str = "Prescription";
    type Sort = PrescriptionSort;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn matches(&self, term: &str) -> bool {
        field_contains(Some(&self.medication), term)
            || field_contains(Some(&self.dosage), term)
            || field_contains(self.instructions.as_deref(), term)
    }

    fn validate(&self) -> Option<String> {
        require_id("patient_id", self.patient_id)
            .or_else(|| require_id("doctor_id", self.doctor_id))
            .or_else(|| require("Medication", &self.medication))
            .or_else(|| require("Dosage", &self.dosage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medication_sort_is_case_insensitive() {
        let mut rows = vec![
            Prescription {
                id: 1,
                ..Prescription::new(1, 1, "ibuprofen", "200mg")
            },
            Prescription {
                id: 2,
                ..Prescription::new(1, 1, "Amoxicillin", "500mg")
            },
        ];
        rows.sort_by(|a, b| PrescriptionSort::MedicationAsc.compare(a, b));
        assert_eq!(rows[0].id, 2);
    }

    #[test]
    fn test_validate() {
        assert!(Prescription::new(1, 1, "Amoxicillin", "500mg")
            .validate()
            .is_none());
        assert!(Prescription::new(1, 1, "Amoxicillin", "").validate().is_some());
    }
}

//! Doctor records.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::ordering::{by_key, text_key, Direction};
use super::{check_email, field_contains, require, Entity, SortOption};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(default)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub years_experience: Option<u32>,
}

impl Doctor {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        specialty: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            specialty: specialty.into(),
            phone: None,
            email: None,
            years_experience: None,
        }
    }

    fn name_key(&self) -> Option<String> {
        text_key(&format!("{} {}", self.last_name, self.first_name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoctorSort {
    NameAsc,
    NameDesc,
    SpecialtyAsc,
    SpecialtyDesc,
    ExperienceAsc,
    ExperienceDesc,
}

impl SortOption<Doctor> for DoctorSort {
    fn compare(&self, a: &Doctor, b: &Doctor) -> Ordering {
        let name = |d: &Doctor| (d.name_key(), d.id);
        let specialty = |d: &Doctor| (text_key(&d.specialty), d.id);
        let experience = |d: &Doctor| (d.years_experience, d.id);

        match self {
            DoctorSort::NameAsc => by_key(name(a), name(b), Direction::Asc),
            DoctorSort::NameDesc => by_key(name(a), name(b), Direction::Desc),
            DoctorSort::SpecialtyAsc => by_key(specialty(a), specialty(b), Direction::Asc),
            DoctorSort::SpecialtyDesc => by_key(specialty(a), specialty(b), Direction::Desc),
            DoctorSort::ExperienceAsc => by_key(experience(a), experience(b), Direction::Asc),
            DoctorSort::ExperienceDesc => by_key(experience(a), experience(b), Direction::Desc),
        }
    }
}

impl Entity for Doctor {
    const KIND: &'static str = "Doctor";
    type Sort = DoctorSort;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn matches(&self, term: &str) -> bool {
        field_contains(Some(&self.first_name), term)
            || field_contains(Some(&self.last_name), term)
            || field_contains(Some(&self.specialty), term)
            || field_contains(self.email.as_deref(), term)
    }

    fn validate(&self) -> Option<String> {
        require("First name", &self.first_name)
            .or_else(|| require("Last name", &self.last_name))
            .or_else(|| require("Specialty", &self.specialty))
            .or_else(|| check_email(self.email.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_sort_null_policy() {
        let mut rows: Vec<Doctor> = [(1, None), (2, Some(12)), (3, Some(3))]
            .into_iter()
            .map(|(id, years)| Doctor {
                id,
                years_experience: years,
                ..Doctor::new("A", "B", "Cardiology")
            })
            .collect();

        rows.sort_by(|a, b| DoctorSort::ExperienceAsc.compare(a, b));
        assert_eq!(rows.iter().map(|d| d.id).collect::<Vec<_>>(), vec![3, 2, 1]);

        rows.sort_by(|a, b| DoctorSort::ExperienceDesc.compare(a, b));
        assert_eq!(rows.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_specialty_search() {
        let doctor = Doctor::new("Gregory", "House", "Diagnostics");
        assert!(doctor.matches("diag"));
        assert!(!doctor.matches("oncology"));
    }

    #[test]
    fn test_validate_requires_specialty() {
        assert!(Doctor::new("Gregory", "House", " ").validate().is_some());
        assert!(Doctor::new("Gregory", "House", "Diagnostics")
            .validate()
            .is_none());
    }
}

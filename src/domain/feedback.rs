//! Patient feedback records.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ordering::{by_key, Direction};
use super::{field_contains, require_id, Entity, SortOption};

/// Lowest and highest accepted star rating.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientFeedback {
    #[serde(default)]
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: Option<i64>,
    pub rating: Option<u8>,
    pub comments: Option<String>,
    pub submitted_on: Option<NaiveDate>,
}

impl PatientFeedback {
    pub fn new(patient_id: i64, rating: Option<u8>) -> Self {
        Self {
            id: 0,
            patient_id,
            doctor_id: None,
            rating,
            comments: None,
            submitted_on: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackSort {
    DateAsc,
    DateDesc,
    RatingAsc,
    RatingDesc,
}

impl SortOption<PatientFeedback> for FeedbackSort {
    fn compare(&self, a: &PatientFeedback, b: &PatientFeedback) -> Ordering {
        let submitted = |f: &PatientFeedback| (f.submitted_on, f.id);
        let rating = |f: &PatientFeedback| (f.rating, f.id);

        match self {
            FeedbackSort::DateAsc => by_key(submitted(a), submitted(b), Direction::Asc),
            FeedbackSort::DateDesc => by_key(submitted(a), submitted(b), Direction::Desc),
            FeedbackSort::RatingAsc => by_key(rating(a), rating(b), Direction::Asc),
            FeedbackSort::RatingDesc => by_key(rating(a), rating(b), Direction::Desc),
        }
    }
}

impl Entity for PatientFeedback {
    const KIND: &'static str = "PatientFeedback";
    type Sort = FeedbackSort;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn matches(&self, term: &str) -> bool {
        field_contains(self.comments.as_deref(), term)
    }

    fn validate(&self) -> Option<String> {
        if let Some(problem) = require_id("patient_id", self.patient_id) {
            return Some(problem);
        }
        match self.rating {
            Some(r) if !RATING_RANGE.contains(&r) => Some(format!(
                "Rating must be between {} and {}",
                RATING_RANGE.start(),
                RATING_RANGE.end()
            )),
            _ => None,
        }
    }
}

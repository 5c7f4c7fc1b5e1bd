//! Shared null-handling policy for sort tables, and date windows for
//! filter sorts.

use std::cmp::Ordering;

use chrono::{Days, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

/// Compares two records by an optional key, tie-breaking on id.
///
/// Ascending puts `None` last; descending is the exact reverse, so `None`
/// comes first.
pub fn by_key<K: Ord>(a: (Option<K>, i64), b: (Option<K>, i64), direction: Direction) -> Ordering {
    let ascending = match (&a.0, &b.0) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then(a.1.cmp(&b.1));

    match direction {
        Direction::Asc => ascending,
        Direction::Desc => ascending.reverse(),
    }
}

/// Lowercased sort key for free text; blank text counts as null.
pub fn text_key(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

// == Date Window ==
/// Date predicate relative to "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateWindow {
    /// Exactly today
    Today,
    /// `today <= date < today + n days`
    NextDays(u64),
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateWindow::Today => date == today,
            DateWindow::NextDays(days) => match today.checked_add_days(Days::new(*days)) {
                Some(end) => date >= today && date < end,
                None => date >= today,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_ascending_nulls_last() {
        let mut rows = vec![(None, 1), (Some(3), 2), (Some(1), 3), (None, 4)];
        rows.sort_by(|a, b| by_key(*a, *b, Direction::Asc));
        assert_eq!(rows, vec![(Some(1), 3), (Some(3), 2), (None, 1), (None, 4)]);
    }

    #[test]
    fn test_descending_nulls_first() {
        let mut rows = vec![(Some(1), 1), (None, 2), (Some(3), 3)];
        rows.sort_by(|a, b| by_key(*a, *b, Direction::Desc));
        assert_eq!(rows, vec![(None, 2), (Some(3), 3), (Some(1), 1)]);
    }

    #[test]
    fn test_ties_break_on_id() {
        assert_eq!(
            by_key((Some(5), 1), (Some(5), 2), Direction::Asc),
            Ordering::Less
        );
        assert_eq!(
            by_key((Some(5), 1), (Some(5), 2), Direction::Desc),
            Ordering::Greater
        );
    }

    #[test]
    fn test_text_key() {
        assert_eq!(text_key("  Smith "), Some("smith".to_string()));
        assert_eq!(text_key("   "), None);
    }

    #[test]
    fn test_date_window_today() {
        let today = date(2024, 5, 10);
        assert!(DateWindow::Today.contains(today, today));
        assert!(!DateWindow::Today.contains(date(2024, 5, 11), today));
    }

    #[test]
    fn test_date_window_next_days() {
        let today = date(2024, 5, 10);
        let week = DateWindow::NextDays(7);
        assert!(week.contains(today, today));
        assert!(week.contains(date(2024, 5, 16), today));
        assert!(!week.contains(date(2024, 5, 17), today));
        assert!(!week.contains(date(2024, 5, 9), today));
    }
}

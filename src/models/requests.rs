//! Request DTOs for the entity API
//!
//! Query-string parameters for search and count endpoints. Entity bodies are
//! the domain types themselves.

use serde::Deserialize;

/// Page size used when the caller gives none
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: usize = 500;

/// Query for `GET /{entity}`
///
/// # Fields
/// - `q`: Search term, empty or missing matches everything
/// - `limit`: Page size
/// - `offset`: Rows to skip
/// - `sort`: Entity-specific sort name, e.g. `NAME_ASC` or `NEXT_7`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams<S> {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
    pub sort: Option<S>,
}

impl<S> SearchParams<S> {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match self.limit {
            Some(0) => Some("Limit must be at least 1".to_string()),
            Some(limit) if limit > MAX_PAGE_SIZE => Some(format!(
                "Limit exceeds maximum page size of {}",
                MAX_PAGE_SIZE
            )),
            _ => None,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }
}

/// Query for `GET /{entity}/count`
#[derive(Debug, Clone, Deserialize)]
pub struct CountParams<S> {
    #[serde(default)]
    pub q: Option<String>,
    pub sort: Option<S>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppointmentSort, PatientSort};
    use axum::extract::Query;

    #[test]
    fn test_search_params_defaults() {
        let params: SearchParams<PatientSort> = serde_json::from_str("{}").unwrap();
        assert!(params.q.is_none());
        assert_eq!(params.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
        assert!(params.validate().is_none());
    }

    #[test]
    fn test_search_params_with_sort() {
        let json = r#"{"q": "smith", "limit": 5, "offset": 10, "sort": "NAME_DESC"}"#;
        let params: SearchParams<PatientSort> = serde_json::from_str(json).unwrap();
        assert_eq!(params.q.as_deref(), Some("smith"));
        assert_eq!(params.limit(), 5);
        assert_eq!(params.offset(), 10);
        assert_eq!(params.sort, Some(PatientSort::NameDesc));
    }

    #[test]
    fn test_validate_limit_bounds() {
        let mut params: SearchParams<PatientSort> = serde_json::from_str("{}").unwrap();
        params.limit = Some(0);
        assert!(params.validate().is_some());
        params.limit = Some(MAX_PAGE_SIZE + 1);
        assert!(params.validate().is_some());
        params.limit = Some(MAX_PAGE_SIZE);
        assert!(params.validate().is_none());
    }

    fn assert_query_extractor<P: serde::de::DeserializeOwned>() {}

    #[test]
    fn test_params_deserialize_for_every_sort_table() {
        use crate::domain::{DoctorSort, FeedbackSort, InventorySort, PrescriptionSort};

        assert_query_extractor::<SearchParams<PatientSort>>();
        assert_query_extractor::<SearchParams<DoctorSort>>();
        assert_query_extractor::<SearchParams<AppointmentSort>>();
        assert_query_extractor::<SearchParams<PrescriptionSort>>();
        assert_query_extractor::<SearchParams<InventorySort>>();
        assert_query_extractor::<SearchParams<FeedbackSort>>();
        assert_query_extractor::<CountParams<PatientSort>>();
        assert_query_extractor::<CountParams<AppointmentSort>>();
    }

    #[test]
    fn test_params_from_query_string() {
        let uri: axum::http::Uri = "/appointments?q=flu&limit=5&sort=NEXT_7".parse().unwrap();
        let Query(params) = Query::<SearchParams<AppointmentSort>>::try_from_uri(&uri).unwrap();
        assert_eq!(params.q.as_deref(), Some("flu"));
        assert_eq!(params.limit(), 5);
        assert_eq!(params.sort, Some(AppointmentSort::Next7));

        let uri: axum::http::Uri = "/appointments/count".parse().unwrap();
        let Query(params) = Query::<CountParams<AppointmentSort>>::try_from_uri(&uri).unwrap();
        assert!(params.q.is_none());
        assert!(params.sort.is_none());
    }

    #[test]
    fn test_count_params_filter_sort() {
        let params: CountParams<AppointmentSort> =
            serde_json::from_str(r#"{"sort": "TODAY"}"#).unwrap();
        assert_eq!(params.sort, Some(AppointmentSort::Today));
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{EaseOfUse, Recommendation, ResultRelevance};

/// Camp search query as entered by a parent
///
/// Either `age` or `ages` (or both) may be supplied; they are merged into a
/// single age set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub ages: Vec<u8>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_price", rename = "maxPrice", default)]
    pub max_price: Option<f64>,
    #[serde(alias = "start_date", rename = "startDate", default)]
    pub start_date: Option<NaiveDate>,
    #[serde(alias = "end_date", rename = "endDate", default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[validate(length(min = 5, max = 10))]
    #[serde(alias = "zip_code", rename = "zipCode", default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(alias = "min_rating", rename = "minRating", default)]
    pub min_rating: Option<f64>,
    #[validate(length(min = 1, max = 128))]
    #[serde(alias = "session_id", rename = "sessionId", default)]
    pub session_id: Option<String>,
}

impl SearchRequest {
    /// All requested ages, de-duplicated
    pub fn requested_ages(&self) -> Vec<u8> {
        let mut ages: Vec<u8> = self.age.into_iter().chain(self.ages.iter().copied()).collect();
        ages.sort_unstable();
        ages.dedup();
        ages
    }
}

/// Request to reserve a camp session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookingRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "camp_name", rename = "campName")]
    pub camp_name: String,
    #[serde(alias = "session_date", rename = "sessionDate")]
    pub session_date: NaiveDate,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 32))]
    #[serde(default)]
    pub phone: String,
}

/// Post-visit feedback form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[serde(alias = "ease_of_use", rename = "easeOfUse")]
    pub ease_of_use: EaseOfUse,
    #[serde(alias = "search_results", rename = "searchResults")]
    pub search_results: ResultRelevance,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub comments: String,
    #[serde(alias = "would_recommend", rename = "wouldRecommend")]
    pub would_recommend: Recommendation,
}

/// Request to mark a camp as a favorite
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FavoriteRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "camp_name", rename = "campName")]
    pub camp_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_ages_merges_single_and_set() {
        let request = SearchRequest {
            age: Some(10),
            ages: vec![8, 10, 12],
            ..Default::default()
        };
        assert_eq!(request.requested_ages(), vec![8, 10, 12]);
    }

    #[test]
    fn test_search_request_accepts_snake_case() {
        let json = r#"{"age": 9, "max_price": 450, "start_date": "2025-07-01", "zip_code": "98103"}"#;
        let request: SearchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.max_price, Some(450.0));
        assert_eq!(request.zip_code.as_deref(), Some("98103"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let request = SearchRequest {
            age: Some(9),
            max_price: Some(-1.0),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_feedback_rating_bounds() {
        let request = FeedbackRequest {
            rating: 6,
            ease_of_use: EaseOfUse::Easy,
            search_results: ResultRelevance::Good,
            comments: String::new(),
            would_recommend: Recommendation::Yes,
        };
        assert!(request.validate().is_err());
    }
}

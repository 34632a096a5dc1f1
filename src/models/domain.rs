use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// One bookable camp session offering, as supplied by a record source
///
/// Age range and session dates are carried as raw text and validated by
/// [`crate::core::parse::parse_record`] at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampRecord {
    pub name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(rename = "ageRange", alias = "age_range", alias = "ages")]
    pub age_range: String,
    pub cost: f64,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub activities: Option<Vec<String>>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "registrationLink", alias = "registration_link", default)]
    pub registration_link: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(rename = "currentBookings", alias = "current_bookings", default)]
    pub current_bookings: Option<u32>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl CampRecord {
    /// Venue coordinates, when both halves are known
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Remaining spots, if the provider publishes capacity
    pub fn available_spots(&self) -> Option<u32> {
        self.capacity
            .map(|capacity| capacity.saturating_sub(self.current_bookings.unwrap_or(0)))
    }
}

/// Parent review attached to a camp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub user: String,
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
}

/// Inclusive age bounds of a camp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    #[inline]
    pub fn contains(&self, age: u8) -> bool {
        self.min <= age && age <= self.max
    }
}

/// Inclusive calendar window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// WGS84 coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Where the parent searches from and how far they will drive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOrigin {
    pub point: GeoPoint,
    #[serde(rename = "radiusMiles")]
    pub radius_miles: f64,
}

/// One user query over the camp catalog
///
/// Ages are always a set; a single-age query is a one-element set. Empty
/// `ages` and empty `activities` impose no constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub ages: BTreeSet<u8>,
    pub max_price: f64,
    pub date_range: DateRange,
    pub activities: Vec<String>,
    pub origin: Option<SearchOrigin>,
    pub min_rating: Option<f64>,
}

impl FilterSpec {
    pub fn new(ages: impl IntoIterator<Item = u8>, max_price: f64, date_range: DateRange) -> Self {
        Self {
            ages: ages.into_iter().collect(),
            max_price,
            date_range,
            activities: Vec::new(),
            origin: None,
            min_rating: None,
        }
    }

    pub fn with_activities<S: Into<String>>(mut self, activities: impl IntoIterator<Item = S>) -> Self {
        self.activities = activities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_origin(mut self, origin: SearchOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }
}

/// Filter output element: the untouched record plus its computed distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampMatch {
    #[serde(flatten)]
    pub camp: CampRecord,
    #[serde(rename = "distanceMiles")]
    pub distance_miles: Option<f64>,
}

/// Aggregate figures over a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    #[serde(rename = "totalCamps")]
    pub total_camps: usize,
    #[serde(rename = "avgPrice")]
    pub avg_price: f64,
    #[serde(rename = "popularActivities")]
    pub popular_activities: Vec<ActivityCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCount {
    pub activity: String,
    pub count: usize,
}

/// Contact details a parent leaves when booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

/// A reserved seat in one camp session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "bookingId")]
    pub booking_id: Uuid,
    #[serde(rename = "campName")]
    pub camp_name: String,
    #[serde(rename = "sessionDate")]
    pub session_date: NaiveDate,
    pub contact: ContactInfo,
    pub status: BookingStatus,
    #[serde(rename = "bookedAt")]
    pub booked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EaseOfUse {
    #[serde(rename = "Very Difficult")]
    VeryDifficult,
    Difficult,
    Neutral,
    Easy,
    #[serde(rename = "Very Easy")]
    VeryEasy,
}

impl EaseOfUse {
    pub fn as_str(&self) -> &'static str {
        match self {
            EaseOfUse::VeryDifficult => "Very Difficult",
            EaseOfUse::Difficult => "Difficult",
            EaseOfUse::Neutral => "Neutral",
            EaseOfUse::Easy => "Easy",
            EaseOfUse::VeryEasy => "Very Easy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultRelevance {
    Poor,
    Fair,
    Good,
    #[serde(rename = "Very Good")]
    VeryGood,
    Excellent,
}

impl ResultRelevance {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultRelevance::Poor => "Poor",
            ResultRelevance::Fair => "Fair",
            ResultRelevance::Good => "Good",
            ResultRelevance::VeryGood => "Very Good",
            ResultRelevance::Excellent => "Excellent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Yes,
    Maybe,
    No,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Yes => "Yes",
            Recommendation::Maybe => "Maybe",
            Recommendation::No => "No",
        }
    }
}

/// Stored feedback entry, timestamped by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(rename = "feedbackId")]
    pub feedback_id: Uuid,
    pub rating: u8,
    #[serde(rename = "easeOfUse")]
    pub ease_of_use: EaseOfUse,
    #[serde(rename = "searchResults")]
    pub search_results: ResultRelevance,
    pub comments: String,
    #[serde(rename = "wouldRecommend")]
    pub would_recommend: Recommendation,
    pub timestamp: DateTime<Utc>,
}

/// Per-visitor state owned by the session store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub favorites: Vec<String>,
    #[serde(rename = "lastSearch")]
    pub last_search: Option<DateTime<Utc>>,
    #[serde(rename = "lastResults")]
    pub last_results: Vec<CampMatch>,
}

impl SessionState {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            favorites: Vec::new(),
            last_search: None,
            last_results: Vec::new(),
        }
    }

    /// Returns false when the camp was already a favorite
    pub fn add_favorite(&mut self, camp_name: &str) -> bool {
        if self.favorites.iter().any(|f| f == camp_name) {
            return false;
        }
        self.favorites.push(camp_name.to_string());
        true
    }

    pub fn remove_favorite(&mut self, camp_name: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| f != camp_name);
        self.favorites.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camp_record_deserializes_snake_case_source() {
        let json = r#"{
            "name": "STEM Discovery Camp",
            "provider": "Pacific Science Center",
            "ages": "8-12",
            "dates": ["2025-07-10", "2025-07-24"],
            "cost": 475.0,
            "location": "200 2nd Ave N, Seattle",
            "description": "Hands-on STEM exploration for curious minds"
        }"#;

        let record: CampRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.age_range, "8-12");
        assert_eq!(record.dates.len(), 2);
        assert!(record.activities.is_none());
        assert!(record.coordinates().is_none());
    }

    #[test]
    fn test_available_spots_saturates() {
        let json = r#"{"name":"x","ageRange":"8-12","cost":1,"capacity":10,"currentBookings":12}"#;
        let record: CampRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.available_spots(), Some(0));
    }

    #[test]
    fn test_session_favorites_deduplicate() {
        let mut session = SessionState::new("abc");
        assert!(session.add_favorite("Zoo Explorers"));
        assert!(!session.add_favorite("Zoo Explorers"));
        assert_eq!(session.favorites, vec!["Zoo Explorers"]);
        assert!(session.remove_favorite("Zoo Explorers"));
        assert!(!session.remove_favorite("Zoo Explorers"));
    }

    #[test]
    fn test_feedback_enums_use_display_labels() {
        let json = serde_json::to_string(&EaseOfUse::VeryEasy).unwrap();
        assert_eq!(json, "\"Very Easy\"");
        let parsed: ResultRelevance = serde_json::from_str("\"Very Good\"").unwrap();
        assert_eq!(parsed, ResultRelevance::VeryGood);
    }
}

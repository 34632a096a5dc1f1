// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ActivityCount, AgeRange, Booking, BookingStatus, CampMatch, CampRecord, CatalogStats,
    ContactInfo, DateRange, EaseOfUse, FeedbackRecord, FilterSpec, GeoPoint, Recommendation,
    ResultRelevance, Review, SearchOrigin, SessionState,
};
pub use requests::{BookingRequest, FavoriteRequest, FeedbackRequest, SearchRequest};
pub use responses::{ActivitiesResponse, ErrorResponse, FeedbackResponse, HealthResponse, SearchResponse};

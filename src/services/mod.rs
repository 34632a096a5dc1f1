// Service exports
pub mod cache;
pub mod catalog;
pub mod postgres;
pub mod session;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use catalog::{builtin_camps, CampCatalog, CampSource, CatalogError, CatalogLoader};
pub use postgres::{FeedbackStats, PostgresClient, PostgresError};
pub use session::SessionStore;

//! Camp Finder - search service for Seattle-area summer camps
//!
//! Parents describe their children's ages, a budget, a date window and the
//! activities they care about; the service returns the camps in the catalog
//! that satisfy all of them, nearest and cheapest first.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance_miles, filter_camps, CampFinder, FilterOutcome, ZipDirectory};
pub use crate::models::{CampMatch, CampRecord, DateRange, FilterSpec, SearchRequest, SearchResponse};

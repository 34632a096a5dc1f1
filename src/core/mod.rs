// Core algorithm exports
pub mod booking;
pub mod distance;
pub mod export;
pub mod filters;
pub mod finder;
pub mod geocode;
pub mod parse;
pub mod stats;

pub use booking::{BookingError, BookingLedger};
pub use distance::distance_miles;
pub use export::{to_csv, ExportError};
pub use filters::{camp_distance, matches_filters};
pub use finder::{filter_camps, CampFinder, FilterOutcome};
pub use geocode::{GeocodeError, ZipDirectory};
pub use parse::{parse_age_range, parse_record, parse_session_date, ParsedCamp, RecordError};
pub use stats::{all_activities, catalog_stats};

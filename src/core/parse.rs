use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{AgeRange, CampRecord};

/// Session dates are exchanged as ISO calendar dates
pub const SESSION_DATE_FORMAT: &str = "%Y-%m-%d";

/// Reasons a raw camp record cannot take part in a query
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("malformed age range '{0}', expected 'min-max'")]
    AgeRange(String),

    #[error("inverted age range {min}-{max}")]
    InvertedAgeRange { min: u8, max: u8 },

    #[error("malformed session date '{0}', expected YYYY-MM-DD")]
    SessionDate(String),

    #[error("invalid cost {0}")]
    Cost(f64),
}

/// A raw record whose age range, cost and session dates have been validated
#[derive(Debug, Clone)]
pub struct ParsedCamp<'a> {
    pub record: &'a CampRecord,
    pub age_range: AgeRange,
    pub session_dates: Vec<NaiveDate>,
}

/// Parse `"8-12"` into inclusive bounds
pub fn parse_age_range(raw: &str) -> Result<AgeRange, RecordError> {
    let malformed = || RecordError::AgeRange(raw.to_string());

    let (min, max) = raw.split_once('-').ok_or_else(malformed)?;
    let min: u8 = min.trim().parse().map_err(|_| malformed())?;
    let max: u8 = max.trim().parse().map_err(|_| malformed())?;

    if min > max {
        return Err(RecordError::InvertedAgeRange { min, max });
    }

    Ok(AgeRange { min, max })
}

pub fn parse_session_date(raw: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(raw.trim(), SESSION_DATE_FORMAT)
        .map_err(|_| RecordError::SessionDate(raw.to_string()))
}

/// Validate a raw record. Any single bad field rejects the whole record.
pub fn parse_record(record: &CampRecord) -> Result<ParsedCamp<'_>, RecordError> {
    if !record.cost.is_finite() || record.cost < 0.0 {
        return Err(RecordError::Cost(record.cost));
    }

    let age_range = parse_age_range(&record.age_range)?;
    let session_dates = record
        .dates
        .iter()
        .map(|d| parse_session_date(d))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedCamp {
        record,
        age_range,
        session_dates,
    })
}

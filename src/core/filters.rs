use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::core::{distance::distance_miles, parse::ParsedCamp};
use crate::models::{AgeRange, CampRecord, DateRange, FilterSpec, SearchOrigin};

/// At least one requested age falls inside the camp's range
///
/// An empty age set does not constrain.
#[inline]
pub fn matches_age(age_range: &AgeRange, ages: &BTreeSet<u8>) -> bool {
    ages.is_empty() || ages.iter().any(|age| age_range.contains(*age))
}

#[inline]
pub fn matches_price(cost: f64, max_price: f64) -> bool {
    cost <= max_price
}

/// At least one session date lies in the window, bounds included
#[inline]
pub fn matches_dates(session_dates: &[NaiveDate], date_range: &DateRange) -> bool {
    session_dates.iter().any(|date| date_range.contains(*date))
}

/// At least one desired tag is offered
///
/// No desired tags, or a camp with no activity data, always passes.
/// Tags compare case-insensitively.
pub fn matches_activities(offered: Option<&[String]>, desired: &[String]) -> bool {
    if desired.is_empty() {
        return true;
    }

    let Some(offered) = offered else {
        return true;
    };

    desired.iter().any(|want| {
        let want = want.trim();
        offered.iter().any(|tag| tag.trim().eq_ignore_ascii_case(want))
    })
}

/// Camps without a published rating are not excluded
#[inline]
pub fn matches_rating(rating: Option<f64>, min_rating: Option<f64>) -> bool {
    match (rating, min_rating) {
        (Some(rating), Some(min_rating)) => rating >= min_rating,
        _ => true,
    }
}

/// Distance from the search origin to the camp, when both are known
#[inline]
pub fn camp_distance(record: &CampRecord, origin: Option<&SearchOrigin>) -> Option<f64> {
    let origin = origin?;
    let venue = record.coordinates()?;
    Some(distance_miles(origin.point, venue))
}

/// An unknown distance never excludes
#[inline]
pub fn matches_radius(distance_miles: Option<f64>, origin: Option<&SearchOrigin>) -> bool {
    match (distance_miles, origin) {
        (Some(distance), Some(origin)) => distance <= origin.radius_miles,
        _ => true,
    }
}

/// Check a validated camp against every active filter
///
/// `distance_miles` is the precomputed result of [`camp_distance`].
pub fn matches_filters(camp: &ParsedCamp<'_>, spec: &FilterSpec, distance_miles: Option<f64>) -> bool {
    // Cheap numeric checks first
    if !matches_age(&camp.age_range, &spec.ages) {
        return false;
    }

    if !matches_price(camp.record.cost, spec.max_price) {
        return false;
    }

    if !matches_rating(camp.record.rating, spec.min_rating) {
        return false;
    }

    if !matches_radius(distance_miles, spec.origin.as_ref()) {
        return false;
    }

    if !matches_dates(&camp.session_dates, &spec.date_range) {
        return false;
    }

    matches_activities(camp.record.activities.as_deref(), &spec.activities)
}

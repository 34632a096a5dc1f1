// Unit tests for Camp Finder

use camp_finder::core::{
    distance::distance_miles,
    filters::{matches_activities, matches_age, matches_dates, matches_price, matches_radius},
    parse::{parse_age_range, parse_record, RecordError},
    stats::catalog_stats,
};
use camp_finder::models::{AgeRange, CampRecord, DateRange, GeoPoint, SearchOrigin};
use camp_finder::services::builtin_camps;
use chrono::NaiveDate;
use std::collections::BTreeSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn july() -> DateRange {
    DateRange::new(date(2025, 7, 1), date(2025, 7, 31))
}

fn camp(age_range: &str, cost: f64, dates: &[&str]) -> CampRecord {
    CampRecord {
        name: "Test Camp".to_string(),
        provider: "Test Provider".to_string(),
        age_range: age_range.to_string(),
        cost,
        dates: dates.iter().map(|d| d.to_string()).collect(),
        location: "Seattle".to_string(),
        activities: None,
        description: String::new(),
        latitude: None,
        longitude: None,
        rating: None,
        registration_link: None,
        capacity: None,
        current_bookings: None,
        reviews: vec![],
    }
}

#[test]
fn test_distance_zero() {
    let p = GeoPoint::new(47.6062, -122.3321);
    assert!(distance_miles(p, p) < 0.001);
}

#[test]
fn test_distance_downtown_to_ballard() {
    // Roughly 5 miles north-west
    let downtown = GeoPoint::new(47.6062, -122.3321);
    let ballard = GeoPoint::new(47.6680, -122.3840);

    let d = distance_miles(downtown, ballard);
    assert!(d > 4.0 && d < 6.0);
}

#[test]
fn test_age_range_parsing() {
    assert_eq!(parse_age_range("8-12").unwrap(), AgeRange { min: 8, max: 12 });
    assert_eq!(parse_age_range(" 9 - 11 ").unwrap(), AgeRange { min: 9, max: 11 });
    assert!(matches!(parse_age_range("twelve"), Err(RecordError::AgeRange(_))));
    assert!(matches!(
        parse_age_range("12-8"),
        Err(RecordError::InvertedAgeRange { min: 12, max: 8 })
    ));
}

#[test]
fn test_age_range_inclusive_at_both_ends() {
    let range = AgeRange { min: 8, max: 12 };

    assert!(matches_age(&range, &BTreeSet::from([8])));
    assert!(matches_age(&range, &BTreeSet::from([12])));
    assert!(!matches_age(&range, &BTreeSet::from([7])));
    assert!(!matches_age(&range, &BTreeSet::from([13])));
}

#[test]
fn test_any_child_age_is_enough() {
    let range = AgeRange { min: 8, max: 12 };
    assert!(matches_age(&range, &BTreeSet::from([5, 10, 16])));
    assert!(!matches_age(&range, &BTreeSet::from([5, 16])));
}

#[test]
fn test_price_ceiling_inclusive() {
    assert!(matches_price(500.0, 500.0));
    assert!(matches_price(0.0, 500.0));
    assert!(!matches_price(500.01, 500.0));
}

#[test]
fn test_any_session_date_in_window() {
    let dates = vec![date(2025, 6, 20), date(2025, 7, 15)];
    assert!(matches_dates(&dates, &july()));

    let outside = vec![date(2025, 6, 20), date(2025, 8, 5)];
    assert!(!matches_dates(&outside, &july()));

    assert!(!matches_dates(&[], &july()));
}

#[test]
fn test_window_boundaries_inclusive() {
    assert!(matches_dates(&[date(2025, 7, 1)], &july()));
    assert!(matches_dates(&[date(2025, 7, 31)], &july()));
    assert!(!matches_dates(&[date(2025, 6, 30)], &july()));
    assert!(!matches_dates(&[date(2025, 8, 1)], &july()));
}

#[test]
fn test_activity_overlap() {
    let offered = vec!["Robotics".to_string(), "Coding".to_string()];

    assert!(matches_activities(Some(offered.as_slice()), &[]));
    assert!(matches_activities(Some(offered.as_slice()), &["coding".to_string()]));
    assert!(!matches_activities(Some(offered.as_slice()), &["Kayaking".to_string()]));
    // No activity data means no grounds to exclude
    assert!(matches_activities(None, &["Kayaking".to_string()]));
}

#[test]
fn test_radius_only_applies_with_coordinates() {
    let origin = SearchOrigin {
        point: GeoPoint::new(47.61, -122.33),
        radius_miles: 5.0,
    };

    assert!(matches_radius(Some(4.9), Some(&origin)));
    assert!(matches_radius(Some(5.0), Some(&origin)));
    assert!(!matches_radius(Some(5.1), Some(&origin)));
    assert!(matches_radius(None, Some(&origin)));
    assert!(matches_radius(Some(50.0), None));
}

#[test]
fn test_parse_record_rejects_bad_fields() {
    assert!(parse_record(&camp("8-12", 475.0, &["2025-07-10"])).is_ok());
    assert!(matches!(
        parse_record(&camp("8-12", 475.0, &["July 10"])),
        Err(RecordError::SessionDate(_))
    ));
    assert!(matches!(parse_record(&camp("8-12", -5.0, &["2025-07-10"])), Err(RecordError::Cost(_))));
    assert!(matches!(parse_record(&camp("8", 475.0, &["2025-07-10"])), Err(RecordError::AgeRange(_))));
}

#[test]
fn test_catalog_stats_over_builtins() {
    let stats = catalog_stats(&builtin_camps());

    assert_eq!(stats.total_camps, 5);
    // (475 + 425 + 495 + 450 + 395) / 5
    assert!((stats.avg_price - 448.0).abs() < 1e-9);
    assert!(stats.popular_activities.iter().all(|a| a.count >= 1));
}

#[test]
fn test_catalog_stats_empty() {
    let stats = catalog_stats(&[]);
    assert_eq!(stats.total_camps, 0);
    assert_eq!(stats.avg_price, 0.0);
    assert!(stats.popular_activities.is_empty());
}

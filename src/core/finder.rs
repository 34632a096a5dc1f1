use std::cmp::Ordering;

use crate::core::{
    filters::{camp_distance, matches_filters},
    parse::parse_record,
};
use crate::models::{CampMatch, CampRecord, FilterSpec};

/// Result of one filter pass over a catalog
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub matches: Vec<CampMatch>,
    pub total_candidates: usize,
    /// Records dropped because they could not be parsed
    pub skipped: usize,
}

/// Filter `records` by `spec` and order the survivors
///
/// # Pipeline Stages
/// 1. Parse: malformed records are logged and skipped, never fatal
/// 2. Distance: computed only when the query has an origin and the camp has coordinates
/// 3. Predicates: age, price, rating, radius, dates, activities (all must pass)
/// 4. Ordering: ascending `(distance_or_zero, cost)`, stable for ties
pub fn filter_camps(records: &[CampRecord], spec: &FilterSpec) -> FilterOutcome {
    let mut skipped = 0;

    let mut matches: Vec<CampMatch> = records
        .iter()
        .filter_map(|record| match parse_record(record) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Skipping malformed camp record '{}': {}", record.name, e);
                skipped += 1;
                None
            }
        })
        .filter_map(|parsed| {
            let distance_miles = camp_distance(parsed.record, spec.origin.as_ref());

            if matches_filters(&parsed, spec, distance_miles) {
                Some(CampMatch {
                    camp: parsed.record.clone(),
                    distance_miles,
                })
            } else {
                None
            }
        })
        .collect();

    // sort_by is stable, so equal keys keep catalog order
    matches.sort_by(|a, b| {
        a.distance_miles
            .unwrap_or(0.0)
            .partial_cmp(&b.distance_miles.unwrap_or(0.0))
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                a.camp
                    .cost
                    .partial_cmp(&b.camp.cost)
                    .unwrap_or(Ordering::Equal)
            })
    });

    FilterOutcome {
        matches,
        total_candidates: records.len(),
        skipped,
    }
}

/// Search front-end over [`filter_camps`] that caps the result size
#[derive(Debug, Clone, Copy)]
pub struct CampFinder {
    max_results: usize,
}

impl CampFinder {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn find_camps(&self, records: &[CampRecord], spec: &FilterSpec) -> FilterOutcome {
        let mut outcome = filter_camps(records, spec);

        if outcome.matches.len() > self.max_results {
            tracing::debug!(
                "Truncating {} matches to {}",
                outcome.matches.len(),
                self.max_results
            );
            outcome.matches.truncate(self.max_results);
        }

        outcome
    }
}

impl Default for CampFinder {
    fn default() -> Self {
        Self::new(100)
    }
}

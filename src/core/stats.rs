use std::collections::{BTreeSet, HashMap};

use crate::models::{ActivityCount, CampRecord, CatalogStats};

/// Totals, mean cost and activity popularity across a catalog
pub fn catalog_stats(records: &[CampRecord]) -> CatalogStats {
    let total_camps = records.len();
    let avg_price = if total_camps > 0 {
        records.iter().map(|r| r.cost).sum::<f64>() / total_camps as f64
    } else {
        0.0
    };

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for activity in records.iter().flat_map(|r| r.activities.iter().flatten()) {
        *counts.entry(activity.as_str()).or_default() += 1;
    }

    let mut popular_activities: Vec<ActivityCount> = counts
        .into_iter()
        .map(|(activity, count)| ActivityCount {
            activity: activity.to_string(),
            count,
        })
        .collect();

    // Most common first, alphabetical among equals
    popular_activities.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.activity.cmp(&b.activity)));

    CatalogStats {
        total_camps,
        avg_price,
        popular_activities,
    }
}

/// Every activity tag offered anywhere in the catalog, sorted and unique
pub fn all_activities(records: &[CampRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.activities.iter().flatten())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camp(cost: f64, activities: Option<&[&str]>) -> CampRecord {
        CampRecord {
            name: "Camp".to_string(),
            provider: String::new(),
            age_range: "8-12".to_string(),
            cost,
            dates: vec![],
            location: String::new(),
            activities: activities.map(|a| a.iter().map(|s| s.to_string()).collect()),
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
    fn test_empty_catalog() {
        let stats = catalog_stats(&[]);
        assert_eq!(stats.total_camps, 0);
        assert_eq!(stats.avg_price, 0.0);
        assert!(stats.popular_activities.is_empty());
    }

    #[test]
    fn test_stats() {
        let records = vec![
            camp(400.0, Some(&["Swimming", "Soccer"])),
            camp(500.0, Some(&["Swimming"])),
            camp(300.0, None),
        ];

        let stats = catalog_stats(&records);

        assert_eq!(stats.total_camps, 3);
        assert!((stats.avg_price - 400.0).abs() < f64::EPSILON);
        assert_eq!(
            stats.popular_activities,
            vec![
                ActivityCount { activity: "Swimming".to_string(), count: 2 },
                ActivityCount { activity: "Soccer".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_all_activities_sorted_unique() {
        let records = vec![
            camp(1.0, Some(&["Tennis", "Acting"])),
            camp(1.0, Some(&["Acting"])),
        ];
        assert_eq!(all_activities(&records), vec!["Acting", "Tennis"]);
    }
}

// Criterion benchmarks for Camp Finder

use camp_finder::core::{distance::distance_miles, filter_camps, to_csv};
use camp_finder::models::{CampRecord, DateRange, FilterSpec, GeoPoint, SearchOrigin};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const ACTIVITIES: [&str; 6] = ["Robotics", "Kayaking", "Acting", "Soccer", "Coding", "Art"];

fn create_camp(id: usize) -> CampRecord {
    let min_age = 5 + (id % 8) as u8;
    CampRecord {
        name: format!("Camp {}", id),
        provider: "Bench Provider".to_string(),
        age_range: format!("{}-{}", min_age, min_age + 4),
        cost: 250.0 + (id % 40) as f64 * 7.5,
        dates: vec![
            format!("2025-07-{:02}", 1 + id % 28),
            format!("2025-08-{:02}", 1 + id % 28),
        ],
        location: "Seattle".to_string(),
        activities: Some(vec![
            ACTIVITIES[id % ACTIVITIES.len()].to_string(),
            ACTIVITIES[(id + 2) % ACTIVITIES.len()].to_string(),
        ]),
        description: String::new(),
        latitude: Some(47.55 + (id as f64 * 0.0007) % 0.2),
        longitude: Some(-122.40 + (id as f64 * 0.0011) % 0.15),
        rating: Some(3.5 + (id % 15) as f64 * 0.1),
        registration_link: None,
        capacity: Some(20),
        current_bookings: Some((id % 20) as u32),
        reviews: vec![],
    }
}

fn july_spec() -> FilterSpec {
    let window = DateRange::new(
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
    );
    FilterSpec::new([8, 11], 450.0, window).with_activities(["Robotics", "Coding"])
}

fn bench_distance(c: &mut Criterion) {
    let downtown = GeoPoint::new(47.6105, -122.3348);
    let ballard = GeoPoint::new(47.6682, -122.3769);

    c.bench_function("distance_miles", |b| {
        b.iter(|| distance_miles(black_box(downtown), black_box(ballard)));
    });
}

fn bench_filter_camps(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_camps");

    for count in [10, 100, 1000, 10_000].iter() {
        let camps: Vec<CampRecord> = (0..*count).map(create_camp).collect();
        let spec = july_spec();

        group.bench_with_input(BenchmarkId::new("no_origin", count), count, |b, _| {
            b.iter(|| filter_camps(black_box(&camps), black_box(&spec)));
        });

        let spec = july_spec().with_origin(SearchOrigin {
            point: GeoPoint::new(47.6105, -122.3348),
            radius_miles: 5.0,
        });

        group.bench_with_input(BenchmarkId::new("with_radius", count), count, |b, _| {
            b.iter(|| filter_camps(black_box(&camps), black_box(&spec)));
        });
    }

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let camps: Vec<CampRecord> = (0..1000).map(create_camp).collect();
    let outcome = filter_camps(&camps, &july_spec());

    c.bench_function("to_csv", |b| {
        b.iter(|| to_csv(black_box(&outcome.matches)));
    });
}

criterion_group!(benches, bench_distance, bench_filter_camps, bench_export);

criterion_main!(benches);

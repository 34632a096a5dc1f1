use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use chrono::NaiveDate;
use thiserror::Error;
use validator::Validate;

use crate::config::SearchSettings;
use crate::core::{all_activities, catalog_stats, to_csv, FilterOutcome, GeocodeError, ZipDirectory};
use crate::models::{
    ActivitiesResponse, DateRange, FilterSpec, HealthResponse, SearchOrigin, SearchRequest, SearchResponse,
};
use crate::routes::{error_response, AppState};

/// Reasons a well-formed search request is still unusable
#[derive(Debug, Error)]
pub enum SearchRequestError {
    #[error("at least one child's age is required")]
    MissingAge,

    #[error("age {age} is outside the supported range {min}-{max}")]
    AgeOutOfRange { age: u8, min: u8, max: u8 },

    #[error("radius {radius} must be between 1 and {max} miles")]
    RadiusOutOfRange { radius: f64, max: f64 },

    #[error("a search radius needs a ZIP code")]
    RadiusWithoutZip,

    #[error("start date {start} is after end date {end}")]
    InvertedDates { start: NaiveDate, end: NaiveDate },

    #[error(transparent)]
    Location(#[from] GeocodeError),
}

/// Configure camp search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/camps/search", web::post().to(search_camps))
        .route("/camps/export", web::post().to(export_camps))
        .route("/camps/activities", web::get().to(list_activities))
        .route("/camps/stats", web::get().to(camp_stats));
}

/// Turn a request into a filter specification, applying configured bounds
/// and defaults
pub fn build_filter_spec(
    req: &SearchRequest,
    settings: &SearchSettings,
    zips: &ZipDirectory,
) -> Result<FilterSpec, SearchRequestError> {
    let ages = req.requested_ages();
    if ages.is_empty() {
        return Err(SearchRequestError::MissingAge);
    }
    if let Some(&age) = ages.iter().find(|a| **a < settings.min_age || **a > settings.max_age) {
        return Err(SearchRequestError::AgeOutOfRange {
            age,
            min: settings.min_age,
            max: settings.max_age,
        });
    }

    let date_range = DateRange::new(
        req.start_date.unwrap_or(settings.season_start),
        req.end_date.unwrap_or(settings.season_end),
    );
    if date_range.start > date_range.end {
        return Err(SearchRequestError::InvertedDates {
            start: date_range.start,
            end: date_range.end,
        });
    }

    let mut spec = FilterSpec::new(ages, req.max_price.unwrap_or(settings.default_max_price), date_range)
        .with_activities(req.activities.iter().map(|a| a.trim()).filter(|a| !a.is_empty()));

    match (&req.zip_code, req.radius) {
        (Some(zip), radius) => {
            let radius = radius.unwrap_or(settings.default_radius_miles);
            if !(1.0..=settings.max_radius_miles).contains(&radius) {
                return Err(SearchRequestError::RadiusOutOfRange {
                    radius,
                    max: settings.max_radius_miles,
                });
            }

            spec = spec.with_origin(SearchOrigin {
                point: zips.resolve(zip)?,
                radius_miles: radius,
            });
        }
        (None, Some(_)) => return Err(SearchRequestError::RadiusWithoutZip),
        (None, None) => {}
    }

    if let Some(min_rating) = req.min_rating {
        spec = spec.with_min_rating(min_rating);
    }

    Ok(spec)
}

/// Validate, filter, and remember the search on the caller's session
async fn run_search(state: &AppState, req: &SearchRequest) -> Result<FilterOutcome, HttpResponse> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return Err(error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string()));
    }

    let spec = build_filter_spec(req, &state.search, &state.zips).map_err(|e| {
        tracing::info!("Rejected search request: {}", e);
        error_response(StatusCode::BAD_REQUEST, "Invalid search", e.to_string())
    })?;

    tracing::info!("Starting camp search with filters: {:?}", spec);

    let records = state.catalog.records().await;
    let outcome = state.finder.find_camps(&records, &spec);

    if outcome.skipped > 0 {
        tracing::warn!("{} malformed camp records skipped during search", outcome.skipped);
    }

    if let Some(session_id) = &req.session_id {
        state.sessions.record_search(session_id, &outcome.matches).await;
    }

    tracing::info!(
        "Found {} matching camps (from {} candidates)",
        outcome.matches.len(),
        outcome.total_candidates
    );

    Ok(outcome)
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    // Without a database the search side still works
    let database_ok = match &state.postgres {
        Some(pg) => pg.health_check().await.unwrap_or(false),
        None => true,
    };
    let status = if database_ok { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search camps endpoint
///
/// POST /api/v1/camps/search
///
/// Request body:
/// ```json
/// {
///   "ages": [8, 10],
///   "maxPrice": 500,
///   "startDate": "2025-07-01",
///   "endDate": "2025-07-31",
///   "activities": ["Robotics"],
///   "zipCode": "98101",
///   "radius": 5,
///   "sessionId": "string"
/// }
/// ```
async fn search_camps(state: web::Data<AppState>, req: web::Json<SearchRequest>) -> impl Responder {
    match run_search(&state, &req).await {
        Ok(outcome) => HttpResponse::Ok().json(SearchResponse {
            total_results: outcome.matches.len(),
            matches: outcome.matches,
            skipped: outcome.skipped,
            searched_at: chrono::Utc::now(),
        }),
        Err(response) => response,
    }
}

/// Download the same results as a CSV file
///
/// POST /api/v1/camps/export
async fn export_camps(state: web::Data<AppState>, req: web::Json<SearchRequest>) -> impl Responder {
    let outcome = match run_search(&state, &req).await {
        Ok(outcome) => outcome,
        Err(response) => return response,
    };

    match to_csv(&outcome.matches) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"summer_camps.csv\""))
            .body(csv),
        Err(e) => {
            tracing::error!("Failed to export camps: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Export failed", e.to_string())
        }
    }
}

/// Every activity tag in the catalog, for building filter pickers
async fn list_activities(state: web::Data<AppState>) -> impl Responder {
    let records = state.catalog.records().await;
    HttpResponse::Ok().json(ActivitiesResponse {
        activities: all_activities(&records),
    })
}

async fn camp_stats(state: web::Data<AppState>) -> impl Responder {
    let records = state.catalog.records().await;
    HttpResponse::Ok().json(catalog_stats(&records))
}

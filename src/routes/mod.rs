// Route exports
pub mod bookings;
pub mod camps;
pub mod feedback;
pub mod sessions;

use actix_web::{http::StatusCode, web, HttpResponse};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::SearchSettings;
use crate::core::{BookingLedger, CampFinder, ZipDirectory};
use crate::models::ErrorResponse;
use crate::services::{CampCatalog, PostgresClient, SessionStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CampCatalog>,
    pub finder: CampFinder,
    pub zips: Arc<ZipDirectory>,
    pub sessions: Arc<SessionStore>,
    pub bookings: Arc<Mutex<BookingLedger>>,
    /// None when no database is configured or reachable
    pub postgres: Option<Arc<PostgresClient>>,
    pub search: Arc<SearchSettings>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(camps::configure)
            .configure(bookings::configure)
            .configure(feedback::configure)
            .configure(sessions::configure),
    );
}

/// JSON error body with the given status
pub(crate) fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::core::BookingError;
use crate::models::{Booking, BookingRequest, ContactInfo};
use crate::routes::{error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/bookings", web::post().to(create_booking))
        .route("/bookings/{booking_id}", web::delete().to(cancel_booking));
}

fn booking_error_response(e: BookingError) -> HttpResponse {
    match e {
        BookingError::Conflict { .. } => {
            tracing::info!("Booking conflict: {}", e);
            error_response(StatusCode::CONFLICT, "Booking conflict", e.to_string())
        }
        BookingError::UnknownSession { .. } => {
            error_response(StatusCode::BAD_REQUEST, "Unknown session", e.to_string())
        }
        BookingError::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Booking not found", e.to_string()),
    }
}

/// Best-effort write; the in-memory ledger stays authoritative if it fails
async fn persist(state: &AppState, booking: &Booking) {
    if let Some(pg) = &state.postgres {
        if let Err(e) = pg.record_booking(booking).await {
            tracing::error!("Failed to persist booking {}: {}", booking.booking_id, e);
        }
    }
}

/// Book a camp session
///
/// POST /api/v1/bookings
///
/// Returns 201 with the booking, 404 for an unknown camp, 400 when no camp of
/// that name runs on the requested date, and 409 when the parent already has
/// a confirmed booking that day.
async fn create_booking(state: web::Data<AppState>, req: web::Json<BookingRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for booking request: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let req = req.into_inner();

    let Some(camp) = state.catalog.find_session(&req.camp_name, req.session_date).await else {
        return error_response(
            StatusCode::NOT_FOUND,
            "Camp not found",
            format!("No camp named '{}'", req.camp_name),
        );
    };

    let contact = ContactInfo {
        email: req.email.trim().to_string(),
        phone: req.phone.trim().to_string(),
    };

    let result = state.bookings.lock().await.book(&camp, req.session_date, contact);

    let booking = match result {
        Ok(booking) => booking,
        Err(e) => return booking_error_response(e),
    };

    persist(&state, &booking).await;

    tracing::info!(
        "Booking {} confirmed for {} on {}",
        booking.booking_id,
        booking.camp_name,
        booking.session_date
    );

    HttpResponse::Created().json(booking)
}

/// Cancel a booking
///
/// DELETE /api/v1/bookings/{booking_id}
async fn cancel_booking(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let booking_id = path.into_inner();

    let result = state.bookings.lock().await.cancel(&booking_id);

    match result {
        Ok(booking) => {
            persist(&state, &booking).await;
            tracing::info!("Booking {} cancelled", booking_id);
            HttpResponse::Ok().json(booking)
        }
        Err(e) => booking_error_response(e),
    }
}

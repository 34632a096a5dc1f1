use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::models::{FeedbackRecord, FeedbackRequest, FeedbackResponse};
use crate::routes::{error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/feedback", web::post().to(submit_feedback))
        .route("/feedback/stats", web::get().to(feedback_stats));
}

fn storage_unavailable() -> HttpResponse {
    error_response(
        StatusCode::SERVICE_UNAVAILABLE,
        "Feedback unavailable",
        "Feedback storage is not configured",
    )
}

/// Submit user feedback
///
/// POST /api/v1/feedback
async fn submit_feedback(state: web::Data<AppState>, req: web::Json<FeedbackRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for feedback: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let Some(pg) = &state.postgres else {
        return storage_unavailable();
    };

    let req = req.into_inner();
    let record = FeedbackRecord {
        feedback_id: Uuid::new_v4(),
        rating: req.rating,
        ease_of_use: req.ease_of_use,
        search_results: req.search_results,
        comments: req.comments.trim().to_string(),
        would_recommend: req.would_recommend,
        timestamp: chrono::Utc::now(),
    };

    match pg.save_feedback(&record).await {
        Ok(()) => {
            tracing::info!("Feedback {} saved (rating {})", record.feedback_id, record.rating);
            HttpResponse::Created().json(FeedbackResponse {
                success: true,
                feedback_id: record.feedback_id,
            })
        }
        Err(e) => {
            tracing::error!("Failed to save feedback: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Feedback not saved", e.to_string())
        }
    }
}

async fn feedback_stats(state: web::Data<AppState>) -> impl Responder {
    let Some(pg) = &state.postgres else {
        return storage_unavailable();
    };

    match pg.feedback_stats().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            tracing::error!("Failed to read feedback stats: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Stats unavailable", e.to_string())
        }
    }
}

use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::models::FavoriteRequest;
use crate::routes::{error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/sessions/{session_id}", web::get().to(get_session))
        .route("/sessions/{session_id}/favorites", web::post().to(add_favorite))
        .route(
            "/sessions/{session_id}/favorites/{camp_name}",
            web::delete().to(remove_favorite),
        );
}

/// Favorites and last search results for a session
///
/// GET /api/v1/sessions/{session_id}
async fn get_session(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();
    HttpResponse::Ok().json(state.sessions.get(&session_id).await)
}

/// POST /api/v1/sessions/{session_id}/favorites
async fn add_favorite(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<FavoriteRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let session_id = path.into_inner();

    if state.catalog.find_by_name(&req.camp_name).await.is_none() {
        return error_response(
            StatusCode::NOT_FOUND,
            "Camp not found",
            format!("No camp named '{}'", req.camp_name),
        );
    }

    HttpResponse::Ok().json(state.sessions.add_favorite(&session_id, &req.camp_name).await)
}

/// DELETE /api/v1/sessions/{session_id}/favorites/{camp_name}
async fn remove_favorite(state: web::Data<AppState>, path: web::Path<(String, String)>) -> impl Responder {
    let (session_id, camp_name) = path.into_inner();
    HttpResponse::Ok().json(state.sessions.remove_favorite(&session_id, &camp_name).await)
}

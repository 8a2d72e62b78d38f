use actix_web::{web, HttpResponse, Responder};
use tracing::info;
use uuid::Uuid;

use crate::api_error::ApiError;
use crate::http::state::AppState;

/// GET /api/leagues/{id}/bracket/cut
pub async fn get_cut_bracket(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let league_id = path.into_inner();
    let view = state.brackets.cut_bracket(league_id).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// GET /api/leagues/{id}/bracket/finals
pub async fn get_finals_bracket(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let league_id = path.into_inner();
    let view = state.brackets.finals_bracket(league_id).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// GET /api/splits/{id}/olympus
pub async fn get_olympus(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let split_id = path.into_inner();
    let view = state.brackets.olympus(split_id).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/admin/leagues/{id}/playoffs/cut
pub async fn generate_cut(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let league_id = path.into_inner();

    info!(league_id = %league_id, "Received generate cut request");

    let created = state.brackets.generate_cut(league_id).await?;
    Ok(HttpResponse::Created().json(created))
}

/// POST /api/admin/leagues/{id}/playoffs/finals
pub async fn generate_finals(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let league_id = path.into_inner();

    info!(league_id = %league_id, "Received generate finals request");

    let created = state.brackets.generate_finals(league_id).await?;
    Ok(HttpResponse::Created().json(created))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/leagues/{id}/bracket/cut", web::get().to(get_cut_bracket))
        .route("/leagues/{id}/bracket/finals", web::get().to(get_finals_bracket))
        .route("/splits/{id}/olympus", web::get().to(get_olympus));
}

pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/leagues/{id}/playoffs/cut", web::post().to(generate_cut))
        .route("/leagues/{id}/playoffs/finals", web::post().to(generate_finals));
}

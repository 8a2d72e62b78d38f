use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::api_error::ApiError;
use crate::http::state::AppState;

// =============================================================================
// CATALOG
// =============================================================================

/// GET /api/seasons
pub async fn list_seasons(state: web::Data<AppState>) -> Result<impl Responder, ApiError> {
    let seasons = state.catalog.list_seasons().await?;
    Ok(HttpResponse::Ok().json(seasons))
}

/// GET /api/seasons/{id}/splits
pub async fn list_splits(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let splits = state.catalog.list_splits(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(splits))
}

/// GET /api/splits/{id}/leagues
pub async fn list_leagues(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let leagues = state.catalog.list_leagues(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(leagues))
}

/// GET /api/leagues/{id}
pub async fn get_league(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let league = state.catalog.get_league(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(league))
}

/// GET /api/leagues/{id}/trainers
pub async fn list_trainers(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let trainers = state.catalog.list_trainers(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(trainers))
}

// =============================================================================
// STANDINGS & CALENDAR
// =============================================================================

/// GET /api/leagues/{id}/standings
pub async fn get_standings(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let league_id = path.into_inner();

    info!(league_id = %league_id, "Received standings request");

    state.catalog.get_league(league_id).await?;
    let standings = state.standings.standings(league_id).await?;

    Ok(HttpResponse::Ok().json(standings))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub round: Option<i32>,
}

/// GET /api/leagues/{id}/matches?round=N
pub async fn list_matches(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<CalendarQuery>,
) -> Result<impl Responder, ApiError> {
    let matches = state
        .matches
        .list_matches(path.into_inner(), query.round)
        .await?;
    Ok(HttpResponse::Ok().json(matches))
}

// =============================================================================
// ROUTE CONFIGURATION
// =============================================================================

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/seasons", web::get().to(list_seasons))
        .route("/seasons/{id}/splits", web::get().to(list_splits))
        .route("/splits/{id}/leagues", web::get().to(list_leagues))
        .route("/leagues/{id}", web::get().to(get_league))
        .route("/leagues/{id}/trainers", web::get().to(list_trainers))
        .route("/leagues/{id}/standings", web::get().to(get_standings))
        .route("/leagues/{id}/matches", web::get().to(list_matches));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_query_round_is_optional() {
        let query: CalendarQuery = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(query.round, None);

        let query: CalendarQuery = serde_json::from_str(r#"{"round":3}"#).unwrap();
        assert_eq!(query.round, Some(3));
    }
}

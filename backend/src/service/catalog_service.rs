use tracing::debug;
use uuid::Uuid;

use crate::api_error::ApiError;
use crate::db::DbPool;
use crate::models::{League, LeagueRow, Season, Split, Trainer};

/// Read-only access to seasons, splits, leagues and rosters.
#[derive(Clone)]
pub struct CatalogService {
    db_pool: DbPool,
}

impl CatalogService {
    pub fn new(db_pool: DbPool) -> Self {
        Self { db_pool }
    }

    pub async fn list_seasons(&self) -> Result<Vec<Season>, ApiError> {
        sqlx::query_as::<_, Season>(
            "SELECT id, name, created_at FROM seasons ORDER BY created_at DESC",
        )
        .fetch_all(&self.db_pool)
        .await
        .map_err(ApiError::database_error)
    }

    pub async fn list_splits(&self, season_id: Uuid) -> Result<Vec<Split>, ApiError> {
        sqlx::query_as::<_, Split>(
            "SELECT id, season_id, name, number FROM splits WHERE season_id = $1 ORDER BY number",
        )
        .bind(season_id)
        .fetch_all(&self.db_pool)
        .await
        .map_err(ApiError::database_error)
    }

    /// Leagues of a split, Primera first. The tier is resolved here, once.
    pub async fn list_leagues(&self, split_id: Uuid) -> Result<Vec<League>, ApiError> {
        let rows = sqlx::query_as::<_, LeagueRow>(
            "SELECT id, split_id, name, priority FROM leagues WHERE split_id = $1 ORDER BY priority",
        )
        .bind(split_id)
        .fetch_all(&self.db_pool)
        .await
        .map_err(ApiError::database_error)?;

        debug!(split_id = %split_id, count = rows.len(), "Loaded leagues");

        rows.into_iter()
            .map(|row| League::try_from(row).map_err(ApiError::from))
            .collect()
    }

    pub async fn get_league(&self, league_id: Uuid) -> Result<League, ApiError> {
        let row = sqlx::query_as::<_, LeagueRow>(
            "SELECT id, split_id, name, priority FROM leagues WHERE id = $1",
        )
        .bind(league_id)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(ApiError::database_error)?
        .ok_or_else(|| ApiError::not_found("League not found"))?;

        Ok(League::try_from(row)?)
    }

    /// Roster of a league, alphabetical.
    pub async fn list_trainers(&self, league_id: Uuid) -> Result<Vec<Trainer>, ApiError> {
        sqlx::query_as::<_, Trainer>(
            r#"
            SELECT t.id, t.nickname, t.avatar_url
            FROM trainers t
            JOIN league_trainers lt ON lt.trainer_id = t.id
            WHERE lt.league_id = $1
            ORDER BY t.nickname
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.db_pool)
        .await
        .map_err(ApiError::database_error)
    }
}

use tracing::{debug, info};
use uuid::Uuid;

use crate::api_error::ApiError;
use crate::db::DbPool;
use crate::engine::rank_standings;
use crate::models::{MatchGroup, MatchRecord, StandingRecord};
use crate::service::match_service::MATCH_COLUMNS;

/// Loads a league snapshot and hands it to the ranking.
#[derive(Clone)]
pub struct StandingsService {
    db_pool: DbPool,
}

impl StandingsService {
    pub fn new(db_pool: DbPool) -> Self {
        Self { db_pool }
    }

    /// Ranked standings of a league, best first.
    pub async fn standings(&self, league_id: Uuid) -> Result<Vec<StandingRecord>, ApiError> {
        let records = self.standing_rows(league_id).await?;
        let played = self.played_regular_matches(league_id).await?;

        debug!(
            league_id = %league_id,
            trainers = records.len(),
            matches = played.len(),
            "Ranking league"
        );

        let ranked = rank_standings(records, &played);

        info!(league_id = %league_id, trainers = ranked.len(), "Standings computed");

        Ok(ranked)
    }

    async fn standing_rows(&self, league_id: Uuid) -> Result<Vec<StandingRecord>, ApiError> {
        sqlx::query_as::<_, StandingRecord>(
            r#"
            SELECT trainer_id, nickname, avatar_url, total_points, total_sets_won,
                   set_balance, matches_played, lives
            FROM league_standings
            WHERE league_id = $1
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.db_pool)
        .await
        .map_err(ApiError::database_error)
    }

    async fn played_regular_matches(&self, league_id: Uuid) -> Result<Vec<MatchRecord>, ApiError> {
        sqlx::query_as::<_, MatchRecord>(&format!(
            "SELECT {} FROM matches WHERE league_id = $1 AND match_group = $2 AND played",
            MATCH_COLUMNS
        ))
        .bind(league_id)
        .bind(MatchGroup::Regular)
        .fetch_all(&self.db_pool)
        .await
        .map_err(ApiError::database_error)
    }
}

use sqlx::{Postgres, Transaction};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::api_error::ApiError;
use crate::db::DbPool;
use crate::models::{CreateMatchRequest, MatchGroup, MatchRecord, NewMatch, RecordResultRequest};
use crate::service::catalog_service::CatalogService;

pub(crate) const MATCH_COLUMNS: &str = "id, league_id, split_id, round, match_group, match_tag, \
     home_trainer_id, away_trainer_id, home_sets, away_sets, played, scheduled_at, created_at";

/// Match calendar reads and the admin CRUD over match rows.
#[derive(Clone)]
pub struct MatchService {
    db_pool: DbPool,
    catalog: CatalogService,
}

impl MatchService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            catalog: CatalogService::new(db_pool.clone()),
            db_pool,
        }
    }

    // =============================================================================
    // QUERY METHODS
    // =============================================================================

    /// Calendar of a league, optionally a single round.
    pub async fn list_matches(
        &self,
        league_id: Uuid,
        round: Option<i32>,
    ) -> Result<Vec<MatchRecord>, ApiError> {
        sqlx::query_as::<_, MatchRecord>(&format!(
            r#"
            SELECT {}
            FROM matches
            WHERE league_id = $1 AND ($2::INT IS NULL OR round = $2)
            ORDER BY round, scheduled_at NULLS LAST, created_at
            "#,
            MATCH_COLUMNS
        ))
        .bind(league_id)
        .bind(round)
        .fetch_all(&self.db_pool)
        .await
        .map_err(ApiError::database_error)
    }

    pub async fn get_match(&self, match_id: Uuid) -> Result<MatchRecord, ApiError> {
        sqlx::query_as::<_, MatchRecord>(&format!(
            "SELECT {} FROM matches WHERE id = $1",
            MATCH_COLUMNS
        ))
        .bind(match_id)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(ApiError::database_error)?
        .ok_or_else(|| ApiError::not_found("Match not found"))
    }

    /// Rows of one playoff round of a league, in tag order of insertion.
    pub async fn round_matches(
        &self,
        league_id: Uuid,
        round: i32,
    ) -> Result<Vec<MatchRecord>, ApiError> {
        sqlx::query_as::<_, MatchRecord>(&format!(
            "SELECT {} FROM matches WHERE league_id = $1 AND round = $2 ORDER BY created_at, match_tag",
            MATCH_COLUMNS
        ))
        .bind(league_id)
        .bind(round)
        .fetch_all(&self.db_pool)
        .await
        .map_err(ApiError::database_error)
    }

    // =============================================================================
    // ADMIN COMMANDS
    // =============================================================================

    pub async fn create_match(&self, req: CreateMatchRequest) -> Result<MatchRecord, ApiError> {
        req.validate()?;

        if req.home_trainer_id.is_some() && req.home_trainer_id == req.away_trainer_id {
            return Err(ApiError::bad_request("A trainer cannot face themselves"));
        }

        let league = self.catalog.get_league(req.league_id).await?;

        let new_match = NewMatch {
            league_id: league.id,
            split_id: league.split_id,
            round: req.round,
            match_group: req.match_group,
            match_tag: req.match_tag,
            home_trainer_id: req.home_trainer_id,
            away_trainer_id: req.away_trainer_id,
            scheduled_at: req.scheduled_at,
        };

        let mut tx = self.db_pool.begin().await.map_err(ApiError::database_error)?;
        let mut created = insert_matches(&mut tx, &[new_match]).await?;
        tx.commit().await.map_err(ApiError::database_error)?;

        let record = created
            .pop()
            .ok_or_else(|| ApiError::internal_error("Insert returned no row"))?;

        info!(
            match_id = %record.id,
            league_id = %record.league_id,
            round = record.round,
            group = %record.match_group,
            "Match created"
        );

        Ok(record)
    }

    /// Enter a result. Playoff and regular matches alike cannot end level.
    pub async fn record_result(
        &self,
        match_id: Uuid,
        req: RecordResultRequest,
    ) -> Result<MatchRecord, ApiError> {
        req.validate()?;

        if req.home_sets == req.away_sets {
            return Err(ApiError::bad_request("A match cannot end in a draw"));
        }

        let existing = self.get_match(match_id).await?;
        if existing.home_trainer_id.is_none() || existing.away_trainer_id.is_none() {
            return Err(ApiError::bad_request(
                "Both trainers must be assigned before entering a result",
            ));
        }

        let record = sqlx::query_as::<_, MatchRecord>(&format!(
            r#"
            UPDATE matches
            SET home_sets = $1, away_sets = $2, played = TRUE
            WHERE id = $3
            RETURNING {}
            "#,
            MATCH_COLUMNS
        ))
        .bind(req.home_sets)
        .bind(req.away_sets)
        .bind(match_id)
        .fetch_one(&self.db_pool)
        .await
        .map_err(ApiError::database_error)?;

        info!(
            match_id = %match_id,
            home_sets = req.home_sets,
            away_sets = req.away_sets,
            "Result recorded"
        );

        Ok(record)
    }

    /// Reset a match to unplayed.
    pub async fn clear_result(&self, match_id: Uuid) -> Result<MatchRecord, ApiError> {
        let record = sqlx::query_as::<_, MatchRecord>(&format!(
            r#"
            UPDATE matches
            SET home_sets = NULL, away_sets = NULL, played = FALSE
            WHERE id = $1
            RETURNING {}
            "#,
            MATCH_COLUMNS
        ))
        .bind(match_id)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(ApiError::database_error)?
        .ok_or_else(|| ApiError::not_found("Match not found"))?;

        if record.match_group != MatchGroup::Regular {
            warn!(
                match_id = %match_id,
                tag = record.tag(),
                "Cleared a playoff result; later rounds may need regenerating"
            );
        }

        Ok(record)
    }

    pub async fn delete_match(&self, match_id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(match_id)
            .execute(&self.db_pool)
            .await
            .map_err(ApiError::database_error)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Match not found"));
        }

        info!(match_id = %match_id, "Match deleted");
        Ok(())
    }
}

/// Insert fixtures inside the caller's transaction, returning the stored rows.
pub(crate) async fn insert_matches(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[NewMatch],
) -> Result<Vec<MatchRecord>, ApiError> {
    let sql = format!(
        r#"
        INSERT INTO matches (
            id, league_id, split_id, round, match_group, match_tag,
            home_trainer_id, away_trainer_id, played, scheduled_at
        ) VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, FALSE, $9
        )
        RETURNING {}
        "#,
        MATCH_COLUMNS
    );

    let mut inserted = Vec::with_capacity(rows.len());
    for row in rows {
        let record = sqlx::query_as::<_, MatchRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(row.league_id)
            .bind(row.split_id)
            .bind(row.round)
            .bind(row.match_group)
            .bind(row.match_tag.as_deref())
            .bind(row.home_trainer_id)
            .bind(row.away_trainer_id)
            .bind(row.scheduled_at)
            .fetch_one(&mut **tx)
            .await
            .map_err(slot_conflict)?;
        inserted.push(record);
    }

    Ok(inserted)
}

/// A second fixture for the same tag and round violates `idx_matches_slot`.
fn slot_conflict(err: sqlx::Error) -> ApiError {
    let duplicate = err
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);

    if duplicate {
        ApiError::conflict("A match with this tag already exists in this round")
    } else {
        ApiError::database_error(err)
    }
}

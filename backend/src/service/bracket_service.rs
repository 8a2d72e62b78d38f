use tracing::{info, warn};
use uuid::Uuid;

use crate::api_error::ApiError;
use crate::config::PlayoffRounds;
use crate::db::DbPool;
use crate::engine::{self, DataError};
use crate::models::{
    BracketStage, BracketStatus, BracketView, DivisionTier, MatchGroup, MatchRecord,
};
use crate::service::catalog_service::CatalogService;
use crate::service::match_service::{insert_matches, MatchService};
use crate::service::standings_service::StandingsService;

/// Public bracket views and the admin "generate round" actions.
#[derive(Clone)]
pub struct BracketService {
    db_pool: DbPool,
    rounds: PlayoffRounds,
    catalog: CatalogService,
    standings: StandingsService,
    matches: MatchService,
}

impl BracketService {
    pub fn new(db_pool: DbPool, rounds: PlayoffRounds) -> Self {
        Self {
            catalog: CatalogService::new(db_pool.clone()),
            standings: StandingsService::new(db_pool.clone()),
            matches: MatchService::new(db_pool.clone()),
            db_pool,
            rounds,
        }
    }

    // =============================================================================
    // PUBLIC VIEWS
    // =============================================================================

    /// The cut as stored, or projected from the current standings before it
    /// is generated.
    pub async fn cut_bracket(&self, league_id: Uuid) -> Result<BracketView, ApiError> {
        self.catalog.get_league(league_id).await?;
        let cut = self.playoff_rows(league_id, self.rounds.cut_round).await?;
        let ranking = self.standings.standings(league_id).await?;

        let (status, result) = if cut.is_empty() {
            (BracketStatus::Projected, engine::cut_matchups(&ranking))
        } else {
            (BracketStatus::Live, engine::stored_matchups(&cut, &ranking))
        };

        Ok(match result {
            Ok(matchups) => BracketView {
                stage: BracketStage::Cut,
                status,
                matchups,
                message: None,
            },
            Err(err) => coming_soon(BracketStage::Cut, league_id, err),
        })
    }

    /// Finals as stored once generated. Before that, derived from the cut
    /// results with placeholders for slots whose source match is pending.
    pub async fn finals_bracket(&self, league_id: Uuid) -> Result<BracketView, ApiError> {
        let league = self.catalog.get_league(league_id).await?;
        let finals = self.playoff_rows(league_id, self.rounds.finals_round).await?;
        let ranking = self.standings.standings(league_id).await?;

        if !finals.is_empty() {
            return Ok(match engine::stored_matchups(&finals, &ranking) {
                Ok(matchups) => BracketView {
                    stage: BracketStage::Finals,
                    status: BracketStatus::Live,
                    matchups,
                    message: None,
                },
                Err(err) => coming_soon(BracketStage::Finals, league_id, err),
            });
        }

        let cut = self.playoff_rows(league_id, self.rounds.cut_round).await?;
        match engine::finals_matchups(league.tier, &cut, &ranking) {
            Ok(matchups) => Ok(BracketView {
                stage: BracketStage::Finals,
                status: BracketStatus::Projected,
                matchups,
                message: None,
            }),
            Err(DataError::IncompletePriorRound { .. }) => Ok(BracketView {
                stage: BracketStage::Finals,
                status: BracketStatus::Projected,
                matchups: engine::finals_placeholders(league.tier),
                message: None,
            }),
            Err(err) => Ok(coming_soon(BracketStage::Finals, league_id, err)),
        }
    }

    /// Who is currently in contention for the Olympus decider of a split.
    pub async fn olympus(&self, split_id: Uuid) -> Result<BracketView, ApiError> {
        let leagues = self.catalog.list_leagues(split_id).await?;
        let upper = leagues.iter().find(|l| l.tier == DivisionTier::Upper);
        let lower = leagues.iter().find(|l| l.tier == DivisionTier::Lower);

        let (upper, lower) = match (upper, lower) {
            (Some(upper), Some(lower)) => (upper, lower),
            _ => {
                return Ok(BracketView::coming_soon(
                    BracketStage::Olympus,
                    "Olympus needs both a Primera and a Segunda league",
                ))
            }
        };

        let upper_finals = self.playoff_rows(upper.id, self.rounds.finals_round).await?;
        let lower_finals = self.playoff_rows(lower.id, self.rounds.finals_round).await?;
        let upper_ranking = self.standings.standings(upper.id).await?;
        let lower_ranking = self.standings.standings(lower.id).await?;

        match engine::olympus_matchup(&upper_finals, &upper_ranking, &lower_finals, &lower_ranking)
        {
            Ok(matchup) => Ok(BracketView {
                stage: BracketStage::Olympus,
                status: BracketStatus::Live,
                matchups: vec![matchup],
                message: None,
            }),
            Err(err) => Ok(coming_soon(BracketStage::Olympus, split_id, err)),
        }
    }

    // =============================================================================
    // ADMIN: GENERATE ROUNDS
    // =============================================================================

    /// Insert the four cut fixtures from the current standings.
    pub async fn generate_cut(&self, league_id: Uuid) -> Result<Vec<MatchRecord>, ApiError> {
        let league = self.catalog.get_league(league_id).await?;

        if !self.playoff_rows(league_id, self.rounds.cut_round).await?.is_empty() {
            return Err(ApiError::conflict("The playoff cut is already generated"));
        }

        let ranking = self.standings.standings(league_id).await?;
        let rows = engine::generate_cut(&league, &ranking, self.rounds.cut_round)?;

        let mut tx = self.db_pool.begin().await.map_err(ApiError::database_error)?;
        let created = insert_matches(&mut tx, &rows).await?;
        tx.commit().await.map_err(ApiError::database_error)?;

        info!(
            league_id = %league_id,
            tier = %league.tier,
            round = self.rounds.cut_round,
            "Playoff cut generated"
        );

        Ok(created)
    }

    /// Insert the four finals fixtures. Every cut match must be played.
    pub async fn generate_finals(&self, league_id: Uuid) -> Result<Vec<MatchRecord>, ApiError> {
        let league = self.catalog.get_league(league_id).await?;

        if !self.playoff_rows(league_id, self.rounds.finals_round).await?.is_empty() {
            return Err(ApiError::conflict("The playoff finals are already generated"));
        }

        let cut = self.playoff_rows(league_id, self.rounds.cut_round).await?;
        let rows = engine::generate_finals(&league, &cut, self.rounds.finals_round)?;

        let mut tx = self.db_pool.begin().await.map_err(ApiError::database_error)?;
        let created = insert_matches(&mut tx, &rows).await?;
        tx.commit().await.map_err(ApiError::database_error)?;

        info!(
            league_id = %league_id,
            tier = %league.tier,
            round = self.rounds.finals_round,
            "Playoff finals generated"
        );

        Ok(created)
    }

    // =============================================================================
    // HELPER METHODS
    // =============================================================================

    /// Bracket rows of a playoff round. The hand-made Olympus fixture is not
    /// part of either bracket.
    async fn playoff_rows(&self, league_id: Uuid, round: i32) -> Result<Vec<MatchRecord>, ApiError> {
        let rows = self.matches.round_matches(league_id, round).await?;
        Ok(rows
            .into_iter()
            .filter(|m| matches!(m.match_group, MatchGroup::Upper | MatchGroup::Lower))
            .collect())
    }
}

fn coming_soon(stage: BracketStage, scope_id: Uuid, err: DataError) -> BracketView {
    warn!(scope_id = %scope_id, stage = ?stage, error = %err, "Bracket not available yet");
    BracketView::coming_soon(stage, err.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coming_soon_carries_actionable_message() {
        let view = coming_soon(
            BracketStage::Cut,
            Uuid::new_v4(),
            DataError::InsufficientParticipants { required: 8, found: 5 },
        );

        assert_eq!(view.status, BracketStatus::ComingSoon);
        assert!(view.matchups.is_empty());
        assert_eq!(
            view.message.as_deref(),
            Some("need 8 ranked participants to generate playoffs")
        );
    }
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trainer {
    pub id: Uuid,
    pub nickname: String,
    pub avatar_url: Option<String>,
}

/// Per-(league, trainer) aggregate row. Totals are summed by the
/// `league_standings` view; `position` is only ever set by the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StandingRecord {
    pub trainer_id: Uuid,
    pub nickname: String,
    pub avatar_url: Option<String>,
    pub total_points: i32,
    pub total_sets_won: i32,
    pub set_balance: i32,
    pub matches_played: i32,
    pub lives: i32,
    #[sqlx(skip)]
    pub position: Option<u32>,
}

impl StandingRecord {
    /// A record with zeroed stats, as for a trainer who has not played yet.
    pub fn new(trainer_id: Uuid, nickname: impl Into<String>) -> Self {
        Self {
            trainer_id,
            nickname: nickname.into(),
            avatar_url: None,
            total_points: 0,
            total_sets_won: 0,
            set_balance: 0,
            matches_played: 0,
            lives: 0,
            position: None,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::engine::DataError;

/// Which competition a fixture belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "match_group", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchGroup {
    Regular,
    /// Championship track of the playoffs.
    Upper,
    /// Survival track of the playoffs.
    Lower,
    /// Cross-division decider, always created by hand.
    Olympus,
}

impl MatchGroup {
    pub fn is_playoff(&self) -> bool {
        !matches!(self, MatchGroup::Regular)
    }
}

impl std::fmt::Display for MatchGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchGroup::Regular => write!(f, "regular"),
            MatchGroup::Upper => write!(f, "upper"),
            MatchGroup::Lower => write!(f, "lower"),
            MatchGroup::Olympus => write!(f, "olympus"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MatchRecord {
    pub id: Uuid,
    pub league_id: Uuid,
    pub split_id: Uuid,
    pub round: i32,
    pub match_group: MatchGroup,
    pub match_tag: Option<String>,
    pub home_trainer_id: Option<Uuid>,
    pub away_trainer_id: Option<Uuid>,
    pub home_sets: Option<i32>,
    pub away_sets: Option<i32>,
    pub played: bool,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Winner and loser of a decided match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Uuid,
    pub loser: Uuid,
}

impl MatchRecord {
    pub fn tag(&self) -> &str {
        self.match_tag.as_deref().unwrap_or("")
    }

    pub fn involves(&self, trainer_id: Uuid) -> bool {
        self.home_trainer_id == Some(trainer_id) || self.away_trainer_id == Some(trainer_id)
    }

    /// Sets won by `trainer_id` in this match, if they took part.
    pub fn sets_won_by(&self, trainer_id: Uuid) -> Option<i32> {
        if self.home_trainer_id == Some(trainer_id) {
            Some(self.home_sets.unwrap_or(0))
        } else if self.away_trainer_id == Some(trainer_id) {
            Some(self.away_sets.unwrap_or(0))
        } else {
            None
        }
    }

    /// Resolve winner and loser. `Ok(None)` while the match is unplayed;
    /// a played draw is inconsistent data.
    pub fn outcome(&self) -> Result<Option<Outcome>, DataError> {
        if !self.played {
            return Ok(None);
        }

        let (home, away) = match (self.home_trainer_id, self.away_trainer_id) {
            (Some(home), Some(away)) => (home, away),
            _ => {
                return Err(DataError::UnresolvedTrainer {
                    tag: self.tag().to_string(),
                })
            }
        };

        let home_sets = self.home_sets.unwrap_or(0);
        let away_sets = self.away_sets.unwrap_or(0);

        if home_sets > away_sets {
            Ok(Some(Outcome { winner: home, loser: away }))
        } else if away_sets > home_sets {
            Ok(Some(Outcome { winner: away, loser: home }))
        } else {
            Err(DataError::DrawnResult {
                tag: self.tag().to_string(),
            })
        }
    }
}

/// A fixture ready to be inserted, always unplayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMatch {
    pub league_id: Uuid,
    pub split_id: Uuid,
    pub round: i32,
    pub match_group: MatchGroup,
    pub match_tag: Option<String>,
    pub home_trainer_id: Option<Uuid>,
    pub away_trainer_id: Option<Uuid>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

// ===== API DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMatchRequest {
    pub league_id: Uuid,
    #[validate(range(min = 1))]
    pub round: i32,
    pub match_group: MatchGroup,
    #[validate(length(min = 1, max = 32))]
    pub match_tag: Option<String>,
    pub home_trainer_id: Option<Uuid>,
    pub away_trainer_id: Option<Uuid>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordResultRequest {
    #[validate(range(min = 0, max = 3))]
    pub home_sets: i32,
    #[validate(range(min = 0, max = 3))]
    pub away_sets: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played(home: Uuid, home_sets: i32, away: Uuid, away_sets: i32) -> MatchRecord {
        MatchRecord {
            id: Uuid::new_v4(),
            league_id: Uuid::nil(),
            split_id: Uuid::nil(),
            round: 100,
            match_group: MatchGroup::Upper,
            match_tag: Some("semi_1".to_string()),
            home_trainer_id: Some(home),
            away_trainer_id: Some(away),
            home_sets: Some(home_sets),
            away_sets: Some(away_sets),
            played: true,
            scheduled_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_outcome_home_and_away_wins() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        let outcome = played(a, 2, b, 1).outcome().unwrap().unwrap();
        assert_eq!(outcome, Outcome { winner: a, loser: b });

        let outcome = played(a, 0, b, 2).outcome().unwrap().unwrap();
        assert_eq!(outcome, Outcome { winner: b, loser: a });
    }

    #[test]
    fn test_outcome_unplayed_is_none() {
        let mut record = played(Uuid::new_v4(), 0, Uuid::new_v4(), 0);
        record.played = false;
        record.home_sets = None;
        record.away_sets = None;
        assert_eq!(record.outcome(), Ok(None));
    }

    #[test]
    fn test_played_draw_is_data_error() {
        let record = played(Uuid::new_v4(), 1, Uuid::new_v4(), 1);
        assert_eq!(
            record.outcome(),
            Err(DataError::DrawnResult {
                tag: "semi_1".to_string()
            })
        );
    }

    #[test]
    fn test_sets_won_by() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let record = played(a, 2, b, 1);
        assert_eq!(record.sets_won_by(a), Some(2));
        assert_eq!(record.sets_won_by(b), Some(1));
        assert_eq!(record.sets_won_by(c), None);
    }

    #[test]
    fn test_record_result_validation() {
        let valid = RecordResultRequest { home_sets: 2, away_sets: 1 };
        assert!(Validate::validate(&valid).is_ok());

        let invalid = RecordResultRequest { home_sets: 4, away_sets: -1 };
        assert!(Validate::validate(&invalid).is_err());
    }

    #[test]
    fn test_match_group_serialization() {
        let json = serde_json::to_string(&MatchGroup::Olympus).unwrap();
        assert_eq!(json, "\"olympus\"");
        assert!(MatchGroup::Lower.is_playoff());
        assert!(!MatchGroup::Regular.is_playoff());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::engine::DataError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Season {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A sub-season period with its own leagues and matches.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Split {
    pub id: Uuid,
    pub season_id: Uuid,
    pub name: String,
    pub number: i32,
}

/// The two parallel divisions of a split.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DivisionTier {
    /// "Primera"
    Upper,
    /// "Segunda"
    Lower,
}

impl DivisionTier {
    /// Resolve the tier from the stored league priority (1 = Primera, 2 = Segunda).
    pub fn from_priority(priority: i32) -> Result<Self, DataError> {
        match priority {
            1 => Ok(DivisionTier::Upper),
            2 => Ok(DivisionTier::Lower),
            other => Err(DataError::UnknownTier(other)),
        }
    }

    pub fn priority(&self) -> i32 {
        match self {
            DivisionTier::Upper => 1,
            DivisionTier::Lower => 2,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DivisionTier::Upper => "Primera",
            DivisionTier::Lower => "Segunda",
        }
    }
}

impl std::fmt::Display for DivisionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// League row as stored; the tier is still a bare priority number.
#[derive(Debug, Clone, FromRow)]
pub struct LeagueRow {
    pub id: Uuid,
    pub split_id: Uuid,
    pub name: String,
    pub priority: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    pub id: Uuid,
    pub split_id: Uuid,
    pub name: String,
    pub tier: DivisionTier,
}

impl TryFrom<LeagueRow> for League {
    type Error = DataError;

    fn try_from(row: LeagueRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            split_id: row.split_id,
            name: row.name,
            tier: DivisionTier::from_priority(row.priority)?,
        })
    }
}

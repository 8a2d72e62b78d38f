use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::league::DivisionTier;

/// Stable slot identifiers wiring one playoff round into the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotTag {
    #[serde(rename = "semi_1")]
    Semi1,
    #[serde(rename = "semi_2")]
    Semi2,
    #[serde(rename = "survival_1")]
    Survival1,
    #[serde(rename = "survival_2")]
    Survival2,
    Final,
    ThirdPlace,
    StayUp,
    Honor,
    Promotion,
    SurvivalFinal,
    Olympus,
}

impl SlotTag {
    /// The four slots of the playoff cut, in display order.
    pub const CUT: [SlotTag; 4] = [
        SlotTag::Semi1,
        SlotTag::Semi2,
        SlotTag::Survival1,
        SlotTag::Survival2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotTag::Semi1 => "semi_1",
            SlotTag::Semi2 => "semi_2",
            SlotTag::Survival1 => "survival_1",
            SlotTag::Survival2 => "survival_2",
            SlotTag::Final => "final",
            SlotTag::ThirdPlace => "third_place",
            SlotTag::StayUp => "stay_up",
            SlotTag::Honor => "honor",
            SlotTag::Promotion => "promotion",
            SlotTag::SurvivalFinal => "survival_final",
            SlotTag::Olympus => "olympus",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SlotTag::Semi1 => "Semifinal 1",
            SlotTag::Semi2 => "Semifinal 2",
            SlotTag::Survival1 => "Supervivencia 1",
            SlotTag::Survival2 => "Supervivencia 2",
            SlotTag::Final => "Gran Final",
            SlotTag::ThirdPlace => "Tercer Puesto",
            SlotTag::StayUp => "Permanencia",
            SlotTag::Honor => "Partido de Honor",
            SlotTag::Promotion => "Por el Ascenso",
            SlotTag::SurvivalFinal => "Final Supervivencia",
            SlotTag::Olympus => "Olimpo",
        }
    }

    fn short_name(&self) -> &'static str {
        match self {
            SlotTag::Semi1 => "Semi 1",
            SlotTag::Semi2 => "Semi 2",
            SlotTag::Survival1 => "Superv. 1",
            SlotTag::Survival2 => "Superv. 2",
            SlotTag::Promotion => "Ascenso",
            other => other.title(),
        }
    }

    /// Placeholder label for the winner of this slot, e.g. "Winner Superv. 1".
    pub fn winner_label(&self) -> String {
        format!("Winner {}", self.short_name())
    }

    pub fn loser_label(&self) -> String {
        format!("Loser {}", self.short_name())
    }
}

impl std::fmt::Display for SlotTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SlotTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "semi_1" => Ok(SlotTag::Semi1),
            "semi_2" => Ok(SlotTag::Semi2),
            "survival_1" => Ok(SlotTag::Survival1),
            "survival_2" => Ok(SlotTag::Survival2),
            "final" => Ok(SlotTag::Final),
            "third_place" => Ok(SlotTag::ThirdPlace),
            "stay_up" => Ok(SlotTag::StayUp),
            "honor" => Ok(SlotTag::Honor),
            "promotion" => Ok(SlotTag::Promotion),
            "survival_final" => Ok(SlotTag::SurvivalFinal),
            "olympus" => Ok(SlotTag::Olympus),
            other => Err(format!("unknown slot tag: {}", other)),
        }
    }
}

/// Finals slots for a division tier: (championship, third place, survival
/// winners, survival losers).
pub fn finals_slots(tier: DivisionTier) -> [SlotTag; 4] {
    match tier {
        DivisionTier::Upper => [
            SlotTag::Final,
            SlotTag::ThirdPlace,
            SlotTag::StayUp,
            SlotTag::Honor,
        ],
        DivisionTier::Lower => [
            SlotTag::Promotion,
            SlotTag::ThirdPlace,
            SlotTag::SurvivalFinal,
            SlotTag::Honor,
        ],
    }
}

/// One side of a matchup. A `position` of 0 means the slot is not decided
/// yet and `nickname` carries a placeholder label instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer_id: Option<Uuid>,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub position: u32,
}

impl TeamRef {
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            trainer_id: None,
            nickname: label.into(),
            avatar_url: None,
            position: 0,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.position != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: i32,
    pub away: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub tag: SlotTag,
    pub title: String,
    pub home: TeamRef,
    pub away: TeamRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}

impl Matchup {
    pub fn new(tag: SlotTag, home: TeamRef, away: TeamRef) -> Self {
        Self {
            tag,
            title: tag.title().to_string(),
            home,
            away,
            score: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketStage {
    Cut,
    Finals,
    Olympus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketStatus {
    /// Pairings derived from the current standings, not yet generated.
    Projected,
    /// Pairings backed by stored matches, possibly with placeholders.
    Live,
    /// Input preconditions unmet; render the "coming soon" state.
    ComingSoon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketView {
    pub stage: BracketStage,
    pub status: BracketStatus,
    pub matchups: Vec<Matchup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BracketView {
    pub fn coming_soon(stage: BracketStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            status: BracketStatus::ComingSoon,
            matchups: Vec::new(),
            message: Some(message.into()),
        }
    }
}

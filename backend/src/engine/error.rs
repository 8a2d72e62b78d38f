use thiserror::Error;
use uuid::Uuid;

/// Input data is structurally insufficient or inconsistent for the requested
/// computation. Always recoverable by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("insufficient ranked participants: need {required}, found {found}")]
    InsufficientParticipants { required: usize, found: usize },

    #[error("incomplete prior round: missing {}", .missing.join(", "))]
    IncompletePriorRound { missing: Vec<String> },

    #[error("match {tag} has not been played yet")]
    PendingResult { tag: String },

    #[error("match {tag} is marked as played but ended in a draw")]
    DrawnResult { tag: String },

    #[error("match {tag} has no trainer assigned to one of its slots")]
    UnresolvedTrainer { tag: String },

    #[error("trainer {0} is not part of the league standings")]
    UnknownTrainer(Uuid),

    #[error("unknown league priority {0}")]
    UnknownTier(i32),
}

impl DataError {
    /// Message suitable for the admin panel.
    pub fn user_message(&self) -> String {
        match self {
            DataError::InsufficientParticipants { required, .. } => {
                format!("need {} ranked participants to generate playoffs", required)
            }
            DataError::IncompletePriorRound { .. } => {
                "generate the playoff cut before the finals".to_string()
            }
            DataError::PendingResult { tag } => {
                format!("enter the result of {} before generating the next round", tag)
            }
            DataError::DrawnResult { tag } => {
                format!("{} cannot end in a draw, correct its result", tag)
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_round_lists_missing_tags() {
        let err = DataError::IncompletePriorRound {
            missing: vec!["semi_2".to_string(), "survival_1".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "incomplete prior round: missing semi_2, survival_1"
        );
    }

    #[test]
    fn test_user_message_is_actionable() {
        let err = DataError::InsufficientParticipants { required: 8, found: 6 };
        assert_eq!(
            err.user_message(),
            "need 8 ranked participants to generate playoffs"
        );
    }
}

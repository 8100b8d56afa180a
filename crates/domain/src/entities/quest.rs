//! Quest lifecycle - a forward-only state machine
//!
//! `Inactive -> Active -> Completed`, with timestamps recorded at each
//! transition. The source allowed `startQuest` to silently overwrite an
//! active quest's start timestamp; here re-entrant transitions are rejected
//! with a `DomainError` so callers can decide how loudly to complain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lifecycle status of a quest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestStatus {
    #[default]
    Inactive,
    Active {
        started_at: DateTime<Utc>,
    },
    Completed {
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
}

impl QuestStatus {
    /// Transition to Active. Only valid from Inactive.
    pub fn start(&self, now: DateTime<Utc>) -> Result<QuestStatus, DomainError> {
        match self {
            Self::Inactive => Ok(Self::Active { started_at: now }),
            Self::Active { .. } => Err(DomainError::invalid_transition(
                "quest is already active; start timestamp is not overwritten",
            )),
            Self::Completed { .. } => Err(DomainError::invalid_transition(
                "quest is already completed and cannot be restarted",
            )),
        }
    }

    /// Transition to Completed. Only valid from Active.
    pub fn complete(&self, now: DateTime<Utc>) -> Result<QuestStatus, DomainError> {
        match self {
            Self::Active { started_at } => Ok(Self::Completed {
                started_at: *started_at,
                completed_at: now,
            }),
            Self::Inactive => Err(DomainError::invalid_transition(
                "quest has not been started",
            )),
            Self::Completed { .. } => Err(DomainError::invalid_transition(
                "quest is already completed",
            )),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_only_move_forward() {
        let now = Utc::now();
        let status = QuestStatus::Inactive;

        let active = status.start(now).expect("inactive -> active");
        assert!(active.is_active());

        let completed = active.complete(now).expect("active -> completed");
        assert!(completed.is_completed());

        // No path leads back out of Completed
        assert!(completed.start(now).is_err());
        assert!(completed.complete(now).is_err());
    }

    #[test]
    fn test_restarting_active_quest_is_rejected() {
        let now = Utc::now();
        let active = QuestStatus::Inactive.start(now).expect("start");
        assert!(active.start(now).is_err());
    }

    #[test]
    fn test_completing_unstarted_quest_is_rejected() {
        assert!(QuestStatus::Inactive.complete(Utc::now()).is_err());
    }
}

//! NPC narrative state - relationship score plus a narrative tag
//!
//! The source tracked the score and a free-form string tag (`"aziza_dead"`,
//! `"cranium_insane"`) independently with no reconciliation. Both survive
//! here, deliberately separate: the tag is authorial flavor written by
//! consequence effects, the score is the mechanical value collaborators
//! read. The open-ended strings are replaced by a closed `NarrativeTag`
//! enum shared across NPCs so authors can reuse tags.

use serde::{Deserialize, Serialize};

use crate::entities::skill::SkillName;

/// Story state of an NPC, shared across the whole cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeTag {
    #[default]
    Alive,
    Befriended,
    Romanced,
    Freed,
    Corrupted,
    Insane,
    Dead,
    Departed,
}

/// Mutable per-NPC state on the player profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcState {
    /// Mechanical relationship score, clamped to `[-100, 100]`
    pub score: i32,
    /// Authorial story tag; last write wins
    pub tag: NarrativeTag,
}

impl NpcState {
    pub const MIN_SCORE: i32 = -100;
    pub const MAX_SCORE: i32 = 100;

    /// Adds `delta` to the relationship score, clamping to the valid range
    pub fn adjust_score(&mut self, delta: i32) {
        self.score = (self.score + delta).clamp(Self::MIN_SCORE, Self::MAX_SCORE);
    }
}

/// Lingering psychological states set by consequences
///
/// Setting a state also nudges a skill; the mapping lives here so the
/// coupling is visible next to the states themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PsychologicalState {
    Guilt,
    Depression,
    Euphoria,
    Resolve,
}

impl PsychologicalState {
    /// The skill adjustment applied when this state is first set
    pub fn skill_effect(&self) -> (SkillName, f64) {
        match self {
            Self::Guilt => (SkillName::Courage, -5.0),
            Self::Depression => (SkillName::Magic, -10.0),
            Self::Euphoria => (SkillName::Magic, 5.0),
            Self::Resolve => (SkillName::Courage, 5.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_clamps_to_range() {
        let mut state = NpcState::default();
        state.adjust_score(80);
        state.adjust_score(50);
        assert_eq!(state.score, 100);
        state.adjust_score(-300);
        assert_eq!(state.score, -100);
    }

    #[test]
    fn test_tag_defaults_to_alive() {
        assert_eq!(NpcState::default().tag, NarrativeTag::Alive);
    }
}

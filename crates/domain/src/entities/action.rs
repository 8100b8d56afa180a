//! Action types - the closed set of semantic events the engine accepts
//!
//! Event sources (UI, mini-games, AI chat) emit these instead of free-form
//! strings, so the dispatcher and the consequence catalog can match on them
//! exhaustively. Anything not in this set simply does not exist to the engine.

use serde::{Deserialize, Serialize};

/// A semantic gameplay event emitted by an external collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    CastSpell,
    SolveRiddle,
    AzizaRiddle,
    DefeatElemental,
    MakeWish,
    ShareStory,
    ShowMercy,
    DeepMeditation,
    ExploreRuins,
    FreeSpirit,
    BreakOath,
    PlayerDeath,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CastSpell => "cast_spell",
            Self::SolveRiddle => "solve_riddle",
            Self::AzizaRiddle => "aziza_riddle",
            Self::DefeatElemental => "defeat_elemental",
            Self::MakeWish => "make_wish",
            Self::ShareStory => "share_story",
            Self::ShowMercy => "show_mercy",
            Self::DeepMeditation => "deep_meditation",
            Self::ExploreRuins => "explore_ruins",
            Self::FreeSpirit => "free_spirit",
            Self::BreakOath => "break_oath",
            Self::PlayerDeath => "player_death",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative depth of an action, reported by the event source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    #[default]
    Surface,
    Profound,
}

/// Context payload accompanying an action event
///
/// All fields are optional; an empty context is valid and common. The
/// `condition` tag is what consequence triggers match against (e.g.
/// `"failed_3_times"` on an `aziza_riddle` event).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionContext {
    /// Condition tag reported by the event source
    pub condition: Option<String>,
    /// Depth of engagement (profound actions earn bonus experience)
    pub depth: Option<Depth>,
    /// How long the action took, in seconds
    pub duration_secs: Option<u64>,
    /// Whether the action expanded the player's consciousness
    pub consciousness_expansion: bool,
    /// Whether the player completed the action without hints
    pub no_hints_used: bool,
}

impl ActionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_depth(mut self, depth: Depth) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_duration_secs(mut self, secs: u64) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    pub fn with_consciousness_expansion(mut self) -> Self {
        self.consciousness_expansion = true;
        self
    }

    pub fn with_no_hints_used(mut self) -> Self {
        self.no_hints_used = true;
        self
    }

    /// Whether the context condition matches the given tag
    pub fn condition_is(&self, tag: &str) -> bool {
        self.condition.as_deref() == Some(tag)
    }
}

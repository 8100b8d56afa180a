//! Skill entities - skill names, level tiers, and per-skill progression state
//!
//! Skills progress from 0 to 100 across six named tiers. The tier thresholds
//! double as the level-up detection table: a gain that crosses one or more
//! thresholds levels the skill up exactly once, to the highest tier reached.

use serde::{Deserialize, Serialize};

use crate::ids::AbilityId;

/// The closed set of player skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillName {
    Magic,
    Lore,
    Empathy,
    Courage,
    Cunning,
}

impl SkillName {
    /// All skills, in display order
    pub const ALL: [SkillName; 5] = [
        Self::Magic,
        Self::Lore,
        Self::Empathy,
        Self::Courage,
        Self::Cunning,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Magic => "Magic",
            Self::Lore => "Lore",
            Self::Empathy => "Empathy",
            Self::Courage => "Courage",
            Self::Cunning => "Cunning",
        }
    }
}

impl std::fmt::Display for SkillName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Named skill tiers, one per level threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Novice,
    Apprentice,
    Adept,
    Expert,
    Master,
    Transcendent,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 6] = [
        Self::Novice,
        Self::Apprentice,
        Self::Adept,
        Self::Expert,
        Self::Master,
        Self::Transcendent,
    ];

    /// Tier index, 0-based (Novice = 0)
    pub fn index(&self) -> usize {
        match self {
            Self::Novice => 0,
            Self::Apprentice => 1,
            Self::Adept => 2,
            Self::Expert => 3,
            Self::Master => 4,
            Self::Transcendent => 5,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Diminishing-returns multiplier applied to gains at this tier.
    ///
    /// Higher-skilled actors gain more slowly, which keeps the unlock
    /// curve from trivializing mastery.
    pub fn stage_multiplier(&self) -> f64 {
        match self {
            Self::Novice => 1.0,
            Self::Apprentice => 0.8,
            Self::Adept => 0.6,
            Self::Expert => 0.4,
            Self::Master => 0.3,
            Self::Transcendent => 0.2,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Apprentice => "Apprentice",
            Self::Adept => "Adept",
            Self::Expert => "Expert",
            Self::Master => "Master",
            Self::Transcendent => "Transcendent",
        }
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Something granted by a level-up
///
/// Recorded idempotently on the profile: granting the same unlock twice
/// must not duplicate entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Unlock {
    /// A boolean ability flag (e.g. `minor_wards`)
    Ability(AbilityId),
    /// A display title (e.g. "Spellweaver")
    Title(String),
    /// A named numeric bonus applied to derived calculations
    Bonus { name: String, amount: f64 },
}

/// Result of applying an experience gain to a skill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainResult {
    /// The gain actually applied, after clamping
    pub applied: f64,
    /// Whether one or more level thresholds were crossed
    pub leveled_up: bool,
    /// The new tier, present only when `leveled_up` is true.
    /// Always the highest tier reached, even if several thresholds
    /// were crossed by a single gain.
    pub new_level: Option<SkillLevel>,
}

/// Per-skill progression state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillState {
    /// Current value, always within `[0, max]`
    pub current: f64,
    /// Upper bound for this skill
    pub max: f64,
}

impl SkillState {
    /// Level thresholds; the tier is the highest threshold at or below `current`
    pub const THRESHOLDS: [f64; 6] = [0.0, 20.0, 40.0, 60.0, 80.0, 100.0];

    pub const DEFAULT_MAX: f64 = 100.0;

    pub fn new() -> Self {
        Self {
            current: 0.0,
            max: Self::DEFAULT_MAX,
        }
    }

    /// Current tier, derived from `current` and the threshold table
    pub fn level(&self) -> SkillLevel {
        let index = Self::THRESHOLDS
            .iter()
            .filter(|threshold| **threshold <= self.current)
            .count()
            .saturating_sub(1);
        SkillLevel::from_index(index)
    }

    /// Applies a (possibly negative) gain, clamping to `[0, max]`.
    ///
    /// Reports at most one level-up per call: a gain that jumps several
    /// thresholds reports only the highest tier reached. Losses never
    /// report a level-up.
    pub fn apply_gain(&mut self, amount: f64) -> GainResult {
        let before_value = self.current;
        let before_level = self.level();

        self.current = (self.current + amount).clamp(0.0, self.max);

        let after_level = self.level();
        let leveled_up = after_level.index() > before_level.index();

        GainResult {
            applied: self.current - before_value,
            leveled_up,
            new_level: leveled_up.then_some(after_level),
        }
    }

    /// Admin reset back to zero. The only sanctioned way a skill
    /// decreases outside an authored consequence effect.
    pub fn reset(&mut self) {
        self.current = 0.0;
    }
}

impl Default for SkillState {
    fn default() -> Self {
        Self::new()
    }
}

/// Rounds to one decimal place, the precision at which gains are recorded
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

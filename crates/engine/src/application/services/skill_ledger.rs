//! Skill Ledger - computes experience gains and level-based unlocks
//!
//! Gains start from the authored base table, stack the context modifiers
//! multiplicatively, then shrink by the stage multiplier of the skill's
//! current tier so mastery stays expensive. The result is recorded to one
//! decimal place and clamped to the skill's range.

use std::sync::Arc;

use tracing::{debug, instrument};

use fateloom_domain::entities::skill::round_to_tenth;
use fateloom_domain::{ActionContext, ActionType, Depth, Profile, SkillLevel, SkillName};
use fateloom_ports::NotificationPort;

use crate::application::content;

/// Gain multiplier for profound-depth actions
const DEPTH_BONUS: f64 = 1.5;
/// Gain multiplier for actions lasting longer than a minute
const DURATION_BONUS: f64 = 1.3;
/// Gain multiplier for consciousness-expanding actions
const CONSCIOUSNESS_BONUS: f64 = 1.2;
/// Duration above which the duration bonus applies, in seconds
const DURATION_BONUS_THRESHOLD_SECS: u64 = 60;

/// Outcome of one experience gain
#[derive(Debug, Clone, PartialEq)]
pub struct SkillGain {
    pub skill: SkillName,
    /// Gain actually applied after rounding and clamping
    pub amount: f64,
    pub leveled_up: bool,
    /// Present only when `leveled_up`; always the highest tier reached
    pub new_level: Option<SkillLevel>,
}

/// Computes experience gains from actions and fires level-up unlocks
pub struct SkillLedger {
    notifier: Arc<dyn NotificationPort>,
}

impl SkillLedger {
    pub fn new(notifier: Arc<dyn NotificationPort>) -> Self {
        Self { notifier }
    }

    /// Applies the experience an action earns for a skill.
    ///
    /// Returns `None` (a no-op, not an error) when the (skill, action)
    /// pair has no base value. Level-ups fire at most once per call, and
    /// unlock recording is idempotent.
    #[instrument(skip(self, profile, context))]
    pub async fn gain_experience(
        &self,
        profile: &mut Profile,
        skill: SkillName,
        action: ActionType,
        context: &ActionContext,
    ) -> Option<SkillGain> {
        let base = content::base_gain(skill, action)?;

        let mut modifier = 1.0;
        if context.depth == Some(Depth::Profound) {
            modifier *= DEPTH_BONUS;
        }
        if context
            .duration_secs
            .is_some_and(|secs| secs > DURATION_BONUS_THRESHOLD_SECS)
        {
            modifier *= DURATION_BONUS;
        }
        if context.consciousness_expansion {
            modifier *= CONSCIOUSNESS_BONUS;
        }

        let stage = profile.skill_mut(skill).level().stage_multiplier();
        let amount = round_to_tenth(base * modifier * stage);
        let result = profile.skill_mut(skill).apply_gain(amount);

        debug!(
            skill = %skill,
            action = %action,
            amount = result.applied,
            current = profile.skill_value(skill),
            "Applied experience gain"
        );

        if let Some(new_level) = result.new_level {
            let unlock = content::unlock_for(skill, new_level);
            if let Some(unlock) = &unlock {
                profile.record_unlock(unlock);
            }
            self.notifier.level_up(skill, new_level, unlock).await;
        }

        Some(SkillGain {
            skill,
            amount: result.applied,
            leveled_up: result.leveled_up,
            new_level: result.new_level,
        })
    }
}

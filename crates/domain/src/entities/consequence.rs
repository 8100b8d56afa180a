//! Consequence definitions - authored, static narrative cause-and-effect
//!
//! A `ConsequenceDefinition` is data, not code: a trigger (event + condition)
//! and an ordered list of stages, each with immediate (narrative) and
//! long-term (mechanical) effects. Effects are tagged variants rather than
//! duck-typed objects so the resolver can switch exhaustively.
//!
//! Definitions are never persisted; only `ConsequenceRecord` instances are.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::action::{ActionContext, ActionType};
use crate::entities::alignment::AlignmentAxis;
use crate::entities::npc::{NarrativeTag, PsychologicalState};
use crate::entities::profile::Profile;
use crate::entities::skill::SkillName;
use crate::ids::{
    CinematicId, ConsequenceId, ContentId, ItemId, NpcId, QuestId, SoundId, WorldFlag,
};

/// Severity attached to notification text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Critical,
}

/// When a consequence fires: an exact event match plus a condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsequenceTrigger {
    /// The event type this consequence listens for (exact match)
    pub event: ActionType,
    /// Predicate evaluated against profile + context once the event matches
    pub condition: TriggerCondition,
}

/// Predicate over profile and action context
///
/// The source stubbed this as "always true"; the enum is the extension
/// point authors grow as the consequence catalog needs richer predicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerCondition {
    /// Always matches
    Always,
    /// Context condition tag equals the given tag
    ConditionTag(String),
    /// A skill is at or above a value
    MinSkill { skill: SkillName, value: f64 },
    /// Inventory holds at least `quantity` of an item
    HasItem { item: ItemId, quantity: u32 },
    /// An NPC currently carries a narrative tag
    NpcTagged { npc: NpcId, tag: NarrativeTag },
    /// All sub-conditions match
    AllOf(Vec<TriggerCondition>),
    /// Any sub-condition matches
    AnyOf(Vec<TriggerCondition>),
}

impl TriggerCondition {
    /// Evaluates this condition against the profile and event context
    pub fn evaluate(&self, profile: &Profile, context: &ActionContext) -> bool {
        match self {
            Self::Always => true,
            Self::ConditionTag(tag) => context.condition_is(tag),
            Self::MinSkill { skill, value } => profile.skill_value(*skill) >= *value,
            Self::HasItem { item, quantity } => profile.item_count(item) >= *quantity,
            Self::NpcTagged { npc, tag } => {
                profile.npc_states.get(npc).map(|state| state.tag) == Some(*tag)
            }
            Self::AllOf(conditions) => conditions.iter().all(|c| c.evaluate(profile, context)),
            Self::AnyOf(conditions) => conditions.iter().any(|c| c.evaluate(profile, context)),
        }
    }
}

/// Immediate, presentation-facing effects
///
/// These are forwarded to the notification callbacks; they never mutate
/// the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImmediateEffect {
    /// Banner/toast text for the player
    Notification { text: String, severity: Severity },
    /// An NPC reacts; one line is chosen by the engine's seeded RNG
    NpcReaction { npc: NpcId, lines: Vec<String> },
    /// Kick off a cinematic (presentation-layer collaborator)
    Cinematic(CinematicId),
    /// Play a sound effect (presentation-layer collaborator)
    SoundEffect(SoundId),
}

/// Long-term, mechanical effects applied to the profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LongTermEffect {
    /// Lock content branches (removes them from the unlocked set)
    LockContent(Vec<ContentId>),
    /// Unlock content branches (removes them from the locked set)
    UnlockContent(Vec<ContentId>),
    /// Overwrite an NPC's narrative tag
    SetNpcTag { npc: NpcId, tag: NarrativeTag },
    /// Shift an NPC relationship score
    AdjustRelationship { npc: NpcId, delta: i32 },
    /// Shift an alignment axis
    AdjustAlignment { axis: AlignmentAxis, delta: i32 },
    /// Directly shift a skill value (no level-up unlocks fire from this)
    AdjustSkill { skill: SkillName, delta: f64 },
    /// Set a psychological state; its skill effect applies on first set only
    SetPsychologicalState(PsychologicalState),
    /// Flip a world-state flag
    SetWorldFlag { flag: WorldFlag, value: bool },
    /// Begin a quest
    StartQuest(QuestId),
    /// Add items to the inventory
    GrantItem { item: ItemId, quantity: u32 },
    /// Remove items from the inventory (floors at zero)
    RemoveItem { item: ItemId, quantity: u32 },
    /// Permadeath: destroy all profile state and start over
    ResetProfile,
}

/// One stage of a consequence: immediates first, then long-term effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsequenceStage {
    pub immediate: Vec<ImmediateEffect>,
    pub long_term: Vec<LongTermEffect>,
}

/// An authored consequence, matched and applied by the resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsequenceDefinition {
    pub id: ConsequenceId,
    pub trigger: ConsequenceTrigger,
    /// Stages are applied strictly in order
    pub stages: Vec<ConsequenceStage>,
    /// Irreversible consequences join the point-of-no-return set when applied
    pub reversible: bool,
    /// A reversible consequence may name another consequence that softens
    /// it. The engine never auto-triggers it; a collaborator must.
    pub redemption_path: Option<ConsequenceId>,
}

impl ConsequenceDefinition {
    pub fn new(id: impl Into<ConsequenceId>, event: ActionType) -> Self {
        Self {
            id: id.into(),
            trigger: ConsequenceTrigger {
                event,
                condition: TriggerCondition::Always,
            },
            stages: Vec::new(),
            reversible: true,
            redemption_path: None,
        }
    }

    pub fn with_condition(mut self, condition: TriggerCondition) -> Self {
        self.trigger.condition = condition;
        self
    }

    pub fn with_stage(mut self, stage: ConsequenceStage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn irreversible(mut self) -> Self {
        self.reversible = false;
        self
    }

    pub fn with_redemption_path(mut self, id: impl Into<ConsequenceId>) -> Self {
        self.redemption_path = Some(id.into());
        self
    }
}

/// Persisted record of one consequence application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsequenceRecord {
    pub id: ConsequenceId,
    pub timestamp: DateTime<Utc>,
    /// Condition tag the triggering event carried, if any
    pub context: Option<String>,
    pub reversible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProfileId;

    #[test]
    fn test_condition_tag_evaluation() {
        let profile = Profile::new(ProfileId::new());
        let condition = TriggerCondition::ConditionTag("failed_3_times".to_string());

        let matching = ActionContext::new().with_condition("failed_3_times");
        let other = ActionContext::new().with_condition("failed_once");

        assert!(condition.evaluate(&profile, &matching));
        assert!(!condition.evaluate(&profile, &other));
        assert!(!condition.evaluate(&profile, &ActionContext::new()));
    }

    #[test]
    fn test_min_skill_and_composites() {
        let mut profile = Profile::new(ProfileId::new());
        profile.skill_mut(SkillName::Magic).current = 25.0;
        let context = ActionContext::new();

        let high = TriggerCondition::MinSkill {
            skill: SkillName::Magic,
            value: 20.0,
        };
        let low = TriggerCondition::MinSkill {
            skill: SkillName::Lore,
            value: 1.0,
        };

        assert!(high.evaluate(&profile, &context));
        assert!(!low.evaluate(&profile, &context));
        assert!(TriggerCondition::AnyOf(vec![high.clone(), low.clone()])
            .evaluate(&profile, &context));
        assert!(!TriggerCondition::AllOf(vec![high, low]).evaluate(&profile, &context));
    }

    #[test]
    fn test_has_item_counts_quantity() {
        let mut profile = Profile::new(ProfileId::new());
        profile.add_item(&ItemId::new("beer"), 2);
        let context = ActionContext::new();

        let two = TriggerCondition::HasItem {
            item: ItemId::new("beer"),
            quantity: 2,
        };
        let three = TriggerCondition::HasItem {
            item: ItemId::new("beer"),
            quantity: 3,
        };
        assert!(two.evaluate(&profile, &context));
        assert!(!three.evaluate(&profile, &context));
    }
}

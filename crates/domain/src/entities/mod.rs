pub mod action;
pub mod alignment;
pub mod consequence;
pub mod npc;
pub mod profile;
pub mod quest;
pub mod skill;

pub use action::{ActionContext, ActionType, Depth};
pub use alignment::{Alignment, AlignmentAxis};
pub use consequence::{
    ConsequenceDefinition, ConsequenceRecord, ConsequenceStage, ConsequenceTrigger,
    ImmediateEffect, LongTermEffect, Severity, TriggerCondition,
};
pub use npc::{NarrativeTag, NpcState, PsychologicalState};
pub use profile::Profile;
pub use quest::QuestStatus;
pub use skill::{GainResult, SkillLevel, SkillName, SkillState, Unlock};

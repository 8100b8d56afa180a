pub mod entities;
pub mod error;
pub mod ids;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    ActionContext, ActionType, Alignment, AlignmentAxis, ConsequenceDefinition, ConsequenceRecord,
    ConsequenceStage, ConsequenceTrigger, Depth, GainResult, ImmediateEffect, LongTermEffect,
    NarrativeTag, NpcState, Profile, PsychologicalState, QuestStatus, Severity, SkillLevel,
    SkillName, SkillState, TriggerCondition, Unlock,
};

pub use error::DomainError;
pub use ids::{
    AbilityId, CinematicId, ConsequenceId, ContentId, ItemId, NpcId, ProfileId, QuestId, SoundId,
    WorldFlag,
};

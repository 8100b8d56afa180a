//! Consequence catalog - the authored cause-and-effect table
//!
//! Each entry is pure data; the resolver interprets it. Irreversible
//! entries join the profile's point-of-no-return set the first time they
//! apply and can never fire again for that profile.

use fateloom_domain::{
    ActionType, AlignmentAxis, CinematicId, ConsequenceDefinition, ConsequenceStage, ContentId,
    ImmediateEffect, LongTermEffect, NarrativeTag, NpcId, PsychologicalState, QuestId, Severity,
    SoundId, TriggerCondition, WorldFlag,
};

/// All authored consequences, in no particular order
pub fn consequence_catalog() -> Vec<ConsequenceDefinition> {
    vec![
        aziza_riddle_failure(),
        elemental_slain(),
        elemental_appeased(),
        oath_broken(),
        spirit_freed(),
        player_death(),
    ]
}

/// Failing Aziza's riddle three times closes her questline for good.
fn aziza_riddle_failure() -> ConsequenceDefinition {
    ConsequenceDefinition::new("aziza_riddle_failure", ActionType::AzizaRiddle)
        .with_condition(TriggerCondition::ConditionTag("failed_3_times".to_string()))
        .irreversible()
        .with_stage(ConsequenceStage {
            immediate: vec![
                ImmediateEffect::Notification {
                    text: "Aziza turns away. Some doors close quietly.".to_string(),
                    severity: Severity::Warning,
                },
                ImmediateEffect::NpcReaction {
                    npc: NpcId::new("aziza"),
                    lines: vec![
                        "Three times asked, three times lost.".to_string(),
                        "The riddle was never about the answer.".to_string(),
                        "Seek the lamp another way, if you must.".to_string(),
                    ],
                },
            ],
            long_term: vec![
                LongTermEffect::LockContent(vec![
                    ContentId::new("aziza_lamp_quest"),
                    ContentId::new("aziza_romance"),
                ]),
                LongTermEffect::UnlockContent(vec![ContentId::new("alternative_lamp_path")]),
                LongTermEffect::SetNpcTag {
                    npc: NpcId::new("aziza"),
                    tag: NarrativeTag::Departed,
                },
                LongTermEffect::AdjustRelationship {
                    npc: NpcId::new("aziza"),
                    delta: -20,
                },
                LongTermEffect::SetPsychologicalState(PsychologicalState::Guilt),
            ],
        })
}

/// Slaying the ember elemental scars the wastes, but the wound can heal.
fn elemental_slain() -> ConsequenceDefinition {
    ConsequenceDefinition::new("elemental_slain", ActionType::DefeatElemental)
        .with_redemption_path("elemental_appeased")
        .with_stage(ConsequenceStage {
            immediate: vec![
                ImmediateEffect::Notification {
                    text: "The elemental collapses into cooling ash.".to_string(),
                    severity: Severity::Info,
                },
                ImmediateEffect::SoundEffect(SoundId::new("ember_collapse")),
            ],
            long_term: vec![
                LongTermEffect::SetWorldFlag {
                    flag: WorldFlag::new("ember_wastes_scarred"),
                    value: true,
                },
                LongTermEffect::AdjustAlignment {
                    axis: AlignmentAxis::Chaos,
                    delta: 10,
                },
            ],
        })
}

/// Redemption path for `elemental_slain`; a collaborator must trigger it
/// explicitly (typically from a wish with the right intent).
fn elemental_appeased() -> ConsequenceDefinition {
    ConsequenceDefinition::new("elemental_appeased", ActionType::MakeWish)
        .with_condition(TriggerCondition::ConditionTag(
            "wish_restore_elemental".to_string(),
        ))
        .with_stage(ConsequenceStage {
            immediate: vec![ImmediateEffect::Notification {
                text: "Green returns to the ember wastes, one blade at a time.".to_string(),
                severity: Severity::Success,
            }],
            long_term: vec![
                LongTermEffect::SetWorldFlag {
                    flag: WorldFlag::new("ember_wastes_scarred"),
                    value: false,
                },
                LongTermEffect::AdjustAlignment {
                    axis: AlignmentAxis::Mercy,
                    delta: 10,
                },
                LongTermEffect::SetPsychologicalState(PsychologicalState::Resolve),
            ],
        })
}

/// Breaking the sworn oath drives Cranium into madness. No way back.
fn oath_broken() -> ConsequenceDefinition {
    ConsequenceDefinition::new("oath_broken", ActionType::BreakOath)
        .irreversible()
        .with_stage(ConsequenceStage {
            immediate: vec![
                ImmediateEffect::Notification {
                    text: "Your word, once broken, cannot be reforged.".to_string(),
                    severity: Severity::Critical,
                },
                ImmediateEffect::NpcReaction {
                    npc: NpcId::new("cranium"),
                    lines: vec![
                        "You swore. You SWORE.".to_string(),
                        "The walls whisper your promise back at me.".to_string(),
                    ],
                },
            ],
            long_term: vec![
                LongTermEffect::SetNpcTag {
                    npc: NpcId::new("cranium"),
                    tag: NarrativeTag::Insane,
                },
                LongTermEffect::AdjustRelationship {
                    npc: NpcId::new("cranium"),
                    delta: -40,
                },
                LongTermEffect::LockContent(vec![ContentId::new("cranium_workshop")]),
                LongTermEffect::SetPsychologicalState(PsychologicalState::Depression),
            ],
        })
}

/// Freeing the bottled spirit opens the sanctum and starts its questline.
fn spirit_freed() -> ConsequenceDefinition {
    ConsequenceDefinition::new("spirit_freed", ActionType::FreeSpirit)
        .with_stage(ConsequenceStage {
            immediate: vec![ImmediateEffect::Notification {
                text: "The bottle empties into laughing wind.".to_string(),
                severity: Severity::Success,
            }],
            long_term: vec![
                LongTermEffect::SetNpcTag {
                    npc: NpcId::new("bottled_spirit"),
                    tag: NarrativeTag::Freed,
                },
                LongTermEffect::AdjustRelationship {
                    npc: NpcId::new("bottled_spirit"),
                    delta: 30,
                },
                LongTermEffect::UnlockContent(vec![ContentId::new("spirit_sanctum")]),
                LongTermEffect::StartQuest(QuestId::new("sanctum_pilgrimage")),
                LongTermEffect::AdjustAlignment {
                    axis: AlignmentAxis::Mercy,
                    delta: 15,
                },
            ],
        })
}

/// Permadeath. The one consequence that destroys state instead of
/// mutating it: a deliberate, user-visible game over.
fn player_death() -> ConsequenceDefinition {
    ConsequenceDefinition::new("player_death", ActionType::PlayerDeath)
        .irreversible()
        .with_stage(ConsequenceStage {
            immediate: vec![
                ImmediateEffect::Notification {
                    text: "Your story ends here. The loom begins a new thread.".to_string(),
                    severity: Severity::Critical,
                },
                ImmediateEffect::Cinematic(CinematicId::new("game_over")),
            ],
            long_term: vec![LongTermEffect::ResetProfile],
        })
}

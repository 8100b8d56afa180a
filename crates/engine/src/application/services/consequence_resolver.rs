//! Consequence Resolver - matches events against the catalog and applies effects
//!
//! Resolution is a strict pipeline: look up the definition, guard against
//! re-triggering past the point of no return, match the trigger, then apply
//! each stage in order (immediate effects first, long-term second) and
//! record the application. Unknown ids and non-matches are silent no-ops.
//!
//! Irreversibility is monotonic: once an id enters the point-of-no-return
//! set it stays there, and `can_reverse` returns false forever regardless
//! of what any later definition claims.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use fateloom_domain::{
    ActionContext, ActionType, ConsequenceDefinition, ConsequenceId, ConsequenceRecord,
    ImmediateEffect, LongTermEffect, Profile, Severity,
};
use fateloom_ports::NotificationPort;

use crate::application::services::RelationshipTracker;

/// Matches incoming events against consequence definitions and applies them
pub struct ConsequenceResolver {
    notifier: Arc<dyn NotificationPort>,
    tracker: RelationshipTracker,
    definitions: HashMap<ConsequenceId, ConsequenceDefinition>,
    by_event: HashMap<ActionType, Vec<ConsequenceId>>,
}

impl ConsequenceResolver {
    pub fn new(
        notifier: Arc<dyn NotificationPort>,
        definitions: Vec<ConsequenceDefinition>,
    ) -> Self {
        let mut by_event: HashMap<ActionType, Vec<ConsequenceId>> = HashMap::new();
        for definition in &definitions {
            by_event
                .entry(definition.trigger.event)
                .or_default()
                .push(definition.id.clone());
        }
        Self {
            notifier,
            tracker: RelationshipTracker::new(),
            definitions: definitions
                .into_iter()
                .map(|definition| (definition.id.clone(), definition))
                .collect(),
            by_event,
        }
    }

    pub fn definition(&self, id: &ConsequenceId) -> Option<&ConsequenceDefinition> {
        self.definitions.get(id)
    }

    /// Ids of every definition listening for `event`
    pub fn ids_for_event(&self, event: ActionType) -> Vec<ConsequenceId> {
        self.by_event.get(&event).cloned().unwrap_or_default()
    }

    /// Whether the consequence can still be reversed for this profile.
    ///
    /// False for unknown ids, for definitions authored irreversible, and
    /// for anything already past the point of no return.
    pub fn can_reverse(&self, profile: &Profile, id: &ConsequenceId) -> bool {
        if profile.is_point_of_no_return(id) {
            return false;
        }
        self.definitions
            .get(id)
            .is_some_and(|definition| definition.reversible)
    }

    /// Evaluates and, on a match, applies the consequence.
    ///
    /// Returns whether effects were applied. Unknown ids, trigger
    /// mismatches, failed conditions, and re-triggers past the point of
    /// no return are all safe no-ops.
    #[instrument(skip(self, profile, context, rng, now))]
    pub async fn trigger(
        &self,
        profile: &mut Profile,
        id: &ConsequenceId,
        event: ActionType,
        context: &ActionContext,
        rng: &mut StdRng,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(definition) = self.definitions.get(id) else {
            debug!(consequence = %id, "Unknown consequence id; nothing to do");
            return false;
        };

        // Re-triggering an irreversible consequence must not double-apply
        // its effects.
        if profile.is_point_of_no_return(id) {
            debug!(consequence = %id, "Already past the point of no return; skipping");
            return false;
        }

        if definition.trigger.event != event {
            debug!(
                consequence = %id,
                expected = %definition.trigger.event,
                actual = %event,
                "Trigger event mismatch"
            );
            return false;
        }

        if !definition.trigger.condition.evaluate(profile, context) {
            debug!(consequence = %id, "Trigger condition not met");
            return false;
        }

        info!(consequence = %id, reversible = definition.reversible, "Applying consequence");

        for stage in &definition.stages {
            for effect in &stage.immediate {
                self.apply_immediate(effect, rng).await;
            }
            for effect in &stage.long_term {
                self.apply_long_term(profile, effect, now);
            }
        }

        profile.consequence_history.push(ConsequenceRecord {
            id: id.clone(),
            timestamp: now,
            context: context.condition.clone(),
            reversible: definition.reversible,
        });
        if !definition.reversible {
            profile.point_of_no_return.insert(id.clone());
        }

        true
    }

    async fn apply_immediate(&self, effect: &ImmediateEffect, rng: &mut StdRng) {
        match effect {
            ImmediateEffect::Notification { text, severity } => {
                self.notifier.notify(text.clone(), *severity).await;
            }
            ImmediateEffect::NpcReaction { npc, lines } => {
                if lines.is_empty() {
                    warn!(npc = %npc, "NPC reaction with no lines authored");
                    return;
                }
                let line = &lines[rng.gen_range(0..lines.len())];
                self.notifier
                    .notify(format!("{npc}: {line}"), Severity::Info)
                    .await;
            }
            ImmediateEffect::Cinematic(id) => {
                self.notifier.cinematic(id.clone()).await;
            }
            ImmediateEffect::SoundEffect(id) => {
                // Sound playback is purely presentational; log and move on.
                debug!(sound = %id, "Requested sound effect");
            }
        }
    }

    fn apply_long_term(&self, profile: &mut Profile, effect: &LongTermEffect, now: DateTime<Utc>) {
        match effect {
            LongTermEffect::LockContent(contents) => {
                for content in contents {
                    profile.lock_content(content);
                }
            }
            LongTermEffect::UnlockContent(contents) => {
                for content in contents {
                    profile.unlock_content(content);
                }
            }
            LongTermEffect::SetNpcTag { npc, tag } => {
                self.tracker.update_npc_state(profile, npc, *tag);
            }
            LongTermEffect::AdjustRelationship { npc, delta } => {
                self.tracker.update_relationship(profile, npc, *delta);
            }
            LongTermEffect::AdjustAlignment { axis, delta } => {
                profile.alignment.adjust(*axis, *delta);
            }
            LongTermEffect::AdjustSkill { skill, delta } => {
                // Direct narrative adjustment; level-up unlocks only ever
                // fire through the skill ledger.
                profile.skill_mut(*skill).apply_gain(*delta);
            }
            LongTermEffect::SetPsychologicalState(state) => {
                // The coupled skill effect applies on first set only.
                if profile.psychological_states.insert(*state) {
                    let (skill, delta) = state.skill_effect();
                    profile.skill_mut(skill).apply_gain(delta);
                }
            }
            LongTermEffect::SetWorldFlag { flag, value } => {
                profile.world_flags.insert(flag.clone(), *value);
            }
            LongTermEffect::StartQuest(quest) => {
                self.tracker.start_quest(profile, quest, now);
            }
            LongTermEffect::GrantItem { item, quantity } => {
                self.tracker.add_item(profile, item, *quantity);
            }
            LongTermEffect::RemoveItem { item, quantity } => {
                self.tracker.remove_item(profile, item, *quantity);
            }
            LongTermEffect::ResetProfile => {
                info!(profile = %profile.id, "Permadeath: resetting profile");
                profile.reset();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fateloom_domain::{ConsequenceStage, ContentId, ProfileId, TriggerCondition};
    use fateloom_ports::MockNotificationPort;
    use rand::SeedableRng;

    fn quiet_notifier() -> Arc<MockNotificationPort> {
        let mut mock = MockNotificationPort::new();
        mock.expect_notify().returning(|_, _| ());
        mock.expect_cinematic().returning(|_| ());
        Arc::new(mock)
    }

    fn lock_definition(id: &str, reversible: bool) -> ConsequenceDefinition {
        let definition = ConsequenceDefinition::new(id, ActionType::AzizaRiddle)
            .with_condition(TriggerCondition::ConditionTag("failed_3_times".to_string()))
            .with_stage(ConsequenceStage {
                immediate: vec![],
                long_term: vec![LongTermEffect::LockContent(vec![ContentId::new(
                    "aziza_lamp_quest",
                )])],
            });
        if reversible {
            definition
        } else {
            definition.irreversible()
        }
    }

    #[tokio::test]
    async fn test_unknown_id_is_a_silent_no_op() {
        let resolver = ConsequenceResolver::new(quiet_notifier(), vec![]);
        let mut profile = Profile::new(ProfileId::new());
        let mut rng = StdRng::seed_from_u64(7);

        let applied = resolver
            .trigger(
                &mut profile,
                &ConsequenceId::new("nope"),
                ActionType::CastSpell,
                &ActionContext::new(),
                &mut rng,
                Utc::now(),
            )
            .await;

        assert!(!applied);
        assert!(profile.consequence_history.is_empty());
    }

    #[tokio::test]
    async fn test_condition_mismatch_does_not_apply() {
        let resolver =
            ConsequenceResolver::new(quiet_notifier(), vec![lock_definition("aziza", false)]);
        let mut profile = Profile::new(ProfileId::new());
        let mut rng = StdRng::seed_from_u64(7);

        let applied = resolver
            .trigger(
                &mut profile,
                &ConsequenceId::new("aziza"),
                ActionType::AzizaRiddle,
                &ActionContext::new().with_condition("failed_once"),
                &mut rng,
                Utc::now(),
            )
            .await;

        assert!(!applied);
        assert!(profile.consequence_history.is_empty());
        assert!(!profile.is_locked(&ContentId::new("aziza_lamp_quest")));
    }

    #[tokio::test]
    async fn test_point_of_no_return_is_monotonic() {
        let resolver =
            ConsequenceResolver::new(quiet_notifier(), vec![lock_definition("aziza", false)]);
        let mut profile = Profile::new(ProfileId::new());
        let mut rng = StdRng::seed_from_u64(7);
        let id = ConsequenceId::new("aziza");
        let context = ActionContext::new().with_condition("failed_3_times");

        let first = resolver
            .trigger(&mut profile, &id, ActionType::AzizaRiddle, &context, &mut rng, Utc::now())
            .await;
        assert!(first);
        assert!(profile.is_point_of_no_return(&id));
        assert!(!resolver.can_reverse(&profile, &id));
        assert_eq!(profile.consequence_history.len(), 1);

        // Re-triggering is a safe no-op: no duplicate history, no
        // double-applied effects, and the point of no return stands.
        let second = resolver
            .trigger(&mut profile, &id, ActionType::AzizaRiddle, &context, &mut rng, Utc::now())
            .await;
        assert!(!second);
        assert!(profile.is_point_of_no_return(&id));
        assert_eq!(profile.consequence_history.len(), 1);
    }

    #[tokio::test]
    async fn test_reversible_definition_can_reverse_until_locked() {
        let resolver =
            ConsequenceResolver::new(quiet_notifier(), vec![lock_definition("aziza", true)]);
        let profile = Profile::new(ProfileId::new());
        let id = ConsequenceId::new("aziza");

        assert!(resolver.can_reverse(&profile, &id));
        assert!(!resolver.can_reverse(&profile, &ConsequenceId::new("missing")));
    }

    #[tokio::test]
    async fn test_stages_apply_in_order() {
        // Stage 1 grants 3 beers, stage 2 removes 5; the floor at zero
        // only holds if stage order is respected.
        let definition = ConsequenceDefinition::new("rowdy_night", ActionType::ShareStory)
            .with_stage(ConsequenceStage {
                immediate: vec![],
                long_term: vec![LongTermEffect::GrantItem {
                    item: fateloom_domain::ItemId::new("beer"),
                    quantity: 3,
                }],
            })
            .with_stage(ConsequenceStage {
                immediate: vec![],
                long_term: vec![LongTermEffect::RemoveItem {
                    item: fateloom_domain::ItemId::new("beer"),
                    quantity: 5,
                }],
            });
        let resolver = ConsequenceResolver::new(quiet_notifier(), vec![definition]);
        let mut profile = Profile::new(ProfileId::new());
        let mut rng = StdRng::seed_from_u64(7);

        resolver
            .trigger(
                &mut profile,
                &ConsequenceId::new("rowdy_night"),
                ActionType::ShareStory,
                &ActionContext::new(),
                &mut rng,
                Utc::now(),
            )
            .await;

        assert_eq!(profile.item_count(&fateloom_domain::ItemId::new("beer")), 0);
    }

    #[tokio::test]
    async fn test_psychological_state_effect_applies_once() {
        use fateloom_domain::{PsychologicalState, SkillName};

        let definition = ConsequenceDefinition::new("haunted", ActionType::ExploreRuins)
            .with_stage(ConsequenceStage {
                immediate: vec![],
                long_term: vec![LongTermEffect::SetPsychologicalState(
                    PsychologicalState::Guilt,
                )],
            });
        let resolver = ConsequenceResolver::new(quiet_notifier(), vec![definition]);
        let mut profile = Profile::new(ProfileId::new());
        profile.skill_mut(SkillName::Courage).current = 20.0;
        let mut rng = StdRng::seed_from_u64(7);
        let id = ConsequenceId::new("haunted");

        resolver
            .trigger(&mut profile, &id, ActionType::ExploreRuins, &ActionContext::new(), &mut rng, Utc::now())
            .await;
        assert_eq!(profile.skill_value(SkillName::Courage), 15.0);

        // Reversible definition, so a second trigger re-applies - but the
        // guilt skill penalty is guarded by the state set and stays single.
        resolver
            .trigger(&mut profile, &id, ActionType::ExploreRuins, &ActionContext::new(), &mut rng, Utc::now())
            .await;
        assert_eq!(profile.skill_value(SkillName::Courage), 15.0);
        assert_eq!(profile.consequence_history.len(), 2);
    }

    #[tokio::test]
    async fn test_npc_reaction_line_is_reproducible_with_a_seed() {
        use std::sync::Mutex;

        use fateloom_domain::NpcId;

        let definition = ConsequenceDefinition::new("heckled", ActionType::ShareStory)
            .with_stage(ConsequenceStage {
                immediate: vec![ImmediateEffect::NpcReaction {
                    npc: NpcId::new("innkeeper"),
                    lines: vec![
                        "Heard that one before.".to_string(),
                        "Not bad. Not good either.".to_string(),
                        "Another round, storyteller?".to_string(),
                    ],
                }],
                long_term: vec![],
            });

        let run_once = |definition: ConsequenceDefinition| async move {
            let spoken = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&spoken);
            let mut mock = MockNotificationPort::new();
            mock.expect_notify().returning(move |text, _| {
                sink.lock().expect("sink lock").push(text);
            });

            let resolver = ConsequenceResolver::new(Arc::new(mock), vec![definition]);
            let mut profile = Profile::new(ProfileId::new());
            let mut rng = StdRng::seed_from_u64(42);
            resolver
                .trigger(
                    &mut profile,
                    &ConsequenceId::new("heckled"),
                    ActionType::ShareStory,
                    &ActionContext::new(),
                    &mut rng,
                    Utc::now(),
                )
                .await;
            let lines = spoken.lock().expect("sink lock").clone();
            lines
        };

        let first = run_once(definition.clone()).await;
        let second = run_once(definition).await;
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }
}

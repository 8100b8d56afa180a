//! Trigger Dispatcher - the engine's single entry point
//!
//! Owns the profile for the session and exposes `&mut self` methods, so
//! the compiler enforces the one-writer rule: no two events can mutate
//! the same profile concurrently. Each processed event runs fully in
//! memory (experience, then every matching consequence), bumps the
//! profile version once, and enqueues a background save.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument};

use fateloom_domain::{
    ActionContext, ActionType, ConsequenceId, ConsequenceRecord, ItemId, NarrativeTag, NpcId,
    Profile, ProfileId, QuestId, SkillName,
};
use fateloom_ports::{NotificationPort, ProfileStorePort};

use crate::application::content::consequence_catalog;
use crate::application::save_queue::SaveQueue;
use crate::application::services::{ConsequenceResolver, RelationshipTracker, SkillLedger};

/// Tunables for a dispatcher session
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Seed for NPC reaction line selection; fix it to replay a session
    pub rng_seed: u64,
    pub save_retry_limit: u32,
    pub save_backoff: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rng_seed: rand::random(),
            save_retry_limit: 3,
            save_backoff: Duration::from_millis(250),
        }
    }
}

impl EngineConfig {
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    pub fn with_save_retry_limit(mut self, limit: u32) -> Self {
        self.save_retry_limit = limit;
        self
    }

    pub fn with_save_backoff(mut self, backoff: Duration) -> Self {
        self.save_backoff = backoff;
        self
    }
}

/// Routes gameplay events through the skill ledger and consequence
/// resolver, then persists the result in the background
pub struct TriggerDispatcher {
    profile: Profile,
    ledger: SkillLedger,
    tracker: RelationshipTracker,
    resolver: ConsequenceResolver,
    save_queue: SaveQueue,
    rng: StdRng,
}

impl TriggerDispatcher {
    /// Builds a dispatcher over an already-loaded profile and an explicit
    /// consequence catalog. Most callers want [`Self::connect`].
    pub fn new(
        profile: Profile,
        definitions: Vec<fateloom_domain::ConsequenceDefinition>,
        store: Arc<dyn ProfileStorePort>,
        notifier: Arc<dyn NotificationPort>,
        config: EngineConfig,
    ) -> Self {
        Self {
            profile,
            ledger: SkillLedger::new(Arc::clone(&notifier)),
            tracker: RelationshipTracker::new(),
            resolver: ConsequenceResolver::new(Arc::clone(&notifier), definitions),
            save_queue: SaveQueue::new(store, notifier, config.save_retry_limit, config.save_backoff),
            rng: StdRng::seed_from_u64(config.rng_seed),
        }
    }

    /// Loads the profile (creating a zero-state one on first contact) and
    /// builds a dispatcher over the built-in consequence catalog.
    pub async fn connect(
        profile_id: ProfileId,
        store: Arc<dyn ProfileStorePort>,
        notifier: Arc<dyn NotificationPort>,
        config: EngineConfig,
    ) -> anyhow::Result<Self> {
        let profile = store
            .load(profile_id)
            .await
            .context("Failed to load profile")?
            .unwrap_or_else(|| {
                info!(profile = %profile_id, "No stored profile; starting fresh");
                Profile::new(profile_id)
            });
        Ok(Self::new(
            profile,
            consequence_catalog(),
            store,
            notifier,
            config,
        ))
    }

    // =========================================================================
    // Event processing
    // =========================================================================

    /// Processes one gameplay event: experience first, then every
    /// consequence listening for the action, then a background save.
    #[instrument(skip(self, context))]
    pub async fn on_action(&mut self, action: ActionType, context: ActionContext) {
        if let Some(skill) = crate::application::content::skill_for_action(action) {
            self.ledger
                .gain_experience(&mut self.profile, skill, action, &context)
                .await;
        }

        for id in self.resolver.ids_for_event(action) {
            self.resolver
                .trigger(&mut self.profile, &id, action, &context, &mut self.rng, Utc::now())
                .await;
        }

        self.commit();
    }

    /// Explicitly triggers a single consequence, bypassing event matching
    /// on id. Collaborators use this for redemption paths, which never
    /// fire automatically.
    #[instrument(skip(self, context))]
    pub async fn trigger_consequence(
        &mut self,
        id: &ConsequenceId,
        event: ActionType,
        context: ActionContext,
    ) -> bool {
        let applied = self
            .resolver
            .trigger(&mut self.profile, id, event, &context, &mut self.rng, Utc::now())
            .await;
        if applied {
            self.commit();
        }
        applied
    }

    // =========================================================================
    // Direct commands
    // =========================================================================

    pub fn update_relationship(&mut self, npc: &NpcId, delta: i32) {
        self.tracker.update_relationship(&mut self.profile, npc, delta);
        self.commit();
    }

    pub fn update_npc_state(&mut self, npc: &NpcId, tag: NarrativeTag) {
        self.tracker.update_npc_state(&mut self.profile, npc, tag);
        self.commit();
    }

    pub fn start_quest(&mut self, quest: &QuestId) -> bool {
        let started = self.tracker.start_quest(&mut self.profile, quest, Utc::now());
        self.commit();
        started
    }

    pub fn complete_quest(&mut self, quest: &QuestId) -> bool {
        let completed = self.tracker.complete_quest(&mut self.profile, quest, Utc::now());
        self.commit();
        completed
    }

    pub fn add_item(&mut self, item: &ItemId, quantity: u32) {
        self.tracker.add_item(&mut self.profile, item, quantity);
        self.commit();
    }

    pub fn remove_item(&mut self, item: &ItemId, quantity: u32) {
        self.tracker.remove_item(&mut self.profile, item, quantity);
        self.commit();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn skill(&self, name: SkillName) -> f64 {
        self.profile.skill_value(name)
    }

    pub fn has_ability(&self, ability: &fateloom_domain::AbilityId) -> bool {
        self.profile.has_ability(ability)
    }

    /// Everything that has happened to this profile, oldest first
    pub fn active_consequences(&self) -> &[ConsequenceRecord] {
        &self.profile.consequence_history
    }

    pub fn is_point_of_no_return(&self, id: &ConsequenceId) -> bool {
        self.profile.is_point_of_no_return(id)
    }

    pub fn can_reverse(&self, id: &ConsequenceId) -> bool {
        self.resolver.can_reverse(&self.profile, id)
    }

    fn commit(&mut self) {
        self.profile.bump_version();
        self.save_queue.enqueue(self.profile.clone());
    }
}

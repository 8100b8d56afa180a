//! Relationship & Quest Tracker - NPC state, quest lifecycle, inventory
//!
//! Thin mutations over the profile with the invariants enforced in the
//! domain types: relationship scores clamp, quest transitions only move
//! forward, item counts floor at zero. Guard violations (restarting an
//! active quest, completing one that never started) are logged warnings
//! and leave state untouched; the event path never throws for them.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use fateloom_domain::{ItemId, NarrativeTag, NpcId, Profile, QuestId};

/// Tracks NPC relationships, quest lifecycle, and inventory counts
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipTracker;

impl RelationshipTracker {
    pub fn new() -> Self {
        Self
    }

    /// Adds `delta` to the NPC's relationship score, clamped to `[-100, 100]`
    #[instrument(skip(self, profile))]
    pub fn update_relationship(&self, profile: &mut Profile, npc: &NpcId, delta: i32) {
        let state = profile.npc_states.entry(npc.clone()).or_default();
        state.adjust_score(delta);
        debug!(npc = %npc, delta, score = state.score, "Updated relationship");
    }

    /// Overwrites the NPC's narrative tag; last write wins
    #[instrument(skip(self, profile))]
    pub fn update_npc_state(&self, profile: &mut Profile, npc: &NpcId, tag: NarrativeTag) {
        let state = profile.npc_states.entry(npc.clone()).or_default();
        let previous = state.tag;
        state.tag = tag;
        debug!(npc = %npc, ?previous, ?tag, "Updated NPC narrative tag");
    }

    /// Starts a quest. Returns whether the transition applied; starting an
    /// already-active or completed quest is rejected and logged.
    #[instrument(skip(self, profile))]
    pub fn start_quest(&self, profile: &mut Profile, quest: &QuestId, now: DateTime<Utc>) -> bool {
        let status = profile.quests.entry(quest.clone()).or_default();
        match status.start(now) {
            Ok(next) => {
                *status = next;
                debug!(quest = %quest, "Started quest");
                true
            }
            Err(error) => {
                warn!(quest = %quest, %error, "Ignoring quest start");
                false
            }
        }
    }

    /// Completes a quest. Returns whether the transition applied; only an
    /// active quest can complete.
    #[instrument(skip(self, profile))]
    pub fn complete_quest(
        &self,
        profile: &mut Profile,
        quest: &QuestId,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(status) = profile.quests.get_mut(quest) else {
            warn!(quest = %quest, "Ignoring completion of unknown quest");
            return false;
        };
        match status.complete(now) {
            Ok(next) => {
                *status = next;
                debug!(quest = %quest, "Completed quest");
                true
            }
            Err(error) => {
                warn!(quest = %quest, %error, "Ignoring quest completion");
                false
            }
        }
    }

    /// Adds `quantity` of an item to the inventory
    #[instrument(skip(self, profile))]
    pub fn add_item(&self, profile: &mut Profile, item: &ItemId, quantity: u32) {
        profile.add_item(item, quantity);
        debug!(item = %item, quantity, count = profile.item_count(item), "Added item");
    }

    /// Removes up to `quantity` of an item; the count floors at zero
    #[instrument(skip(self, profile))]
    pub fn remove_item(&self, profile: &mut Profile, item: &ItemId, quantity: u32) {
        profile.remove_item(item, quantity);
        debug!(item = %item, quantity, count = profile.item_count(item), "Removed item");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fateloom_domain::ProfileId;

    #[test]
    fn test_relationship_clamps_to_range() {
        let tracker = RelationshipTracker::new();
        let mut profile = Profile::new(ProfileId::new());
        let aziza = NpcId::new("aziza");

        tracker.update_relationship(&mut profile, &aziza, 80);
        tracker.update_relationship(&mut profile, &aziza, 80);
        assert_eq!(profile.npc_states[&aziza].score, 100);

        tracker.update_relationship(&mut profile, &aziza, -500);
        assert_eq!(profile.npc_states[&aziza].score, -100);
    }

    #[test]
    fn test_npc_tag_last_write_wins() {
        let tracker = RelationshipTracker::new();
        let mut profile = Profile::new(ProfileId::new());
        let aziza = NpcId::new("aziza");

        tracker.update_npc_state(&mut profile, &aziza, NarrativeTag::Befriended);
        tracker.update_npc_state(&mut profile, &aziza, NarrativeTag::Departed);
        assert_eq!(profile.npc_states[&aziza].tag, NarrativeTag::Departed);
    }

    #[test]
    fn test_restart_does_not_overwrite_start_timestamp() {
        let tracker = RelationshipTracker::new();
        let mut profile = Profile::new(ProfileId::new());
        let quest = QuestId::new("lamp_quest");

        let first = Utc::now();
        assert!(tracker.start_quest(&mut profile, &quest, first));

        let later = first + chrono::Duration::hours(1);
        assert!(!tracker.start_quest(&mut profile, &quest, later));

        match profile.quests[&quest] {
            fateloom_domain::QuestStatus::Active { started_at } => {
                assert_eq!(started_at, first);
            }
            other => panic!("expected active quest, got {other:?}"),
        }
    }

    #[test]
    fn test_quest_moves_forward_only() {
        let tracker = RelationshipTracker::new();
        let mut profile = Profile::new(ProfileId::new());
        let quest = QuestId::new("lamp_quest");
        let now = Utc::now();

        // Completing before starting does nothing
        assert!(!tracker.complete_quest(&mut profile, &quest, now));
        assert!(profile.quests.get(&quest).is_none());

        assert!(tracker.start_quest(&mut profile, &quest, now));
        assert!(tracker.complete_quest(&mut profile, &quest, now));
        assert!(profile.quests[&quest].is_completed());

        // Completed is terminal
        assert!(!tracker.start_quest(&mut profile, &quest, now));
        assert!(!tracker.complete_quest(&mut profile, &quest, now));
        assert!(profile.quests[&quest].is_completed());
    }

    #[test]
    fn test_remove_item_floors_at_zero() {
        let tracker = RelationshipTracker::new();
        let mut profile = Profile::new(ProfileId::new());
        let beer = ItemId::new("beer");

        tracker.add_item(&mut profile, &beer, 2);
        tracker.remove_item(&mut profile, &beer, 5);
        assert_eq!(profile.item_count(&beer), 0);
    }
}

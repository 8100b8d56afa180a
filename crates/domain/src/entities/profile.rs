//! Profile aggregate - the single persisted record of all mutable player state
//!
//! One profile per player, created as a zero-state on first event and
//! mutated exclusively through the dispatcher's public API. Ordered
//! collections (BTree) keep serialization deterministic so the persistence
//! round-trip `save(load(p)) == p` holds field for field.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::entities::alignment::Alignment;
use crate::entities::consequence::ConsequenceRecord;
use crate::entities::npc::{NpcState, PsychologicalState};
use crate::entities::quest::QuestStatus;
use crate::entities::skill::{SkillName, SkillState, Unlock};
use crate::ids::{AbilityId, ConsequenceId, ContentId, ItemId, NpcId, ProfileId, QuestId, WorldFlag};

/// The per-player aggregate root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub skills: BTreeMap<SkillName, SkillState>,
    pub inventory: BTreeMap<ItemId, u32>,
    pub quests: BTreeMap<QuestId, QuestStatus>,
    pub npc_states: BTreeMap<NpcId, NpcState>,
    pub alignment: Alignment,
    pub consequence_history: Vec<ConsequenceRecord>,
    /// Consequence ids whose irreversibility is locked in; only ever grows
    pub point_of_no_return: BTreeSet<ConsequenceId>,
    pub locked_content: BTreeSet<ContentId>,
    pub unlocked_content: BTreeSet<ContentId>,
    pub abilities: BTreeSet<AbilityId>,
    pub titles: BTreeSet<String>,
    /// Named numeric bonuses granted by level-ups
    pub bonuses: BTreeMap<String, f64>,
    pub psychological_states: BTreeSet<PsychologicalState>,
    pub world_flags: BTreeMap<WorldFlag, bool>,
    /// Monotonic counter bumped on every mutation batch; the persistence
    /// layer uses it to reject stale writes from a second session.
    pub version: u64,
}

impl Profile {
    /// Zero-state profile with every skill initialized at 0
    pub fn new(id: ProfileId) -> Self {
        Self {
            id,
            skills: SkillName::ALL
                .iter()
                .map(|name| (*name, SkillState::new()))
                .collect(),
            inventory: BTreeMap::new(),
            quests: BTreeMap::new(),
            npc_states: BTreeMap::new(),
            alignment: Alignment::default(),
            consequence_history: Vec::new(),
            point_of_no_return: BTreeSet::new(),
            locked_content: BTreeSet::new(),
            unlocked_content: BTreeSet::new(),
            abilities: BTreeSet::new(),
            titles: BTreeSet::new(),
            bonuses: BTreeMap::new(),
            psychological_states: BTreeSet::new(),
            world_flags: BTreeMap::new(),
            version: 0,
        }
    }

    // =========================================================================
    // Skills
    // =========================================================================

    pub fn skill(&self, name: SkillName) -> Option<&SkillState> {
        self.skills.get(&name)
    }

    pub fn skill_mut(&mut self, name: SkillName) -> &mut SkillState {
        self.skills.entry(name).or_default()
    }

    /// Current value of a skill, 0 if untracked
    pub fn skill_value(&self, name: SkillName) -> f64 {
        self.skills.get(&name).map_or(0.0, |state| state.current)
    }

    /// Records what a level-up granted. Idempotent: granting the same
    /// unlock twice never duplicates entries.
    pub fn record_unlock(&mut self, unlock: &Unlock) {
        match unlock {
            Unlock::Ability(ability) => {
                self.abilities.insert(ability.clone());
            }
            Unlock::Title(title) => {
                self.titles.insert(title.clone());
            }
            Unlock::Bonus { name, amount } => {
                self.bonuses.insert(name.clone(), *amount);
            }
        }
    }

    pub fn has_ability(&self, ability: &AbilityId) -> bool {
        self.abilities.contains(ability)
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    pub fn item_count(&self, item: &ItemId) -> u32 {
        self.inventory.get(item).copied().unwrap_or(0)
    }

    pub fn add_item(&mut self, item: &ItemId, quantity: u32) {
        *self.inventory.entry(item.clone()).or_insert(0) += quantity;
    }

    /// Removes up to `quantity` of an item; the count floors at zero
    pub fn remove_item(&mut self, item: &ItemId, quantity: u32) {
        if let Some(count) = self.inventory.get_mut(item) {
            *count = count.saturating_sub(quantity);
        }
    }

    // =========================================================================
    // Content gating
    // =========================================================================

    pub fn lock_content(&mut self, content: &ContentId) {
        self.unlocked_content.remove(content);
        self.locked_content.insert(content.clone());
    }

    pub fn unlock_content(&mut self, content: &ContentId) {
        self.locked_content.remove(content);
        self.unlocked_content.insert(content.clone());
    }

    pub fn is_locked(&self, content: &ContentId) -> bool {
        self.locked_content.contains(content)
    }

    // =========================================================================
    // Consequences
    // =========================================================================

    pub fn is_point_of_no_return(&self, id: &ConsequenceId) -> bool {
        self.point_of_no_return.contains(id)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Bumps the version counter; called once per processed event
    pub fn bump_version(&mut self) {
        self.version += 1;
    }

    /// Permadeath: destroys all state and starts over.
    ///
    /// The version counter is preserved and bumped rather than zeroed so
    /// stale-write rejection still works across the reset.
    pub fn reset(&mut self) {
        let id = self.id;
        let version = self.version;
        *self = Self::new(id);
        self.version = version + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::skill::SkillLevel;

    #[test]
    fn test_new_profile_is_zero_state() {
        let profile = Profile::new(ProfileId::new());
        for name in SkillName::ALL {
            assert_eq!(profile.skill_value(name), 0.0);
        }
        assert!(profile.consequence_history.is_empty());
        assert_eq!(profile.version, 0);
    }

    #[test]
    fn test_remove_item_floors_at_zero() {
        let mut profile = Profile::new(ProfileId::new());
        let beer = ItemId::new("beer");
        profile.add_item(&beer, 2);
        profile.remove_item(&beer, 5);
        assert_eq!(profile.item_count(&beer), 0);
    }

    #[test]
    fn test_record_unlock_is_idempotent() {
        let mut profile = Profile::new(ProfileId::new());
        let unlock = Unlock::Ability(AbilityId::new("minor_wards"));
        profile.record_unlock(&unlock);
        profile.record_unlock(&unlock);
        assert_eq!(profile.abilities.len(), 1);

        let title = Unlock::Title("Spellweaver".to_string());
        profile.record_unlock(&title);
        profile.record_unlock(&title);
        assert_eq!(profile.titles.len(), 1);
    }

    #[test]
    fn test_lock_and_unlock_are_mutually_exclusive() {
        let mut profile = Profile::new(ProfileId::new());
        let content = ContentId::new("aziza_romance");
        profile.lock_content(&content);
        assert!(profile.is_locked(&content));
        profile.unlock_content(&content);
        assert!(!profile.is_locked(&content));
        assert!(profile.unlocked_content.contains(&content));
    }

    #[test]
    fn test_reset_preserves_identity_and_bumps_version() {
        let mut profile = Profile::new(ProfileId::new());
        let id = profile.id;
        profile.skill_mut(SkillName::Magic).current = 42.0;
        profile.bump_version();
        profile.bump_version();

        profile.reset();

        assert_eq!(profile.id, id);
        assert_eq!(profile.skill_value(SkillName::Magic), 0.0);
        assert_eq!(profile.skill_mut(SkillName::Magic).level(), SkillLevel::Novice);
        assert_eq!(profile.version, 3);
    }

    #[test]
    fn test_serde_round_trip_is_lossless() {
        let mut profile = Profile::new(ProfileId::new());
        profile.skill_mut(SkillName::Magic).current = 23.5;
        profile.add_item(&ItemId::new("lamp"), 1);
        profile.alignment.mercy = 12;
        profile
            .point_of_no_return
            .insert(ConsequenceId::new("aziza_riddle_failure"));
        profile.world_flags.insert(WorldFlag::new("ember_wastes_scarred"), true);
        profile.bump_version();

        let json = serde_json::to_string(&profile).expect("serialize");
        let back: Profile = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, profile);
    }
}

//! Unlock table - what each level-up grants
//!
//! Sparse by design: not every tier of every skill grants something.

use fateloom_domain::{AbilityId, SkillLevel, SkillName, Unlock};

/// The reward for reaching `level` in `skill`, if any
pub fn unlock_for(skill: SkillName, level: SkillLevel) -> Option<Unlock> {
    use SkillLevel::*;
    use SkillName::*;

    let unlock = match (skill, level) {
        (Magic, Apprentice) => Unlock::Ability(AbilityId::new("minor_wards")),
        (Magic, Adept) => Unlock::Ability(AbilityId::new("elemental_sight")),
        (Magic, Expert) => Unlock::Title("Spellweaver".to_string()),
        (Magic, Master) => Unlock::Bonus {
            name: "spell_power".to_string(),
            amount: 1.5,
        },
        (Magic, Transcendent) => Unlock::Title("Archmage of the Loom".to_string()),

        (Lore, Apprentice) => Unlock::Ability(AbilityId::new("read_old_tongue")),
        (Lore, Expert) => Unlock::Title("Keeper of Riddles".to_string()),
        (Lore, Master) => Unlock::Bonus {
            name: "riddle_insight".to_string(),
            amount: 2.0,
        },

        (Empathy, Apprentice) => Unlock::Ability(AbilityId::new("sense_mood")),
        (Empathy, Master) => Unlock::Title("Friend of Spirits".to_string()),

        (Courage, Adept) => Unlock::Ability(AbilityId::new("stand_ground")),
        (Courage, Master) => Unlock::Title("Unflinching".to_string()),

        (Cunning, Adept) => Unlock::Ability(AbilityId::new("silver_tongue")),

        _ => return None,
    };
    Some(unlock)
}

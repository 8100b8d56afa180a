//! Experience tables - base gains per (skill, action) pair and action routing

use fateloom_domain::{ActionType, SkillName};

/// Base experience gained by `skill` for one occurrence of `action`.
///
/// Pairs absent from this table earn nothing; the caller treats `None`
/// as a no-op, not an error.
pub fn base_gain(skill: SkillName, action: ActionType) -> Option<f64> {
    use ActionType::*;
    use SkillName::*;

    let amount = match (skill, action) {
        (Magic, CastSpell) => 5.0,
        (Magic, MakeWish) => 8.0,
        (Magic, DefeatElemental) => 10.0,
        (Magic, FreeSpirit) => 12.0,
        (Magic, DeepMeditation) => 3.0,

        (Lore, SolveRiddle) => 6.0,
        (Lore, AzizaRiddle) => 4.0,
        (Lore, ExploreRuins) => 5.0,
        (Lore, DeepMeditation) => 4.0,

        (Empathy, ShareStory) => 4.0,
        (Empathy, ShowMercy) => 7.0,
        (Empathy, FreeSpirit) => 6.0,

        (Courage, DefeatElemental) => 8.0,
        (Courage, ExploreRuins) => 4.0,

        (Cunning, SolveRiddle) => 3.0,
        (Cunning, BreakOath) => 5.0,

        _ => return None,
    };
    Some(amount)
}

/// Which skill an action primarily trains, for the dispatcher's routing step.
///
/// Actions without an entry (e.g. `player_death`) feed no skill.
pub fn skill_for_action(action: ActionType) -> Option<SkillName> {
    use ActionType::*;

    let skill = match action {
        CastSpell | MakeWish | DeepMeditation => SkillName::Magic,
        SolveRiddle | AzizaRiddle | ExploreRuins => SkillName::Lore,
        ShareStory | ShowMercy | FreeSpirit => SkillName::Empathy,
        DefeatElemental => SkillName::Courage,
        BreakOath => SkillName::Cunning,
        PlayerDeath => return None,
    };
    Some(skill)
}

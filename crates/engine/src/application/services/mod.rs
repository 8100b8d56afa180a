pub mod consequence_resolver;
pub mod relationship_tracker;
pub mod skill_ledger;

pub use consequence_resolver::ConsequenceResolver;
pub use relationship_tracker::RelationshipTracker;
pub use skill_ledger::{SkillGain, SkillLedger};

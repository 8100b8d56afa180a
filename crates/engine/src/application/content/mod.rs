//! Authored game content - static tables the engine evaluates against
//!
//! Everything here is data an author would tune, not engine logic:
//! experience values, action-to-skill routing, level-up rewards, and the
//! consequence catalog.

mod consequences;
mod experience;
mod unlocks;

pub use consequences::consequence_catalog;
pub use experience::{base_gain, skill_for_action};
pub use unlocks::unlock_for;

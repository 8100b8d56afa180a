//! Log-only notification adapter
//!
//! Stands in until an embedding application wires up real presentation.
//! Every callback becomes a structured log line.

use async_trait::async_trait;
use tracing::{info, warn};

use fateloom_domain::{CinematicId, ProfileId, Severity, SkillLevel, SkillName, Unlock};
use fateloom_ports::NotificationPort;

pub struct TracingNotifier;

#[async_trait]
impl NotificationPort for TracingNotifier {
    async fn notify(&self, text: String, severity: Severity) {
        info!(?severity, "{text}");
    }

    async fn level_up(&self, skill: SkillName, level: SkillLevel, unlock: Option<Unlock>) {
        info!(skill = %skill, level = level.display_name(), ?unlock, "Level up");
    }

    async fn cinematic(&self, id: CinematicId) {
        info!(cinematic = %id, "Cinematic requested");
    }

    async fn save_failed(&self, profile_id: ProfileId, reason: String) {
        warn!(profile = %profile_id, reason, "Profile save failed permanently");
    }
}

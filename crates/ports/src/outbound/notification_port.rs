//! Notification Port - outbound port for presentation-layer callbacks
//!
//! The engine reports narrative beats through this port; the embedding
//! application decides how to render them (banners, modals, cinematics).
//! In the source these were all no-op/log stubs, and the built-in
//! `TracingNotifier` adapter keeps that behavior.
//!
//! `save_failed` is the one non-cosmetic callback: persistence failures
//! are surfaced here after retries are exhausted, never thrown into the
//! event-processing path.

use async_trait::async_trait;

use fateloom_domain::{CinematicId, ProfileId, Severity, SkillLevel, SkillName, Unlock};

/// Port for pushing engine events to the presentation layer
///
/// # Testing
///
/// Enable the `testing` feature to get `MockNotificationPort` via mockall.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Show notification text to the player
    async fn notify(&self, text: String, severity: Severity);

    /// A skill reached a new tier
    async fn level_up(&self, skill: SkillName, level: SkillLevel, unlock: Option<Unlock>);

    /// Request a cinematic from the presentation layer
    async fn cinematic(&self, id: CinematicId);

    /// A profile save failed permanently (retries exhausted)
    async fn save_failed(&self, profile_id: ProfileId, reason: String);
}

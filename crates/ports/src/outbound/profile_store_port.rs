//! Profile Store Port - outbound port for profile persistence
//!
//! The engine applies every effect synchronously in memory first; saves go
//! through this port fire-and-forget afterwards. The profile's monotonic
//! version counter lets adapters detect writes from a stale session (a
//! second open tab) and reject them instead of clobbering newer state.

use async_trait::async_trait;
use thiserror::Error;

use fateloom_domain::{Profile, ProfileId};

/// Errors a persistence adapter can report
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A profile with an equal or newer version is already stored.
    /// Not retryable: the in-flight state lost the race.
    #[error("stale write rejected: stored version {stored} >= attempted version {attempted}")]
    StaleVersion { stored: u64, attempted: u64 },

    /// The backend is temporarily unreachable; the save may be retried.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The profile could not be encoded/decoded by the backend.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Whether retrying the same save can possibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Port for loading and saving player profiles
///
/// # Testing
///
/// Enable the `testing` feature to get `MockProfileStorePort` via mockall.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ProfileStorePort: Send + Sync {
    /// Load the stored profile, if one exists
    async fn load(&self, profile_id: ProfileId) -> Result<Option<Profile>, StoreError>;

    /// Save a profile snapshot.
    ///
    /// Adapters must reject the write with [`StoreError::StaleVersion`]
    /// when the stored profile's version is equal or newer.
    async fn save(&self, profile_id: ProfileId, profile: Profile) -> Result<(), StoreError>;
}

//! In-memory profile store
//!
//! The default adapter for embedding and tests. Honors the stale-write
//! contract: a save whose version is not newer than the stored one is
//! rejected, never merged.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use fateloom_domain::{Profile, ProfileId};
use fateloom_ports::{ProfileStorePort, StoreError};

#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<HashMap<ProfileId, Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStorePort for InMemoryProfileStore {
    async fn load(&self, profile_id: ProfileId) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.lock().await.get(&profile_id).cloned())
    }

    async fn save(&self, profile_id: ProfileId, profile: Profile) -> Result<(), StoreError> {
        let mut profiles = self.profiles.lock().await;
        if let Some(stored) = profiles.get(&profile_id) {
            if stored.version >= profile.version {
                return Err(StoreError::StaleVersion {
                    stored: stored.version,
                    attempted: profile.version,
                });
            }
        }
        profiles.insert(profile_id, profile);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = InMemoryProfileStore::new();
        let mut profile = Profile::new(ProfileId::new());
        profile.bump_version();

        store.save(profile.id, profile.clone()).await.expect("save");
        let loaded = store.load(profile.id).await.expect("load");
        assert_eq!(loaded, Some(profile));
    }

    #[tokio::test]
    async fn test_load_of_unknown_profile_is_none() {
        let store = InMemoryProfileStore::new();
        assert_eq!(store.load(ProfileId::new()).await.expect("load"), None);
    }

    #[tokio::test]
    async fn test_stale_write_is_rejected() {
        let store = InMemoryProfileStore::new();
        let mut profile = Profile::new(ProfileId::new());
        profile.version = 5;
        store.save(profile.id, profile.clone()).await.expect("save");

        let mut stale = profile.clone();
        stale.version = 5;
        let result = store.save(profile.id, stale).await;
        assert_eq!(
            result,
            Err(StoreError::StaleVersion {
                stored: 5,
                attempted: 5
            })
        );

        profile.version = 6;
        store.save(profile.id, profile).await.expect("newer save");
    }
}

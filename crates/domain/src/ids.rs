use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

/// Content ids are authored data, keyed by symbolic names rather than
/// generated UUIDs (e.g. `aziza_riddle_failure`), so they wrap a string.
macro_rules! define_key {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

// Player identity
define_id!(ProfileId);

// Authored content keys
define_key!(ConsequenceId);
define_key!(QuestId);
define_key!(NpcId);
define_key!(ItemId);
define_key!(ContentId);
define_key!(AbilityId);
define_key!(CinematicId);
define_key!(SoundId);
define_key!(WorldFlag);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trips_through_serde_as_plain_string() {
        let id = ConsequenceId::new("aziza_riddle_failure");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"aziza_riddle_failure\"");
        let back: ConsequenceId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn test_profile_ids_are_unique() {
        assert_ne!(ProfileId::new(), ProfileId::new());
    }
}

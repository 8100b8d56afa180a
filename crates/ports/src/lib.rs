//! Outbound port traits for the narrative engine
//!
//! The engine never talks to storage or the presentation layer directly;
//! it goes through these traits. Adapters live with the embedding
//! application (or in `fateloom-engine::infrastructure` for the built-in
//! in-memory/logging ones).
//!
//! Enable the `testing` feature to get mockall-generated mocks.

pub mod outbound;

pub use outbound::{NotificationPort, ProfileStorePort, StoreError};

#[cfg(any(test, feature = "testing"))]
pub use outbound::{MockNotificationPort, MockProfileStorePort};

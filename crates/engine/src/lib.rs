//! Fateloom Engine - the narrative state & consequence engine
//!
//! Turns discrete gameplay events into persistent, branching, sometimes
//! irreversible changes to a player profile. The [`TriggerDispatcher`] is
//! the single public entry point; everything external (storage, banners,
//! cinematics) sits behind the ports in `fateloom-ports`.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use fateloom_domain::{ActionContext, ActionType, ProfileId};
//! use fateloom_engine::application::dispatcher::{EngineConfig, TriggerDispatcher};
//! use fateloom_engine::infrastructure::{InMemoryProfileStore, TracingNotifier};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Arc::new(InMemoryProfileStore::new());
//! let notifier = Arc::new(TracingNotifier);
//! let mut dispatcher = TriggerDispatcher::connect(
//!     ProfileId::new(),
//!     store,
//!     notifier,
//!     EngineConfig::default(),
//! )
//! .await?;
//!
//! dispatcher
//!     .on_action(ActionType::CastSpell, ActionContext::new())
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod infrastructure;

pub use application::dispatcher::{EngineConfig, TriggerDispatcher};

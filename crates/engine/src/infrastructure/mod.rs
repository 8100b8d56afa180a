//! Built-in adapters for the outbound ports

mod in_memory;
mod tracing_notifier;

pub use in_memory::InMemoryProfileStore;
pub use tracing_notifier::TracingNotifier;

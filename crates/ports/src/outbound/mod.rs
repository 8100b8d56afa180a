mod notification_port;
mod profile_store_port;

pub use notification_port::NotificationPort;
pub use profile_store_port::{ProfileStorePort, StoreError};

#[cfg(any(test, feature = "testing"))]
pub use notification_port::MockNotificationPort;
#[cfg(any(test, feature = "testing"))]
pub use profile_store_port::MockProfileStorePort;

//! Domain models

pub mod notification;
pub mod settings;
pub mod system;

pub use notification::{Notification, Severity};
pub use settings::ConnectionSettings;
pub use system::{ConnectionStatus, MOCK_ID_PREFIX, System, SystemCategory, SystemStatus};

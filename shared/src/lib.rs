//! Shared types for Flowdeck
//!
//! Domain models used by both the remote workflow client and the
//! application crate, plus small utility functions.

pub mod models;
pub mod util;

// Re-exports
pub use models::{
    ConnectionSettings, ConnectionStatus, MOCK_ID_PREFIX, Notification, Severity, System,
    SystemCategory, SystemStatus,
};

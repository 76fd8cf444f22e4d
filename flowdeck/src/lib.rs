//! Flowdeck — data backbone for an automation-workflow dashboard
//!
//! Owns the canonical list of automation systems and keeps it in sync
//! with a remote n8n-compatible workflow API, falling back to a
//! deterministic demo dataset when no connection is configured or the
//! service is unreachable. The UI layer (cards, charts, toast display,
//! chat panel) consumes published snapshots and the notification bus;
//! nothing here renders.

pub mod assistant;
pub mod export;
pub mod fallback;
pub mod notify;
pub mod settings;
pub mod sync;

// Re-exports
pub use notify::Notifier;
pub use settings::SettingsStore;
pub use sync::{DataSyncController, SyncError, SyncSnapshot};

//! Data-sync controller
//!
//! Reconciles the remote workflow API with the demo dataset under
//! unreliable connectivity and drives the recurring refresh cycle.

mod controller;
mod worker;

pub use controller::{DataSyncController, REFRESH_INTERVAL, SyncError, SyncSnapshot};

//! RefreshWorker — drives the automatic poll cycle
//!
//! Sleeps until the deadline the controller publishes after each poll.
//! A cleared deadline (manual trigger in progress, or an unconfigured
//! deployment) parks the worker until a new one arrives.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::{Duration, Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use super::controller::DataSyncController;

pub(crate) struct RefreshWorker {
    controller: Arc<DataSyncController>,
    deadline_rx: watch::Receiver<Option<Instant>>,
    shutdown: CancellationToken,
}

impl RefreshWorker {
    pub(crate) fn new(
        controller: Arc<DataSyncController>,
        deadline_rx: watch::Receiver<Option<Instant>>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            controller,
            deadline_rx,
            shutdown,
        }
    }

    pub(crate) async fn run(mut self) {
        if self.shutdown.is_cancelled() {
            return;
        }

        tracing::debug!("refresh worker started");

        // First resolution: populate the list before any timer exists.
        self.controller.fetch_system_data(false).await;

        loop {
            let deadline = *self.deadline_rx.borrow_and_update();
            // Placeholder target keeps the select arm well-formed while parked
            let sleep_target = deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                _ = self.shutdown.cancelled() => break,

                changed = self.deadline_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }

                _ = sleep_until(sleep_target), if deadline.is_some() => {
                    self.controller.fetch_system_data(false).await;
                }
            }
        }

        tracing::debug!("refresh worker stopped");
    }
}

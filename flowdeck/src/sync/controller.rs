//! DataSyncController — canonical systems list and connection state machine
//!
//! Owns the single in-memory source of truth for displayed automation
//! records. Poll cycles are serialized: a manual trigger supersedes the
//! pending scheduled poll, and at most one cycle's network calls are in
//! flight at a time. Snapshots are published on a watch channel after
//! every mutation.

use std::sync::Arc;
use std::time::Duration;

use flowdeck_client::{ClientError, RemoteWorkflow, WorkflowApi};
use parking_lot::Mutex;
use shared::util::now_millis;
use shared::{ConnectionStatus, MOCK_ID_PREFIX, System, SystemCategory, SystemStatus};
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::fallback;
use crate::notify::Notifier;
use crate::settings::SettingsStore;
use crate::sync::worker::RefreshWorker;

/// Delay between automatic refresh cycles.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Errors surfaced to direct callers. Poll and toggle failures are
/// reported through the notification bus instead.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("workflow connection is not configured")]
    NotConfigured,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Published view of the controller state.
#[derive(Debug, Clone, Default)]
pub struct SyncSnapshot {
    pub systems: Vec<System>,
    pub connection_status: ConnectionStatus,
    /// Retained message of the last API failure; transport failures
    /// clear it (demo mode is not a reportable error)
    pub error: Option<String>,
    pub is_loading: bool,
    /// Display countdown target (Unix millis). Refresh triggering is
    /// driven by the worker, not by this value.
    pub next_refresh_at: Option<i64>,
    /// Whether the first resolution (remote or fallback) has completed
    pub first_load_done: bool,
}

#[derive(Debug)]
struct SyncState {
    systems: Vec<System>,
    connection_status: ConnectionStatus,
    error: Option<String>,
    is_loading: bool,
    next_refresh_at: Option<i64>,
    first_load_done: bool,
}

impl SyncState {
    fn initial() -> Self {
        Self {
            systems: Vec::new(),
            connection_status: ConnectionStatus::NotConfigured,
            error: None,
            is_loading: true,
            next_refresh_at: None,
            first_load_done: false,
        }
    }

    fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot {
            systems: self.systems.clone(),
            connection_status: self.connection_status,
            error: self.error.clone(),
            is_loading: self.is_loading,
            next_refresh_at: self.next_refresh_at,
            first_load_done: self.first_load_done,
        }
    }
}

/// Data-sync controller for the dashboard.
///
/// Explicitly constructed and dependency-injected: the remote API, the
/// settings store, and the notification bus are passed in, never
/// reached through ambient singletons.
pub struct DataSyncController {
    api: Arc<dyn WorkflowApi>,
    settings: Arc<SettingsStore>,
    notifier: Notifier,
    refresh_interval: Duration,
    state: Mutex<SyncState>,
    snapshot_tx: watch::Sender<SyncSnapshot>,
    /// Deadline for the next automatic poll; `None` parks the worker.
    deadline_tx: watch::Sender<Option<tokio::time::Instant>>,
    /// Serializes poll cycles.
    poll_gate: tokio::sync::Mutex<()>,
    shutdown: CancellationToken,
}

impl DataSyncController {
    pub fn new(api: Arc<dyn WorkflowApi>, settings: Arc<SettingsStore>, notifier: Notifier) -> Self {
        let state = SyncState::initial();
        let (snapshot_tx, _) = watch::channel(state.snapshot());
        let (deadline_tx, _) = watch::channel(None);

        Self {
            api,
            settings,
            notifier,
            refresh_interval: REFRESH_INTERVAL,
            state: Mutex::new(state),
            snapshot_tx,
            deadline_tx,
            poll_gate: tokio::sync::Mutex::new(()),
            shutdown: CancellationToken::new(),
        }
    }

    /// Override the automatic refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Subscribe to state snapshots. The receiver immediately holds the
    /// current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SyncSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> SyncSnapshot {
        self.state.lock().snapshot()
    }

    /// Spawn the automatic refresh worker. The worker runs an immediate
    /// first poll, then follows the published deadline.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let deadline_rx = self.deadline_tx.subscribe();
        let shutdown = self.shutdown.clone();
        let worker = RefreshWorker::new(self, deadline_rx, shutdown);
        tokio::spawn(worker.run())
    }

    /// Stop the refresh worker. The pending timer is dropped and no
    /// further scheduled polls run.
    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    /// Mutate state and publish the resulting snapshot.
    ///
    /// `send_replace` keeps the stored snapshot current even while no
    /// subscriber exists, so a late `subscribe()` never observes a
    /// stale value.
    fn update<R>(&self, mutate: impl FnOnce(&mut SyncState) -> R) -> R {
        let mut state = self.state.lock();
        let result = mutate(&mut state);
        let snapshot = state.snapshot();
        drop(state);
        self.snapshot_tx.send_replace(snapshot);
        result
    }

    /// One poll cycle.
    ///
    /// `manual` marks a user-triggered refresh: it raises the loading
    /// flag and surfaces failures as notifications. Scheduled polls
    /// stay quiet. Entering here clears the pending refresh deadline,
    /// so a manual trigger cancels the scheduled timer.
    pub async fn fetch_system_data(&self, manual: bool) {
        let _gate = self.poll_gate.lock().await;

        self.deadline_tx.send_replace(None);

        if manual {
            self.update(|s| s.is_loading = true);
        }

        let settings = self.settings.current();
        if !settings.is_valid() {
            // No network attempt, no reschedule. An empty list still
            // gets the demo dataset so the dashboard never shows blank.
            self.update(|s| {
                s.connection_status = ConnectionStatus::NotConfigured;
                if s.systems.is_empty() {
                    s.systems = fallback::demo_systems();
                }
                s.is_loading = false;
            });
            return;
        }

        self.update(|s| s.connection_status = ConnectionStatus::Connecting);

        match self.api.list_workflows(&settings).await {
            Ok(workflows) => {
                let merged = merge_remote(workflows);
                self.update(|s| {
                    s.systems = merged;
                    s.connection_status = ConnectionStatus::Connected;
                    s.error = None;
                });
            }
            Err(ClientError::ConnectionFailed) => {
                // Unreachable service means demo mode, not a reportable
                // error: clear any stored message instead of raising one.
                self.update(|s| {
                    s.connection_status = ConnectionStatus::Error;
                    s.error = None;
                    if s.systems.is_empty() {
                        tracing::warn!("workflow service unreachable, loading demo data");
                        s.systems = fallback::demo_systems();
                    }
                });
                if manual {
                    self.notifier.info(
                        "Could not reach the workflow service. Check CORS or whether \
                         the server is running. Showing demo data.",
                    );
                }
            }
            Err(err) => {
                let message = err.to_string();
                tracing::error!("workflow list failed: {message}");
                self.update(|s| {
                    s.connection_status = ConnectionStatus::Error;
                    s.error = Some(message.clone());
                    if s.systems.is_empty() {
                        s.systems = fallback::demo_systems();
                    }
                });
                if manual {
                    self.notifier.error(format!("API error: {message}"));
                }
            }
        }

        let deadline = tokio::time::Instant::now() + self.refresh_interval;
        self.update(|s| {
            s.is_loading = false;
            s.next_refresh_at = Some(now_millis() + self.refresh_interval.as_millis() as i64);
            s.first_load_done = true;
        });
        self.deadline_tx.send_replace(Some(deadline));
    }

    /// Flip a system between active and paused.
    ///
    /// Demo records flip locally and never touch the network, even
    /// while unconfigured. Real records flip only after the remote call
    /// confirms: the UI must never show a status change that did not
    /// happen remotely.
    pub async fn toggle_system_status(&self, id: &str, current_status: SystemStatus) {
        if id.starts_with(MOCK_ID_PREFIX) {
            let new_status = if current_status == SystemStatus::Active {
                SystemStatus::Paused
            } else {
                SystemStatus::Active
            };
            self.update(|s| set_status(&mut s.systems, id, new_status));
            self.notifier.info("Status changed (demo mode).");
            return;
        }

        if !self.settings.is_configured() {
            self.notifier
                .error("Configure the workflow connection before changing system status.");
            return;
        }

        let settings = self.settings.current();
        let currently_active = current_status == SystemStatus::Active;

        match self
            .api
            .set_workflow_active(&settings, id, !currently_active)
            .await
        {
            Ok(()) => {
                let new_status = if currently_active {
                    SystemStatus::Paused
                } else {
                    SystemStatus::Active
                };
                let name = self.update(|s| {
                    set_status(&mut s.systems, id, new_status);
                    s.systems
                        .iter()
                        .find(|system| system.id == id)
                        .map(|system| system.name.clone())
                        .unwrap_or_default()
                });
                let verb = if new_status == SystemStatus::Active {
                    "activated"
                } else {
                    "paused"
                };
                self.notifier.success(format!("System '{name}' {verb}."));
            }
            Err(err) => {
                self.notifier.error(format!("Failed to change status: {err}"));
            }
        }
    }

    /// Fetch one workflow's raw payload for export.
    pub async fn download_workflow(&self, id: &str) -> Result<serde_json::Value, SyncError> {
        if !self.settings.is_configured() {
            return Err(SyncError::NotConfigured);
        }
        let settings = self.settings.current();
        Ok(self.api.get_workflow(&settings, id).await?)
    }
}

/// Merge live identity/status fields with static enrichment fields from
/// the seed table, matched by exact name. The remote API has no notion
/// of an `error` status; only `active`/`paused` map from it.
fn merge_remote(workflows: Vec<RemoteWorkflow>) -> Vec<System> {
    workflows
        .into_iter()
        .map(|flow| {
            let status = if flow.active {
                SystemStatus::Active
            } else {
                SystemStatus::Paused
            };

            match fallback::seed_position(&flow.name) {
                Some((index, seed)) => System {
                    description: seed.description.to_string(),
                    category: fallback::seed_category(index),
                    status,
                    revenue: seed.revenue,
                    conversions: seed.conversions,
                    roi: seed.roi,
                    id: flow.id,
                    name: flow.name,
                },
                None => System {
                    description: format!("Remote workflow with id {}", flow.id),
                    category: SystemCategory::Integrations,
                    status,
                    revenue: 0.0,
                    conversions: 0,
                    roi: 0.0,
                    id: flow.id,
                    name: flow.name,
                },
            }
        })
        .collect()
}

fn set_status(systems: &mut [System], id: &str, status: SystemStatus) {
    if let Some(system) = systems.iter_mut().find(|s| s.id == id) {
        system.status = status;
    }
}

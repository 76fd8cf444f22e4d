//! Integration tests for the data-sync controller, driven by a
//! scripted in-memory workflow API.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use flowdeck::fallback;
use flowdeck::notify::Notifier;
use flowdeck::settings::SettingsStore;
use flowdeck::sync::{DataSyncController, SyncError};
use flowdeck_client::{ClientError, ClientResult, RemoteWorkflow, WorkflowApi};
use parking_lot::Mutex;
use shared::{ConnectionSettings, ConnectionStatus, Notification, Severity, SystemStatus};
use tokio::sync::broadcast;

#[derive(Debug, Clone)]
enum Failure {
    Connection,
    Api(u16, String),
}

impl Failure {
    fn to_client_error(&self) -> ClientError {
        match self {
            Failure::Connection => ClientError::ConnectionFailed,
            Failure::Api(status, message) => ClientError::Api {
                status: *status,
                message: message.clone(),
            },
        }
    }
}

/// Scripted workflow API: returns the configured workflow list or the
/// configured failure, and counts calls.
#[derive(Default)]
struct MockApi {
    workflows: Mutex<Vec<RemoteWorkflow>>,
    list_failure: Mutex<Option<Failure>>,
    toggle_failure: Mutex<Option<Failure>>,
    list_calls: AtomicUsize,
    toggle_calls: AtomicUsize,
}

impl MockApi {
    fn set_workflows(&self, workflows: Vec<RemoteWorkflow>) {
        *self.workflows.lock() = workflows;
    }

    fn fail_list(&self, failure: Failure) {
        *self.list_failure.lock() = Some(failure);
    }

    fn fail_toggle(&self, failure: Failure) {
        *self.toggle_failure.lock() = Some(failure);
    }
}

#[async_trait]
impl WorkflowApi for MockApi {
    async fn list_workflows(
        &self,
        _settings: &ConnectionSettings,
    ) -> ClientResult<Vec<RemoteWorkflow>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.list_failure.lock().as_ref() {
            return Err(failure.to_client_error());
        }
        Ok(self.workflows.lock().clone())
    }

    async fn get_workflow(
        &self,
        _settings: &ConnectionSettings,
        id: &str,
    ) -> ClientResult<serde_json::Value> {
        Ok(serde_json::json!({ "id": id, "nodes": [] }))
    }

    async fn set_workflow_active(
        &self,
        _settings: &ConnectionSettings,
        _id: &str,
        _active: bool,
    ) -> ClientResult<()> {
        self.toggle_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.toggle_failure.lock().as_ref() {
            return Err(failure.to_client_error());
        }
        Ok(())
    }
}

fn configured() -> ConnectionSettings {
    ConnectionSettings {
        api_url: "http://localhost:5678/api/v1".to_string(),
        api_key: "test-key".to_string(),
    }
}

fn unconfigured() -> ConnectionSettings {
    ConnectionSettings {
        api_url: String::new(),
        api_key: String::new(),
    }
}

fn remote(id: &str, name: &str, active: bool) -> RemoteWorkflow {
    RemoteWorkflow {
        id: id.to_string(),
        name: name.to_string(),
        active,
        created_at: None,
        updated_at: None,
    }
}

struct Harness {
    api: Arc<MockApi>,
    settings: Arc<SettingsStore>,
    controller: Arc<DataSyncController>,
    notifications: broadcast::Receiver<Notification>,
}

fn harness(settings: ConnectionSettings) -> Harness {
    let api = Arc::new(MockApi::default());
    let store = Arc::new(SettingsStore::in_memory(settings));
    let notifier = Notifier::new();
    let notifications = notifier.subscribe();
    let controller = Arc::new(DataSyncController::new(
        Arc::clone(&api) as Arc<dyn WorkflowApi>,
        Arc::clone(&store),
        notifier,
    ));
    Harness {
        api,
        settings: store,
        controller,
        notifications,
    }
}

fn drain(notifications: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
    let mut drained = Vec::new();
    while let Ok(notification) = notifications.try_recv() {
        drained.push(notification);
    }
    drained
}

#[tokio::test]
async fn unconfigured_fetch_loads_fallback_without_network() {
    let mut h = harness(unconfigured());

    h.controller.fetch_system_data(false).await;

    let snapshot = h.controller.snapshot();
    assert_eq!(snapshot.connection_status, ConnectionStatus::NotConfigured);
    assert_eq!(h.api.list_calls.load(Ordering::SeqCst), 0);
    assert!(!snapshot.systems.is_empty());
    assert!(snapshot.systems.iter().all(|s| s.is_mock()));
    // No reschedule happens without a configured connection
    assert!(snapshot.next_refresh_at.is_none());
    assert!(drain(&mut h.notifications).is_empty());
}

#[tokio::test]
async fn late_subscriber_receives_current_snapshot() {
    let h = harness(unconfigured());

    // Mutations land before anyone subscribes
    h.controller.fetch_system_data(false).await;

    let rx = h.controller.subscribe();
    let snapshot = rx.borrow().clone();
    assert_eq!(snapshot.systems.len(), fallback::demo_systems().len());
    assert_eq!(snapshot.connection_status, ConnectionStatus::NotConfigured);
    assert!(!snapshot.is_loading);
}

#[tokio::test]
async fn unconfigured_fetch_keeps_previously_loaded_data() {
    let h = harness(configured());
    h.api.set_workflows(vec![remote("wf-1", "Alpha", true)]);

    h.controller.fetch_system_data(false).await;
    assert_eq!(h.controller.snapshot().connection_status, ConnectionStatus::Connected);

    // Settings become invalid: the populated list must survive
    h.settings.save(unconfigured()).unwrap();
    h.controller.fetch_system_data(false).await;

    let snapshot = h.controller.snapshot();
    assert_eq!(snapshot.connection_status, ConnectionStatus::NotConfigured);
    assert_eq!(snapshot.systems.len(), 1);
    assert_eq!(snapshot.systems[0].id, "wf-1");
}

#[tokio::test]
async fn manual_transport_failure_enters_demo_mode_with_notice() {
    let mut h = harness(configured());
    h.api.fail_list(Failure::Connection);

    h.controller.fetch_system_data(true).await;

    let snapshot = h.controller.snapshot();
    assert_eq!(snapshot.connection_status, ConnectionStatus::Error);
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.systems, fallback::demo_systems());
    assert!(snapshot.next_refresh_at.is_some());

    let notifications = drain(&mut h.notifications);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Info);
}

#[tokio::test]
async fn scheduled_transport_failure_stays_quiet() {
    let mut h = harness(configured());
    h.api.fail_list(Failure::Connection);

    h.controller.fetch_system_data(false).await;

    assert_eq!(h.controller.snapshot().connection_status, ConnectionStatus::Error);
    assert!(drain(&mut h.notifications).is_empty());
}

#[tokio::test]
async fn api_failure_retains_message() {
    let mut h = harness(configured());
    h.api.fail_list(Failure::Api(401, "Unauthorized".to_string()));

    h.controller.fetch_system_data(true).await;

    let snapshot = h.controller.snapshot();
    assert_eq!(snapshot.connection_status, ConnectionStatus::Error);
    assert_eq!(snapshot.error.as_deref(), Some("Unauthorized"));
    assert!(!snapshot.systems.is_empty());

    let notifications = drain(&mut h.notifications);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Error);
    assert!(notifications[0].message.contains("Unauthorized"));
}

#[tokio::test]
async fn failed_poll_never_discards_loaded_remote_data() {
    let h = harness(configured());
    h.api.set_workflows(vec![remote("wf-1", "Alpha", true)]);
    h.controller.fetch_system_data(false).await;

    h.api.fail_list(Failure::Connection);
    h.controller.fetch_system_data(false).await;

    let snapshot = h.controller.snapshot();
    assert_eq!(snapshot.connection_status, ConnectionStatus::Error);
    // The previously loaded remote data stays; no demo replacement
    assert_eq!(snapshot.systems.len(), 1);
    assert_eq!(snapshot.systems[0].id, "wf-1");
}

#[tokio::test]
async fn successful_poll_replaces_list_wholesale() {
    let h = harness(configured());
    h.api.set_workflows(vec![
        remote("wf-1", "Alpha", true),
        remote("wf-2", "Beta", false),
    ]);
    h.controller.fetch_system_data(false).await;
    assert_eq!(h.controller.snapshot().systems.len(), 2);

    h.api.set_workflows(vec![remote("wf-3", "Gamma", true)]);
    h.controller.fetch_system_data(false).await;

    let snapshot = h.controller.snapshot();
    assert_eq!(snapshot.systems.len(), 1);
    assert_eq!(snapshot.systems[0].id, "wf-3");
    assert_eq!(snapshot.connection_status, ConnectionStatus::Connected);
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn mock_toggle_flips_locally_without_network() {
    let mut h = harness(unconfigured());
    h.controller.fetch_system_data(false).await;

    // Index 2 of the cycle is paused
    let target = h.controller.snapshot().systems[2].clone();
    assert_eq!(target.status, SystemStatus::Paused);

    h.controller
        .toggle_system_status(&target.id, target.status)
        .await;
    let status = |id: &str| {
        h.controller
            .snapshot()
            .systems
            .iter()
            .find(|s| s.id == id)
            .unwrap()
            .status
    };
    assert_eq!(status(&target.id), SystemStatus::Active);

    h.controller
        .toggle_system_status(&target.id, SystemStatus::Active)
        .await;
    assert_eq!(status(&target.id), SystemStatus::Paused);

    // Even from a local error state the flip lands on active
    let errored = h.controller.snapshot().systems[3].clone();
    assert_eq!(errored.status, SystemStatus::Error);
    h.controller
        .toggle_system_status(&errored.id, errored.status)
        .await;
    assert_eq!(status(&errored.id), SystemStatus::Active);

    assert_eq!(h.api.toggle_calls.load(Ordering::SeqCst), 0);
    let notifications = drain(&mut h.notifications);
    assert_eq!(notifications.len(), 3);
    assert!(notifications.iter().all(|n| n.severity == Severity::Info));
}

#[tokio::test]
async fn real_toggle_without_configuration_only_notifies() {
    let mut h = harness(unconfigured());
    h.controller.fetch_system_data(false).await;
    drain(&mut h.notifications);

    h.controller
        .toggle_system_status("wf-1", SystemStatus::Active)
        .await;

    assert_eq!(h.api.toggle_calls.load(Ordering::SeqCst), 0);
    let notifications = drain(&mut h.notifications);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Error);
}

#[tokio::test]
async fn real_toggle_failure_leaves_status_untouched() {
    let mut h = harness(configured());
    h.api.set_workflows(vec![remote("wf-1", "Alpha", true)]);
    h.controller.fetch_system_data(false).await;
    drain(&mut h.notifications);

    h.api.fail_toggle(Failure::Api(500, "boom".to_string()));
    h.controller
        .toggle_system_status("wf-1", SystemStatus::Active)
        .await;

    let snapshot = h.controller.snapshot();
    assert_eq!(snapshot.systems[0].status, SystemStatus::Active);
    assert_eq!(h.api.toggle_calls.load(Ordering::SeqCst), 1);

    let notifications = drain(&mut h.notifications);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Error);
    assert!(notifications[0].message.contains("boom"));
}

#[tokio::test]
async fn real_toggle_success_flips_and_notifies() {
    let mut h = harness(configured());
    h.api.set_workflows(vec![remote("wf-1", "Alpha", true)]);
    h.controller.fetch_system_data(false).await;
    drain(&mut h.notifications);

    h.controller
        .toggle_system_status("wf-1", SystemStatus::Active)
        .await;

    let snapshot = h.controller.snapshot();
    assert_eq!(snapshot.systems[0].status, SystemStatus::Paused);

    let notifications = drain(&mut h.notifications);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Success);
    assert!(notifications[0].message.contains("Alpha"));
    assert!(notifications[0].message.contains("paused"));
}

#[tokio::test]
async fn download_rejects_when_unconfigured() {
    let h = harness(unconfigured());

    let result = h.controller.download_workflow("wf-1").await;
    assert!(matches!(result, Err(SyncError::NotConfigured)));
}

#[tokio::test]
async fn download_returns_raw_payload() {
    let h = harness(configured());

    let payload = h.controller.download_workflow("wf-1").await.unwrap();
    assert_eq!(payload["id"], "wf-1");
}

/// Let spawned tasks make progress under the paused test clock.
async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn manual_trigger_cancels_pending_timer() {
    let h = harness(configured());
    let worker = Arc::clone(&h.controller).start();

    settle().await;
    assert_eq!(h.api.list_calls.load(Ordering::SeqCst), 1);

    // Manual refresh 10s into the 30s window
    tokio::time::advance(Duration::from_secs(10)).await;
    h.controller.fetch_system_data(true).await;
    assert_eq!(h.api.list_calls.load(Ordering::SeqCst), 2);
    // Let the worker observe the new deadline and drop the old timer
    settle().await;

    // The superseded timer (due at t=30s) must not fire
    tokio::time::advance(Duration::from_secs(25)).await;
    settle().await;
    assert_eq!(h.api.list_calls.load(Ordering::SeqCst), 2);

    // The manual trigger's fresh timer fires at t=40s
    tokio::time::advance(Duration::from_secs(5)).await;
    settle().await;
    assert_eq!(h.api.list_calls.load(Ordering::SeqCst), 3);

    h.controller.stop();
    let _ = worker.await;
}

#[tokio::test(start_paused = true)]
async fn automatic_polls_repeat_on_the_interval() {
    let h = harness(configured());
    let worker = Arc::clone(&h.controller).start();

    settle().await;
    assert_eq!(h.api.list_calls.load(Ordering::SeqCst), 1);

    tokio::time::advance(Duration::from_secs(30)).await;
    settle().await;
    assert_eq!(h.api.list_calls.load(Ordering::SeqCst), 2);

    tokio::time::advance(Duration::from_secs(30)).await;
    settle().await;
    assert_eq!(h.api.list_calls.load(Ordering::SeqCst), 3);

    h.controller.stop();
    let _ = worker.await;
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_scheduled_polls() {
    let h = harness(configured());
    let worker = Arc::clone(&h.controller).start();

    settle().await;
    assert_eq!(h.api.list_calls.load(Ordering::SeqCst), 1);

    h.controller.stop();
    let _ = worker.await;

    tokio::time::advance(Duration::from_secs(120)).await;
    settle().await;
    assert_eq!(h.api.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn unconfigured_worker_does_not_poll() {
    let h = harness(unconfigured());
    let worker = Arc::clone(&h.controller).start();

    settle().await;
    let snapshot = h.controller.snapshot();
    assert_eq!(snapshot.connection_status, ConnectionStatus::NotConfigured);
    assert!(!snapshot.systems.is_empty());

    tokio::time::advance(Duration::from_secs(120)).await;
    settle().await;
    assert_eq!(h.api.list_calls.load(Ordering::SeqCst), 0);

    h.controller.stop();
    let _ = worker.await;
}

use std::sync::Arc;

use flowdeck::{DataSyncController, Notifier, SettingsStore};
use flowdeck_client::HttpWorkflowClient;
use shared::Severity;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Flowdeck starting...");

    let settings_path = std::env::var("FLOWDECK_SETTINGS_PATH")
        .unwrap_or_else(|_| "flowdeck-settings.json".to_string());
    let settings = Arc::new(SettingsStore::open(settings_path));
    if !settings.is_configured() {
        tracing::info!("no workflow connection configured, running in demo mode");
    }

    let notifier = Notifier::new();
    let api = Arc::new(HttpWorkflowClient::new());
    let controller = Arc::new(DataSyncController::new(api, settings, notifier.clone()));

    // Surface toast events in the terminal
    let mut notifications = notifier.subscribe();
    tokio::spawn(async move {
        while let Ok(notification) = notifications.recv().await {
            match notification.severity {
                Severity::Error => tracing::error!("{}", notification.message),
                Severity::Success | Severity::Info => tracing::info!("{}", notification.message),
            }
        }
    });

    // Log connection-state transitions
    let mut snapshots = controller.subscribe();
    tokio::spawn(async move {
        let mut last_status = None;
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            if last_status != Some(snapshot.connection_status) {
                last_status = Some(snapshot.connection_status);
                tracing::info!(
                    status = ?snapshot.connection_status,
                    systems = snapshot.systems.len(),
                    "connection state changed"
                );
            }
        }
    });

    let worker = Arc::clone(&controller).start();

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    controller.stop();
    let _ = worker.await;

    Ok(())
}

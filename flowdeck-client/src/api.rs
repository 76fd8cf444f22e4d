//! Workflow API contract

use async_trait::async_trait;
use shared::ConnectionSettings;

use crate::{ClientResult, RemoteWorkflow};

/// Operations against a remote workflow-automation service.
///
/// Settings are passed per call: the endpoint and credential can be
/// reconfigured at runtime without rebuilding the client.
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// List all workflows.
    async fn list_workflows(
        &self,
        settings: &ConnectionSettings,
    ) -> ClientResult<Vec<RemoteWorkflow>>;

    /// Fetch a single workflow as its raw JSON payload.
    async fn get_workflow(
        &self,
        settings: &ConnectionSettings,
        id: &str,
    ) -> ClientResult<serde_json::Value>;

    /// Activate or deactivate a workflow.
    async fn set_workflow_active(
        &self,
        settings: &ConnectionSettings,
        id: &str,
        active: bool,
    ) -> ClientResult<()>;
}

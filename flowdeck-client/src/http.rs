//! HTTP implementation of the workflow API

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::ConnectionSettings;

use crate::{ClientError, ClientResult, RemoteWorkflow, WorkflowApi};

/// API key header understood by n8n-compatible services
const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for an n8n-compatible workflow API
#[derive(Debug, Clone)]
pub struct HttpWorkflowClient {
    http: Client,
}

impl HttpWorkflowClient {
    /// Create a new HTTP client. The endpoint and credential come from
    /// the settings passed to each call.
    pub fn new() -> Self {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self { http }
    }

    /// Join the configured base URL with a request path.
    fn endpoint(settings: &ConnectionSettings, path: &str) -> String {
        // Strip a trailing slash from the base URL to avoid "//" in paths
        format!("{}{}", settings.api_url.trim_end_matches('/'), path)
    }

    /// Make a GET request
    async fn get_json<T: DeserializeOwned>(
        &self,
        settings: &ConnectionSettings,
        path: &str,
    ) -> ClientResult<T> {
        let response = self
            .http
            .get(Self::endpoint(settings, path))
            .header(reqwest::header::ACCEPT, "application/json")
            .header(API_KEY_HEADER, &settings.api_key)
            .send()
            .await
            .map_err(|e| transport_failure(path, e))?;

        Self::handle_response(response).await
    }

    /// Make a POST request without body, discarding any response payload
    async fn post_empty(&self, settings: &ConnectionSettings, path: &str) -> ClientResult<()> {
        let response = self
            .http
            .post(Self::endpoint(settings, path))
            .header(reqwest::header::ACCEPT, "application/json")
            .header(API_KEY_HEADER, &settings.api_key)
            .send()
            .await
            .map_err(|e| transport_failure(path, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        Ok(())
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

impl Default for HttpWorkflowClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkflowApi for HttpWorkflowClient {
    async fn list_workflows(
        &self,
        settings: &ConnectionSettings,
    ) -> ClientResult<Vec<RemoteWorkflow>> {
        self.get_json(settings, "/workflows").await
    }

    async fn get_workflow(
        &self,
        settings: &ConnectionSettings,
        id: &str,
    ) -> ClientResult<serde_json::Value> {
        self.get_json(settings, &format!("/workflows/{id}")).await
    }

    async fn set_workflow_active(
        &self,
        settings: &ConnectionSettings,
        id: &str,
        active: bool,
    ) -> ClientResult<()> {
        let action = if active { "activate" } else { "deactivate" };
        self.post_empty(settings, &format!("/workflows/{id}/{action}"))
            .await
    }
}

/// A send error means no response was obtainable: the service is
/// unreachable and callers fall back to demo mode.
fn transport_failure(path: &str, err: reqwest::Error) -> ClientError {
    tracing::warn!("workflow API unreachable at {path}: {err}");
    ClientError::ConnectionFailed
}

/// Extract a human-readable message from an error response body.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            format!(
                "Error {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("request failed")
            )
        })
}

//! Client for n8n-compatible workflow-automation APIs
//!
//! Thin request wrapper that normalizes transport-level failures into
//! [`ClientError::ConnectionFailed`], distinct from application-level
//! [`ClientError::Api`] errors, so callers can tell "the service is
//! unreachable" from "the service responded with an error".

pub mod api;
pub mod error;
pub mod http;
pub mod types;

pub use api::WorkflowApi;
pub use error::{ClientError, ClientResult};
pub use http::HttpWorkflowClient;
pub use types::RemoteWorkflow;

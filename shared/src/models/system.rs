//! Automation System Model

use serde::{Deserialize, Serialize};

/// Reserved id prefix for demo-origin systems.
///
/// Records carrying this prefix are locally owned: status toggles are
/// simulated in place and no remote mutation is ever issued for them.
pub const MOCK_ID_PREFIX: &str = "mock-";

/// Lifecycle status of an automation system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    Active,
    Paused,
    Error,
}

/// Dashboard category for an automation system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemCategory {
    Marketing,
    Ecommerce,
    Social,
    Productivity,
    Education,
    Finance,
    Hr,
    Support,
    Analytics,
    Integrations,
}

impl SystemCategory {
    /// All categories in dashboard display order.
    pub const ALL: [SystemCategory; 10] = [
        SystemCategory::Marketing,
        SystemCategory::Ecommerce,
        SystemCategory::Social,
        SystemCategory::Productivity,
        SystemCategory::Education,
        SystemCategory::Finance,
        SystemCategory::Hr,
        SystemCategory::Support,
        SystemCategory::Analytics,
        SystemCategory::Integrations,
    ];
}

/// An automation system as displayed on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    /// Remote-assigned id, or `mock-`-prefixed for demo records
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: SystemCategory,
    pub status: SystemStatus,
    pub revenue: f64,
    pub conversions: u64,
    /// Return on investment, percent
    pub roi: f64,
}

impl System {
    /// Whether this record originates from the demo dataset.
    pub fn is_mock(&self) -> bool {
        self.id.starts_with(MOCK_ID_PREFIX)
    }
}

/// Connection state of the data-sync controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// Settings lack an endpoint or credential; no network attempt made
    #[default]
    NotConfigured,
    /// A poll cycle is in flight
    Connecting,
    /// Last poll succeeded
    Connected,
    /// Last poll failed; the dashboard runs on demo data
    Error,
}

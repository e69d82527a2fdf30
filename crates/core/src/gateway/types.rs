//! Wire types exchanged with the lead discovery service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for the generate-leads endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeadQuery {
    pub query: String,
    /// Number of source pages the service should analyze.
    pub num_links: u32,
}

/// Success body of the generate-leads endpoint.
///
/// Either field may be missing or null; both mean "empty".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LeadResponse {
    #[serde(default)]
    pub user_data: Option<Vec<Value>>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
}

/// Result of one successful exchange: raw lead objects plus consulted sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadBatch {
    /// Lead objects exactly as the service returned them.
    pub leads: Vec<Value>,
    /// Pages the service consulted, in service order, duplicates kept.
    pub sources: Vec<String>,
}

impl LeadBatch {
    pub fn new(leads: Vec<Value>, sources: Vec<String>) -> Self {
        Self { leads, sources }
    }

    /// No leads and no sources.
    pub fn is_empty(&self) -> bool {
        self.leads.is_empty() && self.sources.is_empty()
    }
}

impl From<LeadResponse> for LeadBatch {
    fn from(response: LeadResponse) -> Self {
        Self {
            leads: response.user_data.unwrap_or_default(),
            sources: response.urls.unwrap_or_default(),
        }
    }
}

/// Health report of the discovery service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceHealth {
    pub status: String,
}

//! Boundary to the external lead discovery service.
//!
//! A gateway performs exactly one exchange per call and resolves to either a
//! [`LeadBatch`] or a [`GatewayError`]. It never retries on its own.

mod http;
mod types;

pub use http::HttpLeadGateway;
pub use types::*;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Message shown when the service reports no leads for a query.
pub const NOT_FOUND_MESSAGE: &str = "No leads found for this query. Try a different search term.";
/// Message shown when the service fails internally.
pub const SERVICE_ERROR_MESSAGE: &str = "Server error. Check the service configuration and retry.";
/// Message shown for every other failure.
pub const NETWORK_MESSAGE: &str = "Failed to reach the lead discovery service.";

/// Errors that can occur when talking to the discovery service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Service answered 404.
    #[error("Service found no leads (HTTP 404)")]
    NotFound,

    /// Service answered 500.
    #[error("Service error (HTTP {status}): {message}")]
    ServiceError { status: u16, message: String },

    /// Connection failure, timeout, unexpected status or malformed body.
    #[error("Network error: {0}")]
    Network(String),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::ServiceError { .. } => ErrorKind::ServiceError,
            Self::Network(_) => ErrorKind::Network,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Network(format!("request timed out: {}", e))
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Failure category surfaced to the user.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    ServiceError,
    Network,
}

impl ErrorKind {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound => NOT_FOUND_MESSAGE,
            Self::ServiceError => SERVICE_ERROR_MESSAGE,
            Self::Network => NETWORK_MESSAGE,
        }
    }

    /// Label used in metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::ServiceError => "service_error",
            Self::Network => "network",
        }
    }
}

/// Trait for lead discovery backends.
#[async_trait]
pub trait LeadGateway: Send + Sync {
    /// Backend name, for logs.
    fn name(&self) -> &str;

    /// Ask the service to discover leads for `query` across `source_count` sources.
    async fn submit_query(&self, query: &str, source_count: u32)
        -> Result<LeadBatch, GatewayError>;

    /// Probe the service health endpoint.
    async fn health(&self) -> Result<ServiceHealth, GatewayError>;
}

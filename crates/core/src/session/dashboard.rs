//! Report view over a query session.
//!
//! [`LeadDashboard`] pairs the session with the user's sort selection and
//! derives everything the report renders from those two on demand. Nothing
//! derived is cached, so statistics and ordering always reflect the records
//! currently held.

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use super::machine::QuerySession;
use super::types::{Completion, Generation, SessionError, SessionStatus};
use crate::gateway::{GatewayError, LeadBatch, LeadGateway};
use crate::report::{
    aggregate, serialize_csv, sort_records, ExportError, LeadCard, ReportStats, SortKey, SortSpec,
};

/// Default pattern for rendering lead timestamps.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Headline and hint shown while there is no report to display.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Placeholder {
    pub title: &'static str,
    pub hint: &'static str,
}

impl Placeholder {
    pub const READY: Placeholder = Placeholder {
        title: "Ready to Discover",
        hint: "Enter your target audience or service to find potential leads",
    };

    pub const LOADING: Placeholder = Placeholder {
        title: "Analyzing Sources...",
        hint: "Scanning social platforms and extracting lead data",
    };

    pub const NO_RESULTS: Placeholder = Placeholder {
        title: "No Results Found",
        hint: "Try a different search query or increase the number of sources",
    };

    fn for_status(status: SessionStatus) -> Option<Self> {
        match status {
            SessionStatus::Idle => Some(Self::READY),
            SessionStatus::Pending => Some(Self::LOADING),
            SessionStatus::Empty | SessionStatus::Failed => Some(Self::NO_RESULTS),
            SessionStatus::Populated => None,
        }
    }
}

/// Presentation flags derived from the session status.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewFlags {
    pub is_loading: bool,
    pub has_searched: bool,
    pub has_results: bool,
    pub show_report: bool,
}

/// Read-only snapshot of everything the report shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub status: SessionStatus,
    pub generation: Generation,
    pub query: Option<String>,
    pub source_count: Option<u32>,
    pub flags: ViewFlags,
    pub sort: SortSpec,
    /// Records in display order.
    pub leads: Vec<LeadCard>,
    pub stats: ReportStats,
    pub sources: Vec<String>,
    pub error_message: Option<&'static str>,
    pub placeholder: Option<Placeholder>,
}

#[derive(Debug, Clone)]
pub struct LeadDashboard {
    session: QuerySession,
    sort: SortSpec,
    date_format: String,
}

impl Default for LeadDashboard {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl LeadDashboard {
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            session: QuerySession::new(),
            sort: SortSpec::default(),
            date_format: date_format.into(),
        }
    }

    pub fn session(&self) -> &QuerySession {
        &self.session
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.sort
    }

    /// Start a new search. The sort selection survives across searches.
    pub fn submit(&mut self, query: &str, source_count: u32) -> Result<Generation, SessionError> {
        self.session.submit(query, source_count)
    }

    pub fn complete(
        &mut self,
        generation: Generation,
        result: Result<LeadBatch, GatewayError>,
    ) -> Completion {
        self.session.complete(generation, result)
    }

    /// Select a sort column: the active column flips direction, a new one sorts ascending.
    pub fn request_sort(&mut self, key: SortKey) -> SortSpec {
        self.sort = self.sort.toggled(key);
        debug!("Sort set to {} {:?}", key, self.sort.direction);
        self.sort
    }

    /// Back to arrival order.
    pub fn clear_sort(&mut self) -> SortSpec {
        self.sort = SortSpec::default();
        self.sort
    }

    pub fn view(&self) -> DashboardView {
        let status = self.session.status();
        let records = self.session.records();
        let sources = self.session.sources();
        let params = self.session.params();

        let leads = sort_records(records, &self.sort)
            .into_iter()
            .map(|record| LeadCard::new(record, &self.date_format))
            .collect();
        let has_results = !records.is_empty() || !sources.is_empty();

        DashboardView {
            status,
            generation: self.session.generation(),
            query: params.map(|p| p.query.clone()),
            source_count: params.map(|p| p.source_count),
            flags: ViewFlags {
                is_loading: status == SessionStatus::Pending,
                has_searched: params.is_some(),
                has_results,
                show_report: status == SessionStatus::Populated,
            },
            sort: self.sort,
            leads,
            stats: aggregate(records, sources),
            sources: sources.to_vec(),
            error_message: self.session.error_message(),
            placeholder: Placeholder::for_status(status),
        }
    }

    /// CSV of the records in their current display order.
    pub fn export_csv(&self) -> Result<String, ExportError> {
        serialize_csv(sort_records(self.session.records(), &self.sort))
    }
}

/// Drive one search from submission to completion.
///
/// The lock is held only to submit and to apply the result, never across the
/// gateway call, so concurrent searches interleave and the session's
/// generation check decides which one lands.
pub async fn run_search(
    dashboard: &RwLock<LeadDashboard>,
    gateway: &dyn LeadGateway,
    query: &str,
    source_count: u32,
) -> Result<Completion, SessionError> {
    let generation = dashboard.write().await.submit(query, source_count)?;
    let query = query.trim();

    let result = gateway.submit_query(query, source_count).await;
    if let Err(e) = &result {
        debug!("Search {} via {} failed: {}", generation, gateway.name(), e);
    }

    Ok(dashboard.write().await.complete(generation, result))
}

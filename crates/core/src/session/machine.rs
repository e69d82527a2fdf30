//! Query session state machine.
//!
//! ```text
//!            submit                 success (data)
//!   Idle ───────────► Pending ───────────────────► Populated
//!                      ▲   │   success (nothing)
//!                      │   ├───────────────────► Empty
//!      submit (any)    │   │   failure
//!                      │   └───────────────────► Failed
//! ```
//!
//! Every submit issues a new [`Generation`]. Completions carry the generation
//! they were issued under and are ignored unless it is still the pending one,
//! so a slow earlier response can never overwrite a newer search.

use tracing::{debug, info};

use super::types::{Completion, Generation, SearchParams, SessionError, SessionStatus, SourceCount};
use crate::gateway::{ErrorKind, GatewayError, LeadBatch};
use crate::lead::{normalize_leads, LeadRecord};
use crate::metrics::{LEADS_PER_SEARCH, SEARCHES_SUBMITTED, SEARCH_OUTCOMES, STALE_COMPLETIONS};

#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    Idle,
    Pending(Generation),
    Populated {
        records: Vec<LeadRecord>,
        sources: Vec<String>,
    },
    Empty,
    Failed(ErrorKind),
}

/// Lifecycle of the current search and its outcome.
#[derive(Debug, Clone, Default)]
pub struct QuerySession {
    phase: Phase,
    generation: Generation,
    params: Option<SearchParams>,
}

impl QuerySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        match self.phase {
            Phase::Idle => SessionStatus::Idle,
            Phase::Pending(_) => SessionStatus::Pending,
            Phase::Populated { .. } => SessionStatus::Populated,
            Phase::Empty => SessionStatus::Empty,
            Phase::Failed(_) => SessionStatus::Failed,
        }
    }

    /// Most recently issued generation (zero before the first submit).
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Generation a completion must carry to be applied, if a search is pending.
    pub fn pending_generation(&self) -> Option<Generation> {
        match self.phase {
            Phase::Pending(generation) => Some(generation),
            _ => None,
        }
    }

    /// Parameters of the latest accepted submission.
    pub fn params(&self) -> Option<&SearchParams> {
        self.params.as_ref()
    }

    /// Records of a populated session; empty in every other state.
    pub fn records(&self) -> &[LeadRecord] {
        match &self.phase {
            Phase::Populated { records, .. } => records,
            _ => &[],
        }
    }

    /// Sources of a populated session; empty in every other state.
    pub fn sources(&self) -> &[String] {
        match &self.phase {
            Phase::Populated { sources, .. } => sources,
            _ => &[],
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self.phase {
            Phase::Failed(kind) => Some(kind),
            _ => None,
        }
    }

    /// User-facing message of a failed session.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error_kind().map(|kind| kind.user_message())
    }

    /// Start a new search from any state.
    ///
    /// Prior records, sources and error are dropped in the same step. Invalid
    /// input is rejected and leaves the session unchanged.
    pub fn submit(&mut self, query: &str, source_count: u32) -> Result<Generation, SessionError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SessionError::EmptyQuery);
        }
        let source_count = SourceCount::new(source_count)?;

        let generation = self.generation.next();
        if let Phase::Pending(previous) = self.phase {
            debug!("Search {} superseded by {}", previous, generation);
        }

        self.generation = generation;
        self.phase = Phase::Pending(generation);
        self.params = Some(SearchParams {
            query: query.to_string(),
            source_count: source_count.get(),
        });
        SEARCHES_SUBMITTED.inc();

        info!(
            "Search {} submitted: query='{}', sources={}",
            generation,
            query,
            source_count.get()
        );
        Ok(generation)
    }

    /// Apply a successful response issued under `generation`.
    pub fn on_success(&mut self, generation: Generation, batch: LeadBatch) -> Completion {
        if !self.accepts(generation) {
            return self.superseded(generation);
        }

        self.phase = if batch.is_empty() {
            Phase::Empty
        } else {
            let records = normalize_leads(&batch.leads);
            LEADS_PER_SEARCH.observe(records.len() as f64);
            Phase::Populated {
                records,
                sources: batch.sources,
            }
        };
        self.applied(generation)
    }

    /// Apply a failed response issued under `generation`.
    pub fn on_failure(&mut self, generation: Generation, kind: ErrorKind) -> Completion {
        if !self.accepts(generation) {
            return self.superseded(generation);
        }

        self.phase = Phase::Failed(kind);
        self.applied(generation)
    }

    /// Apply whatever the gateway resolved to.
    pub fn complete(
        &mut self,
        generation: Generation,
        result: Result<LeadBatch, GatewayError>,
    ) -> Completion {
        match result {
            Ok(batch) => self.on_success(generation, batch),
            Err(e) => self.on_failure(generation, e.kind()),
        }
    }

    fn accepts(&self, generation: Generation) -> bool {
        self.pending_generation() == Some(generation)
    }

    fn applied(&self, generation: Generation) -> Completion {
        let status = self.status();
        SEARCH_OUTCOMES.with_label_values(&[status.as_str()]).inc();
        info!(
            "Search {} completed: status={}, leads={}, sources={}",
            generation,
            status.as_str(),
            self.records().len(),
            self.sources().len()
        );
        Completion::Applied { status }
    }

    fn superseded(&self, generation: Generation) -> Completion {
        STALE_COMPLETIONS.inc();
        debug!(
            "Discarding completion of search {} (current {}, status {})",
            generation,
            self.generation,
            self.status().as_str()
        );
        Completion::Superseded { generation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::SERVICE_ERROR_MESSAGE;
    use serde_json::json;

    fn batch(names: &[&str], sources: &[&str]) -> LeadBatch {
        LeadBatch::new(
            names.iter().map(|n| json!({ "Username": n })).collect(),
            sources.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = QuerySession::new();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.generation().value(), 0);
        assert!(session.records().is_empty());
        assert!(session.error_message().is_none());
        assert!(session.params().is_none());
    }

    #[test]
    fn test_submit_enters_pending() {
        let mut session = QuerySession::new();
        let generation = session.submit("  ai tools ", 3).unwrap();

        assert_eq!(session.status(), SessionStatus::Pending);
        assert_eq!(session.pending_generation(), Some(generation));
        assert_eq!(
            session.params(),
            Some(&SearchParams {
                query: "ai tools".into(),
                source_count: 3
            })
        );
    }

    #[test]
    fn test_invalid_submit_leaves_state_untouched() {
        let mut session = QuerySession::new();
        let generation = session.submit("first", 2).unwrap();
        session.on_success(generation, batch(&["alice"], &[]));

        assert_eq!(session.submit("   ", 3), Err(SessionError::EmptyQuery));
        assert_eq!(
            session.submit("query", 0),
            Err(SessionError::SourceCountOutOfRange(0))
        );
        assert_eq!(
            session.submit("query", 11),
            Err(SessionError::SourceCountOutOfRange(11))
        );

        assert_eq!(session.status(), SessionStatus::Populated);
        assert_eq!(session.generation(), generation);
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn test_success_with_records_populates() {
        let mut session = QuerySession::new();
        let generation = session.submit("q", 1).unwrap();
        let completion = session.on_success(generation, batch(&["alice", "bob"], &["https://a"]));

        assert_eq!(
            completion,
            Completion::Applied {
                status: SessionStatus::Populated
            }
        );
        assert_eq!(session.records().len(), 2);
        assert_eq!(session.records()[0].username(), Some("alice"));
        assert_eq!(session.sources(), &["https://a"]);
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_success_with_sources_only_populates() {
        let mut session = QuerySession::new();
        let generation = session.submit("q", 1).unwrap();
        session.on_success(generation, batch(&[], &["https://a", "https://a"]));

        assert_eq!(session.status(), SessionStatus::Populated);
        assert!(session.records().is_empty());
        assert_eq!(session.sources().len(), 2);
    }

    #[test]
    fn test_success_with_nothing_is_empty_not_error() {
        let mut session = QuerySession::new();
        let generation = session.submit("ai tools", 3).unwrap();
        session.on_success(generation, LeadBatch::default());

        assert_eq!(session.status(), SessionStatus::Empty);
        assert!(session.error_message().is_none());
        assert!(session.error_kind().is_none());
    }

    #[test]
    fn test_failure_sets_message() {
        let mut session = QuerySession::new();
        let generation = session.submit("ai tools", 3).unwrap();
        session.complete(
            generation,
            Err(GatewayError::ServiceError {
                status: 500,
                message: "boom".into(),
            }),
        );

        assert_eq!(session.status(), SessionStatus::Failed);
        assert_eq!(session.error_kind(), Some(ErrorKind::ServiceError));
        assert_eq!(session.error_message(), Some(SERVICE_ERROR_MESSAGE));
    }

    #[test]
    fn test_resubmit_discards_previous_outcome() {
        let mut session = QuerySession::new();
        let generation = session.submit("first", 3).unwrap();
        session.on_success(generation, batch(&["alice"], &["https://a"]));

        session.submit("second", 3).unwrap();
        assert_eq!(session.status(), SessionStatus::Pending);
        assert!(session.records().is_empty());
        assert!(session.sources().is_empty());

        let generation = session.pending_generation().unwrap();
        session.on_failure(generation, ErrorKind::Network);
        session.submit("third", 3).unwrap();
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_late_response_is_discarded() {
        let mut session = QuerySession::new();
        let first = session.submit("A", 3).unwrap();
        let second = session.submit("B", 3).unwrap();
        assert!(second > first);

        let applied = session.on_success(second, batch(&["from-b"], &[]));
        assert_eq!(
            applied,
            Completion::Applied {
                status: SessionStatus::Populated
            }
        );

        let late = session.on_success(first, batch(&["from-a-1", "from-a-2"], &[]));
        assert_eq!(late, Completion::Superseded { generation: first });
        assert_eq!(session.records().len(), 1);
        assert_eq!(session.records()[0].username(), Some("from-b"));

        let late_failure = session.on_failure(first, ErrorKind::Network);
        assert_eq!(late_failure, Completion::Superseded { generation: first });
        assert_eq!(session.status(), SessionStatus::Populated);
    }

    #[test]
    fn test_early_response_for_superseded_search_is_discarded() {
        let mut session = QuerySession::new();
        let first = session.submit("A", 3).unwrap();
        let _second = session.submit("B", 3).unwrap();

        let completion = session.on_success(first, batch(&["from-a"], &[]));
        assert_eq!(completion, Completion::Superseded { generation: first });
        assert_eq!(session.status(), SessionStatus::Pending);
    }

    #[test]
    fn test_completion_without_pending_is_discarded() {
        let mut session = QuerySession::new();
        let completion = session.on_success(Generation::default(), batch(&["x"], &[]));
        assert!(matches!(completion, Completion::Superseded { .. }));
        assert_eq!(session.status(), SessionStatus::Idle);

        let generation = session.submit("q", 1).unwrap();
        session.on_success(generation, LeadBatch::default());
        let duplicate = session.on_success(generation, batch(&["x"], &[]));
        assert!(matches!(duplicate, Completion::Superseded { .. }));
        assert_eq!(session.status(), SessionStatus::Empty);
    }
}

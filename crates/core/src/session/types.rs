//! Session lifecycle types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest sources a search may analyze.
pub const MIN_SOURCE_COUNT: u32 = 1;
/// Most sources a search may analyze.
pub const MAX_SOURCE_COUNT: u32 = 10;
/// Source count suggested to users.
pub const DEFAULT_SOURCE_COUNT: u32 = 3;

/// Where a search session currently is. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Nothing submitted yet.
    Idle,
    /// Waiting for the service.
    Pending,
    /// Service returned leads or sources.
    Populated,
    /// Service answered with nothing at all.
    Empty,
    /// Exchange failed.
    Failed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Populated => "populated",
            Self::Empty => "empty",
            Self::Failed => "failed",
        }
    }

    /// A search finished, one way or another.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Populated | Self::Empty | Self::Failed)
    }
}

/// Tag identifying one submission. Strictly increases with every submit.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Number of sources to analyze, guaranteed within bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SourceCount(u32);

impl SourceCount {
    /// Validate a count, rejecting anything outside the allowed range.
    pub fn new(count: u32) -> Result<Self, SessionError> {
        if (MIN_SOURCE_COUNT..=MAX_SOURCE_COUNT).contains(&count) {
            Ok(Self(count))
        } else {
            Err(SessionError::SourceCountOutOfRange(count))
        }
    }

    /// Coerce arbitrary user input into range. For callers, before `submit`.
    pub fn clamped(count: i64) -> Self {
        Self(count.clamp(MIN_SOURCE_COUNT as i64, MAX_SOURCE_COUNT as i64) as u32)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for SourceCount {
    fn default() -> Self {
        Self(DEFAULT_SOURCE_COUNT)
    }
}

/// Parameters of the most recent accepted submission.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: String,
    pub source_count: u32,
}

/// Rejected submissions. The session is left untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Source count {0} is outside 1..=10")]
    SourceCountOutOfRange(u32),
}

/// Fate of a completion handed to the session.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Completion {
    /// The completion matched the pending generation and moved the session.
    Applied { status: SessionStatus },
    /// The completion belonged to an older submission and was ignored.
    Superseded { generation: Generation },
}

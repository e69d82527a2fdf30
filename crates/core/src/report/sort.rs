//! Stable, key-driven ordering of lead records.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::lead::LeadRecord;

/// Field of [`LeadRecord`] a report can be ordered by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Username,
    PostType,
    Source,
    Title,
    SnippetOrBio,
    Links,
    Upvotes,
    Timestamp,
    Confidence,
    ConfidenceScore,
}

impl SortKey {
    pub const ALL: [SortKey; 10] = [
        Self::Username,
        Self::PostType,
        Self::Source,
        Self::Title,
        Self::SnippetOrBio,
        Self::Links,
        Self::Upvotes,
        Self::Timestamp,
        Self::Confidence,
        Self::ConfidenceScore,
    ];

    /// Field name as it appears in serialized records and export headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::PostType => "postType",
            Self::Source => "source",
            Self::Title => "title",
            Self::SnippetOrBio => "snippetOrBio",
            Self::Links => "links",
            Self::Upvotes => "upvotes",
            Self::Timestamp => "timestamp",
            Self::Confidence => "confidence",
            Self::ConfidenceScore => "confidenceScore",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Upvotes | Self::ConfidenceScore)
    }

    /// Ascending comparison of two records on this field.
    ///
    /// Numeric fields compare as integers. Text fields compare as strings,
    /// with absent values ordered before present ones.
    fn compare(&self, a: &LeadRecord, b: &LeadRecord) -> Ordering {
        match self {
            Self::Username => a.username().cmp(&b.username()),
            Self::PostType => a.post_type().cmp(&b.post_type()),
            Self::Source => a.source().cmp(&b.source()),
            Self::Title => a.title().cmp(&b.title()),
            Self::SnippetOrBio => a.snippet_or_bio().cmp(&b.snippet_or_bio()),
            Self::Links => a.links().cmp(b.links()),
            Self::Upvotes => a.upvotes().cmp(&b.upvotes()),
            Self::Timestamp => a.timestamp().cmp(&b.timestamp()),
            Self::Confidence => a
                .confidence()
                .map(|c| c.as_str())
                .cmp(&b.confidence().map(|c| c.as_str())),
            Self::ConfidenceScore => a.confidence_score().cmp(&b.confidence_score()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized sort field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Current ordering of the report. A `None` key keeps arrival order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn by(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Ordering after the user selects `key`.
    ///
    /// Selecting the active key flips the direction; any other key starts ascending.
    pub fn toggled(&self, key: SortKey) -> Self {
        let direction = if self.key == Some(key) {
            self.direction.flipped()
        } else {
            SortDirection::Ascending
        };
        Self::by(key, direction)
    }
}

/// Order `records` according to `spec` without touching the input.
///
/// The sort is stable: records comparing equal keep their arrival order in
/// both directions, and descending is the exact mirror of the ascending
/// comparator.
pub fn sort_records<'a>(records: &'a [LeadRecord], spec: &SortSpec) -> Vec<&'a LeadRecord> {
    let mut ordered: Vec<&LeadRecord> = records.iter().collect();
    let Some(key) = spec.key else {
        return ordered;
    };

    ordered.sort_by(|a, b| {
        let ord = key.compare(a, b);
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    ordered
}

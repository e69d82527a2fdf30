//! Canonical lead record and its derived presentation fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Link used when a lead carries no links at all.
pub const NULL_LINK: &str = "#";

/// Initial shown for leads without a username.
pub const FALLBACK_INITIAL: char = 'U';

/// Confidence reported by the discovery service for a single lead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Parse a raw confidence label. Matching ignores case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Presentation bucket for a lead's confidence.
///
/// Only used to pick labels and colors. Sorting and filtering never look at it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
    Unknown,
}

impl ConfidenceTier {
    /// Badge label, e.g. `HIGH` or `UNKNOWN`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Visual tone of the badge and confidence bar.
    pub fn tone(&self) -> Tone {
        match self {
            Self::High => Tone::Good,
            Self::Medium => Tone::Caution,
            // Unknown confidence is rendered like low confidence.
            Self::Low | Self::Unknown => Tone::Poor,
        }
    }
}

impl From<Option<Confidence>> for ConfidenceTier {
    fn from(confidence: Option<Confidence>) -> Self {
        match confidence {
            Some(Confidence::High) => Self::High,
            Some(Confidence::Medium) => Self::Medium,
            Some(Confidence::Low) => Self::Low,
            None => Self::Unknown,
        }
    }
}

/// Semantic color family used by the view layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Good,
    Caution,
    Poor,
}

/// One discovered prospect.
///
/// Records are built by [`LeadRecord::from_raw`] and never modified afterwards.
/// Every derived value (primary link, display date, tier) is computed on read.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub(crate) username: Option<String>,
    pub(crate) post_type: Option<String>,
    pub(crate) source: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) snippet_or_bio: Option<String>,
    pub(crate) links: Vec<String>,
    pub(crate) upvotes: i64,
    pub(crate) timestamp: Option<String>,
    pub(crate) confidence: Option<Confidence>,
    pub(crate) confidence_score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) website_url: Option<String>,
}

impl LeadRecord {
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn post_type(&self) -> Option<&str> {
        self.post_type.as_deref()
    }

    /// Platform or site the lead originates from.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn snippet_or_bio(&self) -> Option<&str> {
        self.snippet_or_bio.as_deref()
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn upvotes(&self) -> i64 {
        self.upvotes
    }

    /// Raw ISO-8601 timestamp as received.
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    pub fn confidence(&self) -> Option<Confidence> {
        self.confidence
    }

    /// Confidence score as received. See [`LeadRecord::confidence_percent`] for display.
    pub fn confidence_score(&self) -> i64 {
        self.confidence_score
    }

    /// Page the lead was extracted from, when the service reports it.
    pub fn website_url(&self) -> Option<&str> {
        self.website_url.as_deref()
    }

    /// First link, or [`NULL_LINK`] when there are none.
    pub fn primary_link(&self) -> &str {
        self.links.first().map(String::as_str).unwrap_or(NULL_LINK)
    }

    pub fn confidence_tier(&self) -> ConfidenceTier {
        ConfidenceTier::from(self.confidence)
    }

    /// Confidence score clamped to `[0, 100]`, for bar widths.
    pub fn confidence_percent(&self) -> u8 {
        self.confidence_score.clamp(0, 100) as u8
    }

    /// Avatar initial: uppercased first character of the username.
    pub fn initial(&self) -> char {
        self.username
            .as_deref()
            .and_then(|name| name.chars().next())
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or(FALLBACK_INITIAL)
    }

    /// Timestamp rendered as a date with the given strftime pattern.
    ///
    /// Returns an empty string when there is no timestamp or it cannot be parsed.
    pub fn display_date(&self, format: &str) -> String {
        self.timestamp
            .as_deref()
            .and_then(parse_date)
            .map(|date| date.format(format).to_string())
            .unwrap_or_default()
    }
}

/// Accepts RFC 3339, naive date-times and plain dates.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

//! Per-lead presentation values consumed by the view layer.

use serde::Serialize;

use crate::lead::{ConfidenceTier, LeadRecord, Tone};

/// A lead together with everything the report renders for it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadCard {
    #[serde(flatten)]
    pub record: LeadRecord,
    pub initial: char,
    pub primary_link: String,
    pub display_date: String,
    pub confidence_tier: ConfidenceTier,
    pub confidence_label: &'static str,
    pub tone: Tone,
    /// Width of the confidence bar, `0..=100`.
    pub confidence_percent: u8,
}

impl LeadCard {
    pub fn new(record: &LeadRecord, date_format: &str) -> Self {
        let tier = record.confidence_tier();
        Self {
            initial: record.initial(),
            primary_link: record.primary_link().to_string(),
            display_date: record.display_date(date_format),
            confidence_tier: tier,
            confidence_label: tier.label(),
            tone: tier.tone(),
            confidence_percent: record.confidence_percent(),
            record: record.clone(),
        }
    }
}

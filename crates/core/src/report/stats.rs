//! Summary statistics shown above the report.

use serde::Serialize;

use crate::lead::LeadRecord;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub total_leads: usize,
    /// Mean upvotes rounded to the nearest integer (halves up), 0 when there
    /// are no leads.
    pub average_upvotes: i64,
    pub sources_analyzed: usize,
}

/// Compute statistics for the given records and sources.
///
/// Always computed from the current data; callers must not keep the result
/// across a new search.
pub fn aggregate(records: &[LeadRecord], sources: &[String]) -> ReportStats {
    ReportStats {
        total_leads: records.len(),
        average_upvotes: average_upvotes(records),
        sources_analyzed: sources.len(),
    }
}

fn average_upvotes(records: &[LeadRecord]) -> i64 {
    if records.is_empty() {
        return 0;
    }
    let sum: i128 = records.iter().map(|r| r.upvotes() as i128).sum();
    let mean = sum as f64 / records.len() as f64;
    (mean + 0.5).floor() as i64
}

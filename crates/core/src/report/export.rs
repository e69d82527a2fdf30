//! CSV export of the report.
//!
//! Column order and header names are consumed by spreadsheet tooling and
//! must stay stable.

use thiserror::Error;

use crate::lead::{LeadRecord, LINK_SEPARATOR};

use super::sort::SortKey;

/// Header row of the exported file, in column order.
pub const EXPORT_HEADERS: [&str; 10] = [
    "username",
    "postType",
    "source",
    "title",
    "snippetOrBio",
    "links",
    "upvotes",
    "timestamp",
    "confidence",
    "confidenceScore",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to finish CSV output: {0}")]
    Flush(String),
}

/// Serialize records, in the given order, into CSV text with a header row.
///
/// Absent values become empty cells. Cells containing the delimiter, quotes
/// or line breaks are quoted.
pub fn serialize_csv<'a, I>(records: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a LeadRecord>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for record in records {
        writer.write_record(row(record))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Flush(e.to_string()))
}

fn row(record: &LeadRecord) -> Vec<String> {
    SortKey::ALL.iter().map(|key| cell(record, *key)).collect()
}

fn cell(record: &LeadRecord, column: SortKey) -> String {
    let text = |value: Option<&str>| value.unwrap_or_default().to_string();
    match column {
        SortKey::Username => text(record.username()),
        SortKey::PostType => text(record.post_type()),
        SortKey::Source => text(record.source()),
        SortKey::Title => text(record.title()),
        SortKey::SnippetOrBio => text(record.snippet_or_bio()),
        SortKey::Links => record.links().join(LINK_SEPARATOR),
        SortKey::Upvotes => record.upvotes().to_string(),
        SortKey::Timestamp => text(record.timestamp()),
        SortKey::Confidence => text(record.confidence().map(|c| c.as_str())),
        SortKey::ConfidenceScore => record.confidence_score().to_string(),
    }
}

//! Report derivation: ordering, statistics, per-lead cards and CSV export.
//!
//! Everything here is a pure function of the current records and sources.

mod card;
mod export;
mod sort;
mod stats;

pub use card::LeadCard;
pub use export::{serialize_csv, ExportError, EXPORT_HEADERS};
pub use sort::{sort_records, SortDirection, SortKey, SortSpec, UnknownSortKey};
pub use stats::{aggregate, ReportStats};

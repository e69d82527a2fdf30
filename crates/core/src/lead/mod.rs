//! Lead record model.
//!
//! Raw service output is normalized into immutable [`LeadRecord`]s; everything
//! the report shows about a lead is derived from those records on demand.

mod normalize;
mod types;

pub use normalize::{normalize_leads, LINK_SEPARATOR};
pub use types::*;

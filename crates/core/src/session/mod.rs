//! Search lifecycle and the report view built on top of it.

mod dashboard;
mod machine;
mod types;

pub use dashboard::{
    run_search, DashboardView, LeadDashboard, Placeholder, ViewFlags, DEFAULT_DATE_FORMAT,
};
pub use machine::QuerySession;
pub use types::*;

pub mod config;
pub mod gateway;
pub mod lead;
pub mod metrics;
pub mod report;
pub mod session;
pub mod testing;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, SanitizedConfig,
};
pub use gateway::{ErrorKind, GatewayError, HttpLeadGateway, LeadBatch, LeadGateway};
pub use lead::{normalize_leads, LeadRecord};
pub use report::{ReportStats, SortDirection, SortKey, SortSpec};
pub use session::{
    run_search, Completion, DashboardView, Generation, LeadDashboard, QuerySession,
    SessionError, SessionStatus, SourceCount,
};

use leadfinder_core::{Config, LeadDashboard, LeadGateway, SanitizedConfig};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state
pub struct AppState {
    config: Config,
    dashboard: RwLock<LeadDashboard>,
    gateway: Arc<dyn LeadGateway>,
}

impl AppState {
    pub fn new(config: Config, gateway: Arc<dyn LeadGateway>) -> Self {
        let dashboard = LeadDashboard::new(config.report.date_format.clone());
        Self {
            config,
            dashboard: RwLock::new(dashboard),
            gateway,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn dashboard(&self) -> &RwLock<LeadDashboard> {
        &self.dashboard
    }

    pub fn gateway(&self) -> &dyn LeadGateway {
        self.gateway.as_ref()
    }
}

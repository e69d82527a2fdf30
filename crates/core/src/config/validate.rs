use chrono::format::{Item, StrftimeItems};

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Gateway base URL is an absolute http(s) URL
/// - Gateway timeout is not 0
/// - Report date format is a valid strftime pattern
/// - Export filename is a bare, non-empty file name
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Gateway validation
    let url = reqwest::Url::parse(&config.gateway.base_url).map_err(|e| {
        ConfigError::ValidationError(format!(
            "gateway.base_url '{}' is not a valid URL: {}",
            config.gateway.base_url, e
        ))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError(format!(
            "gateway.base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if config.gateway.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "gateway.timeout_secs cannot be 0".to_string(),
        ));
    }

    // Report validation
    if StrftimeItems::new(&config.report.date_format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::ValidationError(format!(
            "report.date_format '{}' is not a valid strftime pattern",
            config.report.date_format
        )));
    }
    let filename = config.report.export_filename.trim();
    if filename.is_empty() || filename.contains(['/', '\\', '"']) {
        return Err(ConfigError::ValidationError(
            "report.export_filename must be a plain file name".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(config: &Config) {
        let result = validate_config(config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = Config::default();
        config.server.port = 0;
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_bad_base_url_fails() {
        let mut config = Config::default();
        config.gateway.base_url = "localhost".to_string();
        assert_invalid(&config);

        config.gateway.base_url = "ftp://leads.example.com".to_string();
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = Config::default();
        config.gateway.timeout_secs = 0;
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_date_format() {
        let mut config = Config::default();
        config.report.date_format = "%d.%m.%Y".to_string();
        assert!(validate_config(&config).is_ok());

        config.report.date_format = "%Q".to_string();
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_export_filename() {
        let mut config = Config::default();
        config.report.export_filename = "../leads.csv".to_string();
        assert_invalid(&config);

        config.report.export_filename = "  ".to_string();
        assert_invalid(&config);
    }
}

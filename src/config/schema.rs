//! Configuration schema types
//!
//! This module defines the configuration structure for tfsynth.

use crate::config::SecretString;
use crate::domain::MonitorGuid;
use secrecy::ExposeSecret;
use serde::Deserialize;

/// NerdGraph endpoint for US accounts
pub const US_GRAPHQL_URL: &str = "https://api.newrelic.com/graphql";

/// NerdGraph endpoint for EU accounts
pub const EU_GRAPHQL_URL: &str = "https://api.eu.newrelic.com/graphql";

/// Upper bound of `export.parallel_workers`
pub const MAX_PARALLEL_WORKERS: usize = 100;

/// Main tfsynth configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct TfsynthConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// New Relic account and API settings
    pub newrelic: NewRelicConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TfsynthConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.newrelic.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Render everything but write no files
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// New Relic account configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NewRelicConfig {
    /// Account whose monitors are exported
    pub account_id: i64,

    /// User API key (`NRAK-...`)
    pub api_key: SecretString,

    /// Data center region (`US` or `EU`)
    #[serde(default = "default_region")]
    pub region: String,

    /// Explicit NerdGraph endpoint, overriding `region`
    #[serde(default)]
    pub graphql_url: Option<String>,

    /// HTTP request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl NewRelicConfig {
    /// NerdGraph endpoint for this account
    pub fn endpoint(&self) -> String {
        match &self.graphql_url {
            Some(url) => url.clone(),
            None if self.region.eq_ignore_ascii_case("EU") => EU_GRAPHQL_URL.to_string(),
            None => US_GRAPHQL_URL.to_string(),
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.account_id <= 0 {
            return Err(format!(
                "newrelic.account_id must be a positive integer, got {}",
                self.account_id
            ));
        }

        if self.api_key.expose_secret().is_empty() {
            return Err("newrelic.api_key cannot be empty".to_string());
        }

        if !["US", "EU"].contains(&self.region.to_uppercase().as_str()) {
            return Err(format!(
                "Invalid newrelic.region '{}'. Must be one of: US, EU",
                self.region
            ));
        }

        if let Some(url) = &self.graphql_url {
            let parsed = url::Url::parse(url)
                .map_err(|e| format!("Invalid newrelic.graphql_url '{url}': {e}"))?;
            if !["http", "https"].contains(&parsed.scheme()) {
                return Err(format!(
                    "newrelic.graphql_url must use http or https, got '{}'",
                    parsed.scheme()
                ));
            }
        }

        if self.timeout_seconds == 0 {
            return Err("newrelic.timeout_seconds must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Entity search query selecting the monitors
    #[serde(default = "default_locator_query")]
    pub locator_query: String,

    /// Number of concurrent workers
    #[serde(default = "default_parallel_workers")]
    pub parallel_workers: usize,

    /// Directory the `.tf` files are written to
    #[serde(default = "default_output_directory")]
    pub output_directory: String,

    /// Don't write the provider file
    #[serde(default)]
    pub skip_provider_output: bool,

    /// Export only these monitor guids; empty exports everything
    #[serde(default)]
    pub monitor_ids: Vec<String>,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.locator_query.trim().is_empty() {
            return Err("export.locator_query cannot be empty".to_string());
        }

        if self.parallel_workers == 0 || self.parallel_workers > MAX_PARALLEL_WORKERS {
            return Err(format!(
                "export.parallel_workers must be between 1 and {MAX_PARALLEL_WORKERS}, got {}",
                self.parallel_workers
            ));
        }

        if self.output_directory.trim().is_empty() {
            return Err("export.output_directory cannot be empty".to_string());
        }

        self.monitor_guids().map(|_| ())
    }

    /// `monitor_ids` as typed identifiers
    pub fn monitor_guids(&self) -> Result<Vec<MonitorGuid>, String> {
        self.monitor_ids
            .iter()
            .map(|id| {
                MonitorGuid::new(id.trim())
                    .map_err(|e| format!("Invalid export.monitor_ids entry '{id}': {e}"))
            })
            .collect()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            locator_query: default_locator_query(),
            parallel_workers: default_parallel_workers(),
            output_directory: default_output_directory(),
            skip_provider_output: false,
            monitor_ids: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_region() -> String {
    "US".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_locator_query() -> String {
    "domain = 'SYNTH'".to_string()
}

fn default_parallel_workers() -> usize {
    10
}

fn default_output_directory() -> String {
    ".".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use test_case::test_case;

    fn newrelic() -> NewRelicConfig {
        NewRelicConfig {
            account_id: 1234567,
            api_key: secret_string("NRAK-TEST".to_string()),
            region: default_region(),
            graphql_url: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }

    fn config() -> TfsynthConfig {
        TfsynthConfig {
            application: ApplicationConfig::default(),
            newrelic: newrelic(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(config().validate().is_ok());
        assert_eq!(ExportConfig::default().parallel_workers, 10);
        assert_eq!(ExportConfig::default().locator_query, "domain = 'SYNTH'");
    }

    #[test_case("US", None, US_GRAPHQL_URL ; "us region")]
    #[test_case("eu", None, EU_GRAPHQL_URL ; "eu region case insensitive")]
    #[test_case("EU", Some("http://localhost:8080/graphql"), "http://localhost:8080/graphql" ; "explicit url wins")]
    fn test_endpoint(region: &str, url: Option<&str>, expected: &str) {
        let config = NewRelicConfig {
            region: region.to_string(),
            graphql_url: url.map(str::to_string),
            ..newrelic()
        };
        assert_eq!(config.endpoint(), expected);
    }

    #[test_case(0 ; "zero workers")]
    #[test_case(101 ; "too many workers")]
    fn test_invalid_parallel_workers(workers: usize) {
        let mut config = config();
        config.export.parallel_workers = workers;
        let err = config.validate().unwrap_err();
        assert!(err.contains("parallel_workers"));
    }

    #[test]
    fn test_invalid_newrelic_settings() {
        let mut config = config();
        config.newrelic.account_id = 0;
        assert!(config.validate().unwrap_err().contains("account_id"));

        let mut config = self::config();
        config.newrelic.api_key = secret_string(String::new());
        assert!(config.validate().unwrap_err().contains("api_key"));

        let mut config = self::config();
        config.newrelic.region = "APAC".to_string();
        assert!(config.validate().unwrap_err().contains("region"));

        let mut config = self::config();
        config.newrelic.graphql_url = Some("ftp://example.com".to_string());
        assert!(config.validate().unwrap_err().contains("graphql_url"));
    }

    #[test]
    fn test_invalid_log_level_and_rotation() {
        let mut config = config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = self::config();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().unwrap_err().contains("local_rotation"));
    }

    #[test]
    fn test_monitor_guids() {
        let mut export = ExportConfig::default();
        export.monitor_ids = vec!["g1".to_string(), " g2 ".to_string()];
        let guids = export.monitor_guids().unwrap();
        assert_eq!(guids[1].as_str(), "g2");

        export.monitor_ids.push("  ".to_string());
        assert!(export.validate().is_err());
    }
}

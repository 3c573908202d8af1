//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::TfsynthConfig;
use super::secret::secret_string;
use crate::domain::{ExporterError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "TFSYNTH";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`TfsynthConfig`]
/// 4. Applies environment variable overrides (`TFSYNTH_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ExporterError::Configuration`] if the file can't be read or
/// parsed, a referenced variable is unset, an override doesn't parse, or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use tfsynth::config::loader::load_config;
///
/// let config = load_config("tfsynth.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TfsynthConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ExporterError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ExporterError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: TfsynthConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ExporterError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched. Every missing variable is reported at
/// once.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ExporterError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ExporterError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides
///
/// Variables follow the pattern `TFSYNTH_<SECTION>_<KEY>`, for example
/// `TFSYNTH_NEWRELIC_API_KEY` or `TFSYNTH_EXPORT_PARALLEL_WORKERS`.
/// `TFSYNTH_EXPORT_MONITOR_IDS` is a comma-separated list.
fn apply_env_overrides(config: &mut TfsynthConfig) -> Result<()> {
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = parsed_override("APPLICATION_DRY_RUN")? {
        config.application.dry_run = val;
    }

    if let Some(val) = parsed_override("NEWRELIC_ACCOUNT_ID")? {
        config.newrelic.account_id = val;
    }
    if let Some(val) = env_override("NEWRELIC_API_KEY") {
        config.newrelic.api_key = secret_string(val);
    }
    if let Some(val) = env_override("NEWRELIC_REGION") {
        config.newrelic.region = val;
    }
    if let Some(val) = env_override("NEWRELIC_GRAPHQL_URL") {
        config.newrelic.graphql_url = Some(val);
    }
    if let Some(val) = parsed_override("NEWRELIC_TIMEOUT_SECONDS")? {
        config.newrelic.timeout_seconds = val;
    }

    if let Some(val) = env_override("EXPORT_LOCATOR_QUERY") {
        config.export.locator_query = val;
    }
    if let Some(val) = parsed_override("EXPORT_PARALLEL_WORKERS")? {
        config.export.parallel_workers = val;
    }
    if let Some(val) = env_override("EXPORT_OUTPUT_DIRECTORY") {
        config.export.output_directory = val;
    }
    if let Some(val) = parsed_override("EXPORT_SKIP_PROVIDER_OUTPUT")? {
        config.export.skip_provider_output = val;
    }
    if let Some(val) = env_override("EXPORT_MONITOR_IDS") {
        config.export.monitor_ids = val
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Some(val) = parsed_override("LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{key}")).ok()
}

fn parsed_override<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_override(key)
        .map(|val| {
            val.trim().parse().map_err(|e| {
                ExporterError::Configuration(format!(
                    "Invalid value '{val}' for {ENV_PREFIX}_{key}: {e}"
                ))
            })
        })
        .transpose()
}

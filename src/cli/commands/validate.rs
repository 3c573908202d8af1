//! Validate config command implementation

use crate::config::load_config;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Returns exit code 0 for a valid file and 2 otherwise.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Account ID: {}", config.newrelic.account_id);
        println!("  API Key: {}", config.newrelic.api_key.expose_secret().masked());
        println!("  NerdGraph Endpoint: {}", config.newrelic.endpoint());
        println!("  Locator Query: {}", config.export.locator_query);
        println!("  Parallel Workers: {}", config.export.parallel_workers);
        println!("  Output Directory: {}", config.export.output_directory);
        println!("  Provider File: {}", !config.export.skip_provider_output);
        if config.export.monitor_ids.is_empty() {
            println!("  Monitors: All");
        } else {
            println!("  Monitors: {}", config.export.monitor_ids.join(", "));
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}
            .execute("does-not-exist.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}

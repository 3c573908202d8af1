//! Configuration management for tfsynth.
//!
//! TOML configuration with `${VAR_NAME}` substitution, `TFSYNTH_*`
//! environment overrides, defaults for optional settings and validation on
//! load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tfsynth::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("tfsynth.toml")?;
//!
//! println!("Account: {}", config.newrelic.account_id);
//! println!("Workers: {}", config.export.parallel_workers);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level and dry-run mode
//! - [`NewRelicConfig`] - account, API key and NerdGraph endpoint
//! - [`ExportConfig`] - monitor selection, worker count and output directory
//! - [`LoggingConfig`] - local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [newrelic]
//! account_id = 1234567
//! api_key = "${NEW_RELIC_API_KEY}"
//! region = "US"
//!
//! [export]
//! locator_query = "domain = 'SYNTH'"
//! parallel_workers = 10
//! output_directory = "generated"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{ApplicationConfig, ExportConfig, LoggingConfig, NewRelicConfig, TfsynthConfig};
pub use secret::{secret_string, SecretString, SecretValue};

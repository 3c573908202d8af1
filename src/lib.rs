//! # tfsynth - New Relic synthetic monitors as Terraform
//!
//! tfsynth discovers the synthetic monitors of a New Relic account through
//! NerdGraph, renders each one as a Terraform resource file and prints the
//! `terraform import` commands that adopt the existing monitors into state.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Rendering, HCL documents and the export coordinator
//! - [`adapters`] - NerdGraph client and queries
//! - [`domain`] - Monitor types, identifiers and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tfsynth::config::load_config;
//! use tfsynth::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("tfsynth.toml")?;
//!     let coordinator = ExportCoordinator::new(config)?;
//!
//!     let outcome = coordinator.execute_export().await?;
//!     for directive in &outcome.directives {
//!         println!("{}", directive.import_command());
//!     }
//!     if let Some(error) = outcome.error {
//!         eprintln!("{error}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Supported monitors
//!
//! | Monitor type     | Terraform resource                   |
//! |------------------|--------------------------------------|
//! | `BROWSER`        | `newrelic_synthetics_monitor`        |
//! | `STEP_MONITOR`   | `newrelic_synthetics_monitor_step`   |
//! | `SCRIPT_BROWSER` | `newrelic_synthetics_script_monitor` |
//!
//! Other monitor types are skipped and logged.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

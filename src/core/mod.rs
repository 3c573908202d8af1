//! Core business logic for tfsynth.
//!
//! # Modules
//!
//! - [`naming`] - canonical resource names from display names
//! - [`lookup`] - index lookups used for tag exclusion
//! - [`hcl`] - HCL document model, writer and heredoc encoder
//! - [`render`] - per-kind monitor renderers
//! - [`export`] - the export coordinator and its worker pool
//!
//! # Export Workflow
//!
//! 1. **Discover**: run the entity search and apply the monitor id filter
//! 2. **Provider**: write the provider file once
//! 3. **Dispatch**: queue every monitor for the worker pool
//! 4. **Render**: each worker classifies, fetches detail, renders and writes
//! 5. **Drain**: wait for one completion signal per monitor
//! 6. **Report**: return the directives and the aggregated error
//!
//! # Example
//!
//! ```rust,no_run
//! use tfsynth::config::load_config;
//! use tfsynth::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("tfsynth.toml")?;
//! let coordinator = ExportCoordinator::new(config)?;
//!
//! let outcome = coordinator.execute_export().await?;
//! for directive in &outcome.directives {
//!     println!("{}", directive.import_command());
//! }
//! if let Some(error) = outcome.error {
//!     eprintln!("{error}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod hcl;
pub mod lookup;
pub mod naming;
pub mod render;

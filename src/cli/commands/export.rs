//! Export command implementation
//!
//! Runs the export pipeline and prints one `terraform import` command per
//! exported monitor.

use crate::config::{load_config, TfsynthConfig};
use crate::core::export::{ExportCoordinator, ExportOutcome};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Render everything but write no files
    #[arg(long)]
    pub dry_run: bool,

    /// Override the output directory
    #[arg(short, long)]
    pub output_directory: Option<String>,

    /// Export only these monitor guids (repeatable or comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub monitor_id: Vec<String>,

    /// Override the entity search query
    #[arg(long)]
    pub locator_query: Option<String>,

    /// Override the number of concurrent workers
    #[arg(long)]
    pub parallel_workers: Option<usize>,

    /// Don't write the provider file
    #[arg(long)]
    pub skip_provider_output: bool,
}

impl ExportArgs {
    /// Execute the export command
    ///
    /// Exit codes: 0 success, 1 partial failure, 2 configuration error,
    /// 4 client initialization failure, 5 fatal export error.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        if config.application.dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            eprintln!("DRY RUN MODE - no files will be written");
        }

        let coordinator = match ExportCoordinator::new(config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(4);
            }
        };

        let outcome = match coordinator.execute_export().await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5);
            }
        };

        Ok(report(&outcome))
    }

    fn apply_overrides(&self, config: &mut TfsynthConfig) {
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Some(dir) = &self.output_directory {
            tracing::info!(output_directory = %dir, "Overriding output directory from CLI");
            config.export.output_directory = dir.clone();
        }

        let ids: Vec<String> = self
            .monitor_id
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        if !ids.is_empty() {
            tracing::info!(monitor_ids = ?ids, "Overriding monitor ids from CLI");
            config.export.monitor_ids = ids;
        }

        if let Some(query) = &self.locator_query {
            tracing::info!(query = %query, "Overriding locator query from CLI");
            config.export.locator_query = query.clone();
        }

        if let Some(workers) = self.parallel_workers {
            tracing::info!(workers = workers, "Overriding parallel workers from CLI");
            config.export.parallel_workers = workers;
        }

        if self.skip_provider_output {
            config.export.skip_provider_output = true;
        }
    }
}

/// Print the import commands and summary, returning the exit code
fn report(outcome: &ExportOutcome) -> i32 {
    let mut commands: Vec<String> = outcome
        .directives
        .iter()
        .map(|directive| directive.import_command())
        .collect();
    commands.sort();
    for command in &commands {
        println!("{command}");
    }

    let summary = &outcome.summary;
    eprintln!();
    eprintln!("Export Summary:");
    eprintln!("  Discovered: {}", summary.discovered);
    eprintln!("  Dispatched: {}", summary.dispatched);
    eprintln!("  Exported: {}", summary.exported);
    eprintln!(
        "  Skipped: {} (no regions: {}, unsupported type: {})",
        summary.total_skipped(),
        summary.skipped_no_regions,
        summary.skipped_unsupported
    );
    eprintln!("  Failed: {}", summary.failed);
    eprintln!("  Duration: {:.2}s", summary.duration.as_secs_f64());

    match &outcome.error {
        Some(error) => {
            eprintln!();
            eprintln!("{error}");
            1
        }
        None => 0,
    }
}

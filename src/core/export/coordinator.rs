//! Export coordinator - main orchestrator for the export process
//!
//! Runs one export: discover monitors, write the provider file, then fan the
//! monitors out to a fixed pool of workers.
//!
//! # Concurrency
//!
//! - The work queue is an `mpsc` channel sized to the number of monitors,
//!   so enqueueing never waits. Workers share its receiver behind a mutex and
//!   exit once it is closed and drained.
//! - Directives are appended to one `Vec` behind a mutex.
//! - Hard errors are sent to a dedicated listener task, which keeps them in
//!   arrival order until every sender is gone.
//! - Each monitor signals a [`CompletionCounter`] exactly once, whatever its
//!   outcome; the coordinator waits for all signals before collecting.
//!
//! There is no watchdog: a remote call that never returns blocks its worker
//! until the HTTP client's own timeout fires.

use crate::adapters::nerdgraph::{search_monitors, select_monitors, DetailFetcher, GraphQlClient, NerdGraphClient};
use crate::config::TfsynthConfig;
use crate::core::export::summary::{ExportOutcome, ExportSummary};
use crate::core::render::{
    provider_document, provider_file_name, DocumentWriter, MonitorRenderer, RenderOutcome,
    RenderTables, SkipReason,
};
use crate::domain::{ExporterError, ImportDirective, MonitorEntity, Result};
use crate::{log_monitor_failed, log_monitor_skipped};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex, Notify};

/// Counts per-monitor completion signals
///
/// [`wait`](Self::wait) returns once `expected` signals have been seen.
#[derive(Debug)]
pub struct CompletionCounter {
    expected: usize,
    completed: AtomicUsize,
    notify: Notify,
}

impl CompletionCounter {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            completed: AtomicUsize::new(0),
            notify: Notify::new(),
        }
    }

    /// Record one completed monitor
    pub fn complete(&self) {
        let completed = self.completed.fetch_add(1, Ordering::AcqRel) + 1;
        if completed >= self.expected {
            self.notify.notify_one();
        }
    }

    /// Guard that records a completion when dropped, including on unwind
    pub fn guard(self: &Arc<Self>) -> CompletionGuard {
        CompletionGuard {
            counter: Arc::clone(self),
        }
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    /// Wait until every expected monitor has signalled
    pub async fn wait(&self) {
        while self.completed() < self.expected {
            self.notify.notified().await;
        }
    }
}

/// Signals its [`CompletionCounter`] on drop
pub struct CompletionGuard {
    counter: Arc<CompletionCounter>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.counter.complete();
    }
}

/// Per-outcome counters shared by the workers
#[derive(Debug, Default)]
struct WorkerTally {
    exported: AtomicUsize,
    skipped_no_regions: AtomicUsize,
    skipped_unsupported: AtomicUsize,
    failed: AtomicUsize,
}

impl WorkerTally {
    fn record_into(&self, summary: &mut ExportSummary) {
        summary.exported = self.exported.load(Ordering::Acquire);
        summary.skipped_no_regions = self.skipped_no_regions.load(Ordering::Acquire);
        summary.skipped_unsupported = self.skipped_unsupported.load(Ordering::Acquire);
        summary.failed = self.failed.load(Ordering::Acquire);
    }
}

/// Everything a worker needs, cloned once per worker
#[derive(Clone)]
struct WorkerContext {
    queue: Arc<Mutex<mpsc::Receiver<MonitorEntity>>>,
    renderer: MonitorRenderer,
    directives: Arc<Mutex<Vec<ImportDirective>>>,
    errors: mpsc::Sender<String>,
    progress: Arc<CompletionCounter>,
    tally: Arc<WorkerTally>,
}

/// Export coordinator
pub struct ExportCoordinator {
    config: TfsynthConfig,
    client: Arc<dyn GraphQlClient>,
    renderer: MonitorRenderer,
}

impl ExportCoordinator {
    /// Create a coordinator talking to NerdGraph over HTTPS
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client can't be built.
    pub fn new(config: TfsynthConfig) -> Result<Self> {
        let client = Arc::new(NerdGraphClient::new(config.newrelic.clone())?);
        Ok(Self::with_client(config, client))
    }

    /// Create a coordinator on top of any GraphQL client
    pub fn with_client(config: TfsynthConfig, client: Arc<dyn GraphQlClient>) -> Self {
        Self::with_tables(config, client, RenderTables::default())
    }

    /// Create a coordinator with custom region and interval tables
    pub fn with_tables(
        config: TfsynthConfig,
        client: Arc<dyn GraphQlClient>,
        tables: RenderTables,
    ) -> Self {
        let writer = DocumentWriter::new(
            config.export.output_directory.clone(),
            config.application.dry_run,
        );
        let renderer = MonitorRenderer::new(
            Arc::new(tables),
            DetailFetcher::new(Arc::clone(&client)),
            writer,
            config.newrelic.account_id,
        );

        Self {
            config,
            client,
            renderer,
        }
    }

    /// Execute the export
    ///
    /// 1. Searches NerdGraph for monitors and applies the id filter
    /// 2. Writes the provider file unless suppressed
    /// 3. Renders every monitor on the worker pool
    ///
    /// # Errors
    ///
    /// Fails outright only when the run can't start: invalid monitor ids, a
    /// failed search, or an unwritable provider file. Per-monitor failures
    /// are reported through [`ExportOutcome::error`].
    pub async fn execute_export(&self) -> Result<ExportOutcome> {
        let start_time = Instant::now();

        tracing::info!(
            account_id = self.config.newrelic.account_id,
            query = %self.config.export.locator_query,
            output_directory = %self.renderer.writer().output_directory().display(),
            dry_run = self.renderer.writer().is_dry_run(),
            "Starting export"
        );

        let wanted = self
            .config
            .export
            .monitor_guids()
            .map_err(ExporterError::Configuration)?;

        let discovered =
            search_monitors(self.client.as_ref(), &self.config.export.locator_query).await?;
        let discovered_count = discovered.len();
        let monitors = select_monitors(discovered, &wanted);

        tracing::info!(
            discovered = discovered_count,
            selected = monitors.len(),
            "Monitors discovered"
        );

        if !wanted.is_empty() && monitors.len() < wanted.len() {
            tracing::warn!(
                requested = wanted.len(),
                matched = monitors.len(),
                "Some requested monitor ids were not found"
            );
        }

        if !self.config.export.skip_provider_output {
            self.write_provider().await?;
        }

        let mut outcome = self.export_monitors(monitors).await;
        outcome.summary.discovered = discovered_count;
        outcome.summary.duration = start_time.elapsed();
        outcome.summary.log_summary();

        Ok(outcome)
    }

    async fn write_provider(&self) -> Result<()> {
        let account_id = self.config.newrelic.account_id;
        let path = self
            .renderer
            .writer()
            .write_named(
                &provider_file_name(account_id),
                &provider_document(account_id, &self.config.newrelic.region),
            )
            .await?;

        tracing::debug!(path = %path.display(), "Provider file written");
        Ok(())
    }

    /// Render a batch of monitors on the worker pool
    ///
    /// Never fails as a whole: hard per-monitor errors are aggregated into a
    /// single [`ExporterError::PartialBatchFailure`] in the order they
    /// reached the error listener, and every other monitor is still
    /// processed.
    pub async fn export_monitors(&self, monitors: Vec<MonitorEntity>) -> ExportOutcome {
        let start_time = Instant::now();
        let dispatched = monitors.len();
        let mut summary = ExportSummary::new();
        summary.discovered = dispatched;
        summary.dispatched = dispatched;

        if dispatched == 0 {
            tracing::info!("No monitors to export");
            return ExportOutcome::empty(summary.with_duration(start_time.elapsed()));
        }

        let worker_count = self.config.export.parallel_workers.clamp(1, dispatched);
        let (work_tx, work_rx) = mpsc::channel(dispatched);
        let (error_tx, mut error_rx) = mpsc::channel::<String>(dispatched);

        let collector = tokio::spawn(async move {
            let mut failures = Vec::new();
            while let Some(failure) = error_rx.recv().await {
                failures.push(failure);
            }
            failures
        });

        let context = WorkerContext {
            queue: Arc::new(Mutex::new(work_rx)),
            renderer: self.renderer.clone(),
            directives: Arc::new(Mutex::new(Vec::with_capacity(dispatched))),
            errors: error_tx,
            progress: Arc::new(CompletionCounter::new(dispatched)),
            tally: Arc::new(WorkerTally::default()),
        };

        tracing::debug!(workers = worker_count, monitors = dispatched, "Starting worker pool");

        let workers: Vec<_> = (0..worker_count)
            .map(|worker| tokio::spawn(run_worker(worker, context.clone())))
            .collect();

        for monitor in monitors {
            if let Err(e) = work_tx.send(monitor).await {
                // Only possible if every worker is gone
                tracing::error!(monitor_guid = %e.0.guid, "Work queue closed early");
                context.progress.complete();
            }
        }
        drop(work_tx);

        context.progress.wait().await;

        for (worker, result) in futures::future::join_all(workers).await.into_iter().enumerate() {
            if let Err(e) = result {
                tracing::error!(worker = worker, error = %e, "Export worker terminated abnormally");
            }
        }

        let WorkerContext {
            directives,
            errors,
            progress,
            tally,
            ..
        } = context;
        drop(errors);

        let failures = match collector.await {
            Ok(failures) => failures,
            Err(e) => vec![format!("error listener terminated abnormally: {e}")],
        };

        tally.record_into(&mut summary);
        summary.completions = progress.completed();

        let directives = std::mem::take(&mut *directives.lock().await);
        let error = (!failures.is_empty())
            .then_some(ExporterError::PartialBatchFailure { failures });

        ExportOutcome {
            directives,
            error,
            summary: summary.with_duration(start_time.elapsed()),
        }
    }
}

async fn run_worker(worker: usize, context: WorkerContext) {
    loop {
        let next = context.queue.lock().await.recv().await;
        let Some(monitor) = next else {
            break;
        };
        let _done = context.progress.guard();

        tracing::debug!(
            worker = worker,
            monitor_guid = %monitor.guid,
            monitor_type = %monitor.monitor_type,
            "Rendering monitor"
        );

        match context.renderer.render(&monitor).await {
            Ok(RenderOutcome::Exported(directive)) => {
                context.tally.exported.fetch_add(1, Ordering::AcqRel);
                context.directives.lock().await.push(directive);
            }
            Ok(RenderOutcome::Skipped(reason)) => {
                let counter = match reason {
                    SkipReason::NoRegions => &context.tally.skipped_no_regions,
                    SkipReason::UnsupportedType => &context.tally.skipped_unsupported,
                };
                counter.fetch_add(1, Ordering::AcqRel);
                log_monitor_skipped!(monitor.guid, monitor.name, reason);
            }
            Err(e) => {
                context.tally.failed.fetch_add(1, Ordering::AcqRel);
                log_monitor_failed!(monitor.guid, monitor.name, e);
                let failure = format!("monitor {} ({}): {e}", monitor.guid, monitor.name);
                if context.errors.send(failure).await.is_err() {
                    tracing::error!(worker = worker, "Error listener closed early");
                }
            }
        }
    }

    tracing::debug!(worker = worker, "Export worker finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        secret_string, ApplicationConfig, ExportConfig, LoggingConfig, NewRelicConfig,
    };
    use crate::domain::RemoteQueryError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    /// Serves an entity search and fails every detail query
    struct SearchOnlyClient {
        entities: Value,
    }

    #[async_trait]
    impl GraphQlClient for SearchOnlyClient {
        async fn query(&self, query: &str, _variables: Value) -> std::result::Result<Value, RemoteQueryError> {
            if query.contains("entitySearch") {
                Ok(json!({ "actor": { "entitySearch": { "results": { "entities": self.entities }}}}))
            } else {
                Err(RemoteQueryError::ConnectionFailed("detail unavailable".to_string()))
            }
        }
    }

    fn config(dir: &TempDir, workers: usize) -> TfsynthConfig {
        TfsynthConfig {
            application: ApplicationConfig::default(),
            newrelic: NewRelicConfig {
                account_id: 42,
                api_key: secret_string("NRAK-TEST".to_string()),
                region: "US".to_string(),
                graphql_url: None,
                timeout_seconds: 5,
            },
            export: ExportConfig {
                parallel_workers: workers,
                output_directory: dir.path().to_string_lossy().to_string(),
                ..ExportConfig::default()
            },
            logging: LoggingConfig::default(),
        }
    }

    fn entity(guid: &str, name: &str, monitor_type: &str) -> Value {
        json!({
            "guid": guid,
            "name": name,
            "monitorType": monitor_type,
            "tags": [{ "key": "publicLocation", "values": ["Washington, DC, USA"] }]
        })
    }

    #[tokio::test]
    async fn test_completion_counter_waits_for_all_signals() {
        let counter = Arc::new(CompletionCounter::new(3));
        let handles: Vec<_> = (0..3)
            .map(|_| {
                let guard = counter.guard();
                tokio::spawn(async move { drop(guard) })
            })
            .collect();

        counter.wait().await;
        assert_eq!(counter.completed(), 3);
        futures::future::join_all(handles).await;
    }

    #[tokio::test]
    async fn test_completion_counter_signal_before_wait() {
        let counter = CompletionCounter::new(1);
        counter.complete();
        counter.wait().await;
        assert_eq!(counter.completed(), 1);
    }

    #[tokio::test]
    async fn test_execute_export_mixes_outcomes() {
        let dir = TempDir::new().unwrap();
        let client = Arc::new(SearchOnlyClient {
            entities: json!([
                entity("g1", "Login Check", "BROWSER"),
                entity("g2", "Checkout", "STEP_MONITOR"),
                entity("g3", "Api", "SCRIPT_API"),
                {}
            ]),
        });
        let coordinator = ExportCoordinator::with_client(config(&dir, 2), client);

        let outcome = coordinator.execute_export().await.unwrap();

        assert_eq!(outcome.directives.len(), 1);
        assert_eq!(outcome.directives[0].name, "login_check");
        assert!(outcome.is_partial_failure());
        let message = outcome.error.unwrap().to_string();
        assert!(message.starts_with(crate::domain::PARTIAL_FAILURE_HEADER));
        assert!(message.contains("monitor g2 (Checkout)"));

        assert_eq!(outcome.summary.discovered, 3);
        assert_eq!(outcome.summary.dispatched, 3);
        assert_eq!(outcome.summary.skipped_unsupported, 1);
        assert_eq!(outcome.summary.failed, 1);
        assert_eq!(outcome.summary.completions, 3);
        assert!(dir.path().join("newrelic_provider_42.tf").exists());
        assert!(dir.path().join("login_check.tf").exists());
    }

    #[tokio::test]
    async fn test_execute_export_respects_monitor_ids_and_skip_provider() {
        let dir = TempDir::new().unwrap();
        let client = Arc::new(SearchOnlyClient {
            entities: json!([
                entity("g1", "Login Check", "BROWSER"),
                entity("g2", "Home Page", "BROWSER")
            ]),
        });
        let mut config = config(&dir, 4);
        config.export.monitor_ids = vec!["g2".to_string()];
        config.export.skip_provider_output = true;

        let outcome = ExportCoordinator::with_client(config, client)
            .execute_export()
            .await
            .unwrap();

        assert!(outcome.error.is_none());
        assert_eq!(outcome.directives.len(), 1);
        assert_eq!(outcome.directives[0].id.as_str(), "g2");
        assert_eq!(outcome.summary.discovered, 2);
        assert_eq!(outcome.summary.dispatched, 1);
        assert!(!dir.path().join("newrelic_provider_42.tf").exists());
    }

    #[tokio::test]
    async fn test_execute_export_search_failure_is_fatal() {
        struct FailingClient;

        #[async_trait]
        impl GraphQlClient for FailingClient {
            async fn query(&self, _query: &str, _variables: Value) -> std::result::Result<Value, RemoteQueryError> {
                Err(RemoteQueryError::HttpStatus {
                    status: 401,
                    message: "unauthorized".to_string(),
                })
            }
        }

        let dir = TempDir::new().unwrap();
        let result = ExportCoordinator::with_client(config(&dir, 1), Arc::new(FailingClient))
            .execute_export()
            .await;

        assert!(matches!(result, Err(ExporterError::RemoteQuery(_))));
    }

    #[test]
    fn test_writer_follows_config() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir, 2);
        config.application.dry_run = true;
        let client = Arc::new(SearchOnlyClient { entities: json!([]) });

        let coordinator = ExportCoordinator::with_client(config, client);

        assert!(coordinator.renderer.writer().is_dry_run());
        assert_eq!(coordinator.renderer.writer().output_directory(), dir.path());
    }

    #[tokio::test]
    async fn test_export_monitors_empty_batch() {
        let dir = TempDir::new().unwrap();
        let client = Arc::new(SearchOnlyClient { entities: json!([]) });

        let outcome = ExportCoordinator::with_client(config(&dir, 3), client)
            .export_monitors(Vec::new())
            .await;

        assert!(outcome.directives.is_empty());
        assert!(outcome.error.is_none());
        assert_eq!(outcome.summary.completions, 0);
    }
}

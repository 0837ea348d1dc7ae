//! Background worker for continuous Janitor operation

use crate::{Janitor, JanitorConfig, JanitorError};
use flashpaper_domain::SnippetStore;
use std::future::Future;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Background worker that runs the Janitor on a schedule
///
/// Shutdown is graceful: once the shutdown future resolves no new sweep is
/// started, and a sweep already in progress always runs to completion.
///
/// # Examples
///
/// ```no_run
/// use flashpaper_cipher::SnippetCipher;
/// use flashpaper_janitor::{JanitorConfig, JanitorWorker};
/// use flashpaper_store::SqliteStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut store = SqliteStore::open("flashpaper.db", SnippetCipher::from_env()?)?;
///     let mut worker = JanitorWorker::new(JanitorConfig::default())?;
///
///     // Run until Ctrl+C
///     worker.run_until_ctrl_c(&mut store).await?;
///     Ok(())
/// }
/// ```
pub struct JanitorWorker {
    janitor: Janitor,
    interval: Duration,
}

impl JanitorWorker {
    /// Create a new background worker with the given configuration
    ///
    /// # Errors
    ///
    /// Returns [`JanitorError::Config`] if the sweep interval is zero.
    pub fn new(config: JanitorConfig) -> Result<Self, JanitorError> {
        config.validate()?;
        let interval = config.sweep_interval();
        Ok(Self {
            janitor: Janitor::new(config),
            interval,
        })
    }

    /// Create a worker with default configuration
    pub fn default_config() -> Self {
        Self {
            janitor: Janitor::default_config(),
            interval: JanitorConfig::default().sweep_interval(),
        }
    }

    /// Run the worker until `shutdown` resolves
    ///
    /// The first sweep starts immediately. Sweep failures are logged and the
    /// worker keeps its schedule; retrying is left to the next tick.
    ///
    /// Each sweep calls the store synchronously on the current task. With a
    /// blocking store such as SQLite a locked database holds the runtime
    /// thread for up to the store's busy timeout, so embedders sharing a
    /// runtime with latency-sensitive tasks should run the worker on its own
    /// thread or runtime.
    pub async fn run<S, F>(&mut self, store: &mut S, shutdown: F) -> Result<(), JanitorError>
    where
        S: SnippetStore,
        S::Error: std::fmt::Display,
        F: Future<Output = ()>,
    {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        tracing::info!("Janitor worker started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                // A pending shutdown wins over a due tick.
                biased;

                _ = &mut shutdown => {
                    tracing::info!("Shutdown signal received, stopping janitor");
                    break;
                }
                _ = ticker.tick() => {
                    tracing::debug!("Starting sweep cycle");

                    if let Err(e) = self.janitor.sweep(store) {
                        tracing::error!("Sweep failed: {}", e);
                    }
                }
            }
        }

        let metrics = self.janitor.metrics();
        tracing::info!("Janitor stopped. Final metrics:\n{}", metrics.summary());

        Ok(())
    }

    /// Run the worker until Ctrl+C
    pub async fn run_until_ctrl_c<S>(&mut self, store: &mut S) -> Result<(), JanitorError>
    where
        S: SnippetStore,
        S::Error: std::fmt::Display,
    {
        let ctrl_c = async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "failed to listen for ctrl_c");
            }
        };
        self.run(store, ctrl_c).await
    }

    /// Run for a specific number of cycles (useful for testing)
    ///
    /// Unlike [`run`](Self::run), a failed sweep stops the worker.
    pub async fn run_cycles<S>(&mut self, store: &mut S, cycles: usize) -> Result<(), JanitorError>
    where
        S: SnippetStore,
        S::Error: std::fmt::Display,
    {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            "Janitor worker started for {} cycles (interval: {:?})",
            cycles,
            self.interval
        );

        for cycle in 0..cycles {
            ticker.tick().await;

            tracing::debug!("Starting sweep cycle {}/{}", cycle + 1, cycles);

            if let Err(e) = self.janitor.sweep(store) {
                tracing::error!("Sweep {}/{} failed: {}", cycle + 1, cycles, e);
                return Err(e);
            }
        }

        let metrics = self.janitor.metrics();
        tracing::info!(
            "Janitor finished {} cycles. Final metrics:\n{}",
            cycles,
            metrics.summary()
        );

        Ok(())
    }

    /// Get a reference to the janitor's current metrics
    pub fn metrics(&self) -> &crate::JanitorMetrics {
        self.janitor.metrics()
    }

    /// Reset the janitor's metrics counters
    pub fn reset_metrics(&mut self) {
        self.janitor.reset_metrics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockStore;
    use flashpaper_domain::lifecycle;
    use tokio::sync::oneshot;

    #[test]
    fn test_worker_rejects_zero_interval() {
        let config = JanitorConfig {
            sweep_interval_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            JanitorWorker::new(config),
            Err(JanitorError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_worker_creation() {
        let worker = JanitorWorker::default_config();
        assert_eq!(worker.metrics().sweep_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_cycles() {
        let mut store = MockStore::new();
        store.add(1, 0, lifecycle::unix_now() - 60);

        let mut worker = JanitorWorker::new(JanitorConfig::default()).unwrap();
        worker.run_cycles(&mut store, 2).await.unwrap();

        assert_eq!(worker.metrics().sweep_count, 2);
        assert_eq!(worker.metrics().total_deleted, 1);
        assert!(store.snippets.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_cycles_stops_on_failure() {
        let mut store = MockStore::new();
        store.fail = true;

        let mut worker = JanitorWorker::new(JanitorConfig::default()).unwrap();
        let result = worker.run_cycles(&mut store, 3).await;

        assert!(matches!(result, Err(JanitorError::Store(_))));
        assert_eq!(worker.metrics().failed_sweeps, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_shutdown_prevents_new_sweeps() {
        let mut store = MockStore::new();
        let (tx, rx) = oneshot::channel::<()>();
        tx.send(()).unwrap();

        let mut worker = JanitorWorker::new(JanitorConfig::default()).unwrap();
        worker
            .run(&mut store, async {
                rx.await.ok();
            })
            .await
            .unwrap();

        assert_eq!(worker.metrics().sweep_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_sweeps_on_schedule_until_shutdown() {
        let mut store = MockStore::new();
        let config = JanitorConfig {
            sweep_interval_secs: 10,
            ..Default::default()
        };
        let mut worker = JanitorWorker::new(config).unwrap();

        // Ticks at 0s, 10s and 20s; shutdown at 25s
        worker
            .run(&mut store, tokio::time::sleep(Duration::from_secs(25)))
            .await
            .unwrap();

        assert_eq!(worker.metrics().sweep_count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_survives_failed_sweeps() {
        let mut store = MockStore::new();
        store.fail = true;
        let mut worker = JanitorWorker::new(JanitorConfig::default()).unwrap();

        worker
            .run(&mut store, tokio::time::sleep(Duration::from_secs(15)))
            .await
            .unwrap();

        assert_eq!(worker.metrics().failed_sweeps, 2);
        assert_eq!(worker.metrics().sweep_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_metrics() {
        let mut store = MockStore::new();
        let mut worker = JanitorWorker::new(JanitorConfig::default()).unwrap();

        worker.run_cycles(&mut store, 1).await.unwrap();
        assert_eq!(worker.metrics().sweep_count, 1);

        worker.reset_metrics();
        assert_eq!(worker.metrics().sweep_count, 0);
    }
}

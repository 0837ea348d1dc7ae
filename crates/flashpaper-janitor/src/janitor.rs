//! Core Janitor implementation: one bulk delete per sweep

use crate::{JanitorConfig, JanitorError, JanitorMetrics};
use flashpaper_domain::lifecycle;
use flashpaper_domain::SnippetStore;
use std::time::Instant;

/// Janitor service that reclaims expired and burnt snippets
///
/// Each sweep issues a single bulk delete over every row that is expired,
/// or burnt with a positive view ceiling. No coordination with consume is
/// needed: a dead snippet never becomes alive again, so a sweep racing a
/// read can only agree with it.
///
/// # Examples
///
/// ```no_run
/// use flashpaper_cipher::SnippetCipher;
/// use flashpaper_janitor::{Janitor, JanitorConfig};
/// use flashpaper_store::SqliteStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = SqliteStore::open("flashpaper.db", SnippetCipher::from_env()?)?;
/// let mut janitor = Janitor::new(JanitorConfig::default());
///
/// let metrics = janitor.sweep(&mut store)?;
/// println!("{}", metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct Janitor {
    config: JanitorConfig,
    metrics: JanitorMetrics,
}

impl Janitor {
    /// Create a new Janitor with the given configuration
    pub fn new(config: JanitorConfig) -> Self {
        Self {
            config,
            metrics: JanitorMetrics::new(),
        }
    }

    /// Create a Janitor with default configuration
    pub fn default_config() -> Self {
        Self::new(JanitorConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &JanitorMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Perform a sweep at the current time
    ///
    /// Returns the updated metrics after the sweep.
    pub fn sweep<S: SnippetStore>(&mut self, store: &mut S) -> Result<JanitorMetrics, JanitorError>
    where
        S::Error: std::fmt::Display,
    {
        self.sweep_at(store, lifecycle::unix_now())
    }

    /// Perform a sweep as of `now` (Unix seconds)
    pub fn sweep_at<S: SnippetStore>(
        &mut self,
        store: &mut S,
        now: u64,
    ) -> Result<JanitorMetrics, JanitorError>
    where
        S::Error: std::fmt::Display,
    {
        let start = Instant::now();

        let outcome = if self.config.dry_run {
            store.count_dead(now)
        } else {
            store.purge_dead(now)
        };
        self.metrics.total_runtime_ms += start.elapsed().as_millis() as u64;

        let count = match outcome {
            Ok(count) => count,
            Err(e) => {
                self.metrics.record_failure();
                return Err(JanitorError::Store(e.to_string()));
            }
        };

        if self.config.dry_run {
            tracing::info!("DRY RUN: Would delete {} dead snippets", count);
            self.metrics.record_dry_run(count);
        } else {
            if count > 0 {
                tracing::info!("Janitor cleaned {} dead snippets", count);
            } else {
                tracing::debug!("Janitor found no dead snippets");
            }
            self.metrics.record_sweep(count);
        }

        Ok(self.metrics.clone())
    }
}

//! Metrics collection for Janitor operations

/// Metrics collected during Janitor operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JanitorMetrics {
    /// Completed sweep cycles (including dry runs)
    pub sweep_count: usize,

    /// Sweep cycles that failed at the store
    pub failed_sweeps: usize,

    /// Snippets deleted across all sweeps
    pub total_deleted: usize,

    /// Snippets deleted by the most recent successful sweep
    pub last_deleted: usize,

    /// Snippets a dry run would have deleted, across all dry runs
    pub would_delete: usize,

    /// Total time spent sweeping, in milliseconds
    pub total_runtime_ms: u64,
}

impl JanitorMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed sweep that deleted `deleted` snippets
    pub fn record_sweep(&mut self, deleted: usize) {
        self.sweep_count += 1;
        self.total_deleted += deleted;
        self.last_deleted = deleted;
    }

    /// Record a completed dry run that found `count` dead snippets
    pub fn record_dry_run(&mut self, count: usize) {
        self.sweep_count += 1;
        self.would_delete += count;
        self.last_deleted = 0;
    }

    /// Record a sweep that failed
    pub fn record_failure(&mut self) {
        self.failed_sweeps += 1;
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Janitor Metrics Summary".to_string(),
            "======================".to_string(),
            format!("Sweep cycles: {}", self.sweep_count),
            format!("Failed sweeps: {}", self.failed_sweeps),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            format!("Deleted: {} (last sweep: {})", self.total_deleted, self.last_deleted),
        ];

        if self.would_delete > 0 {
            lines.push(format!("Dry run, would delete: {}", self.would_delete));
        }

        lines.join("\n")
    }
}

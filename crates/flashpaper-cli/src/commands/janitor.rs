//! Janitor command implementation.

use crate::error::Result;
use crate::output::Formatter;
use flashpaper_janitor::{JanitorConfig, JanitorWorker};
use flashpaper_store::SqliteStore;

/// Run the background janitor until Ctrl+C.
pub async fn execute_janitor(
    config: &JanitorConfig,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let mut worker = JanitorWorker::new(config.clone())?;

    println!(
        "{}",
        formatter.info(&format!(
            "Janitor running every {}s, press Ctrl+C to stop",
            config.sweep_interval_secs
        ))
    );

    worker.run_until_ctrl_c(store).await?;

    println!("{}", formatter.success("Janitor stopped"));
    println!("{}", worker.metrics().summary());
    Ok(())
}

//! Sweep command implementation.

use crate::cli::SweepArgs;
use crate::error::Result;
use crate::output::Formatter;
use flashpaper_janitor::{Janitor, JanitorConfig};
use flashpaper_store::SqliteStore;

/// Execute a single janitor sweep.
pub fn execute_sweep(
    args: SweepArgs,
    config: &JanitorConfig,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let mut config = config.clone();
    config.dry_run |= args.dry_run;

    let dry_run = config.dry_run;
    let mut janitor = Janitor::new(config);
    let metrics = janitor.sweep(store)?;

    println!("{}", formatter.sweep_result(&metrics, dry_run)?);
    Ok(())
}

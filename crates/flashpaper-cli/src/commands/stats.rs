//! Stats command implementation.

use crate::cli::OwnerArgs;
use crate::commands::parse_owner;
use crate::error::Result;
use crate::output::Formatter;
use flashpaper_domain::{lifecycle, SnippetStore};
use flashpaper_store::SqliteStore;

/// Execute the stats command.
pub fn execute_stats(args: OwnerArgs, store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    let owner = parse_owner(&args.owner)?;
    let stats = store.stats(owner, lifecycle::unix_now())?;
    println!("{}", formatter.stats(&stats)?);
    Ok(())
}

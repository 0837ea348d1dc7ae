//! Read command implementation.

use crate::cli::ReadArgs;
use crate::commands::parse_snippet_id;
use crate::error::Result;
use crate::output::Formatter;
use flashpaper_domain::{lifecycle, RevealedSnippet, SnippetStore};
use flashpaper_store::SqliteStore;

/// Execute the read command.
///
/// Expired, burnt and unknown snippets all surface as
/// [`CliError::Unavailable`](crate::CliError::Unavailable).
pub fn execute_read(args: ReadArgs, store: &mut SqliteStore, formatter: &Formatter) -> Result<()> {
    let revealed = consume(store, &args.id, lifecycle::unix_now())?;
    println!("{}", formatter.revealed(&revealed)?);
    Ok(())
}

fn consume(store: &mut SqliteStore, raw_id: &str, now: u64) -> Result<RevealedSnippet> {
    let id = parse_snippet_id(raw_id)?;
    Ok(store.consume(id, now)?)
}

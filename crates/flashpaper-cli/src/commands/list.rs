//! List command implementation.

use crate::cli::ListArgs;
use crate::commands::parse_owner;
use crate::error::Result;
use crate::output::Formatter;
use flashpaper_domain::{lifecycle, PageRequest, SnippetStore};
use flashpaper_store::SqliteStore;

/// Execute the list command.
pub fn execute_list(args: ListArgs, store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    let owner = parse_owner(&args.owner)?;
    let request = PageRequest::new(args.page, args.per_page);
    let page = store.list_alive(owner, lifecycle::unix_now(), request)?;
    println!("{}", formatter.summaries(&page)?);
    Ok(())
}

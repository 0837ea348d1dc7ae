//! Delete command implementation.

use crate::cli::DeleteArgs;
use crate::commands::{parse_owner, parse_snippet_id};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use flashpaper_domain::SnippetStore;
use flashpaper_store::{SqliteStore, StoreError};

/// Execute the delete command.
pub fn execute_delete(
    args: DeleteArgs,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let id = parse_snippet_id(&args.id)?;
    let owner = parse_owner(&args.owner)?;

    match store.delete_by_owner(id, owner) {
        Ok(()) => {
            println!("{}", formatter.success(&format!("Snippet deleted: {}", id)));
            Ok(())
        }
        Err(StoreError::NotFound) => Err(CliError::NotFound(format!("Snippet {}", id))),
        Err(e) => Err(e.into()),
    }
}

//! Command implementations.

pub mod create;
pub mod delete;
pub mod janitor;
pub mod keygen;
pub mod list;
pub mod read;
pub mod stats;
pub mod sweep;

pub use self::create::execute_create;
pub use self::delete::execute_delete;
pub use self::janitor::execute_janitor;
pub use self::keygen::execute_keygen;
pub use self::list::execute_list;
pub use self::read::execute_read;
pub use self::stats::execute_stats;
pub use self::sweep::execute_sweep;

use crate::error::{CliError, Result};
use flashpaper_domain::{OwnerId, SnippetId};

/// Parse a snippet ID argument.
pub(crate) fn parse_snippet_id(raw: &str) -> Result<SnippetId> {
    SnippetId::from_string(raw)
        .map_err(|e| CliError::InvalidInput(format!("Invalid snippet ID '{}': {}", raw, e)))
}

/// Parse an owner ID argument.
pub(crate) fn parse_owner(raw: &str) -> Result<OwnerId> {
    OwnerId::from_string(raw)
        .map_err(|e| CliError::InvalidInput(format!("Invalid owner ID '{}': {}", raw, e)))
}

//! Create command implementation.

use crate::cli::CreateArgs;
use crate::commands::parse_owner;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use flashpaper_domain::{lifecycle, NewSnippet, SnippetStore};
use flashpaper_store::SqliteStore;
use std::fs;
use std::io::{self, Read};

/// Execute the create command.
pub fn execute_create(
    args: CreateArgs,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let request = build_request(args, || {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    })?;

    let snippet = store.create(request, lifecycle::unix_now())?;
    println!("{}", formatter.snippet_created(&snippet)?);
    Ok(())
}

/// Turn arguments into a creation request, reading content from `--content`,
/// `--file`, or `stdin` in that order.
fn build_request<F>(args: CreateArgs, stdin: F) -> Result<NewSnippet>
where
    F: FnOnce() -> Result<String>,
{
    let content = match (args.content, args.file) {
        (Some(content), _) => content,
        (None, Some(path)) => fs::read_to_string(&path)?,
        (None, None) => stdin()?,
    };

    if content.trim().is_empty() {
        return Err(CliError::InvalidInput("No content provided".to_string()));
    }

    let mut request = NewSnippet::new(content)
        .with_title(args.title)
        .with_language(args.language)
        .with_max_views(args.max_views)
        .with_ttl_minutes(args.ttl_minutes);

    if let Some(owner) = args.owner.as_deref() {
        request = request.owned_by(parse_owner(owner)?);
    }

    Ok(request)
}

//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flashpaper CLI - Share text that burns after reading.
#[derive(Debug, Parser)]
#[command(name = "flashpaper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs or content only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a snippet
    Create(CreateArgs),

    /// Read a snippet, consuming one view
    Read(ReadArgs),

    /// Delete a snippet you own
    Delete(DeleteArgs),

    /// Show counts for an owner
    Stats(OwnerArgs),

    /// List an owner's readable snippets
    List(ListArgs),

    /// Run a single janitor sweep
    Sweep(SweepArgs),

    /// Run the janitor until Ctrl+C
    Janitor,

    /// Generate a fresh encryption key
    Keygen(KeygenArgs),
}

/// Arguments for the create command.
#[derive(Debug, Parser)]
pub struct CreateArgs {
    /// Content to store (read from --file or stdin when omitted)
    #[arg(long, conflicts_with = "file")]
    pub content: Option<String>,

    /// Read content from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Title
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// Language tag (unknown tags fall back to plain text)
    #[arg(short, long, default_value = "text")]
    pub language: String,

    /// Number of reads before the snippet burns
    #[arg(short, long, default_value = "1")]
    pub max_views: u32,

    /// Lifetime in minutes
    #[arg(long, default_value = "10")]
    pub ttl_minutes: u64,

    /// Owner ID
    #[arg(short, long)]
    pub owner: Option<String>,
}

/// Arguments for the read command.
#[derive(Debug, Parser)]
pub struct ReadArgs {
    /// Snippet ID
    pub id: String,
}

/// Arguments for the delete command.
#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Snippet ID
    pub id: String,

    /// Owner ID
    #[arg(short, long)]
    pub owner: String,
}

/// Arguments naming an owner.
#[derive(Debug, Parser)]
pub struct OwnerArgs {
    /// Owner ID
    #[arg(short, long)]
    pub owner: String,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Owner ID
    #[arg(short, long)]
    pub owner: String,

    /// Page number
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Items per page (at most 100)
    #[arg(long, default_value = "10")]
    pub per_page: u32,
}

/// Arguments for the sweep command.
#[derive(Debug, Parser)]
pub struct SweepArgs {
    /// Count dead snippets without deleting them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the keygen command.
#[derive(Debug, Parser)]
pub struct KeygenArgs {
    /// Write the key into the config file
    #[arg(long)]
    pub save: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let cli = Cli::parse_from(["flashpaper", "create", "--content", "hello"]);
        match cli.command {
            Command::Create(args) => {
                assert_eq!(args.content.as_deref(), Some("hello"));
                assert_eq!(args.max_views, 1);
                assert_eq!(args.ttl_minutes, 10);
                assert_eq!(args.language, "text");
                assert!(args.owner.is_none());
            }
            _ => panic!("Expected Create command"),
        }
    }

    #[test]
    fn test_content_and_file_conflict() {
        let result = Cli::try_parse_from([
            "flashpaper",
            "create",
            "--content",
            "x",
            "--file",
            "secret.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_requires_owner() {
        assert!(Cli::try_parse_from(["flashpaper", "delete", "some-id"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["flashpaper", "sweep", "--dry-run", "--format", "json", "--no-color"]);
        assert!(cli.no_color);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(matches!(cli.command, Command::Sweep(SweepArgs { dry_run: true })));
    }

    #[test]
    fn test_list_paging() {
        let cli = Cli::parse_from(["flashpaper", "list", "--owner", "o", "--page", "3"]);
        match cli.command {
            Command::List(args) => {
                assert_eq!(args.page, 3);
                assert_eq!(args.per_page, 10);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Quiet.into();
        assert_eq!(format, crate::config::OutputFormat::Quiet);
    }
}

//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use flashpaper_domain::{Page, RevealedSnippet, Snippet, SnippetStats, SnippetSummary};
use flashpaper_janitor::JanitorMetrics;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a newly created snippet.
    pub fn snippet_created(&self, snippet: &Snippet) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "id": snippet.id.to_string(),
                "title": snippet.title,
                "language": snippet.language,
                "max_views": snippet.max_views,
                "expires_at": snippet.expires_at,
                "created_at": snippet.created_at,
            }))?),
            OutputFormat::Table => Ok(format!(
                "{}\n  burns after {} view(s), expires at {}",
                self.success(&format!("Snippet created: {}", snippet.id)),
                snippet.max_views,
                snippet.expires_at
            )),
            OutputFormat::Quiet => Ok(snippet.id.to_string()),
        }
    }

    /// Format a revealed snippet.
    pub fn revealed(&self, snippet: &RevealedSnippet) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "id": snippet.id.to_string(),
                "title": snippet.title,
                "language": snippet.language,
                "content": snippet.content,
                "current_views": snippet.current_views,
                "max_views": snippet.max_views,
                "views_left": snippet.views_left(),
                "expires_at": snippet.expires_at,
            }))?),
            OutputFormat::Table => {
                let title = if snippet.title.is_empty() {
                    "(untitled)"
                } else {
                    snippet.title.as_str()
                };
                let footer = if snippet.views_left() == 0 {
                    self.warning("This was the last view; the snippet is now burnt")
                } else {
                    self.info(&format!("{} view(s) left", snippet.views_left()))
                };
                Ok(format!(
                    "{} [{}]\n\n{}\n\n{}",
                    self.colorize(title, "cyan"),
                    snippet.language,
                    snippet.content,
                    footer
                ))
            }
            OutputFormat::Quiet => Ok(snippet.content.clone()),
        }
    }

    /// Format owner statistics.
    pub fn stats(&self, stats: &SnippetStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "alive": stats.alive,
                "burnt": stats.burnt,
                "total_views": stats.total_views,
            }))?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Alive", "Burnt", "Total views"]);
                builder.push_record([
                    stats.alive.to_string(),
                    stats.burnt.to_string(),
                    stats.total_views.to_string(),
                ]);
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(format!(
                "{} {} {}",
                stats.alive, stats.burnt, stats.total_views
            )),
        }
    }

    /// Format a page of snippet summaries.
    pub fn summaries(&self, page: &Page<SnippetSummary>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<serde_json::Value> = page
                    .items
                    .iter()
                    .map(|s| {
                        serde_json::json!({
                            "id": s.id.to_string(),
                            "title": s.title,
                            "language": s.language,
                            "current_views": s.current_views,
                            "max_views": s.max_views,
                            "expires_at": s.expires_at,
                            "created_at": s.created_at,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "items": items,
                    "page": page.page,
                    "per_page": page.per_page,
                    "total_items": page.total_items,
                    "total_pages": page.total_pages(),
                }))?)
            }
            OutputFormat::Table => {
                if page.items.is_empty() {
                    return Ok(self.colorize("No snippets found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Title", "Language", "Views", "Expires"]);
                for s in &page.items {
                    builder.push_record([
                        s.id.to_string(),
                        s.title.clone(),
                        s.language.clone(),
                        format!("{}/{}", s.current_views, s.max_views),
                        s.expires_at.to_string(),
                    ]);
                }
                Ok(format!(
                    "{}\nPage {} of {} ({} total)",
                    self.render(builder),
                    page.page,
                    page.total_pages(),
                    page.total_items
                ))
            }
            OutputFormat::Quiet => {
                let ids: Vec<String> = page.items.iter().map(|s| s.id.to_string()).collect();
                Ok(ids.join("\n"))
            }
        }
    }

    /// Format the result of a single sweep.
    pub fn sweep_result(&self, metrics: &JanitorMetrics, dry_run: bool) -> Result<String> {
        let count = if dry_run {
            metrics.would_delete
        } else {
            metrics.last_deleted
        };

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "dry_run": dry_run,
                "count": count,
                "runtime_ms": metrics.total_runtime_ms,
            }))?),
            OutputFormat::Table if dry_run => {
                Ok(self.info(&format!("Would delete {} dead snippet(s)", count)))
            }
            OutputFormat::Table => Ok(self.success(&format!("Deleted {} dead snippet(s)", count))),
            OutputFormat::Quiet => Ok(count.to_string()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashpaper_domain::SnippetId;

    fn revealed(current_views: u32, max_views: u32) -> RevealedSnippet {
        RevealedSnippet {
            id: SnippetId::new(),
            title: "db password".to_string(),
            language: "text".to_string(),
            content: "hunter2".to_string(),
            current_views,
            max_views,
            expires_at: 1_700_000_600,
            created_at: 1_700_000_000,
        }
    }

    fn summary_page() -> Page<SnippetSummary> {
        Page {
            items: vec![SnippetSummary {
                id: SnippetId::new(),
                title: "notes".to_string(),
                language: "go".to_string(),
                max_views: 3,
                current_views: 1,
                expires_at: 1_700_000_600,
                created_at: 1_700_000_000,
            }],
            page: 1,
            per_page: 10,
            total_items: 1,
        }
    }

    #[test]
    fn test_quiet_read_prints_content_only() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.revealed(&revealed(1, 2)).unwrap(), "hunter2");
    }

    #[test]
    fn test_table_read_warns_on_last_view() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.revealed(&revealed(2, 2)).unwrap();
        assert!(output.contains("hunter2"));
        assert!(output.contains("last view"));

        let output = formatter.revealed(&revealed(1, 3)).unwrap();
        assert!(output.contains("2 view(s) left"));
    }

    #[test]
    fn test_json_read() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.revealed(&revealed(1, 2)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["content"], "hunter2");
        assert_eq!(value["views_left"], 1);
    }

    #[test]
    fn test_table_stats() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let stats = SnippetStats {
            alive: 2,
            burnt: 1,
            total_views: 7,
        };
        let output = formatter.stats(&stats).unwrap();
        assert!(output.contains("Alive"));
        assert!(output.contains("Total views"));
        assert!(output.contains('7'));
    }

    #[test]
    fn test_summaries_formats() {
        let page = summary_page();

        let table = Formatter::new(OutputFormat::Table, false)
            .summaries(&page)
            .unwrap();
        assert!(table.contains("Language"));
        assert!(table.contains("1/3"));
        assert!(table.contains("Page 1 of 1"));

        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .summaries(&page)
            .unwrap();
        assert_eq!(quiet, page.items[0].id.to_string());

        let json = Formatter::new(OutputFormat::Json, false)
            .summaries(&page)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_pages"], 1);
        assert_eq!(value["items"][0]["title"], "notes");
    }

    #[test]
    fn test_empty_summaries() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let page: Page<SnippetSummary> = Page {
            items: Vec::new(),
            page: 1,
            per_page: 10,
            total_items: 0,
        };
        assert!(formatter
            .summaries(&page)
            .unwrap()
            .contains("No snippets found"));
    }

    #[test]
    fn test_sweep_result() {
        let mut metrics = JanitorMetrics::new();
        metrics.record_sweep(4);

        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(
            formatter.sweep_result(&metrics, false).unwrap(),
            "✓ Deleted 4 dead snippet(s)"
        );

        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.sweep_result(&metrics, false).unwrap(), "4");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("test"), "⚠ test");
    }
}

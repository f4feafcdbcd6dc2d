use chrono::{DateTime, Local};
use forum_core::ports::SummarySink;
use forum_core::utils::{format_count, format_timestamp};
use forum_core::{ForumSummary, Result};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Markdown report adapter implementation
pub struct MarkdownReportSink {
    output_file: PathBuf,
    source_url: String,
}

impl MarkdownReportSink {
    pub fn new(output_file: impl Into<PathBuf>, source_url: impl Into<String>) -> Self {
        Self {
            output_file: output_file.into(),
            source_url: source_url.into(),
        }
    }

    /// Formats the whole report for a snapshot taken at `scraped_at`
    fn format_markdown(&self, records: &[ForumSummary], scraped_at: &DateTime<Local>) -> String {
        let mut output = String::new();
        output.push_str("# Forenübersicht\n\n");
        output.push_str(&format!("Quelle: <{}>\n\n", self.source_url));
        output.push_str(&format!("*Stand: {}*\n\n", format_timestamp(scraped_at)));
        output.push_str(&format!("*{} Foren*\n\n", records.len()));
        output.push_str("---\n\n");

        for record in records {
            output.push_str(&format!("## {}\n\n", record.name));

            if !record.description.is_empty() {
                output.push_str(&format!("{}\n\n", record.description));
            }

            output.push_str(&format!(
                "- Themen: {}\n- Beiträge: {}\n",
                format_count(record.topic_count),
                format_count(record.post_count)
            ));

            match (record.last_thread_title.as_deref(), record.last_author.as_deref()) {
                (Some(title), Some(author)) if !title.is_empty() => {
                    output.push_str(&format!("- Letzter Thread: *{}* von **{}**\n", title, author));
                }
                (Some(title), None) if !title.is_empty() => {
                    output.push_str(&format!("- Letzter Thread: *{}*\n", title));
                }
                _ => {}
            }

            output.push_str("\n---\n\n");
        }

        output
    }
}

impl SummarySink for MarkdownReportSink {
    fn write(&self, records: &[ForumSummary]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let markdown_content = self.format_markdown(records, &Local::now());
        fs::write(&self.output_file, markdown_content)?;

        info!(path = %self.output_file.display(), count = records.len(), "wrote Markdown report");
        Ok(())
    }
}

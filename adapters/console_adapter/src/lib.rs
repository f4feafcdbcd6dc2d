use forum_core::ports::SummarySink;
use forum_core::utils::format_count;
use forum_core::{ForumSummary, Result};
use std::io::{self, Write};

/// Prints a human-readable report to stdout
#[derive(Debug, Default)]
pub struct ConsoleReportSink;

impl ConsoleReportSink {
    pub fn new() -> Self {
        Self
    }

    /// Renders the report exactly as it is printed
    pub fn render(&self, records: &[ForumSummary]) -> String {
        if records.is_empty() {
            return "Keine Foren gefunden.\n".to_string();
        }

        let mut output = String::new();
        for record in records {
            output.push_str(&format!("Forum: {}\n", record.name));
            output.push_str(&format!("  Beschreibung: {}\n", record.description));
            output.push_str(&format!(
                "  Themen: {}, Beiträge: {}\n",
                format_count(record.topic_count),
                format_count(record.post_count)
            ));

            if let Some(title) = record.last_thread_title.as_deref().filter(|t| !t.is_empty()) {
                output.push_str(&format!(
                    "  Letzter Thread: '{}' von {}\n",
                    title,
                    record.last_author.as_deref().unwrap_or("unbekannt")
                ));
            }
            output.push('\n');
        }
        output
    }
}

impl SummarySink for ConsoleReportSink {
    fn write(&self, records: &[ForumSummary]) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(self.render(records).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

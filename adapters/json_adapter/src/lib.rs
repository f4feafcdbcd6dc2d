use forum_core::ports::SummarySink;
use forum_core::{ForumSummary, Result, ScrapeError};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Writes the summaries as a pretty-printed JSON array
pub struct JsonFileSink {
    output_file: PathBuf,
}

impl JsonFileSink {
    pub fn new(output_file: impl Into<PathBuf>) -> Self {
        Self {
            output_file: output_file.into(),
        }
    }
}

impl SummarySink for JsonFileSink {
    fn write(&self, records: &[ForumSummary]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| ScrapeError::Serialization(e.to_string()))?;

        if let Some(parent) = self.output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.output_file, json)?;

        info!(path = %self.output_file.display(), count = records.len(), "wrote JSON file");
        Ok(())
    }
}

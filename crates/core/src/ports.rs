use crate::domain::ForumSummary;
use crate::error::Result;

/// Retrieves the raw HTML of a page.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Trait for persisting or printing scraped summaries
/// This is a port (interface) that defines how the core communicates with output adapters
pub trait SummarySink: Send + Sync {
    fn write(&self, records: &[ForumSummary]) -> Result<()>;
}

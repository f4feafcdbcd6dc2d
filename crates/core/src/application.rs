use scraper::Html;
use tracing::{info, warn};

use crate::domain::ForumSummary;
use crate::error::Result;
use crate::extractor::extract_summary;
use crate::ports::{PageFetcher, SummarySink};
use crate::selector::select_forum_rows;

/// Parses `html` and extracts one summary per qualifying row, in document order.
pub fn scrape_html(html: &str) -> Vec<ForumSummary> {
    let document = Html::parse_document(html);
    select_forum_rows(&document)
        .map(|row| extract_summary(&row))
        .collect()
}

/// Outcome of one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub url: String,
    /// `false` when the fetch failed and an empty page was scraped instead.
    pub fetched: bool,
    pub records: Vec<ForumSummary>,
}

/// Application service for fetching the forum index and handing its summaries to the sinks
pub struct ScrapeService {
    fetcher: Box<dyn PageFetcher>,
    sinks: Vec<Box<dyn SummarySink>>,
}

impl ScrapeService {
    /// Creates a new ScrapeService with the given dependencies
    pub fn new(fetcher: Box<dyn PageFetcher>, sinks: Vec<Box<dyn SummarySink>>) -> Self {
        Self { fetcher, sinks }
    }

    /// Executes the scrape: fetches the page, extracts summaries and writes them to every sink
    ///
    /// A failed fetch is not an error; the run continues with an empty page and
    /// the sinks receive an empty sequence. Sink failures are returned.
    pub fn execute_scrape(&self, url: &str) -> Result<ScrapeReport> {
        info!(url, "fetching forum index");

        let (html, fetched) = match self.fetcher.fetch(url) {
            Ok(html) => (html, true),
            Err(e) => {
                warn!(error = %e, "fetch failed, continuing with an empty page");
                (String::new(), false)
            }
        };

        let records = scrape_html(&html);
        if records.is_empty() {
            warn!(url, "no forum rows found");
        } else {
            info!(count = records.len(), "extracted forum summaries");
        }

        for sink in &self.sinks {
            sink.write(&records)?;
        }

        Ok(ScrapeReport {
            url: url.to_string(),
            fetched,
            records,
        })
    }
}

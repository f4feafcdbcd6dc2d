use clap::Parser;
use console_adapter::ConsoleReportSink;
use forum_core::config::{FetchConfig, DEFAULT_FORUM_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use forum_core::ports::{PageFetcher, SummarySink};
use forum_core::ScrapeService;
use http_adapter::HttpPageFetcher;
use json_adapter::JsonFileSink;
use markdown_adapter::MarkdownReportSink;
use sqlite_adapter::SqliteSummaryStore;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI tool to scrape the sub-forum overview of a forum index page
#[derive(Parser, Debug)]
#[command(name = "forum-scrape")]
#[command(about = "Extracts sub-forum names, counters and last posts from a forum index page")]
struct Cli {
    /// Forum index page to scrape
    #[arg(short = 'u', long = "url", default_value = DEFAULT_FORUM_URL)]
    url: String,

    /// User-Agent header sent with the request
    #[arg(long = "user-agent", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Request timeout in seconds
    #[arg(long = "timeout-secs", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Write the summaries as JSON to this file
    #[arg(long = "json")]
    json: Option<PathBuf>,

    /// Write a Markdown report to this file
    #[arg(long = "markdown")]
    markdown: Option<PathBuf>,

    /// Append a snapshot to this SQLite database
    #[arg(long = "sqlite")]
    sqlite: Option<PathBuf>,

    /// Do not print the report to stdout
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

impl Cli {
    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            url: self.url.clone(),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    fn sinks(&self) -> Vec<Box<dyn SummarySink>> {
        let mut sinks: Vec<Box<dyn SummarySink>> = Vec::new();
        if !self.quiet {
            sinks.push(Box::new(ConsoleReportSink::new()));
        }
        if let Some(path) = &self.json {
            sinks.push(Box::new(JsonFileSink::new(path.clone())));
        }
        if let Some(path) = &self.markdown {
            sinks.push(Box::new(MarkdownReportSink::new(path.clone(), self.url.clone())));
        }
        if let Some(path) = &self.sqlite {
            sinks.push(Box::new(SqliteSummaryStore::new(path.clone())));
        }
        sinks
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.fetch_config();

    // Instantiate concrete implementations of secondary adapters
    let fetcher: Box<dyn PageFetcher> = match HttpPageFetcher::new(&config) {
        Ok(fetcher) => Box::new(fetcher),
        Err(e) => {
            error!(error = %e, "could not set up HTTP client");
            std::process::exit(1);
        }
    };

    // Instantiate the core service with dependency injection
    let service = ScrapeService::new(fetcher, cli.sinks());

    match service.execute_scrape(&config.url) {
        Ok(report) => {
            info!(
                url = %report.url,
                fetched = report.fetched,
                forums = report.records.len(),
                "scrape finished"
            );
        }
        Err(e) => {
            error!(error = %e, "scrape failed");
            eprintln!("Error during scrape: {}", e);
            std::process::exit(1);
        }
    }
}

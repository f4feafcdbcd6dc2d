use thiserror::Error;

/// Failures that can end a scrape run.
///
/// Field extraction never produces one of these; malformed rows fall back to
/// defaults instead.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

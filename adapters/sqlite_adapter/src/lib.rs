use chrono::Local;
use forum_core::ports::SummarySink;
use forum_core::utils::format_timestamp;
use forum_core::{ForumSummary, Result, ScrapeError};
use rusqlite::{params, Connection};
use std::path::PathBuf;
use tracing::info;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS forum_summaries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        scraped_at TEXT NOT NULL,
        position INTEGER NOT NULL,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        topic_count INTEGER NOT NULL,
        post_count INTEGER NOT NULL,
        last_thread_title TEXT,
        last_author TEXT
    )
"#;

/// SQLite implementation of the SummarySink trait
///
/// Every run appends one snapshot, tagged with its local scrape time.
pub struct SqliteSummaryStore {
    db_path: PathBuf,
}

impl SqliteSummaryStore {
    /// Creates a new SqliteSummaryStore with the given database path
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

// SQLite integers are signed; counters beyond i64::MAX are rejected, not wrapped.
fn sql_count(value: u64) -> rusqlite::Result<i64> {
    i64::try_from(value).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Creates the snapshot table if needed and inserts `records` in one transaction
///
/// Nothing is stored when any record fails to convert.
pub fn store_snapshot(
    conn: &mut Connection,
    records: &[ForumSummary],
    scraped_at: &str,
) -> rusqlite::Result<usize> {
    conn.execute_batch(SCHEMA)?;

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO forum_summaries (
                scraped_at, position, name, description,
                topic_count, post_count, last_thread_title, last_author
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )?;

        for (position, record) in records.iter().enumerate() {
            stmt.execute(params![
                scraped_at,
                position as i64,
                record.name,
                record.description,
                sql_count(record.topic_count)?,
                sql_count(record.post_count)?,
                record.last_thread_title,
                record.last_author,
            ])?;
        }
    }
    tx.commit()?;

    Ok(records.len())
}

impl SummarySink for SqliteSummaryStore {
    fn write(&self, records: &[ForumSummary]) -> Result<()> {
        let storage_error = |e: rusqlite::Error| ScrapeError::Storage(e.to_string());

        let mut conn = Connection::open(&self.db_path).map_err(storage_error)?;
        let scraped_at = format_timestamp(&Local::now());
        let inserted = store_snapshot(&mut conn, records, &scraped_at).map_err(storage_error)?;

        info!(path = %self.db_path.display(), inserted, %scraped_at, "stored forum snapshot");
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

/// One sub-forum entry of the index page.
///
/// `last_thread_title` is `None` when the row carries no "Letzter Beitrag:"
/// label; `Some("")` means the label was there but nothing followed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumSummary {
    pub name: String,
    pub description: String,
    pub topic_count: u64,
    pub post_count: u64,
    pub last_thread_title: Option<String>,
    pub last_author: Option<String>,
}

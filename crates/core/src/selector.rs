//! Structural selection of sub-forum rows.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Number of `<td>` cells in a sub-forum row: forum, topics, posts, last post.
pub const FORUM_ROW_CELLS: usize = 4;

// The index table carries no stable id or class, so every row of every table
// is a candidate.
static TABLE_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table tr").expect("valid row selector"));

pub(crate) static LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("valid link selector"));

/// A table row that qualifies as a sub-forum entry.
#[derive(Debug, Clone, Copy)]
pub struct ForumRow<'a> {
    cells: [ElementRef<'a>; FORUM_ROW_CELLS],
}

impl<'a> ForumRow<'a> {
    /// Accepts rows with exactly four direct `<td>` children whose first cell
    /// holds a link. Anything else (headers, category separators, spacers) is
    /// rejected.
    pub fn from_element(row: ElementRef<'a>) -> Option<Self> {
        let cells: Vec<ElementRef<'a>> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "td")
            .collect();

        let Ok(cells) = <[ElementRef<'a>; FORUM_ROW_CELLS]>::try_from(cells) else {
            return None;
        };

        if cells[0].select(&LINK).next().is_none() {
            debug!("skipping four-cell row without a forum link");
            return None;
        }

        Some(Self { cells })
    }

    /// Forum link, description and the "Letzter Beitrag:" block.
    pub fn forum_cell(&self) -> ElementRef<'a> {
        self.cells[0]
    }

    pub fn topics_cell(&self) -> ElementRef<'a> {
        self.cells[1]
    }

    pub fn posts_cell(&self) -> ElementRef<'a> {
        self.cells[2]
    }

    pub fn last_post_cell(&self) -> ElementRef<'a> {
        self.cells[3]
    }
}

/// Lazily yields the qualifying rows of `document` in document order.
pub fn select_forum_rows(document: &Html) -> impl Iterator<Item = ForumRow<'_>> {
    document.select(&TABLE_ROW).filter_map(ForumRow::from_element)
}

//! Turns one qualifying row into a [`ForumSummary`].
//!
//! Extraction never fails. Missing labels leave optional fields empty and
//! unreadable counters become zero.

use scraper::ElementRef;
use tracing::debug;

use crate::domain::ForumSummary;
use crate::rules::{
    collapse_whitespace, first_token, parse_count, strip_forum_suffix, text_after_label,
    truncate_before_label, AUTHOR_MARKER, LAST_POST_LABEL, TOPICS_LABEL,
};
use crate::selector::{ForumRow, LINK};

pub fn extract_summary(row: &ForumRow<'_>) -> ForumSummary {
    let forum_cell = row.forum_cell();
    let cell_text = element_text(&forum_cell);
    let link_text = first_link_text(&forum_cell).unwrap_or_default();

    let summary = ForumSummary {
        name: forum_name(&link_text, &cell_text),
        description: description(&cell_text, &link_text),
        topic_count: parse_count(&element_text(&row.topics_cell())),
        post_count: parse_count(&element_text(&row.posts_cell())),
        last_thread_title: last_thread_title(&cell_text),
        last_author: last_author(&row.last_post_cell()),
    };

    debug!(
        name = %summary.name,
        topics = summary.topic_count,
        posts = summary.post_count,
        "extracted forum summary"
    );
    summary
}

/// Trimmed link text, or the whole cell when the link is empty.
pub fn forum_name(link_text: &str, cell_text: &str) -> String {
    let name = link_text.trim();
    if name.is_empty() {
        cell_text.trim().to_string()
    } else {
        name.to_string()
    }
}

/// Cell text without the forum name, cut before the statistics block.
pub fn description(cell_text: &str, link_text: &str) -> String {
    let remainder = if link_text.is_empty() {
        cell_text.to_string()
    } else {
        cell_text.replacen(link_text, "", 1)
    };
    let collapsed = collapse_whitespace(&remainder);
    truncate_before_label(&collapsed, TOPICS_LABEL)
        .trim()
        .to_string()
}

/// Title following "Letzter Beitrag:", without author and forum suffix.
///
/// `None` only when the label is missing; a label with nothing usable after
/// it yields `Some("")`.
pub fn last_thread_title(cell_text: &str) -> Option<String> {
    let after_label = text_after_label(cell_text, LAST_POST_LABEL)?;
    let collapsed = collapse_whitespace(after_label);
    let title = truncate_before_label(&collapsed, AUTHOR_MARKER);
    Some(strip_forum_suffix(title).trim().to_string())
}

/// First word after "von " in the last-post cell (or of the whole cell).
pub fn author_token(cell_text: &str) -> String {
    let collapsed = collapse_whitespace(cell_text);
    let tail = text_after_label(&collapsed, AUTHOR_MARKER).unwrap_or(&collapsed);
    first_token(tail).to_string()
}

fn last_author(cell: &ElementRef<'_>) -> Option<String> {
    let mut author = author_token(&element_text(cell));
    if author.is_empty() {
        author = first_link_text(cell)
            .map(|text| text.trim().to_string())
            .unwrap_or_default();
    }
    (!author.is_empty()).then_some(author)
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

fn first_link_text(element: &ElementRef<'_>) -> Option<String> {
    element.select(&LINK).next().map(|link| element_text(&link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::select_forum_rows;
    use scraper::Html;

    fn extract_all(html: &str) -> Vec<ForumSummary> {
        let document = Html::parse_document(html);
        select_forum_rows(&document)
            .map(|row| extract_summary(&row))
            .collect()
    }

    fn table(row: &str) -> String {
        format!("<html><body><table>{row}</table></body></html>")
    }

    #[test]
    fn test_full_row_extraction() {
        let html = table(
            r#"<tr>
                <td><a href="forumdisplay.php?f=1">Allgemein</a> Fragen und Antworten Themen: 120 Letzter Beitrag: Steuererklärung 2023 von Hans M. heute</td>
                <td>120</td>
                <td>450</td>
                <td>von Hans M.</td>
            </tr>"#,
        );

        let summaries = extract_all(&html);

        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.name, "Allgemein");
        assert_eq!(summary.description, "Fragen und Antworten");
        assert_eq!(summary.topic_count, 120);
        assert_eq!(summary.post_count, 450);
        assert_eq!(
            summary.last_thread_title.as_deref(),
            Some("Steuererklärung 2023")
        );
        assert_eq!(summary.last_author.as_deref(), Some("Hans"));
    }

    #[test]
    fn test_thousands_separator_in_counts() {
        let html = table(
            r#"<tr><td><a href="/f">Lohnsteuer</a></td><td>1.234</td><td>12.345.678</td><td></td></tr>"#,
        );

        let summary = &extract_all(&html)[0];
        assert_eq!(summary.topic_count, 1234);
        assert_eq!(summary.post_count, 12_345_678);
    }

    #[test]
    fn test_unparseable_counts_default_to_zero() {
        let html = table(
            r#"<tr><td><a href="/f">Archiv</a></td><td>-</td><td></td><td></td></tr>"#,
        );

        let summary = &extract_all(&html)[0];
        assert_eq!(summary.topic_count, 0);
        assert_eq!(summary.post_count, 0);
    }

    #[test]
    fn test_missing_last_post_label_leaves_title_absent() {
        let html = table(
            r#"<tr><td><a href="/f">Ankündigungen</a> Neuigkeiten rund um ELSTER</td><td>5</td><td>5</td><td>von Admin</td></tr>"#,
        );

        let summary = &extract_all(&html)[0];
        assert_eq!(summary.last_thread_title, None);
        assert_eq!(summary.last_author.as_deref(), Some("Admin"));
    }

    #[test]
    fn test_author_falls_back_to_link_text() {
        let html = table(
            r#"<tr><td><a href="/f">Allgemein</a></td><td>1</td><td>1</td><td><a href="member.php?u=7">JaneDoe</a></td></tr>"#,
        );

        let summary = &extract_all(&html)[0];
        assert_eq!(summary.last_author.as_deref(), Some("JaneDoe"));
    }

    #[test]
    fn test_empty_last_post_cell_has_no_author() {
        let html = table(
            r#"<tr><td><a href="/f">Leer</a></td><td>0</td><td>0</td><td>&nbsp;</td></tr>"#,
        );

        let summary = &extract_all(&html)[0];
        assert_eq!(summary.last_author, None);
    }

    #[test]
    fn test_author_without_title_is_independent() {
        let html = table(
            r#"<tr><td><a href="/f">Forum</a> Letzter Beitrag: Titel</td><td>1</td><td>1</td><td></td></tr>"#,
        );

        let summary = &extract_all(&html)[0];
        assert_eq!(summary.last_thread_title.as_deref(), Some("Titel"));
        assert_eq!(summary.last_author, None);
    }

    #[test]
    fn test_zero_qualifying_rows() {
        let html = table(r#"<tr><th>Forum</th><th>Themen</th></tr>"#);
        assert!(extract_all(&html).is_empty());
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let html = table(
            r#"<tr><td><a href="/f">Allgemein</a> Text Letzter Beitrag: Frage - in Lohnsteuer von X</td><td>1.000</td><td>2</td><td>von X</td></tr>"#,
        );

        assert_eq!(extract_all(&html), extract_all(&html));
    }

    #[test]
    fn test_markup_split_across_elements() {
        let html = table(
            r#"<tr>
                <td>
                    <a href="/f/9"><strong>Vordrucke</strong></a><br>
                    <span class="desc">Fragen&nbsp;zu   Formularen</span>
                    <div class="stats">Themen: 3 Beiträge: 9</div>
                    <div class="lastpost">Letzter Beitrag: Anlage KAP - in Vordrucke von Erika heute</div>
                </td>
                <td> 3 </td>
                <td> 9 </td>
                <td>von <a href="member.php?u=2">Erika</a> heute, 10:15</td>
            </tr>"#,
        );

        let summary = &extract_all(&html)[0];
        assert_eq!(summary.name, "Vordrucke");
        assert_eq!(summary.description, "Fragen zu Formularen");
        assert_eq!(summary.topic_count, 3);
        assert_eq!(summary.post_count, 9);
        assert_eq!(summary.last_thread_title.as_deref(), Some("Anlage KAP"));
        assert_eq!(summary.last_author.as_deref(), Some("Erika"));
    }

    #[test]
    fn test_forum_name_falls_back_to_cell_text() {
        assert_eq!(forum_name("   ", "  Ganze Zelle "), "Ganze Zelle");
        assert_eq!(forum_name(" Link ", "Link mehr"), "Link");
    }

    #[test]
    fn test_description_only_removes_first_name_occurrence() {
        assert_eq!(
            description("Steuer Fragen zur Steuer", "Steuer"),
            "Fragen zur Steuer"
        );
    }

    #[test]
    fn test_description_label_at_start_is_kept() {
        assert_eq!(description("Forum Themen: 4", "Forum"), "Themen: 4");
    }

    #[test]
    fn test_description_may_be_empty() {
        assert_eq!(description("Forum", "Forum"), "");
    }

    #[test]
    fn test_title_label_with_nothing_after_is_empty_not_absent() {
        assert_eq!(
            last_thread_title("Forum Letzter Beitrag:   ").as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_title_label_is_case_insensitive() {
        assert_eq!(
            last_thread_title("x LETZTER BEITRAG: Frage VON Hans").as_deref(),
            Some("Frage")
        );
    }

    #[test]
    fn test_author_token_without_marker_uses_whole_text() {
        assert_eq!(author_token("  Gast  gestern "), "Gast");
        assert_eq!(author_token("von\u{a0}Hans M."), "Hans");
        assert_eq!(author_token(""), "");
    }
}

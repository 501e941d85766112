//! Board loading and column extraction.
//!
//! A board is a Markdown document where every level-2 heading opens a column and
//! each column holds checklist items (`- [x] Ship it`). Parsing is done with
//! pulldown-cmark; the resulting events are flattened into a pre-order list of
//! [`Node`]s that the extractor walks once.

use pulldown_cmark::{Event, Parser as MdParser, Tag, TagEnd};
use thiserror::Error;

/// Heading level that delimits board columns.
pub const COLUMN_LEVEL: u8 = 2;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("column '{0}' not found")]
    SectionNotFound(String),
}

/// A structural element of the board, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A heading with its level (1-6) and plain text
    Heading { level: u8, text: String },
    /// A list item with the plain text of its own paragraphs.
    ///
    /// Text of nested list items is not included; those appear as their own
    /// nodes right after their parent.
    ListItem { text: String },
}

/// Parse board Markdown into a flat pre-order sequence of nodes.
///
/// Inline markup (emphasis, links, code spans) is reduced to its text, line
/// breaks become spaces, and code blocks and raw HTML are skipped.
pub fn load(content: &str) -> Vec<Node> {
    let mut nodes: Vec<Node> = Vec::new();
    // Indices into `nodes` of the headings/items currently receiving text.
    let mut open: Vec<usize> = Vec::new();
    let mut in_code_block = false;

    for event in MdParser::new(content) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                nodes.push(Node::Heading {
                    level: level as u8,
                    text: String::new(),
                });
                open.push(nodes.len() - 1);
            }
            Event::Start(Tag::Item) => {
                nodes.push(Node::ListItem {
                    text: String::new(),
                });
                open.push(nodes.len() - 1);
            }
            Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::Item) => {
                open.pop();
            }
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) | Event::Code(text) if !in_code_block => {
                push_text(&mut nodes, &open, &text);
            }
            Event::SoftBreak | Event::HardBreak | Event::End(TagEnd::Paragraph) => {
                push_text(&mut nodes, &open, " ");
            }
            _ => {}
        }
    }

    nodes
}

fn push_text(nodes: &mut [Node], open: &[usize], text: &str) {
    if let Some(&idx) = open.last() {
        match &mut nodes[idx] {
            Node::Heading { text: buf, .. } | Node::ListItem { text: buf } => buf.push_str(text),
        }
    }
}

/// Where the extractor is relative to the target column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Seeking,
    Collecting,
    Done,
}

/// Extract the checklist item payloads of the column headed `## {column}`.
///
/// The column ends at the next heading of level 2 or shallower. Returns an empty
/// list when the column exists but holds no checklist items, and
/// [`ExtractError::SectionNotFound`] when no such column heading exists.
pub fn extract_column_items(content: &str, column: &str) -> Result<Vec<String>, ExtractError> {
    let nodes = load(content);
    let mut state = ScanState::Seeking;
    let mut items = Vec::new();

    for node in &nodes {
        match (state, node) {
            (ScanState::Collecting, Node::Heading { level, .. }) if *level <= COLUMN_LEVEL => {
                state = ScanState::Done;
            }
            (ScanState::Seeking, Node::Heading { level, text })
                if *level == COLUMN_LEVEL && text.trim() == column =>
            {
                state = ScanState::Collecting;
            }
            (ScanState::Collecting, Node::ListItem { text }) => {
                if let Some(item) = checklist_payload(text) {
                    items.push(item);
                }
            }
            _ => {}
        }

        if state == ScanState::Done {
            break;
        }
    }

    if state == ScanState::Seeking {
        return Err(ExtractError::SectionNotFound(column.to_string()));
    }

    Ok(items)
}

/// Return the whitespace-normalised text after the checkbox marker, if any.
pub fn checklist_payload(text: &str) -> Option<String> {
    if !text.contains('[') {
        return None;
    }
    let close = text.find(']')?;
    let payload = collapse_whitespace(&text[close + 1..]);
    if payload.is_empty() {
        None
    } else {
        Some(payload)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BOARD: &str = r#"# Sprint Board

## Backlog

- [ ] Write migration guide #docs
- [ ] Profile startup

## Done

- [x] #feat Add caching layer
- [x] #bug Fix race condition

### Carried over

- [x] #review Review retry policy

## Archive

- [x] Old thing
"#;

    #[test]
    fn extracts_items_of_target_column_only() {
        let items = extract_column_items(BOARD, "Done").unwrap();
        assert_eq!(
            items,
            vec![
                "#feat Add caching layer",
                "#bug Fix race condition",
                "#review Review retry policy",
            ]
        );
    }

    #[test]
    fn first_column_stops_at_next_column() {
        let items = extract_column_items(BOARD, "Backlog").unwrap();
        assert_eq!(items, vec!["Write migration guide #docs", "Profile startup"]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = extract_column_items(BOARD, "Nonexistent").unwrap_err();
        assert_eq!(err, ExtractError::SectionNotFound("Nonexistent".to_string()));
        assert_eq!(err.to_string(), "column 'Nonexistent' not found");
    }

    #[test]
    fn column_name_must_match_exactly() {
        assert!(extract_column_items(BOARD, "done").is_err());
        assert!(extract_column_items(BOARD, "Don").is_err());
        // A level-3 heading is never a column, even with a matching name.
        assert!(extract_column_items(BOARD, "Carried over").is_err());
    }

    #[test]
    fn heading_edge_whitespace_is_ignored() {
        let board = "##   In Progress   \n- [ ] Task one\n";
        assert_eq!(
            extract_column_items(board, "In Progress").unwrap(),
            vec!["Task one"]
        );
        assert!(extract_column_items(board, "In  Progress").is_err());
    }

    #[test]
    fn empty_column_is_not_an_error() {
        let board = "## Done\n## Backlog\n- [ ] Later\n";
        assert_eq!(extract_column_items(board, "Done").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn level_one_heading_closes_column() {
        let board = "# Intro\n## Done\n- [x] Inside\n# Next board\n- [x] Outside\n";
        assert_eq!(extract_column_items(board, "Done").unwrap(), vec!["Inside"]);
    }

    #[test]
    fn items_without_checkbox_or_payload_are_dropped() {
        let board = "## Done\n- plain note\n- [ ]\n- [x]   \n- [x] kept\n";
        assert_eq!(extract_column_items(board, "Done").unwrap(), vec!["kept"]);
    }

    #[test]
    fn payload_whitespace_is_collapsed() {
        let board = "## Done\n- [x] #feat   improve\n  caching   #bug\n";
        assert_eq!(
            extract_column_items(board, "Done").unwrap(),
            vec!["#feat improve caching #bug"]
        );
    }

    #[test]
    fn inline_markup_is_reduced_to_text() {
        let board = "## Done\n- [x] Ship **bold** `cache` and [docs](https://example.com)\n";
        assert_eq!(
            extract_column_items(board, "Done").unwrap(),
            vec!["Ship bold cache and docs"]
        );
    }

    #[test]
    fn nested_items_are_collected_separately() {
        let board = "## Done\n- [x] Parent task\n  - [x] Child task\n- [x] Sibling\n";
        assert_eq!(
            extract_column_items(board, "Done").unwrap(),
            vec!["Parent task", "Child task", "Sibling"]
        );
    }

    #[test]
    fn setext_level_two_heading_opens_column() {
        let board = "Done\n----\n\n- [x] Underlined column\n";
        assert_eq!(
            extract_column_items(board, "Done").unwrap(),
            vec!["Underlined column"]
        );
    }

    #[test]
    fn load_flattens_in_document_order() {
        let nodes = load("## Col\n- [ ] a\n  - [x] b\n");
        assert_eq!(
            nodes,
            vec![
                Node::Heading {
                    level: 2,
                    text: "Col".to_string()
                },
                Node::ListItem {
                    text: "[ ] a".to_string()
                },
                Node::ListItem {
                    text: "[x] b".to_string()
                },
            ]
        );
    }

    #[test]
    fn checklist_payload_takes_text_after_first_bracket() {
        assert_eq!(
            checklist_payload("[x] see [RFC] 12"),
            Some("see [RFC] 12".to_string())
        );
        assert_eq!(checklist_payload("no marker"), None);
        assert_eq!(checklist_payload("[ ]"), None);
    }
}

//! Plain text rendering for document nodes.

use crate::model::Node;

/// Convert a node sequence to plain text.
///
/// Blocks are separated by a blank line, list items are prefixed with a
/// bullet or their number, and table cells are tab-separated.
pub fn to_text(nodes: &[Node]) -> String {
    let blocks: Vec<String> = nodes.iter().map(render_block).collect();
    blocks.join("\n\n").trim().to_string()
}

fn render_block(node: &Node) -> String {
    match node {
        Node::BulletList { content } => content
            .iter()
            .map(|item| format!("• {}", item.plain_text()))
            .collect::<Vec<_>>()
            .join("\n"),
        Node::OrderedList { content } => content
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item.plain_text()))
            .collect::<Vec<_>>()
            .join("\n"),
        Node::Table { content } => content
            .iter()
            .map(|row| {
                row.children()
                    .iter()
                    .map(|cell| cell.plain_text().replace('\n', " "))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Node::Image { id, src } => format!("[image {}: {}]", id, src),
        other => other.plain_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text() {
        let nodes = vec![
            Node::paragraph_with_text("Hello, world!"),
            Node::OrderedList {
                content: vec![
                    Node::ListItem {
                        content: vec![Node::paragraph_with_text("one")],
                    },
                    Node::ListItem {
                        content: vec![Node::paragraph_with_text("two")],
                    },
                ],
            },
        ];

        assert_eq!(to_text(&nodes), "Hello, world!\n\n1. one\n2. two");
    }

    #[test]
    fn test_table_text() {
        let cell = |text: &str| Node::TableCell {
            header: false,
            colspan: 1,
            rowspan: 1,
            content: vec![Node::paragraph_with_text(text)],
        };
        let table = Node::Table {
            content: vec![Node::TableRow {
                content: vec![cell("a"), cell("b")],
            }],
        };

        assert_eq!(to_text(&[table]), "a\tb");
    }
}

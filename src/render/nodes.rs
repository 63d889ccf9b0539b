//! Conversion of grids, sanitized tables and text blocks into document nodes.

use crate::model::{Inline, Mark, Node, StructuredTable, TableGrid, TextBlock};

/// Build a table node from a plain-text grid.
///
/// Every cell holds one paragraph; empty cells get an empty paragraph.
pub fn grid_to_node(grid: &TableGrid) -> Node {
    let rows = grid
        .rows()
        .iter()
        .map(|row| Node::TableRow {
            content: row
                .iter()
                .map(|cell| Node::TableCell {
                    header: false,
                    colspan: 1,
                    rowspan: 1,
                    content: vec![Node::paragraph_with_text(cell.as_str())],
                })
                .collect(),
        })
        .collect();

    Node::Table { content: rows }
}

/// Build a table node from a sanitized table, keeping spans and formatting.
pub fn structured_to_node(table: &StructuredTable) -> Node {
    let rows = table
        .rows
        .iter()
        .map(|row| Node::TableRow {
            content: row
                .cells
                .iter()
                .map(|cell| {
                    let mut inline = Vec::new();
                    push_inlines(&mut inline, &cell.content, &[]);
                    Node::TableCell {
                        header: cell.header,
                        colspan: cell.colspan,
                        rowspan: cell.rowspan,
                        content: vec![Node::Paragraph { content: inline }],
                    }
                })
                .collect(),
        })
        .collect();

    Node::Table { content: rows }
}

fn push_inlines(out: &mut Vec<Node>, inlines: &[Inline], marks: &[Mark]) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => push_text(out, text, marks),
            Inline::LineBreak => out.push(Node::HardBreak),
            Inline::Span(children) => push_inlines(out, children, marks),
            Inline::Bold(children) => push_inlines(out, children, &with_mark(marks, Mark::Bold)),
            Inline::Italic(children) => {
                push_inlines(out, children, &with_mark(marks, Mark::Italic))
            }
        }
    }
}

fn with_mark(marks: &[Mark], mark: Mark) -> Vec<Mark> {
    let mut marks = marks.to_vec();
    if !marks.contains(&mark) {
        marks.push(mark);
    }
    marks
}

/// Append text, joining it onto a preceding run with the same marks.
fn push_text(out: &mut Vec<Node>, text: &str, marks: &[Mark]) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text {
        text: prev,
        marks: prev_marks,
    }) = out.last_mut()
    {
        if prev_marks.as_slice() == marks {
            prev.push_str(text);
            return;
        }
    }
    out.push(Node::Text {
        text: text.to_string(),
        marks: marks.to_vec(),
    });
}

/// Build paragraph and list nodes from text blocks.
pub fn blocks_to_nodes(blocks: &[TextBlock]) -> Vec<Node> {
    blocks
        .iter()
        .map(|block| match block {
            TextBlock::Paragraph(text) => text_paragraph(text),
            TextBlock::BulletList(items) => Node::BulletList {
                content: list_items(items),
            },
            TextBlock::OrderedList(items) => Node::OrderedList {
                content: list_items(items),
            },
        })
        .collect()
}

fn list_items(items: &[String]) -> Vec<Node> {
    items
        .iter()
        .map(|item| Node::ListItem {
            content: vec![text_paragraph(item)],
        })
        .collect()
}

/// A paragraph with hard breaks at internal newlines.
fn text_paragraph(text: &str) -> Node {
    let mut content = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            content.push(Node::HardBreak);
        }
        push_text(&mut content, line, &[]);
    }
    Node::Paragraph { content }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StructuredCell, StructuredRow};

    #[test]
    fn test_grid_to_node() {
        let grid = TableGrid::from_rows(vec![
            vec!["a".into(), "b".into()],
            vec!["c".into()],
        ]);
        let node = grid_to_node(&grid);

        let rows = node.children();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].children().len(), 2);

        let empty = &rows[1].children()[1];
        assert_eq!(empty.children(), &[Node::Paragraph { content: vec![] }]);
        assert_eq!(rows[0].children()[0].plain_text(), "a");
    }

    #[test]
    fn test_structured_marks_and_spans() {
        let mut cell = StructuredCell::new(vec![
            Inline::Bold(vec![
                Inline::Text("Total ".into()),
                Inline::Italic(vec![Inline::Text("net".into())]),
            ]),
            Inline::LineBreak,
            Inline::Span(vec![Inline::Text("kr".into())]),
        ]);
        cell.colspan = 2;
        let table = StructuredTable {
            rows: vec![StructuredRow { cells: vec![cell] }],
        };

        let node = structured_to_node(&table);
        let cell = &node.children()[0].children()[0];
        match cell {
            Node::TableCell { colspan, content, .. } => {
                assert_eq!(*colspan, 2);
                assert_eq!(
                    content[0].children(),
                    &[
                        Node::Text {
                            text: "Total ".into(),
                            marks: vec![Mark::Bold]
                        },
                        Node::Text {
                            text: "net".into(),
                            marks: vec![Mark::Bold, Mark::Italic]
                        },
                        Node::HardBreak,
                        Node::text("kr"),
                    ]
                );
            }
            other => panic!("expected cell, got {:?}", other),
        }
    }

    #[test]
    fn test_blocks_to_nodes() {
        let blocks = vec![
            TextBlock::BulletList(vec!["first".into(), "second".into()]),
            TextBlock::Paragraph("line one\nline two".into()),
        ];
        let nodes = blocks_to_nodes(&blocks);

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].children().len(), 2);
        assert_eq!(nodes[0].children()[1].plain_text(), "second");
        assert_eq!(
            nodes[1].children(),
            &[Node::text("line one"), Node::HardBreak, Node::text("line two")]
        );
    }
}

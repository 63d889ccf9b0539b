//! Immutable HTML table representation and plain-text grid extraction.

use scraper::{ElementRef, Html, Node, Selector};

use crate::clean::normalize_text;
use crate::error::{Error, Result};
use crate::model::TableGrid;

use super::check_cell_limit;

/// A parsed HTML node, detached from the parser's tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// An element with lowercase name and attributes
    Element {
        /// Tag name
        name: String,
        /// Attributes in source order
        attrs: Vec<(String, String)>,
        /// Child nodes
        children: Vec<HtmlNode>,
    },
    /// A text node
    Text(String),
}

impl HtmlNode {
    /// Create an element node.
    pub fn element(name: &str, attrs: &[(&str, &str)], children: Vec<HtmlNode>) -> Self {
        HtmlNode::Element {
            name: name.to_ascii_lowercase(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
                .collect(),
            children,
        }
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        HtmlNode::Text(text.into())
    }

    fn from_element(el: ElementRef<'_>) -> Self {
        let value = el.value();
        let children = el
            .children()
            .filter_map(|child| match child.value() {
                Node::Text(text) => Some(HtmlNode::Text(text.to_string())),
                Node::Element(_) => ElementRef::wrap(child).map(HtmlNode::from_element),
                _ => None,
            })
            .collect();

        HtmlNode::Element {
            name: value.name().to_ascii_lowercase(),
            attrs: value
                .attrs()
                .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
                .collect(),
            children,
        }
    }

    /// Element name, or `None` for text.
    pub fn name(&self) -> Option<&str> {
        match self {
            HtmlNode::Element { name, .. } => Some(name),
            HtmlNode::Text(_) => None,
        }
    }

    /// Attribute value by (lowercase) name.
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            HtmlNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            HtmlNode::Text(_) => None,
        }
    }

    /// Child nodes.
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Element { children, .. } => children,
            HtmlNode::Text(_) => &[],
        }
    }

    /// Concatenated text content; `<br>` contributes a line break.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            HtmlNode::Text(text) => out.push_str(text),
            HtmlNode::Element { name, children, .. } => {
                if name == "br" {
                    out.push('\n');
                }
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// The rows and cells of one HTML table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    /// Rows, each holding its `<td>`/`<th>` elements
    pub rows: Vec<Vec<HtmlNode>>,
}

/// Parse the first `<table>` of an HTML fragment.
///
/// Only rows that belong to this table are collected; tables nested inside
/// its cells stay part of the cell content.
pub fn parse_first_table(html: &str) -> Option<ParsedTable> {
    let document = Html::parse_fragment(html);
    let selector = Selector::parse("table").ok()?;
    let table = document.select(&selector).next()?;

    let mut parsed = ParsedTable::default();
    collect_rows(table, &mut parsed.rows);
    Some(parsed)
}

fn collect_rows(parent: ElementRef<'_>, rows: &mut Vec<Vec<HtmlNode>>) {
    for child in parent.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "thead" | "tbody" | "tfoot" => collect_rows(child, rows),
            "tr" => rows.push(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                    .map(HtmlNode::from_element)
                    .collect(),
            ),
            _ => {}
        }
    }
}

/// Build a plain-text grid from the first table; styling is discarded.
pub(crate) fn grid_from_html(html: &str, limit: usize) -> Result<TableGrid> {
    let table = parse_first_table(html).ok_or(Error::NoTable)?;

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| normalize_text(&cell.text_content()))
                .collect::<Vec<_>>()
        })
        .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
        .collect();

    if rows.is_empty() {
        return Err(Error::EmptyTable);
    }

    let grid = TableGrid::from_rows(rows);
    check_cell_limit(grid.cell_count(), limit)?;

    log::debug!(
        "TableBuilder: HTML grid with {} rows x {} columns",
        grid.row_count(),
        grid.column_count()
    );
    Ok(grid)
}

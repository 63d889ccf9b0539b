//! Structure-preserving table sanitization.
//!
//! Keeps cell spans and a small whitelist of inline formatting, unwraps every
//! other element so its text survives, and drops rows whose cells are all
//! empty. Works on the detached [`HtmlNode`] tree; nothing here mutates parsed
//! input.

use crate::clean::collapse_whitespace;
use crate::error::{Error, Result};
use crate::model::{Inline, StructuredCell, StructuredRow, StructuredTable};

use super::html::{parse_first_table, HtmlNode};
use super::check_cell_limit;

/// Elements that make a cell non-empty even without text.
const MEDIA_TAGS: &[&str] = &[
    "img", "video", "audio", "iframe", "object", "embed", "svg", "picture", "canvas",
];

/// Elements whose content is never visible text.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "template", "head", "title"];

/// Block elements that start on a new line once unwrapped.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre",
    "table", "tr",
];

/// Check whether a cell (or any node) carries no content.
///
/// A node is empty when it holds no media or links and every text node
/// below it normalizes to nothing. Inline wrappers around nothing are
/// looked through.
pub fn is_empty_cell(node: &HtmlNode) -> bool {
    match node {
        HtmlNode::Text(text) => collapse_whitespace(text).trim().is_empty(),
        HtmlNode::Element { name, children, .. } => {
            if MEDIA_TAGS.contains(&name.as_str()) {
                return false;
            }
            if name == "a" && node.attr("href").is_some() {
                return false;
            }
            if INVISIBLE_TAGS.contains(&name.as_str()) {
                return true;
            }
            children.iter().all(is_empty_cell)
        }
    }
}

/// Sanitize the first table of `html`, keeping spans and inline formatting.
pub(crate) fn sanitize_table(html: &str, limit: usize) -> Result<StructuredTable> {
    let parsed = parse_first_table(html).ok_or(Error::NoTable)?;
    let total = parsed.rows.len();

    let rows: Vec<StructuredRow> = parsed
        .rows
        .iter()
        .filter(|cells| !cells.iter().all(is_empty_cell))
        .map(|cells| StructuredRow {
            cells: cells.iter().map(sanitize_cell).collect(),
        })
        .collect();

    if rows.is_empty() {
        return Err(Error::EmptyTable);
    }

    let table = StructuredTable { rows };
    check_cell_limit(table.cell_count(), limit)?;

    log::debug!(
        "TableBuilder: structured table with {} rows ({} empty rows removed)",
        table.row_count(),
        total - table.row_count()
    );
    Ok(table)
}

fn span_attr(cell: &HtmlNode, name: &str) -> u32 {
    cell.attr(name)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|span| *span > 0)
        .unwrap_or(1)
}

fn sanitize_cell(cell: &HtmlNode) -> StructuredCell {
    let mut content = sanitize_inlines(cell.children());
    trim_edges(&mut content);

    StructuredCell {
        header: cell.name() == Some("th"),
        colspan: span_attr(cell, "colspan"),
        rowspan: span_attr(cell, "rowspan"),
        content,
    }
}

fn sanitize_inlines(nodes: &[HtmlNode]) -> Vec<Inline> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            HtmlNode::Text(text) => {
                let text = collapse_whitespace(text);
                if !text.is_empty() {
                    out.push(Inline::Text(text));
                }
            }
            HtmlNode::Element { name, children, .. } => match name.as_str() {
                "br" => out.push(Inline::LineBreak),
                "b" | "strong" => push_wrapped(&mut out, Inline::Bold, children),
                "i" | "em" => push_wrapped(&mut out, Inline::Italic, children),
                "span" => push_wrapped(&mut out, Inline::Span, children),
                tag if INVISIBLE_TAGS.contains(&tag) => {}
                tag => {
                    let inner = sanitize_inlines(children);
                    if BLOCK_TAGS.contains(&tag) && !out.is_empty() && !inner.is_empty() {
                        out.push(Inline::LineBreak);
                    }
                    out.extend(inner);
                }
            },
        }
    }
    out
}

fn push_wrapped(out: &mut Vec<Inline>, wrap: fn(Vec<Inline>) -> Inline, children: &[HtmlNode]) {
    let inner = sanitize_inlines(children);
    if !inner.is_empty() {
        out.push(wrap(inner));
    }
}

/// Trim leading whitespace of the first run and trailing whitespace of the last.
fn trim_edges(content: &mut Vec<Inline>) {
    if let Some(first) = content.first_mut() {
        trim_inline(first, true);
    }
    if let Some(last) = content.last_mut() {
        trim_inline(last, false);
    }
    content.retain(|inline| !matches!(inline, Inline::Text(t) if t.is_empty()));
}

fn trim_inline(inline: &mut Inline, start: bool) {
    match inline {
        Inline::Text(text) => {
            *text = if start {
                text.trim_start().to_string()
            } else {
                text.trim_end().to_string()
            };
        }
        Inline::Bold(children) | Inline::Italic(children) | Inline::Span(children) => {
            let child = if start {
                children.first_mut()
            } else {
                children.last_mut()
            };
            if let Some(child) = child {
                trim_inline(child, start);
            }
        }
        Inline::LineBreak => {}
    }
}

//! Table types.

use serde::{Deserialize, Serialize};

/// Maximum number of cells a pasted table may have.
pub const MAX_TABLE_CELLS: usize = 2000;

/// A rectangular grid of plain-text cells.
///
/// All rows have the same length; short rows are padded with `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Build a grid from ragged rows, padding every row to the widest one.
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows }
    }

    /// Rows of the grid.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.column_count()
    }

    /// Check if the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (row, column).
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Get plain text representation (tab-separated).
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table that keeps spans and a whitelist of inline formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredTable {
    /// Rows in the table
    pub rows: Vec<StructuredRow>,
}

impl StructuredTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of cells across all rows.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if the table has merged cells.
    pub fn has_merged_cells(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|r| &r.cells)
            .any(StructuredCell::is_merged)
    }

    /// Serialize back to sanitized HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<table>");
        for row in &self.rows {
            out.push_str("<tr>");
            for cell in &row.cells {
                let tag = if cell.header { "th" } else { "td" };
                out.push('<');
                out.push_str(tag);
                if cell.colspan > 1 {
                    out.push_str(&format!(" colspan=\"{}\"", cell.colspan));
                }
                if cell.rowspan > 1 {
                    out.push_str(&format!(" rowspan=\"{}\"", cell.rowspan));
                }
                out.push('>');
                for inline in &cell.content {
                    inline.write_html(&mut out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            out.push_str("</tr>");
        }
        out.push_str("</table>");
        out
    }
}

/// A row of a structured table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredRow {
    /// Cells in the row
    pub cells: Vec<StructuredCell>,
}

/// A cell of a structured table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredCell {
    /// Whether the source cell was a `<th>`
    pub header: bool,

    /// Number of columns this cell spans
    pub colspan: u32,

    /// Number of rows this cell spans
    pub rowspan: u32,

    /// Sanitized inline content
    pub content: Vec<Inline>,
}

impl StructuredCell {
    /// Create a plain data cell.
    pub fn new(content: Vec<Inline>) -> Self {
        Self {
            header: false,
            colspan: 1,
            rowspan: 1,
            content,
        }
    }

    /// Check if this cell spans multiple rows or columns.
    pub fn is_merged(&self) -> bool {
        self.rowspan > 1 || self.colspan > 1
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.content.iter().map(Inline::plain_text).collect()
    }
}

/// Whitelisted inline content inside a structured cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Inline {
    /// Plain text
    Text(String),
    /// `<b>` / `<strong>`
    Bold(Vec<Inline>),
    /// `<i>` / `<em>`
    Italic(Vec<Inline>),
    /// `<span>` with its attributes stripped
    Span(Vec<Inline>),
    /// `<br>`
    LineBreak,
}

impl Inline {
    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(text) => text.clone(),
            Inline::Bold(children) | Inline::Italic(children) | Inline::Span(children) => {
                children.iter().map(Inline::plain_text).collect()
            }
            Inline::LineBreak => "\n".to_string(),
        }
    }

    fn write_html(&self, out: &mut String) {
        let (tag, children) = match self {
            Inline::Text(text) => {
                out.push_str(&escape_html(text));
                return;
            }
            Inline::LineBreak => {
                out.push_str("<br>");
                return;
            }
            Inline::Bold(children) => ("b", children),
            Inline::Italic(children) => ("i", children),
            Inline::Span(children) => ("span", children),
        };
        out.push('<');
        out.push_str(tag);
        out.push('>');
        for child in children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

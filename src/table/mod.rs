//! Table construction from clipboard text and HTML.
//!
//! Every builder enforces the cell limit: a table that would exceed it is
//! rejected with [`Error::TooManyCells`] rather than truncated.
//!
//! # Example
//!
//! ```
//! use unpaste::table;
//!
//! let grid = table::from_tsv("Name\tAge\nAlice\t30\n").unwrap();
//! assert_eq!(grid.row_count(), 2);
//! assert_eq!(grid.column_count(), 2);
//! ```

mod delimited;
mod html;
mod sanitize;

pub use html::{parse_first_table, HtmlNode, ParsedTable};
pub use sanitize::is_empty_cell;

use crate::error::{Error, Result};
use crate::model::{StructuredTable, TableGrid, MAX_TABLE_CELLS};

/// Cell separator of clipboard text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Tab-separated (spreadsheet copy)
    Tab,
    /// Comma-separated
    Comma,
}

pub(crate) fn check_cell_limit(cells: usize, limit: usize) -> Result<()> {
    if cells > limit {
        log::warn!("TableBuilder: rejecting table with {} cells (limit {})", cells, limit);
        return Err(Error::TooManyCells { cells, limit });
    }
    Ok(())
}

/// Builds tables with a configurable cell limit.
#[derive(Debug, Clone, Copy)]
pub struct TableBuilder {
    max_cells: usize,
}

impl TableBuilder {
    /// Create a builder with the default limit.
    pub fn new() -> Self {
        Self {
            max_cells: MAX_TABLE_CELLS,
        }
    }

    /// Set the maximum number of cells.
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Get the cell limit.
    pub fn max_cells(&self) -> usize {
        self.max_cells
    }

    /// Build a grid from tab-separated text.
    pub fn from_tsv(&self, text: &str) -> Result<TableGrid> {
        delimited::parse_delimited(text, Delimiter::Tab, self.max_cells)
    }

    /// Build a grid from comma-separated text.
    pub fn from_csv(&self, text: &str) -> Result<TableGrid> {
        delimited::parse_delimited(text, Delimiter::Comma, self.max_cells)
    }

    /// Build a grid from text with the given delimiter.
    pub fn from_delimited(&self, text: &str, delimiter: Delimiter) -> Result<TableGrid> {
        delimited::parse_delimited(text, delimiter, self.max_cells)
    }

    /// Build a plain-text grid from the first HTML table.
    pub fn from_html(&self, html: &str) -> Result<TableGrid> {
        html::grid_from_html(html, self.max_cells)
    }

    /// Sanitize the first HTML table, keeping spans and inline formatting.
    pub fn sanitize_structured(&self, html: &str) -> Result<StructuredTable> {
        sanitize::sanitize_table(html, self.max_cells)
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a grid from tab-separated text with the default cell limit.
pub fn from_tsv(text: &str) -> Result<TableGrid> {
    TableBuilder::new().from_tsv(text)
}

/// Build a grid from comma-separated text with the default cell limit.
pub fn from_csv(text: &str) -> Result<TableGrid> {
    TableBuilder::new().from_csv(text)
}

/// Build a plain-text grid from the first HTML table with the default cell limit.
pub fn from_html(html: &str) -> Result<TableGrid> {
    TableBuilder::new().from_html(html)
}

/// Sanitize the first HTML table with the default cell limit.
pub fn sanitize_structured(html: &str) -> Result<StructuredTable> {
    TableBuilder::new().sanitize_structured(html)
}

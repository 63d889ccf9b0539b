//! Data model for paste normalization.
//!
//! This module defines the types that flow through the pipeline: the
//! clipboard payload coming in, the intermediate grids and text blocks, and
//! the document nodes going out to the host editor. Everything here is
//! created fresh per paste and discarded after insertion.

mod block;
mod node;
mod payload;
mod table;

pub use block::TextBlock;
pub use node::{Mark, Node, NodeKind};
pub use payload::{ClipboardItem, ClipboardPayload, MimeCategory};
pub use table::{
    Inline, StructuredCell, StructuredRow, StructuredTable, TableGrid, MAX_TABLE_CELLS,
};

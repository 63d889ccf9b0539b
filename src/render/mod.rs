//! Document node building and rendering.
//!
//! Turns the pipeline's intermediate results (grids, sanitized tables, text
//! blocks) into host document nodes, inserts them through [`DocumentHost`],
//! and renders node sequences as JSON or plain text for inspection.

mod host;
mod json;
mod nodes;
mod text;

pub use host::{insert_nodes, DocumentHost, MemoryDocument};
pub use json::{to_json, JsonFormat};
pub use nodes::{blocks_to_nodes, grid_to_node, structured_to_node};
pub use text::to_text;

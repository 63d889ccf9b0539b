//! Insertion into the host document.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::{Node, NodeKind};

/// The editor document that pasted nodes are inserted into.
///
/// Implementors expose only the two capabilities the pipeline needs: a
/// schema check at the current selection and a replacement of it.
pub trait DocumentHost {
    /// Check whether a node of `kind` may be placed at the current selection.
    fn can_insert(&self, kind: NodeKind) -> bool;

    /// Replace the current selection with `nodes`.
    fn replace_selection(&mut self, nodes: Vec<Node>);
}

/// Insert nodes at the selection, all or nothing.
///
/// Every top-level kind is checked before anything is written; if one is
/// rejected the document is left untouched.
pub fn insert_nodes<H: DocumentHost + ?Sized>(host: &mut H, nodes: Vec<Node>) -> Result<()> {
    if let Some(rejected) = nodes.iter().map(Node::kind).find(|kind| !host.can_insert(*kind)) {
        log::warn!("DocumentHost: {} rejected at the current position", rejected);
        return Err(Error::InsertionRejected(rejected));
    }
    if nodes.is_empty() {
        return Ok(());
    }

    log::debug!("DocumentHost: inserting {} nodes", nodes.len());
    host.replace_selection(nodes);
    Ok(())
}

/// An in-memory document that appends every insertion.
///
/// Useful for previews and tests; individual node kinds can be refused to
/// mimic a restrictive schema.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    refused: HashSet<NodeKind>,
}

impl MemoryDocument {
    /// Create an empty document accepting every node kind.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse nodes of `kind`.
    pub fn refusing(mut self, kind: NodeKind) -> Self {
        self.refused.insert(kind);
        self
    }

    /// Nodes inserted so far.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Take the inserted nodes, leaving the document empty.
    pub fn take_nodes(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.nodes)
    }
}

impl DocumentHost for MemoryDocument {
    fn can_insert(&self, kind: NodeKind) -> bool {
        !self.refused.contains(&kind)
    }

    fn replace_selection(&mut self, nodes: Vec<Node>) {
        self.nodes.extend(nodes);
    }
}

//! Document nodes handed to the host editor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inline formatting mark on a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    /// Bold text
    Bold,
    /// Italic text
    Italic,
}

/// A node in the host document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// A table
    Table {
        /// `TableRow` nodes
        content: Vec<Node>,
    },

    /// A table row
    TableRow {
        /// `TableCell` nodes
        content: Vec<Node>,
    },

    /// A table cell
    TableCell {
        /// Header cell
        #[serde(default)]
        header: bool,
        /// Columns spanned
        colspan: u32,
        /// Rows spanned
        rowspan: u32,
        /// Block content (paragraphs)
        content: Vec<Node>,
    },

    /// A paragraph of inline content
    Paragraph {
        /// Inline nodes
        content: Vec<Node>,
    },

    /// An unordered list
    BulletList {
        /// `ListItem` nodes
        content: Vec<Node>,
    },

    /// An ordered list
    OrderedList {
        /// `ListItem` nodes
        content: Vec<Node>,
    },

    /// A list item
    ListItem {
        /// Block content (paragraphs)
        content: Vec<Node>,
    },

    /// A run of text
    Text {
        /// The text content
        text: String,
        /// Formatting marks
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },

    /// A hard line break
    HardBreak,

    /// An image stored in temporary storage
    Image {
        /// Storage ID
        id: String,
        /// URL the editor can display
        src: String,
    },
}

impl Node {
    /// Create a plain text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Create a paragraph holding a single text run (or nothing, for empty text).
    pub fn paragraph_with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let content = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(text)]
        };
        Node::Paragraph { content }
    }

    /// Kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Table { .. } => NodeKind::Table,
            Node::TableRow { .. } => NodeKind::TableRow,
            Node::TableCell { .. } => NodeKind::TableCell,
            Node::Paragraph { .. } => NodeKind::Paragraph,
            Node::BulletList { .. } => NodeKind::BulletList,
            Node::OrderedList { .. } => NodeKind::OrderedList,
            Node::ListItem { .. } => NodeKind::ListItem,
            Node::Text { .. } => NodeKind::Text,
            Node::HardBreak => NodeKind::HardBreak,
            Node::Image { .. } => NodeKind::Image,
        }
    }

    /// Child nodes.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Table { content }
            | Node::TableRow { content }
            | Node::TableCell { content, .. }
            | Node::Paragraph { content }
            | Node::BulletList { content }
            | Node::OrderedList { content }
            | Node::ListItem { content } => content,
            Node::Text { .. } | Node::HardBreak | Node::Image { .. } => &[],
        }
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text { text, .. } => text.clone(),
            Node::HardBreak => "\n".to_string(),
            Node::Image { src, .. } => src.clone(),
            _ => self.children().iter().map(Node::plain_text).collect(),
        }
    }
}

/// Node type names, used for insertion checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Table
    Table,
    /// Table row
    TableRow,
    /// Table cell
    TableCell,
    /// Paragraph
    Paragraph,
    /// Bullet list
    BulletList,
    /// Ordered list
    OrderedList,
    /// List item
    ListItem,
    /// Text
    Text,
    /// Hard break
    HardBreak,
    /// Image
    Image,
}

impl NodeKind {
    /// Name used in the host schema.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Table => "table",
            NodeKind::TableRow => "table_row",
            NodeKind::TableCell => "table_cell",
            NodeKind::Paragraph => "paragraph",
            NodeKind::BulletList => "bullet_list",
            NodeKind::OrderedList => "ordered_list",
            NodeKind::ListItem => "list_item",
            NodeKind::Text => "text",
            NodeKind::HardBreak => "hard_break",
            NodeKind::Image => "image",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

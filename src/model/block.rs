//! Text blocks recognized in pasted prose.

use serde::{Deserialize, Serialize};

/// A block of recognized text structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum TextBlock {
    /// Paragraph text; internal `\n` marks a hard line break
    Paragraph(String),
    /// Unordered list items
    BulletList(Vec<String>),
    /// Ordered list items
    OrderedList(Vec<String>),
}

impl TextBlock {
    /// Check if this block is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, TextBlock::BulletList(_) | TextBlock::OrderedList(_))
    }

    /// List items, or an empty slice for paragraphs.
    pub fn items(&self) -> &[String] {
        match self {
            TextBlock::BulletList(items) | TextBlock::OrderedList(items) => items,
            TextBlock::Paragraph(_) => &[],
        }
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        match self {
            TextBlock::Paragraph(text) => text.clone(),
            TextBlock::BulletList(items) => items
                .iter()
                .map(|item| format!("• {}", item))
                .collect::<Vec<_>>()
                .join("\n"),
            TextBlock::OrderedList(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {}", i + 1, item))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_plain_text() {
        let list = TextBlock::OrderedList(vec!["one".into(), "two".into()]);
        assert!(list.is_list());
        assert_eq!(list.plain_text(), "1. one\n2. two");

        let para = TextBlock::Paragraph("Hello".into());
        assert!(!para.is_list());
        assert!(para.items().is_empty());
    }
}

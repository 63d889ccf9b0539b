//! # unpaste
//!
//! Clipboard paste normalization for rich-text editors.
//!
//! When a user pastes, this library classifies the clipboard payload and
//! turns it into structured document nodes: spreadsheet text and HTML data
//! tables become tables, text extracted from PDFs has its artificial line
//! breaks removed, and bullet or numbered lines become real lists.
//!
//! ## Quick Start
//!
//! ```
//! use unpaste::{paste_nodes, ClipboardPayload, Node};
//!
//! fn main() -> unpaste::Result<()> {
//!     let payload = ClipboardPayload::text("• first\n• second\n\nPlain text.");
//!     let nodes = paste_nodes(&payload)?;
//!
//!     assert!(matches!(nodes[0], Node::BulletList { .. }));
//!     println!("{}", unpaste::render::to_text(&nodes));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Tables**: TSV/CSV clipboard text and HTML data tables, with a cell limit
//! - **Structure preservation**: optional span- and formatting-preserving HTML tables
//! - **PDF cleanup**: removes line wraps introduced by PDF text extraction
//! - **Lists**: bullet and numbered lines become list nodes
//! - **Host integration**: `DocumentHost`, `Notifier` and `TempStorage` traits

pub mod clean;
pub mod detect;
pub mod error;
pub mod model;
pub mod paste;
pub mod render;
pub mod table;

// Re-export commonly used types
pub use clean::{clean_pdf_text, convert_to_list_structure, has_list_patterns, should_clean};
pub use clean::{CleanOptions, ListOptions};
pub use detect::{classify, Classification, ContentCategory};
pub use error::{Error, Result};
pub use model::{
    ClipboardItem, ClipboardPayload, Inline, Mark, MimeCategory, Node, NodeKind, StructuredTable,
    TableGrid, TextBlock,
};
pub use paste::{PasteHandler, PasteOptions, PasteOutcome};
pub use render::{DocumentHost, JsonFormat};
pub use table::{Delimiter, TableBuilder};

/// Build document nodes for a payload with default options.
///
/// Returns an empty vector when the host should paste as usual (plain prose,
/// empty payloads and images, which need a [`paste::TempStorage`]).
///
/// # Example
///
/// ```
/// use unpaste::{paste_nodes, ClipboardPayload};
///
/// let nodes = paste_nodes(&ClipboardPayload::text("a\tb\nc\td\n")).unwrap();
/// assert_eq!(nodes.len(), 1);
/// ```
pub fn paste_nodes(payload: &ClipboardPayload) -> Result<Vec<Node>> {
    Unpaste::new().process(payload).map(|result| result.nodes)
}

/// Convert a payload to JSON nodes with default options.
///
/// # Example
///
/// ```
/// use unpaste::{to_json, ClipboardPayload, JsonFormat};
///
/// let json = to_json(&ClipboardPayload::text("1. one\n2. two"), JsonFormat::Compact).unwrap();
/// assert!(json.starts_with(r#"[{"type":"ordered_list""#));
/// ```
pub fn to_json(payload: &ClipboardPayload, format: JsonFormat) -> Result<String> {
    let nodes = paste_nodes(payload)?;
    render::to_json(&nodes, format)
}

/// Builder for processing clipboard payloads.
///
/// # Example
///
/// ```
/// use unpaste::{ClipboardPayload, Unpaste};
///
/// let html = "<table><tr><th colspan=\"2\">Total</th></tr><tr><td>a</td><td>b</td></tr></table>";
/// let result = Unpaste::new()
///     .preserve_formatting()
///     .process(&ClipboardPayload::new().with_html(html))?;
///
/// assert_eq!(result.category().to_string(), "html_table");
/// # Ok::<(), unpaste::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Unpaste {
    options: PasteOptions,
}

impl Unpaste {
    /// Create a new Unpaste builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep spans and inline formatting of HTML tables.
    pub fn preserve_formatting(mut self) -> Self {
        self.options = self.options.with_preserve_formatting(true);
        self
    }

    /// Clean prose even when it does not look PDF-extracted.
    pub fn force_clean(mut self) -> Self {
        self.options = self.options.with_force_clean(true);
        self
    }

    /// Set the table cell limit.
    pub fn with_max_table_cells(mut self, max_cells: usize) -> Self {
        self.options = self.options.with_max_table_cells(max_cells);
        self
    }

    /// Set the cleaning thresholds.
    pub fn with_clean_options(mut self, clean: CleanOptions) -> Self {
        self.options = self.options.with_clean_options(clean);
        self
    }

    /// Join hyphenated line-end word splits when cleaning.
    pub fn with_hyphenation_fix(mut self) -> Self {
        let clean = self.options.clean.clone().with_hyphenation_fix(true);
        self.options = self.options.with_clean_options(clean);
        self
    }

    /// Replace the words that start a new paragraph after a bullet item.
    pub fn with_paragraph_starters<S: Into<String>>(
        mut self,
        words: impl IntoIterator<Item = S>,
    ) -> Self {
        let lists = self.options.lists.clone().with_paragraph_starters(words);
        self.options = self.options.with_list_options(lists);
        self
    }

    /// Get the options.
    pub fn options(&self) -> &PasteOptions {
        &self.options
    }

    /// Classify a payload and build its nodes.
    ///
    /// Unlike [`PasteHandler::handle`], errors are returned to the caller.
    pub fn process(&self, payload: &ClipboardPayload) -> Result<UnpasteResult> {
        let classification = classify(payload);
        let nodes = paste::build_nodes(&classification, &self.options)?.unwrap_or_default();
        Ok(UnpasteResult {
            category: classification.category(),
            nodes,
        })
    }
}

/// Result of processing a clipboard payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpasteResult {
    category: ContentCategory,
    /// The built nodes; empty when the host should paste as usual
    pub nodes: Vec<Node>,
}

impl UnpasteResult {
    /// Classified content of the payload.
    pub fn category(&self) -> ContentCategory {
        self.category
    }

    /// Check if the host should perform its default paste.
    pub fn is_default(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.nodes, format)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpaste_builder() {
        let unpaste = Unpaste::new()
            .preserve_formatting()
            .force_clean()
            .with_max_table_cells(100)
            .with_hyphenation_fix();

        assert!(unpaste.options().preserve_formatting);
        assert!(unpaste.options().force_clean);
        assert_eq!(unpaste.options().max_table_cells, 100);
        assert!(unpaste.options().clean.fix_hyphenation);
    }

    #[test]
    fn test_unpaste_builder_default() {
        let unpaste = Unpaste::default();
        assert!(!unpaste.options().preserve_formatting);
        assert_eq!(unpaste.options().max_table_cells, 2000);
    }

    #[test]
    fn test_paragraph_starters() {
        let unpaste = Unpaste::new().with_paragraph_starters(["Note"]);
        assert_eq!(unpaste.options().lists.paragraph_starters, vec!["Note"]);
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_empty_payload() {
        let result = Unpaste::new().process(&ClipboardPayload::new()).unwrap();
        assert_eq!(result.category(), ContentCategory::Empty);
        assert!(result.is_default());
    }

    #[test]
    fn test_plain_prose_is_default() {
        let result = Unpaste::new()
            .process(&ClipboardPayload::text("one two three"))
            .unwrap();
        assert_eq!(result.category(), ContentCategory::ProseText);
        assert!(result.is_default());
    }

    #[test]
    fn test_force_clean_builds_paragraph() {
        let result = Unpaste::new()
            .force_clean()
            .process(&ClipboardPayload::text("one two three"))
            .unwrap();
        assert_eq!(result.nodes, vec![Node::paragraph_with_text("one two three")]);
    }

    #[test]
    fn test_too_many_cells_is_error() {
        let result = Unpaste::new()
            .with_max_table_cells(3)
            .process(&ClipboardPayload::text("a\tb\nc\td\n"));
        assert!(matches!(result, Err(Error::TooManyCells { cells: 4, limit: 3 })));
    }

    // ==================== Output Format Tests ====================

    #[test]
    fn test_result_to_text() {
        let result = Unpaste::new()
            .process(&ClipboardPayload::text("a\tb\nc\td\n"))
            .unwrap();
        assert_eq!(result.to_text(), "a\tb\nc\td");
    }

    #[test]
    fn test_result_to_json() {
        let json = to_json(&ClipboardPayload::text("- x\n- y"), JsonFormat::Compact).unwrap();
        assert!(json.contains("\"bullet_list\""));
        assert!(json.contains("\"list_item\""));
    }
}

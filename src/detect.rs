//! Clipboard content classification.
//!
//! Decides, once per paste, which handler a payload belongs to. The checks
//! run in a fixed order and the first match wins:
//!
//! 1. an image item with no text flavours
//! 2. plain text shaped like a delimited grid
//! 3. HTML holding a definite data table
//! 4. any other non-empty plain text
//! 5. nothing usable

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{ClipboardItem, ClipboardPayload};
use crate::table::Delimiter;

static TABLE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<table\b.*?(?:</table\s*>|\z)").unwrap());
static TABLE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^<table\b[^>]*>").unwrap());
static ZERO_LAYOUT_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:border|cellpadding|cellspacing)\s*=\s*["']?\s*0+(?:px)?\s*(?:["'\s/>]|$)"#)
        .unwrap()
});
static ROW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<tr\b").unwrap());
static DATA_CELL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<td\b").unwrap());
static HEADER_CELL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<th\b").unwrap());

/// Lines longer than this on average are prose with commas, not CSV.
const MAX_CSV_AVG_LINE_LEN: f64 = 100.0;

/// The kind of content on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    /// Image item without text
    Image,
    /// Spreadsheet-like delimited text
    TabularText,
    /// HTML with a definite data table
    HtmlTable,
    /// Other text
    ProseText,
    /// Nothing to handle
    Empty,
}

impl ContentCategory {
    /// Snake-case name of the category.
    pub fn name(&self) -> &'static str {
        match self {
            ContentCategory::Image => "image",
            ContentCategory::TabularText => "tabular_text",
            ContentCategory::HtmlTable => "html_table",
            ContentCategory::ProseText => "prose_text",
            ContentCategory::Empty => "empty",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified payload, borrowing the data its handler needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification<'a> {
    /// The image item to store
    Image(&'a ClipboardItem),
    /// Delimited text and its delimiter
    TabularText {
        /// Plain text flavour
        text: &'a str,
        /// Detected cell separator
        delimiter: Delimiter,
    },
    /// HTML flavour holding the data table
    HtmlTable(&'a str),
    /// Plain text flavour
    ProseText(&'a str),
    /// Defer to the host's default paste
    Empty,
}

impl Classification<'_> {
    /// The category of this classification.
    pub fn category(&self) -> ContentCategory {
        match self {
            Classification::Image(_) => ContentCategory::Image,
            Classification::TabularText { .. } => ContentCategory::TabularText,
            Classification::HtmlTable(_) => ContentCategory::HtmlTable,
            Classification::ProseText(_) => ContentCategory::ProseText,
            Classification::Empty => ContentCategory::Empty,
        }
    }
}

/// Classify a clipboard payload.
///
/// # Example
/// ```
/// use unpaste::detect::{classify, ContentCategory};
/// use unpaste::ClipboardPayload;
///
/// let payload = ClipboardPayload::text("a\tb\nc\td\n");
/// assert_eq!(classify(&payload).category(), ContentCategory::TabularText);
/// ```
pub fn classify(payload: &ClipboardPayload) -> Classification<'_> {
    let image = payload.first_image().filter(|_| payload.has_no_text());

    let classification = if let Some(item) = image {
        Classification::Image(item)
    } else if let Some(delimiter) = detect_delimiter(&payload.plain_text) {
        Classification::TabularText {
            text: &payload.plain_text,
            delimiter,
        }
    } else if is_definite_data_table(&payload.html) {
        Classification::HtmlTable(&payload.html)
    } else if !payload.plain_text.trim().is_empty() {
        Classification::ProseText(&payload.plain_text)
    } else {
        Classification::Empty
    };

    log::debug!("Classifier: payload classified as {}", classification.category());
    classification
}

/// Detect whether text forms a consistent delimited grid.
///
/// Lines are trimmed of spaces and carriage returns only, so rows that start
/// with empty spreadsheet cells keep their leading tabs. Lines holding
/// nothing but whitespace are skipped, and at least two lines with content
/// are required.
pub fn detect_delimiter(text: &str) -> Option<Delimiter> {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim_matches(|c| c == ' ' || c == '\r'))
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return None;
    }

    let tabs: Vec<usize> = lines.iter().map(|line| line.matches('\t').count()).collect();
    if is_consistent(&tabs, 1) {
        log::debug!("Classifier: {} lines with consistent tab counts", lines.len());
        return Some(Delimiter::Tab);
    }

    let commas: Vec<usize> = lines.iter().map(|line| line.matches(',').count()).collect();
    let total_chars: usize = lines.iter().map(|line| line.chars().count()).sum();
    let avg_len = total_chars as f64 / lines.len() as f64;
    if is_consistent(&commas, 2) && avg_len < MAX_CSV_AVG_LINE_LEN {
        log::debug!(
            "Classifier: {} lines with consistent comma counts (avg length {:.1})",
            lines.len(),
            avg_len
        );
        return Some(Delimiter::Comma);
    }

    None
}

/// Every count is at least one and the spread is within `max_spread`.
fn is_consistent(counts: &[usize], max_spread: usize) -> bool {
    let (Some(min), Some(max)) = (counts.iter().min(), counts.iter().max()) else {
        return false;
    };
    *min >= 1 && max - min <= max_spread
}

/// Tag counts of the first table in an HTML fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    /// Number of `<tr>` tags
    pub rows: usize,
    /// Number of `<td>` and `<th>` tags
    pub cells: usize,
    /// Number of `<th>` tags
    pub header_cells: usize,
    /// Explicit zero `border`, `cellpadding` or `cellspacing` on the table
    pub zero_layout_attr: bool,
}

impl TableStats {
    /// Check the table has the shape of tabular data.
    pub fn is_data_shaped(&self) -> bool {
        (self.header_cells >= 1 && self.cells >= 2) || (self.rows >= 2 && self.cells >= 4)
    }

    /// Check for signs the table is only used for visual layout.
    pub fn has_layout_red_flag(&self) -> bool {
        self.zero_layout_attr
            || (self.rows == 1 && self.cells == 1)
            || (self.rows == 1 && self.header_cells == 0)
    }

    /// Data-shaped and free of layout red flags.
    pub fn is_definite(&self) -> bool {
        self.is_data_shaped() && !self.has_layout_red_flag()
    }
}

/// Count rows and cells of the first `<table>…</table>` block.
pub fn table_stats(html: &str) -> Option<TableStats> {
    let block = TABLE_BLOCK_RE.find(html)?.as_str();
    let zero_layout_attr = TABLE_OPEN_RE
        .find(block)
        .is_some_and(|open| ZERO_LAYOUT_ATTR_RE.is_match(open.as_str()));
    let header_cells = HEADER_CELL_RE.find_iter(block).count();

    Some(TableStats {
        rows: ROW_RE.find_iter(block).count(),
        cells: DATA_CELL_RE.find_iter(block).count() + header_cells,
        header_cells,
        zero_layout_attr,
    })
}

/// Judge whether HTML holds a table of data rather than layout.
///
/// Ambiguous tables are not data tables.
pub fn is_definite_data_table(html: &str) -> bool {
    match table_stats(html) {
        Some(stats) => {
            let definite = stats.is_definite();
            log::debug!("Classifier: table stats {:?}, definite: {}", stats, definite);
            definite
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tabular_and_prose() {
        let tsv = ClipboardPayload::text("a\tb\nc\td\n");
        assert_eq!(
            classify(&tsv),
            Classification::TabularText {
                text: "a\tb\nc\td\n",
                delimiter: Delimiter::Tab
            }
        );

        let prose = ClipboardPayload::text("one two three");
        assert_eq!(classify(&prose), Classification::ProseText("one two three"));
    }

    #[test]
    fn test_classify_image_requires_no_text() {
        let item = ClipboardItem::new("image/png", vec![0x89, 0x50]);
        let image = ClipboardPayload::new().with_item(item.clone());
        assert_eq!(classify(&image).category(), ContentCategory::Image);

        let with_text = ClipboardPayload::text("caption").with_item(item);
        assert_eq!(classify(&with_text).category(), ContentCategory::ProseText);
    }

    #[test]
    fn test_classify_html_table() {
        let payload = ClipboardPayload::text("Name Age\nAlice 30")
            .with_html("<table><tr><th>Name</th><th>Age</th></tr><tr><td>Alice</td><td>30</td></tr></table>");
        assert_eq!(classify(&payload).category(), ContentCategory::HtmlTable);
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(classify(&ClipboardPayload::new()), Classification::Empty);
        assert_eq!(classify(&ClipboardPayload::text(" \n ")), Classification::Empty);
    }

    #[test]
    fn test_tab_only_lines_are_not_tabular() {
        assert_eq!(detect_delimiter("\t\n\t\n"), None);
        assert_eq!(detect_delimiter("a\tb\n\t\t\n"), None);
        assert_eq!(classify(&ClipboardPayload::text("\t\n\t\n")), Classification::Empty);
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a\tb\tc\nd\te\n"), Some(Delimiter::Tab));
        assert_eq!(detect_delimiter("\ta\tb\n\tc\td\n"), Some(Delimiter::Tab));
        assert_eq!(detect_delimiter("a\tb\nno tab here\n"), None);
        assert_eq!(detect_delimiter("a\tb"), None);
        assert_eq!(detect_delimiter("a\t\t\tb\nc\td"), None);

        assert_eq!(detect_delimiter("name,age\nAlice,30\nBob,41,x"), Some(Delimiter::Comma));
        assert_eq!(detect_delimiter("a,b\nc,d,e,f,g"), None);

        let long = "word, ".repeat(30);
        assert_eq!(detect_delimiter(&format!("{long}\n{long}")), None);
    }

    #[test]
    fn test_layout_table_is_not_definite() {
        let html = r#"<table border="0"><tr><td>Just a layout box</td></tr></table>"#;
        assert!(!is_definite_data_table(html));

        let stats = table_stats(html).unwrap();
        assert_eq!(stats.rows, 1);
        assert_eq!(stats.cells, 1);
        assert!(stats.zero_layout_attr);
    }

    #[test]
    fn test_zero_spacing_flags_layout() {
        let html = "<table cellspacing=0><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>";
        assert!(!is_definite_data_table(html));

        let bordered = "<table border=\"1\"><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>";
        assert!(is_definite_data_table(bordered));
    }

    #[test]
    fn test_single_row_without_header_is_layout() {
        let html = "<table><tr><td>a</td><td>b</td><td>c</td></tr></table>";
        assert!(!is_definite_data_table(html));

        let header = "<table><thead><tr><th>a</th><th>b</th></tr></thead></table>";
        let stats = table_stats(header).unwrap();
        assert_eq!(stats.header_cells, 2);
        assert!(stats.is_definite());
    }

    #[test]
    fn test_only_first_table_counts() {
        let html = "<table><tr><td>x</td></tr></table>\
                    <table><tr><th>a</th><th>b</th></tr></table>";
        assert_eq!(table_stats(html).unwrap().cells, 1);
        assert!(!is_definite_data_table(html));
        assert!(table_stats("<p>no table</p>").is_none());
    }
}

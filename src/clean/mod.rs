//! Prose cleaning: normalization, PDF line-break removal and list recognition.

mod list;
mod normalize;
mod options;
mod pdf;

pub use list::{convert_to_list_structure, has_list_patterns, ListRecognizer};
pub use normalize::{collapse_whitespace, normalize_lines, normalize_text};
pub use options::{CleanOptions, ListOptions, DEFAULT_PARAGRAPH_STARTERS};
pub use pdf::{clean_pdf_text, should_clean, LineMergeDecision, PdfCleaner};

//! Per-paste options.

use crate::clean::{CleanOptions, ListOptions};
use crate::model::MAX_TABLE_CELLS;

/// Options for a single paste.
///
/// Passed into every call; nothing carries over between pastes.
#[derive(Debug, Clone)]
pub struct PasteOptions {
    /// Keep spans and inline formatting of HTML tables
    pub preserve_formatting: bool,

    /// Clean prose even when it does not look PDF-extracted
    pub force_clean: bool,

    /// Largest table (in cells) that is pasted as a table
    pub max_table_cells: usize,

    /// PDF cleaning thresholds
    pub clean: CleanOptions,

    /// List recognition options
    pub lists: ListOptions,
}

impl PasteOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep table formatting on this paste.
    pub fn with_preserve_formatting(mut self, preserve: bool) -> Self {
        self.preserve_formatting = preserve;
        self
    }

    /// Always clean prose on this paste.
    pub fn with_force_clean(mut self, force: bool) -> Self {
        self.force_clean = force;
        self
    }

    /// Set the table cell limit.
    pub fn with_max_table_cells(mut self, max_cells: usize) -> Self {
        self.max_table_cells = max_cells;
        self
    }

    /// Set the cleaning thresholds.
    pub fn with_clean_options(mut self, clean: CleanOptions) -> Self {
        self.clean = clean;
        self
    }

    /// Set the list recognition options.
    pub fn with_list_options(mut self, lists: ListOptions) -> Self {
        self.lists = lists;
        self
    }
}

impl Default for PasteOptions {
    fn default() -> Self {
        Self {
            preserve_formatting: false,
            force_clean: false,
            max_table_cells: MAX_TABLE_CELLS,
            clean: CleanOptions::default(),
            lists: ListOptions::default(),
        }
    }
}

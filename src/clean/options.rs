//! Thresholds for prose cleaning and list recognition.

/// Tuning knobs for the PDF text cleaner.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOptions {
    /// Texts shorter than this (in characters) are never cleaned
    pub min_chars: usize,

    /// Texts with fewer non-empty lines are never cleaned
    pub min_lines: usize,

    /// Relative deviation from the mean line length counted as "uniform"
    pub uniformity_tolerance: f64,

    /// A line is considered full when `line + next word > max_len - merge_slack`
    pub merge_slack: usize,

    /// Paragraphs are closed before growing beyond `max_len * ratio`
    pub hard_paragraph_ratio: f64,

    /// Sentence boundaries split a paragraph only beyond `max_len * ratio`
    pub soft_paragraph_ratio: f64,

    /// Join `infor-` / `mation` word splits when merging lines
    pub fix_hyphenation: bool,
}

impl CleanOptions {
    /// Create options with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum text length.
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Set the minimum number of non-empty lines.
    pub fn with_min_lines(mut self, min_lines: usize) -> Self {
        self.min_lines = min_lines;
        self
    }

    /// Set the line-length uniformity tolerance (clamped to 0.0-1.0).
    pub fn with_uniformity_tolerance(mut self, tolerance: f64) -> Self {
        self.uniformity_tolerance = tolerance.clamp(0.0, 1.0);
        self
    }

    /// Set the merge slack.
    pub fn with_merge_slack(mut self, slack: usize) -> Self {
        self.merge_slack = slack;
        self
    }

    /// Enable or disable hyphenation repair.
    pub fn with_hyphenation_fix(mut self, fix: bool) -> Self {
        self.fix_hyphenation = fix;
        self
    }
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            min_chars: 50,
            min_lines: 3,
            uniformity_tolerance: 0.3,
            merge_slack: 3,
            hard_paragraph_ratio: 2.0,
            soft_paragraph_ratio: 1.5,
            fix_hyphenation: false,
        }
    }
}

/// Words that open a new paragraph after a sentence inside a bullet line.
pub const DEFAULT_PARAGRAPH_STARTERS: &[&str] = &[
    "Dersom", "Det", "Dette", "Denne", "Disse", "Følgende", "Hvis", "Når", "Merk",
];

/// Options for the list recognizer.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    /// Closed set of words that start a trailing paragraph on a bullet line
    pub paragraph_starters: Vec<String>,
}

impl ListOptions {
    /// Create options with the default starter words.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the paragraph starter words.
    pub fn with_paragraph_starters<S: Into<String>>(
        mut self,
        words: impl IntoIterator<Item = S>,
    ) -> Self {
        self.paragraph_starters = words.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            paragraph_starters: DEFAULT_PARAGRAPH_STARTERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_options_defaults() {
        let options = CleanOptions::default();
        assert_eq!(options.min_chars, 50);
        assert_eq!(options.min_lines, 3);
        assert_eq!(options.merge_slack, 3);
    }

    #[test]
    fn test_clean_options_builder() {
        let options = CleanOptions::new()
            .with_min_chars(10)
            .with_uniformity_tolerance(4.0)
            .with_hyphenation_fix(false);

        assert_eq!(options.min_chars, 10);
        assert_eq!(options.uniformity_tolerance, 1.0);
        assert!(!options.fix_hyphenation);
    }

    #[test]
    fn test_list_options_starters() {
        let options = ListOptions::new().with_paragraph_starters(["If", "When"]);
        assert_eq!(options.paragraph_starters, vec!["If", "When"]);
        assert!(ListOptions::default()
            .paragraph_starters
            .iter()
            .any(|w| w == "Følgende"));
    }
}

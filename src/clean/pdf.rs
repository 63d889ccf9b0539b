//! Removal of artificial line breaks from text copied out of PDF viewers.
//!
//! PDF viewers hand over one clipboard line per rendered line, so a pasted
//! paragraph arrives wrapped at the page width. The cleaner estimates the
//! full line width from the longest line and merges every line that was
//! broken only because the next word did not fit.

use std::sync::LazyLock;

use regex::Regex;

use super::CleanOptions;

static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+\.?|[-•*])\s").unwrap());

static MARKUP_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?[a-z][a-z0-9]*(?:\s[^<>]*)?/?>").unwrap());

static CODE_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:function\s|def\s|class\s|import\s|export\s|const\s|let\s|var\s|fn\s|pub\s|public\s|private\s|#include|return\b|if\s*\(|for\s*\(|while\s*\()",
    )
    .unwrap()
});

/// Whether two adjacent lines belong to the same line of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMergeDecision {
    /// The break was introduced by wrapping; join the lines
    Merge,
    /// The break is a genuine boundary; keep it
    Preserve,
}

/// Statistical line-break cleaner.
#[derive(Debug, Clone, Default)]
pub struct PdfCleaner {
    options: CleanOptions,
}

impl PdfCleaner {
    /// Create a cleaner with the given thresholds.
    pub fn new(options: CleanOptions) -> Self {
        Self { options }
    }

    /// Get the cleaner's options.
    pub fn options(&self) -> &CleanOptions {
        &self.options
    }

    /// Decide whether `text` looks like wrapped PDF prose worth cleaning.
    ///
    /// Short texts, code, JSON, markup and tab-structured data are never
    /// touched. Otherwise the text qualifies when most lines have about the
    /// same length, or when some line ends mid-sentence and the next one
    /// continues in lowercase.
    pub fn should_clean(&self, text: &str) -> bool {
        if text.chars().count() < self.options.min_chars {
            log::debug!("PdfCleaner: text too short to clean");
            return false;
        }

        let lines = non_empty_lines(text);
        if lines.len() < self.options.min_lines {
            log::debug!(
                "PdfCleaner: not enough lines ({} < {})",
                lines.len(),
                self.options.min_lines
            );
            return false;
        }

        if looks_like_json(text) || looks_like_markup(text) || looks_like_code(&lines) {
            log::debug!("PdfCleaner: text looks like code or markup, skipping");
            return false;
        }

        if text.lines().filter(|line| line.contains('\t')).count() > 1 {
            log::debug!("PdfCleaner: text contains tab-structured lines, skipping");
            return false;
        }

        let uniform = self.has_uniform_line_lengths(&lines);
        let broken = has_broken_sentences(&lines);
        log::debug!(
            "PdfCleaner: uniform line lengths = {}, broken sentences = {}",
            uniform,
            broken
        );
        uniform || broken
    }

    /// Merge artificially wrapped lines and regroup the text into paragraphs.
    ///
    /// Paragraphs in the result are separated by a single blank line. Blank
    /// lines in the input are kept as paragraph boundaries, so cleaning an
    /// already cleaned text changes nothing.
    pub fn clean(&self, text: &str) -> String {
        let blocks = split_blocks(text);
        let max_len = blocks
            .iter()
            .flatten()
            .map(|line| char_len(line))
            .max()
            .unwrap_or(0);

        if max_len == 0 {
            return String::new();
        }

        let mut paragraphs = Vec::new();
        let mut merges = 0;
        for block in &blocks {
            let decisions = self.merge_decisions(block, max_len);
            merges += decisions
                .iter()
                .filter(|d| **d == LineMergeDecision::Merge)
                .count();
            let folded = self.fold_lines(block, &decisions);
            paragraphs.extend(self.group_paragraphs(&folded, max_len));
        }

        log::debug!(
            "PdfCleaner: {} blocks, max line length {}, {} merges, {} paragraphs",
            blocks.len(),
            max_len,
            merges,
            paragraphs.len()
        );

        paragraphs.join("\n\n")
    }

    /// Compute the merge decision for every adjacent pair of `lines`.
    ///
    /// `max_len` stands in for the width of a full line.
    pub fn merge_decisions(&self, lines: &[&str], max_len: usize) -> Vec<LineMergeDecision> {
        lines
            .windows(2)
            .map(|pair| {
                let (line, next) = (pair[0], pair[1]);
                let first_word = next.split_whitespace().next().unwrap_or("");
                let combined = char_len(line) + 1 + char_len(first_word);

                // combined > max_len - slack, without underflow
                if combined + self.options.merge_slack > max_len {
                    LineMergeDecision::Merge
                } else if ends_sentence(line) {
                    LineMergeDecision::Preserve
                } else {
                    LineMergeDecision::Merge
                }
            })
            .collect()
    }

    fn fold_lines(&self, lines: &[&str], decisions: &[LineMergeDecision]) -> Vec<String> {
        let Some((first, rest)) = lines.split_first() else {
            return Vec::new();
        };

        let mut folded = Vec::new();
        let mut current = first.to_string();
        for (next, decision) in rest.iter().zip(decisions) {
            match decision {
                LineMergeDecision::Merge => self.append_line(&mut current, next),
                LineMergeDecision::Preserve => {
                    folded.push(std::mem::replace(&mut current, next.to_string()));
                }
            }
        }
        folded.push(current);
        folded
    }

    fn append_line(&self, current: &mut String, next: &str) {
        if self.options.fix_hyphenation && ends_with_split_word(current) && starts_lowercase(next)
        {
            current.pop();
        } else {
            current.push(' ');
        }
        current.push_str(next);
    }

    fn group_paragraphs(&self, lines: &[String], max_len: usize) -> Vec<String> {
        let hard_limit = max_len as f64 * self.options.hard_paragraph_ratio;
        let soft_limit = max_len as f64 * self.options.soft_paragraph_ratio;

        let mut paragraphs = Vec::new();
        let mut current = String::new();

        for (i, line) in lines.iter().enumerate() {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(line);

            let Some(next) = lines.get(i + 1) else {
                break;
            };

            let current_len = char_len(&current);
            let split = if LIST_MARKER_RE.is_match(next) {
                true
            } else if (current_len + 1 + char_len(next)) as f64 > hard_limit {
                true
            } else {
                current_len as f64 > soft_limit && ends_sentence(&current) && starts_uppercase(next)
            };

            if split {
                paragraphs.push(std::mem::take(&mut current));
            }
        }

        if !current.is_empty() {
            paragraphs.push(current);
        }
        paragraphs
    }

    fn has_uniform_line_lengths(&self, lines: &[&str]) -> bool {
        let lengths: Vec<f64> = lines.iter().map(|line| char_len(line) as f64).collect();
        let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
        let tolerance = mean * self.options.uniformity_tolerance;
        let within = lengths
            .iter()
            .filter(|len| (*len - mean).abs() <= tolerance)
            .count();
        within * 2 > lengths.len()
    }
}

/// Check whether `text` should be cleaned, using default thresholds.
pub fn should_clean(text: &str) -> bool {
    PdfCleaner::default().should_clean(text)
}

/// Clean `text` with default thresholds, regardless of [`should_clean`].
pub fn clean_pdf_text(text: &str) -> String {
    PdfCleaner::default().clean(text)
}

/// Check whether a line ends with sentence-final punctuation.
fn ends_sentence(line: &str) -> bool {
    line.trim_end_matches(['"', '\'', ')', '”', '’', '»'])
        .ends_with(['.', '!', '?'])
}

fn starts_lowercase(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_lowercase)
}

fn starts_uppercase(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_uppercase)
}

fn ends_with_split_word(line: &str) -> bool {
    let mut chars = line.chars().rev();
    chars.next() == Some('-') && chars.next().is_some_and(char::is_alphabetic)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn non_empty_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Trimmed non-empty lines, grouped by the blank lines between them.
fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim();
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

fn looks_like_markup(text: &str) -> bool {
    MARKUP_TAG_RE.find_iter(text).take(2).count() >= 2
}

fn looks_like_code(lines: &[&str]) -> bool {
    let keyword_lines = lines
        .iter()
        .filter(|line| CODE_KEYWORD_RE.is_match(line))
        .count();
    let symbol_lines = lines
        .iter()
        .filter(|line| line.ends_with([';', '{', '}']))
        .count();
    keyword_lines >= 2 || symbol_lines * 3 >= lines.len()
}

fn has_broken_sentences(lines: &[&str]) -> bool {
    lines
        .windows(2)
        .any(|pair| !ends_sentence(pair[0]) && starts_lowercase(pair[1]))
}

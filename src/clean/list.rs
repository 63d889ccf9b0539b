//! Recognition of bullet and numbered lists in pasted prose.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::ListOptions;
use crate::model::TextBlock;

static LIST_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(?:[•\-*]|\d+\.)[ \t]").unwrap());

static INLINE_BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S)[ \t]+([•\-*])[ \t]+").unwrap());

/// A spaced `-` or `*` inside a line only counts as a folded bullet when the
/// same marker occurs at least this often on the line.
const MIN_FOLDED_ASCII_MARKERS: usize = 2;

static BULLET_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[•\-*]\s+(.*)$").unwrap());

static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+(.*)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Ordered,
}

#[derive(Debug, Default)]
enum ScanState {
    #[default]
    None,
    Paragraph(String),
    List(ListKind, Vec<String>),
}

/// Line-scan state machine turning text into [`TextBlock`]s.
#[derive(Debug, Default)]
struct ListScanner {
    blocks: Vec<TextBlock>,
    state: ScanState,
    pending: Option<String>,
}

impl ListScanner {
    fn feed(&mut self, line: &str) {
        let line = line.trim();

        if line.is_empty() {
            self.finish_block();
            return;
        }

        if let Some((kind, content)) = parse_marker(line) {
            let continues_list =
                matches!(self.state, ScanState::List(current, _) if current == kind);
            if !continues_list {
                self.finish_block();
                self.state = ScanState::List(kind, Vec::new());
            } else {
                self.finish_item();
            }
            self.pending = Some(content.to_string());
            return;
        }

        match &mut self.state {
            ScanState::List(..) => {
                let item = self.pending.get_or_insert_with(String::new);
                if !item.is_empty() {
                    item.push(' ');
                }
                item.push_str(line);
            }
            ScanState::Paragraph(text) => {
                text.push('\n');
                text.push_str(line);
            }
            ScanState::None => {
                self.state = ScanState::Paragraph(line.to_string());
            }
        }
    }

    fn finish_item(&mut self) {
        if let (Some(item), ScanState::List(_, items)) = (self.pending.take(), &mut self.state) {
            items.push(item);
        }
    }

    fn finish_block(&mut self) {
        self.finish_item();
        match std::mem::take(&mut self.state) {
            ScanState::None => {}
            ScanState::Paragraph(text) => self.blocks.push(TextBlock::Paragraph(text)),
            ScanState::List(_, items) if items.is_empty() => {}
            ScanState::List(ListKind::Bullet, items) => {
                self.blocks.push(TextBlock::BulletList(items))
            }
            ScanState::List(ListKind::Ordered, items) => {
                self.blocks.push(TextBlock::OrderedList(items))
            }
        }
    }

    fn finish(mut self) -> Vec<TextBlock> {
        self.finish_block();
        self.blocks
    }
}

/// Markers on `line` that were folded in from separate bullet lines.
fn folded_markers(line: &str) -> Vec<&str> {
    let markers: Vec<&str> = INLINE_BULLET_RE
        .captures_iter(line)
        .filter_map(|caps| caps.get(2).map(|m| m.as_str()))
        .collect();

    let mut folded: Vec<&str> = Vec::new();
    for marker in &markers {
        let count = markers.iter().filter(|m| *m == marker).count();
        let counts = *marker == "•" || count >= MIN_FOLDED_ASCII_MARKERS;
        if counts && !folded.contains(marker) {
            folded.push(*marker);
        }
    }
    folded
}

/// Put every folded bullet on `line` back on its own line.
fn split_folded_bullets(line: &str) -> Cow<'_, str> {
    let folded = folded_markers(line);
    if folded.is_empty() {
        return Cow::Borrowed(line);
    }

    INLINE_BULLET_RE.replace_all(line, |caps: &Captures<'_>| {
        let marker = &caps[2];
        if folded.contains(&marker) {
            format!("{}\n{} ", &caps[1], marker)
        } else {
            caps[0].to_string()
        }
    })
}

fn parse_marker(line: &str) -> Option<(ListKind, &str)> {
    if let Some(caps) = BULLET_ITEM_RE.captures(line) {
        return caps.get(1).map(|m| (ListKind::Bullet, m.as_str()));
    }
    ORDERED_ITEM_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| (ListKind::Ordered, m.as_str()))
}

/// Detects list markup and restructures it into text blocks.
#[derive(Debug, Clone)]
pub struct ListRecognizer {
    starter_re: Option<Regex>,
}

impl ListRecognizer {
    /// Create a recognizer with the given options.
    pub fn new(options: &ListOptions) -> Self {
        let words: Vec<String> = options
            .paragraph_starters
            .iter()
            .filter(|w| !w.trim().is_empty())
            .map(|w| regex::escape(w.trim()))
            .collect();

        let starter_re = if words.is_empty() {
            None
        } else {
            Regex::new(&format!(r"([.!?])\s+((?:{})\b)", words.join("|"))).ok()
        };

        Self { starter_re }
    }

    /// Check whether `text` contains list markers.
    ///
    /// Matches lines starting with `•`, `-`, `*` or `1.` style markers, and
    /// bullets that were folded into the middle of a line. A spaced `-` or
    /// `*` mid-line needs a second occurrence on the same line to count.
    pub fn has_list_patterns(&self, text: &str) -> bool {
        LIST_LINE_RE.is_match(text) || text.lines().any(|line| !folded_markers(line).is_empty())
    }

    /// Re-split folded bullets and trailing paragraphs onto their own lines.
    pub fn preprocess(&self, text: &str) -> String {
        text.lines()
            .map(split_folded_bullets)
            .collect::<Vec<_>>()
            .join("\n")
            .lines()
            .map(|line| self.split_trailing_paragraph(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn split_trailing_paragraph(&self, line: &str) -> String {
        let Some(re) = &self.starter_re else {
            return line.to_string();
        };
        if !BULLET_ITEM_RE.is_match(line.trim_start()) {
            return line.to_string();
        }

        match re.captures(line) {
            Some(caps) => {
                let (Some(punct), Some(word)) = (caps.get(1), caps.get(2)) else {
                    return line.to_string();
                };
                format!("{}\n\n{}", &line[..punct.end()], &line[word.start()..])
            }
            None => line.to_string(),
        }
    }

    /// Convert text into paragraphs, bullet lists and ordered lists.
    pub fn convert(&self, text: &str) -> Vec<TextBlock> {
        let prepared = self.preprocess(text);
        let mut scanner = ListScanner::default();
        for line in prepared.lines() {
            scanner.feed(line);
        }
        let blocks = scanner.finish();

        log::debug!(
            "ListRecognizer: {} blocks ({} lists)",
            blocks.len(),
            blocks.iter().filter(|b| b.is_list()).count()
        );
        blocks
    }
}

impl Default for ListRecognizer {
    fn default() -> Self {
        Self::new(&ListOptions::default())
    }
}

/// Check whether `text` contains list markers.
pub fn has_list_patterns(text: &str) -> bool {
    ListRecognizer::default().has_list_patterns(text)
}

/// Convert text into text blocks using the default paragraph starters.
pub fn convert_to_list_structure(text: &str) -> Vec<TextBlock> {
    ListRecognizer::default().convert(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_list_patterns() {
        assert!(has_list_patterns("1. one\n2. two"));
        assert!(has_list_patterns("intro\n- item"));
        assert!(has_list_patterns("first • second • third"));
        assert!(!has_list_patterns("no markers, just words"));
        assert!(!has_list_patterns("a well-known fact"));
        assert!(has_list_patterns("Bring: - pens - paper"));
        assert!(has_list_patterns("Bring: * pens * paper"));
        assert!(!has_list_patterns("Pages 10 - 12 cover the budget"));
    }

    #[test]
    fn test_folded_hyphen_bullets_are_split() {
        let blocks = convert_to_list_structure("Bring: - pens - paper - a laptop");
        assert_eq!(
            blocks,
            vec![
                TextBlock::Paragraph("Bring:".into()),
                TextBlock::BulletList(vec!["pens".into(), "paper".into(), "a laptop".into()]),
            ]
        );
    }

    #[test]
    fn test_single_spaced_hyphen_stays_prose() {
        let text = "Pages 10 - 12 cover the budget";
        assert_eq!(
            convert_to_list_structure(text),
            vec![TextBlock::Paragraph(text.into())]
        );
    }

    #[test]
    fn test_bullets_then_paragraph() {
        let blocks = convert_to_list_structure("• first\n• second\n\nPlain text.");
        assert_eq!(
            blocks,
            vec![
                TextBlock::BulletList(vec!["first".into(), "second".into()]),
                TextBlock::Paragraph("Plain text.".into()),
            ]
        );
    }

    #[test]
    fn test_ordered_list() {
        let blocks = convert_to_list_structure("1. one\n2. two\n3. three");
        assert_eq!(
            blocks,
            vec![TextBlock::OrderedList(vec![
                "one".into(),
                "two".into(),
                "three".into()
            ])]
        );
    }

    #[test]
    fn test_multi_line_item() {
        let blocks = convert_to_list_structure("- first item\n  continues here\n- second");
        assert_eq!(
            blocks,
            vec![TextBlock::BulletList(vec![
                "first item continues here".into(),
                "second".into()
            ])]
        );
    }

    #[test]
    fn test_switching_list_kinds() {
        let blocks = convert_to_list_structure("• a\n• b\n1. c\n2. d");
        assert_eq!(
            blocks,
            vec![
                TextBlock::BulletList(vec!["a".into(), "b".into()]),
                TextBlock::OrderedList(vec!["c".into(), "d".into()]),
            ]
        );
    }

    #[test]
    fn test_paragraph_lines_keep_breaks() {
        let blocks = convert_to_list_structure("Line one\nLine two\n• item");
        assert_eq!(
            blocks,
            vec![
                TextBlock::Paragraph("Line one\nLine two".into()),
                TextBlock::BulletList(vec!["item".into()]),
            ]
        );
    }

    #[test]
    fn test_inline_bullets_are_split() {
        let blocks = convert_to_list_structure("Bring: • pens • paper • a laptop");
        assert_eq!(
            blocks,
            vec![
                TextBlock::Paragraph("Bring:".into()),
                TextBlock::BulletList(vec!["pens".into(), "paper".into(), "a laptop".into()]),
            ]
        );
    }

    #[test]
    fn test_trailing_paragraph_starter() {
        let text = "• Søknaden må sendes innen fristen. Dersom fristen er ute, kontakt oss.";
        let blocks = convert_to_list_structure(text);
        assert_eq!(
            blocks,
            vec![
                TextBlock::BulletList(vec!["Søknaden må sendes innen fristen.".into()]),
                TextBlock::Paragraph("Dersom fristen er ute, kontakt oss.".into()),
            ]
        );
    }

    #[test]
    fn test_starter_only_applies_to_bullet_lines() {
        let text = "Søknaden må sendes innen fristen. Dersom fristen er ute, kontakt oss.";
        let blocks = convert_to_list_structure(text);
        assert_eq!(blocks, vec![TextBlock::Paragraph(text.into())]);
    }

    #[test]
    fn test_custom_starters() {
        let recognizer =
            ListRecognizer::new(&ListOptions::new().with_paragraph_starters(["If"]));
        let blocks = recognizer.convert("- Send the form. If it bounces, call us.");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1], TextBlock::Paragraph("If it bounces, call us.".into()));
    }

    #[test]
    fn test_empty_input() {
        assert!(convert_to_list_structure("").is_empty());
        assert!(convert_to_list_structure("\n\n").is_empty());
    }
}

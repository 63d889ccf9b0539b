//! Whitespace and invisible-character normalization.

use unicode_normalization::UnicodeNormalization;

/// Characters that render as a space but are not ASCII spaces.
const SPACE_LIKE: &[char] = &['\u{00A0}', '\u{2007}', '\u{202F}'];

/// Zero-width characters dropped entirely.
const ZERO_WIDTH: &[char] = &['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

/// Normalize a single value: NFC, no invisible characters, one space between words.
pub fn normalize_text(text: &str) -> String {
    collapse_whitespace(text).trim().to_string()
}

/// Like [`normalize_text`] but keeps a single leading or trailing space.
///
/// Used for inline runs whose neighbours supply the surrounding words.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;

    for c in text.nfc() {
        if ZERO_WIDTH.contains(&c) {
            continue;
        }
        if c.is_whitespace() || SPACE_LIKE.contains(&c) {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
            continue;
        }
        in_space = false;
        out.push(c);
    }

    out
}

/// Normalize every line of a text while keeping its line structure.
pub fn normalize_lines(text: &str) -> String {
    text.lines().map(normalize_text).collect::<Vec<_>>().join("\n")
}

//! Clipboard payload types.

use serde::{Deserialize, Serialize};

/// Coarse category of a clipboard item's MIME type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MimeCategory {
    /// Any `image/*` item
    Image,
    /// Everything else
    #[default]
    Other,
}

impl MimeCategory {
    /// Categorize a MIME type string.
    pub fn from_mime(mime: &str) -> Self {
        if mime.trim().to_ascii_lowercase().starts_with("image/") {
            MimeCategory::Image
        } else {
            MimeCategory::Other
        }
    }
}

/// A single clipboard item with a readable blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardItem {
    /// Coarse category
    pub mime_category: MimeCategory,

    /// Full MIME type (e.g., "image/png")
    pub mime_type: String,

    /// Raw item data
    #[serde(default)]
    pub blob: Vec<u8>,
}

impl ClipboardItem {
    /// Create an item, deriving the category from the MIME type.
    pub fn new(mime_type: impl Into<String>, blob: Vec<u8>) -> Self {
        let mime_type = mime_type.into();
        Self {
            mime_category: MimeCategory::from_mime(&mime_type),
            mime_type,
            blob,
        }
    }

    /// Check if this item is an image.
    pub fn is_image(&self) -> bool {
        self.mime_category == MimeCategory::Image
    }

    /// Suggested file extension for the item.
    pub fn extension(&self) -> &str {
        match self.mime_type.to_ascii_lowercase().as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/gif" => "gif",
            "image/webp" => "webp",
            "image/bmp" => "bmp",
            "image/svg+xml" => "svg",
            "image/tiff" => "tiff",
            _ => "bin",
        }
    }
}

/// Everything the host hands over for one paste event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClipboardPayload {
    /// `text/plain` flavour
    #[serde(default)]
    pub plain_text: String,

    /// `text/html` flavour
    #[serde(default)]
    pub html: String,

    /// Other items (files, images)
    #[serde(default)]
    pub items: Vec<ClipboardItem>,
}

impl ClipboardPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a payload with plain text only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            ..Self::default()
        }
    }

    /// Set the plain text flavour.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.plain_text = text.into();
        self
    }

    /// Set the HTML flavour.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    /// Add an item.
    pub fn with_item(mut self, item: ClipboardItem) -> Self {
        self.items.push(item);
        self
    }

    /// First image item, if any.
    pub fn first_image(&self) -> Option<&ClipboardItem> {
        self.items.iter().find(|item| item.is_image())
    }

    /// Check if both text flavours are empty or whitespace-only.
    pub fn has_no_text(&self) -> bool {
        self.plain_text.trim().is_empty() && self.html.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_category() {
        assert_eq!(MimeCategory::from_mime("image/png"), MimeCategory::Image);
        assert_eq!(MimeCategory::from_mime("IMAGE/JPEG"), MimeCategory::Image);
        assert_eq!(MimeCategory::from_mime("text/plain"), MimeCategory::Other);
    }

    #[test]
    fn test_payload_builder() {
        let payload = ClipboardPayload::new()
            .with_text("  ")
            .with_html("\n")
            .with_item(ClipboardItem::new("image/png", vec![1, 2, 3]));

        assert!(payload.has_no_text());
        assert_eq!(payload.first_image().map(|i| i.extension()), Some("png"));
    }
}

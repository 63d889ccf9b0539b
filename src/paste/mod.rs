//! The paste pipeline.
//!
//! [`PasteHandler`] classifies a clipboard payload, runs the matching
//! handler and inserts the resulting nodes into the host document. Errors
//! never escape: each one is reported through the [`Notifier`] and the paste
//! falls back to the host's default behaviour.
//!
//! # Example
//!
//! ```
//! use unpaste::paste::{LogNotifier, MemoryStorage, PasteHandler, PasteOptions};
//! use unpaste::render::MemoryDocument;
//! use unpaste::ClipboardPayload;
//!
//! let handler = PasteHandler::new(LogNotifier, MemoryStorage::new());
//! let mut doc = MemoryDocument::new();
//! let payload = ClipboardPayload::text("Name\tAge\nAlice\t30\n");
//!
//! let outcome = block_on(handler.handle(&payload, &PasteOptions::default(), &mut doc));
//! assert!(outcome.is_inserted());
//! # fn block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod notify;
mod options;
mod storage;

pub use notify::{LogNotifier, Notifier, Severity};
pub use options::PasteOptions;
#[cfg(feature = "async")]
pub use storage::DirectoryStorage;
pub use storage::{MemoryStorage, StoredImage, TempStorage};

use std::borrow::Cow;

use crate::clean::{ListRecognizer, PdfCleaner};
use crate::detect::{classify, Classification, ContentCategory};
use crate::error::{Error, Result};
use crate::model::{ClipboardItem, ClipboardPayload, Node};
use crate::render::{blocks_to_nodes, grid_to_node, insert_nodes, structured_to_node, DocumentHost};
use crate::table::TableBuilder;

/// Result of handling one paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// Nodes were inserted into the host document
    Inserted {
        /// Classified content
        category: ContentCategory,
        /// The inserted top-level nodes
        nodes: Vec<Node>,
    },
    /// The host should perform its default paste
    Default {
        /// Classified content
        category: ContentCategory,
    },
}

impl PasteOutcome {
    /// Classified content of the payload.
    pub fn category(&self) -> ContentCategory {
        match self {
            PasteOutcome::Inserted { category, .. } | PasteOutcome::Default { category } => {
                *category
            }
        }
    }

    /// Check if nodes were inserted.
    pub fn is_inserted(&self) -> bool {
        matches!(self, PasteOutcome::Inserted { .. })
    }

    /// Inserted nodes (empty for a default paste).
    pub fn nodes(&self) -> &[Node] {
        match self {
            PasteOutcome::Inserted { nodes, .. } => nodes,
            PasteOutcome::Default { .. } => &[],
        }
    }
}

/// Handles paste events against a host document.
///
/// Holds the long-lived collaborators; the options and the document are
/// supplied per call.
#[derive(Debug)]
pub struct PasteHandler<N, S> {
    notifier: N,
    storage: S,
}

impl<N: Notifier, S: TempStorage> PasteHandler<N, S> {
    /// Create a handler with the given notifier and image storage.
    pub fn new(notifier: N, storage: S) -> Self {
        Self { notifier, storage }
    }

    /// Get the notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Get the image storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Handle one paste.
    ///
    /// Returns [`PasteOutcome::Default`] whenever the host should paste as
    /// usual, including after any failure.
    pub async fn handle<H: DocumentHost + ?Sized>(
        &self,
        payload: &ClipboardPayload,
        options: &PasteOptions,
        host: &mut H,
    ) -> PasteOutcome {
        let classification = classify(payload);
        let category = classification.category();

        let result = match classification {
            Classification::Image(item) => self.paste_image(item, host).await,
            other => build_nodes(&other, options).and_then(|nodes| match nodes {
                Some(nodes) => insert_nodes(host, nodes.clone()).map(|()| Some(nodes)),
                None => Ok(None),
            }),
        };

        match result {
            Ok(Some(nodes)) => {
                self.notifier.notify(success_message(category), Severity::Success);
                PasteOutcome::Inserted { category, nodes }
            }
            Ok(None) => PasteOutcome::Default { category },
            Err(err) => {
                self.report(category, &err);
                PasteOutcome::Default { category }
            }
        }
    }

    async fn paste_image<H: DocumentHost + ?Sized>(
        &self,
        item: &ClipboardItem,
        host: &mut H,
    ) -> Result<Option<Vec<Node>>> {
        let stored = self.storage.store(item).await?;
        let nodes = vec![Node::Image {
            id: stored.id,
            src: stored.url,
        }];

        insert_nodes(host, nodes.clone())?;
        Ok(Some(nodes))
    }

    fn report(&self, category: ContentCategory, err: &Error) {
        let (message, severity) = match (category, err) {
            (ContentCategory::Image, _) => (
                format!("Could not paste image: {}", err),
                Severity::Error,
            ),
            (_, Error::TooManyCells { cells, limit }) => (
                format!(
                    "Table too large to paste ({} cells, limit {}); pasting as plain content",
                    cells, limit
                ),
                Severity::Warning,
            ),
            (_, Error::InsertionRejected(kind)) => (
                format!("A {} cannot be pasted here; pasting as plain content", kind),
                Severity::Warning,
            ),
            (ContentCategory::TabularText | ContentCategory::HtmlTable, _) => (
                format!("Could not paste table: {}", err),
                Severity::Warning,
            ),
            _ => (format!("Paste failed: {}", err), Severity::Error),
        };

        log::debug!("PasteHandler: {} paste fell back to default: {}", category, err);
        self.notifier.notify(&message, severity);
    }
}

fn success_message(category: ContentCategory) -> &'static str {
    match category {
        ContentCategory::Image => "Image pasted",
        ContentCategory::TabularText | ContentCategory::HtmlTable => "Table pasted",
        ContentCategory::ProseText => "Cleaned text pasted",
        ContentCategory::Empty => "Pasted",
    }
}

/// Build the nodes for a classified payload without inserting them.
///
/// Returns `None` when the host should paste as usual: for empty payloads,
/// for prose that is neither PDF-wrapped nor list-like, and for images,
/// which need a [`TempStorage`] first.
pub fn build_nodes(
    classification: &Classification<'_>,
    options: &PasteOptions,
) -> Result<Option<Vec<Node>>> {
    let builder = TableBuilder::new().with_max_cells(options.max_table_cells);

    match *classification {
        Classification::TabularText { text, delimiter } => {
            let grid = builder.from_delimited(text, delimiter)?;
            Ok(Some(vec![grid_to_node(&grid)]))
        }
        Classification::HtmlTable(html) => {
            let node = if options.preserve_formatting {
                structured_to_node(&builder.sanitize_structured(html)?)
            } else {
                grid_to_node(&builder.from_html(html)?)
            };
            Ok(Some(vec![node]))
        }
        Classification::ProseText(text) => Ok(prose_nodes(text, options)),
        Classification::Image(_) | Classification::Empty => Ok(None),
    }
}

fn prose_nodes(text: &str, options: &PasteOptions) -> Option<Vec<Node>> {
    let cleaner = PdfCleaner::new(options.clean.clone());
    let cleaned = options.force_clean || cleaner.should_clean(text);
    let text: Cow<'_, str> = if cleaned {
        Cow::Owned(cleaner.clean(text))
    } else {
        Cow::Borrowed(text)
    };

    let recognizer = ListRecognizer::new(&options.lists);
    if !cleaned && !recognizer.has_list_patterns(&text) {
        log::debug!("PasteHandler: plain prose, leaving to host");
        return None;
    }

    let blocks = recognizer.convert(&text);
    if blocks.is_empty() {
        return None;
    }

    log::debug!(
        "PasteHandler: {} blocks from prose (cleaned: {})",
        blocks.len(),
        cleaned
    );
    Some(blocks_to_nodes(&blocks))
}

//! Temporary storage for pasted images.

use std::future::{self, Future};
use std::sync::Mutex;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::ClipboardItem;

/// A stored image the editor can display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredImage {
    /// Storage ID
    pub id: String,
    /// URL of the stored blob
    pub url: String,
}

/// Stores pasted blobs until the document is saved.
pub trait TempStorage {
    /// Store the item's blob and return where it can be found.
    fn store(&self, item: &ClipboardItem) -> impl Future<Output = Result<StoredImage>>;
}

/// In-process storage keeping blobs in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<Vec<(String, ClipboardItem)>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    /// Check if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a stored item by ID.
    pub fn get(&self, id: &str) -> Option<ClipboardItem> {
        let items = self.items.lock().ok()?;
        items
            .iter()
            .find(|(stored, _)| stored == id)
            .map(|(_, item)| item.clone())
    }

    fn insert(&self, item: &ClipboardItem) -> Result<StoredImage> {
        if item.blob.is_empty() {
            return Err(Error::Storage("image data is empty".to_string()));
        }

        let mut items = self
            .items
            .lock()
            .map_err(|_| Error::Storage("memory store is poisoned".to_string()))?;
        let id = format!("img-{}", items.len() + 1);
        items.push((id.clone(), item.clone()));

        Ok(StoredImage {
            url: format!("memory://{}.{}", id, item.extension()),
            id,
        })
    }
}

impl TempStorage for MemoryStorage {
    fn store(&self, item: &ClipboardItem) -> impl Future<Output = Result<StoredImage>> {
        future::ready(self.insert(item))
    }
}

#[cfg(feature = "async")]
pub use directory::DirectoryStorage;

#[cfg(feature = "async")]
mod directory {
    use std::future::Future;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Local;

    use super::{StoredImage, TempStorage};
    use crate::error::{Error, Result};
    use crate::model::ClipboardItem;

    /// Writes blobs into a directory with timestamped file names.
    #[derive(Debug)]
    pub struct DirectoryStorage {
        dir: PathBuf,
        counter: AtomicUsize,
    }

    impl DirectoryStorage {
        /// Store files under `dir`, creating it on first use.
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self {
                dir: dir.into(),
                counter: AtomicUsize::new(0),
            }
        }

        /// Target directory.
        pub fn dir(&self) -> &Path {
            &self.dir
        }
    }

    impl TempStorage for DirectoryStorage {
        fn store(&self, item: &ClipboardItem) -> impl Future<Output = Result<StoredImage>> {
            let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
            let id = format!("paste-{}-{}", Local::now().format("%Y%m%d-%H%M%S%3f"), seq);
            let path = self.dir.join(format!("{}.{}", id, item.extension()));
            let dir = self.dir.clone();
            let blob = item.blob.clone();

            async move {
                if blob.is_empty() {
                    return Err(Error::Storage("image data is empty".to_string()));
                }
                tokio::fs::create_dir_all(&dir).await?;
                tokio::fs::write(&path, &blob).await?;
                log::debug!("DirectoryStorage: wrote {} bytes to {}", blob.len(), path.display());

                Ok(StoredImage {
                    id,
                    url: format!("file://{}", path.display()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();
        let stored = storage
            .store(&ClipboardItem::new("image/png", vec![1, 2, 3]))
            .await
            .unwrap();

        assert_eq!(stored.id, "img-1");
        assert_eq!(stored.url, "memory://img-1.png");
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get("img-1").map(|item| item.blob), Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_memory_storage_rejects_empty_blob() {
        let storage = MemoryStorage::new();
        let result = storage.store(&ClipboardItem::new("image/png", vec![])).await;
        assert!(matches!(result, Err(Error::Storage(_))));
        assert!(storage.is_empty());
    }
}

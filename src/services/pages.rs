//! Wiki page storage
//!
//! Pages live as `<name>.txt` files under one data directory. Saves to the
//! same file are serialized through a per-path lock and land via rename, so
//! readers see either the old body or the new one.

use crate::error::AppError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Extension appended to every page name on disk
pub const PAGE_EXTENSION: &str = "txt";

/// A named wiki page and its raw content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page name as it appears in the URL
    pub name: String,
    /// Raw page content
    pub body: Vec<u8>,
}

impl Page {
    /// Create a page from a name and body
    pub fn new(name: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// Page with no content, used when editing a page that does not exist yet
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Body decoded for display
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Check that a page name maps to a single file inside the data directory
pub fn validate_name(name: &str) -> Result<(), AppError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(AppError::InvalidPageName(name.to_string()));
    }
    Ok(())
}

/// File-per-page store rooted at a data directory
#[derive(Debug)]
pub struct PageStore {
    root: PathBuf,
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl PageStore {
    /// Create a store writing into `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Directory holding the page files
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing page `name`
    pub fn page_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, PAGE_EXTENSION))
    }

    /// Read page `name` from disk
    ///
    /// # Returns
    /// * `Ok(Page)` - The stored page
    /// * `Err(AppError)` - Invalid name, missing file, or unreadable file
    pub async fn load(&self, name: &str) -> Result<Page, AppError> {
        validate_name(name)?;
        let body = fs::read(self.page_path(name)).await?;
        Ok(Page::new(name, body))
    }

    /// Write `page` to disk, replacing any previous content
    ///
    /// # Returns
    /// * `Ok(())` - The page is durably in place
    /// * `Err(AppError)` - Invalid name or any filesystem failure
    pub async fn save(&self, page: &Page) -> Result<(), AppError> {
        validate_name(&page.name)?;
        let target = self.page_path(&page.name);

        let lock = self.lock_for(&target).await;
        let result = {
            let _guard = lock.lock().await;
            self.write_replace(&target, &page.body).await
        };
        self.release(&target, lock).await;

        result
    }

    async fn lock_for(&self, target: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(target.to_path_buf()).or_default().clone()
    }

    async fn release(&self, target: &Path, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        // table + our clone; anyone else waiting holds a third reference
        if Arc::strong_count(&lock) == 2 {
            locks.remove(target);
        }
    }

    async fn write_replace(&self, target: &Path, body: &[u8]) -> Result<(), AppError> {
        let tmp = target.with_extension(format!("{}.{}.tmp", PAGE_EXTENSION, Uuid::new_v4()));

        let written = async {
            let mut file = open_page_file(&tmp).await?;
            file.write_all(body).await?;
            file.sync_all().await?;
            fs::rename(&tmp, target).await
        }
        .await;

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                tracing::debug!(path = %tmp.display(), error = %cleanup, "temp file cleanup skipped");
            }
            tracing::warn!(path = %target.display(), error = %e, "page save failed");
            return Err(AppError::Storage(e));
        }

        tracing::debug!(path = %target.display(), bytes = body.len(), "page saved");
        Ok(())
    }
}

#[cfg(unix)]
async fn open_page_file(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .await
}

#[cfg(not(unix))]
async fn open_page_file(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .await
}

//! Local filesystem storage implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result, RowError};
use crate::models::GemDocument;
use crate::storage::DocumentStorage;

/// Writes `{id}.json` files into a single directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Path of the document for `id`.
    ///
    /// Identifiers containing a path separator are rejected so nothing is
    /// ever written outside the root.
    pub fn document_path(&self, id: &str) -> std::result::Result<PathBuf, RowError> {
        if id.contains(['/', '\\']) {
            return Err(RowError::InvalidIdentifier { id: id.to_string() });
        }
        Ok(self.root_dir.join(format!("{id}.json")))
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let tmp = path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStorage for LocalStorage {
    async fn prepare(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root_dir).await?;
        Ok(())
    }

    async fn write_document(
        &self,
        id: &str,
        document: &GemDocument,
    ) -> std::result::Result<PathBuf, RowError> {
        let path = self.document_path(id)?;
        let write_err = |e: AppError| RowError::Write {
            id: id.to_string(),
            message: e.to_string(),
        };

        let bytes = document.to_pretty_json().map_err(write_err)?;
        self.write_bytes(&path, &bytes).await.map_err(write_err)?;
        log::debug!("Wrote {}", path.display());
        Ok(path)
    }

    fn location(&self) -> String {
        self.root_dir.display().to_string()
    }
}

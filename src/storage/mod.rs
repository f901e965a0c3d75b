//! Storage abstractions for document persistence.
//!
//! One document per sheet row, keyed by the row identifier:
//!
//! ```text
//! {output_dir}/
//! ├── G001.json
//! ├── G002.json
//! └── ...
//! ```
//!
//! Writing an identifier again replaces the earlier file (last write wins).

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{Result, RowError};
use crate::models::GemDocument;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for document storage backends.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Make sure the destination exists before any document is written.
    async fn prepare(&self) -> Result<()>;

    /// Persist `document` under `id`, replacing any previous version.
    ///
    /// Returns the location written.
    async fn write_document(
        &self,
        id: &str,
        document: &GemDocument,
    ) -> std::result::Result<PathBuf, RowError>;

    /// Human-readable location of the store, for logging.
    fn location(&self) -> String;
}

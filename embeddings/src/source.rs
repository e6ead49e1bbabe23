//! Reading the text that gets embedded.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::error::{EmbeddingError, Result};

/// Text content of a user-chosen file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    /// File name, used as the embedding label.
    pub label: String,

    /// Where the text was read from.
    pub path: PathBuf,

    /// Full file content.
    pub text: String,
}

impl SourceText {
    /// Wrap text that did not come from a file.
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            path: PathBuf::from(&label),
            label,
            text: text.into(),
        }
    }

    /// Read `path` as UTF-8 text. No size limit is applied.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .await
            .map_err(|e| EmbeddingError::ReadSource(format!("{}: {e}", path.display())))?;

        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!("Read {} bytes from {}", text.len(), path.display());

        Ok(Self {
            label,
            path: path.to_path_buf(),
            text,
        })
    }
}

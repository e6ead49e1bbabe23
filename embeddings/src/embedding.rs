//! The embedding value and its export format.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use crate::error::Result;

/// A dense vector together with the name of the text it was derived from.
///
/// Embeddings are replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    /// Identifying name, normally the source file name.
    pub label: String,

    /// The vector returned by the embedding service.
    pub vector: Vec<f32>,
}

impl Embedding {
    /// Create a new embedding.
    pub fn new(label: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            label: label.into(),
            vector,
        }
    }

    /// Number of components in the vector.
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    /// Formatted JSON of label and vector.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// File name used when exporting, `embedding-<label>.json`.
    pub fn export_file_name(&self) -> String {
        let label: String = self
            .label
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        format!("embedding-{label}.json")
    }
}

/// Write `embedding` into `dir` using the export naming convention.
pub async fn export_embedding(embedding: &Embedding, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).await?;

    let path = dir.join(embedding.export_file_name());
    fs::write(&path, embedding.to_pretty_json()?).await?;

    info!("Exported embedding '{}' to {}", embedding.label, path.display());
    Ok(path)
}

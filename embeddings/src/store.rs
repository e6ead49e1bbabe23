//! Persistent storage for the reference embedding.
//!
//! The store holds exactly one record under one fixed location. A missing
//! record is the first-run state; an unreadable one is discarded.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::embedding::Embedding;
use crate::error::{EmbeddingError, Result};

/// On-disk format of the reference record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReferenceRecord {
    /// Version of the storage format.
    version: u32,

    /// When the reference was saved.
    saved_at: DateTime<Utc>,

    /// The reference embedding.
    embedding: Embedding,
}

impl ReferenceRecord {
    const CURRENT_VERSION: u32 = 1;
}

/// Single-slot persistent store for the reference embedding.
pub struct ReferenceStore {
    path: PathBuf,
}

impl ReferenceStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the reference embedding.
    ///
    /// Returns `Ok(None)` when nothing is stored. Corrupted content is removed
    /// and also reported as `Ok(None)`.
    pub async fn load(&self) -> Result<Option<Embedding>> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No reference stored at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(EmbeddingError::Store(format!(
                    "{}: {e}",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_slice::<ReferenceRecord>(&content) {
            Ok(record) if record.version == ReferenceRecord::CURRENT_VERSION => {
                info!(
                    "Loaded reference '{}' ({} dimensions, saved {})",
                    record.embedding.label,
                    record.embedding.dimension(),
                    record.saved_at.to_rfc3339()
                );
                Ok(Some(record.embedding))
            }
            Ok(record) => {
                warn!(
                    "Discarding reference with unsupported version {} at {}",
                    record.version,
                    self.path.display()
                );
                self.discard().await;
                Ok(None)
            }
            Err(e) => {
                warn!(
                    "Discarding corrupted reference at {}: {e}",
                    self.path.display()
                );
                self.discard().await;
                Ok(None)
            }
        }
    }

    /// Persist `embedding` as the reference, replacing any previous one.
    pub async fn save(&self, embedding: &Embedding) -> Result<()> {
        let record = ReferenceRecord {
            version: ReferenceRecord::CURRENT_VERSION,
            saved_at: Utc::now(),
            embedding: embedding.clone(),
        };
        let content = serde_json::to_string(&record)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| EmbeddingError::Store(format!("{}: {e}", parent.display())))?;
        }

        fs::write(&self.path, content)
            .await
            .map_err(|e| EmbeddingError::Store(format!("{}: {e}", self.path.display())))?;

        info!("Saved reference '{}' to {}", embedding.label, self.path.display());
        Ok(())
    }

    /// Remove the stored reference. Absence is not an error.
    pub async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Cleared reference at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EmbeddingError::Store(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn discard(&self) {
        if let Err(e) = fs::remove_file(&self.path).await {
            warn!("Failed to remove corrupted reference: {e}");
        }
    }
}

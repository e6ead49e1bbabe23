//! Current/reference embedding pair and the comparison between them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedding::Embedding;
use crate::error::{EmbeddingError, MissingOperand, Result};
use crate::similarity::cosine_similarity;

/// Which embeddings a session currently holds.
///
/// The two slots are independent, so this is the product of two flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Neither a current nor a stored embedding.
    NoCurrent,
    /// Only a freshly produced embedding.
    CurrentOnly,
    /// Both sides present; comparison is possible.
    CurrentAndStored,
    /// Only the reference embedding.
    StoredOnly,
}

/// Outcome of comparing the current embedding against the reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Label of the current embedding.
    pub current_label: String,

    /// Label of the reference embedding.
    pub stored_label: String,

    /// Cosine similarity.
    pub score: f32,
}

/// Holds the current embedding and the reference embedding.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingSession {
    current: Option<Embedding>,
    stored: Option<Embedding>,
}

impl EmbeddingSession {
    /// Start a session with a previously persisted reference.
    pub fn with_stored(stored: Option<Embedding>) -> Self {
        Self {
            current: None,
            stored,
        }
    }

    pub fn state(&self) -> SessionState {
        match (self.current.is_some(), self.stored.is_some()) {
            (false, false) => SessionState::NoCurrent,
            (true, false) => SessionState::CurrentOnly,
            (true, true) => SessionState::CurrentAndStored,
            (false, true) => SessionState::StoredOnly,
        }
    }

    pub fn current(&self) -> Option<&Embedding> {
        self.current.as_ref()
    }

    pub fn stored(&self) -> Option<&Embedding> {
        self.stored.as_ref()
    }

    /// Replace the current embedding. The reference is untouched.
    pub fn set_current(&mut self, embedding: Embedding) -> &Embedding {
        debug!("Current embedding is now '{}'", embedding.label);
        self.current.insert(embedding)
    }

    /// Drop the current embedding, e.g. when another source is selected.
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    pub fn set_stored(&mut self, stored: Option<Embedding>) {
        self.stored = stored;
    }

    pub fn clear_stored(&mut self) {
        self.stored = None;
    }

    /// Copy the current embedding over the reference and return it for persisting.
    pub fn promote_current(&mut self) -> Result<&Embedding> {
        let current = self
            .current
            .clone()
            .ok_or(EmbeddingError::MissingOperand(MissingOperand::Current))?;
        debug!("Promoting '{}' to reference", current.label);
        Ok(&*self.stored.insert(current))
    }

    /// Compare current against reference. Both must be present.
    pub fn compare(&self) -> Result<Comparison> {
        let (current, stored) = match (&self.current, &self.stored) {
            (Some(current), Some(stored)) => (current, stored),
            (None, Some(_)) => {
                return Err(EmbeddingError::MissingOperand(MissingOperand::Current));
            }
            (Some(_), None) => {
                return Err(EmbeddingError::MissingOperand(MissingOperand::Stored));
            }
            (None, None) => return Err(EmbeddingError::MissingOperand(MissingOperand::Both)),
        };

        let score = cosine_similarity(&current.vector, &stored.vector)?;

        Ok(Comparison {
            current_label: current.label.clone(),
            stored_label: stored.label.clone(),
            score,
        })
    }
}

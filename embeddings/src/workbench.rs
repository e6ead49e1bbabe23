//! The controller that ties provider, store and session together.
//!
//! A `Workbench` is one user session: select a file, embed it, keep one
//! reference across runs, compare the two.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::EmbedConfig;
use crate::embedding::{Embedding, export_embedding};
use crate::error::{EmbeddingError, MissingOperand, Result};
use crate::provider::{EmbeddingProvider, EmbeddingRequest, OpenAIProvider};
use crate::session::{Comparison, EmbeddingSession, SessionState};
use crate::slot::RequestSlot;
use crate::source::SourceText;
use crate::store::ReferenceStore;

/// Result of a completed embedding request.
#[derive(Debug, Clone)]
pub struct EmbedOutcome {
    /// The new current embedding.
    pub embedding: Embedding,

    /// Model reported by the service.
    pub model: String,

    /// Token usage, when reported.
    pub tokens_used: Option<u64>,
}

/// Owns everything one embedding session needs.
pub struct Workbench {
    provider: Option<Arc<dyn EmbeddingProvider>>,
    store: ReferenceStore,
    session: EmbeddingSession,
    slot: RequestSlot,
    source: Option<SourceText>,
}

impl Workbench {
    /// Create a workbench and load any persisted reference.
    ///
    /// A provider that is not available (no credential) leaves the workbench
    /// usable for reference management only; every embedding action then
    /// fails with [`EmbeddingError::ProviderNotConfigured`].
    pub async fn new(provider: Arc<dyn EmbeddingProvider>, store: ReferenceStore) -> Result<Self> {
        let provider = if provider.is_available() {
            Some(provider)
        } else {
            debug!("Embedding provider '{}' is not configured", provider.name());
            None
        };

        let stored = store.load().await?;

        Ok(Self {
            provider,
            store,
            session: EmbeddingSession::with_stored(stored),
            slot: RequestSlot::new(),
            source: None,
        })
    }

    /// Build an OpenAI-backed workbench from a resolved configuration.
    pub async fn from_config(config: &EmbedConfig) -> Result<Self> {
        let provider: Arc<dyn EmbeddingProvider> = Arc::new(OpenAIProvider::from_config(config));
        Self::new(provider, ReferenceStore::new(&config.store_path)).await
    }

    /// The initialization failure, if embedding is disabled for this session.
    pub fn initialization_error(&self) -> Option<EmbeddingError> {
        self.provider
            .is_none()
            .then_some(EmbeddingError::ProviderNotConfigured)
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn current(&self) -> Option<&Embedding> {
        self.session.current()
    }

    pub fn stored(&self) -> Option<&Embedding> {
        self.session.stored()
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    /// Whether an embedding request is pending.
    pub fn is_busy(&self) -> bool {
        self.slot.is_busy()
    }

    /// Handle on the in-flight flag, for front-ends that disable their trigger.
    pub fn request_slot(&self) -> RequestSlot {
        self.slot.clone()
    }

    /// Read `path` as the new source. Any current embedding is dropped.
    pub async fn select_source(&mut self, path: impl AsRef<Path>) -> Result<&SourceText> {
        let source = SourceText::read(path).await?;
        Ok(self.set_source(source))
    }

    /// Use already-loaded text as the new source. Any current embedding is dropped.
    pub fn set_source(&mut self, source: SourceText) -> &SourceText {
        info!("Selected source '{}'", source.label);
        self.session.clear_current();
        self.source.insert(source)
    }

    /// Embed the selected source.
    ///
    /// Returns `Ok(None)` without contacting the service when another request
    /// is still pending.
    pub async fn embed(&mut self) -> Result<Option<EmbedOutcome>> {
        let provider = self
            .provider
            .clone()
            .ok_or(EmbeddingError::ProviderNotConfigured)?;
        let source = self.source.as_ref().ok_or(EmbeddingError::NoSource)?;

        let Some(_permit) = self.slot.try_acquire() else {
            info!("Embedding request already in flight");
            return Ok(None);
        };

        info!("Embedding '{}' with {}", source.label, provider.name());
        let response = provider
            .embed(EmbeddingRequest::new(source.text.clone()))
            .await?;

        let embedding = Embedding::new(source.label.clone(), response.vector);
        self.session.set_current(embedding.clone());

        Ok(Some(EmbedOutcome {
            embedding,
            model: response.model,
            tokens_used: response.tokens_used,
        }))
    }

    /// Make the current embedding the persisted reference.
    pub async fn save_reference(&mut self) -> Result<&Embedding> {
        let current = self
            .session
            .current()
            .ok_or(EmbeddingError::MissingOperand(MissingOperand::Current))?;
        self.store.save(current).await?;
        self.session.promote_current()
    }

    /// Forget the reference, in memory and on disk.
    pub async fn clear_reference(&mut self) -> Result<()> {
        self.store.clear().await?;
        self.session.clear_stored();
        Ok(())
    }

    /// Compare the current embedding against the reference.
    pub fn compare(&self) -> Result<Comparison> {
        self.session.compare()
    }

    /// Write the current embedding to `dir` as `embedding-<label>.json`.
    pub async fn export_current(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let current = self
            .session
            .current()
            .ok_or(EmbeddingError::MissingOperand(MissingOperand::Current))?;
        export_embedding(current, dir).await
    }
}

//! Error types for the embeddings system.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Which operand a comparison or save was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingOperand {
    /// No embedding has been produced for the selected source yet.
    Current,
    /// No reference embedding has been saved.
    Stored,
    /// Neither side is present.
    Both,
}

impl std::fmt::Display for MissingOperand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingOperand::Current => f.write_str("no current embedding"),
            MissingOperand::Stored => f.write_str("no stored reference embedding"),
            MissingOperand::Both => f.write_str("no current or stored embedding"),
        }
    }
}

/// Broad failure classes, used by front-ends to decide how to report an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Credential or configuration missing; embedding stays disabled.
    Initialization,
    /// The embedding service call failed. Retrying the action may succeed.
    Request,
    /// The action was attempted without what it needs.
    Precondition,
    /// The reference store could not be read or written.
    Persistence,
}

/// Errors that can occur in the embeddings system.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Provider not configured.
    #[error("embedding provider not configured: set OPENAI_API_KEY or api_key in the config file")]
    ProviderNotConfigured,

    /// API request failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Invalid response from provider.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A comparison or save was attempted without both operands.
    #[error("cannot proceed: {0}")]
    MissingOperand(MissingOperand),

    /// Embedding was requested before any source file was selected.
    #[error("no source file selected")]
    NoSource,

    /// The source file could not be read as text.
    #[error("failed to read source: {0}")]
    ReadSource(String),

    /// Reference store error.
    #[error("store error: {0}")]
    Store(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl EmbeddingError {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            EmbeddingError::ProviderNotConfigured => FailureKind::Initialization,
            EmbeddingError::ApiRequest(_)
            | EmbeddingError::InvalidResponse(_)
            | EmbeddingError::RateLimited { .. }
            | EmbeddingError::Http(_) => FailureKind::Request,
            EmbeddingError::DimensionMismatch { .. }
            | EmbeddingError::MissingOperand(_)
            | EmbeddingError::NoSource
            | EmbeddingError::ReadSource(_) => FailureKind::Precondition,
            EmbeddingError::Store(_)
            | EmbeddingError::Serialization(_)
            | EmbeddingError::Io(_) => FailureKind::Persistence,
        }
    }
}

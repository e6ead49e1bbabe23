//! Configuration for the embedding workbench.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default embedding model.
pub const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// Configuration for the embedding provider and reference store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// API key for the embedding service.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// API base URL.
    pub base_url: String,

    /// Model to use for embeddings.
    pub model: String,

    /// Requested output dimensions (if supported by the model).
    pub dimensions: Option<usize>,

    /// Where the reference embedding is persisted.
    pub store_path: PathBuf,
}

impl EmbedConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            dimensions: None,
            store_path: Self::default_store_path(),
        }
    }

    /// `<data_dir>/embedcmp/reference.json`, falling back to the working directory.
    pub fn default_store_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_default()
            .join("embedcmp")
            .join("reference.json")
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the requested output dimensions.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Set the reference store path.
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self::new()
    }
}

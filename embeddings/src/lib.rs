//! # Embeddings
//!
//! This crate turns a text file into an embedding vector through a remote
//! embedding API, keeps one reference embedding across runs, and compares
//! embeddings with cosine similarity.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Workbench                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  SourceText ──► EmbeddingProvider ──► EmbeddingSession          │
//! │                      │                   │          │           │
//! │                      ▼                   ▼          ▼           │
//! │                 RequestSlot      ReferenceStore  similarity     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod embedding;
pub mod error;
pub mod provider;
pub mod session;
pub mod similarity;
pub mod slot;
pub mod source;
pub mod store;
pub mod workbench;

pub use config::EmbedConfig;
pub use embedding::{Embedding, export_embedding};
pub use error::{EmbeddingError, FailureKind, MissingOperand, Result};
pub use provider::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, OpenAIProvider};
pub use session::{Comparison, EmbeddingSession, SessionState};
pub use similarity::{cosine_similarity, format_score};
pub use slot::{RequestPermit, RequestSlot};
pub use source::SourceText;
pub use store::ReferenceStore;
pub use workbench::{EmbedOutcome, Workbench};

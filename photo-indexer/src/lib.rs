//! # Photo Indexer
//!
//! Batch feed ingest for the photo search index - reads a JSON feed of raw
//! photo records and indexes them into OpenSearch.
//!
//! ## Architecture
//!
//! 1. **Config**: wires the OpenSearch provider and search service from the environment
//! 2. **Feed**: reads the feed file and indexes records one at a time
//!
//! Records are indexed sequentially through `PhotoSearchService`: a backend
//! connection failure skips the record and keeps going, a malformed record
//! aborts the run.
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`feed`]: Feed file loading and record indexing
//! - [`errors`]: Error types for the ingest

pub mod config;
pub mod errors;
pub mod feed;

pub use config::Dependencies;
pub use errors::IngestError;
pub use feed::{FeedLoader, FeedSummary};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Ingest error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] IngestError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

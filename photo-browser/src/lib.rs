//! # Photo Browser
//!
//! HTTP API server for the photo search index - serves keyword search over
//! photos indexed in OpenSearch.
//!
//! ## Architecture
//!
//! 1. **Config**: wires the OpenSearch provider and search service from the environment
//! 2. **Routes**: axum router exposing the search endpoint and a health probe
//!
//! Search requests run a single match query against the `text` field of the
//! photo index through `PhotoSearchService`.
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`routes`]: HTTP routes and API error mapping

pub mod config;
pub mod routes;

pub use config::Dependencies;
pub use routes::{build_app, ApiError};

use thiserror::Error;

/// Errors that can occur during server initialization or execution.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error while binding or serving the listener.
    #[error("Server error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ServerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

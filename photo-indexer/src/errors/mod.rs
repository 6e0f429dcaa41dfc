//! Error types for the photo feed ingest.

use thiserror::Error;

/// Errors that can occur while ingesting the photo feed.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Error reading the feed file.
    #[error("Feed error: {0}")]
    FeedError(String),

    /// Error parsing the feed contents.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A record failed to index and the run was aborted.
    #[error("Index error: {0}")]
    IndexError(String),
}

impl IngestError {
    /// Create a feed error.
    pub fn feed(msg: impl Into<String>) -> Self {
        Self::FeedError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        Self::FeedError(err.to_string())
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

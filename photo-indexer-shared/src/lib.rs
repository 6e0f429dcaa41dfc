//! # Photo Indexer Shared
//!
//! This crate defines shared data structures and types used across the photo indexer ecosystem.
//! It includes common definitions for photo documents used during indexing and the response
//! types returned from search operations.

pub mod types;

pub use types::photo_document::PhotoDocument;
pub use types::search_result::{SearchHit, SearchResponse};

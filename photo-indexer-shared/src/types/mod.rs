//! This module defines the core data structures and types used across the photo indexer.
//! It re-exports specific types like `PhotoDocument`.

pub mod photo_document;
pub mod search_result;

pub use photo_document::PhotoDocument;
pub use search_result::{SearchHit, SearchResponse};

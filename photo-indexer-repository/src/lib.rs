//! # Photo Indexer Repository
//!
//! This crate provides traits and implementations for interacting with the
//! photo search index. It includes definitions for errors, interfaces, the
//! raw-record mapper, and a concrete implementation for OpenSearch.

pub mod errors;
pub mod interfaces;
pub mod mapper;
pub mod opensearch;
pub mod service;
pub mod utils;

pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use mapper::PhotoMapper;
pub use opensearch::OpenSearchProvider;
pub use service::PhotoSearchService;
pub use utils::format_epoch_seconds;

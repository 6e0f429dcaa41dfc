//! Configuration and dependency initialization for the photo indexer.

mod dependencies;

pub use dependencies::Dependencies;

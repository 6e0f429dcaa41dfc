//! Configuration module for the photo browser server.

mod dependencies;

pub use dependencies::Dependencies;

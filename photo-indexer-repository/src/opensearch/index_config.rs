//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the photo search index.

use serde_json::{json, Value};

/// Configuration for the photo search index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// The name of the search index (used for all operations).
    pub name: String,
}

impl IndexConfig {
    /// Create a new index configuration.
    ///
    /// # Arguments
    ///
    /// * `name` - The index name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(INDEX_NAME)
    }
}

/// The default name of the photo search index.
pub const INDEX_NAME: &str = "photos";

/// Get the index settings and mappings for the photo search index.
///
/// The configuration includes:
/// - **text**: Full-text field, the single field keyword queries run against
/// - **Keyword fields**: `id`, `from_user` and `tags` for exact lookups
/// - **Non-indexed keywords**: image URLs are stored but never searched
/// - **created_time**: Date field matching the `YYYY-MM-DD HH:MM:SS` document format
///
/// # Sharding Configuration
///
/// - 1 primary shard
/// - 1 replica for redundancy
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "id": {
                    "type": "keyword"
                },
                "text": {
                    "type": "text"
                },
                "from_user": {
                    "type": "keyword"
                },
                "thumbnail": {
                    "type": "keyword",
                    "index": false
                },
                "image": {
                    "type": "keyword",
                    "index": false
                },
                "created_time": {
                    "type": "date",
                    "format": "yyyy-MM-dd HH:mm:ss"
                },
                "tags": {
                    "type": "keyword"
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();

        // Check settings exist
        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        // Check mappings exist
        assert!(settings["mappings"]["properties"]["id"].is_object());
        assert!(settings["mappings"]["properties"]["text"].is_object());
        assert!(settings["mappings"]["properties"]["tags"].is_object());

        // The search field is full-text, everything else is exact-match
        assert_eq!(settings["mappings"]["properties"]["text"]["type"], "text");
        assert_eq!(settings["mappings"]["properties"]["id"]["type"], "keyword");
        assert_eq!(
            settings["mappings"]["properties"]["from_user"]["type"],
            "keyword"
        );
        assert_eq!(settings["mappings"]["properties"]["tags"]["type"], "keyword");
    }

    #[test]
    fn test_image_urls_are_not_indexed() {
        let settings = get_index_settings();

        assert_eq!(
            settings["mappings"]["properties"]["thumbnail"]["index"],
            false
        );
        assert_eq!(settings["mappings"]["properties"]["image"]["index"], false);
    }

    #[test]
    fn test_created_time_date_format() {
        let settings = get_index_settings();

        assert_eq!(
            settings["mappings"]["properties"]["created_time"]["type"],
            "date"
        );
        assert_eq!(
            settings["mappings"]["properties"]["created_time"]["format"],
            "yyyy-MM-dd HH:mm:ss"
        );
    }

    #[test]
    fn test_index_name() {
        assert_eq!(INDEX_NAME, "photos");
        assert_eq!(IndexConfig::default().name, "photos");
    }
}

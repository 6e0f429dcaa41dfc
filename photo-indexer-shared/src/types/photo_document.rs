//! Photo document types for the search index.
//!
//! This module defines the document structure that is indexed in the search engine.

use serde::{Deserialize, Serialize};

/// Document representation for the search index.
///
/// This struct represents a photo record as it is stored in the search engine.
/// The document id is the photo's external identifier, so indexing the same id
/// twice replaces the earlier document.
///
/// # Fields
///
/// - `id`: External identifier of the photo; also the index document key
/// - `text`: Caption text (primary search field)
/// - `from_user`: Username of the caption author
/// - `thumbnail`: Thumbnail image URL
/// - `image`: Standard-resolution image URL
/// - `created_time`: Creation timestamp formatted as `YYYY-MM-DD HH:MM:SS`
/// - `tags`: Tags in source order, duplicates preserved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoDocument {
    pub id: String,
    pub text: String,
    pub from_user: String,
    pub thumbnail: String,
    pub image: String,
    pub created_time: String,
    pub tags: Vec<String>,
}

impl PhotoDocument {
    /// Create a new document with an empty tag list.
    ///
    /// Tags are attached afterwards through [`PhotoDocument::add_tag`] so the
    /// source order (and any duplicates) survive as-is.
    ///
    /// # Arguments
    ///
    /// * `id` - External identifier of the photo
    /// * `text` - Caption text
    /// * `from_user` - Username of the caption author
    /// * `thumbnail` - Thumbnail image URL
    /// * `image` - Standard-resolution image URL
    /// * `created_time` - Formatted creation timestamp
    ///
    /// # Example
    ///
    /// ```
    /// use photo_indexer_shared::PhotoDocument;
    ///
    /// let mut doc = PhotoDocument::new(
    ///     "p1".to_string(),
    ///     "sunset".to_string(),
    ///     "alice".to_string(),
    ///     "t.jpg".to_string(),
    ///     "s.jpg".to_string(),
    ///     "2001-09-09 01:46:40".to_string(),
    /// );
    /// doc.add_tag("nature");
    /// ```
    pub fn new(
        id: String,
        text: String,
        from_user: String,
        thumbnail: String,
        image: String,
        created_time: String,
    ) -> Self {
        Self {
            id,
            text,
            from_user,
            thumbnail,
            image,
            created_time,
            tags: Vec::new(),
        }
    }

    /// Append a tag to the document.
    ///
    /// Tags are kept in insertion order and are not deduplicated.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> PhotoDocument {
        PhotoDocument::new(
            "p1".to_string(),
            "sunset".to_string(),
            "alice".to_string(),
            "t.jpg".to_string(),
            "s.jpg".to_string(),
            "2001-09-09 01:46:40".to_string(),
        )
    }

    #[test]
    fn test_photo_document_new() {
        let doc = sample_document();

        assert_eq!(doc.id, "p1");
        assert_eq!(doc.text, "sunset");
        assert_eq!(doc.from_user, "alice");
        assert_eq!(doc.thumbnail, "t.jpg");
        assert_eq!(doc.image, "s.jpg");
        assert_eq!(doc.created_time, "2001-09-09 01:46:40");
        assert!(doc.tags.is_empty());
    }

    #[test]
    fn test_add_tag_preserves_order() {
        let mut doc = sample_document();

        doc.add_tag("nature");
        doc.add_tag("sky");

        assert_eq!(doc.tags, vec!["nature", "sky"]);
    }

    #[test]
    fn test_add_tag_keeps_duplicates() {
        let mut doc = sample_document();

        doc.add_tag("sky");
        doc.add_tag("nature");
        doc.add_tag("sky");

        assert_eq!(doc.tags, vec!["sky", "nature", "sky"]);
    }

    #[test]
    fn test_serialization() {
        let mut doc = sample_document();
        doc.add_tag("nature");
        doc.add_tag("sky");

        let json = serde_json::to_string(&doc).unwrap();
        let deserialized: PhotoDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(doc, deserialized);
    }

    #[test]
    fn test_serialized_field_names() {
        let doc = sample_document();

        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["id"], "p1");
        assert_eq!(value["text"], "sunset");
        assert_eq!(value["from_user"], "alice");
        assert_eq!(value["thumbnail"], "t.jpg");
        assert_eq!(value["image"], "s.jpg");
        assert_eq!(value["created_time"], "2001-09-09 01:46:40");
        assert!(value["tags"].as_array().unwrap().is_empty());
    }
}

//! Raw record to photo document mapping.
//!
//! This module translates loosely-structured photo records, as delivered by the
//! upstream feed, into the normalized `PhotoDocument` stored in the search index.

use chrono::Local;
use serde_json::Value;

use photo_indexer_shared::PhotoDocument;

use crate::errors::SearchIndexError;
use crate::utils::format_epoch_seconds;

/// Maps raw photo records to search index documents.
///
/// The raw record is a nested JSON value with the shape the photo feed delivers:
/// `caption.text`, `caption.from.username`, `images.thumbnail.url`,
/// `images.standard_resolution.url`, `created_time` (epoch seconds as a string
/// or number), `tags` and `id`. Every one of those keys is required; nothing is
/// defaulted.
///
/// Mapping is pure. Persistence happens separately in `PhotoSearchService`, so a
/// record that fails to map never touches the index.
#[derive(Debug, Clone, Default)]
pub struct PhotoMapper;

impl PhotoMapper {
    /// Create a new mapper.
    pub fn new() -> Self {
        Self
    }

    /// Map a raw photo record to a `PhotoDocument`.
    ///
    /// The creation timestamp is rendered in local time as `YYYY-MM-DD HH:MM:SS`.
    /// Tags are carried over one at a time, preserving source order and duplicates.
    ///
    /// # Arguments
    ///
    /// * `record` - The raw photo record JSON
    ///
    /// # Returns
    ///
    /// * `Ok(PhotoDocument)` - The mapped document
    /// * `Err(SearchIndexError::MissingField)` - If a required key is absent or
    ///   has the wrong type; carries the dotted path
    /// * `Err(SearchIndexError::InvalidTimestamp)` - If `created_time` cannot be
    ///   interpreted as epoch seconds
    pub fn map_record(&self, record: &Value) -> Result<PhotoDocument, SearchIndexError> {
        let text = required_string(record, "/caption/text", "caption.text")?;
        let from_user = required_string(record, "/caption/from/username", "caption.from.username")?;
        let thumbnail = required_string(record, "/images/thumbnail/url", "images.thumbnail.url")?;
        let image = required_string(
            record,
            "/images/standard_resolution/url",
            "images.standard_resolution.url",
        )?;
        let created_time = format_created_time(record)?;
        let tags = required_tags(record)?;
        let id = required_string(record, "/id", "id")?;

        let mut document = PhotoDocument::new(id, text, from_user, thumbnail, image, created_time);
        for tag in tags {
            document.add_tag(tag);
        }

        Ok(document)
    }
}

/// Read a required string at `pointer`, reporting `path` on failure.
fn required_string(record: &Value, pointer: &str, path: &str) -> Result<String, SearchIndexError> {
    record
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| SearchIndexError::missing_field(path))
}

/// Read `created_time` and render it as a local `YYYY-MM-DD HH:MM:SS` timestamp.
fn format_created_time(record: &Value) -> Result<String, SearchIndexError> {
    let raw = record
        .pointer("/created_time")
        .ok_or_else(|| SearchIndexError::missing_field("created_time"))?;

    let epoch = parse_epoch_seconds(raw)
        .ok_or_else(|| SearchIndexError::invalid_timestamp(raw.to_string()))?;

    format_epoch_seconds(epoch, &Local)
        .ok_or_else(|| SearchIndexError::invalid_timestamp(raw.to_string()))
}

/// Interpret a JSON value as epoch seconds.
///
/// The feed delivers `created_time` as a string, but a bare number is accepted too.
fn parse_epoch_seconds(value: &Value) -> Option<f64> {
    match value {
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        Value::Number(number) => number.as_f64(),
        _ => None,
    }
}

/// Read the required `tags` array, reporting the position of any non-string item.
fn required_tags(record: &Value) -> Result<Vec<String>, SearchIndexError> {
    let items = record
        .pointer("/tags")
        .and_then(Value::as_array)
        .ok_or_else(|| SearchIndexError::missing_field("tags"))?;

    let mut tags = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let tag = item
            .as_str()
            .ok_or_else(|| SearchIndexError::missing_field(format!("tags[{}]", position)))?;
        tags.push(tag.to_owned());
    }

    Ok(tags)
}

//! Feed module for the photo indexer.
//!
//! Reads a JSON feed of raw photo records and indexes them through the
//! `PhotoSearchService`, one record per call.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::errors::IngestError;
use photo_indexer_repository::{PhotoSearchService, SearchIndexError};

/// Outcome of a feed ingest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSummary {
    /// Number of records in the feed.
    pub total: usize,
    /// Records indexed successfully.
    pub indexed: usize,
    /// Records skipped because the search backend was unreachable.
    pub failed: usize,
}

/// Loader that pushes feed records into the search index.
///
/// Records are indexed sequentially. A record the backend cannot accept because
/// the connection is down is counted and skipped; the run carries on with the
/// next record. A record with a bad shape (missing field, malformed timestamp)
/// aborts the run, since that points at a broken feed rather than a flaky
/// environment.
pub struct FeedLoader {
    service: Arc<PhotoSearchService>,
}

impl FeedLoader {
    /// Create a new feed loader over the given search service.
    pub fn new(service: Arc<PhotoSearchService>) -> Self {
        Self { service }
    }

    /// Read a feed file and index every record in it.
    ///
    /// The file may hold either a bare JSON array of raw records or an
    /// envelope object with the records under a `data` key, the shape photo
    /// feed pages are delivered in.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the feed file
    ///
    /// # Returns
    ///
    /// * `Ok(FeedSummary)` - Counts for the completed run
    /// * `Err(IngestError::FeedError)` - If the file cannot be read
    /// * `Err(IngestError::ParseError)` - If the contents are not a valid feed
    /// * `Err(IngestError::IndexError)` - If a record fails for any reason other
    ///   than backend connectivity
    #[instrument(skip(self))]
    pub async fn load_file(&self, path: &Path) -> Result<FeedSummary, IngestError> {
        let contents = tokio::fs::read_to_string(path).await?;
        let records = parse_feed(&contents)?;

        info!(path = %path.display(), records = records.len(), "Loaded photo feed");

        self.index_records(&records).await
    }

    /// Index a slice of raw photo records.
    ///
    /// Connection failures are logged and counted without stopping the run;
    /// any other error aborts immediately, naming the record position.
    pub async fn index_records(&self, records: &[Value]) -> Result<FeedSummary, IngestError> {
        let mut summary = FeedSummary {
            total: records.len(),
            indexed: 0,
            failed: 0,
        };

        for (position, record) in records.iter().enumerate() {
            match self.service.index_record(record).await {
                Ok(()) => {
                    summary.indexed += 1;
                    debug!(position = position, "Record indexed");
                }
                Err(SearchIndexError::ConnectionError(details)) => {
                    summary.failed += 1;
                    warn!(
                        position = position,
                        error = %details,
                        "Record skipped; search backend unreachable"
                    );
                }
                Err(error) => {
                    return Err(IngestError::index(format!("record {}: {}", position, error)));
                }
            }
        }

        Ok(summary)
    }
}

/// Parse feed contents into individual raw records.
///
/// Accepts a bare JSON array or an `{"data": [...]}` envelope.
fn parse_feed(contents: &str) -> Result<Vec<Value>, IngestError> {
    let parsed: Value = serde_json::from_str(contents)?;

    match parsed {
        Value::Array(records) => Ok(records),
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(IngestError::parse(
                "Feed object does not contain a \"data\" array",
            )),
        },
        _ => Err(IngestError::parse(
            "Feed must be a JSON array of photo records",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use photo_indexer_repository::{PhotoMapper, SearchIndexProvider};
    use photo_indexer_shared::{PhotoDocument, SearchResponse};
    use serde_json::json;
    use std::sync::Mutex;

    /// Provider that records indexed ids and can simulate an unreachable
    /// backend for selected photo ids.
    struct FlakyProvider {
        refuse_ids: Vec<String>,
        indexed: Arc<Mutex<Vec<String>>>,
    }

    impl FlakyProvider {
        fn new(refuse_ids: Vec<String>) -> Self {
            Self {
                refuse_ids,
                indexed: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl SearchIndexProvider for FlakyProvider {
        async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn index_document(&self, document: &PhotoDocument) -> Result<(), SearchIndexError> {
            if self.refuse_ids.contains(&document.id) {
                return Err(SearchIndexError::connection("connection refused"));
            }
            self.indexed.lock().unwrap().push(document.id.clone());
            Ok(())
        }

        async fn search_text(&self, _keyword: &str) -> Result<SearchResponse, SearchIndexError> {
            Ok(SearchResponse::empty())
        }
    }

    fn record(id: &str) -> Value {
        json!({
            "id": id,
            "caption": {
                "text": "sunset",
                "from": { "username": "alice" }
            },
            "images": {
                "thumbnail": { "url": "t.jpg" },
                "standard_resolution": { "url": "s.jpg" }
            },
            "created_time": "1000000000",
            "tags": ["nature", "sky"]
        })
    }

    fn loader_with(provider: FlakyProvider) -> (FeedLoader, Arc<Mutex<Vec<String>>>) {
        let indexed = provider.indexed.clone();
        let service = PhotoSearchService::new(PhotoMapper::new(), Box::new(provider));
        (FeedLoader::new(Arc::new(service)), indexed)
    }

    #[test]
    fn test_parse_feed_bare_array() {
        let records = parse_feed(r#"[{"id": "p1"}, {"id": "p2"}]"#).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], "p1");
    }

    #[test]
    fn test_parse_feed_data_envelope() {
        let records = parse_feed(r#"{"data": [{"id": "p1"}], "meta": {"code": 200}}"#).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], "p1");
    }

    #[test]
    fn test_parse_feed_envelope_without_data() {
        let result = parse_feed(r#"{"meta": {"code": 200}}"#);

        assert!(matches!(result.unwrap_err(), IngestError::ParseError(_)));
    }

    #[test]
    fn test_parse_feed_rejects_scalar() {
        let result = parse_feed("42");

        assert!(matches!(result.unwrap_err(), IngestError::ParseError(_)));
    }

    #[test]
    fn test_parse_feed_rejects_invalid_json() {
        let result = parse_feed("not json");

        assert!(matches!(result.unwrap_err(), IngestError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_index_records_counts_successes() {
        let (loader, indexed) = loader_with(FlakyProvider::new(vec![]));

        let summary = loader
            .index_records(&[record("p1"), record("p2")])
            .await
            .unwrap();

        assert_eq!(
            summary,
            FeedSummary {
                total: 2,
                indexed: 2,
                failed: 0
            }
        );
        assert_eq!(*indexed.lock().unwrap(), vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_index_records_continues_past_connection_failures() {
        let (loader, indexed) = loader_with(FlakyProvider::new(vec!["p2".to_string()]));

        let summary = loader
            .index_records(&[record("p1"), record("p2"), record("p3")])
            .await
            .unwrap();

        assert_eq!(
            summary,
            FeedSummary {
                total: 3,
                indexed: 2,
                failed: 1
            }
        );
        assert_eq!(*indexed.lock().unwrap(), vec!["p1", "p3"]);
    }

    #[tokio::test]
    async fn test_index_records_aborts_on_bad_record() {
        let (loader, indexed) = loader_with(FlakyProvider::new(vec![]));

        let mut broken = record("p2");
        broken["caption"].as_object_mut().unwrap().remove("text");

        let result = loader
            .index_records(&[record("p1"), broken, record("p3")])
            .await;

        match result {
            Err(IngestError::IndexError(msg)) => {
                assert!(msg.contains("record 1"));
                assert!(msg.contains("caption.text"));
            }
            other => panic!("expected IndexError but got {:?}", other),
        }
        // The first record was already indexed before the abort.
        assert_eq!(*indexed.lock().unwrap(), vec!["p1"]);
    }

    #[tokio::test]
    async fn test_index_records_empty_feed() {
        let (loader, _indexed) = loader_with(FlakyProvider::new(vec![]));

        let summary = loader.index_records(&[]).await.unwrap();

        assert_eq!(
            summary,
            FeedSummary {
                total: 0,
                indexed: 0,
                failed: 0
            }
        );
    }
}

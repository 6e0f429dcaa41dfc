//! HTTP routes for the photo search API.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use photo_indexer_repository::{PhotoSearchService, SearchIndexError};
use photo_indexer_shared::SearchResponse;

/// Build the application router.
///
/// Routes:
///
/// - `GET /health`: liveness probe
/// - `GET /api/photos/search/:keyword`: keyword search over the photo index
pub fn build_app(service: Arc<PhotoSearchService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/photos/search/:keyword", get(search_handler))
        .with_state(service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Error body returned to API clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// A search backend failure surfaced through the API.
///
/// Connection failures map to `503 Service Unavailable`; any other backend
/// fault maps to `502 Bad Gateway`. The body is a JSON object with an
/// `error` message.
#[derive(Debug)]
pub struct ApiError(SearchIndexError);

impl From<SearchIndexError> for ApiError {
    fn from(error: SearchIndexError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SearchIndexError::ConnectionError(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_GATEWAY,
        };

        error!(status = %status, error = %self.0, "Search request failed");

        let body = ErrorBody {
            error: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Handle `GET /api/photos/search/:keyword`.
///
/// The keyword is matched against the `text` field of indexed photos and the
/// ranked hits are returned as JSON.
async fn search_handler(
    State(service): State<Arc<PhotoSearchService>>,
    Path(keyword): Path<String>,
) -> Result<Json<SearchResponse>, ApiError> {
    let response = service.search(&keyword).await?;

    debug!(
        keyword = %keyword,
        total = response.total,
        "Search request served"
    );

    Ok(Json(response))
}

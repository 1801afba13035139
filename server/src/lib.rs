use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tfidf_core::{search, CorpusState, EngineError, Metric, SearchHit};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct IndexRequest {
    pub documents: Vec<String>,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub metric: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct UploadEntry {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

type ApiError = (StatusCode, Json<Value>);

/// The current corpus snapshot, shared across handlers. Index builds replace
/// the whole snapshot in one write; queries read whatever snapshot is
/// current and never observe a half-built corpus.
#[derive(Clone, Default)]
pub struct AppState {
    corpus: Arc<RwLock<Option<CorpusState>>>,
}

pub fn build_app() -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/", get(|| async { Json(json!({ "message": "Backend is up and running!" })) }))
        .route("/upload", post(upload_handler))
        .route("/index", post(index_handler))
        .route("/view-index", get(view_index_handler))
        .route("/search", post(search_handler))
        .with_state(AppState::default())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn bad_request(err: EngineError) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "detail": err.to_string() })))
}

/// Accept uploaded files, keeping only `.txt` names with valid UTF-8 bodies.
/// Each file gets its own ok/error entry; decoding failures never reach the
/// indexing core.
pub async fn upload_handler(mut multipart: Multipart) -> Result<Json<Vec<UploadEntry>>, ApiError> {
    let mut entries = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (StatusCode::BAD_REQUEST, Json(json!({ "detail": e.to_string() })))
    })? {
        let filename = field.file_name().unwrap_or_default().to_string();
        if !filename.ends_with(".txt") {
            entries.push(UploadEntry {
                filename,
                content: None,
                error: Some("Only .txt files allowed".to_string()),
            });
            continue;
        }
        let bytes = field.bytes().await.map_err(|e| {
            (StatusCode::BAD_REQUEST, Json(json!({ "detail": e.to_string() })))
        })?;
        match String::from_utf8(bytes.to_vec()) {
            Ok(content) => entries.push(UploadEntry {
                filename,
                content: Some(content),
                error: None,
            }),
            Err(_) => entries.push(UploadEntry {
                filename,
                content: None,
                error: Some("File is not valid UTF-8 text".to_string()),
            }),
        }
    }
    Ok(Json(entries))
}

/// Index a document set. The snapshot is built outside the lock and swapped
/// in with a single write, so concurrent searches see either the old corpus
/// or the new one, never a mix.
pub async fn index_handler(
    State(state): State<AppState>,
    Json(req): Json<IndexRequest>,
) -> Json<Value> {
    let corpus = CorpusState::build(req.documents);
    let body = json!({ "index": &corpus.index, "tfidf": &corpus.tfidf });
    *state.corpus.write() = Some(corpus);
    Json(body)
}

pub async fn view_index_handler(
    State(state): State<AppState>,
) -> Result<Json<CorpusState>, ApiError> {
    let guard = state.corpus.read();
    match guard.as_ref() {
        Some(corpus) if !corpus.is_empty() => Ok(Json(corpus.clone())),
        _ => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": EngineError::NotReady.to_string() })),
        )),
    }
}

pub async fn search_handler(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let metric: Metric = req.metric.parse().map_err(bad_request)?;
    let guard = state.corpus.read();
    let corpus = guard.as_ref().ok_or_else(|| bad_request(EngineError::NotReady))?;
    let results = search(&req.query, metric, corpus).map_err(bad_request)?;
    tracing::debug!(query = %req.query, metric = %req.metric, hits = results.len(), "search served");
    Ok(Json(SearchResponse { results }))
}

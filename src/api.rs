use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::SyncError;
use crate::sync::models::{CommittedDoc, CopiedDoc, DocDescriptor};
use crate::sync::orchestrator::{ArchiveSyncer, CopyRotator};
use crate::sync::store::CopyStore;

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub archive_sync: ArchiveSyncer,
    pub copy_sync: CopyRotator,
    pub store: Arc<dyn CopyStore>,
}

pub type SharedState = Arc<AppState>;

// ── Request/response payload types ────────────────────────────────────

#[derive(Deserialize)]
pub struct ArchiveSyncRequest {
    /// Batch of document descriptors to archive. Required.
    pub docs: Option<Vec<DocDescriptor>>,
    /// When true, no external side effects occur.
    #[serde(default)]
    pub test: bool,
}

#[derive(Deserialize)]
pub struct CopySyncRequest {
    pub docs: Option<Vec<DocDescriptor>>,
    /// Identifiers known to have changed upstream. Required.
    pub changed_ids: Option<Vec<String>>,
    #[serde(default)]
    pub test: bool,
}

#[derive(Serialize)]
pub struct ArchiveSyncResponse {
    pub message: String,
    pub committed_docs: Vec<CommittedDoc>,
    pub synced_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct CopySyncResponse {
    pub message: String,
    pub copied_docs: Vec<CopiedDoc>,
    pub synced_at: DateTime<Utc>,
}

// ── Error handling ────────────────────────────────────────────────────

pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/sync/archive", post(sync_archive))
        .route("/sync/copies", post(sync_copies))
        .route("/docs", get(list_docs))
        .route("/health", get(health_check))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

async fn sync_archive(
    State(state): State<SharedState>,
    Json(req): Json<ArchiveSyncRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let docs = req
        .docs
        .ok_or_else(|| ApiError::BadRequest("Missing docs in request body".to_string()))?;

    let committed_docs = if req.test {
        Vec::new()
    } else {
        state.archive_sync.sync_batch(&docs).await?
    };

    info!(
        batch = docs.len(),
        committed = committed_docs.len(),
        test = req.test,
        "Archive sync finished"
    );
    Ok(Json(ArchiveSyncResponse {
        message: "Non-existing docs committed successfully".to_string(),
        committed_docs,
        synced_at: Utc::now(),
    }))
}

async fn sync_copies(
    State(state): State<SharedState>,
    Json(req): Json<CopySyncRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (docs, changed_ids) = match (req.docs, req.changed_ids) {
        (Some(docs), Some(changed_ids)) => (docs, changed_ids),
        _ => {
            return Err(ApiError::BadRequest(
                "Missing docs or changed_ids in request body".to_string(),
            ));
        }
    };

    let copied_docs = if req.test {
        Vec::new()
    } else {
        state.copy_sync.rotate_batch(&docs, &changed_ids).await?
    };

    info!(
        batch = docs.len(),
        changed = changed_ids.len(),
        copied = copied_docs.len(),
        test = req.test,
        "Copy sync finished"
    );
    Ok(Json(CopySyncResponse {
        message: "Changed documents processed successfully".to_string(),
        copied_docs,
        synced_at: Utc::now(),
    }))
}

async fn list_docs(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let rows = state.store.list_documents().await?;
    Ok(Json(rows))
}

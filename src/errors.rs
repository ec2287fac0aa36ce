//! Typed error hierarchy for the synchronization core.
//!
//! A single enum covers everything that aborts a batch at the failing
//! document. Expected-absence outcomes (archive directory not found, copy
//! target denied or missing) are modeled as values by the clients and never
//! appear here.

use thiserror::Error;

/// Errors from the document synchronization subsystem.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Archive listing failed at {path}: {source}")]
    ArchiveList {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Archive commit failed for {google_id}: {source}")]
    ArchiveCommit {
        google_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Rendering document {google_id} failed: {source}")]
    Render {
        google_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Copying document {google_id} failed: {source}")]
    CopyDocument {
        google_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Persisting copy history for {google_id} failed: {source}")]
    StoreUpdate {
        google_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Store query failed: {0}")]
    StoreQuery(#[source] anyhow::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

//! Per-batch control flow for the two synchronization operations.
//!
//! Both orchestrators process their batch strictly sequentially, one
//! document at a time, and abort at the first fatal error; side effects of
//! documents already processed stand (no compensating rollback).

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use super::archive::Archive;
use super::drive::{DocRenderer, DocumentCopier};
use super::gate;
use super::models::{CommittedDoc, CopiedDoc, DocDescriptor};
use super::rotation;
use super::store::CopyStore;
use crate::errors::SyncError;

/// Drives existence check → render → gate → commit per batch document.
pub struct ArchiveSyncer {
    archive: Arc<dyn Archive>,
    renderer: Arc<dyn DocRenderer>,
}

impl ArchiveSyncer {
    pub fn new(archive: Arc<dyn Archive>, renderer: Arc<dyn DocRenderer>) -> Self {
        Self { archive, renderer }
    }

    /// Archive every batch document that has no committed artifact and whose
    /// rendered content carries reviewer comments.
    ///
    /// Returns the documents actually committed, in batch order. Existing
    /// artifacts and comment-free documents are skips, not errors.
    pub async fn sync_batch(
        &self,
        docs: &[DocDescriptor],
    ) -> Result<Vec<CommittedDoc>, SyncError> {
        let mut committed = Vec::new();
        for doc in docs {
            if self
                .archive
                .exists(&doc.entity, &doc.workgroup, &doc.google_id)
                .await?
            {
                debug!(google_id = %doc.google_id, "Artifact already archived, skipping");
                continue;
            }

            let rendered = self.renderer.render(doc).await?;
            if !gate::is_archivable(&rendered) {
                info!(google_id = %doc.google_id, "No comments found, skipping commit");
                continue;
            }

            let path = self
                .archive
                .commit(&doc.entity, &doc.workgroup, &doc.google_id, &rendered)
                .await?;
            committed.push(CommittedDoc {
                google_id: doc.google_id.clone(),
                path,
            });
        }
        Ok(committed)
    }
}

/// Drives copy creation → history rotation → persistence for changed docs.
pub struct CopyRotator {
    copier: Arc<dyn DocumentCopier>,
    store: Arc<dyn CopyStore>,
}

impl CopyRotator {
    pub fn new(copier: Arc<dyn DocumentCopier>, store: Arc<dyn CopyStore>) -> Self {
        Self { copier, store }
    }

    /// Create a working copy for every batch document flagged as changed,
    /// rotating and persisting its bounded copy history.
    ///
    /// Changed ids without a matching descriptor are ignored. A document
    /// whose copy is denied or whose source is gone contributes no entry to
    /// the result list; the batch continues.
    pub async fn rotate_batch(
        &self,
        docs: &[DocDescriptor],
        changed_ids: &[String],
    ) -> Result<Vec<CopiedDoc>, SyncError> {
        let changed: HashSet<&str> = changed_ids.iter().map(String::as_str).collect();
        let mut copied = Vec::new();
        for doc in docs
            .iter()
            .filter(|doc| changed.contains(doc.google_id.as_str()))
        {
            let Some(new_copy_id) = self.copier.copy_document(&doc.google_id).await? else {
                // Denied or gone upstream; the copier already logged it.
                continue;
            };

            let all_copy_ids = rotation::rotate(&doc.all_copy_ids, &new_copy_id);
            self.store
                .record_copy(&doc.google_id, &new_copy_id, &all_copy_ids)
                .await?;
            copied.push(CopiedDoc {
                google_id: doc.google_id.clone(),
                new_copy_id,
                all_copy_ids,
            });
        }
        Ok(copied)
    }
}

//! Relational store client for the working-copy registry.

use anyhow::Context;
use async_trait::async_trait;
use tracing::info;

use super::models::DocRow;
use crate::errors::SyncError;

/// Owner of `latest_copy_g_id` and `all_copy_ids` for every document.
///
/// Orchestrators hold only a transient snapshot of this state for the
/// duration of one batch.
#[async_trait]
pub trait CopyStore: Send + Sync {
    /// Persist the latest copy pointer and the rotated history for a document.
    async fn record_copy(
        &self,
        google_id: &str,
        latest_copy_id: &str,
        all_copy_ids: &[String],
    ) -> Result<(), SyncError>;

    /// All tracked documents with their sharing status.
    async fn list_documents(&self) -> Result<Vec<DocRow>, SyncError>;
}

/// Live store client against a PostgREST endpoint (Supabase).
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            service_key: service_key.into(),
        }
    }

    fn documents_url(&self) -> String {
        format!("{}/rest/v1/documents", self.base_url)
    }
}

#[async_trait]
impl CopyStore for SupabaseStore {
    async fn record_copy(
        &self,
        google_id: &str,
        latest_copy_id: &str,
        all_copy_ids: &[String],
    ) -> Result<(), SyncError> {
        let result: anyhow::Result<()> = async {
            self.client
                .patch(self.documents_url())
                .header("apikey", &self.service_key)
                .bearer_auth(&self.service_key)
                .header("Prefer", "return=minimal")
                .query(&[("google_id", format!("eq.{google_id}"))])
                .json(&serde_json::json!({
                    "latest_copy_g_id": latest_copy_id,
                    "all_copy_ids": all_copy_ids,
                }))
                .send()
                .await
                .context("Failed to send copy history update")?
                .error_for_status()
                .context("Copy history update returned error status")?;
            Ok(())
        }
        .await;

        result.map_err(|source| SyncError::StoreUpdate {
            google_id: google_id.to_string(),
            source,
        })?;

        info!(google_id, latest_copy_id, "Persisted rotated copy history");
        Ok(())
    }

    async fn list_documents(&self) -> Result<Vec<DocRow>, SyncError> {
        let result: anyhow::Result<Vec<DocRow>> = async {
            let rows = self
                .client
                .get(self.documents_url())
                .header("apikey", &self.service_key)
                .bearer_auth(&self.service_key)
                .query(&[("select", "google_id,sharing_status")])
                .send()
                .await
                .context("Failed to send document listing request")?
                .error_for_status()
                .context("Document listing returned error status")?
                .json::<Vec<DocRow>>()
                .await
                .context("Failed to parse document listing response")?;
            Ok(rows)
        }
        .await;

        result.map_err(SyncError::StoreQuery)
    }
}

//! Google Drive clients: working-copy creation and content rendering.

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use super::gate::COMMENTS_MARKER;
use super::models::DocDescriptor;
use crate::errors::SyncError;

const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Creates working copies in the external document-editing service.
#[async_trait]
pub trait DocumentCopier: Send + Sync {
    /// Copy a document, returning the new identifier.
    ///
    /// `Ok(None)` means the source denied access or the document is gone:
    /// a skip for this document, not a batch failure.
    async fn copy_document(&self, google_id: &str) -> Result<Option<String>, SyncError>;
}

/// Produces the text-with-comments rendering of a document.
#[async_trait]
pub trait DocRenderer: Send + Sync {
    async fn render(&self, doc: &DocDescriptor) -> Result<String, SyncError>;
}

#[derive(Debug, Deserialize)]
struct CopyResponse {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct CommentList {
    #[serde(default)]
    comments: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
struct Comment {
    #[serde(default)]
    content: String,
    author: Option<CommentAuthor>,
    #[serde(rename = "quotedFileContent")]
    quoted_file_content: Option<QuotedFileContent>,
}

#[derive(Debug, Deserialize)]
struct CommentAuthor {
    #[serde(rename = "displayName", default)]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct QuotedFileContent {
    #[serde(default)]
    value: String,
}

/// Live client against the Drive v3 API.
///
/// Serves both as the copier and as the renderer; constructed once per
/// process with a ready-to-use bearer token.
pub struct GoogleDrive {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl GoogleDrive {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(DRIVE_API_BASE, token)
    }

    /// Same client against a different API origin. Used by tests.
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    async fn export_text(&self, google_id: &str) -> anyhow::Result<String> {
        let url = format!("{}/files/{}/export", self.base_url, google_id);
        self.client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("mimeType", "text/plain")])
            .send()
            .await
            .context("Failed to send document export request")?
            .error_for_status()
            .context("Document export returned error status")?
            .text()
            .await
            .context("Failed to read exported document body")
    }

    async fn list_comments(&self, google_id: &str) -> anyhow::Result<Vec<Comment>> {
        let url = format!("{}/files/{}/comments", self.base_url, google_id);
        let list = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[
                (
                    "fields",
                    "comments(content,author/displayName,quotedFileContent/value)",
                ),
                ("pageSize", "100"),
            ])
            .send()
            .await
            .context("Failed to send comment listing request")?
            .error_for_status()
            .context("Comment listing returned error status")?
            .json::<CommentList>()
            .await
            .context("Failed to parse comment listing response")?;
        Ok(list.comments)
    }
}

/// Append the comments section to exported text.
///
/// The marker appears iff at least one comment exists, which is exactly what
/// the content gate tests for downstream.
fn render_with_comments(text: &str, comments: &[Comment]) -> String {
    let mut out = text.trim_end().to_string();
    if comments.is_empty() {
        return out;
    }
    out.push_str("\n\n");
    out.push_str(COMMENTS_MARKER);
    for comment in comments {
        let author = comment
            .author
            .as_ref()
            .map(|a| a.display_name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("unknown");
        match comment
            .quoted_file_content
            .as_ref()
            .filter(|q| !q.value.is_empty())
        {
            Some(quoted) => out.push_str(&format!(
                "\n- {} on \"{}\": {}",
                author, quoted.value, comment.content
            )),
            None => out.push_str(&format!("\n- {}: {}", author, comment.content)),
        }
    }
    out
}

#[async_trait]
impl DocumentCopier for GoogleDrive {
    async fn copy_document(&self, google_id: &str) -> Result<Option<String>, SyncError> {
        let url = format!("{}/files/{}/copy", self.base_url, google_id);
        let result: anyhow::Result<Option<String>> = async {
            let resp = self
                .client
                .post(&url)
                .bearer_auth(&self.token)
                .json(&serde_json::json!({ "name": format!("Copy of {google_id}") }))
                .send()
                .await
                .context("Failed to send document copy request")?;

            match resp.status() {
                reqwest::StatusCode::FORBIDDEN => {
                    warn!(google_id, "Access denied for document, skipping copy");
                    Ok(None)
                }
                reqwest::StatusCode::NOT_FOUND => {
                    warn!(google_id, "Document not found, skipping copy");
                    Ok(None)
                }
                _ => {
                    let copy = resp
                        .error_for_status()
                        .context("Document copy returned error status")?
                        .json::<CopyResponse>()
                        .await
                        .context("Failed to parse document copy response")?;
                    info!(google_id, new_copy_id = %copy.id, "Copied document");
                    Ok(Some(copy.id))
                }
            }
        }
        .await;

        result.map_err(|source| SyncError::CopyDocument {
            google_id: google_id.to_string(),
            source,
        })
    }
}

#[async_trait]
impl DocRenderer for GoogleDrive {
    async fn render(&self, doc: &DocDescriptor) -> Result<String, SyncError> {
        let result: anyhow::Result<String> = async {
            let text = self.export_text(&doc.google_id).await?;
            let comments = self.list_comments(&doc.google_id).await?;
            Ok(render_with_comments(&text, &comments))
        }
        .await;

        result.map_err(|source| SyncError::Render {
            google_id: doc.google_id.clone(),
            source,
        })
    }
}

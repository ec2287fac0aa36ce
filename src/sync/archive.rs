//! GitHub-backed archive: existence checks and artifact commits.

use anyhow::Context;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use tracing::info;

use crate::errors::SyncError;

const GITHUB_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "docsync";

/// File name of the archived artifact inside a document's directory.
pub const ARTIFACT_FILE_NAME: &str = "doc-with-comments.md";

/// Directory holding all archived artifacts for one document.
pub fn doc_dir_path(entity: &str, workgroup: &str, google_id: &str) -> String {
    format!("Data/{entity}/Content/{workgroup}/Docs/GoogleDocs/{google_id}")
}

/// Repo-relative path of the archived artifact for one document.
pub fn artifact_path(entity: &str, workgroup: &str, google_id: &str) -> String {
    format!(
        "{}/{}",
        doc_dir_path(entity, workgroup, google_id),
        ARTIFACT_FILE_NAME
    )
}

/// Strip a trailing `.md` from a listed entry name.
///
/// Only `.md` is stripped; other extensions are left in place, so a
/// `{google_id}.txt` entry does not count as an existing artifact. This loose
/// match is preserved from the upstream contract.
fn strip_md_extension(name: &str) -> &str {
    name.strip_suffix(".md").unwrap_or(name)
}

/// One entry from the archive's directory listing (subset of fields).
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
}

/// The version-controlled artifact store.
///
/// `commit` must only be called after `exists` returned `false` and the
/// content gate passed for the same document in the same batch pass; the
/// committer performs no existence re-check of its own.
#[async_trait]
pub trait Archive: Send + Sync {
    /// Whether a previously committed artifact exists for this document.
    async fn exists(
        &self,
        entity: &str,
        workgroup: &str,
        google_id: &str,
    ) -> Result<bool, SyncError>;

    /// Commit the artifact; returns the repo-relative path written.
    async fn commit(
        &self,
        entity: &str,
        workgroup: &str,
        google_id: &str,
        content: &str,
    ) -> Result<String, SyncError>;
}

/// Live archive client against the GitHub contents API.
pub struct GithubArchive {
    client: reqwest::Client,
    base_url: String,
    token: String,
    owner: String,
    repo: String,
}

impl GithubArchive {
    pub fn new(token: impl Into<String>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self::with_base_url(GITHUB_API_BASE, token, owner, repo)
    }

    /// Same client against a different API origin. Used by tests.
    pub fn with_base_url(
        base_url: impl Into<String>,
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url, self.owner, self.repo, path
        )
    }

    /// List a document directory. `Ok(None)` means the directory does not
    /// exist yet, a recognized non-error outcome.
    async fn list_doc_dir(&self, path: &str) -> anyhow::Result<Option<Vec<ContentEntry>>> {
        let resp = self
            .client
            .get(self.contents_url(path))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .context("Failed to send archive listing request")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let entries = resp
            .error_for_status()
            .context("Archive listing returned error status")?
            .json::<Vec<ContentEntry>>()
            .await
            .context("Failed to parse archive listing response")?;
        Ok(Some(entries))
    }
}

#[async_trait]
impl Archive for GithubArchive {
    async fn exists(
        &self,
        entity: &str,
        workgroup: &str,
        google_id: &str,
    ) -> Result<bool, SyncError> {
        let path = doc_dir_path(entity, workgroup, google_id);
        let entries = self
            .list_doc_dir(&path)
            .await
            .map_err(|source| SyncError::ArchiveList {
                path: path.clone(),
                source,
            })?;
        Ok(entries
            .map(|entries| {
                entries
                    .iter()
                    .any(|entry| strip_md_extension(&entry.name) == google_id)
            })
            .unwrap_or(false))
    }

    async fn commit(
        &self,
        entity: &str,
        workgroup: &str,
        google_id: &str,
        content: &str,
    ) -> Result<String, SyncError> {
        let path = artifact_path(entity, workgroup, google_id);
        let body = serde_json::json!({
            "message": format!("Add document text and comments for {google_id}"),
            "content": BASE64.encode(content),
        });

        let result: anyhow::Result<()> = async {
            self.client
                .put(self.contents_url(&path))
                .header("Authorization", format!("Bearer {}", self.token))
                .header("User-Agent", USER_AGENT)
                .header("Accept", "application/vnd.github+json")
                .json(&body)
                .send()
                .await
                .context("Failed to send archive commit request")?
                .error_for_status()
                .context("Archive commit returned error status")?;
            Ok(())
        }
        .await;

        result.map_err(|source| SyncError::ArchiveCommit {
            google_id: google_id.to_string(),
            source,
        })?;

        info!(google_id, %path, "Committed archive artifact");
        Ok(path)
    }
}

use anyhow::{Context, Result};

/// Runtime configuration for the sync service.
///
/// All credentials are read from the environment (a `.env` file is loaded at
/// startup). OAuth token acquisition and refresh are deliberately left to the
/// deployment environment; the service consumes ready-to-use bearer tokens.
#[derive(Debug, Clone)]
pub struct Config {
    /// Token with write access to the archive repository.
    pub github_token: String,
    pub archive_repo_owner: String,
    pub archive_repo_name: String,
    /// Bearer token for the Google Drive API.
    pub google_access_token: String,
    pub supabase_url: String,
    pub supabase_service_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            github_token: require("GITHUB_TOKEN")?,
            archive_repo_owner: require("ARCHIVE_REPO_OWNER")?,
            archive_repo_name: require("ARCHIVE_REPO_NAME")?,
            google_access_token: require("GOOGLE_ACCESS_TOKEN")?,
            supabase_url: require("SUPABASE_URL")?,
            supabase_service_key: require("SUPABASE_SERVICE_KEY")?,
        })
    }
}

fn require(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Missing required environment variable {}", key))
}

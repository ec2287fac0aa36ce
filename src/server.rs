use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::api::{self, AppState};
use crate::config::Config;
use crate::sync::archive::GithubArchive;
use crate::sync::drive::GoogleDrive;
use crate::sync::orchestrator::{ArchiveSyncer, CopyRotator};
use crate::sync::store::SupabaseStore;

/// Configuration for the sync server process.
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            dev_mode: false,
        }
    }
}

/// Wire live clients from configuration into shared application state.
pub fn build_state(config: &Config) -> Arc<AppState> {
    let archive = Arc::new(GithubArchive::new(
        &config.github_token,
        &config.archive_repo_owner,
        &config.archive_repo_name,
    ));
    // One Drive client serves as both copier and renderer.
    let drive = Arc::new(GoogleDrive::new(&config.google_access_token));
    let store = Arc::new(SupabaseStore::new(
        &config.supabase_url,
        &config.supabase_service_key,
    ));

    Arc::new(AppState {
        archive_sync: ArchiveSyncer::new(archive, drive.clone()),
        copy_sync: CopyRotator::new(drive, store.clone()),
        store,
    })
}

/// Build the application router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    api::api_router().with_state(state)
}

/// Start the sync server.
pub async fn start_server(server: ServerConfig, config: Config) -> Result<()> {
    let mut app = build_router(build_state(&config));

    if server.dev_mode {
        app = app.layer(CorsLayer::permissive());
    }

    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    info!(%local_addr, "docsync listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Shutting down");
}

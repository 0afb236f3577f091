//! Composition root: builds the service clients, stores, and the
//! workspace coordinator the command handlers share.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlforge_application::{
    CredentialService, QueryOrchestrator, SchemaRegistry, WorkspaceCoordinator,
};
use sqlforge_core::auth::AuthApi;
use sqlforge_core::history::HistoryApi;
use sqlforge_core::session::SessionStore;
use sqlforge_infrastructure::{ConfigService, TomlSessionStore};
use sqlforge_interaction::{ApiClient, HttpAuthApi, HttpHistoryApi, HttpQueryApi, HttpSchemaApi};

/// Application state shared across shell commands.
pub struct AppContext {
    pub coordinator: Arc<WorkspaceCoordinator>,
    pub credentials: CredentialService,
    pub auth_api: Arc<dyn AuthApi>,
    pub registry: SchemaRegistry,
    pub orchestrator: QueryOrchestrator,
    pub history_api: Arc<dyn HistoryApi>,
}

/// Builds the full application context.
///
/// Restores a persisted session, if any, so the shell starts logged in
/// after a restart.
pub async fn bootstrap(api_url_override: Option<String>) -> Result<AppContext> {
    let config = ConfigService::new_default()
        .and_then(|service| service.load())
        .context("Failed to load client configuration")?;
    let api_base_url = api_url_override.unwrap_or(config.api_base_url);
    tracing::info!("Using SQL-generation service at {}", api_base_url);

    let api = ApiClient::new(api_base_url);
    let auth_api: Arc<dyn AuthApi> = Arc::new(HttpAuthApi::new(api.clone()));
    let schema_api = Arc::new(HttpSchemaApi::new(api.clone()));
    let query_api = Arc::new(HttpQueryApi::new(api.clone()));
    let history_api: Arc<dyn HistoryApi> = Arc::new(HttpHistoryApi::new(api));

    let session_store: Arc<dyn SessionStore> = Arc::new(
        TomlSessionStore::new_default().context("Failed to resolve the session store path")?,
    );
    let coordinator = Arc::new(WorkspaceCoordinator::restore(session_store).await);

    Ok(AppContext {
        coordinator,
        credentials: CredentialService::new(auth_api.clone()),
        auth_api,
        registry: SchemaRegistry::new(schema_api),
        orchestrator: QueryOrchestrator::new(query_api),
        history_api,
    })
}

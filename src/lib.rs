//! # Lifeware Collective server
//!
//! Backend for a Thalassemia patient-support nonprofit: a blood donor
//! directory stored in Supabase, and "Lifela AI", a health assistant that
//! proxies an OpenAI-compatible chat-completions API. The same binary
//! serves the Leptos web UI from `ui/dist`.
//!
//! Both backing services are optional. Without Supabase credentials the
//! directory serves a fixed set of demo donors; without an API key the
//! assistant answers with a "try again later" message.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use lifeware::{build_app, AppState, LifewareConfigManager};
//! use std::sync::Arc;
//!
//! let config_manager = Arc::new(LifewareConfigManager::new("lifeware.toml")?);
//! let state = AppState::from_config(config_manager)?;
//! let app = build_app(state);
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST handlers, routes and the OpenAPI document
//! - [`gateway`] - donor and assistant operations with their fallbacks
//! - [`db`] - the donor store trait and its Supabase client
//! - [`llm`] - chat-completion clients
//! - [`cli`] - command-line interface
//! - [`types`] - request/response types and errors
//! - [`utils`] - `lifeware.toml` loading and hot reload

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
#[allow(missing_docs)]
pub mod cli;
/// Donor storage (Supabase).
pub mod db;
/// Donor directory and health assistant operations.
pub mod gateway;
/// LLM provider clients.
pub mod llm;
/// Core types (requests, responses, errors).
#[allow(missing_docs)]
pub mod types;
/// Configuration utilities.
pub mod utils;

pub use db::{DonorStore, SupabaseClient};
pub use gateway::{DonorGateway, HealthAssistant};
pub use llm::{ConfiguredLLMFactory, LLMClient, LLMClientFactory, Provider};
pub use types::{AppError, Result};
pub use utils::toml_config::{LifewareConfig, LifewareConfigManager};

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// Largest accepted request body; registrations and chat messages are small
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// TOML configuration with hot-reload support
    pub config_manager: Arc<LifewareConfigManager>,
    /// Donor directory
    pub donors: Arc<DonorGateway>,
    /// Lifela AI health assistant
    pub assistant: Arc<HealthAssistant>,
}

impl AppState {
    /// Wire the Supabase store and the configured chat provider.
    pub fn from_config(config_manager: Arc<LifewareConfigManager>) -> Result<Self> {
        let store: Arc<dyn DonorStore> =
            Arc::new(SupabaseClient::from_manager(config_manager.clone())?);
        let llm_factory: Arc<dyn LLMClientFactory> =
            Arc::new(ConfiguredLLMFactory::new(config_manager.clone()));

        Ok(Self::new(config_manager, store, llm_factory))
    }

    /// Assemble state from explicit parts (used by tests and embedders).
    pub fn new(
        config_manager: Arc<LifewareConfigManager>,
        store: Arc<dyn DonorStore>,
        llm_factory: Arc<dyn LLMClientFactory>,
    ) -> Self {
        let assistant = HealthAssistant::new(llm_factory).with_config(config_manager.clone());

        Self {
            config_manager,
            donors: Arc::new(DonorGateway::new(store)),
            assistant: Arc::new(assistant),
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(api::ApiDoc::openapi())
}

fn cors_layer(allowed_origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid allowed origin: {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
    )
}

/// Build the full application: `/api`, the OpenAPI document and the UI.
pub fn build_app(state: AppState) -> Router {
    let config = state.config_manager.config();

    let api_routes = api::routes::create_router(&config.server.rate_limit)
        .route("/openapi.json", get(openapi_json));

    let ui_dir = &config.server.ui_dir;
    if !ui_dir.join("index.html").exists() {
        tracing::warn!(
            "UI bundle not found at {}; build it with `trunk build --release` in ui/",
            ui_dir.display()
        );
    }
    // Unknown paths get index.html so client-side routes survive a reload
    let ui = ServeDir::new(ui_dir).fallback(ServeFile::new(ui_dir.join("index.html")));

    #[allow(unused_mut)]
    let mut app = Router::new().nest("/api", api_routes);

    #[cfg(feature = "swagger-ui")]
    {
        app = app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
        );
    }

    let mut app = app
        .fallback_service(ui)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new());

    if let Some(cors) = cors_layer(&config.server.allowed_origins) {
        app = app.layer(cors);
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_skips_invalid_origins() {
        assert!(cors_layer(&[]).is_none());
        assert!(cors_layer(&["bad\norigin".to_string()]).is_none());
        assert!(cors_layer(&["http://localhost:8080".to_string()]).is_some());
    }

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = api::ApiDoc::openapi();
        for path in [
            "/api/health",
            "/api/status",
            "/api/donors",
            "/api/donors/count",
            "/api/chat",
            "/api/chat/greeting",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}

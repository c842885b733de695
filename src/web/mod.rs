//! Web layer module
//!
//! This module provides the HTTP interface of the addon: the Stremio
//! resources (manifest, catalog, meta, stream), the configuration page and a
//! health check. Handlers are thin and delegate to [`PlaylistResolver`].
//!
//! # Routing
//!
//! Every addon resource is served both at the root and below a leading
//! `/{config}` segment carrying the user's configuration, which is how
//! Stremio addresses configured addon installs.

use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::Config, models::Manifest, services::PlaylistResolver};

pub mod handlers;
pub mod responses;

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    /// Create a web server with the HTTP playlist resolver
    pub fn new(config: Config) -> Result<Self> {
        let resolver = PlaylistResolver::from_config(&config);
        Self::with_resolver(config, resolver)
    }

    pub fn with_resolver(config: Config, resolver: PlaylistResolver) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let app = create_router(AppState::new(config, resolver));

        Ok(Self { app, addr })
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Create the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::configure::redirect_to_configure))
        .route("/health", get(handlers::health::health_check))
        // Configuration page
        .route("/configure", get(handlers::configure::configure_page))
        .route(
            "/:config/configure",
            get(handlers::configure::configure_page_with_config),
        )
        // Addon resources
        .route("/manifest.json", get(handlers::addon::manifest))
        .route(
            "/:config/manifest.json",
            get(handlers::addon::manifest_with_config),
        )
        .route("/catalog/:type/:id", get(handlers::addon::catalog))
        .route(
            "/:config/catalog/:type/:id",
            get(handlers::addon::catalog_with_config),
        )
        .route("/meta/:type/:id", get(handlers::addon::meta))
        .route(
            "/:config/meta/:type/:id",
            get(handlers::addon::meta_with_config),
        )
        .route("/stream/:type/:id", get(handlers::addon::stream))
        .route(
            "/:config/stream/:type/:id",
            get(handlers::addon::stream_with_config),
        )
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        // Shared state
        .with_state(state)
}

/// Application state shared across all handlers
///
/// Read-only for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub manifest: Arc<Manifest>,
    pub resolver: PlaylistResolver,
}

impl AppState {
    pub fn new(config: Config, resolver: PlaylistResolver) -> Self {
        let manifest = Manifest::from_config(&config.addon);
        Self {
            config: Arc::new(config),
            manifest: Arc::new(manifest),
            resolver,
        }
    }
}

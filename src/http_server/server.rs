//! # HTTP Server
//!
//! Builds the shared store, search index and services, and combines the
//! entity resources with the health and management routes.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::observability_routes::{health_routes, management_routes};
use crate::config::{GalleryConfig, ServerConfig};
use crate::criteria::{AlbumCriteria, PhotoCriteria, TagCriteria};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::rest_api::{resource_routes, Resource, ResourceState, API_PREFIX};
use crate::search::InMemorySearchIndex;
use crate::storage::{InMemoryStore, Stored};

/// State shared by every route
pub struct AppState {
    pub store: Arc<InMemoryStore>,
    pub search: Arc<InMemorySearchIndex>,
    pub metrics: Arc<MetricsRegistry>,
}

impl AppState {
    pub fn new(config: &GalleryConfig) -> Self {
        let search = if config.search.enabled {
            InMemorySearchIndex::new()
        } else {
            InMemorySearchIndex::disabled()
        };
        Self {
            store: Arc::new(InMemoryStore::new()),
            search: Arc::new(search),
            metrics: Arc::new(MetricsRegistry::new()),
        }
    }

    fn resource<C>(&self, config: &GalleryConfig) -> Router
    where
        C: Resource,
        C::Entity: Stored,
    {
        let state = ResourceState::<C>::new(
            Arc::clone(&self.store),
            Arc::clone(&self.search),
            Arc::clone(&self.metrics),
            config.pagination.clone(),
        );
        resource_routes(Arc::new(state))
    }
}

/// HTTP server for the gallery API
pub struct HttpServer {
    config: GalleryConfig,
    state: AppState,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(GalleryConfig::default())
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: GalleryConfig) -> Self {
        let state = AppState::new(&config);
        let router = Self::build_router(&config, &state);
        Self {
            config,
            state,
            router,
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &GalleryConfig, state: &AppState) -> Router {
        let api = Router::new()
            .merge(state.resource::<AlbumCriteria>(config))
            .merge(state.resource::<PhotoCriteria>(config))
            .merge(state.resource::<TagCriteria>(config));

        Router::new()
            .merge(health_routes())
            .nest(API_PREFIX, api)
            .nest("/management", management_routes(Arc::clone(&state.metrics)))
            .layer(Self::cors(&config.server))
            .layer(TraceLayer::new_for_http())
    }

    fn cors(config: &ServerConfig) -> CorsLayer {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(Any)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.server.socket_addr()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get the router (for testing)
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Start the HTTP server (async), returning after Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        log_event_with_fields(Event::Serving, &[("addr", addr.to_string().as_str())]);
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Resolves on Ctrl-C
async fn shutdown_signal() {
    // A failed handler install leaves the server running until killed
    let _ = tokio::signal::ctrl_c().await;
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

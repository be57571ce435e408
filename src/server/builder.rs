//! ServerBuilder for fluent API to build HTTP servers

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::AppState;
use super::rest::RestExposure;
use crate::config::DirectoryConfig;
use crate::core::{AdvocateStore, QueryResolver};

/// Builder for the directory HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryAdvocateStore::new())
///     .with_config(DirectoryConfig::from_yaml_file("directory.yaml")?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn AdvocateStore>>,
    config: DirectoryConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            store: None,
            config: DirectoryConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the advocate store (required)
    pub fn with_store(mut self, store: impl AdvocateStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared advocate store (required)
    pub fn with_shared_store(mut self, store: Arc<dyn AdvocateStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_config(mut self, config: DirectoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the query resolver from the configured store and settings
    pub fn build_resolver(&self) -> Result<QueryResolver> {
        self.config.validate()?;
        let store = self
            .store
            .clone()
            .ok_or_else(|| anyhow::anyhow!("AdvocateStore is required. Call .with_store()"))?;
        Ok(QueryResolver::new(store, self.config.resolver.clone())?)
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let resolver = self.build_resolver()?;
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let app = RestExposure::build_router(AppState::new(resolver), custom_routes);

        Ok(app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.bind_address` and stops on SIGTERM or Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_address.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

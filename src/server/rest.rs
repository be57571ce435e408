//! REST API exposure for the directory
//!
//! Consumes an [`AppState`] and produces an Axum `Router`.

use axum::{Router, routing::get};

use super::handlers::{AppState, health_check, list_advocates};

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router
    ///
    /// - `GET /health`, `GET /healthz`
    /// - `GET /advocates`
    /// - any custom routes, merged last
    pub fn build_router(state: AppState, custom_routes: Vec<Router>) -> Router {
        let mut app = Self::health_routes().merge(Self::directory_routes(state));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app
    }

    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(health_check))
            .route("/healthz", get(health_check))
    }

    fn directory_routes(state: AppState) -> Router {
        Router::new()
            .route("/advocates", get(list_advocates))
            .with_state(state)
    }
}

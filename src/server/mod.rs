//! Server module for building the directory HTTP service
//!
//! This module provides a `ServerBuilder` that registers:
//! - `GET /advocates`, the paginated listing
//! - `GET /health` and `GET /healthz`
//! - any custom routes supplied by the caller

pub mod builder;
pub mod handlers;
pub mod rest;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use rest::RestExposure;

//! # Advocate Directory
//!
//! A read-only listing service for a directory of advocates. Every request
//! is a page of one logical query: optional free-text filter, optional
//! single-field sort, then an offset window.
//!
//! ## Features
//!
//! - **Resolver**: validates raw parameters, applies defaults and runs the
//!   page and count reads against a store
//! - **Pluggable storage**: in-memory by default, PostgreSQL behind the
//!   `postgres` feature
//! - **Consistent pagination**: page and total come from one snapshot
//! - **Configuration-Based**: page-size policy, search fields and timeouts
//!   via YAML
//! - **Record validation**: malformed records surface as warnings, never
//!   as a failed request
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use directory::prelude::*;
//!
//! let store = InMemoryAdvocateStore::new();
//! store.insert(NewAdvocate::new(
//!     "John", "Doe", "New York", "MD", &["Bipolar"], 10, 5551234567,
//! ))?;
//!
//! ServerBuilder::new()
//!     .with_store(store)
//!     .with_config(DirectoryConfig::default())
//!     .serve()
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Query path ===
    pub use crate::core::{
        Advocate, AdvocateListResponse, AdvocateResponse, AdvocateStore, DirectoryError,
        DirectoryResult, NewAdvocate, Page, PaginationMeta, Predicate, QueryParams, QueryRequest,
        QueryResolver, QueryResult, RecordWarning, ResponseAssembler, SearchField, SortDirection,
        SortField, SortOrder, StorageError, ValidationError,
    };

    // === Storage ===
    pub use crate::storage::InMemoryAdvocateStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresAdvocateStore;

    // === Config ===
    pub use crate::config::{
        ConsistencyPolicy, DirectoryConfig, PageSizePolicy, ResolverConfig, ServerConfig,
    };

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};

    // === Axum ===
    pub use axum::{Router, routing::get};
}

//! HTTP handlers for the directory listing
//!
//! Handlers only translate between HTTP and the query path; all
//! validation, filtering and pagination happens in [`QueryResolver`].

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::{
    AdvocateListResponse, DirectoryResult, QueryResolver, RawQueryParams, ResponseAssembler,
    ValidationError,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<QueryResolver>,
    pub assembler: ResponseAssembler,
}

impl AppState {
    pub fn new(resolver: QueryResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
            assembler: ResponseAssembler,
        }
    }
}

/// `GET /advocates`
///
/// Query string: `page`, `pageSize`, `query`, `sortField`, `sortDirection`.
pub async fn list_advocates(
    State(state): State<AppState>,
    params: Result<Query<RawQueryParams>, QueryRejection>,
) -> DirectoryResult<Json<AdvocateListResponse>> {
    let Query(raw) = params.map_err(|rejection| ValidationError::MalformedQuery {
        message: rejection.body_text(),
    })?;
    let params = state.resolver.parse_params(raw)?;

    let result = state.resolver.resolve(&params).await?;
    let response = state.assembler.assemble(result)?;

    Ok(Json(response))
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "advocate-directory"
    }))
}

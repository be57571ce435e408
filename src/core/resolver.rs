//! Query resolution
//!
//! Turns raw list parameters into a validated [`QueryRequest`], then into
//! one bounded page fetch plus a count over the same predicate:
//!
//! ```text
//! QueryParams ─validate─▶ QueryRequest ─predicate/order/page─▶ AdvocateStore
//!                                                   (fetch_page + count)
//!                                                             │
//!                                      QueryResult ◀──────────┘
//! ```
//!
//! Validation always completes before the store is touched, and every
//! store interaction for one request shares a single timeout.

use std::sync::Arc;

use crate::config::{ConsistencyPolicy, PageSizePolicy, ResolverConfig};
use crate::core::error::{
    ConfigError, DirectoryError, DirectoryResult, StorageError, ValidationError,
};
use crate::core::query::{
    Page, QueryParams, QueryRequest, QueryResult, RawQueryParams, SortDirection, SortField,
    SortOrder,
};
use crate::core::store::AdvocateStore;

/// Resolves list requests against an [`AdvocateStore`]
///
/// Holds no per-request state; clone it or share it behind an `Arc`.
#[derive(Clone)]
pub struct QueryResolver {
    store: Arc<dyn AdvocateStore>,
    config: ResolverConfig,
}

impl QueryResolver {
    /// Fails when `config` is inconsistent, so a bad page-size setup
    /// surfaces at startup instead of as a client error
    pub fn new(
        store: Arc<dyn AdvocateStore>,
        config: ResolverConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Read numeric parameters from their query-string text
    ///
    /// A blank value counts as absent. Text that is not an integer is
    /// treated as absent under [`PageSizePolicy::Substitute`] and rejected
    /// under [`PageSizePolicy::Reject`].
    pub fn parse_params(&self, raw: RawQueryParams) -> Result<QueryParams, ValidationError> {
        Ok(QueryParams {
            page: self.parse_number("page", raw.page.as_deref())?,
            page_size: self.parse_number("pageSize", raw.page_size.as_deref())?,
            query: raw.query,
            sort_field: raw.sort_field,
            sort_direction: raw.sort_direction,
        })
    }

    /// Validate and normalize raw parameters
    ///
    /// - `page` below 1 becomes 1, or is rejected under [`PageSizePolicy::Reject`]
    /// - `pageSize` outside `[1, max_page_size]` becomes `default_page_size`,
    ///   or is rejected under [`PageSizePolicy::Reject`]
    /// - `sortField` must be in the whitelist
    /// - `sortDirection` must name a direction; it is ignored without a
    ///   `sortField`
    pub fn validate(&self, params: &QueryParams) -> Result<QueryRequest, ValidationError> {
        let page_number = self.page_number(params.page)?;
        let page_size = self.page_size(params.page_size)?;
        let page = Page::new(page_number, page_size).ok_or(ValidationError::InvalidPageSize {
            value: i64::from(page_size),
            max: self.config.max_page_size,
        })?;

        let sort = match non_blank(params.sort_field.as_deref()) {
            None => SortOrder::Natural,
            Some(field) => {
                let field: SortField = field.parse()?;
                let direction = non_blank(params.sort_direction.as_deref())
                    .map(str::parse::<SortDirection>)
                    .transpose()?
                    .unwrap_or_default();
                SortOrder::by(field, direction)
            }
        };

        let query = params.query.as_deref().unwrap_or_default().trim().to_string();

        Ok(QueryRequest::new(query, sort, page))
    }

    /// Validate `params` and fetch the requested page with its total count
    #[tracing::instrument(skip(self), fields(backend = self.store.backend_name()))]
    pub async fn resolve(&self, params: &QueryParams) -> DirectoryResult<QueryResult> {
        let request = self.validate(params)?;
        self.execute(&request).await
    }

    /// Fetch the page and count for an already validated request
    pub async fn execute(&self, request: &QueryRequest) -> DirectoryResult<QueryResult> {
        let predicate = request.predicate(self.config.search_specialties);
        let order = request.sort();
        let page = request.page();

        let reads = async {
            match self.config.consistency {
                ConsistencyPolicy::Snapshot => {
                    self.store
                        .fetch_page_with_count(&predicate, &order, &page)
                        .await
                }
                ConsistencyPolicy::Independent => tokio::try_join!(
                    self.store.fetch_page(&predicate, &order, &page),
                    self.store.count(&predicate)
                ),
            }
        };

        let (items, total_count) = tokio::time::timeout(self.config.store_timeout(), reads)
            .await
            .map_err(|_| StorageError::Timeout {
                backend: self.store.backend_name().to_string(),
                timeout_ms: self.config.store_timeout_ms,
            })??;

        // A store without its own snapshot read gives no shared view even
        // under the snapshot policy
        let snapshot = self.config.consistency == ConsistencyPolicy::Snapshot
            && self.store.supports_snapshot();

        let returned = items.len() as u64;
        if returned > page.limit() {
            return Err(internal(format!(
                "{} returned {} rows for limit {}",
                self.store.backend_name(),
                returned,
                page.limit()
            )));
        }
        if returned > 0 && page.offset() + returned > total_count {
            if snapshot {
                return Err(internal(format!(
                    "{} returned rows {}..{} but counted {} matches in the same snapshot",
                    self.store.backend_name(),
                    page.offset(),
                    page.offset() + returned,
                    total_count
                )));
            }
            tracing::warn!(
                backend = self.store.backend_name(),
                offset = page.offset(),
                returned,
                total_count,
                "count drifted from page under concurrent writes"
            );
        }

        tracing::debug!(
            query = request.query(),
            sort = ?order,
            page = page.number(),
            page_size = page.size(),
            returned,
            total_count,
            "resolved directory query"
        );

        Ok(QueryResult {
            items,
            total_count,
            page: page.number(),
            page_size: page.size(),
        })
    }

    fn parse_number(
        &self,
        parameter: &'static str,
        value: Option<&str>,
    ) -> Result<Option<i64>, ValidationError> {
        let Some(text) = non_blank(value) else {
            return Ok(None);
        };
        match text.parse::<i64>() {
            Ok(number) => Ok(Some(number)),
            Err(_) => match self.config.page_size_policy {
                PageSizePolicy::Substitute => Ok(None),
                PageSizePolicy::Reject => Err(ValidationError::NotANumber {
                    parameter,
                    value: text.to_string(),
                }),
            },
        }
    }

    fn page_number(&self, page: Option<i64>) -> Result<u32, ValidationError> {
        match page {
            None => Ok(1),
            Some(value) if value >= 1 => Ok(u32::try_from(value).unwrap_or(u32::MAX)),
            Some(value) => match self.config.page_size_policy {
                PageSizePolicy::Substitute => Ok(1),
                PageSizePolicy::Reject => Err(ValidationError::InvalidPage { value }),
            },
        }
    }

    fn page_size(&self, page_size: Option<i64>) -> Result<u32, ValidationError> {
        let max = self.config.max_page_size;
        match page_size {
            None => Ok(self.config.default_page_size),
            Some(value) if value >= 1 && value <= i64::from(max) => {
                u32::try_from(value).map_err(|_| ValidationError::InvalidPageSize { value, max })
            }
            Some(value) => match self.config.page_size_policy {
                PageSizePolicy::Substitute => Ok(self.config.default_page_size),
                PageSizePolicy::Reject => Err(ValidationError::InvalidPageSize { value, max }),
            },
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn internal(detail: String) -> DirectoryError {
    tracing::error!(detail = %detail, "directory invariant violated");
    DirectoryError::Internal(detail)
}

//! Store trait for paginated, filtered reads

use async_trait::async_trait;

use crate::core::error::StorageError;
use crate::core::predicate::Predicate;
use crate::core::query::{Page, SortOrder};
use crate::core::record::Advocate;

/// Read access to the advocate collection
///
/// The query path depends only on this trait. Implementations receive an
/// already-validated predicate, order and page window and must honor the
/// order exactly, including the id tie-break.
#[async_trait]
pub trait AdvocateStore: Send + Sync {
    /// Short backend name used in errors and logs
    fn backend_name(&self) -> &'static str;

    /// Whether [`fetch_page_with_count`](Self::fetch_page_with_count) reads
    /// both results from one consistent view
    ///
    /// Only backends that override it with a real snapshot return `true`.
    fn supports_snapshot(&self) -> bool {
        false
    }

    /// Fetch at most `page.limit()` matching records, skipping `page.offset()`
    async fn fetch_page(
        &self,
        predicate: &Predicate,
        order: &SortOrder,
        page: &Page,
    ) -> Result<Vec<Advocate>, StorageError>;

    /// Count all records matching `predicate`
    async fn count(&self, predicate: &Predicate) -> Result<u64, StorageError>;

    /// Fetch a page and the matching count from one consistent view
    ///
    /// The default runs the two reads back to back with no shared view;
    /// backends that can pin a snapshot override it and report so through
    /// [`supports_snapshot`](Self::supports_snapshot).
    async fn fetch_page_with_count(
        &self,
        predicate: &Predicate,
        order: &SortOrder,
        page: &Page,
    ) -> Result<(Vec<Advocate>, u64), StorageError> {
        let items = self.fetch_page(predicate, order, page).await?;
        let total = self.count(predicate).await?;
        Ok((items, total))
    }
}

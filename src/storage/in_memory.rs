//! In-memory implementation of AdvocateStore for testing and development

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::{Advocate, AdvocateStore, NewAdvocate, Page, Predicate, SortOrder, StorageError};

const BACKEND: &str = "in-memory";

#[derive(Default)]
struct Collection {
    records: BTreeMap<i64, Advocate>,
    last_id: i64,
}

impl Collection {
    fn select(&self, predicate: &Predicate, order: &SortOrder, page: &Page) -> Vec<Advocate> {
        let mut matching: Vec<&Advocate> = self
            .records
            .values()
            .filter(|advocate| predicate.matches(advocate))
            .collect();
        matching.sort_by(|a, b| order.compare(a, b));

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    fn tally(&self, predicate: &Predicate) -> u64 {
        if predicate.is_match_all() {
            return self.records.len() as u64;
        }
        self.records
            .values()
            .filter(|advocate| predicate.matches(advocate))
            .count() as u64
    }
}

/// In-memory advocate store
///
/// Uses RwLock for thread-safe access. Ids start at 1 and are never reused,
/// including after [`remove`](Self::remove).
#[derive(Clone, Default)]
pub struct InMemoryAdvocateStore {
    collection: Arc<RwLock<Collection>>,
}

impl InMemoryAdvocateStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collection>, StorageError> {
        self.collection.read().map_err(|e| StorageError::QueryFailed {
            backend: BACKEND.to_string(),
            message: format!("Failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collection>, StorageError> {
        self.collection.write().map_err(|e| StorageError::QueryFailed {
            backend: BACKEND.to_string(),
            message: format!("Failed to acquire write lock: {}", e),
        })
    }

    /// Insert a record, assigning its id and timestamps
    pub fn insert(&self, new: NewAdvocate) -> Result<Advocate, StorageError> {
        let mut collection = self.write()?;
        collection.last_id += 1;
        let advocate = Advocate::from_new(collection.last_id, new, Utc::now());
        collection.records.insert(advocate.id, advocate.clone());
        Ok(advocate)
    }

    /// Insert several records in order
    pub fn insert_many(
        &self,
        records: impl IntoIterator<Item = NewAdvocate>,
    ) -> Result<Vec<Advocate>, StorageError> {
        records.into_iter().map(|new| self.insert(new)).collect()
    }

    /// Remove a record; its id stays retired
    pub fn remove(&self, id: i64) -> Result<Option<Advocate>, StorageError> {
        Ok(self.write()?.records.remove(&id))
    }

    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.read()?.records.is_empty())
    }
}

#[async_trait]
impl AdvocateStore for InMemoryAdvocateStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn supports_snapshot(&self) -> bool {
        true
    }

    async fn fetch_page(
        &self,
        predicate: &Predicate,
        order: &SortOrder,
        page: &Page,
    ) -> Result<Vec<Advocate>, StorageError> {
        Ok(self.read()?.select(predicate, order, page))
    }

    async fn count(&self, predicate: &Predicate) -> Result<u64, StorageError> {
        Ok(self.read()?.tally(predicate))
    }

    /// Both reads happen under one read lock, so no write can land between them
    async fn fetch_page_with_count(
        &self,
        predicate: &Predicate,
        order: &SortOrder,
        page: &Page,
    ) -> Result<(Vec<Advocate>, u64), StorageError> {
        let collection = self.read()?;
        Ok((
            collection.select(predicate, order, page),
            collection.tally(predicate),
        ))
    }
}

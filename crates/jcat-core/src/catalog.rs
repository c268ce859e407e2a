//! Catalog: the store and the engine behind one call.
//!
//! [`Catalog::search`] loads the query's dataset (once, via the store) and
//! runs the engine over it, returning an owned [`SearchPage`] the caller can
//! keep after the snapshot reference is gone.

use std::sync::Arc;

use crate::engine::{self, total_pages};
use crate::error::StoreError;
use crate::query::Query;
use crate::store::{DatasetSource, DatasetStore};
use crate::types::{DatasetId, Record};

/// Owned result of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub dataset: DatasetId,
    pub items: Vec<Record>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    /// Snapshot build timestamp, when the document carried one.
    pub generated_at: Option<String>,
}

impl SearchPage {
    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// Shared handle over a [`DatasetStore`]. Cloning is cheap.
pub struct Catalog<S> {
    store: Arc<DatasetStore<S>>,
}

impl<S> Clone for Catalog<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DatasetSource> Catalog<S> {
    pub fn new(source: S) -> Self {
        Self::with_store(Arc::new(DatasetStore::new(source)))
    }

    pub fn with_store(store: Arc<DatasetStore<S>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DatasetStore<S> {
        &self.store
    }

    /// Load the query's dataset if needed and execute the query against it.
    pub async fn search(&self, query: &Query) -> Result<SearchPage, StoreError> {
        let snapshot = self.store.load(query.dataset).await?;
        let result = engine::execute(&snapshot, query);
        Ok(SearchPage {
            dataset: snapshot.dataset,
            items: result.items.into_iter().cloned().collect(),
            total: result.total,
            page: result.page,
            page_size: result.page_size,
            generated_at: snapshot.generated_at.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Store: lazily loaded, never invalidated dataset snapshots.
//!
//! The store is the single source of truth for record data; the engine and
//! the view read [`Snapshot`]s from it, never from a source directly. Each
//! dataset has one slot. The first [`DatasetStore::load`] for a dataset
//! fetches it; concurrent loads for the same dataset wait on that fetch
//! instead of issuing their own. A failed fetch leaves the slot empty so the
//! next load tries again. A filled slot is never replaced.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::OnceCell;

use crate::error::{SourceError, StoreError};
use crate::types::{DatasetId, Snapshot};

/// Where snapshot documents come from.
///
/// Implementations return the raw bytes of the dataset's JSON document. The
/// store owns decoding, caching, and error mapping.
pub trait DatasetSource: Send + Sync {
    fn fetch(&self, dataset: DatasetId) -> impl Future<Output = Result<Bytes, SourceError>> + Send;

    /// Human-readable location of a dataset, for logs and error messages.
    fn location(&self, dataset: DatasetId) -> String;
}

/// Per-dataset snapshot cache in front of a [`DatasetSource`].
pub struct DatasetStore<S> {
    source: S,
    slots: [OnceCell<Arc<Snapshot>>; 3],
    fetches: AtomicUsize,
}

impl<S: DatasetSource> DatasetStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            slots: std::array::from_fn(|_| OnceCell::new()),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Return the dataset's snapshot, fetching it on first use.
    pub async fn load(&self, dataset: DatasetId) -> Result<Arc<Snapshot>, StoreError> {
        let slot = &self.slots[dataset.index()];
        if let Some(snapshot) = slot.get() {
            tracing::debug!(%dataset, "snapshot cache hit");
            return Ok(Arc::clone(snapshot));
        }
        slot.get_or_try_init(|| self.fetch_snapshot(dataset))
            .await
            .cloned()
    }

    /// The cached snapshot, if one has been loaded. Never fetches.
    pub fn cached(&self, dataset: DatasetId) -> Option<Arc<Snapshot>> {
        self.slots[dataset.index()].get().cloned()
    }

    /// Load several datasets up front. Failures are logged and returned; they
    /// do not stop the remaining loads.
    pub async fn preload(&self, datasets: &[DatasetId]) -> Vec<StoreError> {
        let mut failures = Vec::new();
        for &dataset in datasets {
            if let Err(err) = self.load(dataset).await {
                tracing::warn!(%dataset, error = %err, "preload failed");
                failures.push(err);
            }
        }
        failures
    }

    /// Number of times the source has been asked for a document.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    async fn fetch_snapshot(&self, dataset: DatasetId) -> Result<Arc<Snapshot>, StoreError> {
        let location = self.source.location(dataset);
        self.fetches.fetch_add(1, Ordering::Relaxed);
        tracing::info!(%dataset, %location, "fetching dataset snapshot");

        let bytes = self.source.fetch(dataset).await.map_err(|err| {
            tracing::warn!(%dataset, %location, error = %err, "dataset fetch failed");
            StoreError::DataUnavailable {
                dataset,
                reason: err.to_string(),
            }
        })?;

        let snapshot = Snapshot::from_json(dataset, &bytes).map_err(|err| {
            tracing::warn!(%dataset, %location, error = %err, "dataset is not valid JSON");
            StoreError::DataUnavailable {
                dataset,
                reason: format!("invalid JSON in {location}: {err}"),
            }
        })?;

        tracing::info!(
            %dataset,
            records = snapshot.len(),
            generated_at = snapshot.generated_at.as_deref().unwrap_or("-"),
            "dataset snapshot cached"
        );
        Ok(Arc::new(snapshot))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

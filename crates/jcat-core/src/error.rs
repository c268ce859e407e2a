//! Error types shared by the store, the sources, and query construction.
//!
//! Record data never produces an error: unparseable values are treated as
//! absent by [`crate::parse`]. The only failure that reaches a caller of
//! [`crate::catalog::Catalog::search`] is [`StoreError::DataUnavailable`].

use crate::types::DatasetId;

/// Failure while building a [`crate::query::Query`] from user-facing labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("unknown dataset: {0:?} (expected SCI, EI or AHCI)")]
    UnknownDataset(String),
    #[error("unknown filter {0:?}")]
    UnknownFilter(String),
    #[error("unknown value {value:?} for filter {filter}")]
    UnknownValue { filter: &'static str, value: String },
    #[error("unknown sort field: {0:?}")]
    UnknownSortField(String),
    #[error("malformed sort spec {0:?} (expected <field>|up or <field>|down)")]
    MalformedSort(String),
}

/// Failure reported by a [`crate::store::DatasetSource`].
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("i/o error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("transport error fetching {url}: {message}")]
    Transport { url: String, message: String },
    #[error("timed out after {secs}s fetching {url}")]
    Timeout { url: String, secs: u64 },
    #[error("invalid dataset url {0:?}")]
    InvalidUrl(String),
}

/// Failure loading a dataset snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The dataset resource could not be fetched or was not valid JSON.
    /// Nothing was cached; a later load fetches again.
    #[error("dataset {dataset} unavailable: {reason}")]
    DataUnavailable { dataset: DatasetId, reason: String },
}

impl StoreError {
    pub fn dataset(&self) -> DatasetId {
        match self {
            StoreError::DataUnavailable { dataset, .. } => *dataset,
        }
    }
}

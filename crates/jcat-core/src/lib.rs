//! jcat-core: journal catalog core library.
//!
//! This crate holds everything below the presentation layer: the record
//! schemas, the field parsers, the query model, the query engine, and the
//! dataset store.
//!
//! # Architecture
//!
//! ```text
//! DatasetSource ──► DatasetStore ──► Engine ──► SearchPage ──► View
//!                        │              ▲
//!                        └── Snapshot ──┘
//! ```
//!
//! Snapshots are fetched at most once per dataset and never change after
//! that. The engine is a pure function over a snapshot and a [`Query`].

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod parse;
pub mod query;
pub mod store;
pub mod types;

pub use catalog::{Catalog, SearchPage};
pub use engine::{execute, QueryResult};
pub use error::{QueryError, SourceError, StoreError};
pub use query::{Direction, Filters, Query, SortField, SortSpec};
pub use store::{DatasetSource, DatasetStore};
pub use types::{AhciRecord, DatasetId, EiRecord, Record, SciRecord, Snapshot};

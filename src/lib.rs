//! jcat: offline journal catalog browser
//!
//! Searches static JSON snapshots of three journal indexes (SCI, EI and
//! A&HCI) and renders one page of results. The layers live in their own
//! crates and are re-exported here so that integration tests and benches can
//! import them from one place.
//!
//! # Architecture
//!
//! ```text
//! jcat-sources ──► jcat-core::DatasetStore ──► jcat-core::engine ──► jcat-view
//!  (dir / http)        (fetch once)               (filter, sort, page)   (cards, html)
//! ```
//!
//! The store and engine are runtime-agnostic apart from `tokio::sync`; the
//! binary drives them from a tokio runtime.

pub mod cli;

pub use jcat_core as catalog;
pub use jcat_sources as sources;
pub use jcat_view as view;

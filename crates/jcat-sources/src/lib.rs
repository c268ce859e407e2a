//! jcat-sources: dataset source adapters for jcat.
//!
//! Each adapter knows where one dataset's JSON document lives and returns
//! its raw bytes to the [`jcat_core::DatasetStore`], which owns decoding and
//! caching.

pub mod dir;
pub mod http;

use bytes::Bytes;
use jcat_core::config::{Config, SourceKind};
use jcat_core::{DatasetId, DatasetSource, SourceError};
use std::time::Duration;

pub use dir::DirSource;
pub use http::HttpSource;

/// The source selected by `[source] kind` in the config.
pub enum ConfiguredSource {
    Dir(DirSource),
    Http(HttpSource),
}

impl ConfiguredSource {
    pub fn from_config(config: &Config) -> Self {
        let files = config.datasets.clone();
        match config.source.kind {
            SourceKind::Dir => {
                ConfiguredSource::Dir(DirSource::new(config.source.data_dir.clone(), files))
            }
            SourceKind::Http => ConfiguredSource::Http(HttpSource::new(
                config.source.base_url.clone(),
                files,
                Duration::from_secs(config.source.timeout_secs),
            )),
        }
    }
}

impl DatasetSource for ConfiguredSource {
    async fn fetch(&self, dataset: DatasetId) -> Result<Bytes, SourceError> {
        match self {
            ConfiguredSource::Dir(source) => source.fetch(dataset).await,
            ConfiguredSource::Http(source) => source.fetch(dataset).await,
        }
    }

    fn location(&self, dataset: DatasetId) -> String {
        match self {
            ConfiguredSource::Dir(source) => source.location(dataset),
            ConfiguredSource::Http(source) => source.location(dataset),
        }
    }
}

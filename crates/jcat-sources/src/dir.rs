//! Directory source: reads `<data_dir>/<file>` from the local filesystem.

use bytes::Bytes;
use jcat_core::config::DatasetFiles;
use jcat_core::{DatasetId, DatasetSource, SourceError};
use std::path::PathBuf;

pub struct DirSource {
    root: PathBuf,
    files: DatasetFiles,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>, files: DatasetFiles) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }

    pub fn path_for(&self, dataset: DatasetId) -> PathBuf {
        self.root.join(self.files.file_for(dataset))
    }
}

impl DatasetSource for DirSource {
    async fn fetch(&self, dataset: DatasetId) -> Result<Bytes, SourceError> {
        let path = self.path_for(dataset);
        tracing::debug!(%dataset, path = %path.display(), "reading dataset file");
        tokio::fs::read(&path)
            .await
            .map(Bytes::from)
            .map_err(|source| SourceError::Io {
                path: path.display().to_string(),
                source,
            })
    }

    fn location(&self, dataset: DatasetId) -> String {
        self.path_for(dataset).display().to_string()
    }
}

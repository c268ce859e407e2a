//! Configuration types for jcat.
//!
//! [`Config::load`] layers an optional user TOML file on top of the built-in
//! defaults. [`Config::defaults`] returns the same defaults without touching
//! the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::types::DatasetId;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[source]
kind         = "dir"
data_dir     = "assets/data"
base_url     = "http://127.0.0.1:8000/assets/data"
timeout_secs = 15

[datasets]
sci  = "sci.json"
ei   = "ei.json"
ahci = "ahci.json"

[view]
image_base = "https://www.ifjournals.com/file"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub datasets: DatasetFiles,
    #[serde(default)]
    pub view: ViewConfig,
}

/// Which kind of origin serves the snapshot documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Dir,
    Http,
}

/// `[source]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_kind")]
    pub kind: SourceKind,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_kind() -> SourceKind { SourceKind::Dir }
fn default_data_dir() -> PathBuf { PathBuf::from("assets/data") }
fn default_base_url() -> String { "http://127.0.0.1:8000/assets/data".to_string() }
fn default_timeout_secs() -> u64 { 15 }

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            data_dir: default_data_dir(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[datasets]` section: document file name per dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetFiles {
    #[serde(default = "default_sci")]
    pub sci: String,
    #[serde(default = "default_ei")]
    pub ei: String,
    #[serde(default = "default_ahci")]
    pub ahci: String,
}

fn default_sci() -> String { "sci.json".to_string() }
fn default_ei() -> String { "ei.json".to_string() }
fn default_ahci() -> String { "ahci.json".to_string() }

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            sci: default_sci(),
            ei: default_ei(),
            ahci: default_ahci(),
        }
    }
}

impl DatasetFiles {
    pub fn file_for(&self, dataset: DatasetId) -> &str {
        match dataset {
            DatasetId::Sci => &self.sci,
            DatasetId::Ei => &self.ei,
            DatasetId::Ahci => &self.ahci,
        }
    }
}

/// `[view]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
    /// Prefix for cover image URLs.
    #[serde(default = "default_image_base")]
    pub image_base: String,
}

fn default_image_base() -> String { "https://www.ifjournals.com/file".to_string() }

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            image_base: default_image_base(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Failure reading or validating a user config file.
#[derive(Debug, thiserror::Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(#[from] config::ConfigError);

impl Config {
    /// Load the built-in defaults, overridden by `path` when given. The file
    /// is never created or rewritten.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

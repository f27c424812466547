use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading a report dataset or pipeline result.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while building the drawing surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("no arguments to plot")]
    NoData,
    #[error("invalid view config: {0}")]
    InvalidConfig(&'static str),
}

/// Failures while loading a [`crate::config::ViewConfig`] file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

//! Error types shared by the loader and the image fetcher

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load a dataset CSV. Fatal for the page that needs it.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("failed to parse {} (line {line}): {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },
}

impl LoadError {
    pub(crate) fn from_csv(path: PathBuf, err: csv::Error) -> Self {
        if let csv::ErrorKind::Io(io) = err.kind() {
            if io.kind() == std::io::ErrorKind::NotFound {
                return LoadError::NotFound { path };
            }
            return LoadError::Io {
                path,
                message: io.to_string(),
            };
        }
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        LoadError::Parse {
            path,
            line,
            message: err.to_string(),
        }
    }
}

/// Failure of a single image download. Never aborts the batch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}

// Error types for the autoloader

use std::path::PathBuf;
use thiserror::Error;

/// Configuration failure while reading the manifest.
///
/// Every cause (missing file, unreadable file, bad JSON, missing `autoload.psr-4`)
/// is flattened into the message. Callers only ever branch on the type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to load composer.json: {message}")]
pub struct ManifestError {
    message: String,
}

impl ManifestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<anyhow::Error> for ManifestError {
    fn from(err: anyhow::Error) -> Self {
        // Alternate format keeps the whole context chain on one line
        Self::new(format!("{:#}", err))
    }
}

/// Failure while executing a resolved source file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to execute {path}: {message}")]
    Execution { path: PathBuf, message: String },
}

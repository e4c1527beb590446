// Mon Jan 19 2026 - Alex

use crate::host::HostError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File is already loaded: {0}")]
    AlreadyLoaded(String),
    #[error("Failed to open {path}: {source}")]
    OpenFailed { path: String, source: HostError },
    #[error("No loader recognizes {0}")]
    FormatUnrecognized(String),
    #[error("Database rejected {path}: {source}")]
    ImportApplyFailed { path: String, source: HostError },
    #[error("Out of memory recording {0}")]
    AllocationFailed(String),
}

impl LoadError {
    pub fn is_already_loaded(&self) -> bool {
        matches!(self, LoadError::AlreadyLoaded(_))
    }
}

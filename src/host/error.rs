// Mon Jan 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Binary parse error: {0}")]
    BinaryParseError(String),
    #[error("Not supported: {0}")]
    NotSupported(String),
    #[error("Address range {0} overlaps segment {1}")]
    Overlap(String, String),
    #[error("Load rejected: {0}")]
    Rejected(String),
    #[error("Database error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<goblin::error::Error> for HostError {
    fn from(e: goblin::error::Error) -> Self {
        HostError::BinaryParseError(e.to_string())
    }
}

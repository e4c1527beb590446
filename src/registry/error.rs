// Mon Jan 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Module already registered: {0}")]
    AlreadyRegistered(String),
}

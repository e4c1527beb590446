// Mon Jan 19 2026 - Alex

//! Session-scoped list of dependency files that have been loaded into the
//! database. Paths are compared byte-for-byte and kept in load order.

pub mod error;

pub use error::RegistryError;

use indexmap::IndexSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadedModule {
    file_path: String,
}

impl LoadedModule {
    pub fn file_path(&self) -> &str {
        &self.file_path
    }
}

impl fmt::Display for LoadedModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_path)
    }
}

#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: IndexSet<String>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self, path: &str) -> bool {
        self.modules.contains(path)
    }

    /// Appends `path`. Callers check `is_loaded` first; a second registration
    /// of the same path is rejected and leaves the registry untouched.
    pub fn register(&mut self, path: &str) -> Result<(), RegistryError> {
        if !self.modules.insert(path.to_string()) {
            return Err(RegistryError::AlreadyRegistered(path.to_string()));
        }
        log::debug!("Registered module {}", path);
        Ok(())
    }

    /// Re-adds a module recorded by an earlier session.
    pub fn restore(&mut self, path: &str) -> Result<(), RegistryError> {
        self.register(path)
    }

    pub fn list(&self) -> impl Iterator<Item = LoadedModule> + '_ {
        self.modules.iter().map(|path| LoadedModule { file_path: path.clone() })
    }

    pub fn paths(&self) -> Vec<&str> {
        self.modules.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

// Tue Jan 15 2026 - Alex

pub mod config;
pub mod host;
pub mod loader;
pub mod memory;
pub mod orchestration;
pub mod registry;
pub mod session;
pub mod symbol;
pub mod ui;

pub use config::{Config, LoadMode};
pub use host::{AnalysisHost, Database, LoadFlags};
pub use loader::{load, LoadError};
pub use orchestration::DependencyCoordinator;
pub use registry::{LoadedModule, ModuleRegistry, RegistryError};
pub use symbol::{ImportResolver, SweepProgress};

// Tue Jan 13 2026 - Alex

pub mod coordinator;

pub use coordinator::{clear_import_comments, map_imports, DependencyCoordinator, LoadOutcome, RunReport};

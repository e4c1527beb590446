// Tue Jan 13 2026 - Alex

pub mod export;
pub mod import;
pub mod resolver;

pub use export::{strip_numeric_suffix, ExportCandidate, FunctionEntry};
pub use import::{ImportEntry, ImportModule};
pub use resolver::{Annotation, ImportResolver, SweepProgress, DEFAULT_PROGRESS_INTERVAL};

// Tue Jan 13 2026 - Alex

use crate::memory::Address;
use crate::symbol::export::{ExportCandidate, FunctionEntry};
use crate::symbol::import::ImportEntry;
use std::fmt;

pub const DEFAULT_PROGRESS_INTERVAL: usize = 5;

pub trait SweepProgress {
    fn report(&mut self, done: usize, total: usize);

    fn finish(&mut self, _total: usize) {}
}

impl SweepProgress for () {
    fn report(&mut self, _done: usize, _total: usize) {}
}

impl SweepProgress for indicatif::ProgressBar {
    fn report(&mut self, done: usize, total: usize) {
        self.set_length(total as u64);
        self.set_position(done as u64);
    }

    fn finish(&mut self, total: usize) {
        self.set_position(total as u64);
        self.finish_with_message("Imports mapped");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub address: Address,
    pub text: String,
}

impl Annotation {
    pub fn for_import(address: Address, export_name: &str) -> Self {
        Self {
            address,
            text: format!("import -> {}", export_name),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.address, self.text)
    }
}

pub struct ImportResolver {
    progress_interval: usize,
}

impl ImportResolver {
    pub fn new() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Walks `functions` in order and proposes an annotation for every named
    /// import that starts with a public function's de-suffixed name. The
    /// result is in write order, so a later annotation for the same address
    /// supersedes an earlier one.
    pub fn resolve<P: SweepProgress + ?Sized>(
        &self,
        functions: &[FunctionEntry],
        imports: &[ImportEntry],
        progress: &mut P,
    ) -> Vec<Annotation> {
        let total = functions.len();
        let mut annotations = Vec::new();

        for (index, function) in functions.iter().enumerate() {
            if index % self.progress_interval == 0 {
                progress.report(index, total);
            }

            let candidate = match ExportCandidate::from_function(function) {
                Some(c) => c,
                None => continue,
            };

            for import in imports {
                if import.has_prefix(&candidate.normalized_name) {
                    log::trace!(
                        "{} matches import {:?} at {}",
                        function.name,
                        import.name,
                        import.address
                    );
                    annotations.push(Annotation::for_import(import.address, &candidate.normalized_name));
                }
            }
        }

        progress.finish(total);
        log::debug!("Resolved {} import annotations from {} functions", annotations.len(), total);
        annotations
    }
}

impl Default for ImportResolver {
    fn default() -> Self {
        Self::new()
    }
}

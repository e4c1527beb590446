// Tue Jan 13 2026 - Alex

use crate::config::{Config, LoadMode};
use crate::host::AnalysisHost;
use crate::loader::{self, find_dependency, LoadError};
use crate::registry::ModuleRegistry;
use crate::session::restore_session;
use crate::symbol::{ImportResolver, SweepProgress};
use anyhow::{anyhow, Result};
use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(String),
    NotFound(String),
    Failed(LoadError),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOutcome::Loaded(path) => write!(f, "loaded {}", path),
            LoadOutcome::NotFound(module) => write!(f, "cannot find resource for import '{}'", module),
            LoadOutcome::Failed(err) => write!(f, "{}", err),
        }
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub restored: usize,
    pub outcomes: Vec<LoadOutcome>,
    pub cleared: usize,
    pub annotations: usize,
}

impl RunReport {
    pub fn loaded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_loaded()).count()
    }
}

pub struct DependencyCoordinator<'a, H: AnalysisHost> {
    host: &'a mut H,
    registry: &'a mut ModuleRegistry,
    config: &'a Config,
}

impl<'a, H: AnalysisHost> DependencyCoordinator<'a, H> {
    pub fn new(host: &'a mut H, registry: &'a mut ModuleRegistry, config: &'a Config) -> Self {
        Self { host, registry, config }
    }

    /// Restores the previous session, loads the requested dependencies and
    /// maps imports onto the exports they brought in.
    pub fn run<P: SweepProgress + ?Sized>(&mut self, progress: &mut P) -> Result<RunReport> {
        let mut report = self.prepare()?;
        report.annotations = self.resolve(progress);
        Ok(report)
    }

    /// Everything before the analysis wait: restore, load by mode and clear
    /// stale import comments. `annotations` is left at zero.
    pub fn prepare(&mut self) -> Result<RunReport> {
        let config = self.config;
        config.validate().map_err(|e| anyhow!(e))?;

        let mut report = RunReport {
            restored: restore_session(&mut *self.host, &mut *self.registry),
            ..RunReport::default()
        };

        report.outcomes = match config.mode {
            LoadMode::AllDependencies => {
                let dir = config
                    .search_directory
                    .as_deref()
                    .ok_or_else(|| anyhow!("search_directory not set"))?;
                self.load_all(dir)
            }
            LoadMode::SingleFile => {
                let path = config
                    .file_path
                    .as_deref()
                    .ok_or_else(|| anyhow!("file_path not set"))?;
                vec![self.load_one(&path.to_string_lossy())]
            }
        };

        if config.clear_import_comments {
            report.cleared = clear_import_comments(&mut *self.host);
        }
        Ok(report)
    }

    /// Waits for analysis to settle, then sweeps the function table.
    pub fn resolve<P: SweepProgress + ?Sized>(&mut self, progress: &mut P) -> usize {
        self.wait_for_analysis();
        self.sweep(progress)
    }

    pub fn wait_for_analysis(&mut self) {
        self.host.wait_for_analysis();
    }

    pub fn sweep<P: SweepProgress + ?Sized>(&mut self, progress: &mut P) -> usize {
        map_imports(&mut *self.host, self.config.progress_interval, progress)
    }

    fn load_all(&mut self, dir: &Path) -> Vec<LoadOutcome> {
        // Loading adds the dependency's own import modules; only the ones
        // present now are searched for.
        let modules: Vec<String> = (0..self.host.import_module_count())
            .filter_map(|index| self.host.import_module_name(index))
            .collect();

        let mut outcomes = Vec::with_capacity(modules.len());
        for module in modules {
            match find_dependency(dir, &module) {
                Some(path) => outcomes.push(self.load_one(&path.to_string_lossy())),
                None => {
                    log::warn!("Cannot find resource for import '{}', ignoring", module);
                    outcomes.push(LoadOutcome::NotFound(module));
                }
            }
        }
        outcomes
    }

    fn load_one(&mut self, path: &str) -> LoadOutcome {
        match loader::load(&mut *self.host, &mut *self.registry, path) {
            Ok(()) => LoadOutcome::Loaded(path.to_string()),
            Err(e) => {
                log::warn!("{}", e);
                LoadOutcome::Failed(e)
            }
        }
    }
}

/// Clears the repeatable comment on every import entry. Returns how many
/// comments were removed.
pub fn clear_import_comments<H: AnalysisHost + ?Sized>(host: &mut H) -> usize {
    let mut cleared = 0;
    for entry in host.all_imports() {
        if host.comment(entry.address).is_some() {
            cleared += 1;
        }
        host.set_comment(entry.address, "");
    }
    cleared
}

/// Runs the resolver over the current function table and writes its
/// annotations in order. Returns the number of annotations written.
pub fn map_imports<H: AnalysisHost + ?Sized, P: SweepProgress + ?Sized>(
    host: &mut H,
    progress_interval: usize,
    progress: &mut P,
) -> usize {
    let functions = host.functions();
    let imports = host.all_imports();

    let annotations = ImportResolver::new()
        .with_progress_interval(progress_interval)
        .resolve(&functions, &imports, progress);

    for annotation in &annotations {
        host.set_comment(annotation.address, &annotation.text);
    }

    log::info!("Mapped {} imports to exports", annotations.len());
    annotations.len()
}

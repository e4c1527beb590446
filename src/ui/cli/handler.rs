// Wed Jan 15 2026 - Alex

use super::args::{Args, Command, DatabaseArgs, InitArgs, LoadArgs};
use crate::config::{Config, LoadMode};
use crate::host::{AnalysisHost, Database};
use crate::orchestration::{clear_import_comments, map_imports, DependencyCoordinator};
use crate::registry::ModuleRegistry;
use crate::session::restore_session;
use crate::ui::display::DisplayRenderer;
use crate::ui::progress::ProgressManager;
use anyhow::Context;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        self.setup_logging(&args)?;

        let display = DisplayRenderer::new(args.quiet);
        let progress = ProgressManager::new().with_enabled(!args.no_progress && !args.quiet);

        match args.command {
            Command::Init(init_args) => self.handle_init(init_args, &display),
            Command::Load(load_args) => self.handle_load(load_args, &display, &progress),
            Command::Resolve(db_args) => self.handle_resolve(db_args, &display, &progress),
            Command::List(db_args) => self.handle_list(db_args, &display),
        }
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()
            .context("Failed to initialize logging")?;

        Ok(())
    }

    fn handle_init(&self, args: InitArgs, display: &DisplayRenderer) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        display.info(&format!("Loading binary: {}", args.binary.display()));
        let db = Database::from_primary(&args.binary)
            .with_context(|| format!("Failed to load {}", args.binary.display()))?;
        db.save(&args.database)?;

        display.success(&format!(
            "Database written to {} ({} segments, {} import modules, {} functions)",
            args.database.display(),
            db.segment_count(),
            db.import_module_count(),
            db.functions().len()
        ));
        Ok(())
    }

    fn handle_load(&self, args: LoadArgs, display: &DisplayRenderer, progress: &ProgressManager) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let mut config = match &args.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => Config::new(),
        };
        if let Some(dir) = args.dir {
            config.mode = LoadMode::AllDependencies;
            config.search_directory = Some(dir);
        } else if let Some(file) = args.file {
            config.mode = LoadMode::SingleFile;
            config.file_path = Some(file);
        }
        if args.keep_comments {
            config = config.with_clear_import_comments(false);
        }
        config.validate().map_err(|e| anyhow::anyhow!(e))?;

        let mut db = Database::open(&args.database)?;
        let mut registry = ModuleRegistry::new();

        let hidden = ProgressManager::new().with_enabled(false);
        let progress = if config.show_progress { progress } else { &hidden };

        let mut coordinator = DependencyCoordinator::new(&mut db, &mut registry, &config);
        let mut report = coordinator.prepare()?;

        let spinner = progress.create_spinner("Please wait for autoanalysis to finish");
        coordinator.wait_for_analysis();
        spinner.finish_and_clear();

        let mut bar = progress.create_sweep_bar("Mapping imports to exports");
        report.annotations = coordinator.sweep(&mut bar);

        display.outcomes(&report);
        display.loaded_modules(&registry);
        display.summary(&report);

        db.save(&args.database)?;
        display.info("All done");
        Ok(())
    }

    fn handle_resolve(&self, args: DatabaseArgs, display: &DisplayRenderer, progress: &ProgressManager) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let mut db = Database::open(&args.database)?;
        let mut registry = ModuleRegistry::new();
        restore_session(&mut db, &mut registry);
        clear_import_comments(&mut db);

        let spinner = progress.create_spinner("Please wait for autoanalysis to finish");
        db.wait_for_analysis();
        spinner.finish_and_clear();

        let mut bar = progress.create_sweep_bar("Mapping imports to exports");
        let mapped = map_imports(&mut db, Config::new().progress_interval, &mut bar);

        db.save(&args.database)?;
        display.loaded_modules(&registry);
        display.success(&format!("{} imports mapped", mapped));
        Ok(())
    }

    fn handle_list(&self, args: DatabaseArgs, display: &DisplayRenderer) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let mut db = Database::open(&args.database)?;
        let mut registry = ModuleRegistry::new();
        restore_session(&mut db, &mut registry);

        display.loaded_modules(&registry);
        display.annotations(&db);
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

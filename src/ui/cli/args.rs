// Wed Jan 15 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "depload")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Load dependency modules into an analysis database and map imports to exports", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_progress: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a database from the primary binary
    Init(InitArgs),
    /// Load dependencies and map imports to their exports
    Load(LoadArgs),
    /// Re-run import mapping without loading anything
    Resolve(DatabaseArgs),
    /// Show loaded modules and annotated imports
    List(DatabaseArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    pub binary: PathBuf,

    #[arg(short, long)]
    pub database: PathBuf,

    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct LoadArgs {
    #[arg(short, long)]
    pub database: PathBuf,

    /// Directory searched for every import module
    #[arg(long, conflicts_with = "file")]
    pub dir: Option<PathBuf>,

    /// Single file to load
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// JSON configuration; --dir and --file override its mode
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub keep_comments: bool,
}

#[derive(Parser, Debug)]
pub struct DatabaseArgs {
    #[arg(short, long)]
    pub database: PathBuf,
}

impl InitArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.binary.exists() {
            return Err(format!("Binary does not exist: {:?}", self.binary));
        }
        if self.database.exists() && !self.force {
            return Err(format!("Database already exists: {:?} (use --force)", self.database));
        }
        Ok(())
    }
}

impl LoadArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.database.exists() {
            return Err(format!("Database does not exist: {:?}", self.database));
        }
        if self.dir.is_none() && self.file.is_none() && self.config.is_none() {
            return Err("One of --dir, --file or --config must be specified".to_string());
        }
        Ok(())
    }
}

impl DatabaseArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.database.exists() {
            return Err(format!("Database does not exist: {:?}", self.database));
        }
        Ok(())
    }
}

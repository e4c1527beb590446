// Tue Jan 13 2026 - Alex

use crate::symbol::DEFAULT_PROGRESS_INTERVAL;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    AllDependencies,
    SingleFile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: LoadMode,
    pub search_directory: Option<PathBuf>,
    pub file_path: Option<PathBuf>,
    pub progress_interval: usize,
    pub clear_import_comments: bool,
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: LoadMode::AllDependencies,
            search_directory: None,
            file_path: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            clear_import_comments: true,
            show_progress: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn all_dependencies(dir: PathBuf) -> Self {
        Self {
            mode: LoadMode::AllDependencies,
            search_directory: Some(dir),
            ..Self::default()
        }
    }

    pub fn single_file(path: PathBuf) -> Self {
        Self {
            mode: LoadMode::SingleFile,
            file_path: Some(path),
            ..Self::default()
        }
    }

    pub fn with_clear_import_comments(mut self, clear: bool) -> Self {
        self.clear_import_comments = clear;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        match self.mode {
            LoadMode::AllDependencies if self.search_directory.is_none() => {
                return Err("search_directory must be set to load all dependencies".to_string());
            }
            LoadMode::SingleFile if self.file_path.is_none() => {
                return Err("file_path must be set to load a single file".to_string());
            }
            _ => {}
        }
        if self.progress_interval == 0 {
            return Err("progress_interval must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_mode_input() {
        assert!(Config::new().validate().is_err());
        assert!(Config::all_dependencies(PathBuf::from("deps")).validate().is_ok());
        assert!(Config::single_file(PathBuf::from("a.dll")).validate().is_ok());

        let mut config = Config::single_file(PathBuf::from("a.dll"));
        config.progress_interval = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"mode": "single_file", "file_path": "dep.dll"}"#).unwrap();
        assert_eq!(config.mode, LoadMode::SingleFile);
        assert_eq!(config.progress_interval, 5);
        assert!(config.clear_import_comments);
    }
}

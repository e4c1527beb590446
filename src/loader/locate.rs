// Mon Jan 19 2026 - Alex

use crate::host::image::module_base_name;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Finds the first file under `dir` whose name starts with the import
/// module's file name, ignoring ASCII case. Entries are visited sorted by
/// name so the pick is stable.
pub fn find_dependency(dir: &Path, module_name: &str) -> Option<PathBuf> {
    let wanted = module_base_name(module_name).to_ascii_lowercase();
    if wanted.is_empty() {
        return None;
    }

    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| name.to_ascii_lowercase().starts_with(&wanted))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
}

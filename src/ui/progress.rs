// Tue Jan 13 2026 - Alex

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    enabled: bool,
    style_template: String,
    spinner_template: String,
}

impl ProgressManager {
    pub fn new() -> Self {
        Self {
            enabled: true,
            style_template: "{spinner:.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>6}/{len:6} {msg}".to_string(),
            spinner_template: "{spinner:.cyan} {msg}".to_string(),
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Bar for the import mapping sweep. The length is filled in by the
    /// first progress report.
    pub fn create_sweep_bar(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(0);
        match ProgressStyle::default_bar().template(&self.style_template) {
            Ok(style) => pb.set_style(style.progress_chars("█▓▒░ ")),
            Err(e) => log::debug!("Invalid progress template: {}", e),
        }
        pb.set_message(message.to_string());
        pb
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        match ProgressStyle::default_spinner().template(&self.spinner_template) {
            Ok(style) => pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")),
            Err(e) => log::debug!("Invalid spinner template: {}", e),
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

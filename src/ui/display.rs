// Tue Jan 13 2026 - Alex

use crate::host::AnalysisHost;
use crate::orchestration::{LoadOutcome, RunReport};
use crate::registry::ModuleRegistry;
use colored::Colorize;

pub struct DisplayRenderer {
    quiet: bool,
}

impl DisplayRenderer {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "[*]".blue(), message);
        }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "[+]".green(), message);
        }
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{} {}", "[!]".red(), message);
    }

    pub fn loaded_modules(&self, registry: &ModuleRegistry) {
        if self.quiet {
            return;
        }
        println!("{}", "-".repeat(40).cyan());
        println!("{}", "Currently loaded files:".cyan().bold());
        println!("{}", "-".repeat(40).cyan());
        for module in registry.list() {
            println!("  >>>> '{}'", module);
        }
    }

    pub fn outcomes(&self, report: &RunReport) {
        for outcome in &report.outcomes {
            match outcome {
                LoadOutcome::Loaded(path) => self.success(&format!("Loaded {}", path)),
                other => self.warning(&other.to_string()),
            }
        }
    }

    pub fn summary(&self, report: &RunReport) {
        if report.restored > 0 {
            self.info(&format!("Detected {} previously loaded files", report.restored));
        }
        self.success(&format!(
            "{} of {} dependencies loaded, {} imports mapped",
            report.loaded_count(),
            report.outcomes.len(),
            report.annotations
        ));
    }

    pub fn annotations<H: AnalysisHost>(&self, host: &H) {
        let mut shown = 0;
        for index in 0..host.import_module_count() {
            let module = host.import_module_name(index).unwrap_or_default();
            for entry in host.import_entries(index) {
                if let Some(text) = host.comment(entry.address) {
                    let name = entry.name.clone().unwrap_or_else(|| format!("#{}", entry.ordinal));
                    println!("  {} {}!{}  {}", entry.address, module, name.yellow(), text.green());
                    shown += 1;
                }
            }
        }
        if shown == 0 {
            self.info("No annotated imports");
        }
    }
}

// Mon Jan 19 2026 - Alex

use crate::host::AnalysisHost;
use crate::registry::ModuleRegistry;
use crate::session::provenance::{original_provenance, parse_provenance, Provenance};

/// Marks segments without a comment as part of the original image and
/// re-registers every dependency recorded by an earlier session. Returns
/// how many dependencies were restored.
pub fn restore_session<H: AnalysisHost + ?Sized>(host: &mut H, registry: &mut ModuleRegistry) -> usize {
    let mut restored = 0;

    for index in 0..host.segment_count() {
        let comment = match host.segment_comment(index) {
            Some(c) => c,
            None => {
                host.set_segment_comment(index, &original_provenance());
                continue;
            }
        };

        let path = match parse_provenance(&comment) {
            Some(Provenance::Dependency(path)) => path,
            _ => continue,
        };

        if registry.is_loaded(&path) {
            continue;
        }

        match registry.restore(&path) {
            Ok(()) => restored += 1,
            Err(e) => log::warn!("Failed to restore {}: {}", path, e),
        }
    }

    if restored > 0 {
        log::info!("Detected {} previously loaded files", restored);
    }
    restored
}

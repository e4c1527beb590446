// Mon Jan 19 2026 - Alex

pub mod error;
pub mod locate;

pub use error::LoadError;
pub use locate::find_dependency;

use crate::host::image::module_base_name;
use crate::host::{AnalysisHost, LoadFlags};
use crate::registry::ModuleRegistry;
use crate::session::format_provenance;

/// Loads `path` into the database as a dependency and records it in the
/// registry. The registry only changes once the database has accepted the
/// whole file; the input and loader handles are dropped on every path.
/// Segments that predate the load must already carry a provenance comment
/// (see `restore_session`), otherwise they are tagged as part of `path`.
pub fn load<H: AnalysisHost + ?Sized>(
    host: &mut H,
    registry: &mut ModuleRegistry,
    path: &str,
) -> Result<(), LoadError> {
    if registry.is_loaded(path) {
        return Err(LoadError::AlreadyLoaded(path.to_string()));
    }

    let mut input = host.open_input(path).map_err(|source| LoadError::OpenFailed {
        path: path.to_string(),
        source,
    })?;

    let loaders = host
        .build_loaders(&mut input)
        .ok_or_else(|| LoadError::FormatUnrecognized(path.to_string()))?;

    let mut record = String::new();
    record
        .try_reserve_exact(path.len())
        .map_err(|_| LoadError::AllocationFailed(path.to_string()))?;
    record.push_str(path);

    host.load_file(path, &mut input, &loaders, LoadFlags::dependency())
        .map_err(|source| LoadError::ImportApplyFailed {
            path: path.to_string(),
            source,
        })?;

    tag_new_segments(host, path);

    drop(loaders);
    drop(input);

    registry
        .register(&record)
        .map_err(|_| LoadError::AlreadyLoaded(record.clone()))?;
    log::info!("Loaded {}", path);
    Ok(())
}

/// Segments created by this load are the only ones without a comment.
fn tag_new_segments<H: AnalysisHost + ?Sized>(host: &mut H, path: &str) {
    let display_name = module_base_name(path);
    let provenance = format_provenance(path);
    let mut tagged = 0;

    for index in 0..host.segment_count() {
        if host.segment_comment(index).is_some() {
            continue;
        }
        host.rename_segment(index, display_name);
        host.set_segment_comment(index, &provenance);
        tagged += 1;
    }

    log::debug!("Tagged {} segments from {}", tagged, display_name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::{FailAt, MockHost, MockModule};
    use crate::session::{original_provenance, restore_session};

    const DEP: &str = "C:\\deps\\widget.dll";

    fn scripted_host() -> MockHost {
        MockHost::new().with_segment(".text").with_module(
            DEP,
            MockModule {
                segments: vec![".text", ".rdata"],
                exports: vec!["CreateWidget_0"],
            },
        )
    }

    #[test]
    fn test_load_tags_and_registers() {
        let mut host = scripted_host();
        let mut registry = ModuleRegistry::new();
        restore_session(&mut host, &mut registry);

        load(&mut host, &mut registry, DEP).unwrap();

        assert_eq!(registry.paths(), vec![DEP]);
        assert_eq!(host.segment_name(0).as_deref(), Some(".text"));
        assert_eq!(host.segment_comment(0), Some(original_provenance()));
        for index in 1..3 {
            assert_eq!(host.segment_name(index).as_deref(), Some("widget.dll"));
            assert_eq!(host.segment_comment(index).as_deref(), Some("\ndep: C:\\deps\\widget.dll\n"));
        }
        assert_eq!(host.live(), 0);
    }

    #[test]
    fn test_second_load_is_already_loaded() {
        let mut host = scripted_host();
        let mut registry = ModuleRegistry::new();
        load(&mut host, &mut registry, DEP).unwrap();
        let segments = host.segment_count();

        let err = load(&mut host, &mut registry, DEP).unwrap_err();
        assert!(err.is_already_loaded());
        assert_eq!(registry.len(), 1);
        assert_eq!(host.segment_count(), segments);
    }

    #[test]
    fn test_apply_failure_leaves_no_trace() {
        let mut host = scripted_host().failing_at(FailAt::Apply);
        let mut registry = ModuleRegistry::new();

        let err = load(&mut host, &mut registry, DEP).unwrap_err();
        assert!(matches!(err, LoadError::ImportApplyFailed { .. }));
        assert!(registry.is_empty());
        assert_eq!(registry.list().count(), 0);
        assert_eq!(host.live(), 0);
        assert_eq!(host.segment_count(), 1);
    }

    #[test]
    fn test_open_and_format_failures() {
        let mut registry = ModuleRegistry::new();

        let mut host = scripted_host().failing_at(FailAt::Open);
        assert!(matches!(
            load(&mut host, &mut registry, DEP),
            Err(LoadError::OpenFailed { .. })
        ));
        assert_eq!(host.live(), 0);

        let mut host = scripted_host().failing_at(FailAt::Loaders);
        assert!(matches!(
            load(&mut host, &mut registry, DEP),
            Err(LoadError::FormatUnrecognized(_))
        ));
        assert_eq!(host.live(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unix_path_display_name() {
        let path = "/opt/deps/libwidget.dylib";
        let mut host = MockHost::new().with_module(
            path,
            MockModule {
                segments: vec!["__TEXT"],
                exports: vec![],
            },
        );
        let mut registry = ModuleRegistry::new();

        load(&mut host, &mut registry, path).unwrap();
        assert_eq!(host.segment_name(0).as_deref(), Some("libwidget.dylib"));
    }
}

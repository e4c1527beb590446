// Mon Jan 19 2026 - Alex

//! Segment comments that record which file a segment came from. The text
//! is stored in saved databases, so the layout must not change.

const PREFIX: &str = "\ndep: ";
const ORIGINAL: &str = "original";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    Original,
    Dependency(String),
}

pub fn format_provenance(path: &str) -> String {
    format!("{}{}\n", PREFIX, path)
}

pub fn original_provenance() -> String {
    format_provenance(ORIGINAL)
}

/// Returns `None` for comments that were not written by the loader.
pub fn parse_provenance(comment: &str) -> Option<Provenance> {
    let payload = comment.strip_prefix(PREFIX)?;
    let payload = payload.strip_suffix('\n').unwrap_or(payload);

    if payload == ORIGINAL {
        Some(Provenance::Original)
    } else {
        Some(Provenance::Dependency(payload.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_layout() {
        assert_eq!(format_provenance("C:\\deps\\widget.dll"), "\ndep: C:\\deps\\widget.dll\n");
        assert_eq!(original_provenance(), "\ndep: original\n");
    }

    #[test]
    fn test_round_trip() {
        for path in ["C:\\deps\\widget.dll", "/opt/lib/libfoo.dylib", "relative/dep.dll", "name with spaces.dll", ""] {
            assert_eq!(
                parse_provenance(&format_provenance(path)),
                Some(Provenance::Dependency(path.to_string()))
            );
        }
    }

    #[test]
    fn test_original_marker() {
        assert_eq!(parse_provenance(&original_provenance()), Some(Provenance::Original));
    }

    #[test]
    fn test_foreign_comments_ignored() {
        assert_eq!(parse_provenance("dep: a.dll\n"), None);
        assert_eq!(parse_provenance("user note"), None);
        assert_eq!(parse_provenance("\ndep"), None);
    }
}

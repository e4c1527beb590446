// Tue Jan 13 2026 - Alex

use crate::memory::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionEntry {
    pub start: Address,
    pub name: String,
    pub public: bool,
}

impl FunctionEntry {
    pub fn new(name: &str, start: Address, public: bool) -> Self {
        Self {
            start,
            name: name.to_string(),
            public,
        }
    }
}

/// Export name recovered from a function whose name carries a `_<digits>`
/// disambiguator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportCandidate {
    pub normalized_name: String,
    pub is_truncated: bool,
}

impl ExportCandidate {
    /// Only public functions with a purely numeric suffix qualify. A name
    /// without such a suffix already equals whatever import it belongs to.
    pub fn from_function(function: &FunctionEntry) -> Option<Self> {
        if !function.public {
            return None;
        }

        strip_numeric_suffix(&function.name).map(|base| Self {
            normalized_name: base.to_string(),
            is_truncated: true,
        })
    }

    pub fn matches(&self, import_name: &str) -> bool {
        import_name.starts_with(&self.normalized_name)
    }
}

/// Returns the text before the last `_` when everything after it is one or
/// more ASCII digits. An empty base would prefix-match every import, so
/// names like `_12` are rejected.
pub fn strip_numeric_suffix(name: &str) -> Option<&str> {
    let split = name.rfind('_')?;
    let suffix = &name[split + 1..];

    // Deliberate departure from plain "strip the suffix": `_12` has an
    // empty base and would tag every named import.
    if split == 0 || suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(&name[..split])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_numeric_suffix() {
        assert_eq!(strip_numeric_suffix("Foo_123"), Some("Foo"));
        assert_eq!(strip_numeric_suffix("Foo_12a"), None);
        assert_eq!(strip_numeric_suffix("Foo"), None);
        assert_eq!(strip_numeric_suffix("Foo_"), None);
    }

    #[test]
    fn test_only_last_underscore_counts() {
        assert_eq!(strip_numeric_suffix("my_func_2"), Some("my_func"));
        assert_eq!(strip_numeric_suffix("my_2_func"), None);
        assert_eq!(strip_numeric_suffix("_0"), None);
        assert_eq!(strip_numeric_suffix("_12"), None);
        assert_eq!(strip_numeric_suffix("__imp_Foo_3"), Some("__imp_Foo"));
    }

    #[test]
    fn test_non_digit_unicode_suffix_rejected() {
        assert_eq!(strip_numeric_suffix("Foo_١٢"), None);
    }

    #[test]
    fn test_candidate_requires_public() {
        let private = FunctionEntry::new("CreateWidget_7", Address::new(0x1000), false);
        assert_eq!(ExportCandidate::from_function(&private), None);

        let public = FunctionEntry::new("CreateWidget_7", Address::new(0x1000), true);
        let candidate = ExportCandidate::from_function(&public).unwrap();
        assert_eq!(candidate.normalized_name, "CreateWidget");
        assert!(candidate.is_truncated);
        assert!(candidate.matches("CreateWidget@8"));
        assert!(!candidate.matches("Create"));
    }

    #[test]
    fn test_unsuffixed_public_function_is_not_candidate() {
        let function = FunctionEntry::new("CreateWidget", Address::new(0x1000), true);
        assert_eq!(ExportCandidate::from_function(&function), None);
    }
}

// Tue Jan 13 2026 - Alex

use crate::memory::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEntry {
    pub address: Address,
    pub name: Option<String>,
    pub ordinal: u32,
    pub module_index: usize,
}

impl ImportEntry {
    pub fn named(name: &str, address: Address, module_index: usize) -> Self {
        Self {
            address,
            name: Some(name.to_string()),
            ordinal: 0,
            module_index,
        }
    }

    pub fn by_ordinal(ordinal: u32, address: Address, module_index: usize) -> Self {
        Self {
            address,
            name: None,
            ordinal,
            module_index,
        }
    }

    pub fn with_ordinal(mut self, ordinal: u32) -> Self {
        self.ordinal = ordinal;
        self
    }

    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.name.as_deref().is_some_and(|name| name.starts_with(prefix))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportModule {
    pub name: String,
    pub entries: Vec<ImportEntry>,
}

impl ImportModule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_match() {
        let base = "Foo";
        for name in ["Foo", "Foo@4", "FooBar"] {
            assert!(ImportEntry::named(name, Address::new(0x10), 0).has_prefix(base), "{}", name);
        }
        for name in ["Fo", "xFoo", "foo"] {
            assert!(!ImportEntry::named(name, Address::new(0x10), 0).has_prefix(base), "{}", name);
        }
    }

    #[test]
    fn test_ordinal_entry_never_matches() {
        let entry = ImportEntry::by_ordinal(7, Address::new(0x20), 0);
        assert!(!entry.has_prefix(""));
        assert!(!entry.is_named());
    }
}

// Tue Jan 13 2026 - Alex

use crate::memory::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    name: String,
    start: Address,
    end: Address,
    comment: Option<String>,
}

impl Segment {
    pub fn new(name: String, start: Address, size: u64) -> Self {
        Self {
            name,
            start,
            end: start.saturating_add(size.max(1)),
            comment: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: &str) {
        self.comment = if comment.is_empty() {
            None
        } else {
            Some(comment.to_string())
        };
    }

    pub fn start(&self) -> Address {
        self.start
    }

    pub fn end(&self) -> Address {
        self.end
    }

    pub fn size(&self) -> u64 {
        self.end - self.start
    }

    pub fn overlaps(&self, start: Address, end: Address) -> bool {
        self.start < end && start < self.end
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{} ({} bytes)", self.name, self.start, self.end, self.size())
    }
}

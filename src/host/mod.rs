// Mon Jan 19 2026 - Alex

//! Boundary with the analysis database that owns segments, comments, the
//! import table and the function table.

pub mod database;
pub mod error;
pub mod image;

#[cfg(test)]
pub mod mock;

pub use database::Database;
pub use error::HostError;
pub use image::{ImageFormat, ParsedImage};

use crate::memory::Address;
use crate::symbol::{FunctionEntry, ImportEntry};
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LoadFlags: u32 {
        const SEGMENTS = 1 << 0;
        const RESOURCES = 1 << 1;
        const IMPORTS = 1 << 2;
        const CODE = 1 << 3;
    }
}

impl LoadFlags {
    pub fn dependency() -> Self {
        Self::SEGMENTS | Self::RESOURCES | Self::IMPORTS | Self::CODE
    }
}

/// Operations the dependency loader and the resolver need from the
/// database. `Input` and `Loaders` are handles that release their
/// resources when dropped.
pub trait AnalysisHost {
    type Input;
    type Loaders;

    fn open_input(&mut self, path: &str) -> Result<Self::Input, HostError>;
    fn build_loaders(&mut self, input: &mut Self::Input) -> Option<Self::Loaders>;
    fn load_file(
        &mut self,
        path: &str,
        input: &mut Self::Input,
        loaders: &Self::Loaders,
        flags: LoadFlags,
    ) -> Result<(), HostError>;

    fn segment_count(&self) -> usize;
    fn segment_name(&self, index: usize) -> Option<String>;
    fn segment_comment(&self, index: usize) -> Option<String>;
    fn set_segment_comment(&mut self, index: usize, comment: &str);
    fn rename_segment(&mut self, index: usize, name: &str);

    fn import_module_count(&self) -> usize;
    fn import_module_name(&self, index: usize) -> Option<String>;
    fn import_entries(&self, module_index: usize) -> Vec<ImportEntry>;

    fn functions(&self) -> Vec<FunctionEntry>;

    fn comment(&self, address: Address) -> Option<String>;
    /// Sets the repeatable comment at `address`; empty text clears it.
    fn set_comment(&mut self, address: Address, text: &str);

    /// Blocks until queued auto-analysis has finished populating the
    /// function table.
    fn wait_for_analysis(&mut self);

    fn all_imports(&self) -> Vec<ImportEntry> {
        (0..self.import_module_count())
            .flat_map(|index| self.import_entries(index))
            .collect()
    }
}

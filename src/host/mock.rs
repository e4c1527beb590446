// Mon Jan 19 2026 - Alex

use crate::host::{AnalysisHost, HostError, LoadFlags};
use crate::memory::{Address, Segment};
use crate::symbol::{FunctionEntry, ImportEntry, ImportModule};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Nothing,
    Open,
    Loaders,
    Apply,
}

pub struct Handle {
    live: Rc<Cell<isize>>,
}

impl Handle {
    fn new(live: &Rc<Cell<isize>>) -> Self {
        live.set(live.get() + 1);
        Self { live: live.clone() }
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

/// Scripted host: each loaded path adds the segments, imports and exports
/// registered for it with `with_module`.
pub struct MockHost {
    pub segments: Vec<Segment>,
    pub modules: Vec<ImportModule>,
    pub functions: Vec<FunctionEntry>,
    pub pending: Vec<FunctionEntry>,
    pub comments: HashMap<Address, String>,
    pub fail_at: FailAt,
    pub live_handles: Rc<Cell<isize>>,
    pub analysis_waits: usize,
    files: HashMap<String, MockModule>,
}

#[derive(Clone, Default)]
pub struct MockModule {
    pub segments: Vec<&'static str>,
    pub exports: Vec<&'static str>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            modules: Vec::new(),
            functions: Vec::new(),
            pending: Vec::new(),
            comments: HashMap::new(),
            fail_at: FailAt::Nothing,
            live_handles: Rc::new(Cell::new(0)),
            analysis_waits: 0,
            files: HashMap::new(),
        }
    }

    pub fn with_segment(mut self, name: &str) -> Self {
        let start = Address::new(0x1000 * (self.segments.len() as u64 + 1));
        self.segments.push(Segment::new(name.to_string(), start, 0x1000));
        self
    }

    pub fn with_imports(mut self, module: &str, entries: Vec<ImportEntry>) -> Self {
        let index = self.modules.len();
        let mut import_module = ImportModule::new(module);
        import_module.entries = entries
            .into_iter()
            .map(|mut e| {
                e.module_index = index;
                e
            })
            .collect();
        self.modules.push(import_module);
        self
    }

    pub fn with_function(mut self, name: &str, addr: u64, public: bool) -> Self {
        self.functions.push(FunctionEntry::new(name, Address::new(addr), public));
        self
    }

    pub fn with_module(mut self, path: &str, module: MockModule) -> Self {
        self.files.insert(path.to_string(), module);
        self
    }

    pub fn failing_at(mut self, fail_at: FailAt) -> Self {
        self.fail_at = fail_at;
        self
    }

    pub fn live(&self) -> isize {
        self.live_handles.get()
    }
}

impl AnalysisHost for MockHost {
    type Input = (Handle, String);
    type Loaders = Handle;

    fn open_input(&mut self, path: &str) -> Result<Self::Input, HostError> {
        if self.fail_at == FailAt::Open || !self.files.contains_key(path) {
            return Err(HostError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                path.to_string(),
            )));
        }
        Ok((Handle::new(&self.live_handles), path.to_string()))
    }

    fn build_loaders(&mut self, _input: &mut Self::Input) -> Option<Self::Loaders> {
        if self.fail_at == FailAt::Loaders {
            return None;
        }
        Some(Handle::new(&self.live_handles))
    }

    fn load_file(
        &mut self,
        path: &str,
        _input: &mut Self::Input,
        _loaders: &Self::Loaders,
        flags: LoadFlags,
    ) -> Result<(), HostError> {
        if self.fail_at == FailAt::Apply {
            return Err(HostError::Rejected(path.to_string()));
        }
        let module = self.files.get(path).cloned().unwrap_or_default();
        if flags.contains(LoadFlags::SEGMENTS) {
            for name in module.segments {
                let start = Address::new(0x1000 * (self.segments.len() as u64 + 1));
                self.segments.push(Segment::new(name.to_string(), start, 0x1000));
            }
        }
        if flags.contains(LoadFlags::CODE) {
            for (i, name) in module.exports.iter().enumerate() {
                let start = Address::new(0x10_0000 + 0x10 * (self.pending.len() + i) as u64);
                self.pending.push(FunctionEntry::new(name, start, true));
            }
        }
        Ok(())
    }

    fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn segment_name(&self, index: usize) -> Option<String> {
        self.segments.get(index).map(|s| s.name().to_string())
    }

    fn segment_comment(&self, index: usize) -> Option<String> {
        self.segments.get(index)?.comment().map(str::to_string)
    }

    fn set_segment_comment(&mut self, index: usize, comment: &str) {
        if let Some(s) = self.segments.get_mut(index) {
            s.set_comment(comment);
        }
    }

    fn rename_segment(&mut self, index: usize, name: &str) {
        if let Some(s) = self.segments.get_mut(index) {
            s.set_name(name);
        }
    }

    fn import_module_count(&self) -> usize {
        self.modules.len()
    }

    fn import_module_name(&self, index: usize) -> Option<String> {
        self.modules.get(index).map(|m| m.name.clone())
    }

    fn import_entries(&self, module_index: usize) -> Vec<ImportEntry> {
        self.modules
            .get(module_index)
            .map(|m| m.entries.clone())
            .unwrap_or_default()
    }

    fn functions(&self) -> Vec<FunctionEntry> {
        self.functions.clone()
    }

    fn comment(&self, address: Address) -> Option<String> {
        self.comments.get(&address).cloned()
    }

    fn set_comment(&mut self, address: Address, text: &str) {
        if text.is_empty() {
            self.comments.remove(&address);
        } else {
            self.comments.insert(address, text.to_string());
        }
    }

    fn wait_for_analysis(&mut self) {
        self.analysis_waits += 1;
        self.functions.append(&mut self.pending);
    }
}

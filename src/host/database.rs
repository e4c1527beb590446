// Mon Jan 19 2026 - Alex

use crate::host::image::{self, ImageFormat, ParsedImage};
use crate::host::{AnalysisHost, HostError, LoadFlags};
use crate::memory::{Address, Segment};
use crate::symbol::{FunctionEntry, ImportEntry, ImportModule};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

const MODULE_ALIGNMENT: u64 = 0x10000;

pub struct InputFile {
    data: Vec<u8>,
}

impl InputFile {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

pub struct LoaderList {
    format: ImageFormat,
}

/// In-process analysis database. Segments, the import table, the function
/// table and repeatable comments live here and are saved as JSON.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Database {
    segments: Vec<Segment>,
    import_modules: Vec<ImportModule>,
    functions: Vec<FunctionEntry>,
    pending: Vec<FunctionEntry>,
    comments: BTreeMap<u64, String>,
    names: BTreeSet<String>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a database around `path` at its preferred base and runs the
    /// initial analysis.
    pub fn from_primary<P: AsRef<Path>>(path: P) -> Result<Self, HostError> {
        let mut file = File::open(path.as_ref())?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let parsed = image::parse_image(&data)?;
        let mut db = Self::new();
        db.add_image(&parsed, LoadFlags::all(), false)?;
        db.wait_for_analysis();

        log::info!(
            "Created database from {} ({}, {} segments, {} import modules)",
            path.as_ref().display(),
            parsed.format,
            db.segments.len(),
            db.import_modules.len()
        );
        Ok(db)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, HostError> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let db: Self = serde_json::from_reader(reader)?;
        log::debug!("Opened database {}", path.as_ref().display());
        Ok(db)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), HostError> {
        let writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(writer, self)?;
        log::debug!("Saved database {}", path.as_ref().display());
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn import_modules(&self) -> &[ImportModule] {
        &self.import_modules
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn add_import_module(&mut self, name: &str, imports: Vec<(Option<&str>, u32, Address)>) -> usize {
        let module_index = self.import_modules.len();
        let mut module = ImportModule::new(name);
        for (import_name, ordinal, address) in imports {
            let entry = match import_name {
                Some(n) => {
                    self.names.insert(n.to_string());
                    ImportEntry::named(n, address, module_index).with_ordinal(ordinal)
                }
                None => ImportEntry::by_ordinal(ordinal, address, module_index),
            };
            module.entries.push(entry);
        }
        self.import_modules.push(module);
        module_index
    }

    /// Queues a function for the next analysis pass under a database-unique
    /// name.
    pub fn queue_function(&mut self, name: &str, start: Address, public: bool) -> String {
        let unique = self.claim_name(name);
        self.pending.push(FunctionEntry::new(&unique, start, public));
        unique
    }

    /// Names are unique across the database. A taken name gets `_<n>`
    /// appended with the smallest free `n`.
    fn claim_name(&mut self, name: &str) -> String {
        if self.names.insert(name.to_string()) {
            return name.to_string();
        }

        let mut n = 0usize;
        loop {
            let candidate = format!("{}_{}", name, n);
            if self.names.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    fn next_free_base(&self) -> Option<Address> {
        self.segments
            .iter()
            .map(|s| s.end())
            .max()
            .unwrap_or_else(Address::zero)
            .align_up(MODULE_ALIGNMENT)
    }

    fn add_image(&mut self, parsed: &ParsedImage, flags: LoadFlags, rebase: bool) -> Result<(), HostError> {
        let out_of_range = || {
            HostError::Rejected(format!(
                "{} image at 0x{:x} does not fit in the address space",
                parsed.format, parsed.preferred_base
            ))
        };

        let preferred = Address::new(parsed.preferred_base);
        let base = if rebase {
            let free = self.next_free_base().ok_or_else(out_of_range)?;
            free.max(preferred.align_up(MODULE_ALIGNMENT).ok_or_else(out_of_range)?)
        } else {
            preferred
        };
        let at = |rva: u64| base.checked_add(rva).ok_or_else(out_of_range);

        // Everything the image places is validated before the database changes.
        let new_start = base;
        let new_end = at(parsed.span().max(1))?;
        let section_starts = parsed
            .sections
            .iter()
            .map(|section| at(section.rva))
            .collect::<Result<Vec<_>, _>>()?;
        let import_addrs = parsed
            .imports
            .iter()
            .map(|import| at(import.rva))
            .collect::<Result<Vec<_>, _>>()?;
        let export_addrs = parsed
            .exports
            .iter()
            .map(|export| at(export.rva))
            .collect::<Result<Vec<_>, _>>()?;
        let entry_addr = parsed.entry.map(at).transpose()?;

        if let Some(existing) = self.segments.iter().find(|s| s.overlaps(new_start, new_end)) {
            return Err(HostError::Overlap(
                format!("{}-{}", new_start, new_end),
                existing.name().to_string(),
            ));
        }

        if flags.contains(LoadFlags::SEGMENTS) {
            for (section, start) in parsed.sections.iter().zip(section_starts) {
                self.segments.push(Segment::new(section.name.clone(), start, section.size));
            }
        }

        if flags.contains(LoadFlags::IMPORTS) {
            let mut grouped: IndexMap<&str, Vec<(Option<&str>, u32, Address)>> = IndexMap::new();
            for (import, address) in parsed.imports.iter().zip(import_addrs) {
                grouped
                    .entry(import.module.as_str())
                    .or_default()
                    .push((import.name.as_deref(), import.ordinal, address));
            }
            for (module, imports) in grouped {
                self.add_import_module(module, imports);
            }
        }

        if flags.contains(LoadFlags::CODE) {
            for (export, address) in parsed.exports.iter().zip(export_addrs) {
                self.queue_function(&export.name, address, true);
            }
            if let Some(entry) = entry_addr {
                self.queue_function("start", entry, false);
            }
        }

        log::debug!("Mapped {} image at {}", parsed.format, base);
        Ok(())
    }
}

impl AnalysisHost for Database {
    type Input = InputFile;
    type Loaders = LoaderList;

    fn open_input(&mut self, path: &str) -> Result<InputFile, HostError> {
        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(InputFile { data })
    }

    fn build_loaders(&mut self, input: &mut InputFile) -> Option<LoaderList> {
        image::detect_format(&input.data).map(|format| LoaderList { format })
    }

    fn load_file(
        &mut self,
        path: &str,
        input: &mut InputFile,
        loaders: &LoaderList,
        flags: LoadFlags,
    ) -> Result<(), HostError> {
        let parsed = image::parse_image(&input.data)?;
        if parsed.format != loaders.format {
            return Err(HostError::Rejected(format!(
                "{} detected as {} but parsed as {}",
                path, loaders.format, parsed.format
            )));
        }
        self.add_image(&parsed, flags, true)
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
        if let Some(segment) = self.segments.get_mut(index) {
            segment.set_comment(comment);
        }
    }

    fn rename_segment(&mut self, index: usize, name: &str) {
        if let Some(segment) = self.segments.get_mut(index) {
            segment.set_name(name);
        }
    }

    fn import_module_count(&self) -> usize {
        self.import_modules.len()
    }

    fn import_module_name(&self, index: usize) -> Option<String> {
        self.import_modules.get(index).map(|m| m.name.clone())
    }

    fn import_entries(&self, module_index: usize) -> Vec<ImportEntry> {
        self.import_modules
            .get(module_index)
            .map(|m| m.entries.clone())
            .unwrap_or_default()
    }

    fn functions(&self) -> Vec<FunctionEntry> {
        self.functions.clone()
    }

    fn comment(&self, address: Address) -> Option<String> {
        self.comments.get(&address.as_u64()).cloned()
    }

    fn set_comment(&mut self, address: Address, text: &str) {
        if text.is_empty() {
            self.comments.remove(&address.as_u64());
        } else {
            self.comments.insert(address.as_u64(), text.to_string());
        }
    }

    fn wait_for_analysis(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        log::debug!("Analyzing {} queued functions", self.pending.len());
        self.functions.append(&mut self.pending);
        self.functions.sort_by_key(|f| f.start);
    }
}

// Mon Jan 19 2026 - Alex

use crate::host::HostError;
use goblin::mach::{Mach, MachO};
use goblin::pe::PE;
use goblin::Object;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Pe,
    MachO,
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Pe => write!(f, "PE"),
            ImageFormat::MachO => write!(f, "Mach-O"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageSection {
    pub name: String,
    pub rva: u64,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct ImageImport {
    pub module: String,
    pub name: Option<String>,
    pub ordinal: u32,
    pub rva: u64,
}

#[derive(Debug, Clone)]
pub struct ImageExport {
    pub name: String,
    pub rva: u64,
}

/// Format-neutral view of an executable image. Every address is relative
/// to `preferred_base`.
#[derive(Debug, Clone)]
pub struct ParsedImage {
    pub format: ImageFormat,
    pub preferred_base: u64,
    pub entry: Option<u64>,
    pub sections: Vec<ImageSection>,
    pub imports: Vec<ImageImport>,
    pub exports: Vec<ImageExport>,
}

impl ParsedImage {
    pub fn span(&self) -> u64 {
        self.sections
            .iter()
            .map(|s| s.rva.saturating_add(s.size))
            .max()
            .unwrap_or(0)
    }
}

pub fn detect_format(data: &[u8]) -> Option<ImageFormat> {
    match Object::parse(data).ok()? {
        Object::PE(_) => Some(ImageFormat::Pe),
        Object::Mach(Mach::Binary(_)) => Some(ImageFormat::MachO),
        _ => None,
    }
}

pub fn parse_image(data: &[u8]) -> Result<ParsedImage, HostError> {
    match Object::parse(data)? {
        Object::PE(pe) => Ok(parse_pe(&pe)),
        Object::Mach(Mach::Binary(macho)) => parse_macho(&macho),
        Object::Mach(Mach::Fat(_)) => Err(HostError::NotSupported(
            "Fat binaries not supported".to_string(),
        )),
        _ => Err(HostError::NotSupported("Unrecognized image format".to_string())),
    }
}

/// Module names are compared on the file name only.
pub fn module_base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

fn parse_pe(pe: &PE) -> ParsedImage {
    let sections = pe
        .sections
        .iter()
        .map(|section| ImageSection {
            name: section
                .name()
                .unwrap_or("")
                .trim_end_matches('\0')
                .to_string(),
            rva: section.virtual_address as u64,
            size: section.virtual_size.max(section.size_of_raw_data) as u64,
        })
        .collect();

    // goblin names ordinal-only imports "ORDINAL <n>" and keeps the IAT slot
    // RVA in `offset`; `rva` is the hint/name entry and is 0 for ordinals
    let imports = pe
        .imports
        .iter()
        .map(|import| {
            let name = if import.name.starts_with("ORDINAL ") {
                None
            } else {
                Some(import.name.to_string())
            };
            ImageImport {
                module: import.dll.to_string(),
                name,
                ordinal: import.ordinal as u32,
                rva: import.offset as u64,
            }
        })
        .collect();

    let exports = pe
        .exports
        .iter()
        .filter(|export| export.reexport.is_none())
        .filter_map(|export| {
            export.name.map(|name| ImageExport {
                name: name.to_string(),
                rva: export.rva as u64,
            })
        })
        .collect();

    ParsedImage {
        format: ImageFormat::Pe,
        preferred_base: pe.image_base as u64,
        entry: (pe.entry != 0).then_some(pe.entry as u64),
        sections,
        imports,
        exports,
    }
}

fn parse_macho(macho: &MachO) -> Result<ParsedImage, HostError> {
    let mut base = None;
    let mut raw_segments = Vec::new();

    for segment in &macho.segments {
        let segname = segment.name().unwrap_or("").to_string();
        if segname == "__PAGEZERO" || segment.vmsize == 0 {
            continue;
        }
        if segname == "__TEXT" {
            base = Some(segment.vmaddr);
        }
        raw_segments.push((segname, segment.vmaddr, segment.vmsize));
    }

    let base = base
        .or_else(|| raw_segments.iter().map(|(_, addr, _)| *addr).min())
        .unwrap_or(0);

    let sections = raw_segments
        .into_iter()
        .map(|(name, vmaddr, vmsize)| ImageSection {
            name,
            rva: vmaddr.saturating_sub(base),
            size: vmsize,
        })
        .collect();

    let imports = macho
        .imports()?
        .into_iter()
        .map(|import| ImageImport {
            module: module_base_name(import.dylib).to_string(),
            name: Some(import.name.to_string()),
            ordinal: 0,
            rva: import.address.saturating_sub(base),
        })
        .collect();

    let exports = macho
        .exports()?
        .into_iter()
        .map(|export| ImageExport {
            name: export.name,
            rva: export.offset,
        })
        .collect();

    Ok(ParsedImage {
        format: ImageFormat::MachO,
        preferred_base: base,
        entry: (macho.entry != 0).then_some(macho.entry),
        sections,
        imports,
        exports,
    })
}

//! # Abbreviation Summaries
//!
//! Reads an object file's DWARF with `object` + `gimli` and reports, for
//! each unit, every abbreviation its entries use, with tag, children flag,
//! attribute names and forms decoded through this crate's tables.
//!
//! gimli does the byte-level reading here; this module only walks units and
//! hands raw codes to [`decode`](crate::decode::decode) and
//! [`decode_form`](crate::reverse::decode_form).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dwconst_core::abbrev::{summarize_path, UnitFilter};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>>
//! {
//!     for unit in summarize_path("/path/to/binary".as_ref(), UnitFilter::All)? {
//!         println!("unit {} (DWARF {})", unit.index, unit.version);
//!         for abbrev in &unit.abbreviations {
//!             println!("  [{}] {}", abbrev.code, abbrev.tag);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use gimli::{RunTimeEndian, SectionId};
use object::{Object, ObjectSection};
use tracing::{debug, info, warn};

use crate::category::Category;
use crate::decode::{decode, DecodedSymbol};
use crate::error::{DwconstError, DwconstResult};
use crate::interop::children_code;
use crate::reverse::decode_form;

/// Which units to summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitFilter
{
    /// Every unit in `.debug_info`
    #[default]
    All,
    /// Only the unit at this zero-based position
    Only(usize),
}

impl UnitFilter
{
    fn admits(self, index: usize) -> bool
    {
        match self {
            UnitFilter::All => true,
            UnitFilter::Only(wanted) => wanted == index,
        }
    }
}

/// One attribute specification of an abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSummary
{
    /// `DW_AT_*` name
    pub name: DecodedSymbol,
    /// `DW_FORM_*` encoding, via the reverse index
    pub form: DecodedSymbol,
}

/// One abbreviation referenced by a unit's entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbrevSummary
{
    /// Abbreviation code (unit-local)
    pub code: u64,
    /// `DW_TAG_*` of entries using it
    pub tag: DecodedSymbol,
    /// `DW_CHILDREN_yes` or `DW_CHILDREN_no`
    pub children: DecodedSymbol,
    /// Attribute specifications in declaration order
    pub attributes: Vec<AttributeSummary>,
}

impl AbbrevSummary
{
    /// Whether any part of this abbreviation failed to decode.
    #[must_use]
    pub fn has_unknown(&self) -> bool
    {
        !self.tag.is_known()
            || !self.children.is_known()
            || self
                .attributes
                .iter()
                .any(|attr| !attr.name.is_known() || !attr.form.is_known())
    }
}

/// Abbreviations used by one unit, ordered by code.
#[derive(Debug, Clone)]
pub struct UnitSummary
{
    /// Position in `.debug_info`
    pub index: usize,
    /// DWARF version from the unit header
    pub version: u16,
    /// Address size from the unit header
    pub address_size: u8,
    /// Debugging information entries in the unit, null padding excluded
    pub entry_count: usize,
    /// Each abbreviation referenced at least once
    pub abbreviations: Vec<AbbrevSummary>,
}

/// Summarize the object file at `path`.
///
/// ## Errors
///
/// - [`DwconstError::Io`] if the file cannot be read
/// - [`DwconstError::InvalidObject`] if it is not a supported object format
/// - [`DwconstError::Dwarf`] if gimli rejects the DWARF sections
pub fn summarize_path(path: &Path, filter: UnitFilter) -> DwconstResult<Vec<UnitSummary>>
{
    info!(path = %path.display(), "reading object file");
    let bytes = fs::read(path)?;
    summarize_bytes(&bytes, filter)
}

/// Summarize an in-memory object file.
///
/// An object with no DWARF sections yields an empty list.
///
/// ## Errors
///
/// See [`summarize_path`].
pub fn summarize_bytes(data: &[u8], filter: UnitFilter) -> DwconstResult<Vec<UnitSummary>>
{
    let file = object::File::parse(data).map_err(|err| DwconstError::InvalidObject(err.to_string()))?;
    let endian = if file.is_little_endian() {
        RunTimeEndian::Little
    } else {
        RunTimeEndian::Big
    };

    let sections = gimli::DwarfSections::load(|id| load_section(&file, id))?;
    let dwarf = sections.borrow(|section| gimli::EndianSlice::new(Cow::as_ref(section), endian));

    let mut summaries = Vec::new();
    let mut headers = dwarf.units();
    let mut index = 0;
    while let Some(header) = headers.next()? {
        let position = index;
        index += 1;
        if !filter.admits(position) {
            continue;
        }

        let unit = dwarf.unit(header)?;
        let mut codes = BTreeSet::new();
        let mut entry_count = 0;
        let mut entries = unit.entries();
        while let Some((_, entry)) = entries.next_dfs()? {
            entry_count += 1;
            codes.insert(entry.code());
        }

        let mut abbreviations = Vec::with_capacity(codes.len());
        for code in codes {
            match unit.abbreviations.get(code) {
                Some(abbrev) => abbreviations.push(summarize_abbrev(abbrev)),
                None => warn!(unit = position, code, "entry references missing abbreviation"),
            }
        }

        debug!(
            unit = position,
            version = unit.header.version(),
            entries = entry_count,
            abbreviations = abbreviations.len(),
            "summarized unit"
        );

        summaries.push(UnitSummary {
            index: position,
            version: unit.header.version(),
            address_size: unit.header.address_size(),
            entry_count,
            abbreviations,
        });
    }

    info!(units = summaries.len(), "finished abbreviation summary");
    Ok(summaries)
}

fn summarize_abbrev(abbrev: &gimli::Abbreviation) -> AbbrevSummary
{
    let attributes = abbrev
        .attributes()
        .iter()
        .map(|spec| AttributeSummary {
            name: decode(Category::AttributeKind, u64::from(spec.name().0)),
            form: decode_form(u64::from(spec.form().0)),
        })
        .collect();

    AbbrevSummary {
        code: abbrev.code(),
        tag: decode(Category::EntityKind, u64::from(abbrev.tag().0)),
        children: decode(Category::HasChildrenFlag, children_code(abbrev.has_children())),
        attributes,
    }
}

/// Section bytes for `id`, trying the ELF name then the Mach-O spelling.
fn load_section<'data>(file: &object::File<'data>, id: SectionId) -> DwconstResult<Cow<'data, [u8]>>
{
    let elf_name = id.name();
    let macho_name = elf_name.strip_prefix('.').map(|name| format!("__{name}"));
    let section = file
        .section_by_name(elf_name)
        .or_else(|| macho_name.as_deref().and_then(|name| file.section_by_name(name)));

    match section {
        Some(section) => section
            .uncompressed_data()
            .map_err(|err| DwconstError::InvalidObject(format!("failed to read {elf_name}: {err}"))),
        None => Ok(Cow::Borrowed(&[])),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_unit_filter()
    {
        assert!(UnitFilter::All.admits(0));
        assert!(UnitFilter::All.admits(42));
        assert!(UnitFilter::Only(3).admits(3));
        assert!(!UnitFilter::Only(3).admits(2));
    }

    #[test]
    fn test_garbage_is_not_an_object()
    {
        let err = summarize_bytes(b"definitely not an object file", UnitFilter::All).unwrap_err();
        assert!(matches!(err, DwconstError::InvalidObject(_)));
    }

    #[test]
    fn test_has_unknown()
    {
        let clean = AbbrevSummary {
            code: 1,
            tag: DecodedSymbol::Known("compile_unit"),
            children: DecodedSymbol::Known("yes"),
            attributes: vec![AttributeSummary {
                name: DecodedSymbol::Known("name"),
                form: DecodedSymbol::Known("strp"),
            }],
        };
        assert!(!clean.has_unknown());

        let mut dwarf5 = clean.clone();
        dwarf5.attributes[0].form = DecodedSymbol::Unknown(0x1f);
        assert!(dwarf5.has_unknown());
    }

    // Test binaries carry their own DWARF on Linux; macOS keeps it in .dSYM.
    #[cfg(target_os = "linux")]
    #[test]
    fn test_summarize_own_executable()
    {
        let exe = std::env::current_exe().unwrap();
        let units = summarize_path(&exe, UnitFilter::Only(0)).unwrap();
        // Test profile built without debug info (CARGO_PROFILE_TEST_DEBUG=0)
        if units.is_empty() {
            return;
        }
        assert_eq!(units.len(), 1);

        let unit = &units[0];
        assert_eq!(unit.index, 0);
        assert!(unit.entry_count > 0);
        assert!(unit
            .abbreviations
            .iter()
            .any(|abbrev| abbrev.tag == DecodedSymbol::Known("compile_unit")));
    }
}

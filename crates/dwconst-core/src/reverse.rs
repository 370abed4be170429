//! # Form Reverse Index
//!
//! Every attribute of every entry in every unit carries a form code, so
//! printing forms is the hottest decode path. This module keeps a
//! `code -> name` hash index for the `DW_FORM_*` table instead of probing the
//! table entry by entry.
//!
//! The index is built once from [`ATTRIBUTE_FORMS`] and never mutated.
//! Call [`init`] at startup to build it before any reader thread runs; the
//! `Lazy` wrapper covers library users that skip that step.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::category::Category;
use crate::decode::DecodedSymbol;
use crate::tables::{ConstantTable, ATTRIBUTE_FORMS};

static FORM_INDEX: Lazy<ReverseIndex> = Lazy::new(|| ReverseIndex::build(&ATTRIBUTE_FORMS));

/// Immutable `code -> name` index over one [`ConstantTable`].
#[derive(Debug)]
pub struct ReverseIndex
{
    category: Category,
    names: HashMap<u64, &'static str>,
}

impl ReverseIndex
{
    /// Index `table`.
    ///
    /// Entries are inserted in declaration order, so when two names share a
    /// code the later one overwrites the earlier: last table-definition order
    /// wins, matching [`ConstantTable::lookup`].
    #[must_use]
    pub fn build(table: &ConstantTable) -> Self
    {
        let mut names = HashMap::with_capacity(table.len());
        for entry in table.entries() {
            names.insert(entry.code, entry.name);
        }

        debug!(
            category = %table.category(),
            entries = table.len(),
            codes = names.len(),
            "built reverse index"
        );

        Self {
            category: table.category(),
            names,
        }
    }

    #[must_use]
    pub fn category(&self) -> Category
    {
        self.category
    }

    /// Name for `code`, if any.
    #[must_use]
    pub fn get(&self, code: u64) -> Option<&'static str>
    {
        self.names.get(&code).copied()
    }

    /// Number of distinct codes.
    #[must_use]
    pub fn len(&self) -> usize
    {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.names.is_empty()
    }
}

/// Force construction of the process-wide indexes.
///
/// Idempotent. Binaries call this before spawning readers.
pub fn init()
{
    Lazy::force(&FORM_INDEX);
}

/// The process-wide `DW_FORM_*` index.
#[must_use]
pub fn form_index() -> &'static ReverseIndex
{
    &FORM_INDEX
}

/// Form name for `code` via the reverse index.
///
/// Same answer as [`decode`](crate::decode::decode)`(Category::AttributeForm, code)`.
#[must_use]
pub fn decode_form_code(code: u64) -> Option<&'static str>
{
    FORM_INDEX.get(code)
}

/// [`decode_form_code`] wrapped in the never-failing tagged result.
#[must_use]
pub fn decode_form(code: u64) -> DecodedSymbol
{
    DecodedSymbol::from_lookup(decode_form_code(code), code)
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::decode::decode;
    use crate::tables::ATTRIBUTE_KINDS;

    #[test]
    fn test_form_index_covers_table()
    {
        init();
        assert_eq!(form_index().category(), Category::AttributeForm);
        assert_eq!(form_index().len(), ATTRIBUTE_FORMS.len());
        assert_eq!(decode_form_code(0x0e), Some("strp"));
        assert_eq!(decode_form_code(0x1f20), Some("GNU_ref_alt"));
        assert_eq!(decode_form_code(0x1f21), Some("GNU_strp_alt"));
    }

    #[test]
    fn test_form_index_agrees_with_decode()
    {
        for code in 0..=0x2000 {
            assert_eq!(decode_form(code), decode(Category::AttributeForm, code), "code 0x{code:x}");
        }
    }

    #[test]
    fn test_build_last_definition_wins()
    {
        let index = ReverseIndex::build(&ATTRIBUTE_KINDS);
        assert_eq!(index.get(0x2e), Some("stride_size"));
        assert_eq!(index.get(0x51), Some("stride"));
        // Two aliases collapse into one code each
        assert_eq!(index.len(), ATTRIBUTE_KINDS.len() - 2);
    }

    #[test]
    fn test_missing_form_code()
    {
        assert_eq!(decode_form_code(0x02), None);
        assert_eq!(decode_form(0x02), DecodedSymbol::Unknown(0x02));
    }
}

//! Syntactic categories of DWARF constants.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::DwconstError;

/// Which table a raw code belongs to
///
/// The same integer means different things depending on where the stream
/// reader found it: `0x11` is `DW_TAG_compile_unit` in an abbreviation's tag
/// slot, `DW_AT_low_pc` in an attribute-name slot and `DW_FORM_ref1` in a
/// form slot. Every lookup is therefore keyed by `(Category, code)`.
///
/// The set is closed. New categories are a source change, never a runtime
/// registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category
{
    /// `DW_TAG_*`: what kind of debugging-information entry a record is
    EntityKind,
    /// `DW_CHILDREN_*`: whether an entry is followed by children
    HasChildrenFlag,
    /// `DW_AT_*`: which property an attribute describes
    AttributeKind,
    /// `DW_FORM_*`: how an attribute value is encoded in the stream
    AttributeForm,
}

impl Category
{
    /// Every category, in table declaration order.
    pub const ALL: [Category; 4] = [
        Category::EntityKind,
        Category::HasChildrenFlag,
        Category::AttributeKind,
        Category::AttributeForm,
    ];

    /// Prefix used by the DWARF standard for names in this category.
    #[must_use]
    pub const fn prefix(self) -> &'static str
    {
        match self {
            Category::EntityKind => "DW_TAG_",
            Category::HasChildrenFlag => "DW_CHILDREN_",
            Category::AttributeKind => "DW_AT_",
            Category::AttributeForm => "DW_FORM_",
        }
    }

    /// Declared width of codes in this category.
    ///
    /// Tags, attribute names and forms are ULEB128 on the wire but the
    /// standard (and every producer we know of) keeps them within 16 bits.
    /// The children flag is a single byte.
    #[must_use]
    pub const fn code_width_bits(self) -> u32
    {
        match self {
            Category::HasChildrenFlag => 8,
            Category::EntityKind | Category::AttributeKind | Category::AttributeForm => 16,
        }
    }

    /// Largest code representable in [`code_width_bits`](Self::code_width_bits).
    #[must_use]
    pub const fn max_code(self) -> u64
    {
        (1u64 << self.code_width_bits()) - 1
    }

    /// Whether `code` fits this category's declared width.
    #[must_use]
    pub const fn fits(self, code: u64) -> bool
    {
        code <= self.max_code()
    }

    /// Vendor extension range bounded by the `lo_user`/`hi_user` entries.
    ///
    /// `None` for categories the format does not make extensible.
    #[must_use]
    pub const fn user_range(self) -> Option<RangeInclusive<u64>>
    {
        match self {
            Category::EntityKind => Some(0x4080..=0xffff),
            Category::AttributeKind => Some(0x2000..=0x3fff),
            Category::HasChildrenFlag | Category::AttributeForm => None,
        }
    }

    /// Whether `code` falls inside the vendor extension range.
    #[must_use]
    pub fn is_user_code(self, code: u64) -> bool
    {
        self.user_range().is_some_and(|range| range.contains(&code))
    }

    /// Strip this category's prefix from a name, if present.
    ///
    /// `"DW_FORM_strp"` and `"strp"` both come back as `"strp"`.
    #[must_use]
    pub fn strip_prefix(self, name: &str) -> &str
    {
        name.strip_prefix(self.prefix()).unwrap_or(name)
    }
}

impl fmt::Display for Category
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        // Rendered without the trailing underscore: "DW_TAG", "DW_FORM".
        let prefix = self.prefix();
        f.write_str(&prefix[..prefix.len() - 1])
    }
}

impl FromStr for Category
{
    type Err = DwconstError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        let normalized = s.trim().to_ascii_lowercase();
        let normalized = normalized.trim_start_matches("dw_").trim_end_matches('_');
        match normalized {
            "tag" | "entity" | "entitykind" | "entity_kind" => Ok(Category::EntityKind),
            "children" | "has_children" | "haschildren" | "haschildrenflag" | "has_children_flag" => {
                Ok(Category::HasChildrenFlag)
            }
            "at" | "attr" | "attribute" | "attributekind" | "attribute_kind" => Ok(Category::AttributeKind),
            "form" | "attributeform" | "attribute_form" => Ok(Category::AttributeForm),
            _ => Err(DwconstError::UnknownCategory(s.to_string())),
        }
    }
}

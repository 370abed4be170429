//! # Decode / Encode
//!
//! The two directions have different failure policies:
//!
//! - [`decode`] is total. A code the table does not define is an expected
//!   outcome (vendor ranges, newer producers, broken producers) and comes
//!   back as [`DecodedSymbol::Unknown`] carrying the raw code.
//! - [`encode`] fails closed with [`UnknownSymbolError`]. An encoder that
//!   asks for a name we do not know has a bug; there is no placeholder code
//!   to emit instead.
//!
//! ## Example
//!
//! ```rust
//! use dwconst_core::{decode, encode, Category, DecodedSymbol};
//!
//! assert_eq!(decode(Category::EntityKind, 0x2e), DecodedSymbol::Known("subprogram"));
//! assert_eq!(decode(Category::HasChildrenFlag, 0x07), DecodedSymbol::Unknown(0x07));
//! assert_eq!(encode(Category::AttributeForm, "DW_FORM_strp").unwrap(), 0x0e);
//! assert!(encode(Category::AttributeForm, "not_a_real_form").is_err());
//! ```

use std::fmt;

use tracing::{debug, trace};

use crate::category::Category;
use crate::error::UnknownSymbolError;
use crate::tables;

/// Result of decoding a raw code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodedSymbol
{
    /// The table names this code (name has no category prefix)
    Known(&'static str),
    /// The table does not name this code; the raw value is kept unchanged
    Unknown(u64),
}

impl DecodedSymbol
{
    /// Build from a table probe result.
    #[must_use]
    pub fn from_lookup(name: Option<&'static str>, code: u64) -> Self
    {
        name.map_or(DecodedSymbol::Unknown(code), DecodedSymbol::Known)
    }

    #[must_use]
    pub fn is_known(&self) -> bool
    {
        matches!(self, DecodedSymbol::Known(_))
    }

    /// Name if known.
    #[must_use]
    pub fn name(&self) -> Option<&'static str>
    {
        match self {
            DecodedSymbol::Known(name) => Some(*name),
            DecodedSymbol::Unknown(_) => None,
        }
    }

    /// Raw code if unknown.
    #[must_use]
    pub fn unknown_code(&self) -> Option<u64>
    {
        match self {
            DecodedSymbol::Known(_) => None,
            DecodedSymbol::Unknown(code) => Some(*code),
        }
    }

    /// Render with the category prefix.
    ///
    /// Known names come out as `DW_TAG_subprogram`. Unknown codes inside the
    /// category's vendor range render as `<user DW_TAG 0x5000>`, any other
    /// unknown code as `<unknown DW_TAG 0x43>`.
    #[must_use]
    pub fn qualified(&self, category: Category) -> String
    {
        match self {
            DecodedSymbol::Known(name) => format!("{}{name}", category.prefix()),
            DecodedSymbol::Unknown(code) if category.is_user_code(*code) => format!("<user {category} 0x{code:x}>"),
            DecodedSymbol::Unknown(code) => format!("<unknown {category} 0x{code:x}>"),
        }
    }
}

impl fmt::Display for DecodedSymbol
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            DecodedSymbol::Known(name) => f.write_str(name),
            DecodedSymbol::Unknown(code) => write!(f, "0x{code:x}"),
        }
    }
}

/// Decode `code` in `category`. Never fails.
#[must_use]
pub fn decode(category: Category, code: u64) -> DecodedSymbol
{
    let symbol = DecodedSymbol::from_lookup(tables::lookup(category, code), code);
    if !symbol.is_known() {
        trace!(%category, code, "no symbol for code");
    }
    symbol
}

/// Code for `name` in `category`.
///
/// `name` may be bare (`"strp"`) or carry the category prefix
/// (`"DW_FORM_strp"`). Both names of an alias pair return the shared code.
///
/// ## Errors
///
/// [`UnknownSymbolError`] when the table has no entry named `name`.
pub fn encode(category: Category, name: &str) -> Result<u64, UnknownSymbolError>
{
    tables::table(category).code_of(category.strip_prefix(name)).ok_or_else(|| {
        debug!(%category, symbol = name, "refusing to encode unknown symbol");
        UnknownSymbolError::new(category, name)
    })
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_decode_known()
    {
        assert_eq!(decode(Category::EntityKind, 0x11), DecodedSymbol::Known("compile_unit"));
        assert_eq!(decode(Category::AttributeKind, 0x11), DecodedSymbol::Known("low_pc"));
        assert_eq!(decode(Category::AttributeForm, 0x11), DecodedSymbol::Known("ref1"));
        assert_eq!(decode(Category::HasChildrenFlag, 0x01), DecodedSymbol::Known("yes"));
    }

    #[test]
    fn test_decode_unknown_keeps_code()
    {
        assert_eq!(decode(Category::HasChildrenFlag, 0x07), DecodedSymbol::Unknown(0x07));
        assert_eq!(decode(Category::AttributeForm, 0x1f22), DecodedSymbol::Unknown(0x1f22));
        assert_eq!(decode(Category::EntityKind, u64::MAX), DecodedSymbol::Unknown(u64::MAX));
    }

    #[test]
    fn test_encode_accepts_prefixed_and_bare()
    {
        assert_eq!(encode(Category::AttributeForm, "strp"), Ok(0x0e));
        assert_eq!(encode(Category::AttributeForm, "DW_FORM_strp"), Ok(0x0e));
        assert_eq!(encode(Category::EntityKind, "DW_TAG_hi_user"), Ok(0xffff));
    }

    #[test]
    fn test_encode_rejects_unknown()
    {
        let err = encode(Category::AttributeForm, "not_a_real_form").unwrap_err();
        assert_eq!(err.category, Category::AttributeForm);
        assert_eq!(err.name, "not_a_real_form");

        // Right name, wrong table
        assert!(encode(Category::AttributeForm, "DW_AT_name").is_err());
        // Matching is case-sensitive
        assert!(encode(Category::AttributeKind, "use_utf8").is_err());
        assert_eq!(encode(Category::AttributeKind, "use_UTF8"), Ok(0x53));
    }

    #[test]
    fn test_encode_aliases_share_code()
    {
        assert_eq!(encode(Category::AttributeKind, "bit_stride"), Ok(0x2e));
        assert_eq!(encode(Category::AttributeKind, "stride_size"), Ok(0x2e));
        assert_eq!(encode(Category::AttributeKind, "byte_stride"), Ok(0x51));
        assert_eq!(encode(Category::AttributeKind, "stride"), Ok(0x51));
        assert_eq!(encode(Category::EntityKind, "namelist_item"), Ok(0x2c));
        assert_eq!(encode(Category::EntityKind, "namelist_items"), Ok(0x2c));
    }

    #[test]
    fn test_qualified_rendering()
    {
        assert_eq!(decode(Category::EntityKind, 0x2e).qualified(Category::EntityKind), "DW_TAG_subprogram");
        assert_eq!(decode(Category::EntityKind, 0x5000).qualified(Category::EntityKind), "<user DW_TAG 0x5000>");
        assert_eq!(decode(Category::EntityKind, 0x43).qualified(Category::EntityKind), "<unknown DW_TAG 0x43>");
        assert_eq!(decode(Category::AttributeForm, 0x1f22).qualified(Category::AttributeForm), "<unknown DW_FORM 0x1f22>");
    }

    #[test]
    fn test_display()
    {
        assert_eq!(DecodedSymbol::Known("addr").to_string(), "addr");
        assert_eq!(DecodedSymbol::Unknown(0x1f).to_string(), "0x1f");
    }

    #[test]
    fn test_accessors()
    {
        let known = DecodedSymbol::Known("name");
        assert!(known.is_known());
        assert_eq!(known.name(), Some("name"));
        assert_eq!(known.unknown_code(), None);

        let unknown = DecodedSymbol::Unknown(0x99);
        assert!(!unknown.is_known());
        assert_eq!(unknown.name(), None);
        assert_eq!(unknown.unknown_code(), Some(0x99));
    }
}

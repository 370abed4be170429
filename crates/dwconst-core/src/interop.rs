//! Bridges to `gimli`'s constant newtypes.
//!
//! Code that already reads DWARF through gimli holds `DwTag`, `DwAt`,
//! `DwForm` and `DwChildren` values rather than bare integers. The
//! [`DwarfConstant`] trait lets those decode without the caller naming a
//! category.

use crate::category::Category;
use crate::decode::{decode, encode, DecodedSymbol};
use crate::error::{DwconstError, DwconstResult};
use crate::reverse::decode_form;

/// A fixed-width DWARF constant type tied to one [`Category`].
pub trait DwarfConstant: Copy
{
    /// Table this type's values are decoded against
    const CATEGORY: Category;

    /// Widened raw code.
    fn raw(self) -> u64;

    /// Narrow a code back into this type, `None` if it does not fit.
    fn from_raw(code: u64) -> Option<Self>;
}

impl DwarfConstant for gimli::DwTag
{
    const CATEGORY: Category = Category::EntityKind;

    fn raw(self) -> u64
    {
        u64::from(self.0)
    }

    fn from_raw(code: u64) -> Option<Self>
    {
        u16::try_from(code).ok().map(gimli::DwTag)
    }
}

impl DwarfConstant for gimli::DwChildren
{
    const CATEGORY: Category = Category::HasChildrenFlag;

    fn raw(self) -> u64
    {
        u64::from(self.0)
    }

    fn from_raw(code: u64) -> Option<Self>
    {
        u8::try_from(code).ok().map(gimli::DwChildren)
    }
}

impl DwarfConstant for gimli::DwAt
{
    const CATEGORY: Category = Category::AttributeKind;

    fn raw(self) -> u64
    {
        u64::from(self.0)
    }

    fn from_raw(code: u64) -> Option<Self>
    {
        u16::try_from(code).ok().map(gimli::DwAt)
    }
}

impl DwarfConstant for gimli::DwForm
{
    const CATEGORY: Category = Category::AttributeForm;

    fn raw(self) -> u64
    {
        u64::from(self.0)
    }

    fn from_raw(code: u64) -> Option<Self>
    {
        u16::try_from(code).ok().map(gimli::DwForm)
    }
}

/// Decode a gimli constant.
///
/// Forms go through the reverse index; the answer is the same either way.
#[must_use]
pub fn decode_constant<C: DwarfConstant>(constant: C) -> DecodedSymbol
{
    match C::CATEGORY {
        Category::AttributeForm => decode_form(constant.raw()),
        category => decode(category, constant.raw()),
    }
}

/// Encode `name` straight into a gimli constant.
///
/// ## Errors
///
/// - [`DwconstError::UnknownSymbol`] if `name` is not in the table
/// - [`DwconstError::CodeOutOfRange`] if the code does not fit `C`
pub fn encode_constant<C: DwarfConstant>(name: &str) -> DwconstResult<C>
{
    let code = encode(C::CATEGORY, name)?;
    C::from_raw(code).ok_or(DwconstError::CodeOutOfRange {
        category: C::CATEGORY,
        code,
    })
}

/// `DW_CHILDREN_*` code for gimli's boolean `has_children`.
#[must_use]
pub fn children_code(has_children: bool) -> u64
{
    let flag = if has_children {
        gimli::DW_CHILDREN_yes
    } else {
        gimli::DW_CHILDREN_no
    };
    flag.raw()
}

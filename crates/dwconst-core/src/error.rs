//! # Error Types
//!
//! Decoding never fails: an unrecognized code comes back as
//! [`DecodedSymbol::Unknown`](crate::decode::DecodedSymbol::Unknown).
//! Everything in this module belongs to the other direction (encoding a
//! name) or to the edges of the crate (parsing user input, reading object
//! files).
//!
//! We use `thiserror` to generate the `Error` implementations and messages.

use thiserror::Error;

use crate::category::Category;

/// A symbolic name that is not defined for the requested category.
///
/// Encoders fail closed: there is no numeric placeholder that could stand in
/// for a name we do not recognize, so the caller must handle this.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {category} symbol: {name}")]
pub struct UnknownSymbolError
{
    /// Table that was searched
    pub category: Category,
    /// Name exactly as the caller supplied it
    pub name: String,
}

impl UnknownSymbolError
{
    pub(crate) fn new(category: Category, name: impl Into<String>) -> Self
    {
        Self {
            category,
            name: name.into(),
        }
    }
}

/// Main error type for the crate
///
/// ## Error Categories
///
/// 1. **Symbol errors**: UnknownSymbol, CodeOutOfRange
/// 2. **Input errors**: UnknownCategory, InvalidCode
/// 3. **Object file errors**: InvalidObject, Dwarf, Io
#[derive(Error, Debug)]
pub enum DwconstError
{
    /// Encoding was asked for a name the table does not define
    #[error(transparent)]
    UnknownSymbol(#[from] UnknownSymbolError),

    /// A category selector string did not name any table
    ///
    /// Accepted spellings are listed on [`Category`]'s `FromStr` impl.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// A numeric code could not be parsed (expects decimal or `0x` hex)
    #[error("Invalid code: {0}")]
    InvalidCode(String),

    /// A code does not fit the category's declared bit width
    ///
    /// Only raised when converting into a fixed-width type such as
    /// `gimli::DwTag`.
    #[error("Code 0x{code:x} is out of range for {category}")]
    CodeOutOfRange
    {
        /// Category whose width was exceeded
        category: Category,
        /// Offending code
        code: u64,
    },

    /// The input could not be parsed as an object file
    #[error("Invalid object file: {0}")]
    InvalidObject(String),

    /// gimli failed while reading DWARF sections
    #[error("DWARF error: {0}")]
    Dwarf(#[from] gimli::Error),

    /// I/O error (reading object files from disk)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for `Result<T, DwconstError>`
///
/// ```rust
/// use dwconst_core::error::DwconstResult;
/// fn foo() -> DwconstResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type DwconstResult<T> = std::result::Result<T, DwconstError>;

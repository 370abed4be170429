//! # dwconst-core
//!
//! Symbolic names for the integer constants found in DWARF debugging
//! information.
//!
//! This crate provides:
//! - The `DW_TAG`, `DW_CHILDREN`, `DW_AT` and `DW_FORM` tables as static data
//! - A total decoder: every `(category, code)` yields a [`DecodedSymbol`],
//!   `Unknown(code)` when the table has no name for it
//! - A fail-closed encoder from names back to codes
//! - A prebuilt reverse index for forms, the hottest decode path
//! - Adapters for `gimli`'s constant newtypes and an abbreviation summary
//!   over real object files
//!
//! ## Concurrency
//!
//! Everything here is immutable after [`reverse::init`] and safe to share
//! between threads without locks.

pub mod abbrev;
pub mod category;
pub mod decode;
pub mod error;
pub mod interop;
pub mod prelude;
pub mod reverse;
pub mod tables;

pub use category::Category;
pub use decode::{decode, encode, DecodedSymbol};
// Re-export commonly used types
pub use error::{DwconstError, DwconstResult, UnknownSymbolError};
pub use interop::{decode_constant, encode_constant, DwarfConstant};
pub use reverse::{decode_form_code, init};
pub use tables::{entries, lookup, Constant, ConstantTable};

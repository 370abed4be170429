//! Common module for library exports

pub use crate::category::Category;
pub use crate::decode::{decode, encode, DecodedSymbol};
pub use crate::error::{DwconstError, DwconstResult, UnknownSymbolError};
pub use crate::interop::{decode_constant, encode_constant, DwarfConstant};
pub use crate::reverse::{decode_form, decode_form_code};

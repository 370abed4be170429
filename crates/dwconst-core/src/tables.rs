//! # Constant Tables
//!
//! The four DWARF constant tables, as `'static` data.
//!
//! Each table is an ordered list of `(name, code)` entries for one
//! [`Category`]. Names are stored without the category prefix
//! (`"compile_unit"`, not `"DW_TAG_compile_unit"`); [`Category::prefix`]
//! supplies it when a qualified name is wanted.
//!
//! ## Aliases
//!
//! A few codes carry two names (historical spellings kept for readelf
//! compatibility):
//!
//! | Category      | Code   | Names                              |
//! |---------------|--------|------------------------------------|
//! | EntityKind    | `0x2c` | `namelist_item`, `namelist_items`  |
//! | AttributeKind | `0x2e` | `bit_stride`, `stride_size`        |
//! | AttributeKind | `0x51` | `byte_stride`, `stride`            |
//!
//! Both names encode to the shared code. Decoding reports the entry declared
//! **last** in the table; [`ConstantTable::lookup`] and the form
//! [`ReverseIndex`](crate::reverse::ReverseIndex) apply the same rule.
//!
//! ## Vendor ranges
//!
//! Vendor codes (GNU, MIPS, Sun, APPLE) live in the same table as the
//! standard ones. The `lo_user`/`hi_user` bounds are ordinary entries; codes
//! strictly between them that no vendor entry names decode as unknown.

use crate::category::Category;

/// One named code in a [`ConstantTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constant
{
    /// Name without the category prefix
    pub name: &'static str,
    /// Wire-level code
    pub code: u64,
}

/// All named codes of one category, in declaration order.
#[derive(Debug)]
pub struct ConstantTable
{
    category: Category,
    entries: &'static [Constant],
}

impl ConstantTable
{
    const fn new(category: Category, entries: &'static [Constant]) -> Self
    {
        Self { category, entries }
    }

    /// Category this table serves.
    #[must_use]
    pub const fn category(&self) -> Category
    {
        self.category
    }

    /// Entries in declaration order, aliases included.
    #[must_use]
    pub const fn entries(&self) -> &'static [Constant]
    {
        self.entries
    }

    /// Number of entries, aliases included.
    #[must_use]
    pub const fn len(&self) -> usize
    {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool
    {
        self.entries.is_empty()
    }

    /// Name for `code`, or `None` when the table does not define it.
    ///
    /// When two entries share `code` the one declared last wins.
    #[must_use]
    pub fn lookup(&self, code: u64) -> Option<&'static str>
    {
        self.entries.iter().rev().find(|entry| entry.code == code).map(|entry| entry.name)
    }

    /// Code for an unprefixed `name`, or `None` when the table does not
    /// define it. Matching is exact and case-sensitive.
    #[must_use]
    pub fn code_of(&self, name: &str) -> Option<u64>
    {
        self.entries.iter().find(|entry| entry.name == name).map(|entry| entry.code)
    }

    /// Whether `entry` shares its code with a later entry and therefore
    /// never comes back from [`lookup`](Self::lookup).
    #[must_use]
    pub fn is_shadowed(&self, entry: &Constant) -> bool
    {
        self.lookup(entry.code).is_some_and(|canonical| canonical != entry.name)
    }

    /// Entries that lose the alias tie-break.
    pub fn shadowed(&self) -> impl Iterator<Item = &'static Constant> + '_
    {
        self.entries.iter().filter(move |entry| self.is_shadowed(entry))
    }
}

/// Declares a `static` [`ConstantTable`] from `"name" => code` pairs.
macro_rules! constant_table {
    (
        $(#[$meta:meta])*
        $vis:vis static $table:ident: $category:ident {
            $($name:literal => $code:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis static $table: ConstantTable = ConstantTable::new(
            Category::$category,
            &[$(Constant { name: $name, code: $code }),*],
        );
    };
}

constant_table! {
    /// `DW_TAG_*` entity kinds.
    pub static ENTITY_KINDS: EntityKind {
        "null" => 0x00,
        "array_type" => 0x01,
        "class_type" => 0x02,
        "entry_point" => 0x03,
        "enumeration_type" => 0x04,
        "formal_parameter" => 0x05,
        "imported_declaration" => 0x08,
        "label" => 0x0a,
        "lexical_block" => 0x0b,
        "member" => 0x0d,
        "pointer_type" => 0x0f,
        "reference_type" => 0x10,
        "compile_unit" => 0x11,
        "string_type" => 0x12,
        "structure_type" => 0x13,
        "subroutine_type" => 0x15,
        "typedef" => 0x16,
        "union_type" => 0x17,
        "unspecified_parameters" => 0x18,
        "variant" => 0x19,
        "common_block" => 0x1a,
        "common_inclusion" => 0x1b,
        "inheritance" => 0x1c,
        "inlined_subroutine" => 0x1d,
        "module" => 0x1e,
        "ptr_to_member_type" => 0x1f,
        "set_type" => 0x20,
        "subrange_type" => 0x21,
        "with_stmt" => 0x22,
        "access_declaration" => 0x23,
        "base_type" => 0x24,
        "catch_block" => 0x25,
        "const_type" => 0x26,
        "constant" => 0x27,
        "enumerator" => 0x28,
        "file_type" => 0x29,
        "friend" => 0x2a,
        "namelist" => 0x2b,
        "namelist_item" => 0x2c,
        "namelist_items" => 0x2c,
        "packed_type" => 0x2d,
        "subprogram" => 0x2e,
        // The standard spells these `_parameter`; readelf uses `_param`.
        "template_type_param" => 0x2f,
        "template_value_param" => 0x30,
        "thrown_type" => 0x31,
        "try_block" => 0x32,
        "variant_part" => 0x33,
        "variable" => 0x34,
        "volatile_type" => 0x35,
        "dwarf_procedure" => 0x36,
        "restrict_type" => 0x37,
        "interface_type" => 0x38,
        "namespace" => 0x39,
        "imported_module" => 0x3a,
        "unspecified_type" => 0x3b,
        "partial_unit" => 0x3c,
        "imported_unit" => 0x3d,
        "mutable_type" => 0x3e,
        "condition" => 0x3f,
        "shared_type" => 0x40,
        "type_unit" => 0x41,
        "rvalue_reference_type" => 0x42,

        "lo_user" => 0x4080,
        "GNU_call_site" => 0x4109,
        "GNU_call_site_parameter" => 0x410a,
        "hi_user" => 0xffff,
    }
}

constant_table! {
    /// `DW_CHILDREN_*` flags.
    pub static HAS_CHILDREN_FLAGS: HasChildrenFlag {
        "no" => 0x00,
        "yes" => 0x01,
    }
}

constant_table! {
    /// `DW_AT_*` attribute kinds.
    pub static ATTRIBUTE_KINDS: AttributeKind {
        "null" => 0x00,
        "sibling" => 0x01,
        "location" => 0x02,
        "name" => 0x03,
        "ordering" => 0x09,
        "subscr_data" => 0x0a,
        "byte_size" => 0x0b,
        "bit_offset" => 0x0c,
        "bit_size" => 0x0d,
        "element_list" => 0x0f,
        "stmt_list" => 0x10,
        "low_pc" => 0x11,
        "high_pc" => 0x12,
        "language" => 0x13,
        "member" => 0x14,
        "discr" => 0x15,
        "discr_value" => 0x16,
        "visibility" => 0x17,
        "import" => 0x18,
        "string_length" => 0x19,
        "common_reference" => 0x1a,
        "comp_dir" => 0x1b,
        "const_value" => 0x1c,
        "containing_type" => 0x1d,
        "default_value" => 0x1e,
        "inline" => 0x20,
        "is_optional" => 0x21,
        "lower_bound" => 0x22,
        "producer" => 0x25,
        "prototyped" => 0x27,
        "return_addr" => 0x2a,
        "start_scope" => 0x2c,
        "bit_stride" => 0x2e,
        "stride_size" => 0x2e,
        "upper_bound" => 0x2f,
        "abstract_origin" => 0x31,
        "accessibility" => 0x32,
        "address_class" => 0x33,
        "artificial" => 0x34,
        "base_types" => 0x35,
        "calling_convention" => 0x36,
        "count" => 0x37,
        "data_member_location" => 0x38,
        "decl_column" => 0x39,
        "decl_file" => 0x3a,
        "decl_line" => 0x3b,
        "declaration" => 0x3c,
        "discr_list" => 0x3d,
        "encoding" => 0x3e,
        "external" => 0x3f,
        "frame_base" => 0x40,
        "friend" => 0x41,
        "identifier_case" => 0x42,
        "macro_info" => 0x43,
        "namelist_item" => 0x44,
        "priority" => 0x45,
        "segment" => 0x46,
        "specification" => 0x47,
        "static_link" => 0x48,
        "type" => 0x49,
        "use_location" => 0x4a,
        "variable_parameter" => 0x4b,
        "virtuality" => 0x4c,
        "vtable_elem_location" => 0x4d,
        "allocated" => 0x4e,
        "associated" => 0x4f,
        "data_location" => 0x50,
        "byte_stride" => 0x51,
        "stride" => 0x51,
        "entry_pc" => 0x52,
        "use_UTF8" => 0x53,
        "extension" => 0x54,
        "ranges" => 0x55,
        "trampoline" => 0x56,
        "call_column" => 0x57,
        "call_file" => 0x58,
        "call_line" => 0x59,
        "description" => 0x5a,
        "binary_scale" => 0x5b,
        "decimal_scale" => 0x5c,
        "small" => 0x5d,
        "decimal_sign" => 0x5e,
        "digit_count" => 0x5f,
        "picture_string" => 0x60,
        "mutable" => 0x61,
        "threads_scaled" => 0x62,
        "explicit" => 0x63,
        "object_pointer" => 0x64,
        "endianity" => 0x65,
        "elemental" => 0x66,
        "pure" => 0x67,
        "recursive" => 0x68,
        "signature" => 0x69,
        "main_subprogram" => 0x6a,
        "data_bit_offset" => 0x6b,
        "const_expr" => 0x6c,
        "enum_class" => 0x6d,
        "linkage_name" => 0x6e,

        "lo_user" => 0x2000,

        "MIPS_fde" => 0x2001,
        "MIPS_loop_begin" => 0x2002,
        "MIPS_tail_loop_begin" => 0x2003,
        "MIPS_epilog_begin" => 0x2004,
        "MIPS_loop_unroll_factor" => 0x2005,
        "MIPS_software_pipeline_depth" => 0x2006,
        "MIPS_linkage_name" => 0x2007,
        "MIPS_stride" => 0x2008,
        "MIPS_abstract_name" => 0x2009,
        "MIPS_clone_origin" => 0x200a,
        "MIPS_has_inlines" => 0x200b,
        "MIPS_stride_byte" => 0x200c,
        "MIPS_stride_elem" => 0x200d,
        "MIPS_ptr_dopetype" => 0x200e,
        "MIPS_allocatable_dopetype" => 0x200f,
        "MIPS_assumed_shape_dopetype" => 0x2010,
        "MIPS_assumed_size" => 0x2011,

        "sf_names" => 0x2101,
        "src_info" => 0x2102,
        "mac_info" => 0x2103,
        "src_coords" => 0x2104,
        "body_begin" => 0x2105,
        "body_end" => 0x2106,
        "GNU_vector" => 0x2107,
        "GNU_template_name" => 0x2110,

        "GNU_call_site_value" => 0x2111,
        "GNU_call_site_data_value" => 0x2112,
        "GNU_call_site_target" => 0x2113,
        "GNU_call_site_target_clobbered" => 0x2114,
        "GNU_tail_call" => 0x2115,
        "GNU_all_tail_call_sites" => 0x2116,
        "GNU_all_call_sites" => 0x2117,
        "GNU_all_source_call_sites" => 0x2118,

        "APPLE_optimized" => 0x3fe1,
        "APPLE_flags" => 0x3fe2,
        "APPLE_isa" => 0x3fe3,
        "APPLE_block" => 0x3fe4,
        "APPLE_major_runtime_vers" => 0x3fe5,
        "APPLE_runtime_class" => 0x3fe6,
        "APPLE_omit_frame_ptr" => 0x3fe7,
        "APPLE_property_name" => 0x3fe8,
        "APPLE_property_getter" => 0x3fe9,
        "APPLE_property_setter" => 0x3fea,
        "APPLE_property_attribute" => 0x3feb,
        "APPLE_objc_complete_type" => 0x3fec,
        "APPLE_property" => 0x3fed,

        "hi_user" => 0x3fff,
    }
}

constant_table! {
    /// `DW_FORM_*` attribute encodings.
    pub static ATTRIBUTE_FORMS: AttributeForm {
        "null" => 0x00,
        "addr" => 0x01,
        "block2" => 0x03,
        "block4" => 0x04,
        "data2" => 0x05,
        "data4" => 0x06,
        "data8" => 0x07,
        "string" => 0x08,
        "block" => 0x09,
        "block1" => 0x0a,
        "data1" => 0x0b,
        "flag" => 0x0c,
        "sdata" => 0x0d,
        "strp" => 0x0e,
        "udata" => 0x0f,
        "ref_addr" => 0x10,
        "ref1" => 0x11,
        "ref2" => 0x12,
        "ref4" => 0x13,
        "ref8" => 0x14,
        "ref_udata" => 0x15,
        "indirect" => 0x16,
        "sec_offset" => 0x17,
        "exprloc" => 0x18,
        "flag_present" => 0x19,
        "ref_sig8" => 0x20,

        "GNU_ref_alt" => 0x1f20,
        "GNU_strp_alt" => 0x1f21,
    }
}

/// Table for `category`.
#[must_use]
pub fn table(category: Category) -> &'static ConstantTable
{
    match category {
        Category::EntityKind => &ENTITY_KINDS,
        Category::HasChildrenFlag => &HAS_CHILDREN_FLAGS,
        Category::AttributeKind => &ATTRIBUTE_KINDS,
        Category::AttributeForm => &ATTRIBUTE_FORMS,
    }
}

/// Name for `(category, code)`, or `None` when the table does not define it.
///
/// Pure and total over `u64`. Callers that want the never-failing tagged
/// result should use [`decode`](crate::decode::decode).
#[must_use]
pub fn lookup(category: Category, code: u64) -> Option<&'static str>
{
    table(category).lookup(code)
}

/// Entries of `category`'s table in declaration order.
#[must_use]
pub fn entries(category: Category) -> &'static [Constant]
{
    table(category).entries()
}

#[cfg(test)]
mod tests
{
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_tables_match_their_category()
    {
        for category in Category::ALL {
            assert_eq!(table(category).category(), category);
            assert!(!table(category).is_empty());
        }
    }

    #[test]
    fn test_names_are_unique_per_table()
    {
        for category in Category::ALL {
            let mut seen = HashSet::new();
            for entry in entries(category) {
                assert!(seen.insert(entry.name), "duplicate {category} name {}", entry.name);
            }
        }
    }

    #[test]
    fn test_codes_fit_declared_width()
    {
        for category in Category::ALL {
            for entry in entries(category) {
                assert!(
                    category.fits(entry.code),
                    "{category}_{} = 0x{:x} exceeds {} bits",
                    entry.name,
                    entry.code,
                    category.code_width_bits()
                );
            }
        }
    }

    #[test]
    fn test_names_carry_no_prefix()
    {
        for category in Category::ALL {
            for entry in entries(category) {
                assert!(!entry.name.starts_with("DW_"), "{} is prefixed", entry.name);
            }
        }
    }

    #[test]
    fn test_last_declared_alias_wins()
    {
        assert_eq!(ENTITY_KINDS.lookup(0x2c), Some("namelist_items"));
        assert_eq!(ATTRIBUTE_KINDS.lookup(0x2e), Some("stride_size"));
        assert_eq!(ATTRIBUTE_KINDS.lookup(0x51), Some("stride"));
    }

    #[test]
    fn test_shadowed_entries()
    {
        let tags: Vec<_> = ENTITY_KINDS.shadowed().map(|entry| entry.name).collect();
        assert_eq!(tags, vec!["namelist_item"]);

        let attrs: Vec<_> = ATTRIBUTE_KINDS.shadowed().map(|entry| entry.name).collect();
        assert_eq!(attrs, vec!["bit_stride", "byte_stride"]);

        assert_eq!(HAS_CHILDREN_FLAGS.shadowed().count(), 0);
        assert_eq!(ATTRIBUTE_FORMS.shadowed().count(), 0);
    }

    #[test]
    fn test_user_bounds_are_entries()
    {
        for category in Category::ALL {
            if let Some(range) = category.user_range() {
                assert_eq!(lookup(category, *range.start()), Some("lo_user"));
                assert_eq!(lookup(category, *range.end()), Some("hi_user"));
            }
        }
    }

    #[test]
    fn test_lookup_absent_code()
    {
        assert_eq!(lookup(Category::HasChildrenFlag, 0x07), None);
        assert_eq!(lookup(Category::EntityKind, 0x06), None);
        assert_eq!(lookup(Category::AttributeForm, u64::MAX), None);
    }
}

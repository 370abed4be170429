//! Tests for the decode/encode contract

use dwconst_core::reverse::{decode_form, form_index};
use dwconst_core::{decode, decode_form_code, encode, entries, init, Category, DecodedSymbol};

#[test]
fn test_round_trip_every_entry()
{
    for category in Category::ALL {
        for entry in entries(category) {
            assert_eq!(encode(category, entry.name), Ok(entry.code), "{category}_{}", entry.name);

            // Aliased codes decode to one fixed name, which encodes back to the same code
            let DecodedSymbol::Known(canonical) = decode(category, entry.code) else {
                panic!("{category} 0x{:x} did not decode", entry.code);
            };
            assert_eq!(encode(category, canonical), Ok(entry.code));
        }
    }
}

#[test]
fn test_round_trip_non_aliased_names()
{
    let aliased = [
        (Category::EntityKind, "namelist_item"),
        (Category::AttributeKind, "bit_stride"),
        (Category::AttributeKind, "byte_stride"),
    ];

    for category in Category::ALL {
        for entry in entries(category) {
            if aliased.contains(&(category, entry.name)) {
                continue;
            }
            assert_eq!(decode(category, entry.code), DecodedSymbol::Known(entry.name));
        }
    }
}

#[test]
fn test_alias_tie_break()
{
    assert_eq!(decode(Category::EntityKind, 0x2c), DecodedSymbol::Known("namelist_items"));
    assert_eq!(decode(Category::AttributeKind, 0x2e), DecodedSymbol::Known("stride_size"));
    assert_eq!(decode(Category::AttributeKind, 0x51), DecodedSymbol::Known("stride"));
}

#[test]
fn test_decode_is_total()
{
    for category in Category::ALL {
        // Every 16-bit code, then a sparse walk over the 32-bit space
        for code in 0..=0x1_0000u64 {
            let _ = decode(category, code);
        }
        for code in (0..(1u64 << 32)).step_by(65_521) {
            let _ = decode(category, code);
        }
        let _ = decode(category, u64::from(u32::MAX));
        let _ = decode(category, u64::MAX);
    }
}

#[test]
fn test_unknown_fidelity()
{
    assert_eq!(decode(Category::HasChildrenFlag, 0x07), DecodedSymbol::Unknown(0x07));

    for category in Category::ALL {
        for code in 0..=0x1_0000u64 {
            let known = entries(category).iter().any(|entry| entry.code == code);
            match decode(category, code) {
                DecodedSymbol::Known(_) => assert!(known, "{category} 0x{code:x} invented a name"),
                DecodedSymbol::Unknown(raw) => {
                    assert!(!known, "{category} 0x{code:x} lost its name");
                    assert_eq!(raw, code);
                }
            }
        }
    }
}

#[test]
fn test_null_sentinels()
{
    assert_eq!(decode(Category::EntityKind, 0x00), DecodedSymbol::Known("null"));
    assert_eq!(decode(Category::AttributeKind, 0x00), DecodedSymbol::Known("null"));
}

#[test]
fn test_user_range_bounds()
{
    assert_eq!(decode(Category::EntityKind, 0x4080), DecodedSymbol::Known("lo_user"));
    assert_eq!(decode(Category::EntityKind, 0xffff), DecodedSymbol::Known("hi_user"));
    assert_eq!(decode(Category::AttributeKind, 0x2000), DecodedSymbol::Known("lo_user"));
    assert_eq!(decode(Category::AttributeKind, 0x3fff), DecodedSymbol::Known("hi_user"));

    // Inside the range but unassigned
    assert_eq!(decode(Category::EntityKind, 0x4081), DecodedSymbol::Unknown(0x4081));
    // Vendor names inside the range
    assert_eq!(decode(Category::EntityKind, 0x4109), DecodedSymbol::Known("GNU_call_site"));
    assert_eq!(decode(Category::AttributeKind, 0x3fe1), DecodedSymbol::Known("APPLE_optimized"));
}

#[test]
fn test_encode_failure()
{
    let err = encode(Category::AttributeForm, "not_a_real_form").unwrap_err();
    assert_eq!(err.category, Category::AttributeForm);
    assert_eq!(err.name, "not_a_real_form");
}

#[test]
fn test_reverse_index_consistency()
{
    init();
    for entry in entries(Category::AttributeForm) {
        assert_eq!(
            decode_form(entry.code),
            decode(Category::AttributeForm, entry.code),
            "DW_FORM 0x{:x}",
            entry.code
        );
        assert_eq!(decode_form_code(entry.code), decode(Category::AttributeForm, entry.code).name());
    }
    assert_eq!(form_index().len(), entries(Category::AttributeForm).len());
}

#[test]
fn test_concurrent_readers()
{
    init();
    let handles: Vec<_> = (0..8u64)
        .map(|worker| {
            std::thread::spawn(move || {
                for code in (worker..0x2000).step_by(8) {
                    assert_eq!(decode_form(code), decode(Category::AttributeForm, code));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

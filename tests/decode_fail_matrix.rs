//! Rejection matrix for the strict decoder, one block per canonical rule,
//! plus the weakened behavior of each switchable check.

use ssz_canon::{
    decode, decode_with_checks, CheckFlags, DecodeError, Field, TypeDescriptor, UintWidth, Value,
};

fn byte_list(max_len: usize) -> TypeDescriptor {
    TypeDescriptor::list(TypeDescriptor::uint(UintWidth::U8), max_len).unwrap()
}

fn two_variant_union() -> TypeDescriptor {
    TypeDescriptor::union(vec![None, Some(TypeDescriptor::uint(UintWidth::U64))]).unwrap()
}

fn two_list_container() -> TypeDescriptor {
    TypeDescriptor::container(vec![
        Field::new("first", byte_list(8)),
        Field::new("second", byte_list(8)),
    ])
    .unwrap()
}

#[test]
fn boolean_rejects_dirty_bytes() {
    let ty = TypeDescriptor::boolean();
    assert_eq!(decode(&ty, &[0x00]).unwrap(), Value::Boolean(false));
    assert_eq!(decode(&ty, &[0x01]).unwrap(), Value::Boolean(true));
    for byte in [0x02u8, 0x80, 0xff] {
        let err = decode(&ty, &[byte]).unwrap_err();
        assert!(matches!(err, DecodeError::DirtyEncoding { .. }), "{err}");
    }
}

#[test]
fn fixed_size_length_is_exact() {
    let ty = TypeDescriptor::uint(UintWidth::U32);
    let err = decode(&ty, &[1, 2, 3]).unwrap_err();
    assert!(matches!(err, DecodeError::LengthMismatch { .. }));
    let err = decode(&ty, &[1, 2, 3, 4, 5]).unwrap_err();
    assert!(matches!(err, DecodeError::LengthMismatch { .. }));
}

#[test]
fn bitvector_rejects_dirty_padding() {
    let ty = TypeDescriptor::bitvector(4).unwrap();
    let err = decode(&ty, &[0x15]).unwrap_err();
    assert!(matches!(err, DecodeError::DirtyPadding { .. }));
    assert_eq!(
        decode(&ty, &[0x05]).unwrap(),
        Value::Bitvector(vec![true, false, true, false])
    );
    let err = decode(&ty, &[0x05, 0x00]).unwrap_err();
    assert!(matches!(err, DecodeError::LengthMismatch { .. }));
}

#[test]
fn bitvector_padding_check_can_be_disabled() {
    let ty = TypeDescriptor::bitvector(4).unwrap();
    let weakened = CheckFlags::strict().without_padding_check();
    assert_eq!(
        decode_with_checks(&ty, &[0x15], weakened).unwrap(),
        Value::Bitvector(vec![true, false, true, false])
    );
}

#[test]
fn bitlist_requires_sentinel() {
    let ty = TypeDescriptor::bitlist(2048).unwrap();
    let err = decode(&ty, &[]).unwrap_err();
    assert!(matches!(err, DecodeError::MissingSentinel { .. }));
    let err = decode(&ty, &[0x00]).unwrap_err();
    assert!(matches!(err, DecodeError::MissingSentinel { .. }));
    // Sentinel never lives in a trailing zero byte.
    let err = decode(&ty, &[0xff, 0x00]).unwrap_err();
    assert!(matches!(err, DecodeError::MissingSentinel { .. }));
    assert_eq!(decode(&ty, &[0x01]).unwrap(), Value::Bitlist(Vec::new()));
}

#[test]
fn bitlist_sentinel_check_can_be_disabled() {
    let ty = TypeDescriptor::bitlist(2048).unwrap();
    let weakened = CheckFlags::strict().without_sentinel_check();
    assert_eq!(
        decode_with_checks(&ty, &[0x00], weakened).unwrap(),
        Value::Bitlist(Vec::new())
    );
    assert_eq!(
        decode_with_checks(&ty, &[], weakened).unwrap(),
        Value::Bitlist(Vec::new())
    );
}

#[test]
fn bitlist_respects_limit() {
    let ty = TypeDescriptor::bitlist(3).unwrap();
    // 0b0001_1111: four data bits below the sentinel at index 4.
    let err = decode(&ty, &[0x1f]).unwrap_err();
    assert!(matches!(err, DecodeError::LimitExceeded { .. }));
    assert_eq!(
        decode(&ty, &[0x0f]).unwrap(),
        Value::Bitlist(vec![true; 3])
    );
}

#[test]
fn union_none_rejects_trailing_data() {
    let ty = two_variant_union();
    assert_eq!(decode(&ty, &[0x00]).unwrap(), Value::union_none(0));
    let err = decode(&ty, &[0x00, 0xaa]).unwrap_err();
    assert!(matches!(err, DecodeError::TrailingData { .. }));
}

#[test]
fn union_trailing_check_can_be_disabled() {
    let ty = two_variant_union();
    let weakened = CheckFlags::strict().without_trailing_check();
    assert_eq!(
        decode_with_checks(&ty, &[0x00, 0xaa, 0xbb], weakened).unwrap(),
        Value::union_none(0)
    );
}

#[test]
fn union_selector_must_be_declared() {
    let ty = two_variant_union();
    let err = decode(&ty, &[0x09]).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidSelector { .. }));
}

#[test]
fn union_requires_selector_byte() {
    let ty = two_variant_union();
    let err = decode(&ty, &[]).unwrap_err();
    assert!(matches!(err, DecodeError::LengthMismatch { .. }));
}

#[test]
fn union_payload_must_consume_remainder() {
    let ty = two_variant_union();
    let err = decode(&ty, &[0x01, 1, 2, 3]).unwrap_err();
    assert!(matches!(err, DecodeError::LengthMismatch { .. }));
    let mut canonical = vec![0x01];
    canonical.extend_from_slice(&7u64.to_le_bytes());
    assert_eq!(
        decode(&ty, &canonical).unwrap(),
        Value::union_some(1, Value::Uint64(7))
    );
}

#[test]
fn container_offsets_must_tile_the_variable_region() {
    let ty = two_list_container();
    // Offsets [8, 8] over 10 bytes: first field empty, second two bytes.
    let bytes = [8, 0, 0, 0, 8, 0, 0, 0, 0xaa, 0xbb];
    assert_eq!(
        decode(&ty, &bytes).unwrap(),
        Value::Container(vec![
            Value::List(Vec::new()),
            Value::List(vec![Value::Uint8(0xaa), Value::Uint8(0xbb)]),
        ])
    );

    // Non-monotonic offsets.
    let bytes = [8, 0, 0, 0, 4, 0, 0, 0, 0xaa, 0xbb];
    let err = decode(&ty, &bytes).unwrap_err();
    assert!(matches!(err, DecodeError::ContainerGap { .. }));

    // First offset past the fixed part leaves unattributed bytes.
    let bytes = [9, 0, 0, 0, 9, 0, 0, 0, 0xaa, 0xbb];
    let err = decode(&ty, &bytes).unwrap_err();
    assert!(matches!(err, DecodeError::ContainerGap { .. }));

    // Last offset beyond the buffer.
    let bytes = [8, 0, 0, 0, 11, 0, 0, 0, 0xaa, 0xbb];
    let err = decode(&ty, &bytes).unwrap_err();
    assert!(matches!(err, DecodeError::ContainerGap { .. }));
}

#[test]
fn container_offset_check_can_be_disabled() {
    let ty = two_list_container();
    let weakened = CheckFlags::strict().without_offset_check();
    let bytes = [8, 0, 0, 0, 4, 0, 0, 0, 0xaa, 0xbb];
    // Clamped segments: the first field collapses to empty, the second
    // swallows bytes 4..10 including the tail of the offset table.
    let decoded = decode_with_checks(&ty, &bytes, weakened).unwrap();
    match decoded {
        Value::Container(fields) => {
            assert_eq!(fields[0], Value::List(Vec::new()));
            assert!(matches!(&fields[1], Value::List(items) if items.len() == 6));
        }
        other => panic!("unexpected value {other:?}"),
    }
}

#[test]
fn container_shorter_than_fixed_part() {
    let ty = two_list_container();
    let err = decode(&ty, &[8, 0, 0, 0]).unwrap_err();
    assert!(matches!(err, DecodeError::LengthMismatch { .. }));
}

#[test]
fn fixed_element_list_divisibility_and_limit() {
    let ty = TypeDescriptor::list(TypeDescriptor::uint(UintWidth::U64), 128).unwrap();
    let err = decode(&ty, &[0u8; 12]).unwrap_err();
    assert!(matches!(err, DecodeError::LengthMismatch { .. }));

    let ty = byte_list(2);
    let err = decode(&ty, &[1, 2, 3]).unwrap_err();
    assert!(matches!(err, DecodeError::LimitExceeded { .. }));
}

#[test]
fn variable_element_list_offset_table() {
    let element = byte_list(4);
    let ty = TypeDescriptor::list(element, 4).unwrap();

    // Empty buffer is the canonical empty list.
    assert_eq!(decode(&ty, &[]).unwrap(), Value::List(Vec::new()));

    // Single empty element: offset table [4], no payload.
    assert_eq!(
        decode(&ty, &[4, 0, 0, 0]).unwrap(),
        Value::List(vec![Value::List(Vec::new())])
    );

    // Misaligned first offset.
    let err = decode(&ty, &[3, 0, 0, 0]).unwrap_err();
    assert!(matches!(err, DecodeError::ContainerGap { .. }));

    // Zero first offset.
    let err = decode(&ty, &[0, 0, 0, 0]).unwrap_err();
    assert!(matches!(err, DecodeError::ContainerGap { .. }));

    // Offset table larger than the buffer.
    let err = decode(&ty, &[8, 0, 0, 0]).unwrap_err();
    assert!(matches!(err, DecodeError::ContainerGap { .. }));

    // Element count over the limit: five offsets for a four-element list.
    let mut bytes = Vec::new();
    for _ in 0..5 {
        bytes.extend_from_slice(&20u32.to_le_bytes());
    }
    let err = decode(&ty, &bytes).unwrap_err();
    assert!(matches!(err, DecodeError::LimitExceeded { .. }));
}

#[test]
fn error_classes_are_distinct() {
    let classes = [
        decode(&TypeDescriptor::boolean(), &[0x02])
            .unwrap_err()
            .class(),
        decode(&TypeDescriptor::bitvector(4).unwrap(), &[0x15])
            .unwrap_err()
            .class(),
        decode(&TypeDescriptor::bitlist(8).unwrap(), &[])
            .unwrap_err()
            .class(),
        decode(&two_variant_union(), &[0x00, 0x01])
            .unwrap_err()
            .class(),
    ];
    assert_eq!(
        classes,
        [
            "dirty-encoding",
            "dirty-padding",
            "missing-sentinel",
            "trailing-data"
        ]
    );
}

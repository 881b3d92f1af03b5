use ssz_canon::{Field, SchemaError, TypeDescriptor, UintWidth};

fn u8_ty() -> TypeDescriptor {
    TypeDescriptor::uint(UintWidth::U8)
}

#[test]
fn zero_lengths_are_configuration_errors() {
    assert!(matches!(
        TypeDescriptor::bytes(0),
        Err(SchemaError::ZeroLength { .. })
    ));
    assert!(matches!(
        TypeDescriptor::vector(u8_ty(), 0),
        Err(SchemaError::ZeroLength { .. })
    ));
    assert!(matches!(
        TypeDescriptor::bitvector(0),
        Err(SchemaError::ZeroLength { .. })
    ));
    assert!(matches!(
        TypeDescriptor::list(u8_ty(), 0),
        Err(SchemaError::ZeroLimit { .. })
    ));
    assert!(matches!(
        TypeDescriptor::bitlist(0),
        Err(SchemaError::ZeroLimit { .. })
    ));
}

#[test]
fn unions_need_addressable_variants() {
    assert!(matches!(
        TypeDescriptor::union(Vec::new()),
        Err(SchemaError::EmptyUnion)
    ));
    let too_many: Vec<Option<TypeDescriptor>> = (0..257).map(|_| Some(u8_ty())).collect();
    assert!(matches!(
        TypeDescriptor::union(too_many),
        Err(SchemaError::TooManyVariants { count: 257 })
    ));
    assert!(TypeDescriptor::union(vec![None, Some(u8_ty())]).is_ok());
}

#[test]
fn containers_need_fields() {
    assert!(matches!(
        TypeDescriptor::container(Vec::new()),
        Err(SchemaError::EmptyContainer)
    ));
}

#[test]
fn fixed_size_queries() {
    let ty = TypeDescriptor::container(vec![
        Field::new("kind", TypeDescriptor::uint(UintWidth::U16)),
        Field::new("flag", TypeDescriptor::boolean()),
    ])
    .unwrap();
    assert!(ty.is_fixed_size());
    assert_eq!(ty.fixed_byte_length(), Some(3));
    assert_eq!(ty.max_byte_length(), 3);

    let ty = TypeDescriptor::bitvector(12).unwrap();
    assert_eq!(ty.fixed_byte_length(), Some(2));

    let ty = TypeDescriptor::vector(u8_ty(), 7).unwrap();
    assert_eq!(ty.fixed_byte_length(), Some(7));
}

#[test]
fn variable_size_queries() {
    let list = TypeDescriptor::list(TypeDescriptor::uint(UintWidth::U64), 4).unwrap();
    assert!(!list.is_fixed_size());
    assert_eq!(list.fixed_byte_length(), None);
    assert_eq!(list.max_byte_length(), 32);

    let bitlist = TypeDescriptor::bitlist(16).unwrap();
    assert_eq!(bitlist.max_byte_length(), 3);

    let union =
        TypeDescriptor::union(vec![None, Some(TypeDescriptor::uint(UintWidth::U64))]).unwrap();
    assert!(!union.is_fixed_size());
    assert_eq!(union.max_byte_length(), 9);

    // A container with one variable field: u16 + offset + payload bound.
    let container = TypeDescriptor::container(vec![
        Field::new("kind", TypeDescriptor::uint(UintWidth::U16)),
        Field::new("payload", TypeDescriptor::list(u8_ty(), 4).unwrap()),
    ])
    .unwrap();
    assert!(!container.is_fixed_size());
    assert_eq!(container.fixed_byte_length(), None);
    assert_eq!(container.max_byte_length(), 10);

    // Vectors inherit variability from their elements.
    let vector = TypeDescriptor::vector(TypeDescriptor::list(u8_ty(), 4).unwrap(), 2).unwrap();
    assert!(!vector.is_fixed_size());
    assert_eq!(vector.max_byte_length(), 16);
}

#[test]
fn chunk_limits_follow_declared_bounds() {
    assert_eq!(
        TypeDescriptor::list(TypeDescriptor::uint(UintWidth::U64), 128)
            .unwrap()
            .chunk_limit(),
        32
    );
    assert_eq!(TypeDescriptor::bitlist(2048).unwrap().chunk_limit(), 8);
    assert_eq!(TypeDescriptor::bytes(33).unwrap().chunk_limit(), 2);
    assert_eq!(
        TypeDescriptor::vector(TypeDescriptor::bytes(32).unwrap(), 5)
            .unwrap()
            .chunk_limit(),
        5
    );
}

#[test]
fn type_names_describe_shapes() {
    assert_eq!(TypeDescriptor::uint(UintWidth::U64).type_name(), "uint64");
    assert_eq!(
        TypeDescriptor::list(u8_ty(), 16).unwrap().type_name(),
        "list[uint8, 16]"
    );
    assert_eq!(
        TypeDescriptor::bitlist(2048).unwrap().type_name(),
        "bitlist[2048]"
    );
}

#[test]
fn descriptors_serialize_for_schema_tooling() {
    let ty = TypeDescriptor::container(vec![
        Field::new("bits", TypeDescriptor::bitlist(2048).unwrap()),
        Field::new("slot", TypeDescriptor::uint(UintWidth::U64)),
    ])
    .unwrap();
    let json = serde_json::to_string(&ty).unwrap();
    let restored: TypeDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, ty);
}

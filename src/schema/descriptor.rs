use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::{SchemaError, SchemaResult};

/// Number of bytes occupied by an offset in the fixed part of a container or
/// variable-size sequence.
pub const OFFSET_BYTES: usize = 4;

/// Width of the little-endian unsigned integers supported by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UintWidth {
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
}

impl UintWidth {
    /// Serialized size of the integer in bytes.
    pub const fn byte_length(self) -> usize {
        match self {
            UintWidth::U8 => 1,
            UintWidth::U16 => 2,
            UintWidth::U32 => 4,
            UintWidth::U64 => 8,
            UintWidth::U128 => 16,
            UintWidth::U256 => 32,
        }
    }

    /// Width of the integer in bits.
    pub const fn bits(self) -> usize {
        self.byte_length() * 8
    }
}

/// Named field inside a [`TypeDescriptor::Container`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name used for diagnostics and schema tooling.
    pub name: String,
    /// Field type, shared so schemas can reuse descriptors.
    pub ty: Arc<TypeDescriptor>,
}

impl Field {
    /// Creates a field from a name and a descriptor.
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty: Arc::new(ty),
        }
    }
}

/// Immutable description of a value's shape.
///
/// Descriptors are built once per schema, validated on construction and
/// shared read-only between concurrent encode, decode and hash calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// Little-endian fixed-size unsigned integer.
    Uint(UintWidth),
    /// Single byte restricted to `0x00` and `0x01`.
    Boolean,
    /// Fixed-length opaque byte sequence.
    Bytes {
        /// Exact byte length.
        length: usize,
    },
    /// Fixed-length homogeneous sequence.
    Vector {
        /// Element type.
        element: Arc<TypeDescriptor>,
        /// Exact element count.
        length: usize,
    },
    /// Exactly `bits` bits packed least-significant-bit first.
    Bitvector {
        /// Exact bit count.
        bits: usize,
    },
    /// Variable-length homogeneous sequence bounded by `max_len`.
    List {
        /// Element type.
        element: Arc<TypeDescriptor>,
        /// Maximum element count.
        max_len: usize,
    },
    /// Variable-length bit sequence terminated by a sentinel bit.
    Bitlist {
        /// Maximum logical bit count (excluding the sentinel).
        max_bits: usize,
    },
    /// One-byte selector followed by the selected variant's payload.
    Union {
        /// Variant types; `None` marks the zero-payload "none" arm.
        variants: Vec<Option<Arc<TypeDescriptor>>>,
    },
    /// Ordered named fields with an offset table for variable parts.
    Container {
        /// Fields in declaration order.
        fields: Vec<Field>,
    },
}

impl TypeDescriptor {
    /// Constructs an unsigned integer descriptor.
    pub fn uint(width: UintWidth) -> Self {
        TypeDescriptor::Uint(width)
    }

    /// Constructs a boolean descriptor.
    pub fn boolean() -> Self {
        TypeDescriptor::Boolean
    }

    /// Constructs a fixed-length byte sequence descriptor.
    pub fn bytes(length: usize) -> SchemaResult<Self> {
        if length == 0 {
            return Err(SchemaError::zero_length("bytes"));
        }
        Ok(TypeDescriptor::Bytes { length })
    }

    /// Constructs a fixed-length vector descriptor.
    pub fn vector(element: TypeDescriptor, length: usize) -> SchemaResult<Self> {
        if length == 0 {
            return Err(SchemaError::zero_length("vector"));
        }
        Ok(TypeDescriptor::Vector {
            element: Arc::new(element),
            length,
        })
    }

    /// Constructs a bitvector descriptor.
    pub fn bitvector(bits: usize) -> SchemaResult<Self> {
        if bits == 0 {
            return Err(SchemaError::zero_length("bitvector"));
        }
        Ok(TypeDescriptor::Bitvector { bits })
    }

    /// Constructs a bounded list descriptor.
    pub fn list(element: TypeDescriptor, max_len: usize) -> SchemaResult<Self> {
        if max_len == 0 {
            return Err(SchemaError::zero_limit("list"));
        }
        Ok(TypeDescriptor::List {
            element: Arc::new(element),
            max_len,
        })
    }

    /// Constructs a bounded bitlist descriptor.
    pub fn bitlist(max_bits: usize) -> SchemaResult<Self> {
        if max_bits == 0 {
            return Err(SchemaError::zero_limit("bitlist"));
        }
        Ok(TypeDescriptor::Bitlist { max_bits })
    }

    /// Constructs a union descriptor from variant types.
    ///
    /// `None` entries denote the zero-payload "none" arm (conventionally at
    /// index 0).
    pub fn union(variants: Vec<Option<TypeDescriptor>>) -> SchemaResult<Self> {
        if variants.is_empty() {
            return Err(SchemaError::EmptyUnion);
        }
        if variants.len() > 256 {
            return Err(SchemaError::TooManyVariants {
                count: variants.len(),
            });
        }
        Ok(TypeDescriptor::Union {
            variants: variants.into_iter().map(|v| v.map(Arc::new)).collect(),
        })
    }

    /// Constructs a container descriptor from ordered fields.
    pub fn container(fields: Vec<Field>) -> SchemaResult<Self> {
        if fields.is_empty() {
            return Err(SchemaError::EmptyContainer);
        }
        Ok(TypeDescriptor::Container { fields })
    }

    /// Returns `true` for types whose serialization occupies exactly one
    /// valid byte length.
    pub fn is_fixed_size(&self) -> bool {
        match self {
            TypeDescriptor::Uint(_)
            | TypeDescriptor::Boolean
            | TypeDescriptor::Bytes { .. }
            | TypeDescriptor::Bitvector { .. } => true,
            TypeDescriptor::Vector { element, .. } => element.is_fixed_size(),
            TypeDescriptor::Container { fields } => {
                fields.iter().all(|field| field.ty.is_fixed_size())
            }
            TypeDescriptor::List { .. }
            | TypeDescriptor::Bitlist { .. }
            | TypeDescriptor::Union { .. } => false,
        }
    }

    /// Exact serialized size, defined only for fixed-size types.
    pub fn fixed_byte_length(&self) -> Option<usize> {
        match self {
            TypeDescriptor::Uint(width) => Some(width.byte_length()),
            TypeDescriptor::Boolean => Some(1),
            TypeDescriptor::Bytes { length } => Some(*length),
            TypeDescriptor::Bitvector { bits } => Some(bits.div_ceil(8)),
            TypeDescriptor::Vector { element, length } => {
                element.fixed_byte_length().map(|elem| elem * length)
            }
            TypeDescriptor::Container { fields } => {
                let mut total = 0usize;
                for field in fields {
                    total += field.ty.fixed_byte_length()?;
                }
                Some(total)
            }
            TypeDescriptor::List { .. }
            | TypeDescriptor::Bitlist { .. }
            | TypeDescriptor::Union { .. } => None,
        }
    }

    /// Largest serialized size any value of this type can occupy, used to
    /// bound offset and length checks.
    pub fn max_byte_length(&self) -> usize {
        match self {
            TypeDescriptor::Uint(width) => width.byte_length(),
            TypeDescriptor::Boolean => 1,
            TypeDescriptor::Bytes { length } => *length,
            TypeDescriptor::Bitvector { bits } => bits.div_ceil(8),
            TypeDescriptor::Vector { element, length } => match element.fixed_byte_length() {
                Some(elem) => elem * length,
                None => (OFFSET_BYTES + element.max_byte_length()) * length,
            },
            TypeDescriptor::List { element, max_len } => match element.fixed_byte_length() {
                Some(elem) => elem * max_len,
                None => (OFFSET_BYTES + element.max_byte_length()) * max_len,
            },
            TypeDescriptor::Bitlist { max_bits } => max_bits / 8 + 1,
            TypeDescriptor::Union { variants } => {
                let payload = variants
                    .iter()
                    .map(|variant| variant.as_ref().map_or(0, |ty| ty.max_byte_length()))
                    .max()
                    .unwrap_or(0);
                1 + payload
            }
            TypeDescriptor::Container { fields } => fields
                .iter()
                .map(|field| match field.ty.fixed_byte_length() {
                    Some(len) => len,
                    None => OFFSET_BYTES + field.ty.max_byte_length(),
                })
                .sum(),
        }
    }

    /// Returns `true` for the basic types whose serialized bytes are packed
    /// tightly into Merkle chunks.
    pub fn is_basic(&self) -> bool {
        matches!(self, TypeDescriptor::Uint(_) | TypeDescriptor::Boolean)
    }

    /// Number of Merkle leaves reserved for this type, independent of the
    /// runtime content of any particular value.
    pub fn chunk_limit(&self) -> usize {
        match self {
            TypeDescriptor::Uint(_) | TypeDescriptor::Boolean => 1,
            TypeDescriptor::Bytes { length } => length.div_ceil(32),
            TypeDescriptor::Bitvector { bits } => bits.div_ceil(256),
            TypeDescriptor::Bitlist { max_bits } => max_bits.div_ceil(256),
            TypeDescriptor::Vector { element, length } => match element.fixed_byte_length() {
                Some(elem) if element.is_basic() => (length * elem).div_ceil(32),
                _ => *length,
            },
            TypeDescriptor::List { element, max_len } => match element.fixed_byte_length() {
                Some(elem) if element.is_basic() => (max_len * elem).div_ceil(32),
                _ => *max_len,
            },
            TypeDescriptor::Union { .. } => 1,
            TypeDescriptor::Container { fields } => fields.len(),
        }
    }

    /// Human-readable type name used in error context.
    pub fn type_name(&self) -> String {
        match self {
            TypeDescriptor::Uint(width) => format!("uint{}", width.bits()),
            TypeDescriptor::Boolean => "boolean".to_string(),
            TypeDescriptor::Bytes { length } => format!("bytes[{length}]"),
            TypeDescriptor::Vector { element, length } => {
                format!("vector[{}, {length}]", element.type_name())
            }
            TypeDescriptor::Bitvector { bits } => format!("bitvector[{bits}]"),
            TypeDescriptor::List { element, max_len } => {
                format!("list[{}, {max_len}]", element.type_name())
            }
            TypeDescriptor::Bitlist { max_bits } => format!("bitlist[{max_bits}]"),
            TypeDescriptor::Union { variants } => format!("union[{}]", variants.len()),
            TypeDescriptor::Container { fields } => format!("container[{}]", fields.len()),
        }
    }
}

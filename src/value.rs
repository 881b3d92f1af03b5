//! Runtime values handled by the codec.
//!
//! Values mirror the descriptor variants one-to-one. They are plain immutable
//! data: decoding produces them, encoding and hashing consume them, and no
//! entity mutates a value that is shared between calls.

use serde::{Deserialize, Serialize};

/// A decoded or caller-supplied value.
///
/// 256-bit integers are carried as 32 little-endian bytes; bit sequences are
/// carried as unpacked booleans in ascending bit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// 8-bit unsigned integer.
    Uint8(u8),
    /// 16-bit unsigned integer.
    Uint16(u16),
    /// 32-bit unsigned integer.
    Uint32(u32),
    /// 64-bit unsigned integer.
    Uint64(u64),
    /// 128-bit unsigned integer.
    Uint128(u128),
    /// 256-bit unsigned integer as little-endian bytes.
    Uint256([u8; 32]),
    /// Boolean flag.
    Boolean(bool),
    /// Fixed-length opaque bytes.
    Bytes(Vec<u8>),
    /// Fixed-length homogeneous sequence.
    Vector(Vec<Value>),
    /// Fixed-length bit sequence.
    Bitvector(Vec<bool>),
    /// Bounded variable-length sequence.
    List(Vec<Value>),
    /// Bounded variable-length bit sequence (sentinel excluded).
    Bitlist(Vec<bool>),
    /// Selected union arm; `value` is `None` for the zero-payload arm.
    Union {
        /// Zero-based variant selector.
        selector: u8,
        /// Payload of the selected variant, absent for the "none" arm.
        value: Option<Box<Value>>,
    },
    /// Ordered container field values.
    Container(Vec<Value>),
}

impl Value {
    /// Convenience constructor for a 64-bit integer.
    pub fn uint64(value: u64) -> Self {
        Value::Uint64(value)
    }

    /// Convenience constructor for the "none" union arm.
    pub fn union_none(selector: u8) -> Self {
        Value::Union {
            selector,
            value: None,
        }
    }

    /// Convenience constructor for a populated union arm.
    pub fn union_some(selector: u8, value: Value) -> Self {
        Value::Union {
            selector,
            value: Some(Box::new(value)),
        }
    }

    /// Short name of the value's own shape, used in error context.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Uint8(_) => "uint8",
            Value::Uint16(_) => "uint16",
            Value::Uint32(_) => "uint32",
            Value::Uint64(_) => "uint64",
            Value::Uint128(_) => "uint128",
            Value::Uint256(_) => "uint256",
            Value::Boolean(_) => "boolean",
            Value::Bytes(_) => "bytes",
            Value::Vector(_) => "vector",
            Value::Bitvector(_) => "bitvector",
            Value::List(_) => "list",
            Value::Bitlist(_) => "bitlist",
            Value::Union { .. } => "union",
            Value::Container(_) => "container",
        }
    }
}

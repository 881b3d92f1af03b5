use crate::schema::{Field, TypeDescriptor, UintWidth, OFFSET_BYTES};
use crate::value::Value;

use super::error::{EncodeError, EncodeResult};

/// Encodes a value into its unique canonical byte representation.
///
/// Fails only when the value does not match the descriptor (wrong shape,
/// wrong arity, length over limit); the produced bytes are always accepted
/// by the strict decoder.
pub fn encode(ty: &TypeDescriptor, value: &Value) -> EncodeResult<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(ty, value, &mut out)?;
    Ok(out)
}

/// Packs bits least-significant-bit first into `ceil(len/8)` bytes.
///
/// Unused high bits of the final byte stay zero.
pub(crate) fn pack_bits(bits: &[bool]) -> Vec<u8> {
    let mut out = vec![0u8; bits.len().div_ceil(8)];
    for (index, bit) in bits.iter().enumerate() {
        if *bit {
            out[index / 8] |= 1 << (index % 8);
        }
    }
    out
}

pub(crate) fn encode_into(
    ty: &TypeDescriptor,
    value: &Value,
    out: &mut Vec<u8>,
) -> EncodeResult<()> {
    match ty {
        TypeDescriptor::Uint(width) => encode_uint(ty, *width, value, out),
        TypeDescriptor::Boolean => match value {
            Value::Boolean(flag) => {
                out.push(*flag as u8);
                Ok(())
            }
            other => Err(type_mismatch(ty, other)),
        },
        TypeDescriptor::Bytes { length } => match value {
            Value::Bytes(bytes) => {
                if bytes.len() != *length {
                    return Err(EncodeError::ArityMismatch {
                        ty: ty.type_name(),
                        expected: *length,
                        actual: bytes.len(),
                    });
                }
                out.extend_from_slice(bytes);
                Ok(())
            }
            other => Err(type_mismatch(ty, other)),
        },
        TypeDescriptor::Vector { element, length } => match value {
            Value::Vector(items) => {
                if items.len() != *length {
                    return Err(EncodeError::ArityMismatch {
                        ty: ty.type_name(),
                        expected: *length,
                        actual: items.len(),
                    });
                }
                encode_sequence(ty, element, items, out)
            }
            other => Err(type_mismatch(ty, other)),
        },
        TypeDescriptor::Bitvector { bits } => match value {
            Value::Bitvector(flags) => {
                if flags.len() != *bits {
                    return Err(EncodeError::ArityMismatch {
                        ty: ty.type_name(),
                        expected: *bits,
                        actual: flags.len(),
                    });
                }
                out.extend_from_slice(&pack_bits(flags));
                Ok(())
            }
            other => Err(type_mismatch(ty, other)),
        },
        TypeDescriptor::List { element, max_len } => match value {
            Value::List(items) => {
                if items.len() > *max_len {
                    return Err(EncodeError::LimitExceeded {
                        ty: ty.type_name(),
                        limit: *max_len,
                        actual: items.len(),
                    });
                }
                encode_sequence(ty, element, items, out)
            }
            other => Err(type_mismatch(ty, other)),
        },
        TypeDescriptor::Bitlist { max_bits } => match value {
            Value::Bitlist(flags) => {
                if flags.len() > *max_bits {
                    return Err(EncodeError::LimitExceeded {
                        ty: ty.type_name(),
                        limit: *max_bits,
                        actual: flags.len(),
                    });
                }
                // Data bits plus the sentinel, which claims one extra byte
                // when the data exactly fills a byte boundary.
                let mut bytes = vec![0u8; flags.len() / 8 + 1];
                for (index, bit) in flags.iter().enumerate() {
                    if *bit {
                        bytes[index / 8] |= 1 << (index % 8);
                    }
                }
                bytes[flags.len() / 8] |= 1 << (flags.len() % 8);
                out.extend_from_slice(&bytes);
                Ok(())
            }
            other => Err(type_mismatch(ty, other)),
        },
        TypeDescriptor::Union { variants } => match value {
            Value::Union { selector, value } => {
                let index = *selector as usize;
                if index >= variants.len() {
                    return Err(EncodeError::SelectorOutOfRange {
                        ty: ty.type_name(),
                        selector: *selector,
                        variants: variants.len(),
                    });
                }
                out.push(*selector);
                match (&variants[index], value) {
                    (None, None) => Ok(()),
                    (Some(variant), Some(payload)) => encode_into(variant, payload, out),
                    (None, Some(_)) => Err(EncodeError::TypeMismatch {
                        ty: ty.type_name(),
                        value: "payload on a none arm",
                    }),
                    (Some(_), None) => Err(EncodeError::TypeMismatch {
                        ty: ty.type_name(),
                        value: "missing union payload",
                    }),
                }
            }
            other => Err(type_mismatch(ty, other)),
        },
        TypeDescriptor::Container { fields } => match value {
            Value::Container(values) => {
                if values.len() != fields.len() {
                    return Err(EncodeError::ArityMismatch {
                        ty: ty.type_name(),
                        expected: fields.len(),
                        actual: values.len(),
                    });
                }
                encode_container(ty, fields, values, out)
            }
            other => Err(type_mismatch(ty, other)),
        },
    }
}

fn encode_uint(
    ty: &TypeDescriptor,
    width: UintWidth,
    value: &Value,
    out: &mut Vec<u8>,
) -> EncodeResult<()> {
    match (width, value) {
        (UintWidth::U8, Value::Uint8(v)) => out.push(*v),
        (UintWidth::U16, Value::Uint16(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (UintWidth::U32, Value::Uint32(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (UintWidth::U64, Value::Uint64(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (UintWidth::U128, Value::Uint128(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (UintWidth::U256, Value::Uint256(v)) => out.extend_from_slice(v),
        (_, other) => return Err(type_mismatch(ty, other)),
    }
    Ok(())
}

/// Serializes homogeneous elements; variable-size elements go through an
/// offset table followed by their concatenated payloads.
fn encode_sequence(
    ty: &TypeDescriptor,
    element: &TypeDescriptor,
    items: &[Value],
    out: &mut Vec<u8>,
) -> EncodeResult<()> {
    if element.is_fixed_size() {
        for item in items {
            encode_into(element, item, out)?;
        }
        return Ok(());
    }
    let mut payloads = Vec::with_capacity(items.len());
    for item in items {
        let mut buf = Vec::new();
        encode_into(element, item, &mut buf)?;
        payloads.push(buf);
    }
    let mut offset = OFFSET_BYTES * items.len();
    for payload in &payloads {
        out.extend_from_slice(&offset_u32(ty, offset)?.to_le_bytes());
        offset += payload.len();
    }
    for payload in &payloads {
        out.extend_from_slice(payload);
    }
    Ok(())
}

fn encode_container(
    ty: &TypeDescriptor,
    fields: &[Field],
    values: &[Value],
    out: &mut Vec<u8>,
) -> EncodeResult<()> {
    let fixed_len: usize = fields
        .iter()
        .map(|field| field.ty.fixed_byte_length().unwrap_or(OFFSET_BYTES))
        .sum();
    let mut fixed = Vec::with_capacity(fixed_len);
    let mut variable: Vec<Vec<u8>> = Vec::new();
    let mut offset = fixed_len;
    for (field, value) in fields.iter().zip(values) {
        if field.ty.is_fixed_size() {
            encode_into(&field.ty, value, &mut fixed)?;
        } else {
            fixed.extend_from_slice(&offset_u32(ty, offset)?.to_le_bytes());
            let mut buf = Vec::new();
            encode_into(&field.ty, value, &mut buf)?;
            offset += buf.len();
            variable.push(buf);
        }
    }
    out.extend_from_slice(&fixed);
    for payload in &variable {
        out.extend_from_slice(payload);
    }
    Ok(())
}

fn offset_u32(ty: &TypeDescriptor, offset: usize) -> EncodeResult<u32> {
    u32::try_from(offset).map_err(|_| EncodeError::OffsetOverflow {
        ty: ty.type_name(),
        offset,
    })
}

fn type_mismatch(ty: &TypeDescriptor, value: &Value) -> EncodeError {
    EncodeError::TypeMismatch {
        ty: ty.type_name(),
        value: value.kind_name(),
    }
}

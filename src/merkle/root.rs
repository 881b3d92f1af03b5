use std::sync::Arc;

use crate::codec::{encode_into, EncodeError, EncodeResult};
use crate::hash::{Digest, NodeHasher};
use crate::schema::{Field, TypeDescriptor};
use crate::value::Value;

use super::chunks::{bits_to_chunks, chunkify, Chunk};
use super::tree::{merkleize, mix_in_length, mix_in_selector};

/// Computes the hash-tree-root of a value.
///
/// Total for well-typed values; the only failures are the same value/shape
/// mismatches the encoder reports, since chunk packing serializes basic
/// elements on the way in.
pub fn hash_tree_root<H: NodeHasher>(ty: &TypeDescriptor, value: &Value) -> EncodeResult<Digest> {
    match ty {
        TypeDescriptor::Uint(_) | TypeDescriptor::Boolean => {
            // A basic value's root is its packed chunk, no hashing involved.
            let mut buf = Vec::with_capacity(32);
            encode_into(ty, value, &mut buf)?;
            let mut chunk: Chunk = [0u8; 32];
            chunk[..buf.len()].copy_from_slice(&buf);
            Ok(Digest::from_bytes(chunk))
        }
        TypeDescriptor::Bytes { .. } | TypeDescriptor::Bitvector { .. } => {
            // Serialized form equals the packed chunk payload for both.
            let mut buf = Vec::new();
            encode_into(ty, value, &mut buf)?;
            Ok(merkleize::<H>(&chunkify(&buf), ty.chunk_limit()))
        }
        TypeDescriptor::Vector { element, length } => match value {
            Value::Vector(items) => {
                if items.len() != *length {
                    return Err(EncodeError::ArityMismatch {
                        ty: ty.type_name(),
                        expected: *length,
                        actual: items.len(),
                    });
                }
                sequence_root::<H>(element, items, ty.chunk_limit())
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
                let root = sequence_root::<H>(element, items, ty.chunk_limit())?;
                Ok(mix_in_length::<H>(&root, items.len() as u64))
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
                // Raw bits only; the serialization sentinel never enters the
                // tree, the length mix-in carries the bit count instead.
                let root = merkleize::<H>(&bits_to_chunks(flags), ty.chunk_limit());
                Ok(mix_in_length::<H>(&root, flags.len() as u64))
            }
            other => Err(type_mismatch(ty, other)),
        },
        TypeDescriptor::Union { variants } => union_root::<H>(ty, variants, value),
        TypeDescriptor::Container { fields } => match value {
            Value::Container(values) => {
                if values.len() != fields.len() {
                    return Err(EncodeError::ArityMismatch {
                        ty: ty.type_name(),
                        expected: fields.len(),
                        actual: values.len(),
                    });
                }
                container_root::<H>(fields, values, ty.chunk_limit())
            }
            other => Err(type_mismatch(ty, other)),
        },
    }
}

/// One chunk sequence for a homogeneous run of elements: basic elements pack
/// tightly into shared chunks, composite elements contribute their own roots.
fn sequence_root<H: NodeHasher>(
    element: &TypeDescriptor,
    items: &[Value],
    chunk_limit: usize,
) -> EncodeResult<Digest> {
    if element.is_basic() {
        let mut buf = Vec::new();
        for item in items {
            encode_into(element, item, &mut buf)?;
        }
        Ok(merkleize::<H>(&chunkify(&buf), chunk_limit))
    } else {
        let mut chunks = Vec::with_capacity(items.len());
        for item in items {
            chunks.push(hash_tree_root::<H>(element, item)?.into_bytes());
        }
        Ok(merkleize::<H>(&chunks, chunk_limit))
    }
}

fn union_root<H: NodeHasher>(
    ty: &TypeDescriptor,
    variants: &[Option<Arc<TypeDescriptor>>],
    value: &Value,
) -> EncodeResult<Digest> {
    let (selector, payload) = match value {
        Value::Union { selector, value } => (*selector, value),
        other => return Err(type_mismatch(ty, other)),
    };
    let index = selector as usize;
    if index >= variants.len() {
        return Err(EncodeError::SelectorOutOfRange {
            ty: ty.type_name(),
            selector,
            variants: variants.len(),
        });
    }
    match (&variants[index], payload) {
        (None, None) => Ok(mix_in_selector::<H>(&Digest::ZERO, selector)),
        (Some(variant), Some(inner)) => {
            let root = hash_tree_root::<H>(variant, inner)?;
            Ok(mix_in_selector::<H>(&root, selector))
        }
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

fn container_root<H: NodeHasher>(
    fields: &[Field],
    values: &[Value],
    chunk_limit: usize,
) -> EncodeResult<Digest> {
    let mut chunks = Vec::with_capacity(fields.len());
    for (field, value) in fields.iter().zip(values) {
        chunks.push(hash_tree_root::<H>(&field.ty, value)?.into_bytes());
    }
    // Container arity is fixed by the schema; no length mix-in.
    Ok(merkleize::<H>(&chunks, chunk_limit))
}

fn type_mismatch(ty: &TypeDescriptor, value: &Value) -> EncodeError {
    EncodeError::TypeMismatch {
        ty: ty.type_name(),
        value: value.kind_name(),
    }
}

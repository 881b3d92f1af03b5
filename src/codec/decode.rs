use crate::schema::{Field, TypeDescriptor, UintWidth, OFFSET_BYTES};
use crate::value::Value;

use super::checks::CheckFlags;
use super::error::{DecodeError, DecodeResult};

/// Decodes a canonical byte representation, rejecting every non-canonical
/// input with a specific error. The full input slice must be consumed.
pub fn decode(ty: &TypeDescriptor, bytes: &[u8]) -> DecodeResult<Value> {
    decode_with_checks(ty, bytes, CheckFlags::strict())
}

/// Decodes with individual canonical checks toggled by `checks`.
///
/// Disabling a check reproduces the corresponding decoder defect class; the
/// strict flag set is the reference behavior.
pub fn decode_with_checks(
    ty: &TypeDescriptor,
    bytes: &[u8],
    checks: CheckFlags,
) -> DecodeResult<Value> {
    Decoder { checks }.decode(ty, bytes, 0)
}

/// Absolute position of one offset-table entry together with its value.
struct OffsetEntry {
    value: usize,
    pos: usize,
}

struct Decoder {
    checks: CheckFlags,
}

impl Decoder {
    /// Recursive descent over exact slices: every call receives precisely the
    /// bytes its value must consume, plus the absolute base offset for error
    /// context.
    fn decode(&self, ty: &TypeDescriptor, bytes: &[u8], base: usize) -> DecodeResult<Value> {
        if let Some(expected) = ty.fixed_byte_length() {
            if bytes.len() != expected {
                return Err(DecodeError::LengthMismatch {
                    ty: ty.type_name(),
                    expected,
                    actual: bytes.len(),
                    offset: base,
                });
            }
            return self.decode_fixed(ty, bytes, base);
        }
        match ty {
            TypeDescriptor::List { element, max_len } => {
                self.decode_list(ty, element, *max_len, bytes, base)
            }
            TypeDescriptor::Vector { element, length } => {
                self.decode_variable_vector(ty, element, *length, bytes, base)
            }
            TypeDescriptor::Bitlist { max_bits } => self.decode_bitlist(ty, *max_bits, bytes, base),
            TypeDescriptor::Union { variants } => self.decode_union(ty, variants, bytes, base),
            TypeDescriptor::Container { fields } => {
                self.decode_variable_container(ty, fields, bytes, base)
            }
            // Fixed-size descriptors were handled above.
            _ => unreachable!("variable decode on fixed-size type"),
        }
    }

    /// Fixed-size types; the caller has already verified the exact length.
    fn decode_fixed(&self, ty: &TypeDescriptor, bytes: &[u8], base: usize) -> DecodeResult<Value> {
        match ty {
            TypeDescriptor::Uint(width) => Ok(decode_uint(*width, bytes)),
            TypeDescriptor::Boolean => match bytes[0] {
                0 => Ok(Value::Boolean(false)),
                1 => Ok(Value::Boolean(true)),
                byte => Err(DecodeError::DirtyEncoding {
                    ty: ty.type_name(),
                    byte,
                    offset: base,
                }),
            },
            TypeDescriptor::Bytes { .. } => Ok(Value::Bytes(bytes.to_vec())),
            TypeDescriptor::Bitvector { bits } => {
                if bits % 8 != 0 {
                    let mask = 0xFFu8 << (bits % 8);
                    if self.checks.padding && bytes[bytes.len() - 1] & mask != 0 {
                        return Err(DecodeError::DirtyPadding {
                            ty: ty.type_name(),
                            offset: base + bytes.len() - 1,
                        });
                    }
                }
                Ok(Value::Bitvector(unpack_bits(bytes, *bits)))
            }
            TypeDescriptor::Vector { element, length } => {
                let elem_size = element
                    .fixed_byte_length()
                    .expect("fixed vector has fixed-size elements");
                let mut items = Vec::with_capacity(*length);
                for (index, chunk) in bytes.chunks_exact(elem_size).enumerate() {
                    items.push(self.decode(element, chunk, base + index * elem_size)?);
                }
                Ok(Value::Vector(items))
            }
            TypeDescriptor::Container { fields } => {
                let mut values = Vec::with_capacity(fields.len());
                let mut pos = 0usize;
                for field in fields {
                    let size = field
                        .ty
                        .fixed_byte_length()
                        .expect("fixed container has fixed-size fields");
                    values.push(self.decode(&field.ty, &bytes[pos..pos + size], base + pos)?);
                    pos += size;
                }
                Ok(Value::Container(values))
            }
            _ => unreachable!("fixed decode on variable-size type"),
        }
    }

    fn decode_list(
        &self,
        ty: &TypeDescriptor,
        element: &TypeDescriptor,
        max_len: usize,
        bytes: &[u8],
        base: usize,
    ) -> DecodeResult<Value> {
        // An empty buffer is the canonical encoding of an empty list, with or
        // without variable-size elements (empty offset table).
        if bytes.is_empty() {
            return Ok(Value::List(Vec::new()));
        }
        if let Some(elem_size) = element.fixed_byte_length() {
            if bytes.len() % elem_size != 0 {
                return Err(DecodeError::LengthMismatch {
                    ty: ty.type_name(),
                    expected: bytes.len() / elem_size * elem_size,
                    actual: bytes.len(),
                    offset: base,
                });
            }
            let count = bytes.len() / elem_size;
            if count > max_len {
                return Err(DecodeError::LimitExceeded {
                    ty: ty.type_name(),
                    limit: max_len,
                    actual: count,
                    offset: base,
                });
            }
            let mut items = Vec::with_capacity(count);
            for (index, chunk) in bytes.chunks_exact(elem_size).enumerate() {
                items.push(self.decode(element, chunk, base + index * elem_size)?);
            }
            return Ok(Value::List(items));
        }

        // Variable-size elements: the first offset determines the table size.
        if bytes.len() < OFFSET_BYTES {
            return Err(DecodeError::ContainerGap {
                ty: ty.type_name(),
                reason: "truncated offset table",
                offset: base,
            });
        }
        let first = read_offset(bytes, 0);
        if self.checks.offsets {
            if first == 0 || first % OFFSET_BYTES != 0 {
                return Err(DecodeError::ContainerGap {
                    ty: ty.type_name(),
                    reason: "misaligned offset table",
                    offset: base,
                });
            }
            if first > bytes.len() {
                return Err(DecodeError::ContainerGap {
                    ty: ty.type_name(),
                    reason: "offset table past end of input",
                    offset: base,
                });
            }
        }
        let mut count = first / OFFSET_BYTES;
        if !self.checks.offsets {
            count = count.min(bytes.len() / OFFSET_BYTES);
        }
        if count > max_len {
            return Err(DecodeError::LimitExceeded {
                ty: ty.type_name(),
                limit: max_len,
                actual: count,
                offset: base,
            });
        }
        let entries: Vec<OffsetEntry> = (0..count)
            .map(|index| OffsetEntry {
                value: read_offset(bytes, index * OFFSET_BYTES),
                pos: base + index * OFFSET_BYTES,
            })
            .collect();
        let segments = self.split_segments(ty, &entries, count * OFFSET_BYTES, bytes.len())?;
        let mut items = Vec::with_capacity(count);
        for (start, end) in segments {
            items.push(self.decode(element, &bytes[start..end], base + start)?);
        }
        Ok(Value::List(items))
    }

    fn decode_variable_vector(
        &self,
        ty: &TypeDescriptor,
        element: &TypeDescriptor,
        length: usize,
        bytes: &[u8],
        base: usize,
    ) -> DecodeResult<Value> {
        let fixed_part = length * OFFSET_BYTES;
        if bytes.len() < fixed_part {
            return Err(DecodeError::LengthMismatch {
                ty: ty.type_name(),
                expected: fixed_part,
                actual: bytes.len(),
                offset: base,
            });
        }
        let entries: Vec<OffsetEntry> = (0..length)
            .map(|index| OffsetEntry {
                value: read_offset(bytes, index * OFFSET_BYTES),
                pos: base + index * OFFSET_BYTES,
            })
            .collect();
        let segments = self.split_segments(ty, &entries, fixed_part, bytes.len())?;
        let mut items = Vec::with_capacity(length);
        for (start, end) in segments {
            items.push(self.decode(element, &bytes[start..end], base + start)?);
        }
        Ok(Value::Vector(items))
    }

    fn decode_bitlist(
        &self,
        ty: &TypeDescriptor,
        max_bits: usize,
        bytes: &[u8],
        base: usize,
    ) -> DecodeResult<Value> {
        if bytes.is_empty() {
            if self.checks.sentinel {
                return Err(DecodeError::MissingSentinel {
                    ty: ty.type_name(),
                    offset: base,
                });
            }
            return Ok(Value::Bitlist(Vec::new()));
        }
        let last = bytes[bytes.len() - 1];
        if last == 0 {
            // A trailing zero byte cannot hold the sentinel; canonical
            // encodings never produce one.
            if self.checks.sentinel {
                return Err(DecodeError::MissingSentinel {
                    ty: ty.type_name(),
                    offset: base + bytes.len() - 1,
                });
            }
            return Ok(Value::Bitlist(Vec::new()));
        }
        let sentinel = 7 - last.leading_zeros() as usize;
        let bit_len = 8 * (bytes.len() - 1) + sentinel;
        if bit_len > max_bits {
            return Err(DecodeError::LimitExceeded {
                ty: ty.type_name(),
                limit: max_bits,
                actual: bit_len,
                offset: base,
            });
        }
        Ok(Value::Bitlist(unpack_bits(bytes, bit_len)))
    }

    fn decode_union(
        &self,
        ty: &TypeDescriptor,
        variants: &[Option<std::sync::Arc<TypeDescriptor>>],
        bytes: &[u8],
        base: usize,
    ) -> DecodeResult<Value> {
        if bytes.is_empty() {
            return Err(DecodeError::LengthMismatch {
                ty: ty.type_name(),
                expected: 1,
                actual: 0,
                offset: base,
            });
        }
        let selector = bytes[0];
        let index = selector as usize;
        if index >= variants.len() {
            return Err(DecodeError::InvalidSelector {
                ty: ty.type_name(),
                selector,
                variants: variants.len(),
                offset: base,
            });
        }
        match &variants[index] {
            None => {
                if self.checks.trailing && bytes.len() > 1 {
                    return Err(DecodeError::TrailingData {
                        ty: ty.type_name(),
                        consumed: 1,
                        remaining: bytes.len() - 1,
                        offset: base + 1,
                    });
                }
                Ok(Value::union_none(selector))
            }
            Some(variant) => {
                let payload = self.decode(variant, &bytes[1..], base + 1)?;
                Ok(Value::union_some(selector, payload))
            }
        }
    }

    fn decode_variable_container(
        &self,
        ty: &TypeDescriptor,
        fields: &[Field],
        bytes: &[u8],
        base: usize,
    ) -> DecodeResult<Value> {
        let fixed_part: usize = fields
            .iter()
            .map(|field| field.ty.fixed_byte_length().unwrap_or(OFFSET_BYTES))
            .sum();
        if bytes.len() < fixed_part {
            return Err(DecodeError::LengthMismatch {
                ty: ty.type_name(),
                expected: fixed_part,
                actual: bytes.len(),
                offset: base,
            });
        }
        let mut values: Vec<Option<Value>> = vec![None; fields.len()];
        let mut entries = Vec::new();
        let mut variable_fields = Vec::new();
        let mut pos = 0usize;
        for (index, field) in fields.iter().enumerate() {
            match field.ty.fixed_byte_length() {
                Some(size) => {
                    values[index] =
                        Some(self.decode(&field.ty, &bytes[pos..pos + size], base + pos)?);
                    pos += size;
                }
                None => {
                    entries.push(OffsetEntry {
                        value: read_offset(bytes, pos),
                        pos: base + pos,
                    });
                    variable_fields.push(index);
                    pos += OFFSET_BYTES;
                }
            }
        }
        let segments = self.split_segments(ty, &entries, fixed_part, bytes.len())?;
        for (field_index, (start, end)) in variable_fields.iter().zip(segments) {
            values[*field_index] =
                Some(self.decode(&fields[*field_index].ty, &bytes[start..end], base + start)?);
        }
        let values = values
            .into_iter()
            .map(|value| value.expect("every container field decoded"))
            .collect();
        Ok(Value::Container(values))
    }

    /// Splits the variable region into one contiguous segment per offset.
    ///
    /// Strict mode enforces the canonical rules: the first offset equals the
    /// fixed-part size, offsets never decrease, the last offset stays inside
    /// the input, and every byte of the variable region belongs to exactly
    /// one segment. With the offset check disabled the segments are merely
    /// clamped into bounds, mirroring lenient decoders that tolerate gaps.
    fn split_segments(
        &self,
        ty: &TypeDescriptor,
        entries: &[OffsetEntry],
        fixed_part: usize,
        total: usize,
    ) -> DecodeResult<Vec<(usize, usize)>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        if self.checks.offsets {
            if entries[0].value != fixed_part {
                return Err(DecodeError::ContainerGap {
                    ty: ty.type_name(),
                    reason: "first offset does not match fixed part size",
                    offset: entries[0].pos,
                });
            }
            for pair in entries.windows(2) {
                if pair[1].value < pair[0].value {
                    return Err(DecodeError::ContainerGap {
                        ty: ty.type_name(),
                        reason: "offsets decrease",
                        offset: pair[1].pos,
                    });
                }
            }
            let last = &entries[entries.len() - 1];
            if last.value > total {
                return Err(DecodeError::ContainerGap {
                    ty: ty.type_name(),
                    reason: "offset past end of input",
                    offset: last.pos,
                });
            }
        }
        let mut segments = Vec::with_capacity(entries.len());
        for index in 0..entries.len() {
            let start = entries[index].value.min(total);
            let end = match entries.get(index + 1) {
                Some(next) => next.value.min(total),
                None => total,
            };
            segments.push((start, end.max(start)));
        }
        Ok(segments)
    }
}

/// Copies an exact-length slice into a fixed array; the caller has already
/// verified the length.
fn le_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

fn decode_uint(width: UintWidth, bytes: &[u8]) -> Value {
    match width {
        UintWidth::U8 => Value::Uint8(bytes[0]),
        UintWidth::U16 => Value::Uint16(u16::from_le_bytes(le_array(bytes))),
        UintWidth::U32 => Value::Uint32(u32::from_le_bytes(le_array(bytes))),
        UintWidth::U64 => Value::Uint64(u64::from_le_bytes(le_array(bytes))),
        UintWidth::U128 => Value::Uint128(u128::from_le_bytes(le_array(bytes))),
        UintWidth::U256 => Value::Uint256(le_array(bytes)),
    }
}

fn read_offset(bytes: &[u8], pos: usize) -> usize {
    u32::from_le_bytes(le_array(&bytes[pos..pos + OFFSET_BYTES])) as usize
}

fn unpack_bits(bytes: &[u8], count: usize) -> Vec<bool> {
    (0..count)
        .map(|index| bytes[index / 8] >> (index % 8) & 1 == 1)
        .collect()
}

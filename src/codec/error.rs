use core::fmt;
use serde::Serialize;

/// Error raised while encoding a value whose shape does not match the
/// descriptor.
///
/// Encode errors are caller mistakes (wrong arity, out-of-range lengths),
/// never wire-format violations; a correct caller cannot trigger them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EncodeError {
    /// The value variant does not correspond to the descriptor.
    TypeMismatch {
        /// Descriptor the caller asked to encode against.
        ty: String,
        /// Shape of the value actually supplied.
        value: &'static str,
    },
    /// A fixed-size sequence carried the wrong number of elements.
    ArityMismatch {
        /// Descriptor being encoded.
        ty: String,
        /// Declared element count.
        expected: usize,
        /// Supplied element count.
        actual: usize,
    },
    /// A list or bitlist exceeded its declared maximum length.
    LimitExceeded {
        /// Descriptor being encoded.
        ty: String,
        /// Declared maximum.
        limit: usize,
        /// Supplied length.
        actual: usize,
    },
    /// A union selector addressed no declared variant.
    SelectorOutOfRange {
        /// Descriptor being encoded.
        ty: String,
        /// Supplied selector byte.
        selector: u8,
        /// Number of declared variants.
        variants: usize,
    },
    /// A variable payload grew past the 4-byte offset range.
    OffsetOverflow {
        /// Descriptor being encoded.
        ty: String,
        /// Offset that no longer fits in `u32`.
        offset: usize,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::TypeMismatch { ty, value } => {
                write!(f, "{ty}: cannot encode a {value} value")
            }
            EncodeError::ArityMismatch {
                ty,
                expected,
                actual,
            } => write!(f, "{ty}: expected {expected} elements, got {actual}"),
            EncodeError::LimitExceeded { ty, limit, actual } => {
                write!(f, "{ty}: length {actual} exceeds limit {limit}")
            }
            EncodeError::SelectorOutOfRange {
                ty,
                selector,
                variants,
            } => write!(f, "{ty}: selector {selector} out of range ({variants} variants)"),
            EncodeError::OffsetOverflow { ty, offset } => {
                write!(f, "{ty}: offset {offset} exceeds u32 range")
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Error raised while decoding non-canonical bytes.
///
/// Every canonical rule the decoder enforces has its own variant so callers
/// (and the fuzzing tooling built on top) can classify rejections precisely.
/// Offsets are absolute positions in the outermost input buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DecodeError {
    /// A fixed-size value arrived with the wrong byte length.
    LengthMismatch {
        /// Descriptor being decoded.
        ty: String,
        /// Exact byte length the descriptor requires.
        expected: usize,
        /// Byte length actually supplied.
        actual: usize,
        /// Absolute offset of the value in the input.
        offset: usize,
    },
    /// A boolean byte was outside `{0x00, 0x01}`.
    DirtyEncoding {
        /// Descriptor being decoded.
        ty: String,
        /// Offending byte.
        byte: u8,
        /// Absolute offset of the byte.
        offset: usize,
    },
    /// Padding bits in a bitvector's final byte were nonzero.
    DirtyPadding {
        /// Descriptor being decoded.
        ty: String,
        /// Absolute offset of the final byte.
        offset: usize,
    },
    /// A bitlist carried no terminating sentinel bit.
    MissingSentinel {
        /// Descriptor being decoded.
        ty: String,
        /// Absolute offset of the bitlist payload.
        offset: usize,
    },
    /// A decoded length or arity exceeded the schema's maximum.
    LimitExceeded {
        /// Descriptor being decoded.
        ty: String,
        /// Declared maximum.
        limit: usize,
        /// Decoded length.
        actual: usize,
        /// Absolute offset of the value.
        offset: usize,
    },
    /// A union selector addressed no declared variant.
    InvalidSelector {
        /// Descriptor being decoded.
        ty: String,
        /// Selector byte found in the input.
        selector: u8,
        /// Number of declared variants.
        variants: usize,
        /// Absolute offset of the selector byte.
        offset: usize,
    },
    /// Bytes remained unconsumed after a value was fully decoded.
    TrailingData {
        /// Descriptor being decoded.
        ty: String,
        /// Bytes consumed by the value.
        consumed: usize,
        /// Bytes left over.
        remaining: usize,
        /// Absolute offset of the first unconsumed byte.
        offset: usize,
    },
    /// An offset table was non-monotonic, out of bounds or left bytes
    /// unattributed.
    ContainerGap {
        /// Descriptor being decoded.
        ty: String,
        /// Specific rule that was violated.
        reason: &'static str,
        /// Absolute offset of the offending offset entry or region.
        offset: usize,
    },
}

impl DecodeError {
    /// Short classifier name, convenient for defect bucketing.
    pub fn class(&self) -> &'static str {
        match self {
            DecodeError::LengthMismatch { .. } => "length-mismatch",
            DecodeError::DirtyEncoding { .. } => "dirty-encoding",
            DecodeError::DirtyPadding { .. } => "dirty-padding",
            DecodeError::MissingSentinel { .. } => "missing-sentinel",
            DecodeError::LimitExceeded { .. } => "limit-exceeded",
            DecodeError::InvalidSelector { .. } => "invalid-selector",
            DecodeError::TrailingData { .. } => "trailing-data",
            DecodeError::ContainerGap { .. } => "container-gap",
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::LengthMismatch {
                ty,
                expected,
                actual,
                offset,
            } => write!(
                f,
                "{ty}: expected {expected} bytes, got {actual} (offset {offset})"
            ),
            DecodeError::DirtyEncoding { ty, byte, offset } => {
                write!(f, "{ty}: invalid byte {byte:#04x} (offset {offset})")
            }
            DecodeError::DirtyPadding { ty, offset } => {
                write!(f, "{ty}: nonzero padding bits (offset {offset})")
            }
            DecodeError::MissingSentinel { ty, offset } => {
                write!(f, "{ty}: no sentinel bit (offset {offset})")
            }
            DecodeError::LimitExceeded {
                ty,
                limit,
                actual,
                offset,
            } => write!(
                f,
                "{ty}: length {actual} exceeds limit {limit} (offset {offset})"
            ),
            DecodeError::InvalidSelector {
                ty,
                selector,
                variants,
                offset,
            } => write!(
                f,
                "{ty}: selector {selector} out of range ({variants} variants, offset {offset})"
            ),
            DecodeError::TrailingData {
                ty,
                consumed,
                remaining,
                offset,
            } => write!(
                f,
                "{ty}: {remaining} trailing bytes after {consumed} consumed (offset {offset})"
            ),
            DecodeError::ContainerGap { ty, reason, offset } => {
                write!(f, "{ty}: {reason} (offset {offset})")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Convenient alias for decode results.
pub type DecodeResult<T> = core::result::Result<T, DecodeError>;

/// Convenient alias for encode results.
pub type EncodeResult<T> = core::result::Result<T, EncodeError>;

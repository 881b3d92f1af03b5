use core::fmt;
use serde::Serialize;

/// Configuration error raised while constructing a type descriptor.
///
/// Schema construction happens once, before any encode/decode traffic, so
/// these errors are fatal to setup rather than part of the runtime decode
/// taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchemaError {
    /// A fixed length (bytes, vector, bitvector) was declared as zero.
    ZeroLength {
        /// Descriptor kind that carried the zero length.
        kind: &'static str,
    },
    /// A list or bitlist limit was declared as zero.
    ZeroLimit {
        /// Descriptor kind that carried the zero limit.
        kind: &'static str,
    },
    /// A union was declared without any variants.
    EmptyUnion,
    /// A union declared more variants than the one-byte selector can address.
    TooManyVariants {
        /// Number of declared variants.
        count: usize,
    },
    /// A container was declared without any fields.
    EmptyContainer,
}

impl SchemaError {
    /// Creates a zero-length error helper.
    pub fn zero_length(kind: &'static str) -> Self {
        SchemaError::ZeroLength { kind }
    }

    /// Creates a zero-limit error helper.
    pub fn zero_limit(kind: &'static str) -> Self {
        SchemaError::ZeroLimit { kind }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::ZeroLength { kind } => {
                write!(f, "{kind} length must be positive")
            }
            SchemaError::ZeroLimit { kind } => {
                write!(f, "{kind} limit must be positive")
            }
            SchemaError::EmptyUnion => write!(f, "union requires at least one variant"),
            SchemaError::TooManyVariants { count } => {
                write!(f, "union declares {count} variants, selector addresses at most 256")
            }
            SchemaError::EmptyContainer => write!(f, "container requires at least one field"),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Convenient alias for schema construction results.
pub type SchemaResult<T> = core::result::Result<T, SchemaError>;

//! Type descriptor model for the canonical codec.
//!
//! Descriptors capture the shape of a value (scalars, bit-packed sequences,
//! tagged unions and offset-addressed containers) and answer the structural
//! queries the encoder, decoder and merkleizer rely on: fixed versus variable
//! size, exact byte width, maximum byte width and Merkle chunk limits.
//! Construction is validated once; descriptors are immutable afterwards.

mod descriptor;
mod error;

pub use descriptor::{Field, TypeDescriptor, UintWidth, OFFSET_BYTES};
pub use error::{SchemaError, SchemaResult};

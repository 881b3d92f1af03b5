//! Canonical binary codec and Merkle-hash engine for a typed, schema-driven
//! serialization format.
//!
//! The crate is split into four pure, synchronous layers:
//!
//! * [`schema`] – immutable type descriptors answering structural queries
//!   (fixed vs. variable size, byte widths, limits, chunk counts).
//! * [`codec`] – the canonical encoder and the strict decoder, whose
//!   individual validations can be switched off through
//!   [`CheckFlags`] to reproduce known decoder defect classes.
//! * [`merkle`] – chunking, zero-padded binary Merkle trees and the
//!   hash-tree-root computation with length and selector mix-ins.
//! * [`hash`] – the digest type and pluggable 256-bit node-hash backends.
//!
//! Descriptors are built once per schema and shared read-only; every
//! encode, decode and hash call works on its own buffers, so any number of
//! calls may run concurrently without synchronization.

pub mod codec;
pub mod hash;
pub mod merkle;
pub mod schema;
pub mod value;

pub use codec::{CheckFlags, DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use hash::{Blake3NodeHasher, DefaultNodeHasher, Digest, NodeHasher, Sha256NodeHasher};
pub use schema::{Field, SchemaError, SchemaResult, TypeDescriptor, UintWidth};
pub use value::Value;

/// Encodes a value into its canonical byte representation.
pub fn encode(ty: &TypeDescriptor, value: &Value) -> EncodeResult<Vec<u8>> {
    codec::encode(ty, value)
}

/// Decodes canonical bytes with all checks enabled.
pub fn decode(ty: &TypeDescriptor, bytes: &[u8]) -> DecodeResult<Value> {
    codec::decode(ty, bytes)
}

/// Decodes with individual canonical checks toggled by `checks`.
pub fn decode_with_checks(
    ty: &TypeDescriptor,
    bytes: &[u8],
    checks: CheckFlags,
) -> DecodeResult<Value> {
    codec::decode_with_checks(ty, bytes, checks)
}

/// Computes the hash-tree-root of a value with the default SHA-256 backend.
pub fn hash_tree_root(ty: &TypeDescriptor, value: &Value) -> EncodeResult<Digest> {
    merkle::hash_tree_root::<DefaultNodeHasher>(ty, value)
}

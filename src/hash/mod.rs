//! Digest type and node-hash backends for the merkleizer.

mod backend;
mod digest;

pub use backend::{Blake3NodeHasher, DefaultNodeHasher, NodeHasher, Sha256NodeHasher};
pub use digest::{Digest, HexDigest};

//! Merkleizer: fixed-size chunking, zero-padded binary trees and length
//! mix-in over canonical values.
//!
//! The lower-level pieces ([`merkleize`], [`mix_in_length`], [`chunkify`])
//! are exported on purpose: differential tooling uses them to reproduce
//! defective root computations (for example, a bare tree root without the
//! length mix-in) next to the correct [`hash_tree_root`].

mod chunks;
mod root;
mod tree;

pub use chunks::{bits_to_chunks, chunkify, Chunk, BYTES_PER_CHUNK};
pub use root::hash_tree_root;
pub use tree::{merkleize, mix_in_length, mix_in_selector};

//! Canonical encoder and decoder.
//!
//! The encoder maps a typed value to its unique byte representation; the
//! decoder maps bytes back, rejecting every non-canonical input with a named
//! error. Decoding is a total function over the whole input slice: any
//! unconsumed tail is itself an error. Both sides are pure transforms over
//! immutable descriptors and values.

mod checks;
mod decode;
mod encode;
mod error;

pub use checks::CheckFlags;
pub use decode::{decode, decode_with_checks};
pub use encode::encode;
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};

pub(crate) use encode::{encode_into, pack_bits};

//! Image artifact encoder
//!
//! Converts raw uploaded images into a single bounded textual payload:
//! thumbnail, JPEG re-encode, base64, joined with a delimiter outside the
//! base64 alphabet. Pure, synchronous, never retried.

mod encoder;

pub use encoder::{encode_many, encode_one, split_payload, EncodedArtifacts};

//! Hexadecimal boundary encoding of keys, digests and signatures.

use crate::{Error, Result};
use alloc::{string::String, vec::Vec};

/// Encode `bytes` as uppercase hexadecimal, two digits per byte.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decode hexadecimal in either case.
///
/// Fails with [`Error::MalformedHex`] on odd length or a non-hex digit.
pub fn hex_to_bytes(encoded: &str) -> Result<Vec<u8>> {
    hex::decode(encoded).map_err(|_| Error::MalformedHex)
}

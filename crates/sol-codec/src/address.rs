//! Base-58 address text at the interface boundary.
//!
//! Addresses are 32-byte values internally; callers exchange them as
//! Base58-encoded text using the standard Bitcoin alphabet (the `bs58`
//! default). No checksum and no hashing step — the 32 bytes ARE the address.

use crate::error::CodecError;

/// Decode a Base58 address string into its 32-byte form.
///
/// Fails with [`CodecError::InvalidParameter`] if the text is not valid
/// Base58 or does not decode to exactly 32 bytes.
pub fn parse_address(address: &str) -> Result<[u8; 32], CodecError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| CodecError::InvalidParameter(format!("base58 decode failed: {e}")))?;

    let arr: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
        CodecError::InvalidParameter(format!("expected 32 address bytes, got {}", v.len()))
    })?;

    Ok(arr)
}

/// Encode 32 address bytes as Base58 text.
pub fn format_address(bytes: &[u8; 32]) -> String {
    bs58::encode(bytes).into_string()
}

/// Check that a string is a well-formed address.
pub fn validate_address(address: &str) -> Result<(), CodecError> {
    parse_address(address).map(|_| ())
}

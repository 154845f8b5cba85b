//! Parsers for raw account blobs fetched from the ledger.
//!
//! Mint and token accounts are fixed-offset layouts; metadata accounts are
//! a fixed 65-byte prefix followed by length-prefixed strings. A blob that
//! ends before the fields it must contain fails with
//! [`CodecError::TruncatedAccountData`]; each parse call stands alone and
//! never affects other decode attempts.

use crate::error::CodecError;
use crate::wire::{read_u32_le, read_u64_le};

/// Minimum mint account length; decimals live at byte 44.
const MINT_MIN_LEN: usize = 45;
const MINT_DECIMALS_OFFSET: usize = 44;

/// Minimum token account length: mint (32) + owner (32) + amount (8).
const TOKEN_ACCOUNT_MIN_LEN: usize = 72;

/// Metadata prefix: 1-byte key tag + 32-byte update authority + 32-byte
/// mint reference.
const METADATA_PREFIX_LEN: usize = 65;

/// The mint fields this layer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintAccountView {
    pub decimals: u8,
}

/// A token account's holdings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAccountView {
    pub mint: [u8; 32],
    pub owner: [u8; 32],
    pub amount: u64,
}

/// The string fields of a metadata account. Decimals are not stored here —
/// they live on the mint account and are composed by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataAccountView {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

/// Parse a mint account blob.
pub fn parse_mint(blob: &[u8]) -> Result<MintAccountView, CodecError> {
    if blob.len() < MINT_MIN_LEN {
        return Err(CodecError::TruncatedAccountData(format!(
            "mint account is {} bytes, need at least {MINT_MIN_LEN}",
            blob.len()
        )));
    }
    Ok(MintAccountView {
        decimals: blob[MINT_DECIMALS_OFFSET],
    })
}

/// Parse a token account blob.
pub fn parse_token_account(blob: &[u8]) -> Result<TokenAccountView, CodecError> {
    if blob.len() < TOKEN_ACCOUNT_MIN_LEN {
        return Err(CodecError::TruncatedAccountData(format!(
            "token account is {} bytes, need at least {TOKEN_ACCOUNT_MIN_LEN}",
            blob.len()
        )));
    }

    let mut mint = [0u8; 32];
    mint.copy_from_slice(&blob[0..32]);
    let mut owner = [0u8; 32];
    owner.copy_from_slice(&blob[32..64]);
    let amount = read_u64_le(blob, 64).ok_or_else(|| {
        CodecError::TruncatedAccountData("token account ended before the amount field".into())
    })?;

    Ok(TokenAccountView {
        mint,
        owner,
        amount,
    })
}

/// Read a u32-length-prefixed UTF-8 string at `offset`.
///
/// Returns the decoded text and the offset immediately past it. Fails with
/// [`CodecError::TruncatedAccountData`] if fewer than 4 bytes remain for
/// the prefix or fewer than `length` bytes follow it, and with
/// [`CodecError::InvalidParameter`] if the bytes are not valid UTF-8.
pub fn read_string(blob: &[u8], offset: usize) -> Result<(String, usize), CodecError> {
    let len = read_u32_le(blob, offset).ok_or_else(|| {
        CodecError::TruncatedAccountData("blob ended while reading a string length".into())
    })? as usize;

    let start = offset + 4;
    let end = start.checked_add(len).filter(|&e| e <= blob.len()).ok_or_else(|| {
        CodecError::TruncatedAccountData(format!(
            "string of {len} bytes does not fit in the remaining blob"
        ))
    })?;

    let text = std::str::from_utf8(&blob[start..end])
        .map_err(|e| CodecError::InvalidParameter(format!("string field is not UTF-8: {e}")))?;

    Ok((text.to_owned(), end))
}

/// Parse a metadata account blob: skip the fixed prefix, then read name,
/// symbol and uri in sequence.
pub fn parse_metadata(blob: &[u8]) -> Result<MetadataAccountView, CodecError> {
    if blob.len() < METADATA_PREFIX_LEN {
        return Err(CodecError::TruncatedAccountData(format!(
            "metadata account is {} bytes, need at least {METADATA_PREFIX_LEN}",
            blob.len()
        )));
    }

    let (name, offset) = read_string(blob, METADATA_PREFIX_LEN)?;
    let (symbol, offset) = read_string(blob, offset)?;
    let (uri, _) = read_string(blob, offset)?;

    Ok(MetadataAccountView { name, symbol, uri })
}

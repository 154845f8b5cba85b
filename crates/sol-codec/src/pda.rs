//! Program-derived address (PDA) computation.
//!
//! A PDA is derived from an ordered seed list and a program id by hashing
//! `seed_0 || .. || seed_n || bump || program_id || "ProgramDerivedAddress"`
//! with SHA-256 and taking the first candidate that is NOT a valid point on
//! the Ed25519 curve. The off-curve property is what makes a PDA safe: no
//! keypair can ever sign for it.
//!
//! Derivation is a pure function of its inputs — no shared state, safe to
//! call concurrently, bounded to at most 256 hash attempts.

use sha2::{Digest, Sha256};

use crate::error::CodecError;
use crate::programs::{ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID};

/// Domain marker appended to every PDA hash input.
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Seed prefix for metadata account derivation.
const METADATA_SEED: &[u8] = b"metadata";

/// Find the program-derived address for `seeds` under `program_id`.
///
/// Iterates bump seeds from 255 down to 0 and returns the first off-curve
/// candidate together with the bump that produced it. Identical inputs
/// always yield the identical `(address, bump)` pair.
///
/// Fails with [`CodecError::AddressDerivationExhausted`] if every bump
/// lands on the curve; the caller must choose different seeds, this
/// function never retries on its own.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &[u8; 32],
) -> Result<([u8; 32], u8), CodecError> {
    for bump in (0u8..=255).rev() {
        if let Some(address) = try_create_program_address(seeds, bump, program_id) {
            return Ok((address, bump));
        }
    }

    Err(CodecError::AddressDerivationExhausted)
}

/// Derive the associated token account address for a wallet + mint pair.
///
/// Seeds are `[wallet, token_program, mint]` under the associated token
/// account program.
pub fn derive_associated_token_address(
    wallet: &[u8; 32],
    mint: &[u8; 32],
) -> Result<[u8; 32], CodecError> {
    find_program_address(
        &[wallet.as_ref(), &TOKEN_PROGRAM_ID, mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .map(|(address, _bump)| address)
}

/// Derive the metadata account address for a mint.
///
/// Seeds are `["metadata", metadata_program, mint]` under the metadata
/// program itself.
pub fn derive_metadata_address(mint: &[u8; 32]) -> Result<[u8; 32], CodecError> {
    find_program_address(
        &[METADATA_SEED, &TOKEN_METADATA_PROGRAM_ID, mint.as_ref()],
        &TOKEN_METADATA_PROGRAM_ID,
    )
    .map(|(address, _bump)| address)
}

/// Hash one candidate for the given bump.
///
/// Returns `Some(address)` if the digest is OFF the Ed25519 curve, `None`
/// if it decompresses to a valid point (try the next bump).
fn try_create_program_address(
    seeds: &[&[u8]],
    bump: u8,
    program_id: &[u8; 32],
) -> Option<[u8; 32]> {
    let mut hasher = Sha256::new();

    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update([bump]);
    hasher.update(program_id);
    hasher.update(PDA_MARKER);

    let hash: [u8; 32] = hasher.finalize().into();

    if is_on_curve(&hash) {
        return None;
    }

    Some(hash)
}

/// Whether 32 bytes decompress to a valid Ed25519 curve point.
fn is_on_curve(bytes: &[u8; 32]) -> bool {
    curve25519_dalek::edwards::CompressedEdwardsY(*bytes)
        .decompress()
        .is_some()
}

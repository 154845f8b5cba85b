//! Transaction message assembly and serialization.
//!
//! The signable message is a compact binary layout:
//!
//! ```text
//! message:
//!   num_required_sigs     u8
//!   num_readonly_signed   u8
//!   num_readonly_unsigned u8
//!   num_accounts          compact-u16
//!   account_keys          32 bytes * num_accounts
//!   recent_blockhash      32 bytes
//!   num_instructions      compact-u16
//!   instructions[]:
//!     program_id_index    u8
//!     num_accounts        compact-u16
//!     account_indices     u8 * num_accounts
//!     data_len            compact-u16
//!     data                u8 * data_len
//! ```
//!
//! Assembly is pure construction: no I/O, no signer checks. Whether every
//! required signature is actually supplied is enforced at the submission
//! boundary, not here. A message is built once per submission attempt — a
//! fresh blockhash means a fresh message.

use crate::error::CodecError;
use crate::instruction::Instruction;
use crate::wire::encode_compact_u16;

/// A message compiled from instructions: account references are deduplicated
/// into one canonically ordered key table and replaced with indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionMessage {
    /// All account keys referenced by this message, in canonical order:
    ///   1. writable signers (fee payer first)
    ///   2. read-only signers
    ///   3. writable non-signers
    ///   4. read-only non-signers
    pub account_keys: Vec<[u8; 32]>,

    /// The first N entries of `account_keys` must sign.
    pub num_required_signatures: u8,
    /// How many of the signing accounts are read-only.
    pub num_readonly_signed: u8,
    /// How many of the non-signing accounts are read-only.
    pub num_readonly_unsigned: u8,

    /// Recent blockhash bounding the message's validity window.
    pub recent_blockhash: [u8; 32],

    /// Instructions with account references compiled to key-table indices.
    pub instructions: Vec<CompiledInstruction>,
}

/// An instruction whose account references are u8 indices into a message's
/// key table. Also the shape in which confirmed transactions come back from
/// the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub account_indices: Vec<u8>,
    pub data: Vec<u8>,
}

impl TransactionMessage {
    /// The accounts that must sign, in signature order.
    pub fn required_signers(&self) -> &[[u8; 32]] {
        &self.account_keys[..self.num_required_signatures as usize]
    }
}

/// Compile `instructions` into a message with `fee_payer` at key index 0.
///
/// Fails with [`CodecError::InvalidParameter`] if the instructions reference
/// more than 256 distinct accounts (indices must fit in a u8).
pub fn assemble(
    fee_payer: &[u8; 32],
    recent_blockhash: &[u8; 32],
    instructions: &[Instruction],
) -> Result<TransactionMessage, CodecError> {
    struct Entry {
        pubkey: [u8; 32],
        is_signer: bool,
        is_writable: bool,
    }

    // Instruction account lists are tiny, so a linear-scan upsert beats a
    // map here and keeps insertion order for the stable sort below.
    let mut entries: Vec<Entry> = Vec::new();
    let mut upsert = |pubkey: [u8; 32], is_signer: bool, is_writable: bool| {
        if let Some(entry) = entries.iter_mut().find(|e| e.pubkey == pubkey) {
            entry.is_signer |= is_signer;
            entry.is_writable |= is_writable;
        } else {
            entries.push(Entry {
                pubkey,
                is_signer,
                is_writable,
            });
        }
    };

    // Fee payer is always a writable signer.
    upsert(*fee_payer, true, true);

    for ix in instructions {
        for meta in &ix.accounts {
            upsert(meta.pubkey, meta.is_signer, meta.is_writable);
        }
        // Program ids are read-only non-signers.
        upsert(ix.program_id, false, false);
    }

    if entries.len() > 256 {
        return Err(CodecError::InvalidParameter(format!(
            "message references {} distinct accounts, limit is 256",
            entries.len()
        )));
    }

    // Stable sort into the canonical category order; insertion order (fee
    // payer first) is preserved within each category.
    entries.sort_by_key(|e| match (e.is_signer, e.is_writable) {
        (true, true) => 0u8,
        (true, false) => 1,
        (false, true) => 2,
        (false, false) => 3,
    });

    let num_required_signatures = entries.iter().filter(|e| e.is_signer).count() as u8;
    let num_readonly_signed = entries
        .iter()
        .filter(|e| e.is_signer && !e.is_writable)
        .count() as u8;
    let num_readonly_unsigned = entries
        .iter()
        .filter(|e| !e.is_signer && !e.is_writable)
        .count() as u8;

    let account_keys: Vec<[u8; 32]> = entries.iter().map(|e| e.pubkey).collect();

    let index_of = |pubkey: &[u8; 32]| -> Result<u8, CodecError> {
        account_keys
            .iter()
            .position(|k| k == pubkey)
            .map(|i| i as u8)
            .ok_or_else(|| {
                CodecError::InvalidParameter("account missing from compiled key table".into())
            })
    };

    let mut compiled = Vec::with_capacity(instructions.len());
    for ix in instructions {
        let program_id_index = index_of(&ix.program_id)?;
        let mut account_indices = Vec::with_capacity(ix.accounts.len());
        for meta in &ix.accounts {
            account_indices.push(index_of(&meta.pubkey)?);
        }
        compiled.push(CompiledInstruction {
            program_id_index,
            account_indices,
            data: ix.data.clone(),
        });
    }

    Ok(TransactionMessage {
        account_keys,
        num_required_signatures,
        num_readonly_signed,
        num_readonly_unsigned,
        recent_blockhash: *recent_blockhash,
        instructions: compiled,
    })
}

/// Serialize the message into the bytes that get signed and submitted.
pub fn serialize_message(message: &TransactionMessage) -> Vec<u8> {
    let mut buf = Vec::with_capacity(256);

    buf.push(message.num_required_signatures);
    buf.push(message.num_readonly_signed);
    buf.push(message.num_readonly_unsigned);

    buf.extend_from_slice(&encode_compact_u16(message.account_keys.len() as u16));
    for key in &message.account_keys {
        buf.extend_from_slice(key);
    }

    buf.extend_from_slice(&message.recent_blockhash);

    buf.extend_from_slice(&encode_compact_u16(message.instructions.len() as u16));
    for ix in &message.instructions {
        buf.push(ix.program_id_index);

        buf.extend_from_slice(&encode_compact_u16(ix.account_indices.len() as u16));
        buf.extend_from_slice(&ix.account_indices);

        buf.extend_from_slice(&encode_compact_u16(ix.data.len() as u16));
        buf.extend_from_slice(&ix.data);
    }

    buf
}

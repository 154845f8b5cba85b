//! Extraction of transfer records from a confirmed transaction's
//! instruction stream.
//!
//! The scan walks outer instructions in order; right after each outer
//! instruction, any inner instructions grouped under that outer index are
//! walked in their given order, so causally related records stay adjacent
//! in the output. Only instructions addressed to the token program are
//! considered; anything that does not decode to a known transfer shape is
//! skipped without aborting the scan, and the skip is counted rather than
//! silently discarded.

use serde::{Deserialize, Serialize};

use crate::address::format_address;
use crate::message::CompiledInstruction;
use crate::wire::{disc, read_u64_le};

/// Which token-program operation a record was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransferKind {
    Transfer,
    TransferChecked,
}

/// A normalized transfer, produced only by decoding. Addresses are Base58
/// text and the amount is decimal text: the wire value is a u64, but text
/// keeps downstream consumers honest about precision regardless of their
/// numeric types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    #[serde(rename = "type")]
    pub kind: TransferKind,
    pub source: String,
    pub destination: String,
    pub authority: String,
    /// Present only for `TransferChecked`; plain `Transfer` does not carry
    /// the mint.
    pub token_mint: Option<String>,
    pub amount: String,
    pub is_inner: bool,
}

/// Inner instructions emitted during execution of one outer instruction,
/// grouped by that instruction's index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerInstructionGroup {
    pub outer_index: usize,
    pub instructions: Vec<CompiledInstruction>,
}

/// The result of one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferScan {
    /// Decoded transfers in encounter order.
    pub transfers: Vec<TransferRecord>,
    /// Token-program instructions that did not decode to a transfer
    /// (unknown discriminator, short data, missing roles). Instructions of
    /// unrelated programs are not counted.
    pub skipped: usize,
}

/// Scan a compiled instruction stream for token transfers.
///
/// `account_table` is the confirmed transaction's key table; every index in
/// `outer` and `inner_groups` resolves against it. The table is read-only
/// for the duration of the call and nothing is cached across calls.
pub fn extract_transfers(
    outer: &[CompiledInstruction],
    inner_groups: &[InnerInstructionGroup],
    account_table: &[[u8; 32]],
    token_program: &[u8; 32],
) -> TransferScan {
    let mut scan = TransferScan::default();

    for (index, ix) in outer.iter().enumerate() {
        decode_into(&mut scan, ix, account_table, token_program, false);

        for group in inner_groups.iter().filter(|g| g.outer_index == index) {
            for inner_ix in &group.instructions {
                decode_into(&mut scan, inner_ix, account_table, token_program, true);
            }
        }
    }

    scan
}

/// Decode one instruction if it belongs to the token program; record the
/// result or the skip.
fn decode_into(
    scan: &mut TransferScan,
    ix: &CompiledInstruction,
    account_table: &[[u8; 32]],
    token_program: &[u8; 32],
    is_inner: bool,
) {
    let program_id = account_table.get(ix.program_id_index as usize);
    if program_id != Some(token_program) {
        return;
    }

    match decode_transfer(ix, account_table, is_inner) {
        Some(record) => scan.transfers.push(record),
        None => {
            scan.skipped += 1;
            log::debug!(
                "skipping token instruction with discriminator {:?} ({} data bytes, {} accounts)",
                ix.data.first(),
                ix.data.len(),
                ix.account_indices.len()
            );
        }
    }
}

/// Decode a single token-program instruction into a record, or `None` if it
/// is not a recognizable transfer.
fn decode_transfer(
    ix: &CompiledInstruction,
    account_table: &[[u8; 32]],
    is_inner: bool,
) -> Option<TransferRecord> {
    match *ix.data.first()? {
        disc::TOKEN_TRANSFER => {
            if ix.data.len() < 9 || ix.account_indices.len() < 3 {
                return None;
            }
            let amount = read_u64_le(&ix.data, 1)?;
            Some(TransferRecord {
                kind: TransferKind::Transfer,
                source: account_text(account_table, ix.account_indices[0])?,
                destination: account_text(account_table, ix.account_indices[1])?,
                authority: account_text(account_table, ix.account_indices[2])?,
                token_mint: None,
                amount: amount.to_string(),
                is_inner,
            })
        }
        disc::TOKEN_TRANSFER_CHECKED => {
            if ix.data.len() < 10 || ix.account_indices.len() < 4 {
                return None;
            }
            // data[9] is the decimals byte; the amount text does not need it.
            let amount = read_u64_le(&ix.data, 1)?;
            Some(TransferRecord {
                kind: TransferKind::TransferChecked,
                source: account_text(account_table, ix.account_indices[0])?,
                destination: account_text(account_table, ix.account_indices[2])?,
                authority: account_text(account_table, ix.account_indices[3])?,
                token_mint: Some(account_text(account_table, ix.account_indices[1])?),
                amount: amount.to_string(),
                is_inner,
            })
        }
        _ => None,
    }
}

fn account_text(account_table: &[[u8; 32]], index: u8) -> Option<String> {
    account_table.get(index as usize).map(format_address)
}

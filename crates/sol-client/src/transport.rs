//! The network boundary.
//!
//! This layer never opens a socket. Everything it needs from the ledger
//! comes through [`Transport`], and every method is called at most once per
//! client operation — retries, timeouts and endpoint selection belong to
//! the implementation.

use sol_codec::{CompiledInstruction, InnerInstructionGroup};

use crate::error::TransportError;

/// A confirmed transaction as returned by the ledger: the account table its
/// compiled instructions index into, the outer instruction stream, and the
/// inner instructions grouped by outer index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmedTransaction {
    pub account_table: Vec<[u8; 32]>,
    pub instructions: Vec<CompiledInstruction>,
    pub inner_instruction_groups: Vec<InnerInstructionGroup>,
}

/// Network access to the ledger.
pub trait Transport {
    /// A recent blockhash to bound a message's validity window.
    fn fetch_recent_blockhash(&self) -> Result<[u8; 32], TransportError>;

    /// Submit a serialized message with its signatures in required-signer
    /// order. Returns the transaction signature id.
    fn submit(&self, message: &[u8], signatures: &[[u8; 64]]) -> Result<String, TransportError>;

    /// Fetch an account's raw data. `Ok(None)` means the account does not
    /// exist, as opposed to a transport failure.
    fn fetch_account_blob(&self, address: &[u8; 32]) -> Result<Option<Vec<u8>>, TransportError>;

    /// Fetch a confirmed transaction by signature id, or `None` if the
    /// ledger does not know it.
    fn fetch_confirmed_transaction(
        &self,
        signature: &str,
    ) -> Result<Option<ConfirmedTransaction>, TransportError>;
}

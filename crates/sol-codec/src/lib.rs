//! Instruction codec and address derivation for a Solana-style account
//! ledger.
//!
//! This crate implements the binary protocol layer by hand — no `solana-sdk`
//! dependency: program-derived address computation, byte-exact instruction
//! encoding for the system, token and metadata programs, transaction-message
//! assembly, account-blob parsing, and extraction of transfer records from
//! confirmed instruction streams (inner instructions included).
//!
//! Everything here is a pure function over its inputs. Network transport and
//! key custody are collaborator concerns and live behind the traits in the
//! `sol-client` crate.

pub mod account_data;
pub mod address;
pub mod decode;
pub mod error;
pub mod instruction;
pub mod message;
pub mod pda;
pub mod programs;
pub mod wire;

// Re-export key public items for ergonomic imports.
pub use account_data::{
    parse_metadata, parse_mint, parse_token_account, read_string, MetadataAccountView,
    MintAccountView, TokenAccountView,
};
pub use address::{format_address, parse_address, validate_address};
pub use decode::{
    extract_transfers, InnerInstructionGroup, TransferKind, TransferRecord, TransferScan,
};
pub use error::CodecError;
pub use instruction::{AccountMeta, Instruction};
pub use message::{assemble, serialize_message, CompiledInstruction, TransactionMessage};
pub use pda::{derive_associated_token_address, derive_metadata_address, find_program_address};
pub use programs::{
    ASSOCIATED_TOKEN_PROGRAM_ID, RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_METADATA_PROGRAM_ID,
    TOKEN_PROGRAM_ID,
};

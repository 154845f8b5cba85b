//! High-level client facade over the `sol-codec` layer.
//!
//! The codec crate is pure computation; this crate wires it to the two
//! effectful collaborators the system needs — a [`Transport`] that talks to
//! the ledger and a [`Signer`] that holds key material — and exposes the
//! token operations a service actually calls: transfer, mint setup,
//! metadata reads and writes, and transfer extraction from confirmed
//! transactions.

pub mod client;
pub mod error;
pub mod signer;
pub mod transport;

pub use client::{Client, TokenMetadata};
pub use error::{ClientError, SignerError, TransportError};
pub use signer::Signer;
pub use transport::{ConfirmedTransaction, Transport};

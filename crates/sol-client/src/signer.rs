//! The key custody boundary.

use crate::error::SignerError;

/// Produces detached signatures over serialized messages.
///
/// The signing secret never crosses into this layer: a signer exposes only
/// its 32-byte address and the 64-byte signatures it emits. Whoever holds
/// the keypair owns its lifecycle and storage.
pub trait Signer {
    /// The address this signer signs for.
    fn address(&self) -> [u8; 32];

    /// Sign the serialized message bytes.
    fn sign(&self, message: &[u8]) -> Result<[u8; 64], SignerError>;
}

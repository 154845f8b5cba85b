use thiserror::Error;

/// Codec layer errors.
///
/// Every failure is reported synchronously to the caller; nothing in this
/// crate retries. Decode-time skips of unrecognized instructions are not
/// errors (see [`crate::decode`]).
#[derive(Debug, Error)]
pub enum CodecError {
    /// All 256 bump candidates landed on the Ed25519 curve. Fatal for this
    /// seed set; the caller must choose different seeds.
    #[error("address derivation exhausted: no off-curve candidate for the given seeds")]
    AddressDerivationExhausted,

    /// An account blob ended before the fixed-offset fields it must contain.
    #[error("truncated account data: {0}")]
    TruncatedAccountData(String),

    /// Malformed input at a construction or parsing boundary.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

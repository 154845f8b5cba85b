use sol_codec::CodecError;
use thiserror::Error;

/// Failure reported by a [`Transport`](crate::transport::Transport)
/// implementation. Retry and backoff are the implementation's business; by
/// the time this surfaces here the operation has failed.
#[derive(Debug, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// Failure reported by a [`Signer`](crate::signer::Signer) implementation.
#[derive(Debug, Error)]
#[error("signer error: {0}")]
pub struct SignerError(pub String);

/// Errors surfaced by the client facade.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Signer(#[from] SignerError),

    /// The message requires a signature from an account no supplied signer
    /// covers. Raised at the submission boundary, never during assembly.
    #[error("missing signature for required signer {0}")]
    MissingSignature(String),

    /// A fetched entity does not exist on the ledger.
    #[error("{0} not found")]
    NotFound(String),
}

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction structure is invalid (e.g. an out-of-range input index).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    /// An error occurred during input signing.
    #[error("signing error: {0}")]
    SigningError(String),
    /// An error occurred during binary/hex serialization or deserialization.
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// The candidate UTXOs cannot cover the requested amount plus fees.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// A spent output's script does not match any signable template, or a
    /// required redeem script could not be resolved.
    #[error("invalid output script")]
    InvalidOutputScript,
    /// An underlying script error (forwarded from `wallet-script`).
    #[error("script error: {0}")]
    Script(#[from] wallet_script::ScriptError),
    /// An underlying primitives error (forwarded from `wallet-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] wallet_primitives::PrimitivesError),
}

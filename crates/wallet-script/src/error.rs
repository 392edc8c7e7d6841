/// Error types for script operations.
///
/// Covers parsing errors and encoding/decoding failures.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Invalid opcode data encountered during ASM parsing.
    #[error("invalid opcode data")]
    InvalidOpcodeData,

    /// Attempted to use AppendOpcodes for a push data opcode.
    #[error("use append_push_data for push data funcs: {0}")]
    InvalidOpcodeType(String),

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Script is empty when a non-empty script was expected.
    #[error("script is empty")]
    EmptyScript,

    /// Not enough data in script to complete a push operation.
    #[error("not enough data")]
    DataTooSmall,

    /// Push data exceeds maximum allowed size.
    #[error("data too big")]
    DataTooBig,

    /// A push data part exceeds protocol limits.
    #[error("part too big '{0}'")]
    PartTooBig(usize),

    /// Script index is out of range.
    #[error("script index out of range")]
    IndexOutOfRange,

    /// Multisig key counts out of range.
    #[error("invalid multisig required/total counts")]
    InvalidMultisigCounts,

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] wallet_primitives::PrimitivesError),
}

/// Wallet SDK - Transaction construction, selection, and signing.
///
/// Provides the Transaction type with inputs, outputs, segwit-aware
/// binary/hex serialization, signature hash computation (legacy and
/// BIP143), UTXO selection, unsigned-transfer building, and signing
/// against a pluggable key provider.

pub mod transaction;
pub mod input;
pub mod output;
pub mod outpoint;
pub mod unspent;
pub mod sighash;
pub mod selector;
pub mod provider;
pub mod signer;
pub mod builder;

mod error;
pub use error::TransactionError;
pub use transaction::Transaction;
pub use input::TransactionInput;
pub use output::TransactionOutput;
pub use outpoint::OutPoint;
pub use unspent::UnspentOutput;
pub use sighash::{SigVersion, SighashType};
pub use selector::UnspentSelector;
pub use provider::{KeyProvider, MemoryKeyProvider};
pub use signer::TransactionSigner;
pub use builder::build_transfer;

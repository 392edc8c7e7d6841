/// Wallet SDK - Cryptographic primitives, hashing, and utilities.
///
/// This crate provides the foundational building blocks for the wallet SDK:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Chain hash type for transaction identification
/// - Elliptic curve cryptography (secp256k1 keys and ECDSA signatures)
/// - Variable-length integer encoding and wire reader/writer

pub mod hash;
pub mod chainhash;
pub mod util;
pub mod ec;

mod error;
pub use error::PrimitivesError;

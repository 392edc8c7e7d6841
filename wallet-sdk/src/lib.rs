#![deny(missing_docs)]

//! UTXO wallet SDK - Complete SDK.
//!
//! Re-exports all wallet SDK components for convenient single-crate usage.

pub use wallet_primitives as primitives;
pub use wallet_script as script;
pub use wallet_transaction as transaction;

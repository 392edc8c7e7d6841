/// Chain-tagged address payloads.
///
/// An `Address` carries the raw hash payload together with the script
/// template it belongs to, so the locking-script builder can match
/// exhaustively. String encodings (Base58Check, bech32) live outside
/// this crate; callers hand over decoded payload bytes.

use std::fmt;

use wallet_primitives::ec::PublicKey;

use crate::Script;

/// An address payload tagged with its script template.
///
/// The variants cover the four standard single-payload output templates.
/// Matching is exhaustive by design: adding a variant forces every
/// consumer to handle it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Address {
    /// Legacy pay-to-public-key-hash (20-byte hash160 of the public key).
    PubkeyHash([u8; 20]),
    /// Legacy pay-to-script-hash (20-byte hash160 of the redeem script).
    ScriptHash([u8; 20]),
    /// Version-0 witness pay-to-public-key-hash (20-byte hash160).
    WitnessPubkeyHash([u8; 20]),
    /// Version-0 witness pay-to-script-hash (32-byte SHA-256).
    WitnessScriptHash([u8; 32]),
}

impl Address {
    /// Create a legacy pubkey-hash address from a public key.
    ///
    /// # Arguments
    /// * `pubkey` - The public key; hash160 of its compressed encoding is used.
    ///
    /// # Returns
    /// An `Address::PubkeyHash`.
    pub fn from_public_key(pubkey: &PublicKey) -> Self {
        Address::PubkeyHash(pubkey.hash160())
    }

    /// The raw payload bytes of this address.
    ///
    /// # Returns
    /// The 20-byte hash for legacy and witness-pubkey payloads, or the
    /// 32-byte hash for witness-script payloads.
    pub fn payload(&self) -> &[u8] {
        match self {
            Address::PubkeyHash(hash)
            | Address::ScriptHash(hash)
            | Address::WitnessPubkeyHash(hash) => hash,
            Address::WitnessScriptHash(hash) => hash,
        }
    }

    /// Build the locking script for this address payload.
    ///
    /// # Returns
    /// The standard output script for the payload's template.
    pub fn locking_script(&self) -> Script {
        match self {
            Address::PubkeyHash(hash) => Script::build_pay_to_public_key_hash(hash),
            Address::ScriptHash(hash) => Script::build_pay_to_script_hash(hash),
            Address::WitnessPubkeyHash(hash) => Script::build_pay_to_witness_pubkey_hash(hash),
            Address::WitnessScriptHash(hash) => Script::build_pay_to_witness_script_hash(hash),
        }
    }
}

impl fmt::Display for Address {
    /// Display the payload as lowercase hex.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.payload()))
    }
}

//! Key lookup for transaction signing.
//!
//! The signer asks a `KeyProvider` for the private key or redeem script
//! matching a hash found in a locking script. `MemoryKeyProvider` is a
//! simple in-memory implementation suitable for wallets that hold their
//! keys locally.

use std::collections::HashMap;

use wallet_primitives::ec::PrivateKey;
use wallet_primitives::hash::hash160;
use wallet_script::Script;

/// Source of private keys and redeem scripts during signing.
///
/// Lookups return `None` when the provider does not hold the requested
/// material; the signer leaves such inputs unsigned.
pub trait KeyProvider {
    /// Find the private key whose public key hashes to `hash` with
    /// HASH160.
    fn key_for_public_key_hash(&self, hash: &[u8]) -> Option<&PrivateKey>;

    /// Find the private key whose serialized public key matches `pubkey`.
    ///
    /// The default implementation hashes the given bytes and delegates to
    /// `key_for_public_key_hash`, which covers both compressed and
    /// uncompressed encodings.
    fn key_for_public_key(&self, pubkey: &[u8]) -> Option<&PrivateKey> {
        self.key_for_public_key_hash(&hash160(pubkey))
    }

    /// Find the redeem or witness script whose HASH160 (or, for witness
    /// programs, the RIPEMD-160 of the SHA-256 program) matches `hash`.
    fn script_for_script_hash(&self, hash: &[u8]) -> Option<&Script>;
}

/// In-memory `KeyProvider` backed by a key list and a script map.
///
/// Key lookups scan the list and compare the HASH160 of each key's
/// compressed public key. Uncompressed spends are still found through the
/// `key_for_public_key` default, which hashes the encoding actually used
/// in the script.
#[derive(Debug, Default)]
pub struct MemoryKeyProvider {
    keys: Vec<PrivateKey>,
    scripts_by_script_hash: HashMap<Vec<u8>, Script>,
}

impl MemoryKeyProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a private key to the provider.
    ///
    /// # Arguments
    /// * `key` - The private key to hold.
    pub fn add_key(&mut self, key: PrivateKey) {
        self.keys.push(key);
    }

    /// Add a redeem or witness script, indexed by the HASH160 of its
    /// serialized bytes.
    ///
    /// # Arguments
    /// * `script` - The script to hold.
    pub fn add_script(&mut self, script: Script) {
        let hash = hash160(script.to_bytes());
        self.scripts_by_script_hash.insert(hash.to_vec(), script);
    }
}

impl KeyProvider for MemoryKeyProvider {
    fn key_for_public_key_hash(&self, hash: &[u8]) -> Option<&PrivateKey> {
        self.keys
            .iter()
            .find(|key| hash160(&key.public_key().to_compressed()).as_slice() == hash)
    }

    fn key_for_public_key(&self, pubkey: &[u8]) -> Option<&PrivateKey> {
        self.keys.iter().find(|key| {
            let public = key.public_key();
            public.to_compressed().as_slice() == pubkey
                || public.to_uncompressed().as_slice() == pubkey
        })
    }

    fn script_for_script_hash(&self, hash: &[u8]) -> Option<&Script> {
        self.scripts_by_script_hash.get(hash)
    }
}

/// Bitcoin Script type - a sequence of opcodes and data pushes.
///
/// Scripts are used in transaction inputs (unlocking) and outputs (locking)
/// to define spending conditions. The Script wraps a `Vec<u8>` and provides
/// methods for construction, standard-template matching and building,
/// serialization, and ASM output.

use std::fmt;

use crate::chunk::{self, decode_script, push_data_prefix, ScriptChunk};
use crate::opcodes::*;
use crate::ScriptError;

/// A Bitcoin script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq)]
pub struct Script(Vec<u8>);

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    ///
    /// # Returns
    /// An empty `Script` instance.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac").
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or an error if the hex is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(hex_str).map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        Ok(Script(bytes))
    }

    /// Create a script from raw bytes.
    ///
    /// # Arguments
    /// * `bytes` - Raw script bytes.
    ///
    /// # Returns
    /// A `Script` wrapping a copy of the given bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Create a script from a Bitcoin ASM string.
    ///
    /// Parses space-separated tokens where known opcodes (e.g. "OP_DUP") are
    /// emitted directly and hex strings are treated as push data.
    ///
    /// # Arguments
    /// * `asm` - A space-separated ASM string.
    ///
    /// # Returns
    /// A `Script`, or an error if any token is invalid.
    pub fn from_asm(asm: &str) -> Result<Self, ScriptError> {
        let mut script = Script::new();
        if asm.is_empty() {
            return Ok(script);
        }
        for section in asm.split(' ') {
            if let Some(opcode) = string_to_opcode(section) {
                script.append_opcodes(&[opcode])?;
            } else {
                script.append_push_data_hex(section)?;
            }
        }
        Ok(script)
    }

    // -----------------------------------------------------------------------
    // Standard template builders
    // -----------------------------------------------------------------------

    /// Build a Pay-to-Public-Key-Hash locking script.
    ///
    /// Layout: OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
    ///
    /// # Arguments
    /// * `hash` - The 20-byte hash160 of the public key.
    ///
    /// # Returns
    /// A 25-byte P2PKH `Script`.
    pub fn build_pay_to_public_key_hash(hash: &[u8; 20]) -> Self {
        let mut bytes = Vec::with_capacity(25);
        bytes.push(OP_DUP);
        bytes.push(OP_HASH160);
        bytes.push(OP_DATA_20);
        bytes.extend_from_slice(hash);
        bytes.push(OP_EQUALVERIFY);
        bytes.push(OP_CHECKSIG);
        Script(bytes)
    }

    /// Build a Pay-to-Script-Hash locking script.
    ///
    /// Layout: OP_HASH160 <20 bytes> OP_EQUAL
    ///
    /// # Arguments
    /// * `hash` - The 20-byte hash160 of the redeem script.
    ///
    /// # Returns
    /// A 23-byte P2SH `Script`.
    pub fn build_pay_to_script_hash(hash: &[u8; 20]) -> Self {
        let mut bytes = Vec::with_capacity(23);
        bytes.push(OP_HASH160);
        bytes.push(OP_DATA_20);
        bytes.extend_from_slice(hash);
        bytes.push(OP_EQUAL);
        Script(bytes)
    }

    /// Build a version-0 Pay-to-Witness-Public-Key-Hash locking script.
    ///
    /// Layout: OP_0 <20 bytes>
    ///
    /// # Arguments
    /// * `hash` - The 20-byte hash160 of the public key.
    ///
    /// # Returns
    /// A 22-byte P2WPKH `Script`.
    pub fn build_pay_to_witness_pubkey_hash(hash: &[u8; 20]) -> Self {
        let mut bytes = Vec::with_capacity(22);
        bytes.push(OP_0);
        bytes.push(OP_DATA_20);
        bytes.extend_from_slice(hash);
        Script(bytes)
    }

    /// Build a version-0 Pay-to-Witness-Script-Hash locking script.
    ///
    /// Layout: OP_0 <32 bytes>
    ///
    /// # Arguments
    /// * `hash` - The 32-byte SHA-256 of the witness script.
    ///
    /// # Returns
    /// A 34-byte P2WSH `Script`.
    pub fn build_pay_to_witness_script_hash(hash: &[u8; 32]) -> Self {
        let mut bytes = Vec::with_capacity(34);
        bytes.push(OP_0);
        bytes.push(OP_DATA_32);
        bytes.extend_from_slice(hash);
        Script(bytes)
    }

    /// Build a bare multisig locking script.
    ///
    /// Layout: OP_m <pubkey>... OP_n OP_CHECKMULTISIG
    ///
    /// # Arguments
    /// * `pubkeys` - The SEC-encoded public keys, in signing order.
    /// * `required` - Number of signatures required (m).
    ///
    /// # Returns
    /// The multisig `Script`, or an error if counts are out of the 1..=16
    /// range or required exceeds the key count.
    pub fn build_multisig(pubkeys: &[Vec<u8>], required: u8) -> Result<Self, ScriptError> {
        let total = pubkeys.len();
        if required == 0 || total == 0 || total > 16 || required as usize > total {
            return Err(ScriptError::InvalidMultisigCounts);
        }
        let m = encode_small_int(required).ok_or(ScriptError::InvalidMultisigCounts)?;
        let n = encode_small_int(total as u8).ok_or(ScriptError::InvalidMultisigCounts)?;

        let mut script = Script(vec![m]);
        for key in pubkeys {
            script.append_push_data(key)?;
        }
        script.0.push(n);
        script.0.push(OP_CHECKMULTISIG);
        Ok(script)
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Encode the script as a hex string.
    ///
    /// # Returns
    /// A lowercase hex representation of the script bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Convert the script to its ASM (human-readable assembly) representation.
    ///
    /// Each opcode or data push is represented as a space-separated token.
    /// Data pushes appear as their hex encoding; opcodes appear by name.
    ///
    /// # Returns
    /// A space-separated ASM string. Returns empty string for empty/invalid scripts.
    pub fn to_asm(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let mut parts = Vec::new();
        let mut pos = 0;
        while pos < self.0.len() {
            match self.read_op(&mut pos) {
                Ok(op) => {
                    let s = op.to_asm_string();
                    if !s.is_empty() {
                        parts.push(s);
                    }
                }
                Err(_) => return String::new(),
            }
        }
        parts.join(" ")
    }

    /// Return a reference to the underlying bytes.
    ///
    /// # Returns
    /// A byte slice of the script contents.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Return the length of the script in bytes.
    ///
    /// # Returns
    /// The number of bytes in the script.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the script is empty (zero bytes).
    ///
    /// # Returns
    /// `true` if the script has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // -----------------------------------------------------------------------
    // Standard template matchers
    // -----------------------------------------------------------------------

    /// Match a Pay-to-Public-Key-Hash output script.
    ///
    /// Pattern: OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
    ///
    /// # Returns
    /// The 20-byte public key hash, or `None` if the script does not match.
    pub fn match_pay_to_pubkey_hash(&self) -> Option<[u8; 20]> {
        let b = &self.0;
        if b.len() == 25
            && b[0] == OP_DUP
            && b[1] == OP_HASH160
            && b[2] == OP_DATA_20
            && b[23] == OP_EQUALVERIFY
            && b[24] == OP_CHECKSIG
        {
            let mut hash = [0u8; 20];
            hash.copy_from_slice(&b[3..23]);
            Some(hash)
        } else {
            None
        }
    }

    /// Match a Pay-to-Public-Key output script.
    ///
    /// Pattern: <pubkey> OP_CHECKSIG, where the pubkey is a 33-byte
    /// compressed or 65-byte uncompressed SEC encoding.
    ///
    /// # Returns
    /// The raw public key bytes, or `None` if the script does not match.
    pub fn match_pay_to_pubkey(&self) -> Option<Vec<u8>> {
        let b = &self.0;
        if b.len() == 67
            && b[0] == OP_DATA_65
            && (b[1] == 0x04 || b[1] == 0x06 || b[1] == 0x07)
            && b[66] == OP_CHECKSIG
        {
            return Some(b[1..66].to_vec());
        }
        if b.len() == 35
            && b[0] == OP_DATA_33
            && (b[1] == 0x02 || b[1] == 0x03)
            && b[34] == OP_CHECKSIG
        {
            return Some(b[1..34].to_vec());
        }
        None
    }

    /// Match a Pay-to-Script-Hash output script.
    ///
    /// Pattern: OP_HASH160 <20 bytes> OP_EQUAL
    ///
    /// # Returns
    /// The 20-byte script hash, or `None` if the script does not match.
    pub fn match_pay_to_script_hash(&self) -> Option<[u8; 20]> {
        let b = &self.0;
        if b.len() == 23 && b[0] == OP_HASH160 && b[1] == OP_DATA_20 && b[22] == OP_EQUAL {
            let mut hash = [0u8; 20];
            hash.copy_from_slice(&b[2..22]);
            Some(hash)
        } else {
            None
        }
    }

    /// Match a version-0 Pay-to-Witness-Public-Key-Hash output script.
    ///
    /// Pattern: OP_0 <20 bytes>
    ///
    /// # Returns
    /// The 20-byte witness program, or `None` if the script does not match.
    pub fn match_pay_to_witness_pubkey_hash(&self) -> Option<[u8; 20]> {
        let b = &self.0;
        if b.len() == 22 && b[0] == OP_0 && b[1] == OP_DATA_20 {
            let mut hash = [0u8; 20];
            hash.copy_from_slice(&b[2..]);
            Some(hash)
        } else {
            None
        }
    }

    /// Match a version-0 Pay-to-Witness-Script-Hash output script.
    ///
    /// Pattern: OP_0 <32 bytes>
    ///
    /// # Returns
    /// The 32-byte witness program, or `None` if the script does not match.
    pub fn match_pay_to_witness_script_hash(&self) -> Option<[u8; 32]> {
        let b = &self.0;
        if b.len() == 34 && b[0] == OP_0 && b[1] == OP_DATA_32 {
            let mut hash = [0u8; 32];
            hash.copy_from_slice(&b[2..]);
            Some(hash)
        } else {
            None
        }
    }

    /// Match a bare multisig output script.
    ///
    /// Pattern: OP_m <pubkey>... OP_n OP_CHECKMULTISIG, where every pushed
    /// key carries a valid SEC prefix and OP_n equals the key count.
    ///
    /// # Returns
    /// The pushed keys and the required signature count, or `None` if the
    /// script does not match.
    pub fn match_multisig(&self) -> Option<(Vec<Vec<u8>>, u8)> {
        let b = &self.0;
        if b.is_empty() || *b.last()? != OP_CHECKMULTISIG {
            return None;
        }

        let mut pos = 0;
        let first = self.read_op(&mut pos).ok()?;
        if !is_small_int_op(first.op) {
            return None;
        }
        let required = decode_small_int(first.op)?;

        let mut keys: Vec<Vec<u8>> = Vec::new();
        let total = loop {
            let op = self.read_op(&mut pos).ok()?;
            match op.data {
                Some(data) if is_valid_pubkey_bytes(&data) => keys.push(data),
                // First non-key chunk must be the OP_n count.
                _ => break decode_small_int(op.op)?,
            }
        };

        if total as usize != keys.len() || total < required {
            return None;
        }

        let last = self.read_op(&mut pos).ok()?;
        if last.op != OP_CHECKMULTISIG || pos != b.len() {
            return None;
        }
        Some((keys, required))
    }

    /// Match a witness program of any version.
    ///
    /// Pattern: version opcode (OP_0 or OP_1..OP_16), then a single direct
    /// push covering the rest of the script (total length 4..=42).
    ///
    /// # Returns
    /// The witness version and program bytes, or `None` if the script is
    /// not a witness program.
    pub fn witness_program(&self) -> Option<(u8, Vec<u8>)> {
        let b = &self.0;
        if b.len() < 4 || b.len() > 42 {
            return None;
        }
        if b[0] != OP_0 && !is_small_int_op(b[0]) {
            return None;
        }
        if b[1] as usize + 2 != b.len() {
            return None;
        }
        let version = decode_small_int(b[0])?;
        Some((version, b[2..].to_vec()))
    }

    /// Check if this is a Pay-to-Public-Key-Hash output script.
    pub fn is_pay_to_pubkey_hash(&self) -> bool {
        self.match_pay_to_pubkey_hash().is_some()
    }

    /// Check if this is a Pay-to-Public-Key output script.
    pub fn is_pay_to_pubkey(&self) -> bool {
        self.match_pay_to_pubkey().is_some()
    }

    /// Check if this is a Pay-to-Script-Hash output script.
    pub fn is_pay_to_script_hash(&self) -> bool {
        self.match_pay_to_script_hash().is_some()
    }

    /// Check if this is a version-0 Pay-to-Witness-Public-Key-Hash script.
    pub fn is_pay_to_witness_pubkey_hash(&self) -> bool {
        self.match_pay_to_witness_pubkey_hash().is_some()
    }

    /// Check if this is a version-0 Pay-to-Witness-Script-Hash script.
    pub fn is_pay_to_witness_script_hash(&self) -> bool {
        self.match_pay_to_witness_script_hash().is_some()
    }

    /// Check if this is a bare multisig output script.
    pub fn is_multisig(&self) -> bool {
        self.match_multisig().is_some()
    }

    /// Check if this is a witness program of any version.
    pub fn is_witness_program(&self) -> bool {
        self.witness_program().is_some()
    }

    // -----------------------------------------------------------------------
    // Data extraction
    // -----------------------------------------------------------------------

    /// Parse the script into a vector of decoded chunks.
    ///
    /// # Returns
    /// A vector of `ScriptChunk` values, or an error if the script is malformed.
    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.0)
    }

    /// Read a single script operation from the given position.
    ///
    /// Advances `pos` past the consumed bytes.
    ///
    /// # Arguments
    /// * `pos` - Mutable reference to the current read position.
    ///
    /// # Returns
    /// The parsed `ScriptChunk`, or an error if the data is truncated.
    pub fn read_op(&self, pos: &mut usize) -> Result<ScriptChunk, ScriptError> {
        chunk::read_op(&self.0, pos)
    }

    // -----------------------------------------------------------------------
    // Mutation / building
    // -----------------------------------------------------------------------

    /// Append data bytes to the script with the proper PUSHDATA prefix.
    ///
    /// Chooses the minimal encoding: direct push for 1-75 bytes,
    /// OP_PUSHDATA1 for 76-255, OP_PUSHDATA2 for 256-65535, etc.
    ///
    /// # Arguments
    /// * `data` - The data bytes to push.
    ///
    /// # Returns
    /// `Ok(())` on success, or an error if the data is too large.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append hex-encoded data to the script with proper PUSHDATA prefix.
    ///
    /// # Arguments
    /// * `hex_str` - Hex string to decode and push.
    ///
    /// # Returns
    /// `Ok(())` on success, or an error if the hex is invalid or data too large.
    pub fn append_push_data_hex(&mut self, hex_str: &str) -> Result<(), ScriptError> {
        let data = hex::decode(hex_str).map_err(|_| ScriptError::InvalidOpcodeData)?;
        self.append_push_data(&data)
    }

    /// Append raw opcodes to the script.
    ///
    /// Rejects push data opcodes (OP_DATA_1..OP_PUSHDATA4) to prevent misuse.
    /// Use `append_push_data` for those.
    ///
    /// # Arguments
    /// * `opcodes` - Slice of opcode bytes to append.
    ///
    /// # Returns
    /// `Ok(())` on success, or an error if a push data opcode is encountered.
    pub fn append_opcodes(&mut self, opcodes: &[u8]) -> Result<(), ScriptError> {
        for &op in opcodes {
            if (OP_DATA_1..=OP_PUSHDATA4).contains(&op) {
                return Err(ScriptError::InvalidOpcodeType(opcode_to_string(op)));
            }
        }
        self.0.extend_from_slice(opcodes);
        Ok(())
    }

    /// Check if this script is byte-equal to another script.
    ///
    /// # Arguments
    /// * `other` - The other script to compare with.
    ///
    /// # Returns
    /// `true` if both scripts have identical bytes.
    pub fn equals(&self, other: &Script) -> bool {
        self.0 == other.0
    }
}

/// Check whether bytes look like a SEC-encoded public key.
///
/// Accepts 33-byte compressed (prefix 0x02/0x03) or 65-byte uncompressed
/// (prefix 0x04/0x06/0x07) encodings.
fn is_valid_pubkey_bytes(bytes: &[u8]) -> bool {
    match bytes.first() {
        Some(0x02) | Some(0x03) => bytes.len() == 33,
        Some(0x04) | Some(0x06) | Some(0x07) => bytes.len() == 65,
        _ => false,
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

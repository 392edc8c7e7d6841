//! Transaction output with value and locking script.
//!
//! Defines the spending conditions for the output's value. Provides
//! binary serialization/deserialization following the Bitcoin wire format.

use wallet_primitives::util::{ByteReader, ByteWriter, VarInt};
use wallet_script::Script;

use crate::TransactionError;

/// A single output in a transaction.
///
/// Each output specifies a `value` in base units and a `locking_script`
/// (scriptPubKey) that defines the conditions under which the funds may be
/// spent. A value of -1 marks the null output used when blanking outputs
/// for SIGHASH_SINGLE digests.
///
/// # Wire format
///
/// | Field            | Size           |
/// |------------------|----------------|
/// | value            | 8 bytes (LE)   |
/// | script length    | VarInt         |
/// | locking_script   | variable       |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOutput {
    /// The amount locked by this output, in base units.
    pub value: i64,

    /// The locking script (scriptPubKey) that defines spending conditions.
    pub locking_script: Script,
}

impl TransactionOutput {
    /// Create a new `TransactionOutput` with the given value and script.
    ///
    /// # Arguments
    /// * `value` - The amount in base units.
    /// * `locking_script` - The locking script.
    ///
    /// # Returns
    /// A new `TransactionOutput`.
    pub fn new(value: i64, locking_script: Script) -> Self {
        TransactionOutput {
            value,
            locking_script,
        }
    }

    /// Create the null output used when blanking outputs for
    /// SIGHASH_SINGLE digests.
    ///
    /// # Returns
    /// A `TransactionOutput` with value -1 and an empty script.
    pub fn null() -> Self {
        TransactionOutput {
            value: -1,
            locking_script: Script::new(),
        }
    }

    /// Deserialize a `TransactionOutput` from a `ByteReader`.
    ///
    /// Reads the 8-byte LE value, a varint script length, and the script bytes.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded output.
    ///
    /// # Returns
    /// `Ok(TransactionOutput)` on success, or a `TransactionError` if the
    /// data is truncated or malformed.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let value = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading output value: {}", e))
        })? as i64;

        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;

        let script_bytes = reader.read_bytes(script_len.value() as usize).map_err(|e| {
            TransactionError::SerializationError(format!("reading locking script: {}", e))
        })?;

        Ok(TransactionOutput {
            value,
            locking_script: Script::from_bytes(script_bytes),
        })
    }

    /// Serialize this `TransactionOutput` into a `ByteWriter`.
    ///
    /// Writes the 8-byte LE value, a varint script length, and the script.
    ///
    /// # Arguments
    /// * `writer` - The writer to append serialized bytes to.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u64_le(self.value as u64);
        let script_bytes = self.locking_script.to_bytes();
        writer.write_varint(VarInt::from(script_bytes.len()));
        writer.write_bytes(script_bytes);
    }

    /// Serialize this output to a byte vector.
    ///
    /// # Returns
    /// A `Vec<u8>` containing the wire-format bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}

impl Default for TransactionOutput {
    fn default() -> Self {
        TransactionOutput {
            value: 0,
            locking_script: Script::new(),
        }
    }
}

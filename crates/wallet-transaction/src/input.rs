//! Transaction input referencing a previous output.
//!
//! Contains the outpoint being spent, the unlocking script, the sequence
//! number, and the segregated witness stack. Provides binary
//! serialization/deserialization following the Bitcoin wire format; the
//! witness stack is serialized separately by the transaction codec.

use wallet_primitives::util::{ByteReader, ByteWriter, VarInt};
use wallet_script::Script;

use crate::outpoint::OutPoint;
use crate::TransactionError;

/// Default sequence number indicating a finalized input (no relative lock-time).
pub const DEFAULT_SEQUENCE: u32 = 0xFFFF_FFFF;

/// A single input in a transaction.
///
/// Each input references an output of a previous transaction through its
/// `previous_output` outpoint. The `unlocking_script` (scriptSig) supplies
/// the data required to satisfy the referenced output's locking script; an
/// empty script means the input has not been signed. The `witness` stack
/// carries segregated witness items and is empty for non-witness inputs.
///
/// # Wire format (base, without witness)
///
/// | Field            | Size             |
/// |------------------|------------------|
/// | previous_output  | 36 bytes         |
/// | script length    | VarInt           |
/// | unlocking_script | variable         |
/// | sequence         | 4 bytes (LE)     |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    /// The outpoint of the output being spent.
    pub previous_output: OutPoint,

    /// The unlocking script (scriptSig) that proves authorization.
    /// Empty when the input has not yet been signed.
    pub unlocking_script: Script,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence: u32,

    /// Segregated witness stack items, in push order.
    /// Empty for non-witness inputs.
    pub witness: Vec<Vec<u8>>,
}

impl TransactionInput {
    /// Create a new unsigned input spending the given outpoint.
    ///
    /// The unlocking script is empty, the sequence is finalized, and the
    /// witness stack is empty.
    ///
    /// # Arguments
    /// * `previous_output` - The outpoint of the output being spent.
    ///
    /// # Returns
    /// A new `TransactionInput`.
    pub fn new(previous_output: OutPoint) -> Self {
        TransactionInput {
            previous_output,
            unlocking_script: Script::new(),
            sequence: DEFAULT_SEQUENCE,
            witness: Vec::new(),
        }
    }

    /// Deserialize a `TransactionInput` from a `ByteReader`.
    ///
    /// Reads the base wire format: outpoint, varint-prefixed unlocking
    /// script, and 4-byte sequence number. The witness stack, when present,
    /// is read separately by the transaction codec.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded input.
    ///
    /// # Returns
    /// `Ok(TransactionInput)` on success, or a `TransactionError` if the
    /// data is truncated or malformed.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let previous_output = OutPoint::read_from(reader)?;

        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;

        let script_bytes = reader.read_bytes(script_len.value() as usize).map_err(|e| {
            TransactionError::SerializationError(format!("reading unlocking script: {}", e))
        })?;

        let sequence = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence number: {}", e))
        })?;

        Ok(TransactionInput {
            previous_output,
            unlocking_script: Script::from_bytes(script_bytes),
            sequence,
            witness: Vec::new(),
        })
    }

    /// Serialize this `TransactionInput` into a `ByteWriter`.
    ///
    /// Writes the base wire format: outpoint, varint script length, script
    /// bytes, and sequence number. The witness stack is written separately
    /// by the transaction codec.
    ///
    /// # Arguments
    /// * `writer` - The writer to append serialized bytes to.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        self.previous_output.write_to(writer);
        let script_bytes = self.unlocking_script.to_bytes();
        writer.write_varint(VarInt::from(script_bytes.len()));
        writer.write_bytes(script_bytes);
        writer.write_u32_le(self.sequence);
    }

    /// Read this input's witness stack from a `ByteReader`.
    ///
    /// Format: varint item count, then each item varint-length-prefixed.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of the witness stack.
    ///
    /// # Returns
    /// `Ok(())` on success, or a `TransactionError` if the data is truncated.
    pub fn read_witness_from(&mut self, reader: &mut ByteReader) -> Result<(), TransactionError> {
        let item_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading witness item count: {}", e))
        })?;

        let mut witness = Vec::with_capacity(item_count.value() as usize);
        for _ in 0..item_count.value() {
            let item_len = reader.read_varint().map_err(|e| {
                TransactionError::SerializationError(format!("reading witness item length: {}", e))
            })?;
            let item = reader.read_bytes(item_len.value() as usize).map_err(|e| {
                TransactionError::SerializationError(format!("reading witness item: {}", e))
            })?;
            witness.push(item.to_vec());
        }

        self.witness = witness;
        Ok(())
    }

    /// Write this input's witness stack into a `ByteWriter`.
    ///
    /// Format: varint item count, then each item varint-length-prefixed.
    ///
    /// # Arguments
    /// * `writer` - The writer to append serialized bytes to.
    pub fn write_witness_to(&self, writer: &mut ByteWriter) {
        writer.write_varint(VarInt::from(self.witness.len()));
        for item in &self.witness {
            writer.write_varint(VarInt::from(item.len()));
            writer.write_bytes(item);
        }
    }
}

impl Default for TransactionInput {
    fn default() -> Self {
        Self::new(OutPoint::null())
    }
}

//! Core transaction type.
//!
//! Represents a complete transaction with version, inputs, outputs, and
//! lock time. Supports binary and hex serialization including the
//! segregated-witness extension, transaction ID computation, and
//! builder-pattern methods for adding inputs and outputs.

use wallet_primitives::hash::sha256d;
use wallet_primitives::util::{ByteReader, ByteWriter, VarInt};

use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::TransactionError;

/// Marker byte signalling the extended (witness) serialization format.
const SEGWIT_MARKER: u8 = 0x00;
/// Flag byte following the marker; only the value 1 is defined.
const SEGWIT_FLAG: u8 = 0x01;

/// A transaction consisting of a version, a set of inputs, a set of
/// outputs, and a lock time.
///
/// # Wire format
///
/// | Field          | Size                                  |
/// |----------------|---------------------------------------|
/// | version        | 4 bytes (LE, signed)                  |
/// | marker + flag  | 2 bytes (only when a witness present) |
/// | input count    | VarInt                                |
/// | inputs         | variable (per input)                  |
/// | output count   | VarInt                                |
/// | outputs        | variable (per output)                 |
/// | witness stacks | per input (only when marker present)  |
/// | lock_time      | 4 bytes (LE)                          |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction format version. Currently 1 or 2.
    pub version: i32,

    /// Ordered list of transaction inputs.
    pub inputs: Vec<TransactionInput>,

    /// Ordered list of transaction outputs.
    pub outputs: Vec<TransactionOutput>,

    /// Lock time. If non-zero, the transaction is not valid until the
    /// specified block height or Unix timestamp.
    pub lock_time: u32,
}

impl Transaction {
    /// Create a new empty transaction with version 1 and lock time 0.
    ///
    /// # Returns
    /// A `Transaction` with no inputs or outputs.
    pub fn new() -> Self {
        Transaction {
            version: 1,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of the raw transaction bytes.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` if the hex is
    /// invalid or the bytes do not form a valid transaction.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| TransactionError::SerializationError(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// This method requires the byte slice to contain exactly one complete
    /// transaction with no trailing data.
    ///
    /// # Arguments
    /// * `bytes` - The raw transaction bytes.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` if the data
    /// is truncated, malformed, or has trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize a transaction from a `ByteReader`.
    ///
    /// Reads the version, input count, inputs, output count, outputs, and
    /// lock time in standard wire format. A zero input count signals the
    /// extended format: the next byte is the witness flag (must be 1), the
    /// real input count follows, and per-input witness stacks appear
    /// between the outputs and the lock time.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of a serialized transaction.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` on I/O or
    /// format errors.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let version = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading version: {}", e))
        })? as i32;

        let mut input_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading input count: {}", e))
        })?;

        // A zero "input count" is read as the segwit marker; the flag and
        // real count follow. A legacy transaction with literally zero
        // inputs is indistinguishable from the marker and cannot be
        // parsed; transactions carry at least one input.
        let mut extended = false;
        if input_count.value() == 0 {
            let flag = reader.read_u8().map_err(|e| {
                TransactionError::SerializationError(format!("reading segwit flag: {}", e))
            })?;
            if flag != SEGWIT_FLAG {
                return Err(TransactionError::SerializationError(format!(
                    "unsupported segwit flag {}",
                    flag
                )));
            }
            extended = true;
            input_count = reader.read_varint().map_err(|e| {
                TransactionError::SerializationError(format!("reading input count: {}", e))
            })?;
        }

        let mut inputs = Vec::with_capacity(input_count.value() as usize);
        for _ in 0..input_count.value() {
            inputs.push(TransactionInput::read_from(reader)?);
        }

        let output_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading output count: {}", e))
        })?;

        let mut outputs = Vec::with_capacity(output_count.value() as usize);
        for _ in 0..output_count.value() {
            outputs.push(TransactionOutput::read_from(reader)?);
        }

        if extended {
            for input in &mut inputs {
                input.read_witness_from(reader)?;
            }
        }

        let lock_time = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading lock time: {}", e))
        })?;

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize this transaction to raw bytes.
    ///
    /// When any input carries a witness stack, the extended format is
    /// emitted: marker + flag after the version and per-input witness
    /// stacks before the lock time.
    ///
    /// # Returns
    /// A `Vec<u8>` containing the wire-format bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let witness = self.has_witness();

        let mut writer = ByteWriter::with_capacity(256);
        writer.write_u32_le(self.version as u32);

        if witness {
            writer.write_u8(SEGWIT_MARKER);
            writer.write_u8(SEGWIT_FLAG);
        }

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(&mut writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(&mut writer);
        }

        if witness {
            for input in &self.inputs {
                input.write_witness_to(&mut writer);
            }
        }

        writer.write_u32_le(self.lock_time);
        writer.into_bytes()
    }

    /// Serialize this transaction to a hex string.
    ///
    /// # Returns
    /// A lowercase hex-encoded string of the raw bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Check whether any input carries a witness stack.
    ///
    /// # Returns
    /// `true` if at least one input has witness items.
    pub fn has_witness(&self) -> bool {
        self.inputs.iter().any(|input| !input.witness.is_empty())
    }

    // -----------------------------------------------------------------
    // Transaction ID
    // -----------------------------------------------------------------

    /// Compute the transaction ID (double SHA-256 of the serialized bytes).
    ///
    /// The digest covers the actual serialization, witness marker and
    /// stacks included when present. The bytes are in internal
    /// (little-endian) order. To get the conventional display string, use
    /// `tx_id_hex()`.
    ///
    /// # Returns
    /// A 32-byte array containing the txid in internal byte order.
    pub fn tx_id(&self) -> [u8; 32] {
        sha256d(&self.to_bytes())
    }

    /// Compute the transaction ID as a human-readable hex string.
    ///
    /// The hex string is byte-reversed from the internal hash, following
    /// Bitcoin's convention where txids are displayed in big-endian order.
    ///
    /// # Returns
    /// A 64-character hex string of the txid.
    pub fn tx_id_hex(&self) -> String {
        let mut id = self.tx_id();
        id.reverse();
        hex::encode(id)
    }

    // -----------------------------------------------------------------
    // Inputs / outputs
    // -----------------------------------------------------------------

    /// Append a `TransactionInput` to this transaction.
    ///
    /// # Arguments
    /// * `input` - The input to add.
    pub fn add_input(&mut self, input: TransactionInput) {
        self.inputs.push(input);
    }

    /// Append a `TransactionOutput` to this transaction.
    ///
    /// # Arguments
    /// * `output` - The output to add.
    pub fn add_output(&mut self, output: TransactionOutput) {
        self.outputs.push(output);
    }

    /// Compute the sum of all output values.
    ///
    /// # Returns
    /// The total base units across all outputs.
    pub fn total_output_value(&self) -> i64 {
        self.outputs.iter().map(|o| o.value).sum()
    }

    /// Return the size of this transaction in bytes.
    ///
    /// # Returns
    /// The byte length of the serialized transaction.
    pub fn size(&self) -> usize {
        self.to_bytes().len()
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Transaction {
    /// Display the transaction as its hex-encoded serialization.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

//! Reference to a specific output of a previous transaction.

use wallet_primitives::chainhash::Hash;
use wallet_primitives::util::{ByteReader, ByteWriter};

use crate::TransactionError;

/// Output index marking a null outpoint (coinbase convention).
pub const NULL_INDEX: u32 = 0xFFFF_FFFF;

/// A reference to a transaction output: the source transaction hash plus
/// the output index within it.
///
/// # Wire format
///
/// | Field | Size          |
/// |-------|---------------|
/// | hash  | 32 bytes (LE) |
/// | index | 4 bytes (LE)  |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OutPoint {
    /// The transaction ID of the output being spent, in internal
    /// (little-endian) byte order.
    pub hash: Hash,

    /// Index of the output within the source transaction.
    pub index: u32,
}

impl OutPoint {
    /// Create an outpoint from a hash and output index.
    ///
    /// # Arguments
    /// * `hash` - The source transaction ID.
    /// * `index` - The output index within the source transaction.
    ///
    /// # Returns
    /// A new `OutPoint`.
    pub fn new(hash: Hash, index: u32) -> Self {
        OutPoint { hash, index }
    }

    /// Create the null outpoint used by coinbase inputs.
    ///
    /// # Returns
    /// An `OutPoint` with a zero hash and index `0xFFFFFFFF`.
    pub fn null() -> Self {
        OutPoint {
            hash: Hash::default(),
            index: NULL_INDEX,
        }
    }

    /// Check whether this is the null (coinbase) outpoint.
    ///
    /// # Returns
    /// `true` when the hash is all zeros and the index is `0xFFFFFFFF`.
    pub fn is_null(&self) -> bool {
        self.hash.is_zero() && self.index == NULL_INDEX
    }

    /// Deserialize an `OutPoint` from a `ByteReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded outpoint.
    ///
    /// # Returns
    /// `Ok(OutPoint)` on success, or a `TransactionError` if the data is
    /// truncated.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let hash_bytes = reader.read_bytes(32).map_err(|e| {
            TransactionError::SerializationError(format!("reading outpoint hash: {}", e))
        })?;
        let hash = Hash::from_bytes(hash_bytes)?;

        let index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading outpoint index: {}", e))
        })?;

        Ok(OutPoint { hash, index })
    }

    /// Serialize this `OutPoint` into a `ByteWriter`.
    ///
    /// # Arguments
    /// * `writer` - The writer to append serialized bytes to.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_bytes(self.hash.as_bytes());
        writer.write_u32_le(self.index);
    }
}

impl Default for OutPoint {
    fn default() -> Self {
        Self::null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify null outpoint detection.
    #[test]
    fn test_null_outpoint() {
        let null = OutPoint::null();
        assert!(null.is_null());
        assert_eq!(null, OutPoint::default());

        let hash = Hash::from_hex(
            "e28c2b955293159898e34c6840d99bf4d390e2ee1c6f606939f18ee1e2000d05",
        )
        .unwrap();
        assert!(!OutPoint::new(hash, 2).is_null());
        assert!(!OutPoint::new(Hash::default(), 0).is_null());
    }

    /// Verify wire-format roundtrip.
    #[test]
    fn test_outpoint_roundtrip() {
        let hash = Hash::from_hex(
            "e28c2b955293159898e34c6840d99bf4d390e2ee1c6f606939f18ee1e2000d05",
        )
        .unwrap();
        let outpoint = OutPoint::new(hash, 2);

        let mut writer = ByteWriter::new();
        outpoint.write_to(&mut writer);
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), 36);

        let mut reader = ByteReader::new(&bytes);
        let decoded = OutPoint::read_from(&mut reader).unwrap();
        assert_eq!(decoded, outpoint);
        assert_eq!(reader.remaining(), 0);
    }

    /// Verify truncated data is rejected.
    #[test]
    fn test_outpoint_truncated() {
        let bytes = [0u8; 35];
        let mut reader = ByteReader::new(&bytes);
        assert!(OutPoint::read_from(&mut reader).is_err());
    }
}

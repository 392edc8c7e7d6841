//! Script chunk parsing and encoding.
//!
//! A script chunk is either an opcode or a data push with its associated
//! bytes. This module handles reading single operations at a cursor,
//! decoding raw script bytes into structured chunks, and encoding push
//! data with the correct OP_PUSHDATA prefix.

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a Bitcoin script.
///
/// Each chunk is either a standalone opcode (like OP_DUP) or a data push
/// that carries the opcode byte and the pushed data bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes), this is the length.
    pub op: u8,
    /// The data payload, if this chunk is a push operation.
    pub data: Option<Vec<u8>>,
}

impl ScriptChunk {
    /// Convert this chunk to its ASM string representation.
    ///
    /// Data push chunks are rendered as hex strings; non-push opcodes use
    /// their canonical OP_xxx name.
    ///
    /// # Returns
    /// A string suitable for inclusion in a space-separated ASM output.
    pub fn to_asm_string(&self) -> String {
        if self.op > OP_0 && self.op <= OP_PUSHDATA4 {
            if let Some(ref data) = self.data {
                return hex::encode(data);
            }
        }
        opcode_to_string(self.op)
    }
}

/// Read a single script operation starting at `pos`.
///
/// Handles OP_DATA_1..OP_DATA_75 (direct push, opcode byte is the length)
/// and OP_PUSHDATA1/2/4 (1/2/4-byte little-endian length). Any declared
/// length that exceeds the remaining buffer is a decode failure. Advances
/// `pos` past the consumed bytes.
///
/// # Arguments
/// * `bytes` - The raw script bytes.
/// * `pos` - Mutable reference to the current read position.
///
/// # Returns
/// The parsed `ScriptChunk`, or a `ScriptError` if the data is truncated.
pub fn read_op(bytes: &[u8], pos: &mut usize) -> Result<ScriptChunk, ScriptError> {
    if *pos >= bytes.len() {
        return Err(ScriptError::IndexOutOfRange);
    }
    let op = bytes[*pos];
    match op {
        OP_PUSHDATA1 => {
            if bytes.len() < *pos + 2 {
                return Err(ScriptError::DataTooSmall);
            }
            let length = bytes[*pos + 1] as usize;
            *pos += 2;
            if bytes.len() < *pos + length {
                return Err(ScriptError::DataTooSmall);
            }
            let data = bytes[*pos..*pos + length].to_vec();
            *pos += length;
            Ok(ScriptChunk { op, data: Some(data) })
        }
        OP_PUSHDATA2 => {
            if bytes.len() < *pos + 3 {
                return Err(ScriptError::DataTooSmall);
            }
            let length = u16::from_le_bytes([bytes[*pos + 1], bytes[*pos + 2]]) as usize;
            *pos += 3;
            if bytes.len() < *pos + length {
                return Err(ScriptError::DataTooSmall);
            }
            let data = bytes[*pos..*pos + length].to_vec();
            *pos += length;
            Ok(ScriptChunk { op, data: Some(data) })
        }
        OP_PUSHDATA4 => {
            if bytes.len() < *pos + 5 {
                return Err(ScriptError::DataTooSmall);
            }
            let length = u32::from_le_bytes([
                bytes[*pos + 1],
                bytes[*pos + 2],
                bytes[*pos + 3],
                bytes[*pos + 4],
            ]) as usize;
            *pos += 5;
            if bytes.len() < *pos + length {
                return Err(ScriptError::DataTooSmall);
            }
            let data = bytes[*pos..*pos + length].to_vec();
            *pos += length;
            Ok(ScriptChunk { op, data: Some(data) })
        }
        0x01..=0x4b => {
            // Direct push: op byte is the number of bytes to push.
            let length = op as usize;
            if bytes.len() < *pos + 1 + length {
                return Err(ScriptError::DataTooSmall);
            }
            let data = bytes[*pos + 1..*pos + 1 + length].to_vec();
            *pos += 1 + length;
            Ok(ScriptChunk { op, data: Some(data) })
        }
        _ => {
            *pos += 1;
            Ok(ScriptChunk { op, data: None })
        }
    }
}

/// Decode raw script bytes into a vector of `ScriptChunk` values.
///
/// # Arguments
/// * `bytes` - The raw script bytes to decode.
///
/// # Returns
/// A vector of parsed chunks, or a `ScriptError` if the data is truncated.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        chunks.push(read_op(bytes, &mut pos)?);
    }
    Ok(chunks)
}

/// Compute the OP_PUSHDATA prefix bytes for a data payload of the given length.
///
/// Returns the prefix that should be prepended to the data when encoding
/// a push operation into raw script bytes.
///
/// # Arguments
/// * `data_len` - The length of the data to be pushed.
///
/// # Returns
/// A byte vector containing the appropriate prefix, or an error if the data
/// is too large for the protocol.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= 75 {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xFF {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xFFFF {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len <= 0xFFFFFFFF {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}

/// Encode multiple data payloads into a single byte vector with push prefixes.
///
/// Each element in `parts` gets its own OP_PUSHDATA prefix based on length.
///
/// # Arguments
/// * `parts` - Slice of data byte slices to encode.
///
/// # Returns
/// A byte vector containing all pushes concatenated, or an error if any
/// part is too large.
pub fn encode_push_datas(parts: &[&[u8]]) -> Result<Vec<u8>, ScriptError> {
    let mut result = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        let prefix = push_data_prefix(part.len()).map_err(|_| ScriptError::PartTooBig(i))?;
        result.extend_from_slice(&prefix);
        result.extend_from_slice(part);
    }
    Ok(result)
}

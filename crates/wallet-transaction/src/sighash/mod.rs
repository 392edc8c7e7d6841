//! Signature hash computation.
//!
//! Computes the digest that a signature commits to, in both the legacy
//! scheme (full transaction re-serialization with per-input script
//! substitution) and the BIP143 scheme (amount-committing digest used by
//! segregated witness and fork-id chains).

use wallet_primitives::hash::sha256d;
use wallet_primitives::util::{ByteWriter, VarInt};
use wallet_script::opcodes::OP_CODESEPARATOR;
use wallet_script::Script;

use crate::transaction::Transaction;
use crate::TransactionError;

// ---------------------------------------------------------------------
// Sighash flags
// ---------------------------------------------------------------------

/// Sign all inputs and all outputs.
pub const SIGHASH_ALL: u32 = 0x01;
/// Sign all inputs and no outputs.
pub const SIGHASH_NONE: u32 = 0x02;
/// Sign all inputs and the single output at the same index.
pub const SIGHASH_SINGLE: u32 = 0x03;
/// Fork-id modifier selecting the BIP143 digest on fork chains.
pub const SIGHASH_FORKID: u32 = 0x40;
/// Modifier committing to only the input being signed.
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;
/// Mask extracting the base mode from a sighash value.
pub const SIGHASH_MASK: u32 = 0x1F;

/// A sighash type: base mode plus optional modifier flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SighashType(u32);

impl SighashType {
    /// Wrap a raw sighash value.
    pub fn new(raw: u32) -> Self {
        SighashType(raw)
    }

    /// The raw sighash value, modifiers included.
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// The base mode with modifier flags masked off.
    pub fn base(&self) -> u32 {
        self.0 & SIGHASH_MASK
    }

    /// Whether the base mode is `SIGHASH_SINGLE`.
    pub fn is_single(&self) -> bool {
        self.base() == SIGHASH_SINGLE
    }

    /// Whether the base mode is `SIGHASH_NONE`.
    pub fn is_none(&self) -> bool {
        self.base() == SIGHASH_NONE
    }

    /// Whether the `SIGHASH_ANYONECANPAY` modifier is set.
    pub fn anyone_can_pay(&self) -> bool {
        self.0 & SIGHASH_ANYONECANPAY != 0
    }

    /// Whether the `SIGHASH_FORKID` modifier is set.
    pub fn has_fork_id(&self) -> bool {
        self.0 & SIGHASH_FORKID != 0
    }
}

impl Default for SighashType {
    fn default() -> Self {
        SighashType(SIGHASH_ALL)
    }
}

/// Which digest scheme a signature uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SigVersion {
    /// Legacy digest: full transaction re-serialization.
    Base,
    /// BIP143 digest committing to the spent amount.
    WitnessV0,
}

// ---------------------------------------------------------------------
// Digest computation
// ---------------------------------------------------------------------

/// Compute the signature hash for one input of a transaction.
///
/// Dispatches to the BIP143 digest when `version` is `WitnessV0` or the
/// sighash type carries the fork-id modifier, and to the legacy digest
/// otherwise.
///
/// # Arguments
/// * `tx` - The transaction being signed. Unlocking scripts are ignored.
/// * `index` - The index of the input being signed.
/// * `script_code` - The script the signature commits to (the locking
///   script, redeem script, or witness script being satisfied).
/// * `amount` - The value of the spent output in base units. Only used by
///   the BIP143 digest.
/// * `sighash_type` - The sighash mode and modifiers.
/// * `version` - The digest scheme of the spend.
///
/// # Returns
/// The 32-byte digest to sign, or a `TransactionError` when the index is
/// out of range or the mode cannot apply.
pub fn signature_hash(
    tx: &Transaction,
    index: usize,
    script_code: &Script,
    amount: i64,
    sighash_type: SighashType,
    version: SigVersion,
) -> Result<[u8; 32], TransactionError> {
    if index >= tx.inputs.len() {
        return Err(TransactionError::SigningError(format!(
            "input index {} out of range ({} inputs)",
            index,
            tx.inputs.len()
        )));
    }

    if version == SigVersion::WitnessV0 || sighash_type.has_fork_id() {
        Ok(witness_signature_hash(tx, index, script_code, amount, sighash_type))
    } else {
        legacy_signature_hash(tx, index, script_code, sighash_type)
    }
}

/// Remove every `OP_CODESEPARATOR` from a script code.
///
/// The signature must not commit to code separators, so they are dropped
/// from the serialized script before it is hashed.
fn strip_code_separators(script: &Script) -> Result<Vec<u8>, TransactionError> {
    let bytes = script.to_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut pos = 0;
    while pos < bytes.len() {
        let start = pos;
        let chunk = script.read_op(&mut pos)?;
        if chunk.op != OP_CODESEPARATOR {
            out.extend_from_slice(&bytes[start..pos]);
        }
    }
    Ok(out)
}

/// Compute the legacy signature hash.
///
/// Re-serializes the transaction with the script code substituted into the
/// signed input, all other unlocking scripts blanked, and inputs/outputs
/// reduced according to the sighash mode, then double-SHA-256 hashes the
/// result with the 4-byte sighash value appended.
fn legacy_signature_hash(
    tx: &Transaction,
    index: usize,
    script_code: &Script,
    sighash_type: SighashType,
) -> Result<[u8; 32], TransactionError> {
    if sighash_type.is_single() && index >= tx.outputs.len() {
        return Err(TransactionError::SigningError(format!(
            "SIGHASH_SINGLE input {} has no matching output",
            index
        )));
    }

    let stripped = strip_code_separators(script_code)?;
    let reduce_outputs = sighash_type.is_single() || sighash_type.is_none();

    let mut writer = ByteWriter::with_capacity(256);
    writer.write_u32_le(tx.version as u32);

    // Inputs. ANYONECANPAY commits only to the input being signed.
    if sighash_type.anyone_can_pay() {
        writer.write_varint(VarInt::from(1u64));
        write_legacy_input(&mut writer, tx, index, index, &stripped, reduce_outputs);
    } else {
        writer.write_varint(VarInt::from(tx.inputs.len()));
        for i in 0..tx.inputs.len() {
            write_legacy_input(&mut writer, tx, i, index, &stripped, reduce_outputs);
        }
    }

    // Outputs, reduced per the base mode.
    if sighash_type.is_none() {
        writer.write_varint(VarInt::from(0u64));
    } else if sighash_type.is_single() {
        writer.write_varint(VarInt::from(index + 1));
        for _ in 0..index {
            crate::output::TransactionOutput::null().write_to(&mut writer);
        }
        tx.outputs[index].write_to(&mut writer);
    } else {
        writer.write_varint(VarInt::from(tx.outputs.len()));
        for output in &tx.outputs {
            output.write_to(&mut writer);
        }
    }

    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(sighash_type.raw());

    Ok(sha256d(writer.as_bytes()))
}

/// Serialize one input for the legacy digest.
///
/// The signed input carries the stripped script code; all other inputs
/// carry an empty script and, under SINGLE or NONE, a zero sequence.
fn write_legacy_input(
    writer: &mut ByteWriter,
    tx: &Transaction,
    i: usize,
    index: usize,
    stripped_code: &[u8],
    reduce_outputs: bool,
) {
    let input = &tx.inputs[i];
    input.previous_output.write_to(writer);

    if i == index {
        writer.write_varint(VarInt::from(stripped_code.len()));
        writer.write_bytes(stripped_code);
        writer.write_u32_le(input.sequence);
    } else {
        writer.write_varint(VarInt::from(0u64));
        let sequence = if reduce_outputs { 0 } else { input.sequence };
        writer.write_u32_le(sequence);
    }
}

/// Compute the BIP143 signature hash.
///
/// The digest commits to the spent amount and uses precomputed hashes of
/// the prevouts, sequences, and outputs, reduced per the sighash mode.
fn witness_signature_hash(
    tx: &Transaction,
    index: usize,
    script_code: &Script,
    amount: i64,
    sighash_type: SighashType,
) -> [u8; 32] {
    let input = &tx.inputs[index];

    let mut writer = ByteWriter::with_capacity(256);
    writer.write_u32_le(tx.version as u32);
    writer.write_bytes(&prevouts_hash(tx, sighash_type));
    writer.write_bytes(&sequence_hash(tx, sighash_type));
    input.previous_output.write_to(&mut writer);

    let code_bytes = script_code.to_bytes();
    writer.write_varint(VarInt::from(code_bytes.len()));
    writer.write_bytes(code_bytes);

    writer.write_u64_le(amount as u64);
    writer.write_u32_le(input.sequence);
    writer.write_bytes(&outputs_hash(tx, index, sighash_type));
    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(sighash_type.raw());

    sha256d(writer.as_bytes())
}

/// Double hash of all input outpoints, or zero under ANYONECANPAY.
fn prevouts_hash(tx: &Transaction, sighash_type: SighashType) -> [u8; 32] {
    if sighash_type.anyone_can_pay() {
        return [0u8; 32];
    }
    let mut writer = ByteWriter::with_capacity(36 * tx.inputs.len());
    for input in &tx.inputs {
        input.previous_output.write_to(&mut writer);
    }
    sha256d(writer.as_bytes())
}

/// Double hash of all input sequence numbers, or zero when any mode
/// modifier excludes them.
fn sequence_hash(tx: &Transaction, sighash_type: SighashType) -> [u8; 32] {
    if sighash_type.anyone_can_pay() || sighash_type.is_single() || sighash_type.is_none() {
        return [0u8; 32];
    }
    let mut writer = ByteWriter::with_capacity(4 * tx.inputs.len());
    for input in &tx.inputs {
        writer.write_u32_le(input.sequence);
    }
    sha256d(writer.as_bytes())
}

/// Double hash of the committed outputs: all of them, the single output
/// matching the input index, or zero when none apply.
fn outputs_hash(tx: &Transaction, index: usize, sighash_type: SighashType) -> [u8; 32] {
    if sighash_type.is_single() {
        if index < tx.outputs.len() {
            return sha256d(&tx.outputs[index].to_bytes());
        }
        return [0u8; 32];
    }
    if sighash_type.is_none() {
        return [0u8; 32];
    }
    let mut writer = ByteWriter::with_capacity(64);
    for output in &tx.outputs {
        output.write_to(&mut writer);
    }
    sha256d(writer.as_bytes())
}

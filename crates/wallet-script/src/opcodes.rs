//! Bitcoin script opcode constants and name conversions.
//!
//! Defines the opcode byte values used by the Script type, plus helpers
//! for small-integer encoding and ASM name lookup.

// -----------------------------------------------------------------------
// Push value
// -----------------------------------------------------------------------

/// Push an empty byte array onto the stack.
pub const OP_0: u8 = 0x00;
/// Alias for OP_0.
pub const OP_FALSE: u8 = 0x00;
/// Push the next 1 byte of data.
pub const OP_DATA_1: u8 = 0x01;
/// Push the next 20 bytes of data (hash160 payloads).
pub const OP_DATA_20: u8 = 0x14;
/// Push the next 32 bytes of data (sha256 payloads).
pub const OP_DATA_32: u8 = 0x20;
/// Push the next 33 bytes of data (compressed public keys).
pub const OP_DATA_33: u8 = 0x21;
/// Push the next 65 bytes of data (uncompressed public keys).
pub const OP_DATA_65: u8 = 0x41;
/// Push the next 75 bytes of data (largest direct push).
pub const OP_DATA_75: u8 = 0x4b;
/// The next byte contains the number of bytes to push.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// The next 2 bytes (LE) contain the number of bytes to push.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// The next 4 bytes (LE) contain the number of bytes to push.
pub const OP_PUSHDATA4: u8 = 0x4e;
/// Push the number -1 onto the stack.
pub const OP_1NEGATE: u8 = 0x4f;
/// Push the number 1 onto the stack.
pub const OP_1: u8 = 0x51;
/// Alias for OP_1.
pub const OP_TRUE: u8 = 0x51;
/// Push the number 2 onto the stack.
pub const OP_2: u8 = 0x52;
/// Push the number 3 onto the stack.
pub const OP_3: u8 = 0x53;
/// Push the number 4 onto the stack.
pub const OP_4: u8 = 0x54;
/// Push the number 5 onto the stack.
pub const OP_5: u8 = 0x55;
/// Push the number 6 onto the stack.
pub const OP_6: u8 = 0x56;
/// Push the number 7 onto the stack.
pub const OP_7: u8 = 0x57;
/// Push the number 8 onto the stack.
pub const OP_8: u8 = 0x58;
/// Push the number 9 onto the stack.
pub const OP_9: u8 = 0x59;
/// Push the number 10 onto the stack.
pub const OP_10: u8 = 0x5a;
/// Push the number 11 onto the stack.
pub const OP_11: u8 = 0x5b;
/// Push the number 12 onto the stack.
pub const OP_12: u8 = 0x5c;
/// Push the number 13 onto the stack.
pub const OP_13: u8 = 0x5d;
/// Push the number 14 onto the stack.
pub const OP_14: u8 = 0x5e;
/// Push the number 15 onto the stack.
pub const OP_15: u8 = 0x5f;
/// Push the number 16 onto the stack.
pub const OP_16: u8 = 0x60;

// -----------------------------------------------------------------------
// Flow control
// -----------------------------------------------------------------------

/// Does nothing.
pub const OP_NOP: u8 = 0x61;
/// Reserved (OP_VER).
pub const OP_VER: u8 = 0x62;
/// Execute the following statements if the top stack value is truthy.
pub const OP_IF: u8 = 0x63;
/// Execute the following statements if the top stack value is falsy.
pub const OP_NOTIF: u8 = 0x64;
/// Reserved conditional (OP_VERIF).
pub const OP_VERIF: u8 = 0x65;
/// Reserved conditional (OP_VERNOTIF).
pub const OP_VERNOTIF: u8 = 0x66;
/// Execute if the preceding OP_IF/OP_NOTIF was not executed.
pub const OP_ELSE: u8 = 0x67;
/// End an OP_IF/OP_NOTIF block.
pub const OP_ENDIF: u8 = 0x68;
/// Fail the script if the top stack value is not truthy.
pub const OP_VERIFY: u8 = 0x69;
/// Mark the output as unspendable; remaining bytes are data.
pub const OP_RETURN: u8 = 0x6a;

// -----------------------------------------------------------------------
// Stack
// -----------------------------------------------------------------------

/// Move the top stack item to the alt stack.
pub const OP_TOALTSTACK: u8 = 0x6b;
/// Move the top alt stack item to the stack.
pub const OP_FROMALTSTACK: u8 = 0x6c;
/// Remove the top two stack items.
pub const OP_2DROP: u8 = 0x6d;
/// Duplicate the top two stack items.
pub const OP_2DUP: u8 = 0x6e;
/// Duplicate the top three stack items.
pub const OP_3DUP: u8 = 0x6f;
/// Remove the top stack item.
pub const OP_DROP: u8 = 0x75;
/// Duplicate the top stack item.
pub const OP_DUP: u8 = 0x76;
/// Swap the top two stack items.
pub const OP_SWAP: u8 = 0x7c;

// -----------------------------------------------------------------------
// Bitwise / comparison
// -----------------------------------------------------------------------

/// Push 1 if the top two items are exactly equal, 0 otherwise.
pub const OP_EQUAL: u8 = 0x87;
/// OP_EQUAL then OP_VERIFY.
pub const OP_EQUALVERIFY: u8 = 0x88;

// -----------------------------------------------------------------------
// Arithmetic
// -----------------------------------------------------------------------

/// Add the top two stack items.
pub const OP_ADD: u8 = 0x93;
/// Subtract the top stack item from the second.
pub const OP_SUB: u8 = 0x94;

// -----------------------------------------------------------------------
// Crypto
// -----------------------------------------------------------------------

/// Hash the top stack item with RIPEMD-160.
pub const OP_RIPEMD160: u8 = 0xa6;
/// Hash the top stack item with SHA-1.
pub const OP_SHA1: u8 = 0xa7;
/// Hash the top stack item with SHA-256.
pub const OP_SHA256: u8 = 0xa8;
/// Hash the top stack item with RIPEMD-160(SHA-256(x)).
pub const OP_HASH160: u8 = 0xa9;
/// Hash the top stack item with SHA-256d.
pub const OP_HASH256: u8 = 0xaa;
/// All signature-checked data after the most recent OP_CODESEPARATOR.
pub const OP_CODESEPARATOR: u8 = 0xab;
/// Verify a signature against a public key.
pub const OP_CHECKSIG: u8 = 0xac;
/// OP_CHECKSIG then OP_VERIFY.
pub const OP_CHECKSIGVERIFY: u8 = 0xad;
/// Verify m-of-n signatures against public keys.
pub const OP_CHECKMULTISIG: u8 = 0xae;
/// OP_CHECKMULTISIG then OP_VERIFY.
pub const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;

/// Check whether an opcode encodes a small integer (OP_1 through OP_16).
///
/// # Arguments
/// * `op` - The opcode byte to test.
///
/// # Returns
/// `true` for OP_1..=OP_16.
pub fn is_small_int_op(op: u8) -> bool {
    (OP_1..=OP_16).contains(&op)
}

/// Decode a small-integer opcode to its numeric value.
///
/// # Arguments
/// * `op` - The opcode byte.
///
/// # Returns
/// `Some(0)` for OP_0, `Some(1..=16)` for OP_1..=OP_16, `None` otherwise.
pub fn decode_small_int(op: u8) -> Option<u8> {
    if op == OP_0 {
        Some(0)
    } else if is_small_int_op(op) {
        Some(op - OP_1 + 1)
    } else {
        None
    }
}

/// Encode a small integer (0..=16) as its opcode byte.
///
/// # Arguments
/// * `n` - A value in 0..=16.
///
/// # Returns
/// `Some(opcode)` for values in range, `None` otherwise.
pub fn encode_small_int(n: u8) -> Option<u8> {
    match n {
        0 => Some(OP_0),
        1..=16 => Some(OP_1 + n - 1),
        _ => None,
    }
}

/// Get the canonical ASM name for an opcode byte.
///
/// Direct push opcodes (0x01..=0x4b) and unknown opcodes are rendered
/// with a numeric suffix.
///
/// # Arguments
/// * `op` - The opcode byte.
///
/// # Returns
/// The OP_xxx name as a `String`.
pub fn opcode_to_string(op: u8) -> String {
    match op {
        OP_0 => "OP_FALSE".to_string(),
        0x01..=0x4b => format!("OP_DATA_{}", op),
        OP_PUSHDATA1 => "OP_PUSHDATA1".to_string(),
        OP_PUSHDATA2 => "OP_PUSHDATA2".to_string(),
        OP_PUSHDATA4 => "OP_PUSHDATA4".to_string(),
        OP_1NEGATE => "OP_1NEGATE".to_string(),
        OP_1..=OP_16 => format!("OP_{}", op - OP_1 + 1),
        OP_NOP => "OP_NOP".to_string(),
        OP_VER => "OP_VER".to_string(),
        OP_IF => "OP_IF".to_string(),
        OP_NOTIF => "OP_NOTIF".to_string(),
        OP_VERIF => "OP_VERIF".to_string(),
        OP_VERNOTIF => "OP_VERNOTIF".to_string(),
        OP_ELSE => "OP_ELSE".to_string(),
        OP_ENDIF => "OP_ENDIF".to_string(),
        OP_VERIFY => "OP_VERIFY".to_string(),
        OP_RETURN => "OP_RETURN".to_string(),
        OP_TOALTSTACK => "OP_TOALTSTACK".to_string(),
        OP_FROMALTSTACK => "OP_FROMALTSTACK".to_string(),
        OP_2DROP => "OP_2DROP".to_string(),
        OP_2DUP => "OP_2DUP".to_string(),
        OP_3DUP => "OP_3DUP".to_string(),
        OP_DROP => "OP_DROP".to_string(),
        OP_DUP => "OP_DUP".to_string(),
        OP_SWAP => "OP_SWAP".to_string(),
        OP_EQUAL => "OP_EQUAL".to_string(),
        OP_EQUALVERIFY => "OP_EQUALVERIFY".to_string(),
        OP_ADD => "OP_ADD".to_string(),
        OP_SUB => "OP_SUB".to_string(),
        OP_RIPEMD160 => "OP_RIPEMD160".to_string(),
        OP_SHA1 => "OP_SHA1".to_string(),
        OP_SHA256 => "OP_SHA256".to_string(),
        OP_HASH160 => "OP_HASH160".to_string(),
        OP_HASH256 => "OP_HASH256".to_string(),
        OP_CODESEPARATOR => "OP_CODESEPARATOR".to_string(),
        OP_CHECKSIG => "OP_CHECKSIG".to_string(),
        OP_CHECKSIGVERIFY => "OP_CHECKSIGVERIFY".to_string(),
        OP_CHECKMULTISIG => "OP_CHECKMULTISIG".to_string(),
        OP_CHECKMULTISIGVERIFY => "OP_CHECKMULTISIGVERIFY".to_string(),
        _ => format!("OP_UNKNOWN_{}", op),
    }
}

/// Look up an opcode byte from its ASM name.
///
/// Accepts the canonical OP_xxx names plus the OP_FALSE/OP_TRUE aliases.
///
/// # Arguments
/// * `name` - The ASM token to look up.
///
/// # Returns
/// `Some(opcode)` if the name is a recognized non-push opcode,
/// `None` otherwise (the token is then treated as push data).
pub fn string_to_opcode(name: &str) -> Option<u8> {
    let op = match name {
        "OP_0" | "OP_FALSE" => OP_0,
        "OP_1NEGATE" => OP_1NEGATE,
        "OP_1" | "OP_TRUE" => OP_1,
        "OP_2" => OP_2,
        "OP_3" => OP_3,
        "OP_4" => OP_4,
        "OP_5" => OP_5,
        "OP_6" => OP_6,
        "OP_7" => OP_7,
        "OP_8" => OP_8,
        "OP_9" => OP_9,
        "OP_10" => OP_10,
        "OP_11" => OP_11,
        "OP_12" => OP_12,
        "OP_13" => OP_13,
        "OP_14" => OP_14,
        "OP_15" => OP_15,
        "OP_16" => OP_16,
        "OP_NOP" => OP_NOP,
        "OP_VER" => OP_VER,
        "OP_IF" => OP_IF,
        "OP_NOTIF" => OP_NOTIF,
        "OP_VERIF" => OP_VERIF,
        "OP_VERNOTIF" => OP_VERNOTIF,
        "OP_ELSE" => OP_ELSE,
        "OP_ENDIF" => OP_ENDIF,
        "OP_VERIFY" => OP_VERIFY,
        "OP_RETURN" => OP_RETURN,
        "OP_TOALTSTACK" => OP_TOALTSTACK,
        "OP_FROMALTSTACK" => OP_FROMALTSTACK,
        "OP_2DROP" => OP_2DROP,
        "OP_2DUP" => OP_2DUP,
        "OP_3DUP" => OP_3DUP,
        "OP_DROP" => OP_DROP,
        "OP_DUP" => OP_DUP,
        "OP_SWAP" => OP_SWAP,
        "OP_EQUAL" => OP_EQUAL,
        "OP_EQUALVERIFY" => OP_EQUALVERIFY,
        "OP_ADD" => OP_ADD,
        "OP_SUB" => OP_SUB,
        "OP_RIPEMD160" => OP_RIPEMD160,
        "OP_SHA1" => OP_SHA1,
        "OP_SHA256" => OP_SHA256,
        "OP_HASH160" => OP_HASH160,
        "OP_HASH256" => OP_HASH256,
        "OP_CODESEPARATOR" => OP_CODESEPARATOR,
        "OP_CHECKSIG" => OP_CHECKSIG,
        "OP_CHECKSIGVERIFY" => OP_CHECKSIGVERIFY,
        "OP_CHECKMULTISIG" => OP_CHECKMULTISIG,
        "OP_CHECKMULTISIGVERIFY" => OP_CHECKMULTISIGVERIFY,
        _ => return None,
    };
    Some(op)
}

//! Transaction signing.
//!
//! Classifies each spent output's locking script, gathers the required
//! signatures and scripts from a `KeyProvider`, and produces a signed
//! copy of the transaction. Supports P2PKH, P2PK, bare multisig, P2SH
//! (including nested witness programs), and native P2WPKH/P2WSH spends.

use wallet_primitives::ec::PrivateKey;
use wallet_primitives::hash::ripemd160;
use wallet_script::opcodes::{OP_0, OP_1};
use wallet_script::Script;

use crate::provider::KeyProvider;
use crate::sighash::{signature_hash, SigVersion, SighashType};
use crate::transaction::Transaction;
use crate::unspent::UnspentOutput;
use crate::TransactionError;

/// Signs transactions with keys drawn from a `KeyProvider`.
pub struct TransactionSigner<P: KeyProvider> {
    provider: P,
    sighash_type: SighashType,
}

impl<P: KeyProvider> TransactionSigner<P> {
    /// Create a signer producing signatures with the given sighash type.
    ///
    /// # Arguments
    /// * `provider` - Source of private keys and redeem scripts.
    /// * `sighash_type` - The sighash mode appended to every signature.
    ///
    /// # Returns
    /// A new `TransactionSigner`.
    pub fn new(provider: P, sighash_type: SighashType) -> Self {
        TransactionSigner {
            provider,
            sighash_type,
        }
    }

    /// Sign a transaction against the outputs it spends.
    ///
    /// `utxos` must be ordered to match the transaction's inputs: the
    /// input at each index spends the UTXO at the same index. Inputs
    /// whose keys the provider does not hold are left unsigned, as are
    /// SIGHASH_SINGLE inputs with no corresponding output. Digests
    /// ignore unlocking scripts, so signing an already-signed
    /// transaction reproduces it.
    ///
    /// # Arguments
    /// * `transaction` - The transaction to sign. Not modified.
    /// * `utxos` - The outputs being spent, one per input.
    ///
    /// # Returns
    /// A signed copy of the transaction, or a `TransactionError` when a
    /// locking script is unrecognized or a redeem script cannot be
    /// resolved.
    pub fn sign(
        &self,
        transaction: &Transaction,
        utxos: &[UnspentOutput],
    ) -> Result<Transaction, TransactionError> {
        let mut signed = transaction.clone();

        for (index, utxo) in utxos.iter().enumerate() {
            if self.sighash_type.is_single() && index >= transaction.outputs.len() {
                continue;
            }
            self.sign_input(transaction, &mut signed, index, utxo)?;
        }

        Ok(signed)
    }

    /// Sign one input, writing the unlocking script and witness stack
    /// into `signed`. A missing key leaves the input untouched.
    fn sign_input(
        &self,
        transaction: &Transaction,
        signed: &mut Transaction,
        index: usize,
        utxo: &UnspentOutput,
    ) -> Result<(), TransactionError> {
        let mut script = utxo.output.locking_script.clone();
        let mut redeem_script = None;
        let mut witness_stack = Vec::new();

        let mut results =
            match self.sign_step(transaction, index, &script, utxo.value(), SigVersion::Base)? {
                Some(results) => results,
                None => return Ok(()),
            };

        if script.is_pay_to_script_hash() {
            script = Script::from_bytes(&results[0]);
            results = match self.sign_step(
                transaction,
                index,
                &script,
                utxo.value(),
                SigVersion::Base,
            )? {
                Some(results) => results,
                None => return Ok(()),
            };
            redeem_script = Some(script.clone());
        }

        if let Some(keyhash) = script.match_pay_to_witness_pubkey_hash() {
            let witness_script = Script::build_pay_to_public_key_hash(&keyhash);
            witness_stack = match self.sign_step(
                transaction,
                index,
                &witness_script,
                utxo.value(),
                SigVersion::WitnessV0,
            )? {
                Some(results) => results,
                None => return Ok(()),
            };
            results.clear();
        } else if script.match_pay_to_witness_script_hash().is_some() {
            let witness_script = Script::from_bytes(&results[0]);
            let mut stack = match self.sign_step(
                transaction,
                index,
                &witness_script,
                utxo.value(),
                SigVersion::WitnessV0,
            )? {
                Some(results) => results,
                None => return Ok(()),
            };
            stack.push(witness_script.to_bytes().to_vec());
            witness_stack = stack;
            results.clear();
        } else if script.is_witness_program() {
            return Err(TransactionError::InvalidOutputScript);
        }

        if let Some(redeem) = redeem_script {
            results.push(redeem.to_bytes().to_vec());
        }

        let input = &mut signed.inputs[index];
        input.unlocking_script = push_all(&results)?;
        input.witness = witness_stack;
        Ok(())
    }

    /// Produce the unlocking data for one script.
    ///
    /// Returns `Ok(None)` when the provider holds no key for a
    /// classifiable script; the caller leaves the input unsigned. An
    /// unrecognized script, or a script hash the provider cannot
    /// resolve, is a fatal error.
    fn sign_step(
        &self,
        transaction: &Transaction,
        index: usize,
        script: &Script,
        amount: i64,
        version: SigVersion,
    ) -> Result<Option<Vec<Vec<u8>>>, TransactionError> {
        if let Some(script_hash) = script.match_pay_to_script_hash() {
            let redeem = self
                .provider
                .script_for_script_hash(&script_hash)
                .ok_or(TransactionError::InvalidOutputScript)?;
            Ok(Some(vec![redeem.to_bytes().to_vec()]))
        } else if let Some(program) = script.match_pay_to_witness_script_hash() {
            // hash160(redeem) == ripemd160(program), so witness scripts
            // share the provider index with P2SH redeem scripts.
            let script_hash = ripemd160(&program);
            let redeem = self
                .provider
                .script_for_script_hash(&script_hash)
                .ok_or(TransactionError::InvalidOutputScript)?;
            Ok(Some(vec![redeem.to_bytes().to_vec()]))
        } else if let Some(keyhash) = script.match_pay_to_witness_pubkey_hash() {
            Ok(Some(vec![keyhash.to_vec()]))
        } else if script.is_witness_program() {
            Err(TransactionError::InvalidOutputScript)
        } else if let Some((pubkeys, required)) = script.match_multisig() {
            // Leading empty element absorbs CHECKMULTISIG's extra pop.
            let mut results: Vec<Vec<u8>> = vec![Vec::new()];
            for pubkey in &pubkeys {
                if results.len() > required as usize {
                    break;
                }
                let key = match self.provider.key_for_public_key(pubkey) {
                    Some(key) => key,
                    None => return Ok(None),
                };
                results.push(self.create_signature(
                    transaction,
                    index,
                    script,
                    key,
                    amount,
                    version,
                )?);
            }
            Ok(Some(results))
        } else if let Some(pubkey) = script.match_pay_to_pubkey() {
            let key = match self.provider.key_for_public_key(&pubkey) {
                Some(key) => key,
                None => return Ok(None),
            };
            let signature =
                self.create_signature(transaction, index, script, key, amount, version)?;
            Ok(Some(vec![signature]))
        } else if let Some(keyhash) = script.match_pay_to_pubkey_hash() {
            let key = match self.provider.key_for_public_key_hash(&keyhash) {
                Some(key) => key,
                None => return Ok(None),
            };
            let signature =
                self.create_signature(transaction, index, script, key, amount, version)?;
            let pubkey = key.public_key().to_compressed();
            Ok(Some(vec![signature, pubkey.to_vec()]))
        } else {
            Err(TransactionError::InvalidOutputScript)
        }
    }

    /// DER-encode a signature over the input's digest and append the
    /// sighash byte.
    fn create_signature(
        &self,
        transaction: &Transaction,
        index: usize,
        script_code: &Script,
        key: &PrivateKey,
        amount: i64,
        version: SigVersion,
    ) -> Result<Vec<u8>, TransactionError> {
        let digest = signature_hash(
            transaction,
            index,
            script_code,
            amount,
            self.sighash_type,
            version,
        )?;
        let signature = key.sign(&digest)?;
        let mut encoded = signature.to_der();
        encoded.push(self.sighash_type.raw() as u8);
        Ok(encoded)
    }
}

/// Assemble unlocking data into a script of canonical pushes.
///
/// Empty data becomes `OP_0`, a single byte from 1 to 16 becomes the
/// matching small-int opcode, and everything else gets the minimal push
/// prefix.
fn push_all(results: &[Vec<u8>]) -> Result<Script, TransactionError> {
    let mut script = Script::new();
    for data in results {
        if data.is_empty() {
            script.append_opcodes(&[OP_0])?;
        } else if data.len() == 1 && (1..=16).contains(&data[0]) {
            script.append_opcodes(&[OP_1 + data[0] - 1])?;
        } else {
            script.append_push_data(data)?;
        }
    }
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_transfer;
    use crate::outpoint::OutPoint;
    use crate::provider::MemoryKeyProvider;
    use crate::sighash::{SIGHASH_ALL, SIGHASH_FORKID, SIGHASH_SINGLE};
    use wallet_primitives::chainhash::Hash;
    use wallet_primitives::hash::hash160;
    use wallet_script::Address;

    const WIF: &str = "L1WFAgk5LxC5NLfuTeADvJ5nm3ooV3cKei5Yi9LJ8ENDfGMBZjdW";
    const P2PKH_SCRIPT: &str = "76a914aff1e0789e5fe316b729577665aa0a04d5b0f8c788ac";
    const SIGNED_TX_HEX: &str = "0100000001e28c2b955293159898e34c6840d99bf4d390e2ee1c6f606939f18ee1e2000d05020000006b483045022100b70d158b43cbcded60e6977e93f9a84966bc0cec6f2dfd1463d1223a90563f0d02207548d081069de570a494d0967ba388ff02641d91cadb060587ead95a98d4e3534121038eab72ec78e639d02758e7860cdec018b49498c307791f785aa3019622f4ea5bffffffff0258020000000000001976a914769bdff96a02f9135a1d19b749db6a78fe07dc9088ace5100000000000001976a9149e089b6889e032d46e3b915a3392edfd616fb1c488ac00000000";

    fn fork_id_all() -> SighashType {
        SighashType::new(SIGHASH_ALL | SIGHASH_FORKID)
    }

    fn fixture_key() -> PrivateKey {
        PrivateKey::from_wif(WIF).unwrap()
    }

    fn fixture_utxo() -> UnspentOutput {
        let hash = Hash::from_hex(
            "050d00e2e18ef13969606f1ceee290d3f49bd940684ce39898159352952b8ce2",
        )
        .unwrap();
        UnspentOutput::from_parts(
            5151,
            Script::from_hex(P2PKH_SCRIPT).unwrap(),
            OutPoint::new(hash, 2),
        )
    }

    fn hash20(hex_str: &str) -> [u8; 20] {
        let bytes = hex::decode(hex_str).unwrap();
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes);
        out
    }

    fn fixture_transfer() -> Transaction {
        let to = Address::PubkeyHash(hash20("769bdff96a02f9135a1d19b749db6a78fe07dc90"));
        let change = Address::PubkeyHash(hash20("9e089b6889e032d46e3b915a3392edfd616fb1c4"));
        build_transfer(&to, 600, 226, &change, &[fixture_utxo()]).unwrap()
    }

    /// Verify a complete P2PKH transfer signs to known bytes.
    #[test]
    fn test_sign_p2pkh_transfer() {
        let tx = fixture_transfer();
        assert_eq!(
            tx.outputs[0].locking_script.to_hex(),
            "76a914769bdff96a02f9135a1d19b749db6a78fe07dc9088ac"
        );
        assert_eq!(
            tx.outputs[1].locking_script.to_hex(),
            "76a9149e089b6889e032d46e3b915a3392edfd616fb1c488ac"
        );

        let mut provider = MemoryKeyProvider::new();
        provider.add_key(fixture_key());
        let signer = TransactionSigner::new(provider, fork_id_all());

        let signed = signer.sign(&tx, &[fixture_utxo()]).unwrap();
        assert_eq!(signed.to_hex(), SIGNED_TX_HEX);
        assert_eq!(
            signed.tx_id_hex(),
            "96ee20002b34e468f9d3c5ee54f6a8ddaa61c118889c4f35395c2cd93ba5bbb4"
        );
    }

    /// Verify signing an already-signed transaction reproduces it.
    #[test]
    fn test_resign_is_idempotent() {
        let mut provider = MemoryKeyProvider::new();
        provider.add_key(fixture_key());
        let signer = TransactionSigner::new(provider, fork_id_all());

        let signed = Transaction::from_hex(SIGNED_TX_HEX).unwrap();
        let resigned = signer.sign(&signed, &[fixture_utxo()]).unwrap();
        assert_eq!(resigned.to_hex(), SIGNED_TX_HEX);
    }

    /// Verify inputs without a matching key are left unsigned.
    #[test]
    fn test_missing_key_leaves_input_unsigned() {
        let signer = TransactionSigner::new(MemoryKeyProvider::new(), fork_id_all());
        let signed = signer.sign(&fixture_transfer(), &[fixture_utxo()]).unwrap();
        assert!(signed.inputs[0].unlocking_script.is_empty());
        assert!(signed.inputs[0].witness.is_empty());
    }

    /// Verify a P2SH spend appends the redeem script after the unlocking
    /// data.
    #[test]
    fn test_sign_p2sh() {
        let key = fixture_key();
        let redeem = Script::from_hex(P2PKH_SCRIPT).unwrap();
        let script_hash = hash160(redeem.to_bytes());
        let locking = Script::build_pay_to_script_hash(&script_hash);

        let mut utxo = fixture_utxo();
        utxo.output.locking_script = locking;

        let mut provider = MemoryKeyProvider::new();
        provider.add_key(key.clone());
        provider.add_script(redeem.clone());
        let signer = TransactionSigner::new(provider, fork_id_all());

        let signed = signer.sign(&fixture_transfer(), &[utxo]).unwrap();
        let chunks = signed.inputs[0].unlocking_script.chunks().unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1].data.as_deref(), Some(&key.public_key().to_compressed()[..]));
        assert_eq!(chunks[2].data.as_deref(), Some(redeem.to_bytes()));
        assert!(signed.inputs[0].witness.is_empty());
    }

    /// Verify a P2SH output with no known redeem script fails.
    #[test]
    fn test_unresolvable_redeem_script() {
        let mut utxo = fixture_utxo();
        utxo.output.locking_script = Script::build_pay_to_script_hash(&[0x11; 20]);

        let signer = TransactionSigner::new(MemoryKeyProvider::new(), fork_id_all());
        assert!(matches!(
            signer.sign(&fixture_transfer(), &[utxo]),
            Err(TransactionError::InvalidOutputScript)
        ));
    }

    /// Verify a native P2WPKH spend produces a two-item witness stack and
    /// an empty unlocking script.
    #[test]
    fn test_sign_p2wpkh() {
        let key = fixture_key();
        let keyhash = key.public_key().hash160();

        let mut utxo = fixture_utxo();
        utxo.output.locking_script = Script::build_pay_to_witness_pubkey_hash(&keyhash);

        let mut provider = MemoryKeyProvider::new();
        provider.add_key(key.clone());
        let sighash_type = SighashType::new(SIGHASH_ALL);
        let signer = TransactionSigner::new(provider, sighash_type);

        let tx = fixture_transfer();
        let signed = signer.sign(&tx, &[utxo.clone()]).unwrap();

        assert!(signed.inputs[0].unlocking_script.is_empty());
        let witness = &signed.inputs[0].witness;
        assert_eq!(witness.len(), 2);
        assert_eq!(witness[1], key.public_key().to_compressed().to_vec());
        assert_eq!(*witness[0].last().unwrap(), SIGHASH_ALL as u8);

        // The signature must verify against the BIP143 digest over the
        // canonical P2PKH script code.
        let script_code = Script::build_pay_to_public_key_hash(&keyhash);
        let digest = signature_hash(
            &tx,
            0,
            &script_code,
            utxo.value(),
            sighash_type,
            SigVersion::WitnessV0,
        )
        .unwrap();
        let der = &witness[0][..witness[0].len() - 1];
        let signature = wallet_primitives::ec::Signature::from_der(der).unwrap();
        assert!(key.public_key().verify(&digest, &signature));
    }

    /// Verify a native P2WSH spend carries the witness script as the last
    /// stack item.
    #[test]
    fn test_sign_p2wsh() {
        let key = fixture_key();
        let witness_script = Script::build_pay_to_public_key_hash(&key.public_key().hash160());
        let program = wallet_primitives::hash::sha256(witness_script.to_bytes());

        let mut utxo = fixture_utxo();
        utxo.output.locking_script = Script::build_pay_to_witness_script_hash(&program);

        let mut provider = MemoryKeyProvider::new();
        provider.add_key(key.clone());
        provider.add_script(witness_script.clone());
        let signer = TransactionSigner::new(provider, SighashType::new(SIGHASH_ALL));

        let signed = signer.sign(&fixture_transfer(), &[utxo]).unwrap();
        assert!(signed.inputs[0].unlocking_script.is_empty());
        let witness = &signed.inputs[0].witness;
        assert_eq!(witness.len(), 3);
        assert_eq!(witness[2], witness_script.to_bytes().to_vec());
    }

    /// Verify a P2SH-wrapped multisig unlock starts with OP_0 and ends
    /// with the redeem script.
    #[test]
    fn test_sign_p2sh_multisig() {
        let key = fixture_key();
        let other =
            hex::decode("02f0d97c290e79bf2a8660c406aa56b6f189ff79f2245cc5aff82808b58131b4d5")
                .unwrap();
        let redeem = Script::build_multisig(
            &[key.public_key().to_compressed().to_vec(), other],
            1,
        )
        .unwrap();
        let script_hash = hash160(redeem.to_bytes());

        let mut utxo = fixture_utxo();
        utxo.output.locking_script = Script::build_pay_to_script_hash(&script_hash);

        let mut provider = MemoryKeyProvider::new();
        provider.add_key(key);
        provider.add_script(redeem.clone());
        let signer = TransactionSigner::new(provider, fork_id_all());

        let signed = signer.sign(&fixture_transfer(), &[utxo]).unwrap();
        let chunks = signed.inputs[0].unlocking_script.chunks().unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].op, OP_0);
        assert!(chunks[0].data.is_none());
        assert_eq!(chunks[2].data.as_deref(), Some(redeem.to_bytes()));
    }

    /// Verify SIGHASH_SINGLE inputs past the last output are skipped.
    #[test]
    fn test_single_skips_unmatched_inputs() {
        let mut tx = fixture_transfer();
        tx.outputs.truncate(1);
        tx.add_input(crate::input::TransactionInput::new(OutPoint::new(
            Hash::from_hex(
                "1f5c38dfcf6f1a5f5a87c416076d392c87e6d41970d5ad5e477a02d66bde9758",
            )
            .unwrap(),
            0,
        )));

        let mut provider = MemoryKeyProvider::new();
        provider.add_key(fixture_key());
        let signer = TransactionSigner::new(
            provider,
            SighashType::new(SIGHASH_SINGLE | SIGHASH_FORKID),
        );

        let utxos = [fixture_utxo(), fixture_utxo()];
        let signed = signer.sign(&tx, &utxos).unwrap();
        assert!(!signed.inputs[0].unlocking_script.is_empty());
        assert!(signed.inputs[1].unlocking_script.is_empty());
    }

    /// Verify an unrecognized locking script is rejected.
    #[test]
    fn test_unrecognized_script() {
        let mut utxo = fixture_utxo();
        utxo.output.locking_script = Script::from_hex("6a0548656c6c6f").unwrap();

        let mut provider = MemoryKeyProvider::new();
        provider.add_key(fixture_key());
        let signer = TransactionSigner::new(provider, fork_id_all());
        assert!(matches!(
            signer.sign(&fixture_transfer(), &[utxo]),
            Err(TransactionError::InvalidOutputScript)
        ));
    }
}

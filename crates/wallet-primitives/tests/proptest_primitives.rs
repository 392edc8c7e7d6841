use proptest::prelude::*;

use wallet_primitives::chainhash::Hash;
use wallet_primitives::ec::{PrivateKey, Signature};
use wallet_primitives::hash::sha256;
use wallet_primitives::util::{ByteReader, ByteWriter, VarInt};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn private_key_wif_roundtrip(seed in prop::array::uniform32(any::<u8>())) {
        // Not all 32-byte arrays are valid private keys (must be < curve order, nonzero).
        if let Ok(key) = PrivateKey::from_bytes(&seed) {
            let wif = key.to_wif();
            let key2 = PrivateKey::from_wif(&wif).unwrap();
            prop_assert_eq!(key.to_hex(), key2.to_hex());
        }
    }

    #[test]
    fn ecdsa_sign_verify_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        if let Ok(key) = PrivateKey::from_bytes(&seed) {
            let hash = sha256(&msg);
            let sig = key.sign(&hash).unwrap();
            prop_assert!(key.public_key().verify(&hash, &sig));
        }
    }

    #[test]
    fn signature_der_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..64)
    ) {
        if let Ok(key) = PrivateKey::from_bytes(&seed) {
            let hash = sha256(&msg);
            let sig = key.sign(&hash).unwrap();
            let der = sig.to_der();
            let sig2 = Signature::from_der(&der).unwrap();
            prop_assert_eq!(sig, sig2);
        }
    }

    #[test]
    fn hash_hex_roundtrip(bytes in prop::array::uniform32(any::<u8>())) {
        let hash = Hash::new(bytes);
        let hex_str = hash.to_string();
        let hash2 = Hash::from_hex(&hex_str).unwrap();
        prop_assert_eq!(hash.as_bytes(), hash2.as_bytes());
    }

    #[test]
    fn varint_roundtrip(value in any::<u64>()) {
        let varint = VarInt::from(value);
        let bytes = varint.to_bytes();
        let (decoded, consumed) = VarInt::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded.value(), value);
        prop_assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn reader_writer_roundtrip(
        a in any::<u8>(),
        b in any::<u16>(),
        c in any::<u32>(),
        d in any::<u64>(),
        tail in prop::collection::vec(any::<u8>(), 0..64)
    ) {
        let mut writer = ByteWriter::new();
        writer.write_u8(a);
        writer.write_u16_le(b);
        writer.write_u32_le(c);
        writer.write_u64_le(d);
        writer.write_varint(VarInt::from(tail.len()));
        writer.write_bytes(&tail);
        let bytes = writer.into_bytes();

        let mut reader = ByteReader::new(&bytes);
        prop_assert_eq!(reader.read_u8().unwrap(), a);
        prop_assert_eq!(reader.read_u16_le().unwrap(), b);
        prop_assert_eq!(reader.read_u32_le().unwrap(), c);
        prop_assert_eq!(reader.read_u64_le().unwrap(), d);
        let len = reader.read_varint().unwrap().value() as usize;
        prop_assert_eq!(reader.read_bytes(len).unwrap(), &tail[..]);
        prop_assert_eq!(reader.remaining(), 0);
    }
}

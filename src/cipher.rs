//! AES-CTR keystream transform.
//!
//! The transform is deterministic: a fixed (key, IV, plaintext) triple always
//! produces the same ciphertext, and the ciphertext length always equals the
//! plaintext length. The service layer invokes it with an all-zero IV so that
//! repeated benchmark runs are byte-for-byte reproducible; nothing here is
//! suitable for protecting real data.

use aes::cipher::{KeyIvInit, StreamCipher};
use aes::{Aes128, Aes192, Aes256};
use ctr::Ctr128BE;

use crate::error::{Error, Result};

/// AES block size in bytes; also the required IV length.
pub const BLOCK_SIZE: usize = 16;

/// The all-zero IV used for every service-side encryption.
pub const ZERO_IV: [u8; BLOCK_SIZE] = [0u8; BLOCK_SIZE];

type Aes128Ctr = Ctr128BE<Aes128>;
type Aes192Ctr = Ctr128BE<Aes192>;
type Aes256Ctr = Ctr128BE<Aes256>;

/// Decodes a hex-encoded key and checks it against the accepted AES key sizes.
pub fn decode_key(key_hex: &str) -> Result<Vec<u8>> {
    let key = hex::decode(key_hex)?;
    match key.len() {
        16 | 24 | 32 => Ok(key),
        n => Err(Error::InvalidKey(format!(
            "unsupported key length: {} bytes (expected 16, 24 or 32)",
            n
        ))),
    }
}

/// Applies the AES-CTR keystream for `key`/`iv` to `data`.
///
/// The key length selects the AES variant (16/24/32 bytes for
/// AES-128/192/256). Works in both directions: applying the transform twice
/// with the same key and IV recovers the input.
pub fn ctr_transform(key: &[u8], iv: &[u8; BLOCK_SIZE], data: &[u8]) -> Result<Vec<u8>> {
    let mut buf = data.to_vec();
    match key.len() {
        16 => {
            let mut cipher = Aes128Ctr::new_from_slices(key, iv)
                .map_err(|e| Error::InvalidKey(e.to_string()))?;
            cipher.apply_keystream(&mut buf);
        }
        24 => {
            let mut cipher = Aes192Ctr::new_from_slices(key, iv)
                .map_err(|e| Error::InvalidKey(e.to_string()))?;
            cipher.apply_keystream(&mut buf);
        }
        32 => {
            let mut cipher = Aes256Ctr::new_from_slices(key, iv)
                .map_err(|e| Error::InvalidKey(e.to_string()))?;
            cipher.apply_keystream(&mut buf);
        }
        n => {
            return Err(Error::InvalidKey(format!(
                "unsupported key length: {} bytes (expected 16, 24 or 32)",
                n
            )))
        }
    }
    Ok(buf)
}

/// Decodes `key_hex` and encrypts `plaintext` under the all-zero IV.
///
/// The key is re-decoded on every call; the service intentionally keeps no
/// cipher state between requests.
pub fn encrypt_with_hex_key(key_hex: &str, plaintext: &[u8]) -> Result<Vec<u8>> {
    let key = decode_key(key_hex)?;
    ctr_transform(&key, &ZERO_IV, plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv_from_hex(s: &str) -> [u8; BLOCK_SIZE] {
        let bytes = hex::decode(s).unwrap();
        let mut iv = [0u8; BLOCK_SIZE];
        iv.copy_from_slice(&bytes);
        iv
    }

    // FIPS-197 Appendix C block-encryption vectors. The first CTR keystream
    // block is the block encryption of the initial counter, so setting the IV
    // to the vector's plaintext block and encrypting sixteen zero bytes must
    // reproduce the published ciphertext block.
    #[test]
    fn fips197_vector_aes128() {
        let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let iv = iv_from_hex("00112233445566778899aabbccddeeff");
        let ct = ctr_transform(&key, &iv, &[0u8; 16]).unwrap();
        assert_eq!(hex::encode(ct), "69c4e0d86a7b0430d8cdb78070b4c55a");
    }

    #[test]
    fn fips197_vector_aes192() {
        let key = hex::decode("000102030405060708090a0b0c0d0e0f1011121314151617").unwrap();
        let iv = iv_from_hex("00112233445566778899aabbccddeeff");
        let ct = ctr_transform(&key, &iv, &[0u8; 16]).unwrap();
        assert_eq!(hex::encode(ct), "dda97ca4864cdfe06eaf70a0ec0d7191");
    }

    #[test]
    fn fips197_vector_aes256() {
        let key =
            hex::decode("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f")
                .unwrap();
        let iv = iv_from_hex("00112233445566778899aabbccddeeff");
        let ct = ctr_transform(&key, &iv, &[0u8; 16]).unwrap();
        assert_eq!(hex::encode(ct), "8ea2b7ca516745bfeafc49904b496089");
    }

    // SP 800-38A F.5.1, first two blocks: covers the big-endian counter
    // increment between blocks.
    #[test]
    fn sp800_38a_ctr_aes128() {
        let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let iv = iv_from_hex("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
        let pt = hex::decode(
            "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51",
        )
        .unwrap();
        let ct = ctr_transform(&key, &iv, &pt).unwrap();
        assert_eq!(
            hex::encode(ct),
            "874d6191b620e3261bef6864990db6ce9806f66b7970fdff8617187bb9fffdff"
        );
    }

    // The well-known AES-128 encryption of the zero block under the zero key;
    // this is the first keystream block the service produces with its zero IV.
    #[test]
    fn zero_key_zero_iv_keystream() {
        let key = [0u8; 16];
        let ct = ctr_transform(&key, &ZERO_IV, &[0u8; 16]).unwrap();
        assert_eq!(hex::encode(ct), "66e94bd4ef8a2c3b884cfa59ca342b2e");
    }

    #[test]
    fn deterministic_across_invocations() {
        let key = decode_key("6368616e676520746869732070617373").unwrap();
        let plaintext = b"some benchmark payload";
        let first = ctr_transform(&key, &ZERO_IV, plaintext).unwrap();
        let second = ctr_transform(&key, &ZERO_IV, plaintext).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn length_preserved_for_all_sizes() {
        let key = decode_key("6368616e676520746869732070617373").unwrap();
        for len in [0usize, 1, 15, 16, 17, 31, 32, 33, 1024] {
            let plaintext = vec![0xabu8; len];
            let ct = ctr_transform(&key, &ZERO_IV, &plaintext).unwrap();
            assert_eq!(ct.len(), len);
        }
    }

    #[test]
    fn double_application_round_trips() {
        let key = decode_key("6368616e676520746869732070617373").unwrap();
        let plaintext = b"round trip me, please: \x00\x01\x02\xff";
        let ct = ctr_transform(&key, &ZERO_IV, plaintext).unwrap();
        assert_ne!(&ct[..], &plaintext[..]);
        let recovered = ctr_transform(&key, &ZERO_IV, &ct).unwrap();
        assert_eq!(&recovered[..], &plaintext[..]);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(matches!(decode_key("not hex at all"), Err(Error::InvalidKey(_))));
        // odd number of digits
        assert!(matches!(decode_key("abc"), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn rejects_unsupported_key_lengths() {
        // 10 bytes
        assert!(matches!(
            decode_key("00112233445566778899"),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(decode_key(""), Err(Error::InvalidKey(_))));
        let short_key = [0u8; 8];
        assert!(ctr_transform(&short_key, &ZERO_IV, b"data").is_err());
    }
}

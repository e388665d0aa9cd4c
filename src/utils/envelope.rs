//! Encrypted translation table container.
//!
//! Layout: `TCSV1` magic, 16 byte IV, AES-256-CBC ciphertext with PKCS7 padding.
use aes::Aes256;
use aes::cipher::{BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use anyhow::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub const MAGIC: &[u8; 5] = b"TCSV1";
pub const KEY_SIZE: usize = 32;
pub const IV_SIZE: usize = 16;
pub const HEADER_SIZE: usize = MAGIC.len() + IV_SIZE;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;

/// Decodes a base64 key and checks that it is exactly 32 bytes long.
pub fn decode_key(key: &str) -> Result<[u8; KEY_SIZE]> {
    let data = STANDARD
        .decode(key.trim())
        .map_err(|e| anyhow::anyhow!("Key is not valid base64: {}", e))?;
    let len = data.len();
    data.try_into().map_err(|_| {
        anyhow::anyhow!("Key must decode to {} bytes, got {} bytes", KEY_SIZE, len)
    })
}

pub fn encode_key(key: &[u8; KEY_SIZE]) -> String {
    STANDARD.encode(key)
}

/// Generates a fresh random key.
pub fn generate_key() -> [u8; KEY_SIZE] {
    rand::random()
}

/// Encrypts `plain` under `key` with the given IV and returns the full envelope.
pub fn seal_with_iv(plain: &[u8], key: &[u8; KEY_SIZE], iv: &[u8; IV_SIZE]) -> Vec<u8> {
    let ct = Aes256CbcEnc::new(key.into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plain);
    let mut out = Vec::with_capacity(HEADER_SIZE + ct.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(iv);
    out.extend_from_slice(&ct);
    out
}

/// Encrypts `plain` under `key` with a fresh random IV.
///
/// Returns the envelope and the IV used.
pub fn seal(plain: &[u8], key: &[u8; KEY_SIZE]) -> (Vec<u8>, [u8; IV_SIZE]) {
    let iv: [u8; IV_SIZE] = rand::random();
    (seal_with_iv(plain, key, &iv), iv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes::cipher::BlockDecryptMut;

    type Aes256CbcDec = cbc::Decryptor<Aes256>;

    fn open(envelope: &[u8], key: &[u8; KEY_SIZE]) -> Vec<u8> {
        assert_eq!(&envelope[..MAGIC.len()], MAGIC);
        let iv: [u8; IV_SIZE] = envelope[MAGIC.len()..HEADER_SIZE].try_into().unwrap();
        Aes256CbcDec::new(key.into(), (&iv).into())
            .decrypt_padded_vec_mut::<Pkcs7>(&envelope[HEADER_SIZE..])
            .unwrap()
    }

    #[test]
    fn test_seal_roundtrip() {
        let key = generate_key();
        let plain = "source,target\nこんにちは,Hello\n".as_bytes();
        let (envelope, iv) = seal(plain, &key);
        assert_eq!(&envelope[MAGIC.len()..HEADER_SIZE], &iv);
        assert_eq!((envelope.len() - HEADER_SIZE) % 16, 0);
        assert_eq!(open(&envelope, &key), plain);
    }

    #[test]
    fn test_seal_pads_full_block() {
        let key = [0u8; KEY_SIZE];
        let iv = [1u8; IV_SIZE];
        let envelope = seal_with_iv(&[b'a'; 32], &key, &iv);
        // A block aligned input gains one whole padding block.
        assert_eq!(envelope.len(), HEADER_SIZE + 48);
        let envelope = seal_with_iv(b"", &key, &iv);
        assert_eq!(envelope.len(), HEADER_SIZE + 16);
        assert_eq!(open(&envelope, &key), b"");
    }

    #[test]
    fn test_seal_uses_fresh_iv() {
        let key = generate_key();
        let (a, iv_a) = seal(b"same", &key);
        let (b, iv_b) = seal(b"same", &key);
        assert_ne!(iv_a, iv_b);
        assert_ne!(a, b);
    }

    #[test]
    fn test_decode_key() {
        let key = decode_key("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=").unwrap();
        assert_eq!(key, [0u8; KEY_SIZE]);
        let key = generate_key();
        assert_eq!(decode_key(&encode_key(&key)).unwrap(), key);
        assert!(decode_key("AAAA").is_err());
        assert!(decode_key("not base64!").is_err());
    }
}

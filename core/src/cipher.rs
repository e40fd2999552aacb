//! One-way AES encryption for sensitive personal fields.
//!
//! # Design
//! SSN and EIN values are encrypted client-side before transmission and
//! only ever decrypted by the remote service — there is no decrypt path in
//! this library. Each call draws a fresh random 16-byte IV, so encrypting
//! the same value twice yields different tokens, and concurrent callers
//! share no RNG state.

use aes::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

const KEY_LEN: usize = 32;

/// Encrypt one sensitive field for transmission.
///
/// The plaintext is percent-encoded, encrypted with AES-256-CBC (PKCS7
/// padding) under key material derived from the shared secret, and the IV
/// and ciphertext are concatenated and base64-encoded into a single
/// wire-safe token.
pub fn encrypt_pii(plaintext: &str, secret: &str) -> String {
    let iv: [u8; 16] = rand::random();
    let encoded = urlencoding::encode(plaintext);
    let ciphertext = Aes256CbcEnc::new(&key_material(secret).into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(encoded.as_bytes());
    let mut token = Vec::with_capacity(iv.len() + ciphertext.len());
    token.extend_from_slice(&iv);
    token.extend_from_slice(&ciphertext);
    BASE64.encode(token)
}

// Dashes are stripped from the shared secret before it is used as key
// material; the remainder is truncated or zero-padded to the AES-256 key
// size. The server derives the same key to decrypt.
fn key_material(secret: &str) -> [u8; KEY_LEN] {
    let stripped: Vec<u8> = secret.bytes().filter(|b| *b != b'-').collect();
    let mut key = [0u8; KEY_LEN];
    let n = stripped.len().min(KEY_LEN);
    key[..n].copy_from_slice(&stripped[..n]);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes::cipher::BlockDecryptMut;

    type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

    const SECRET: &str = "abcd-1234-efgh-5678";

    /// Test-only stand-in for the server side of the exchange.
    fn decrypt(token: &str, secret: &str) -> String {
        let raw = BASE64.decode(token).unwrap();
        let (iv, ciphertext) = raw.split_at(16);
        let plaintext = Aes256CbcDec::new_from_slices(&key_material(secret), iv)
            .unwrap()
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .unwrap();
        String::from_utf8(plaintext).unwrap()
    }

    #[test]
    fn token_is_base64_of_iv_plus_ciphertext() {
        let token = encrypt_pii("111223333", SECRET);
        assert!(token.len() > 20);
        let raw = BASE64.decode(&token).unwrap();
        // 16-byte IV plus at least one padded block
        assert!(raw.len() >= 32);
        assert_eq!(raw.len() % 16, 0);
    }

    #[test]
    fn server_side_decryption_recovers_plaintext() {
        let token = encrypt_pii("111223333", SECRET);
        assert_eq!(decrypt(&token, SECRET), "111223333");
    }

    #[test]
    fn iv_is_fresh_per_call() {
        let a = encrypt_pii("111223333", SECRET);
        let b = encrypt_pii("111223333", SECRET);
        assert_ne!(a, b);
        let iv_a = &BASE64.decode(&a).unwrap()[..16];
        let iv_b = &BASE64.decode(&b).unwrap()[..16];
        assert_ne!(iv_a, iv_b);
    }

    #[test]
    fn key_material_strips_dashes_and_pads() {
        let key = key_material("ab-cd");
        assert_eq!(&key[..4], b"abcd");
        assert!(key[4..].iter().all(|b| *b == 0));
    }
}

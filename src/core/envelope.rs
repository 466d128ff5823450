//! Versioned authenticated-encryption envelope.
//!
//! Wire format, byte for byte:
//!
//! ```text
//! magic(8="SFDOTENV") | version(1) | reserved(3) | salt(16) | nonce(24) | ciphertext(..)
//! ```
//!
//! The cryptographic primitives (password hashing and the authenticated
//! cipher) are reached through [`CryptoProvider`] rather than called
//! directly, so the framing logic in [`wrap`]/[`unwrap`] can be tested
//! independent of cryptographic strength.

use thiserror::Error;

pub const MAGIC: &[u8; 8] = b"SFDOTENV";
const VERSION: u8 = 0x01;
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 24;
const TAG_LEN: usize = 16;
const HEADER_LEN: usize = MAGIC.len() + 1 + 3 + SALT_LEN + NONCE_LEN; // 52
const MIN_ENVELOPE_LEN: usize = HEADER_LEN + TAG_LEN; // 68

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("passphrase must not be empty")]
    KeyInvalid,

    #[error("{0}")]
    Decrypt(String),

    #[error("{0}")]
    CryptoInit(String),
}

/// Key derivation and authenticated-cipher operations, injected so the
/// envelope framing can be validated without a real cryptographic backend.
pub trait CryptoProvider {
    fn derive_key(&self, passphrase: &[u8], salt: &[u8; SALT_LEN]) -> Result<[u8; 32], EnvelopeError>;
    fn random_salt(&self) -> [u8; SALT_LEN];
    fn random_nonce(&self) -> [u8; NONCE_LEN];
    fn seal(&self, plaintext: &[u8], key: &[u8; 32], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>, EnvelopeError>;
    fn open(&self, ciphertext: &[u8], key: &[u8; 32], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>, EnvelopeError>;
}

/// `true` iff `bytes` is at least as long as the fixed header and begins
/// with the magic. Does not validate version, length against the
/// ciphertext-plus-tag minimum, or authenticate anything — it is a cheap
/// detection probe, not a decrypt attempt; `unwrap` enforces the fuller
/// `MIN_ENVELOPE_LEN` bound once it commits to treating input as enveloped.
pub fn is_enveloped(bytes: &[u8]) -> bool {
    bytes.len() >= HEADER_LEN && &bytes[..MAGIC.len()] == MAGIC
}

/// Encrypt `plaintext` under `passphrase`, using `provider` for the KDF and
/// cipher, and frame the result per the wire format above.
pub fn wrap_with(
    plaintext: &[u8],
    passphrase: &[u8],
    provider: &dyn CryptoProvider,
) -> Result<Vec<u8>, EnvelopeError> {
    if passphrase.is_empty() {
        return Err(EnvelopeError::KeyInvalid);
    }

    let salt = provider.random_salt();
    let nonce = provider.random_nonce();
    let key = provider.derive_key(passphrase, &salt)?;
    let ciphertext = provider.seal(plaintext, &key, &nonce)?;

    let mut out = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    out.extend_from_slice(MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&[0u8; 3]);
    out.extend_from_slice(&salt);
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Reverse [`wrap_with`]: validate framing, derive the key, and decrypt.
/// Wrong-key and tampered-data failures are both reported as the same
/// `Decrypt` error — this is deliberate, to avoid giving callers a
/// password-guessing oracle.
pub fn unwrap_with(
    bytes: &[u8],
    passphrase: &[u8],
    provider: &dyn CryptoProvider,
) -> Result<Vec<u8>, EnvelopeError> {
    if passphrase.is_empty() {
        return Err(EnvelopeError::KeyInvalid);
    }
    if bytes.len() < MIN_ENVELOPE_LEN {
        return Err(EnvelopeError::Decrypt("data is not encrypted".into()));
    }
    if &bytes[..MAGIC.len()] != MAGIC {
        return Err(EnvelopeError::Decrypt("data is not encrypted".into()));
    }

    let version = bytes[MAGIC.len()];
    if version != VERSION {
        return Err(EnvelopeError::Decrypt("unsupported encryption format version".into()));
    }

    let salt_start = MAGIC.len() + 1 + 3;
    let nonce_start = salt_start + SALT_LEN;
    let ct_start = nonce_start + NONCE_LEN;

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&bytes[salt_start..nonce_start]);
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&bytes[nonce_start..ct_start]);
    let ciphertext = &bytes[ct_start..];

    let key = provider.derive_key(passphrase, &salt)?;
    provider
        .open(ciphertext, &key, &nonce)
        .map_err(|_| EnvelopeError::Decrypt("wrong key or tampered data".into()))
}

#[cfg(feature = "crypto")]
pub use real_crypto::SodiumLikeProvider;

#[cfg(feature = "crypto")]
mod real_crypto {
    use super::{EnvelopeError, CryptoProvider, NONCE_LEN, SALT_LEN};
    use argon2::{Algorithm, Argon2, Params, Version};
    use crypto_secretbox::{
        aead::{Aead, KeyInit},
        Key, Nonce, XSalsa20Poly1305,
    };
    use rand::RngCore;
    use zeroize::Zeroizing;

    // Argon2id, moderate cost: libsodium's "moderate" opslimit/memlimit
    // preset translated into Argon2 parameters.
    const M_COST_KIB: u32 = 19_456;
    const T_COST: u32 = 2;
    const P_COST: u32 = 1;
    const KEY_LEN: usize = 32;

    /// Default [`CryptoProvider`]: Argon2id for key derivation,
    /// XSalsa20-Poly1305 (libsodium's `secretbox` construction) for
    /// authenticated encryption.
    #[derive(Default)]
    pub struct SodiumLikeProvider;

    impl CryptoProvider for SodiumLikeProvider {
        fn derive_key(&self, passphrase: &[u8], salt: &[u8; SALT_LEN]) -> Result<[u8; 32], EnvelopeError> {
            let params = Params::new(M_COST_KIB, T_COST, P_COST, Some(KEY_LEN))
                .map_err(|e| EnvelopeError::CryptoInit(e.to_string()))?;
            let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

            let mut out = Zeroizing::new([0u8; KEY_LEN]);
            argon2
                .hash_password_into(passphrase, salt, &mut *out)
                .map_err(|e| EnvelopeError::CryptoInit(e.to_string()))?;
            Ok(*out)
        }

        fn random_salt(&self) -> [u8; SALT_LEN] {
            let mut salt = [0u8; SALT_LEN];
            rand::rngs::OsRng.fill_bytes(&mut salt);
            salt
        }

        fn random_nonce(&self) -> [u8; NONCE_LEN] {
            let mut nonce = [0u8; NONCE_LEN];
            rand::rngs::OsRng.fill_bytes(&mut nonce);
            nonce
        }

        fn seal(&self, plaintext: &[u8], key: &[u8; 32], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>, EnvelopeError> {
            let cipher = XSalsa20Poly1305::new(Key::from_slice(key));
            cipher
                .encrypt(Nonce::from_slice(nonce), plaintext)
                .map_err(|e| EnvelopeError::CryptoInit(e.to_string()))
        }

        fn open(&self, ciphertext: &[u8], key: &[u8; 32], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>, EnvelopeError> {
            let cipher = XSalsa20Poly1305::new(Key::from_slice(key));
            cipher
                .decrypt(Nonce::from_slice(nonce), ciphertext)
                .map_err(|_| EnvelopeError::Decrypt("wrong key or tampered data".into()))
        }
    }
}

/// Encrypt `plaintext` under `passphrase` using the default provider.
#[cfg(feature = "crypto")]
pub fn wrap(plaintext: &[u8], passphrase: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    wrap_with(plaintext, passphrase, &real_crypto::SodiumLikeProvider)
}

/// Decrypt `bytes` under `passphrase` using the default provider.
#[cfg(feature = "crypto")]
pub fn unwrap(bytes: &[u8], passphrase: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    unwrap_with(bytes, passphrase, &real_crypto::SodiumLikeProvider)
}

#[cfg(not(feature = "crypto"))]
pub fn wrap(_plaintext: &[u8], _passphrase: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    Err(EnvelopeError::CryptoInit(
        "this build was compiled without the `crypto` feature".into(),
    ))
}

#[cfg(not(feature = "crypto"))]
pub fn unwrap(_bytes: &[u8], _passphrase: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    Err(EnvelopeError::CryptoInit(
        "this build was compiled without the `crypto` feature".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic, cryptographically-worthless provider used to pin down
    /// the framing logic (header layout, length checks, version check)
    /// independent of real cryptographic strength: "sealing" XORs the
    /// plaintext with a key-derived keystream and appends a fixed tag, and
    /// "opening" verifies that tag.
    struct FakeProvider;

    const FAKE_TAG: [u8; TAG_LEN] = [0x42; TAG_LEN];

    fn keystream(key: &[u8; 32], nonce: &[u8; NONCE_LEN], len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| key[i % key.len()] ^ nonce[i % nonce.len()] ^ (i as u8))
            .collect()
    }

    impl CryptoProvider for FakeProvider {
        fn derive_key(&self, passphrase: &[u8], salt: &[u8; SALT_LEN]) -> Result<[u8; 32], EnvelopeError> {
            let mut key = [0u8; 32];
            for (i, b) in passphrase.iter().chain(salt.iter()).enumerate() {
                key[i % 32] ^= b;
            }
            Ok(key)
        }

        fn random_salt(&self) -> [u8; SALT_LEN] {
            [0x11; SALT_LEN]
        }

        fn random_nonce(&self) -> [u8; NONCE_LEN] {
            [0x22; NONCE_LEN]
        }

        fn seal(&self, plaintext: &[u8], key: &[u8; 32], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>, EnvelopeError> {
            let ks = keystream(key, nonce, plaintext.len());
            let mut out: Vec<u8> = plaintext.iter().zip(ks.iter()).map(|(p, k)| p ^ k).collect();
            out.extend_from_slice(&FAKE_TAG);
            Ok(out)
        }

        fn open(&self, ciphertext: &[u8], key: &[u8; 32], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>, EnvelopeError> {
            if ciphertext.len() < TAG_LEN {
                return Err(EnvelopeError::Decrypt("short ciphertext".into()));
            }
            let (body, tag) = ciphertext.split_at(ciphertext.len() - TAG_LEN);
            if tag != FAKE_TAG {
                return Err(EnvelopeError::Decrypt("bad tag".into()));
            }
            let ks = keystream(key, nonce, body.len());
            Ok(body.iter().zip(ks.iter()).map(|(c, k)| c ^ k).collect())
        }
    }

    #[test]
    fn roundtrip_with_matching_passphrase() {
        let plaintext = b"APP_KEY=secret";
        let wrapped = wrap_with(plaintext, b"pw", &FakeProvider).unwrap();
        assert!(is_enveloped(&wrapped));
        let back = unwrap_with(&wrapped, b"pw", &FakeProvider).unwrap();
        assert_eq!(back, plaintext);
    }

    #[test]
    fn wrong_passphrase_fails_to_decrypt() {
        let wrapped = wrap_with(b"APP_KEY=secret", b"pw", &FakeProvider).unwrap();
        let err = unwrap_with(&wrapped, b"wrong", &FakeProvider).unwrap_err();
        assert!(matches!(err, EnvelopeError::Decrypt(_)));
    }

    #[test]
    fn is_enveloped_checks_magic_and_length() {
        assert!(!is_enveloped(b"not an envelope"));
        assert!(!is_enveloped(MAGIC));
        let wrapped = wrap_with(b"x", b"pw", &FakeProvider).unwrap();
        assert!(is_enveloped(&wrapped));
    }

    #[test]
    fn is_enveloped_only_requires_the_header_length_not_the_unwrap_minimum() {
        // A buffer shorter than `MIN_ENVELOPE_LEN` (header + tag) but at
        // least `HEADER_LEN` long, with the right magic, must still detect
        // as enveloped — `unwrap` is what enforces the longer bound, and
        // reports it as a `Decrypt` error rather than silent fallthrough
        // to plaintext parsing.
        let mut header_only = Vec::new();
        header_only.extend_from_slice(MAGIC);
        header_only.push(VERSION);
        header_only.extend_from_slice(&[0u8; 3]);
        header_only.extend_from_slice(&[0u8; SALT_LEN]);
        header_only.extend_from_slice(&[0u8; NONCE_LEN]);
        assert_eq!(header_only.len(), HEADER_LEN);

        assert!(is_enveloped(&header_only));
        assert!(unwrap_with(&header_only, b"pw", &FakeProvider).is_err());
    }

    #[test]
    fn flipping_a_byte_after_the_header_fails_authentication() {
        let mut wrapped = wrap_with(b"APP_KEY=secret", b"pw", &FakeProvider).unwrap();
        let last = wrapped.len() - 1;
        wrapped[last] ^= 0x01;
        let err = unwrap_with(&wrapped, b"pw", &FakeProvider).unwrap_err();
        assert!(matches!(err, EnvelopeError::Decrypt(_)));
    }

    #[test]
    fn unsupported_version_is_a_decrypt_error() {
        let mut wrapped = wrap_with(b"x", b"pw", &FakeProvider).unwrap();
        wrapped[MAGIC.len()] = 0x02;
        let err = unwrap_with(&wrapped, b"pw", &FakeProvider).unwrap_err();
        assert!(matches!(err, EnvelopeError::Decrypt(msg) if msg.contains("version")));
    }

    #[test]
    fn too_short_input_is_not_encrypted() {
        let err = unwrap_with(b"short", b"pw", &FakeProvider).unwrap_err();
        assert!(matches!(err, EnvelopeError::Decrypt(msg) if msg.contains("not encrypted")));
    }

    #[test]
    fn empty_passphrase_is_rejected_on_both_paths() {
        assert!(matches!(
            wrap_with(b"x", b"", &FakeProvider).unwrap_err(),
            EnvelopeError::KeyInvalid
        ));
        let wrapped = wrap_with(b"x", b"pw", &FakeProvider).unwrap();
        assert!(matches!(
            unwrap_with(&wrapped, b"", &FakeProvider).unwrap_err(),
            EnvelopeError::KeyInvalid
        ));
    }
}

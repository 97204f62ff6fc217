//! src/crypto/cipher.rs
//! Streaming cipher core: AES-256-CTR keystream + running HMAC-SHA256.
//!
//! The encrypt side is encrypt-then-MAC; the decrypt side MACs the stored
//! bytes before decrypting them. Both run over arbitrary chunk sizes and
//! produce the same result regardless of where chunk boundaries fall.
//!
//! Chunks must arrive in stream order. Every mutating call takes `&mut self`,
//! so a state can never be driven from two places at once, and
//! `finish`/`verify` consume the state so nothing runs after finalization.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use hmac::Mac;

use crate::aliases::HmacSha256;
use crate::consts::{NONCE_LEN, TAG_LEN};
use crate::crypto::kdf::DerivedKeys;
use crate::error::CryptoError;

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

struct CipherCore {
    keystream: Aes256Ctr,
    mac: HmacSha256,
    ciphered: u64,
}

impl CipherCore {
    fn new(keys: &DerivedKeys, nonce: &[u8; NONCE_LEN]) -> Result<Self, CryptoError> {
        let keystream = Aes256Ctr::new(keys.cipher_key.expose_secret().into(), nonce.into());
        let mac = <HmacSha256 as Mac>::new_from_slice(keys.mac_key.expose_secret())
            .map_err(|e| CryptoError::KeyDerivation(format!("HMAC key rejected: {e}")))?;
        Ok(Self {
            keystream,
            mac,
            ciphered: 0,
        })
    }

    #[inline]
    fn apply_keystream(&mut self, buf: &mut [u8]) -> Result<(), CryptoError> {
        self.keystream
            .try_apply_keystream(buf)
            .map_err(|_| CryptoError::KeystreamExhausted)?;
        self.ciphered += buf.len() as u64;
        Ok(())
    }
}

/// Encryption state for one container.
pub struct StreamEncryptor {
    core: CipherCore,
}

impl StreamEncryptor {
    pub fn new(keys: &DerivedKeys, nonce: &[u8; NONCE_LEN]) -> Result<Self, CryptoError> {
        Ok(Self {
            core: CipherCore::new(keys, nonce)?,
        })
    }

    /// Feed bytes into the tag without encrypting them (header, plaintext tail).
    #[inline]
    pub fn authenticate(&mut self, bytes: &[u8]) {
        self.core.mac.update(bytes);
    }

    /// Encrypt `chunk` in place and fold the ciphertext into the tag.
    #[inline]
    pub fn process_chunk(&mut self, chunk: &mut [u8]) -> Result<(), CryptoError> {
        self.core.apply_keystream(chunk)?;
        self.core.mac.update(chunk);
        Ok(())
    }

    /// Keystream bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.core.ciphered
    }

    pub fn finish(self) -> [u8; TAG_LEN] {
        self.core.mac.finalize().into_bytes().into()
    }
}

/// Decryption state for one container.
pub struct StreamDecryptor {
    core: CipherCore,
}

impl StreamDecryptor {
    pub fn new(keys: &DerivedKeys, nonce: &[u8; NONCE_LEN]) -> Result<Self, CryptoError> {
        Ok(Self {
            core: CipherCore::new(keys, nonce)?,
        })
    }

    #[inline]
    pub fn authenticate(&mut self, bytes: &[u8]) {
        self.core.mac.update(bytes);
    }

    /// Fold stored ciphertext into the tag, then decrypt it in place.
    ///
    /// The output is unauthenticated until [`verify`](Self::verify) succeeds.
    #[inline]
    pub fn process_chunk(&mut self, chunk: &mut [u8]) -> Result<(), CryptoError> {
        self.core.mac.update(chunk);
        self.core.apply_keystream(chunk)
    }

    pub fn position(&self) -> u64 {
        self.core.ciphered
    }

    /// Constant-time tag check.
    pub fn verify(self, tag: &[u8]) -> Result<(), CryptoError> {
        self.core
            .mac
            .verify_slice(tag)
            .map_err(|_| CryptoError::WrongPasswordOrCorrupt)
    }
}

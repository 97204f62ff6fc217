// src/crypto/rng.rs
//! Fresh randomness for salts and nonces, straight from the OS.
//!
//! A failed draw is an error; the output buffer is never returned partially filled.

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::error::CryptoError;

/// Fresh `N` random bytes from the operating system.
#[inline]
pub fn random_bytes<const N: usize>() -> Result<[u8; N], CryptoError> {
    let mut bytes = [0u8; N];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CryptoError::Rng(e.to_string()))?;
    Ok(bytes)
}

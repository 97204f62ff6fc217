//! src/crypto/kdf.rs
//! PBKDF2-HMAC-SHA512 key derivation, written straight into secure buffers.

use pbkdf2::pbkdf2;
use zeroize::Zeroize;

use crate::aliases::{Aes256Key32, HmacKey32, HmacSha512, KdfOutput64, PasswordString};
use crate::consts::{KEY_LEN, PBKDF2_MAX_ITER, PBKDF2_MIN_ITER, SALT_LEN};
use crate::error::{CryptoError, EngineError};

/// Keys for one container. Both halves are zeroized on drop.
pub struct DerivedKeys {
    pub cipher_key: Aes256Key32,
    pub mac_key: HmacKey32,
}

/// Derive the cipher and MAC keys for `(password, salt, iterations)`.
///
/// Deterministic: the same triple always yields the same keys. The 64-byte
/// PBKDF2 output is split, first half for AES-256-CTR, second for HMAC.
///
/// # Errors
///
/// - [`EngineError::InvalidInput`] - `iterations` outside
///   [`PBKDF2_MIN_ITER`]..=[`PBKDF2_MAX_ITER`]
/// - [`CryptoError::KeyDerivation`] - the PBKDF2 backend rejected the output length
pub fn derive_keys(
    password: &PasswordString,
    salt: &[u8; SALT_LEN],
    iterations: u32,
) -> Result<DerivedKeys, EngineError> {
    if !(PBKDF2_MIN_ITER..=PBKDF2_MAX_ITER).contains(&iterations) {
        return Err(EngineError::InvalidInput(format!(
            "KDF iterations must be within {PBKDF2_MIN_ITER}..={PBKDF2_MAX_ITER}, got {iterations}"
        )));
    }

    let mut okm = KdfOutput64::new([0u8; 64]);
    pbkdf2::<HmacSha512>(
        password.expose_secret().as_bytes(),
        salt,
        iterations,
        okm.expose_secret_mut(),
    )
    .map_err(|e| CryptoError::KeyDerivation(format!("PBKDF2 failed: {e}")))?;

    let mut cipher_key = Aes256Key32::new([0u8; KEY_LEN]);
    let mut mac_key = HmacKey32::new([0u8; KEY_LEN]);
    cipher_key
        .expose_secret_mut()
        .copy_from_slice(&okm.expose_secret()[..KEY_LEN]);
    mac_key
        .expose_secret_mut()
        .copy_from_slice(&okm.expose_secret()[KEY_LEN..]);
    okm.expose_secret_mut().zeroize();

    Ok(DerivedKeys {
        cipher_key,
        mac_key,
    })
}

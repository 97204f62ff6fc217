//! src/text.rs
//! String encryption: a whole-mode container, base64 encoded for transport.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::aliases::PasswordString;
use crate::consts::{DEFAULT_CHUNK_SIZE, HEADER_LEN, TAG_LEN};
use crate::decryptor::open_container;
use crate::encryptor::{encrypt, EncryptParams};
use crate::error::{EngineError, FormatError};
use crate::header::ContainerView;
use crate::policy::HeadSplit;

/// Encrypt `plaintext` and return the container as standard padded base64.
pub fn encrypt_string(
    plaintext: &str,
    password: PasswordString,
    kdf_iterations: u32,
) -> Result<String, EngineError> {
    let params = EncryptParams::with_iterations(kdf_iterations)
        .head(HeadSplit::Whole)
        .chunk_size(plaintext.len().clamp(1, DEFAULT_CHUNK_SIZE));

    let mut container = Vec::with_capacity(HEADER_LEN + plaintext.len() + TAG_LEN);
    encrypt(Cursor::new(plaintext.as_bytes()), &mut container, password, &params)?;
    Ok(STANDARD.encode(&container))
}

/// Decrypt base64 produced by [`encrypt_string`].
///
/// Surrounding whitespace is ignored. The tag is verified before the
/// plaintext is decoded as UTF-8.
pub fn decrypt_string(ciphertext: &str, password: PasswordString) -> Result<String, EngineError> {
    let container = STANDARD
        .decode(ciphertext.trim())
        .map_err(|e| FormatError::Malformed(format!("ciphertext is not valid base64: {e}")))?;

    let view = ContainerView::parse(&container)?;
    let plaintext = open_container(&view, password)?;

    let text = std::str::from_utf8(plaintext.expose_secret())
        .map_err(|_| FormatError::Malformed("plaintext is not valid UTF-8".into()))?;
    Ok(text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pw(s: &str) -> PasswordString {
        PasswordString::new(s.to_string())
    }

    #[test]
    fn round_trip_and_wrong_password() {
        let c = encrypt_string("hello world", pw("pw123"), 5).unwrap();
        assert!(!c.is_empty());
        assert_ne!(c, "hello world");
        assert_eq!(decrypt_string(&c, pw("pw123")).unwrap(), "hello world");

        let err = decrypt_string(&c, pw("wrong")).unwrap_err();
        assert!(err.is_wrong_password_or_corrupt());
    }

    #[test]
    fn empty_string_round_trips() {
        let c = encrypt_string("", pw("pw"), 5).unwrap();
        assert_eq!(decrypt_string(&c, pw("pw")).unwrap(), "");
    }

    #[test]
    fn garbage_is_malformed() {
        let err = decrypt_string("%%% not base64 %%%", pw("pw")).unwrap_err();
        assert!(matches!(err, EngineError::Format(FormatError::Malformed(_))));
    }

    #[test]
    fn whitespace_is_tolerated() {
        let c = encrypt_string("wrapped", pw("pw"), 5).unwrap();
        let padded = format!("  {c}\n");
        assert_eq!(decrypt_string(&padded, pw("pw")).unwrap(), "wrapped");
    }
}

//! src/decryptor/decrypt.rs
//! Container decryption: header validated before any key is derived

use std::io::{Read, Write};

use tracing::debug;

use crate::aliases::{ChunkBuffer, PasswordString};
use crate::crypto::cipher::StreamDecryptor;
use crate::crypto::kdf::derive_keys;
use crate::decryptor::trailer::split_trailer;
use crate::error::EngineError;
use crate::header::{ContainerHeader, ContainerView};
use crate::policy::HeadSplit;
use crate::utils::{secure_copy, validate_chunk_size, validate_password};

/// Decrypt a container from `input`, writing plaintext to `output`.
///
/// Plaintext is streamed as it is produced and is **unauthenticated until
/// this function returns `Ok`**. Callers that must never expose unverified
/// bytes write to a scratch destination and discard it on error, as
/// [`crate::file_ops::decrypt_file_to`] does.
///
/// Returns the number of plaintext bytes written.
///
/// # Errors
///
/// - [`EngineError::Format`] - bad magic, unknown version, truncated or malformed header/trailer
/// - [`EngineError::Crypto`] - [`CryptoError::WrongPasswordOrCorrupt`](crate::CryptoError::WrongPasswordOrCorrupt) on tag mismatch
/// - [`EngineError::File`] - reading `input` or writing `output` failed
pub fn decrypt<R, W>(
    mut input: R,
    mut output: W,
    password: PasswordString,
    chunk_size: usize,
) -> Result<u64, EngineError>
where
    R: Read,
    W: Write,
{
    debug!(stage = "validating", "decrypt");
    validate_password(&password)?;
    validate_chunk_size(chunk_size)?;
    let (header, raw_header) = ContainerHeader::read_from(&mut input)?;

    debug!(stage = "deriving keys", iterations = header.kdf_iterations, "decrypt");
    let mut opener = {
        let keys = derive_keys(&password, &header.salt, header.kdf_iterations)?;
        drop(password);
        StreamDecryptor::new(&keys, &header.nonce)?
    };
    opener.authenticate(&raw_header);

    debug!(stage = "streaming", head = header.head_size, chunk_size, "decrypt");
    let mut cursor = HeadSplit::from_marker(header.head_size).cursor();
    let mut total: u64 = 0;

    let tag = split_trailer(&mut input, chunk_size, |body| {
        let (head, tail) = body.split_at_mut(cursor.take(body.len()));
        opener.process_chunk(head)?;
        opener.authenticate(tail);
        output.write_all(body)?;
        total += body.len() as u64;
        Ok(())
    })?;

    debug!(stage = "verifying", bytes = total, ciphered = opener.position(), "decrypt");
    opener.verify(&tag)?;
    output.flush()?;

    Ok(total)
}

/// Decrypt a parsed in-memory container.
///
/// The tag is verified before the plaintext buffer is returned, so a caller
/// never holds unauthenticated bytes.
pub fn open_container(
    view: &ContainerView<'_>,
    password: PasswordString,
) -> Result<ChunkBuffer, EngineError> {
    validate_password(&password)?;

    let mut opener = {
        let keys = derive_keys(&password, view.header.salt, view.header.kdf_iterations)?;
        drop(password);
        StreamDecryptor::new(&keys, view.header.nonce)?
    };
    opener.authenticate(view.header.raw);

    let mut plaintext = secure_copy(view.payload)?;
    {
        let body = plaintext.expose_secret_mut();
        let cipher_len = HeadSplit::from_marker(view.header.head_size)
            .cursor()
            .take(body.len());
        let (head, tail) = body.split_at_mut(cipher_len);
        opener.process_chunk(head)?;
        opener.authenticate(tail);
    }

    opener.verify(view.tag)?;
    Ok(plaintext)
}

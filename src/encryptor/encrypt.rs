//! src/encryptor/encrypt.rs
//! Streaming container encryption with bounded memory

use std::io::{Read, Write};

use tracing::debug;

use crate::aliases::PasswordString;
use crate::consts::{DEFAULT_CHUNK_SIZE, DEFAULT_PBKDF2_ITERATIONS, NONCE_LEN, SALT_LEN};
use crate::crypto::cipher::StreamEncryptor;
use crate::crypto::kdf::derive_keys;
use crate::crypto::rng::random_bytes;
use crate::encryptor::write::{write_chunk, write_header, write_tag};
use crate::error::EngineError;
use crate::header::ContainerHeader;
use crate::policy::HeadSplit;
use crate::utils::{alloc_chunk_buffer, read_full, validate_chunk_size, validate_password};

/// Tunables for one encryption call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncryptParams {
    pub kdf_iterations: u32,
    /// Already resolved against the input length, see [`HeadSplit::resolve`].
    pub head: HeadSplit,
    /// Read size only; never recorded in the container.
    pub chunk_size: usize,
}

impl Default for EncryptParams {
    fn default() -> Self {
        Self {
            kdf_iterations: DEFAULT_PBKDF2_ITERATIONS,
            head: HeadSplit::Whole,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl EncryptParams {
    pub fn with_iterations(kdf_iterations: u32) -> Self {
        Self {
            kdf_iterations,
            ..Self::default()
        }
    }

    pub fn head(mut self, head: HeadSplit) -> Self {
        self.head = head;
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// Encrypt `input` into a container written to `output`.
///
/// A fresh salt and nonce are drawn on every call, so encrypting the same
/// plaintext twice never produces the same bytes. Memory use is one chunk
/// buffer regardless of input size. When `params.head` is
/// [`HeadSplit::Head`], body bytes past the head are copied through verbatim
/// but still covered by the tag.
///
/// The password is consumed and wiped as soon as the keys are derived.
///
/// Returns the number of plaintext bytes consumed.
///
/// # Errors
///
/// - [`EngineError::InvalidInput`] - empty password, iterations or chunk size out of range
/// - [`EngineError::Crypto`] - RNG or key derivation failure
/// - [`EngineError::Resource`] - the chunk buffer could not be allocated
/// - [`EngineError::File`] - reading `input` or writing `output` failed
pub fn encrypt<R, W>(
    mut input: R,
    mut output: W,
    password: PasswordString,
    params: &EncryptParams,
) -> Result<u64, EngineError>
where
    R: Read,
    W: Write,
{
    debug!(stage = "validating", head = params.head.marker(), "encrypt");
    validate_password(&password)?;
    validate_chunk_size(params.chunk_size)?;

    debug!(stage = "deriving keys", iterations = params.kdf_iterations, "encrypt");
    let salt = random_bytes::<SALT_LEN>()?;
    let nonce = random_bytes::<NONCE_LEN>()?;
    let mut sealer = {
        let keys = derive_keys(&password, &salt, params.kdf_iterations)?;
        drop(password);
        StreamEncryptor::new(&keys, &nonce)?
    };

    let header = ContainerHeader::new(params.kdf_iterations, salt, nonce, params.head.marker());
    let raw_header = header.to_bytes();
    write_header(&mut output, &raw_header)?;
    sealer.authenticate(&raw_header);

    debug!(stage = "streaming", chunk_size = params.chunk_size, "encrypt");
    let mut buffer = alloc_chunk_buffer(params.chunk_size)?;
    let mut cursor = params.head.cursor();
    let mut total: u64 = 0;

    loop {
        let buf = buffer.expose_secret_mut();
        let n = read_full(&mut input, buf)?;
        if n == 0 {
            break;
        }

        let chunk = &mut buf[..n];
        let (head, tail) = chunk.split_at_mut(cursor.take(n));
        sealer.process_chunk(head)?;
        sealer.authenticate(tail);
        write_chunk(&mut output, chunk)?;
        total += n as u64;

        if n < params.chunk_size {
            break;
        }
    }

    debug!(stage = "finalizing", bytes = total, ciphered = sealer.position(), "encrypt");
    write_tag(&mut output, &sealer.finish())?;
    output.flush()?;

    Ok(total)
}

//! # Container Header and Codec
//!
//! The on-disk and in-memory envelope:
//!
//! ```text
//! "LKS" | version | reserved | iterations (u32 BE) | salt (16) | nonce (16) | head marker (u64 BE)
//! body (ciphertext head, then plaintext tail)
//! tag (32, HMAC-SHA256 over header + body)
//! ```
//!
//! Decoding checks the magic, then the version, and only then the rest of the
//! header. An unknown version is rejected before any field after it is
//! interpreted.

use std::io::{self, Read};

use crate::consts::{
    FORMAT_VERSION, HEADER_LEN, MAGIC, NONCE_LEN, PBKDF2_MAX_ITER, PBKDF2_MIN_ITER, SALT_LEN,
    TAG_LEN,
};
use crate::error::{EngineError, FormatError};

/// Parsed container header. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub version: u8,
    pub kdf_iterations: u32,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    /// 0 = whole body encrypted, N > 0 = only the first N body bytes are ciphertext.
    pub head_size: u64,
}

impl ContainerHeader {
    /// Header for a new container at the current format version.
    pub fn new(kdf_iterations: u32, salt: [u8; SALT_LEN], nonce: [u8; NONCE_LEN], head_size: u64) -> Self {
        Self {
            version: FORMAT_VERSION,
            kdf_iterations,
            salt,
            nonce,
            head_size,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..3].copy_from_slice(&MAGIC);
        out[3] = self.version;
        out[4] = 0x00;
        out[5..9].copy_from_slice(&self.kdf_iterations.to_be_bytes());
        out[9..25].copy_from_slice(&self.salt);
        out[25..41].copy_from_slice(&self.nonce);
        out[41..49].copy_from_slice(&self.head_size.to_be_bytes());
        out
    }

    /// Decode a header from the front of `bytes`.
    ///
    /// # Errors
    ///
    /// - [`FormatError::Malformed`] - bad magic, non-zero reserved byte, iterations out of range
    /// - [`FormatError::UnsupportedVersion`] - version byte is not [`FORMAT_VERSION`]
    /// - [`FormatError::Truncated`] - fewer than [`HEADER_LEN`] bytes
    pub fn decode(bytes: &[u8]) -> Result<Self, FormatError> {
        let version = check_prefix(bytes)?;
        if bytes.len() < HEADER_LEN {
            return Err(FormatError::Truncated);
        }

        if bytes[4] != 0x00 {
            return Err(FormatError::Malformed("reserved byte != 0x00".into()));
        }

        let kdf_iterations = u32::from_be_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);
        if !(PBKDF2_MIN_ITER..=PBKDF2_MAX_ITER).contains(&kdf_iterations) {
            return Err(FormatError::Malformed(format!(
                "KDF iterations out of range: {kdf_iterations}"
            )));
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&bytes[9..25]);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&bytes[25..41]);
        let mut marker = [0u8; 8];
        marker.copy_from_slice(&bytes[41..49]);

        Ok(Self {
            version,
            kdf_iterations,
            salt,
            nonce,
            head_size: u64::from_be_bytes(marker),
        })
    }

    /// Read and validate a header from a stream.
    ///
    /// Returns the parsed header together with its raw bytes, which the
    /// caller feeds into the tag computation.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<(Self, [u8; HEADER_LEN]), EngineError> {
        let mut raw = [0u8; HEADER_LEN];
        read_exact_or_truncated(reader, &mut raw[..4])?;
        check_prefix(&raw[..4])?;
        read_exact_or_truncated(reader, &mut raw[4..])?;
        let header = Self::decode(&raw)?;
        Ok((header, raw))
    }
}

/// Validate magic + version; returns the version byte.
fn check_prefix(bytes: &[u8]) -> Result<u8, FormatError> {
    let Some(prefix) = bytes.get(..4) else {
        if MAGIC.starts_with(bytes) {
            return Err(FormatError::Truncated);
        }
        return Err(FormatError::Malformed("invalid magic (expected 'LKS')".into()));
    };
    if prefix[..3] != MAGIC {
        return Err(FormatError::Malformed("invalid magic (expected 'LKS')".into()));
    }
    let version = prefix[3];
    if version != FORMAT_VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }
    Ok(version)
}

fn read_exact_or_truncated<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), EngineError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => EngineError::Format(FormatError::Truncated),
        _ => EngineError::from(e),
    })
}

/// Borrowed view over a complete in-memory container.
#[derive(Debug, Clone, Copy)]
pub struct ContainerView<'a> {
    pub header: ContainerHeaderRef<'a>,
    pub payload: &'a [u8],
    pub tag: &'a [u8; TAG_LEN],
}

/// Header of a [`ContainerView`]: the parsed fields plus the exact bytes they came from.
#[derive(Debug, Clone, Copy)]
pub struct ContainerHeaderRef<'a> {
    pub raw: &'a [u8; HEADER_LEN],
    pub head_size: u64,
    pub kdf_iterations: u32,
    pub salt: &'a [u8; SALT_LEN],
    pub nonce: &'a [u8; NONCE_LEN],
}

impl<'a> ContainerView<'a> {
    /// Split `bytes` into header, payload and tag. No cryptography is performed.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, FormatError> {
        let header = ContainerHeader::decode(bytes)?;
        let rest = &bytes[HEADER_LEN..];
        if rest.len() < TAG_LEN {
            return Err(FormatError::Truncated);
        }
        let (payload, tag) = rest.split_at(rest.len() - TAG_LEN);

        let raw: &[u8; HEADER_LEN] = bytes[..HEADER_LEN]
            .try_into()
            .map_err(|_| FormatError::Truncated)?;
        let salt: &[u8; SALT_LEN] = raw[9..25].try_into().map_err(|_| FormatError::Truncated)?;
        let nonce: &[u8; NONCE_LEN] = raw[25..41].try_into().map_err(|_| FormatError::Truncated)?;
        let tag: &[u8; TAG_LEN] = tag.try_into().map_err(|_| FormatError::Truncated)?;

        Ok(Self {
            header: ContainerHeaderRef {
                raw,
                head_size: header.head_size,
                kdf_iterations: header.kdf_iterations,
                salt,
                nonce,
            },
            payload,
            tag,
        })
    }
}

/// Assemble a container from a header, payload chunks and a tag.
///
/// Chunk boundaries are not recorded; the result is the plain concatenation.
pub fn encode_container<'c, I>(header: &ContainerHeader, chunks: I, tag: &[u8; TAG_LEN]) -> Vec<u8>
where
    I: IntoIterator<Item = &'c [u8]>,
{
    let mut out = Vec::with_capacity(HEADER_LEN + TAG_LEN);
    out.extend_from_slice(&header.to_bytes());
    for chunk in chunks {
        out.extend_from_slice(chunk);
    }
    out.extend_from_slice(tag);
    out
}

/// Read the container version without touching anything past the version byte.
///
/// # Example
///
/// ```
/// use lockstitch_engine::read_version;
/// use std::io::Cursor;
///
/// assert_eq!(read_version(Cursor::new(b"LKS\x01\x00"))?, 1);
/// # Ok::<(), lockstitch_engine::EngineError>(())
/// ```
pub fn read_version<R: Read>(mut reader: R) -> Result<u8, EngineError> {
    let mut prefix = [0u8; 4];
    read_exact_or_truncated(&mut reader, &mut prefix)?;
    Ok(check_prefix(&prefix)?)
}

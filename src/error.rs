//! # Error Types
//!
//! Every fallible operation returns [`Result<T, EngineError>`](EngineError).
//! The category enums mirror the failure classes a host application cares
//! about: the file layer, the container format, cryptography and resources.
//!
//! [`CryptoError::WrongPasswordOrCorrupt`] is the only outcome of
//! a failed tag check. A wrong password and a tampered container are
//! indistinguishable by message or by code path.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::ConfigError;

/// Failures of the path abstraction and file I/O layer.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Destination exists and overwriting is disabled.
    #[error("file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// A host path could not be converted without loss.
    #[error("invalid path encoding: {0}")]
    InvalidPath(String),

    #[error("I/O failure on {}: {source}", path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O failure inside a stream where no path is known.
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),
}

impl FileError {
    /// Classify an [`io::Error`] raised while operating on `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => FileError::AlreadyExists(path.to_path_buf()),
            _ => FileError::IoFailure {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Container parsing failures. Always raised before any plaintext is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Magic matched but the version byte is not one this build understands.
    #[error("unsupported container version: {0}")]
    UnsupportedVersion(u8),

    #[error("container is truncated")]
    Truncated,

    #[error("malformed container: {0}")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Tag mismatch. Covers wrong passwords and any modification of stored bytes.
    #[error("wrong password or corrupted data")]
    WrongPasswordOrCorrupt,

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("secure random generator failed: {0}")]
    Rng(String),

    /// The CTR counter would wrap. Unreachable for any realistic input size.
    #[error("keystream exhausted")]
    KeystreamExhausted,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("out of memory allocating {0} bytes")]
    OutOfMemory(usize),
}

/// The umbrella error returned by every public operation.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Rejected during input validation, before any key is derived.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<io::Error> for EngineError {
    fn from(err: io::Error) -> Self {
        EngineError::File(FileError::Io(err))
    }
}

impl EngineError {
    /// `true` when the tag check failed (wrong password or tampering).
    pub fn is_wrong_password_or_corrupt(&self) -> bool {
        matches!(self, EngineError::Crypto(CryptoError::WrongPasswordOrCorrupt))
    }
}

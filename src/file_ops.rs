// src/file_ops.rs
//! File-level encryption/decryption
//!
//! Builds on the streaming pipelines with real files. Output is staged in a
//! temporary file next to the destination and only moved into place once the
//! operation has fully succeeded (for decryption: after the tag verified). On
//! any error the staged file is dropped, which deletes it.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::aliases::PasswordString;
use crate::config::EngineConfig;
use crate::consts::{DECRYPTED_EXTENSION, ENCRYPTED_EXTENSION};
use crate::decryptor::decrypt;
use crate::encryptor::{encrypt, EncryptParams};
use crate::error::{EngineError, FileError, FormatError};
use crate::path::{open, stat, OpenMode};
use crate::policy::HeadSplit;

/// Sibling output for an encrypted file: `name.ext` → `name.ext.lks`.
pub fn encrypted_path_for(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".");
    name.push(ENCRYPTED_EXTENSION);
    PathBuf::from(name)
}

/// Sibling output for a decrypted file: strips `.lks`, otherwise appends `.dec`.
pub fn decrypted_path_for(input: &Path) -> PathBuf {
    let is_container = input
        .extension()
        .is_some_and(|ext| ext == ENCRYPTED_EXTENSION);
    if is_container {
        input.with_extension("")
    } else {
        let mut name = input.as_os_str().to_os_string();
        name.push(".");
        name.push(DECRYPTED_EXTENSION);
        PathBuf::from(name)
    }
}

/// Encrypt `input` into `output`.
///
/// `head_size` is resolved against the input length: 0 or anything at least
/// as large as the file encrypts the whole file.
///
/// Returns the number of plaintext bytes encrypted.
pub fn encrypt_file_to(
    input: &Path,
    output: &Path,
    password: PasswordString,
    head_size: u64,
    config: &EngineConfig,
) -> Result<u64, EngineError> {
    let size = require_regular_file(input)?;
    ensure_destination_free(output, config.overwrite)?;

    let params = EncryptParams {
        kdf_iterations: config.kdf_iterations,
        head: HeadSplit::resolve(head_size, size),
        chunk_size: config.chunk_size,
    };

    let reader = open(input, OpenMode::Read)?;
    let mut staged = stage_next_to(output)?;
    debug!(staged = %staged.path().display(), head = params.head.marker(), "encrypting file");

    let bytes = encrypt(reader, &mut staged, password, &params)?;
    commit(staged, output, config.overwrite)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes,
        head = params.head.marker(),
        "file encrypted"
    );
    Ok(bytes)
}

/// Encrypt `input` into its `.lks` sibling and return the sibling's path.
pub fn encrypt_file(
    input: &Path,
    password: PasswordString,
    head_size: u64,
    config: &EngineConfig,
) -> Result<PathBuf, EngineError> {
    let output = encrypted_path_for(input);
    encrypt_file_to(input, &output, password, head_size, config)?;
    Ok(output)
}

/// Decrypt `input` into `output`.
///
/// `output` only appears once the whole container has been authenticated.
/// Returns the number of plaintext bytes written.
pub fn decrypt_file_to(
    input: &Path,
    output: &Path,
    password: PasswordString,
    config: &EngineConfig,
) -> Result<u64, EngineError> {
    require_regular_file(input)?;
    ensure_destination_free(output, config.overwrite)?;

    let reader = open(input, OpenMode::Read)?;
    let mut staged = stage_next_to(output)?;
    debug!(staged = %staged.path().display(), "decrypting file");

    let bytes = decrypt(reader, &mut staged, password, config.chunk_size)?;
    commit(staged, output, config.overwrite)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes,
        "file decrypted"
    );
    Ok(bytes)
}

/// Decrypt `input` into its derived sibling and return the sibling's path.
pub fn decrypt_file(
    input: &Path,
    password: PasswordString,
    config: &EngineConfig,
) -> Result<PathBuf, EngineError> {
    let output = decrypted_path_for(input);
    decrypt_file_to(input, &output, password, config)?;
    Ok(output)
}

/// Read a UTF-8 text file. No cryptography involved.
pub fn load_text_file(path: &Path) -> Result<String, EngineError> {
    let mut file = open(path, OpenMode::Read)?;
    let mut text = String::new();
    file.read_to_string(&mut text).map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => EngineError::Format(FormatError::Malformed(format!(
            "{} is not valid UTF-8",
            path.display()
        ))),
        _ => FileError::from_io(path, e).into(),
    })?;
    Ok(text)
}

fn require_regular_file(path: &Path) -> Result<u64, EngineError> {
    let info = stat(path)?;
    if !info.exists {
        return Err(FileError::NotFound(path.to_path_buf()).into());
    }
    if !info.is_file {
        return Err(EngineError::InvalidInput(format!(
            "not a regular file: {}",
            path.display()
        )));
    }
    Ok(info.size)
}

fn ensure_destination_free(output: &Path, overwrite: bool) -> Result<(), EngineError> {
    if !overwrite && stat(output)?.exists {
        return Err(FileError::AlreadyExists(output.to_path_buf()).into());
    }
    Ok(())
}

fn stage_next_to(output: &Path) -> Result<NamedTempFile, EngineError> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    tempfile::Builder::new()
        .prefix(".lks-")
        .suffix(".part")
        .make_in(dir, |path| OpenMode::CreateNew.options().open(path))
        .map_err(|e| FileError::from_io(dir, e).into())
}

fn commit(staged: NamedTempFile, output: &Path, overwrite: bool) -> Result<(), EngineError> {
    staged
        .as_file()
        .sync_all()
        .map_err(|e| FileError::from_io(staged.path(), e))?;

    let persisted = if overwrite {
        staged.persist(output)
    } else {
        staged.persist_noclobber(output)
    };
    persisted.map_err(|e| FileError::from_io(output, e.error))?;
    Ok(())
}

// ============================================================================
// FILE: src/utils.rs
// ============================================================================

//! Utility functions shared by the encrypt and decrypt pipelines.

use std::io::{self, Read};

use crate::aliases::{ChunkBuffer, PasswordString};
use crate::consts::MAX_CHUNK_SIZE;
use crate::error::{EngineError, ResourceError};

/// Allocate a zeroed secure work buffer of exactly `len` bytes.
///
/// Allocation failure is reported as [`ResourceError::OutOfMemory`] instead of aborting.
pub fn alloc_chunk_buffer(len: usize) -> Result<ChunkBuffer, ResourceError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| ResourceError::OutOfMemory(len))?;
    buf.resize(len, 0);
    Ok(ChunkBuffer::new(buf))
}

/// Copy `data` into a fresh secure buffer, with the same allocation policy.
pub fn secure_copy(data: &[u8]) -> Result<ChunkBuffer, ResourceError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(data.len())
        .map_err(|_| ResourceError::OutOfMemory(data.len()))?;
    buf.extend_from_slice(data);
    Ok(ChunkBuffer::new(buf))
}

/// Read until `buf` is full or the reader hits EOF. Returns the bytes read.
///
/// A return value smaller than `buf.len()` always means EOF.
pub fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

pub fn validate_password(password: &PasswordString) -> Result<(), EngineError> {
    if password.expose_secret().is_empty() {
        return Err(EngineError::InvalidInput("empty password".into()));
    }
    Ok(())
}

pub fn validate_chunk_size(chunk_size: usize) -> Result<(), EngineError> {
    if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
        return Err(EngineError::InvalidInput(format!(
            "chunk size must be within 1..={MAX_CHUNK_SIZE}, got {chunk_size}"
        )));
    }
    Ok(())
}

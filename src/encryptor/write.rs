//! src/encryptor/write.rs
//! Container write helpers

use std::io::Write;

use crate::consts::{HEADER_LEN, TAG_LEN};
use crate::error::EngineError;

#[inline]
pub fn write_header<W: Write>(writer: &mut W, header: &[u8; HEADER_LEN]) -> Result<(), EngineError> {
    writer.write_all(header)?;
    Ok(())
}

#[inline]
pub fn write_chunk<W: Write>(writer: &mut W, chunk: &[u8]) -> Result<(), EngineError> {
    writer.write_all(chunk)?;
    Ok(())
}

#[inline]
pub fn write_tag<W: Write>(writer: &mut W, tag: &[u8; TAG_LEN]) -> Result<(), EngineError> {
    writer.write_all(tag)?;
    Ok(())
}

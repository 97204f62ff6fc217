//! src/decryptor/trailer.rs
//! Trailer handling: separate the 32-byte tag from a body of unknown length
//!
//! The last [`TAG_LEN`] bytes read are always held back. Everything in front
//! of them is body and is handed to the caller chunk by chunk; whatever is
//! still held back at EOF is the tag.

use std::io::Read;

use crate::consts::TAG_LEN;
use crate::error::{EngineError, FormatError};
use crate::utils::{alloc_chunk_buffer, read_full};

/// Stream every body byte of `reader` through `on_body` and return the tag.
///
/// `on_body` sees chunks of at most `chunk_size` bytes, in order. Fewer than
/// [`TAG_LEN`] bytes in total is [`FormatError::Truncated`].
pub fn split_trailer<R, F>(
    reader: &mut R,
    chunk_size: usize,
    mut on_body: F,
) -> Result<[u8; TAG_LEN], EngineError>
where
    R: Read,
    F: FnMut(&mut [u8]) -> Result<(), EngineError>,
{
    let mut window = alloc_chunk_buffer(chunk_size + TAG_LEN)?;
    let buf = window.expose_secret_mut();
    let mut filled = 0usize;

    loop {
        let want = buf.len() - filled;
        let n = read_full(reader, &mut buf[filled..])?;
        filled += n;

        if filled > TAG_LEN {
            let body_len = filled - TAG_LEN;
            on_body(&mut buf[..body_len])?;
            buf.copy_within(body_len..filled, 0);
            filled = TAG_LEN;
        }

        if n < want {
            break;
        }
    }

    if filled < TAG_LEN {
        return Err(FormatError::Truncated.into());
    }

    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&buf[..TAG_LEN]);
    Ok(tag)
}

// src/decryptor/mod.rs

//! Decryption pipeline.
//!
//! Core API: `decrypt(input, output, &password, chunk_size)?` for streams and
//! `open_container(&view, &password)?` for containers already in memory.

pub(crate) mod decrypt;
pub(crate) mod trailer;

pub use decrypt::{decrypt, open_container};
pub use trailer::split_trailer;

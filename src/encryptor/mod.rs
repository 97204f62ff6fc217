// src/encryptor/mod.rs

//! Encryption pipeline.
//!
//! Core API: `encrypt(input, output, &password, &params)?` streams any reader
//! into a container. Write helpers are public for host glue that assembles
//! containers itself.

pub(crate) mod encrypt;
pub(crate) mod write;

pub use encrypt::{encrypt, EncryptParams};
pub use write::{write_chunk, write_header, write_tag};

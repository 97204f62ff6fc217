// src/crypto/mod.rs

//! Low-level crypto primitives.
//!
//! - [`kdf`] – password → cipher key + MAC key
//! - [`rng`] – OS randomness for salts and nonces
//! - [`cipher`] – chunked AES-256-CTR with a running HMAC-SHA256

pub mod cipher;
pub mod kdf;
pub mod rng;

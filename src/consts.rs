//! # Constants
//!
//! Container layout, KDF limits and streaming defaults shared by the
//! encryptor, decryptor and configuration layers.

/// Magic bytes at the start of every container.
pub const MAGIC: [u8; 3] = *b"LKS";

/// The only container version this library reads or writes.
///
/// Any change to header field order or size bumps this value.
pub const FORMAT_VERSION: u8 = 1;

/// Salt length in bytes (fresh per encryption).
pub const SALT_LEN: usize = 16;

/// Nonce length in bytes: one full AES block used as the initial CTR counter.
pub const NONCE_LEN: usize = 16;

/// HMAC-SHA256 tag length appended after the body.
pub const TAG_LEN: usize = 32;

/// Encoded header length: magic + version + reserved + iterations + salt + nonce + head marker.
pub const HEADER_LEN: usize = MAGIC.len() + 1 + 1 + 4 + SALT_LEN + NONCE_LEN + 8;

/// Minimum allowed PBKDF2 iteration count.
pub const PBKDF2_MIN_ITER: u32 = 1;

/// Maximum allowed PBKDF2 iteration count.
///
/// Values above this are rejected on both encryption and decryption, so a
/// forged header cannot pin the CPU for minutes.
pub const PBKDF2_MAX_ITER: u32 = 5_000_000;

/// Default PBKDF2-HMAC-SHA512 iteration count for new containers.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 300_000;

/// Length of each derived key half (cipher key, MAC key).
pub const KEY_LEN: usize = 32;

/// Default read size for the streaming pipeline.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Largest accepted chunk size.
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Extension appended to encrypted sibling files.
pub const ENCRYPTED_EXTENSION: &str = "lks";

/// Extension appended when a decrypted sibling name cannot be derived by stripping.
pub const DECRYPTED_EXTENSION: &str = "dec";

/// Environment variable naming a TOML config file for [`crate::config::EngineConfig::load`].
pub const CONFIG_ENV_VAR: &str = "LOCKSTITCH_CONFIG";

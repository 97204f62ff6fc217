// src/lib.rs

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod engine;
pub mod error;
pub mod file_ops;
pub mod header;
pub mod path;
pub mod policy;
pub mod text;
pub mod utils;

// Host-facing facade
pub use engine::Engine;

// Typed API
pub use config::{ConfigError, EngineConfig};
pub use decryptor::{decrypt, open_container};
pub use encryptor::{encrypt, EncryptParams};
pub use error::{CryptoError, EngineError, FileError, FormatError, ResourceError};
pub use file_ops::{decrypt_file, decrypt_file_to, encrypt_file, encrypt_file_to, load_text_file};
pub use text::{decrypt_string, encrypt_string};

pub use crypto::kdf::{derive_keys, DerivedKeys};
pub use header::{encode_container, read_version, ContainerHeader, ContainerView};
pub use path::{EnginePath, HostPath};
pub use policy::HeadSplit;

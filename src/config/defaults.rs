// src/config/defaults.rs
use crate::consts::{DEFAULT_CHUNK_SIZE, DEFAULT_PBKDF2_ITERATIONS};

pub fn default_kdf_iterations() -> u32 {
    DEFAULT_PBKDF2_ITERATIONS
}

pub fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

pub fn default_overwrite() -> bool {
    false
}

//! tests/common.rs
//! Common constants and utilities shared across test files

use lockstitch_engine::aliases::PasswordString;
use lockstitch_engine::EngineConfig;

/// Fast iteration count for tests - performance testing is in benches/
pub const TEST_ITERATIONS: u32 = 5;

#[allow(dead_code)] // Used across multiple test files
pub const TEST_PASSWORD: &str = "correct horse battery staple";

#[allow(dead_code)] // Used across multiple test files
pub const TEST_DATA: &[u8] = b"test data";

#[allow(dead_code)] // Used across multiple test files
pub fn password(s: &str) -> PasswordString {
    PasswordString::new(s.to_string())
}

/// Engine config with [`TEST_ITERATIONS`] and a small chunk so multi-chunk paths run.
#[allow(dead_code)] // Used across multiple test files
pub fn fast_config() -> EngineConfig {
    EngineConfig {
        kdf_iterations: TEST_ITERATIONS,
        chunk_size: 4096,
        overwrite: false,
    }
}

/// Deterministic non-repeating bytes.
#[allow(dead_code)] // Used across multiple test files
pub fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i.wrapping_mul(31) ^ (i >> 8)) as u8).collect()
}

/// Install a test subscriber once; honours RUST_LOG.
#[allow(dead_code)] // Used across multiple test files
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

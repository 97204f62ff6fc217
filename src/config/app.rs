// src/config/app.rs
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::defaults::*;
use crate::consts::{CONFIG_ENV_VAR, MAX_CHUNK_SIZE, PBKDF2_MAX_ITER, PBKDF2_MIN_ITER};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Tunables for an [`Engine`](crate::Engine).
///
/// ```toml
/// kdf_iterations = 300000
/// chunk_size = 65536
/// overwrite = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// PBKDF2 iterations written into new containers.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Streaming read size in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Replace existing output files instead of failing.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kdf_iterations: default_kdf_iterations(),
            chunk_size: default_chunk_size(),
            overwrite: default_overwrite(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from the file named by `LOCKSTITCH_CONFIG`, or fall back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                tracing::debug!("{CONFIG_ENV_VAR} not set, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(PBKDF2_MIN_ITER..=PBKDF2_MAX_ITER).contains(&self.kdf_iterations) {
            return Err(ConfigError::Invalid(format!(
                "kdf_iterations must be within {PBKDF2_MIN_ITER}..={PBKDF2_MAX_ITER}"
            )));
        }
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::Invalid(format!(
                "chunk_size must be within 1..={MAX_CHUNK_SIZE}"
            )));
        }
        Ok(())
    }
}

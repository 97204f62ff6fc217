//! # Engine Facade
//!
//! The six operations host glue calls: string encrypt/decrypt, file
//! encrypt/decrypt, plain text loading, and `last_error`.
//!
//! Every operation clears the last error on entry, converts any failure into
//! a human-readable description and returns `None`. Nothing panics across
//! this boundary. Operations take `&mut self`, so the last-error slot can
//! never be read while another call on the same engine is in flight; callers
//! wanting parallelism use one `Engine` per thread.
//!
//! For code that prefers typed errors, the same operations are available as
//! free functions in [`crate::text`] and [`crate::file_ops`].

use std::path::PathBuf;

use tracing::{info, warn};

use crate::aliases::PasswordString;
use crate::config::{ConfigError, EngineConfig};
use crate::error::EngineError;
use crate::file_ops;
use crate::path::{EnginePath, HostPath};
use crate::text;

#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    last_error: Option<String>,
}

impl Engine {
    /// Engine with built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine configured from `LOCKSTITCH_CONFIG`, see [`EngineConfig::load`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::with_config(EngineConfig::load()?)
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            last_error: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Description of the most recent failure; `None` if the last call succeeded.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn encrypt_string(&mut self, plaintext: &str, password: &str) -> Option<String> {
        self.last_error = None;
        let outcome = text::encrypt_string(plaintext, secret(password), self.config.kdf_iterations);
        self.settle("encrypt string", outcome)
    }

    pub fn decrypt_string(&mut self, ciphertext: &str, password: &str) -> Option<String> {
        self.last_error = None;
        let outcome = text::decrypt_string(ciphertext, secret(password));
        self.settle("decrypt string", outcome)
    }

    /// Encrypt a file into its `.lks` sibling and return the sibling's path.
    ///
    /// `head_size` 0 encrypts the whole file; N > 0 encrypts only the first N
    /// bytes and stores the rest verbatim.
    pub fn encrypt_file<'p>(
        &mut self,
        path: impl Into<HostPath<'p>>,
        password: &str,
        head_size: i64,
    ) -> Option<PathBuf> {
        self.last_error = None;
        let outcome = u64::try_from(head_size)
            .map_err(|_| EngineError::InvalidInput(format!("head size must be >= 0, got {head_size}")))
            .and_then(|head| {
                let path = EnginePath::from_host(path.into())?;
                file_ops::encrypt_file(&path, secret(password), head, &self.config)
            });
        self.settle("encrypt file", outcome)
    }

    /// Decrypt a container file into its derived sibling and return the sibling's path.
    pub fn decrypt_file<'p>(&mut self, path: impl Into<HostPath<'p>>, password: &str) -> Option<PathBuf> {
        self.last_error = None;
        let outcome = EnginePath::from_host(path.into())
            .map_err(EngineError::from)
            .and_then(|path| file_ops::decrypt_file(&path, secret(password), &self.config));
        self.settle("decrypt file", outcome)
    }

    /// Plain UTF-8 read, independent of any cryptography.
    pub fn load_text_file<'p>(&mut self, path: impl Into<HostPath<'p>>) -> Option<String> {
        self.last_error = None;
        let outcome = EnginePath::from_host(path.into())
            .map_err(EngineError::from)
            .and_then(|path| file_ops::load_text_file(&path));
        self.settle("load text file", outcome)
    }

    fn settle<T>(&mut self, operation: &'static str, outcome: Result<T, EngineError>) -> Option<T> {
        match outcome {
            Ok(value) => {
                info!(operation, "succeeded");
                Some(value)
            }
            Err(err) => {
                warn!(operation, error = %err, "failed");
                self.last_error = Some(format!("{operation} failed: {err}"));
                None
            }
        }
    }
}

/// Copy the caller's password into a wiping buffer. The pipeline drops it once keys are derived.
fn secret(password: &str) -> PasswordString {
    PasswordString::new(password.to_owned())
}

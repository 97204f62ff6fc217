// src/config/mod.rs
//! Engine configuration
//!
//! TOML file (optional, named by `LOCKSTITCH_CONFIG`) + built-in defaults.
//! No global state: callers own their [`EngineConfig`].

pub use app::{ConfigError, EngineConfig};

mod app;
mod defaults;

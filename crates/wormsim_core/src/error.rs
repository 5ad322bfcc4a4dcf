//! Error types for wormsim_core.
//!
//! Nothing on the per-tick path can fail. These errors only come out of
//! loading and parsing connectome tables.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed or inconsistent connectome table
    #[error("Connectome error: {0}")]
    Connectome(String),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    #[must_use]
    pub fn connectome<S: Into<String>>(msg: S) -> Self {
        Self::Connectome(msg.into())
    }
}

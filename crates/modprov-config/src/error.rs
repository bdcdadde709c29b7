//! Error types for settings loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to load settings: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("invalid value for {field}: {value:?} ({hint})")]
    InvalidValue {
        field: &'static str,
        value: String,
        hint: String,
    },

    #[error("failed to render settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Extract(Box::new(err))
    }
}

//! Error types for tree construction and resolution.

use std::path::PathBuf;

use modprov_addrs::{LocalProviderConfig, ModulePath, ParseProviderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Human-readable module label for messages; the root path renders empty.
pub(crate) fn module_label(path: &ModulePath) -> String {
    if path.is_root() {
        "the root module".to_string()
    } else {
        path.to_string()
    }
}

/// Errors raised while constructing a [`crate::ConfigTree`].
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("duplicate required provider {local_name:?} in {}", module_label(.module))]
    DuplicateRequirement {
        module: ModulePath,
        local_name: String,
    },

    #[error("duplicate module call {name:?} in {}", module_label(.module))]
    DuplicateModuleCall { module: ModulePath, name: String },

    #[error("duplicate provider configuration {config} in {}", module_label(.module))]
    DuplicateProviderConfig {
        module: ModulePath,
        config: LocalProviderConfig,
    },

    #[error("provider {config} passed more than once into {}", module_label(.module))]
    DuplicatePassedProvider {
        module: ModulePath,
        config: LocalProviderConfig,
    },

    #[error("empty provider local name in {}", module_label(.module))]
    EmptyLocalName { module: ModulePath },

    #[error("empty module call name in {}", module_label(.module))]
    EmptyCallName { module: ModulePath },

    #[error("invalid source for provider {local_name:?} in {}: {source}", module_label(.module))]
    InvalidSource {
        module: ModulePath,
        local_name: String,
        #[source]
        source: ParseProviderError,
    },

    #[error("invalid provider reference {reference:?} in {}: {reason}", module_label(.module))]
    InvalidReference {
        module: ModulePath,
        reference: String,
        reason: &'static str,
    },

    #[error("invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML manifest: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported manifest format: {} (expected .json or .toml)", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Contract violations detected by the resolver.
///
/// Only returned by the `try_` resolver methods; the plain methods panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no module at path {:?} in the configuration tree", .0.to_string())]
    UnknownModule(ModulePath),

    #[error("cannot resolve an empty provider local name in {}", module_label(.0))]
    EmptyLocalName(ModulePath),
}

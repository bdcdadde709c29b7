//! Error types for provider source parsing.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseProviderError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseProviderError {
    #[error("provider source cannot be empty")]
    Empty,

    #[error("invalid provider source {source_str:?}: expected at most three parts separated by '/'")]
    TooManyParts { source_str: String },

    #[error("invalid provider source {source_str:?}: {part} part {value:?} {reason}")]
    InvalidPart {
        source_str: String,
        part: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error(
        "invalid provider source {source_str:?}: the legacy namespace \"-\" is only valid on {expected_host}"
    )]
    LegacyNamespaceOnForeignHost {
        source_str: String,
        expected_host: &'static str,
    },
}

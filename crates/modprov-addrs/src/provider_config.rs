//! Provider configuration addresses.
//!
//! A [`LocalProviderConfig`] is what a module writes (`aws`, `aws.east`) and is
//! only meaningful next to the module that wrote it. An [`AbsProviderConfig`]
//! carries the owning module path and the resolved [`Provider`] identity and
//! is globally meaningful.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::module_path::ModulePath;
use crate::provider::Provider;

/// Module-scoped reference to a provider configuration.
///
/// `alias: None` and `alias: Some("")` are distinct states and render
/// differently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalProviderConfig {
    pub local_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl LocalProviderConfig {
    pub fn new(local_name: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            local_name: local_name.into(),
            alias,
        }
    }

    /// The unaliased configuration for `local_name`.
    ///
    /// This is the reference a resource uses when it sets no explicit
    /// `provider` attribute.
    pub fn new_default(local_name: impl Into<String>) -> Self {
        Self::new(local_name, None)
    }

    pub fn with_alias(local_name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::new(local_name, Some(alias.into()))
    }
}

impl fmt::Display for LocalProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "provider.{}", self.local_name)?;
        if let Some(alias) = &self.alias {
            write!(f, ".{alias}")?;
        }
        Ok(())
    }
}

/// Fully resolved provider configuration address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AbsProviderConfig {
    pub module: ModulePath,
    pub provider: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl AbsProviderConfig {
    pub fn new(module: ModulePath, provider: Provider, alias: Option<String>) -> Self {
        Self {
            module,
            provider,
            alias,
        }
    }
}

impl fmt::Display for AbsProviderConfig {
    /// Renders `module.a.provider["hostname/namespace/type"].alias`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.module.is_root() {
            write!(f, "{}.", self.module)?;
        }
        write!(f, "provider[\"{}\"]", self.provider)?;
        if let Some(alias) = &self.alias {
            write!(f, ".{alias}")?;
        }
        Ok(())
    }
}

/// Either form of provider configuration address.
///
/// Resolution accepts both so that an address already resolved once (for
/// example when following a provider passed down a module call) is never
/// re-interpreted through another module's requirements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderConfigAddr {
    Local(LocalProviderConfig),
    Absolute(AbsProviderConfig),
}

impl ProviderConfigAddr {
    pub fn is_absolute(&self) -> bool {
        matches!(self, Self::Absolute(_))
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Local(local) => local.alias.as_deref(),
            Self::Absolute(abs) => abs.alias.as_deref(),
        }
    }
}

impl From<LocalProviderConfig> for ProviderConfigAddr {
    fn from(value: LocalProviderConfig) -> Self {
        Self::Local(value)
    }
}

impl From<AbsProviderConfig> for ProviderConfigAddr {
    fn from(value: AbsProviderConfig) -> Self {
        Self::Absolute(value)
    }
}

impl fmt::Display for ProviderConfigAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(local) => local.fmt(f),
            Self::Absolute(abs) => abs.fmt(f),
        }
    }
}

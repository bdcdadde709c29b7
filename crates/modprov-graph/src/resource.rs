use modprov_addrs::LocalProviderConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceMode {
    #[default]
    Managed,
    Data,
}

/// A resource block, kept only for the provider reference it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub mode: ResourceMode,
    pub type_name: String,
    pub name: String,
    /// Explicit `provider` attribute, if the block sets one.
    pub provider: Option<LocalProviderConfig>,
}

impl Resource {
    pub fn managed(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            mode: ResourceMode::Managed,
            type_name: type_name.into(),
            name: name.into(),
            provider: None,
        }
    }

    pub fn data(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            mode: ResourceMode::Data,
            ..Self::managed(type_name, name)
        }
    }

    pub fn with_provider(mut self, provider: LocalProviderConfig) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Provider configuration this resource belongs to.
    ///
    /// Without an explicit `provider` attribute this is the unaliased
    /// configuration implied by the resource type.
    pub fn provider_config_addr(&self) -> LocalProviderConfig {
        match &self.provider {
            Some(provider) => provider.clone(),
            None => LocalProviderConfig::new_default(implied_provider_local_name(&self.type_name)),
        }
    }
}

/// Local provider name implied by a resource type: the prefix before the
/// first underscore (`aws_instance` -> `aws`).
pub fn implied_provider_local_name(resource_type: &str) -> &str {
    resource_type
        .split_once('_')
        .map_or(resource_type, |(prefix, _)| prefix)
}

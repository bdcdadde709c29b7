use std::collections::BTreeSet;

use indexmap::IndexMap;
use indexmap::map::Entry;
use modprov_addrs::{AbsProviderConfig, LocalProviderConfig, ModulePath, Provider};

use crate::error::{GraphError, Result};
use crate::requirements::{Provenance, ProviderRequirements, Resolution};
use crate::resource::{Resource, ResourceMode};

/// One node of the configuration tree.
///
/// A module owns its requirements table, its provider configuration blocks,
/// the resources that reference providers, and the modules it calls. Modules
/// are immutable once built; use [`ModuleBuilder`] to assemble them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    path: ModulePath,
    requirements: ProviderRequirements,
    provider_configs: BTreeSet<LocalProviderConfig>,
    managed_resources: Vec<Resource>,
    data_resources: Vec<Resource>,
    calls: IndexMap<String, ModuleCall>,
}

/// A module call: the call name, the providers it passes down, and the
/// module it instantiates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCall {
    name: String,
    passed_providers: Vec<PassedProviderConfig>,
    module: Module,
}

/// One entry of a module call's `providers` map: the child-side reference is
/// served by the parent-side configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PassedProviderConfig {
    pub in_child: LocalProviderConfig,
    pub in_parent: LocalProviderConfig,
}

impl PassedProviderConfig {
    pub fn new(in_child: LocalProviderConfig, in_parent: LocalProviderConfig) -> Self {
        Self {
            in_child,
            in_parent,
        }
    }
}

impl Module {
    /// Create a new module builder.
    pub fn builder() -> ModuleBuilder {
        ModuleBuilder::default()
    }

    /// Module at `path` that declares nothing.
    pub fn empty(path: ModulePath) -> Self {
        Self {
            path,
            requirements: ProviderRequirements::new(),
            provider_configs: BTreeSet::new(),
            managed_resources: Vec::new(),
            data_resources: Vec::new(),
            calls: IndexMap::new(),
        }
    }

    pub fn path(&self) -> &ModulePath {
        &self.path
    }

    pub fn requirements(&self) -> &ProviderRequirements {
        &self.requirements
    }

    /// Provider configuration blocks declared in this module.
    pub fn provider_configs(&self) -> impl Iterator<Item = &LocalProviderConfig> {
        self.provider_configs.iter()
    }

    pub fn has_provider_config(&self, config: &LocalProviderConfig) -> bool {
        self.provider_configs.contains(config)
    }

    pub fn managed_resources(&self) -> &[Resource] {
        &self.managed_resources
    }

    pub fn data_resources(&self) -> &[Resource] {
        &self.data_resources
    }

    /// Module calls in declaration order.
    pub fn calls(&self) -> impl Iterator<Item = &ModuleCall> {
        self.calls.values()
    }

    pub fn call(&self, name: &str) -> Option<&ModuleCall> {
        self.calls.get(name)
    }

    /// Every provider reference site in this module: configuration blocks
    /// first, then managed and data resources.
    pub fn provider_references(&self) -> impl Iterator<Item = LocalProviderConfig> + '_ {
        self.provider_configs
            .iter()
            .cloned()
            .chain(
                self.managed_resources
                    .iter()
                    .chain(&self.data_resources)
                    .map(Resource::provider_config_addr),
            )
    }

    /// Look `local` up in this module's requirements only.
    pub fn resolve_local_name(&self, local_name: &str) -> Resolution {
        let resolution = self.requirements.lookup(local_name);
        if resolution.provenance == Provenance::LegacyDefault {
            tracing::debug!(
                module = %self.path,
                local_name,
                provider = %resolution.provider,
                "no required provider entry, using legacy provider"
            );
        }
        resolution
    }

    /// Provider identity backing `local` in this module.
    pub fn provider_for_local_config(&self, local: &LocalProviderConfig) -> Provider {
        self.resolve_local_name(&local.local_name).provider
    }

    /// Absolute address of `local`, scoped to this module.
    pub fn resolve_local(&self, local: &LocalProviderConfig) -> AbsProviderConfig {
        AbsProviderConfig::new(
            self.path.clone(),
            self.provider_for_local_config(local),
            local.alias.clone(),
        )
    }
}

impl ModuleCall {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn passed_providers(&self) -> &[PassedProviderConfig] {
        &self.passed_providers
    }

    /// Parent-side reference serving `in_child`, if the call passes one.
    pub fn passed_for(&self, in_child: &LocalProviderConfig) -> Option<&LocalProviderConfig> {
        self.passed_providers
            .iter()
            .find(|passed| &passed.in_child == in_child)
            .map(|passed| &passed.in_parent)
    }

    pub fn module(&self) -> &Module {
        &self.module
    }
}

/// Builder for [`Module`] trees.
///
/// Nothing is validated until [`ModuleBuilder::build`], which assigns module
/// paths and rejects duplicate declarations.
///
/// # Example
///
/// ```
/// use modprov_addrs::{LocalProviderConfig, ModulePath, Provider};
/// use modprov_graph::Module;
///
/// let module = Module::builder()
///     .require("foo-test", Provider::new("registry.terraform.io", "foo", "test"))
///     .provider_config(LocalProviderConfig::new_default("foo-test"))
///     .build(ModulePath::root())?;
///
/// assert_eq!(module.provider_configs().count(), 1);
/// # Ok::<(), modprov_graph::GraphError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModuleBuilder {
    requirements: Vec<(String, Provider)>,
    provider_configs: Vec<LocalProviderConfig>,
    resources: Vec<Resource>,
    calls: Vec<CallBuilder>,
}

#[derive(Debug, Clone)]
struct CallBuilder {
    name: String,
    passed_providers: Vec<PassedProviderConfig>,
    module: ModuleBuilder,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an explicit source for `local_name`.
    pub fn require(mut self, local_name: impl Into<String>, provider: Provider) -> Self {
        self.requirements.push((local_name.into(), provider));
        self
    }

    /// Declare a provider configuration block.
    pub fn provider_config(mut self, config: LocalProviderConfig) -> Self {
        self.provider_configs.push(config);
        self
    }

    pub fn resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Add a module call that passes no providers.
    pub fn call(self, name: impl Into<String>, module: ModuleBuilder) -> Self {
        self.call_with_providers(name, Vec::new(), module)
    }

    pub fn call_with_providers(
        mut self,
        name: impl Into<String>,
        passed_providers: Vec<PassedProviderConfig>,
        module: ModuleBuilder,
    ) -> Self {
        self.calls.push(CallBuilder {
            name: name.into(),
            passed_providers,
            module,
        });
        self
    }

    /// Validate and assemble the module (and its descendants) at `path`.
    pub fn build(self, path: ModulePath) -> Result<Module> {
        let requirements = ProviderRequirements::from_entries(&path, self.requirements)?;

        let mut provider_configs = BTreeSet::new();
        for config in self.provider_configs {
            check_local_name(&path, &config)?;
            if provider_configs.contains(&config) {
                return Err(GraphError::DuplicateProviderConfig {
                    module: path,
                    config,
                });
            }
            provider_configs.insert(config);
        }

        let mut managed_resources = Vec::new();
        let mut data_resources = Vec::new();
        for resource in self.resources {
            if let Some(provider) = &resource.provider {
                check_local_name(&path, provider)?;
            }
            match resource.mode {
                ResourceMode::Managed => managed_resources.push(resource),
                ResourceMode::Data => data_resources.push(resource),
            }
        }

        let mut calls = IndexMap::with_capacity(self.calls.len());
        for call in self.calls {
            if call.name.is_empty() {
                return Err(GraphError::EmptyCallName { module: path });
            }
            let child_path = path.child(call.name.clone());
            let mut passed_in_child = BTreeSet::new();
            for passed in &call.passed_providers {
                check_local_name(&child_path, &passed.in_child)?;
                check_local_name(&path, &passed.in_parent)?;
                if !passed_in_child.insert(&passed.in_child) {
                    return Err(GraphError::DuplicatePassedProvider {
                        module: child_path,
                        config: passed.in_child.clone(),
                    });
                }
            }
            match calls.entry(call.name) {
                Entry::Occupied(existing) => {
                    return Err(GraphError::DuplicateModuleCall {
                        module: path.clone(),
                        name: existing.key().clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    let name = slot.key().clone();
                    let module = call.module.build(child_path)?;
                    slot.insert(ModuleCall {
                        name,
                        passed_providers: call.passed_providers,
                        module,
                    });
                }
            }
        }

        Ok(Module {
            path,
            requirements,
            provider_configs,
            managed_resources,
            data_resources,
            calls,
        })
    }
}

fn check_local_name(module: &ModulePath, config: &LocalProviderConfig) -> Result<()> {
    if config.local_name.is_empty() {
        return Err(GraphError::EmptyLocalName {
            module: module.clone(),
        });
    }
    Ok(())
}

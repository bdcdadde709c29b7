//! Provider address resolution.
//!
//! Every local reference resolves against the requirements table of the
//! module that wrote it, and only that table. Names the module never sourced
//! fall back to the legacy identity for the name, so resolution of a
//! reference in a known module always succeeds.

use modprov_addrs::{AbsProviderConfig, LocalProviderConfig, ModulePath, Provider, ProviderConfigAddr};

use super::ConfigTree;
use crate::error::ResolveError;
use crate::module::Module;

impl ConfigTree {
    /// Resolve `addr`, written in the module at `module`, to an absolute address.
    ///
    /// An address that is already absolute is returned unchanged, whatever
    /// `module` is.
    ///
    /// # Panics
    ///
    /// Panics if `module` names no module in this tree, or if a local
    /// reference has an empty name. Both are caller bugs; use
    /// [`ConfigTree::try_resolve_abs_provider_addr`] to get a `Result` instead.
    ///
    /// # Example
    ///
    /// ```
    /// use modprov_addrs::{LocalProviderConfig, ModulePath, Provider};
    /// use modprov_graph::{ConfigTree, Module};
    ///
    /// let tree = ConfigTree::build(
    ///     Module::builder().require("foo-test", Provider::new("registry.terraform.io", "foo", "test")),
    /// )?;
    ///
    /// let addr = tree.resolve_abs_provider_addr(
    ///     LocalProviderConfig::with_alias("foo-test", "boop"),
    ///     &ModulePath::root(),
    /// );
    /// assert_eq!(addr.to_string(), r#"provider["registry.terraform.io/foo/test"].boop"#);
    /// # Ok::<(), modprov_graph::GraphError>(())
    /// ```
    pub fn resolve_abs_provider_addr(
        &self,
        addr: impl Into<ProviderConfigAddr>,
        module: &ModulePath,
    ) -> AbsProviderConfig {
        self.try_resolve_abs_provider_addr(addr, module)
            .unwrap_or_else(|err| panic!("provider resolution contract violated: {err}"))
    }

    pub fn try_resolve_abs_provider_addr(
        &self,
        addr: impl Into<ProviderConfigAddr>,
        module: &ModulePath,
    ) -> Result<AbsProviderConfig, ResolveError> {
        match addr.into() {
            ProviderConfigAddr::Absolute(abs) => Ok(abs),
            ProviderConfigAddr::Local(local) => {
                let owner = self.owning_module(&local, module)?;
                let resolved = owner.resolve_local(&local);
                tracing::trace!(%local, %resolved, "resolved provider address");
                Ok(resolved)
            }
        }
    }

    /// Provider identity backing `local` in the module at `module`.
    ///
    /// # Panics
    ///
    /// Same contract as [`ConfigTree::resolve_abs_provider_addr`].
    pub fn provider_for_config_addr(
        &self,
        local: &LocalProviderConfig,
        module: &ModulePath,
    ) -> Provider {
        self.try_provider_for_config_addr(local, module)
            .unwrap_or_else(|err| panic!("provider resolution contract violated: {err}"))
    }

    pub fn try_provider_for_config_addr(
        &self,
        local: &LocalProviderConfig,
        module: &ModulePath,
    ) -> Result<Provider, ResolveError> {
        let owner = self.owning_module(local, module)?;
        Ok(owner.provider_for_local_config(local))
    }

    /// Resolve `local` as seen from inside the module at `module`, following
    /// the `providers` maps of the module calls above it.
    ///
    /// While the call that created the current module explicitly passes
    /// `local` down, resolution moves to the parent-side reference in the
    /// calling module. The reference is then resolved in the module where the
    /// chain of explicit passes ends. Requirements tables are never
    /// inherited: each step resolves against the module that wrote the
    /// reference.
    pub fn resolve_passed_provider(
        &self,
        local: &LocalProviderConfig,
        module: &ModulePath,
    ) -> AbsProviderConfig {
        self.try_resolve_passed_provider(local, module)
            .unwrap_or_else(|err| panic!("provider resolution contract violated: {err}"))
    }

    pub fn try_resolve_passed_provider(
        &self,
        local: &LocalProviderConfig,
        module: &ModulePath,
    ) -> Result<AbsProviderConfig, ResolveError> {
        let mut current = local.clone();
        let mut path = module.clone();
        self.owning_module(&current, &path)?;

        while let Some(call) = self.module_call(&path) {
            let Some(in_parent) = call.passed_for(&current) else {
                break;
            };
            tracing::trace!(
                module = %path,
                in_child = %current,
                %in_parent,
                "following provider passed by module call"
            );
            current = in_parent.clone();
            path = path.parent().unwrap_or_default();
        }

        self.try_resolve_abs_provider_addr(current, &path)
    }

    fn owning_module(
        &self,
        local: &LocalProviderConfig,
        module: &ModulePath,
    ) -> Result<&Module, ResolveError> {
        if local.local_name.is_empty() {
            return Err(ResolveError::EmptyLocalName(module.clone()));
        }
        self.module(module)
            .ok_or_else(|| ResolveError::UnknownModule(module.clone()))
    }
}

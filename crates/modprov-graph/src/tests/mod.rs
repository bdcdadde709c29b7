//! Crate-level tests for modprov-graph.


use modprov_addrs::{DEFAULT_REGISTRY_HOST, LocalProviderConfig, Provider};

use crate::{ConfigTree, Module, ModuleBuilder};

/// Root module with no requirements and two children sourcing `test`
/// from different namespaces.
pub(crate) fn nested_fqns_tree() -> ConfigTree {
    ConfigTree::build(
        Module::builder()
            .provider_config(LocalProviderConfig::new_default("test"))
            .call(
                "child1",
                ModuleBuilder::new()
                    .require("test", Provider::new(DEFAULT_REGISTRY_HOST, "bar", "test"))
                    .provider_config(LocalProviderConfig::new_default("test")),
            )
            .call(
                "child2",
                ModuleBuilder::new()
                    .require("test", Provider::new(DEFAULT_REGISTRY_HOST, "foo", "test"))
                    .provider_config(LocalProviderConfig::new_default("test")),
            ),
    )
    .expect("nested fixture should build")
}

/// Root module sourcing `foo-test` explicitly.
pub(crate) fn explicit_fqn_tree() -> ConfigTree {
    ConfigTree::build(
        Module::builder()
            .require("foo-test", Provider::new(DEFAULT_REGISTRY_HOST, "foo", "test"))
            .provider_config(LocalProviderConfig::new_default("foo-test")),
    )
    .expect("explicit fixture should build")
}

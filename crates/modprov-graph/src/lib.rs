//! # modprov-graph
//!
//! Module tree and provider resolution.
//!
//! Configuration authors refer to providers by short local names (`aws`,
//! `null`) inside each module. This crate maps each of those names, per
//! module, to the fully-qualified [`Provider`](modprov_addrs::Provider) that
//! backs it, and reports the set of providers a whole configuration uses.
//!
//! ## Overview
//!
//! - **[`ProviderRequirements`]**: one module's local name -> provider table
//! - **[`Module`]**: a tree node with its requirements, provider
//!   configuration blocks, resources and module calls
//! - **[`ConfigTree`]**: the immutable tree, with the resolver and inventory
//! - **[`ModuleManifest`]**: serialized tree handed over by the loader
//!
//! ## Resolution rules
//!
//! ```text
//!   reference + owning module path
//!            │
//!            ├── already absolute ──────────────► returned unchanged
//!            │
//!            ▼
//!   owning module's requirements table
//!            │
//!            ├── entry found ───────────────────► explicit provider
//!            │
//!            └── no entry ──────────────────────► legacy provider for the name
//! ```
//!
//! A module never consults another module's table, not even its parent's.
//!
//! ## Quick Start
//!
//! ```rust
//! use modprov_addrs::{LocalProviderConfig, ModulePath, Provider};
//! use modprov_graph::{ConfigTree, Module, ModuleBuilder};
//!
//! # fn main() -> Result<(), modprov_graph::GraphError> {
//! let tree = ConfigTree::build(
//!     Module::builder()
//!         .provider_config(LocalProviderConfig::new_default("test"))
//!         .call(
//!             "child",
//!             ModuleBuilder::new()
//!                 .require("test", Provider::new("registry.terraform.io", "foo", "test"))
//!                 .provider_config(LocalProviderConfig::new_default("test")),
//!         ),
//! )?;
//!
//! let providers = tree.provider_types();
//! assert_eq!(providers.len(), 2);
//! assert_eq!(providers[0], Provider::new_legacy("test"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! `ConfigTree` is immutable after construction and holds its root behind an
//! `Arc`. Clones are cheap and every query takes `&self`, so a tree can be
//! shared across threads without synchronization.

pub mod error;
pub mod manifest;
pub mod module;
pub mod requirements;
pub mod resource;
mod tree;

pub use error::{GraphError, ResolveError, Result};
pub use manifest::{
    ModuleCallEntry, ModuleManifest, PassedProviderEntry, ProviderConfigEntry,
    RequiredProviderEntry, ResourceEntry, parse_local_reference,
};
pub use module::{Module, ModuleBuilder, ModuleCall, PassedProviderConfig};
pub use requirements::{Provenance, ProviderRequirements, Resolution};
pub use resource::{Resource, ResourceMode, implied_provider_local_name};
pub use tree::{ConfigTree, Walk};

#[cfg(test)]
mod tests;

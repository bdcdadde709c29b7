//! Construction methods for ConfigTree.

use std::path::Path;
use std::sync::Arc;

use modprov_addrs::ModulePath;

use super::ConfigTree;
use crate::error::{GraphError, Result};
use crate::manifest::ModuleManifest;
use crate::module::{Module, ModuleBuilder};

impl ConfigTree {
    /// Tree whose root module declares nothing.
    pub fn empty() -> Self {
        Self::from_module(Module::empty(ModulePath::root()))
    }

    /// Wrap an already built root module.
    ///
    /// The module must have been built at [`ModulePath::root`].
    pub fn from_module(root: Module) -> Self {
        debug_assert!(root.path().is_root(), "root module must have the root path");
        Self {
            root: Arc::new(root),
        }
    }

    /// Validate and build a tree from a root [`ModuleBuilder`].
    pub fn build(root: ModuleBuilder) -> Result<Self> {
        let tree = Self::from_module(root.build(ModulePath::root())?);
        tracing::debug!(modules = tree.module_count(), "built configuration tree");
        Ok(tree)
    }

    /// Build a tree from a parsed module manifest.
    pub fn from_manifest(manifest: &ModuleManifest) -> Result<Self> {
        Self::build(manifest.to_builder(&ModulePath::root())?)
    }

    /// Read a manifest file and build its tree.
    ///
    /// The format is chosen by extension: `.json` or `.toml`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = path.extension().and_then(|ext| ext.to_str());
        let manifest = match format {
            Some("json") => ModuleManifest::from_json_str(&read_manifest(path)?)?,
            Some("toml") => ModuleManifest::from_toml_str(&read_manifest(path)?)?,
            _ => return Err(GraphError::UnsupportedFormat(path.to_path_buf())),
        };
        tracing::debug!(path = %path.display(), "loaded module manifest");
        Self::from_manifest(&manifest)
    }
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::empty()
    }
}

fn read_manifest(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })
}

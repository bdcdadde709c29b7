//! Query methods for ConfigTree.

use modprov_addrs::ModulePath;

use super::{ConfigTree, Walk};
use crate::module::{Module, ModuleCall};

impl ConfigTree {
    pub fn root(&self) -> &Module {
        &self.root
    }

    /// Module at `path`, or `None` if no chain of calls leads there.
    pub fn module(&self, path: &ModulePath) -> Option<&Module> {
        path.steps()
            .iter()
            .try_fold(self.root(), |module, step| {
                module.call(step).map(ModuleCall::module)
            })
    }

    pub fn contains_module(&self, path: &ModulePath) -> bool {
        self.module(path).is_some()
    }

    /// The call that created the module at `path`, or `None` for the root
    /// and unknown paths.
    pub fn module_call(&self, path: &ModulePath) -> Option<&ModuleCall> {
        let parent = self.module(&path.parent()?)?;
        parent.call(path.call_name()?)
    }

    /// Visit every module once, parents before children.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self.root())
    }

    /// Paths of every module in walk order.
    pub fn module_paths(&self) -> Vec<ModulePath> {
        self.walk().map(|module| module.path().clone()).collect()
    }

    pub fn module_count(&self) -> usize {
        self.walk().count()
    }
}

//! Whole-tree provider inventory.

use modprov_addrs::Provider;
use modprov_config::InventorySettings;
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use super::ConfigTree;
use crate::module::Module;

impl ConfigTree {
    /// Every provider identity used anywhere in the tree.
    ///
    /// Provider configuration blocks and resource provider references of each
    /// module are resolved against that module's own requirements. The result
    /// has no duplicates and is sorted by hostname, namespace, then type.
    pub fn provider_types(&self) -> Vec<Provider> {
        let mut seen = FxHashSet::default();
        for module in self.walk() {
            gather_module(module, &mut seen);
        }
        into_sorted(seen)
    }

    /// Like [`ConfigTree::provider_types`], walking child subtrees on the
    /// rayon pool when `settings` ask for it and the tree is large enough.
    ///
    /// Each branch fills a private set; sets are merged by union at join
    /// points, so the result is identical to the sequential walk.
    pub fn provider_types_with(&self, settings: &InventorySettings) -> Vec<Provider> {
        let module_count = self.module_count();
        if !settings.use_parallel(module_count) {
            return self.provider_types();
        }

        tracing::debug!(module_count, "collecting provider types in parallel");
        into_sorted(gather_subtree_parallel(self.root()))
    }
}

fn gather_module(module: &Module, seen: &mut FxHashSet<Provider>) {
    for reference in module.provider_references() {
        seen.insert(module.provider_for_local_config(&reference));
    }
}

fn gather_subtree_parallel(module: &Module) -> FxHashSet<Provider> {
    let mut own = FxHashSet::default();
    gather_module(module, &mut own);

    let children: Vec<&Module> = module.calls().map(|call| call.module()).collect();
    let descendants = children
        .par_iter()
        .map(|child| gather_subtree_parallel(child))
        .reduce(FxHashSet::default, |mut merged, branch| {
            merged.extend(branch);
            merged
        });

    own.extend(descendants);
    own
}

fn into_sorted(seen: FxHashSet<Provider>) -> Vec<Provider> {
    let mut providers: Vec<Provider> = seen.into_iter().collect();
    providers.sort();
    providers
}

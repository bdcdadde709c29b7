//! The configuration tree and the queries it answers.
//!
//! `ConfigTree` owns the root [`Module`](crate::Module) behind an `Arc`, so
//! clones are cheap and a tree can be shared across threads without locks.
//! Methods are grouped by concern in the submodules, each adding an `impl`
//! block to `ConfigTree`.

mod construction;
mod inventory;
mod queries;
mod resolve;
mod traversal;

use std::sync::Arc;

use crate::module::Module;

pub use traversal::Walk;

/// Immutable tree of modules rooted at the root module.
#[derive(Debug, Clone)]
pub struct ConfigTree {
    root: Arc<Module>,
}

//! Per-module provider requirements.
//!
//! Each module declares which plugin backs each of its local provider names.
//! The table is built once when the module is constructed and only read
//! afterwards. A name missing from the table is not an error: it resolves to
//! the legacy identity for that name.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use modprov_addrs::{ModulePath, Provider};

use crate::error::{GraphError, Result};

/// How a local name was mapped to its provider identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// The module declared a source for the name.
    Explicit,
    /// No source was declared; the legacy identity was inferred.
    LegacyDefault,
}

/// Outcome of looking a local name up in a [`ProviderRequirements`] table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub provider: Provider,
    pub provenance: Provenance,
}

impl Resolution {
    pub fn is_explicit(&self) -> bool {
        self.provenance == Provenance::Explicit
    }
}

/// Mapping from local provider name to provider identity for one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderRequirements {
    entries: BTreeMap<String, Provider>,
}

impl ProviderRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table for `module` from its declared entries.
    ///
    /// Fails on the first duplicate local name instead of keeping either of
    /// the conflicting entries.
    pub fn from_entries<I, S>(module: &ModulePath, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Provider)>,
        S: Into<String>,
    {
        let mut table = BTreeMap::new();
        for (local_name, provider) in entries {
            let local_name = local_name.into();
            if local_name.is_empty() {
                return Err(GraphError::EmptyLocalName {
                    module: module.clone(),
                });
            }
            match table.entry(local_name) {
                Entry::Occupied(existing) => {
                    return Err(GraphError::DuplicateRequirement {
                        module: module.clone(),
                        local_name: existing.key().clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(provider);
                }
            }
        }
        Ok(Self { entries: table })
    }

    /// Explicitly declared identity for `local_name`, if any.
    pub fn get(&self, local_name: &str) -> Option<&Provider> {
        self.entries.get(local_name)
    }

    pub fn contains(&self, local_name: &str) -> bool {
        self.entries.contains_key(local_name)
    }

    /// Map `local_name` to an identity, falling back to the legacy form.
    pub fn lookup(&self, local_name: &str) -> Resolution {
        match self.entries.get(local_name) {
            Some(provider) => Resolution {
                provider: provider.clone(),
                provenance: Provenance::Explicit,
            },
            None => Resolution {
                provider: Provider::new_legacy(local_name),
                provenance: Provenance::LegacyDefault,
            },
        }
    }

    /// Declared entries ordered by local name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Provider)> {
        self.entries.iter().map(|(name, p)| (name.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

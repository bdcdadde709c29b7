//! Provider identities.
//!
//! A [`Provider`] names an external plugin by registry hostname, namespace and
//! type. Identities for names that were never given an explicit source use the
//! reserved legacy namespace on the default registry host.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseProviderError;
use crate::source::parse_provider_source;

/// Registry hostname assumed when a source omits one.
pub const DEFAULT_REGISTRY_HOST: &str = "registry.terraform.io";

/// Namespace assumed when a source only names the provider type.
pub const DEFAULT_PROVIDER_NAMESPACE: &str = "hashicorp";

/// Reserved namespace marking an identity inferred for backward compatibility.
pub const LEGACY_PROVIDER_NAMESPACE: &str = "-";

/// Hostname of providers compiled into the host tool.
pub const BUILTIN_PROVIDER_HOST: &str = "terraform.io";

/// Namespace of providers compiled into the host tool.
pub const BUILTIN_PROVIDER_NAMESPACE: &str = "builtin";

/// Fully-qualified identity of a provider plugin.
///
/// Field order doubles as the canonical total order: hostname, then
/// namespace, then type.
///
/// Deserialized values go through the same rules as
/// [`parse_provider_source`], so a stored identity can never hold parts the
/// parser would reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "ProviderFields")]
pub struct Provider {
    hostname: String,
    namespace: String,
    #[serde(rename = "type")]
    type_name: String,
}

impl Provider {
    /// Create a fully specified provider identity.
    pub fn new(
        hostname: impl Into<String>,
        namespace: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            namespace: namespace.into(),
            type_name: type_name.into(),
        }
    }

    /// Create the backward-compatible identity for a bare provider name.
    ///
    /// Used only when a module declares no explicit source for `type_name`.
    ///
    /// # Example
    ///
    /// ```
    /// use modprov_addrs::Provider;
    ///
    /// let aws = Provider::new_legacy("aws");
    /// assert!(aws.is_legacy());
    /// assert_eq!(aws.to_string(), "registry.terraform.io/-/aws");
    /// ```
    pub fn new_legacy(type_name: impl Into<String>) -> Self {
        Self::new(DEFAULT_REGISTRY_HOST, LEGACY_PROVIDER_NAMESPACE, type_name)
    }

    /// Create the identity a one-part source string (`"aws"`) expands to.
    pub fn new_default(type_name: impl Into<String>) -> Self {
        Self::new(DEFAULT_REGISTRY_HOST, DEFAULT_PROVIDER_NAMESPACE, type_name)
    }

    /// Create the identity of a provider built into the host tool.
    pub fn new_builtin(type_name: impl Into<String>) -> Self {
        Self::new(BUILTIN_PROVIDER_HOST, BUILTIN_PROVIDER_NAMESPACE, type_name)
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Field-wise comparison, same as `==`.
    pub fn equals(&self, other: &Provider) -> bool {
        self == other
    }

    /// True if this identity was inferred by the legacy fallback.
    pub fn is_legacy(&self) -> bool {
        self.hostname == DEFAULT_REGISTRY_HOST && self.namespace == LEGACY_PROVIDER_NAMESPACE
    }

    /// True if this identity lives in the default namespace of the default registry.
    pub fn is_default(&self) -> bool {
        self.hostname == DEFAULT_REGISTRY_HOST && self.namespace == DEFAULT_PROVIDER_NAMESPACE
    }

    pub fn is_builtin(&self) -> bool {
        self.hostname == BUILTIN_PROVIDER_HOST && self.namespace == BUILTIN_PROVIDER_NAMESPACE
    }

    /// Bare type name, the form legacy configurations were written with.
    ///
    /// Only meaningful for legacy identities; other identities render in
    /// full so that two different plugins never print the same.
    pub fn legacy_string(&self) -> String {
        if self.is_legacy() {
            self.type_name.clone()
        } else {
            self.to_string()
        }
    }

    /// Short form for user-facing messages.
    ///
    /// Drops the hostname when it is the default registry.
    pub fn for_display(&self) -> String {
        if self.hostname == DEFAULT_REGISTRY_HOST {
            format!("{}/{}", self.namespace, self.type_name)
        } else {
            self.to_string()
        }
    }
}

/// Unvalidated serialized form of [`Provider`].
#[derive(Deserialize)]
struct ProviderFields {
    hostname: String,
    namespace: String,
    #[serde(rename = "type")]
    type_name: String,
}

impl TryFrom<ProviderFields> for Provider {
    type Error = ParseProviderError;

    fn try_from(fields: ProviderFields) -> Result<Self, Self::Error> {
        parse_provider_source(&format!(
            "{}/{}/{}",
            fields.hostname, fields.namespace, fields.type_name
        ))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.hostname, self.namespace, self.type_name)
    }
}

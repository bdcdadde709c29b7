//! # modprov-addrs
//!
//! Address types for provider resolution.
//!
//! This crate holds the value types shared by everything that resolves or
//! reports providers:
//!
//! - [`Provider`] - fully-qualified plugin identity (hostname, namespace, type)
//! - [`LocalProviderConfig`] - module-scoped provider reference (`aws.east`)
//! - [`ModulePath`] - location of a module in the configuration tree
//! - [`AbsProviderConfig`] - resolved address (module path + identity + alias)
//!
//! All types are immutable values: cheap to clone, `Send + Sync`, and with
//! stable `Display` renderings that diagnostics and tests compare against.
//!
//! ```
//! use modprov_addrs::{AbsProviderConfig, ModulePath, Provider};
//!
//! let addr = AbsProviderConfig::new(
//!     ModulePath::root().child("network"),
//!     Provider::new_legacy("aws"),
//!     Some("east".to_string()),
//! );
//! assert_eq!(
//!     addr.to_string(),
//!     r#"module.network.provider["registry.terraform.io/-/aws"].east"#
//! );
//! ```

pub mod error;
pub mod module_path;
pub mod provider;
pub mod provider_config;
pub mod source;

pub use error::{ParseProviderError, Result};
pub use module_path::ModulePath;
pub use provider::{
    BUILTIN_PROVIDER_HOST, BUILTIN_PROVIDER_NAMESPACE, DEFAULT_PROVIDER_NAMESPACE,
    DEFAULT_REGISTRY_HOST, LEGACY_PROVIDER_NAMESPACE, Provider,
};
pub use provider_config::{AbsProviderConfig, LocalProviderConfig, ProviderConfigAddr};
pub use source::parse_provider_source;

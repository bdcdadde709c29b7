//! # modprov-config
//!
//! Settings for the provider resolver, layered with `figment`:
//! defaults, then `modprov.toml`, then `MODPROV_*` environment variables.
//!
//! ```
//! use modprov_config::ResolverSettings;
//!
//! let settings = ResolverSettings::from_toml_str("[inventory]\nparallel = true")?;
//! assert!(settings.inventory.parallel);
//! # Ok::<(), modprov_config::ConfigError>(())
//! ```

pub mod error;
mod loading;
pub mod logger;
pub mod settings;

pub use error::{ConfigError, Result};
pub use settings::{ENV_PREFIX, InventorySettings, ResolverSettings, SETTINGS_FILE_NAME};

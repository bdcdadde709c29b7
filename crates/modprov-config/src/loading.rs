use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};

use crate::error::{ConfigError, Result};
use crate::settings::{ENV_PREFIX, ResolverSettings, SETTINGS_FILE_NAME};

impl ResolverSettings {
    /// Load settings from every source.
    /// Priority: environment variables > settings file > defaults
    ///
    /// An explicit `path` must exist. Without one, `modprov.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let default_path = Path::new(SETTINGS_FILE_NAME);
                if default_path.exists() {
                    figment = figment.merge(Toml::file(default_path));
                }
            }
        }

        // MODPROV_LOG_LEVEL, MODPROV_INVENTORY__PARALLEL, ...
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::from_figment(&figment)
    }

    /// Extract and validate settings from a prepared figment.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let settings: Self = figment.extract()?;
        settings.validate()?;
        tracing::debug!(
            log_level = ?settings.log_level,
            parallel_inventory = settings.inventory.parallel,
            "loaded resolver settings"
        );
        Ok(settings)
    }

    /// Parse settings from TOML text layered over the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(source));
        Self::from_figment(&figment)
    }
}

//! Resolver settings shared by every crate in the workspace.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default file name searched for in the working directory.
pub const SETTINGS_FILE_NAME: &str = "modprov.toml";

/// Prefix of environment variables overriding file settings.
pub const ENV_PREFIX: &str = "MODPROV_";

/// Log formats accepted by [`crate::logger::init_logger`].
pub const LOG_FORMATS: &[&str] = &["compact", "pretty"];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// `tracing` filter directive, e.g. `debug` or `modprov_graph=trace`.
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub log_format: Option<String>,

    #[serde(default)]
    pub inventory: InventorySettings,
}

/// Controls how the provider inventory walks the module tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySettings {
    /// Walk child subtrees on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,

    /// Minimum number of modules before a parallel walk is used.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_parallel_threshold() -> usize {
    64
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            parallel: false,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl InventorySettings {
    /// Settings that always walk in parallel, regardless of tree size.
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 1,
        }
    }

    /// True if a tree with `module_count` modules should be walked in parallel.
    pub fn use_parallel(&self, module_count: usize) -> bool {
        self.parallel && module_count >= self.parallel_threshold
    }
}

impl ResolverSettings {
    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = &self.log_level {
            if let Err(err) = tracing_subscriber::EnvFilter::try_new(level) {
                return Err(ConfigError::InvalidValue {
                    field: "log_level",
                    value: level.clone(),
                    hint: err.to_string(),
                });
            }
        }

        if let Some(format) = &self.log_format {
            if !LOG_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "log_format",
                    value: format.clone(),
                    hint: format!("expected one of {}", LOG_FORMATS.join(", ")),
                });
            }
        }

        if self.inventory.parallel_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "inventory.parallel_threshold",
                value: "0".to_string(),
                hint: "use 1 to always walk in parallel".to_string(),
            });
        }

        Ok(())
    }

    /// Render the settings as TOML, e.g. to seed a settings file.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sequential() {
        let settings = ResolverSettings::default();
        assert!(settings.log_level.is_none());
        assert!(settings.log_format.is_none());
        assert!(!settings.inventory.parallel);
        assert_eq!(settings.inventory.parallel_threshold, 64);
        assert!(!settings.inventory.use_parallel(1_000));
        settings.validate().unwrap();
    }

    #[test]
    fn parallel_threshold_gates_parallel_walk() {
        let inventory = InventorySettings {
            parallel: true,
            parallel_threshold: 10,
        };
        assert!(!inventory.use_parallel(9));
        assert!(inventory.use_parallel(10));
        assert!(InventorySettings::parallel().use_parallel(1));
    }

    #[test]
    fn validate_rejects_unknown_log_format() {
        let settings = ResolverSettings {
            log_format: Some("json".to_string()),
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "log_format",
                ..
            }
        ));
    }

    #[test]
    fn validate_rejects_zero_threshold() {
        let mut settings = ResolverSettings::default();
        settings.inventory.parallel_threshold = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_filter() {
        let settings = ResolverSettings {
            log_level: Some("modprov=notalevel".to_string()),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn renders_as_toml() {
        let rendered = ResolverSettings::default().to_toml_string().unwrap();
        assert!(rendered.contains("[inventory]"));
        assert!(rendered.contains("parallel_threshold = 64"));
    }
}

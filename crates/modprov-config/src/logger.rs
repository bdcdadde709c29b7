//! Logging setup for processes embedding the resolver.
//!
//! The resolver crates only emit `tracing` events; the embedding process
//! decides whether and how they are printed. These helpers install a
//! `tracing-subscriber` registry driven by [`ResolverSettings`].
//!
//! # Example
//!
//! ```rust,no_run
//! use modprov_config::{ResolverSettings, logger::init_logger};
//!
//! let settings = ResolverSettings::load(None)?;
//! init_logger(&settings, false);
//! # Ok::<(), modprov_config::ConfigError>(())
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::ResolverSettings;

/// Filter used when neither the settings nor `RUST_LOG` specify one.
pub const DEFAULT_FILTER: &str = "modprov_addrs=info,modprov_config=info,modprov_graph=info";

/// Build the filter for `settings`.
///
/// The level is determined in this order:
/// 1. `log_level` from the settings
/// 2. `RUST_LOG` environment variable
/// 3. [`DEFAULT_FILTER`]
///
/// A `log_level` that does not parse is skipped with a warning, and the next
/// source is used. [`ResolverSettings::validate`] rejects such values up front.
pub fn env_filter(settings: &ResolverSettings) -> EnvFilter {
    settings
        .log_level
        .as_deref()
        .and_then(|level| match EnvFilter::try_new(level) {
            Ok(filter) => Some(filter),
            Err(err) => {
                tracing::warn!(log_level = level, error = %err, "ignoring invalid log level");
                None
            }
        })
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber described by `settings`.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case the existing one is kept.
pub fn init_logger(settings: &ResolverSettings, no_color: bool) -> bool {
    let filter = env_filter(settings);
    let pretty = settings.log_format.as_deref() == Some("pretty");

    let installed = if pretty {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(!no_color).pretty())
            .try_init()
            .is_ok()
    } else {
        init_logger_with_filter(filter, no_color)
    };

    if installed {
        tracing::debug!(pretty, "logger initialized");
    }
    installed
}

/// Install a compact subscriber with a custom filter.
///
/// Useful in tests that need precise control over what is printed.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) -> bool {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
}

use crate::error::ConfigError;
use config::{Environment, File, FileFormat};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{ClampRule, Config, DisplayConfig, LoggingConfig, ServerConfig};

/// The file looked up when no path is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "macrolab.toml";

/// Prefix of environment variables that override file settings,
/// e.g. `MACROLAB__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "MACROLAB";

/// Loads the application configuration from a TOML file plus the environment.
///
/// A missing file is not an error: every section has a default, so the
/// application can run unconfigured. The result is validated before it is
/// returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config = build(File::from(path).format(FileFormat::Toml).required(false), true)?;
    tracing::debug!(
        path = %path.display(),
        concepts_with_defaults = config.defaults.len(),
        clamps = config.display.clamps.len(),
        "Configuration loaded."
    );
    Ok(config)
}

/// Parses and validates configuration from TOML text, ignoring the environment.
pub fn config_from_toml(text: &str) -> Result<Config, ConfigError> {
    build(File::from_str(text, FileFormat::Toml), false)
}

fn build<S>(file: S, with_env: bool) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let mut builder = config::Config::builder().add_source(file);
    if with_env {
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );
    }

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML file or a `MACROLAB__*` variable could not be read or does not
    /// fit the `Config` shape.
    #[error("Failed to read settings from the TOML file or MACROLAB__* variables: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("[defaults.{0}] does not name a known concept")]
    UnknownConcept(String),

    #[error("Display clamp for {concept}.{output} has min {min} above max {max}")]
    InvertedClamp {
        concept: String,
        output: String,
        min: Decimal,
        max: Decimal,
    },
}

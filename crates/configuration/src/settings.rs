use crate::error::ConfigError;
use core_types::Concept;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Default scalar inputs per concept name, e.g. `[defaults.okuns-law]`.
    /// Only outer layers apply these; the evaluator never sees them.
    #[serde(default)]
    pub defaults: HashMap<String, HashMap<String, Decimal>>,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Presentation-only adjustments to evaluator outputs.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "standard_clamps")]
    pub clamps: Vec<ClampRule>,
}

/// Bounds one output of one concept for display.
///
/// Clamping is a presentation convenience, not part of any economic formula.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClampRule {
    pub concept: Concept,
    pub output: String,
    #[serde(default)]
    pub min: Option<Decimal>,
    #[serde(default)]
    pub max: Option<Decimal>,
}

/// Parameters for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_level")]
    pub level: String,
    /// When set, logs are also written to daily-rolling files in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Config {
    pub fn defaults_for(&self, concept: Concept) -> Option<&HashMap<String, Decimal>> {
        self.defaults.get(concept.as_str())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in self.defaults.keys() {
            Concept::from_str(name).map_err(|_| ConfigError::UnknownConcept(name.clone()))?;
        }
        for rule in &self.display.clamps {
            if let (Some(min), Some(max)) = (rule.min, rule.max) {
                if min > max {
                    return Err(ConfigError::InvertedClamp {
                        concept: rule.concept.to_string(),
                        output: rule.output.clone(),
                        min,
                        max,
                    });
                }
            }
        }
        Ok(())
    }
}

// --- Default Implementations ---
// These let a user omit whole sections from the toml and still have it work
// with the same behavior the dashboards had.

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            clamps: standard_clamps(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: None,
        }
    }
}

/// Unemployment shown within [1, 20]% after Okun's law, inflation floored at
/// 0.5% on the Phillips curve.
fn standard_clamps() -> Vec<ClampRule> {
    vec![
        ClampRule {
            concept: Concept::OkunsLaw,
            output: "new_unemployment".to_string(),
            min: Some(dec!(1)),
            max: Some(dec!(20)),
        },
        ClampRule {
            concept: Concept::PhillipsCurve,
            output: "inflation".to_string(),
            min: Some(dec!(0.5)),
            max: None,
        },
    ]
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_level() -> String {
    "info".to_string()
}

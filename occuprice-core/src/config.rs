//! Loading simulation parameters from JSON
//!
//! Hosts usually keep `alpha` and `base_price` next to their other settings
//! rather than in code. Missing fields fall back to [`SimulationConfig::default`]:
//!
//! ```json
//! { "alpha": 0.25, "base_price": 12.0 }
//! ```
//!
//! Values are validated after parsing, so a file that parses but holds a
//! non-finite number is still rejected.

use std::fs;
use std::path::Path;

use thiserror_no_std::Error;

use crate::{errors::PricingError, simulator::SimulationConfig};

/// Errors raised while loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The contents are not a valid configuration document
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but holds unusable values
    #[error("Invalid config: {0}")]
    Invalid(#[from] PricingError),
}

impl SimulationConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;

        log::debug!(
            "Loaded simulation config from {}: alpha={}, base_price={}",
            path.display(), config.alpha, config.base_price
        );

        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

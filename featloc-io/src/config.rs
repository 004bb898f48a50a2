use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column layout of a feature table.
///
/// Fields missing from a config file take the GenBank defaults.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct FormatConfig {
    /// Column of the feature key.
    pub feature_indent: usize,
    /// Column of the location and of every qualifier line.
    pub qualifier_indent: usize,
    /// Maximum rendered line length.
    pub line_width: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            feature_indent: 5,
            qualifier_indent: 21,
            line_width: 80,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl FormatConfig {
    pub fn from_toml(toml_str: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}

impl TryFrom<&Path> for FormatConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        FormatConfig::from_toml(&toml_str)
    }
}

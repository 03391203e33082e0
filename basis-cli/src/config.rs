//! Runtime configuration read from the environment

use std::env;
use std::path::PathBuf;
use basis::{OutputFormat, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use thiserror::Error;

pub const UNIT_DATABASE_VAR: &str = "BASIS_UNIT_DATABASE";
pub const MAX_DEPTH_VAR: &str = "BASIS_MAX_DEPTH";
pub const OUTPUT_VAR: &str = "BASIS_OUTPUT";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be an integer from 1 to {max}, got '{value}'", max = MAX_DEPTH_LIMIT)]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var}: {message}")]
    InvalidValue { var: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// CSV database to load; `None` uses the copy built into the binary
    pub unit_database: Option<PathBuf>,
    pub max_depth: usize,
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit_database: None,
            max_depth: DEFAULT_MAX_DEPTH,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(path) = get(UNIT_DATABASE_VAR) {
            config.unit_database = Some(PathBuf::from(path));
        }

        if let Some(value) = get(MAX_DEPTH_VAR) {
            config.max_depth = match value.parse::<usize>() {
                Ok(depth) if (1..=MAX_DEPTH_LIMIT).contains(&depth) => depth,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: MAX_DEPTH_VAR,
                        value,
                    })
                }
            };
        }

        if let Some(value) = get(OUTPUT_VAR) {
            config.output = value
                .parse()
                .map_err(|message| ConfigError::InvalidValue { var: OUTPUT_VAR, message })?;
        }

        Ok(config)
    }
}

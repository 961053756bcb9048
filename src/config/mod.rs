//! Configuration for the logger tree.
//!
//! Loaded from layered sources with increasing priority:
//! 1. Default values (hardcoded)
//! 2. Config file named by `CONFIG_PATH`
//! 3. Override file passed to [`LogTreeConfig::with_override_config`]
//! 4. Environment variables prefixed with `LOGTREE__` (highest priority)
//!
//! Per-name entries are a list of `[[loggers]]` tables so that dotted names stay literal.

mod configurator;
mod logger;
pub use configurator::*;
pub use logger::*;


//---
use std::collections::HashSet;
use std::env;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Level;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LogTreeConfig {
    /// Settings for the root logger (the empty name)
    #[serde(default = "default_root")]
    pub root: LoggerConfig,

    /// Settings for named loggers
    #[serde(default)]
    pub loggers: Vec<NamedLoggerConfig>,
}

impl Default for LogTreeConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            loggers: Vec::new(),
        }
    }
}

impl LogTreeConfig {
    /// Defaults, then `CONFIG_PATH`, then `LOGTREE__*` environment variables.
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Ok(config_path) = env::var("CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&config_path).required(true));
        }

        builder = builder.add_source(Self::env_source());

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config) // No validation - deferred to validate()
    }

    /// Layer the file at `path` over `self`, environment variables still winning.
    pub fn with_override_config(
        &self,
        path: &str,
    ) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::with_name(path))
            .add_source(Self::env_source())
            .build()?
            .try_deserialize()?;
        Ok(config) // No validation - deferred to validate()
    }

    fn env_source() -> Environment {
        Environment::with_prefix("LOGTREE")
            .separator("__")
            .ignore_empty(true)
            .try_parsing(true)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.loggers {
            if entry.name.is_empty() {
                return Err(Error::Config(ConfigError::Message(
                    "logger entries must have a non-empty name; use [root] for the root logger"
                        .into(),
                )));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(Error::Config(ConfigError::Message(format!(
                    "duplicate logger entry: {}",
                    entry.name
                ))));
            }
        }

        if self.root.minimum_level == Some(Level::OFF) {
            return Err(Error::Config(ConfigError::Message(
                "root minimum_level OFF would disable every logger".into(),
            )));
        }

        Ok(())
    }

    /// Entry for `name`, where the empty name is the root.
    pub fn logger(
        &self,
        name: &str,
    ) -> Option<&LoggerConfig> {
        if name.is_empty() {
            return Some(&self.root);
        }
        self.loggers
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.config)
    }
}

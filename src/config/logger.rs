use serde::Deserialize;
use serde::Serialize;

use crate::Level;

/// Initial state for one logger name.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct LoggerConfig {
    /// Explicit level; unset means the logger inherits from its parent
    #[serde(default)]
    pub level: Option<Level>,

    /// Floor below which nothing is loggable, fixed at node creation; unset inherits the
    /// parent's floor
    #[serde(default)]
    pub minimum_level: Option<Level>,

    /// Names of handlers registered with the configurator
    #[serde(default)]
    pub handlers: Vec<String>,
}

/// A [`LoggerConfig`] bound to a full dotted logger name.
///
/// Names are carried as a field rather than a table key so that dots survive the layered
/// configuration loader untouched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NamedLoggerConfig {
    pub name: String,

    #[serde(flatten)]
    pub config: LoggerConfig,
}

pub(super) fn default_root() -> LoggerConfig {
    LoggerConfig {
        level: Some(Level::INFO),
        minimum_level: Some(Level::ALL),
        handlers: Vec::new(),
    }
}

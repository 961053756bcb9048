use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;
use tracing::warn;

use super::LogTreeConfig;
use crate::HandlerRef;
use crate::Level;

/// Source of the initial per-name state of logger nodes.
///
/// Queried once when a node is constructed, and lazily the first time a node's handler list
/// is needed.
#[cfg_attr(test, automock)]
pub trait Configurator: Send + Sync + 'static {
    fn level_of(
        &self,
        name: &str,
    ) -> Option<Level>;

    fn minimum_level_of(
        &self,
        name: &str,
    ) -> Option<Level>;

    fn handlers_of(
        &self,
        name: &str,
    ) -> Vec<HandlerRef>;
}

/// [`Configurator`] backed by a [`LogTreeConfig`] and a set of named handler instances.
#[derive(Default)]
pub struct ConfigConfigurator {
    config: LogTreeConfig,
    handlers: HashMap<String, HandlerRef>,
}

impl ConfigConfigurator {
    pub fn new(config: LogTreeConfig) -> Self {
        Self {
            config,
            handlers: HashMap::new(),
        }
    }

    /// Make `handler` available to logger entries that list `name`.
    pub fn with_handler(
        mut self,
        name: impl Into<String>,
        handler: HandlerRef,
    ) -> Self {
        self.handlers.insert(name.into(), handler);
        self
    }

    pub fn config(&self) -> &LogTreeConfig {
        &self.config
    }
}

impl Configurator for ConfigConfigurator {
    fn level_of(
        &self,
        name: &str,
    ) -> Option<Level> {
        self.config.logger(name).and_then(|c| c.level)
    }

    fn minimum_level_of(
        &self,
        name: &str,
    ) -> Option<Level> {
        self.config.logger(name).and_then(|c| c.minimum_level)
    }

    fn handlers_of(
        &self,
        name: &str,
    ) -> Vec<HandlerRef> {
        let Some(entry) = self.config.logger(name) else {
            return Vec::new();
        };
        entry
            .handlers
            .iter()
            .filter_map(|handler_name| {
                let handler = self.handlers.get(handler_name).cloned();
                if handler.is_none() {
                    warn!(logger = name, handler = %handler_name, "Configured handler is not registered, skipping");
                }
                handler
            })
            .collect()
    }
}

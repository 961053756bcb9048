use std::sync::Arc;

use tracing::debug;

use crate::node::TreeContext;
use crate::ConfigConfigurator;
use crate::Configurator;
use crate::ErrorReporter;
use crate::LogTreeConfig;
use crate::Logger;
use crate::LoggerNode;
use crate::TracingErrorReporter;

/// Owner of one logger tree and its collaborators.
///
/// Dropping the context releases the tree; loggers handed out earlier keep their own node
/// alive but stop delegating once their ancestors are gone.
pub struct LogContext {
    tree: Arc<TreeContext>,
    root: Arc<LoggerNode>,
}

impl LogContext {
    /// Context over the default configuration: root at INFO, no handlers.
    pub fn new() -> Self {
        Self::with_configurator(Arc::new(ConfigConfigurator::new(LogTreeConfig::default())))
    }

    pub fn with_configurator(configurator: Arc<dyn Configurator>) -> Self {
        Self::with_collaborators(configurator, Arc::new(TracingErrorReporter))
    }

    pub fn with_collaborators(
        configurator: Arc<dyn Configurator>,
        error_reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        let tree = Arc::new(TreeContext::new(configurator, error_reporter));
        let root = LoggerNode::new_root(Arc::clone(&tree));
        debug!(
            root_level = ?root.level(),
            root_min_level = root.effective_min_level(),
            "Log context initialized"
        );
        Self { tree, root }
    }

    pub fn root_node(&self) -> &Arc<LoggerNode> {
        &self.root
    }

    pub fn root_logger(&self) -> Logger {
        self.root.create_logger()
    }

    /// Logger for `name`, creating the path to it on demand.
    pub fn logger(
        &self,
        name: &str,
    ) -> Logger {
        self.root.get_or_create(name).create_logger()
    }

    /// Logger for `name` only if its node already exists.
    pub fn logger_if_exists(
        &self,
        name: &str,
    ) -> Option<Logger> {
        self.root.get_if_exists(name).map(|node| node.create_logger())
    }

    /// Names of all nodes a logger has been created for, in no particular order.
    pub fn logger_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut pending = vec![Arc::clone(&self.root)];
        while let Some(node) = pending.pop() {
            if node.has_logger() {
                names.push(node.full_name().to_string());
            }
            pending.extend(node.children());
        }
        names
    }

    /// Drop unused, state-free subtrees. Returns the number of nodes removed.
    pub fn prune(&self) -> usize {
        let removed = self.root.prune();
        debug!(removed, "Pruned logger tree");
        removed
    }

    pub fn configurator(&self) -> &Arc<dyn Configurator> {
        &self.tree.configurator
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new()
    }
}

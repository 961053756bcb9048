//! The logger name tree.
//!
//! One [`LoggerNode`] exists per dotted name. Nodes are created lazily, hold their own level,
//! filter, handler list and attachments, and inherit the effective level of their parent
//! unless an explicit level is set.
//!
//! # Locking
//!
//! ```text
//! hot path (any thread):  is_loggable_level -> atomic loads
//!                         publish           -> handler snapshot loads, parent walk
//! cold path:              set_level, delegated filter checks, prune
//!                         -> one reentrant lock per tree (TreeContext::tree_lock)
//! attachments:            per-node spin lock, independent of the tree lock
//! ```

mod attachment;
mod levels;
mod logger_node;
mod pipeline;
mod spin_lock;
pub use attachment::*;
pub use logger_node::*;

#[cfg(test)]
mod logger_node_test;

use std::sync::Arc;

use parking_lot::ReentrantMutex;

use crate::Configurator;
use crate::ErrorReporter;
use crate::Level;

/// Level the root falls back to when configured with none, or when its level is cleared.
pub const DEFAULT_ROOT_LEVEL: Level = Level::INFO;

/// Collaborators and the tree-wide lock shared by every node of one context.
pub(crate) struct TreeContext {
    /// Serializes level propagation and delegated filter evaluation. Reentrant so a filter
    /// running under it may call back into the tree from the same thread.
    pub(crate) tree_lock: ReentrantMutex<()>,
    pub(crate) configurator: Arc<dyn Configurator>,
    pub(crate) error_reporter: Arc<dyn ErrorReporter>,
}

impl TreeContext {
    pub(crate) fn new(
        configurator: Arc<dyn Configurator>,
        error_reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            tree_lock: ReentrantMutex::new(()),
            configurator,
            error_reporter,
        }
    }
}

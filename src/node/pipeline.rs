//! Filter evaluation and record dispatch.

use std::panic;
use std::panic::AssertUnwindSafe;

use tracing::warn;

use super::LoggerNode;
use crate::ErrorCategory;
use crate::LogRecord;

const PUBLISH_FAILURE_MESSAGE: &str = "Handler publication threw an exception";

impl LoggerNode {
    /// Run the filter chain for `record`.
    ///
    /// Without delegation only this node's filter applies. With delegation the chain is walked
    /// towards the root under the tree lock, for a consistent view across nodes; the walk stops
    /// accepting at the first node that does not delegate further.
    pub fn is_loggable(
        &self,
        record: &LogRecord,
    ) -> bool {
        if !self.use_parent_filters() {
            return self.own_filter_accepts(record);
        }

        let _tree = self.tree.tree_lock.lock();
        if !self.own_filter_accepts(record) {
            return false;
        }
        let mut next = self.parent();
        while let Some(node) = next {
            if !node.own_filter_accepts(record) {
                return false;
            }
            if !node.use_parent_filters() {
                return true;
            }
            next = node.parent();
        }
        true
    }

    fn own_filter_accepts(
        &self,
        record: &LogRecord,
    ) -> bool {
        self.filter().map_or(true, |f| f.is_loggable(record))
    }

    /// Hand `record` to this node's handlers in order, then to the parent chain while
    /// parent delegation is enabled.
    ///
    /// Never fails: handler errors go to the error reporter and panics are swallowed, so one
    /// misbehaving handler cannot stop its siblings or the ancestors.
    pub fn publish(
        &self,
        record: &LogRecord,
    ) {
        self.publish_own(record);
        if !self.use_parent_handlers() {
            return;
        }
        let mut next = self.parent();
        while let Some(node) = next {
            node.publish_own(record);
            if !node.use_parent_handlers() {
                return;
            }
            next = node.parent();
        }
    }

    fn publish_own(
        &self,
        record: &LogRecord,
    ) {
        let handlers = self.handlers();
        for handler in handlers.iter() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                if let Err(failure) = handler.publish(record) {
                    self.tree.error_reporter.report(
                        handler,
                        PUBLISH_FAILURE_MESSAGE,
                        &failure,
                        ErrorCategory::WriteFailure,
                    );
                }
            }));
            if outcome.is_err() {
                warn!(
                    logger = %self.full_name(),
                    handler = handler.name(),
                    "Handler panicked during publish, ignoring"
                );
            }
        }
    }
}

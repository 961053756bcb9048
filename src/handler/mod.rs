//! Collaborator capabilities consumed by the logger tree: handlers (sinks), filters, and the
//! error reporter used to surface handler failures without disturbing the log call site.

mod handler_array;
pub use handler_array::*;


use std::sync::Arc;

#[cfg(test)]
use mockall::automock;
use tracing::error;

use crate::metrics::HANDLER_FAILURES;
use crate::ErrorCategory;
use crate::HandlerError;
use crate::LogRecord;

pub type HandlerRef = Arc<dyn Handler>;
pub type FilterRef = Arc<dyn Filter>;

/// A sink that accepts records.
///
/// Implementations own all I/O. A returned error is reported and dispatch moves on; a panic is
/// caught and swallowed. Neither reaches the caller of the log statement.
pub trait Handler: Send + Sync + 'static {
    fn publish(
        &self,
        record: &LogRecord,
    ) -> Result<(), HandlerError>;

    /// Short label used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Predicate deciding whether a record proceeds to the handlers.
pub trait Filter: Send + Sync + 'static {
    fn is_loggable(
        &self,
        record: &LogRecord,
    ) -> bool;
}

impl<F> Filter for F
where
    F: Fn(&LogRecord) -> bool + Send + Sync + 'static,
{
    fn is_loggable(
        &self,
        record: &LogRecord,
    ) -> bool {
        self(record)
    }
}

#[cfg_attr(test, automock)]
pub trait ErrorReporter: Send + Sync + 'static {
    fn report(
        &self,
        handler: &HandlerRef,
        message: &str,
        failure: &HandlerError,
        category: ErrorCategory,
    );
}

/// Default reporter: logs through `tracing` and counts the failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(
        &self,
        handler: &HandlerRef,
        message: &str,
        failure: &HandlerError,
        category: ErrorCategory,
    ) {
        HANDLER_FAILURES
            .with_label_values(&[category.as_str()])
            .inc();
        error!(
            handler = handler.name(),
            category = category.as_str(),
            %failure,
            "{}",
            message
        );
    }
}

/// Handler identity: same allocation, regardless of vtable.
pub fn same_handler(
    a: &HandlerRef,
    b: &HandlerRef,
) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

//! the test_utils folder here will share handlers, filters and configurators between unit
//! tests
mod handlers;

pub use handlers::*;

use std::sync::Arc;

use crate::Configurator;
use crate::LogContext;
use crate::MockConfigurator;
use crate::MockErrorReporter;

/// Configurator mock that answers "nothing configured" for every name.
pub fn empty_configurator() -> MockConfigurator {
    let mut configurator = MockConfigurator::new();
    configurator.expect_level_of().returning(|_| None);
    configurator.expect_minimum_level_of().returning(|_| None);
    configurator.expect_handlers_of().returning(|_| Vec::new());
    configurator
}

/// Context whose error reporter accepts any number of reports.
pub fn context_with_silent_reporter(configurator: Arc<dyn Configurator>) -> LogContext {
    let mut reporter = MockErrorReporter::new();
    reporter.expect_report().returning(|_, _, _, _| ());
    LogContext::with_collaborators(configurator, Arc::new(reporter))
}

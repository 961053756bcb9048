use std::sync::Arc;

use parking_lot::Mutex;

use crate::Handler;
use crate::HandlerError;
use crate::HandlerRef;
use crate::LogRecord;

/// Shared journal of `"<handler>:<message>"` entries, in publish order across handlers.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

/// Records every message it receives.
pub struct RecordingHandler {
    label: String,
    journal: Journal,
}

impl RecordingHandler {
    pub fn new(
        label: &str,
        journal: &Journal,
    ) -> Self {
        Self {
            label: label.to_string(),
            journal: Arc::clone(journal),
        }
    }

    pub fn shared(
        label: &str,
        journal: &Journal,
    ) -> HandlerRef {
        Arc::new(Self::new(label, journal))
    }
}

impl Handler for RecordingHandler {
    fn publish(
        &self,
        record: &LogRecord,
    ) -> Result<(), HandlerError> {
        self.journal
            .lock()
            .push(format!("{}:{}", self.label, record.message));
        Ok(())
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Always returns an error from `publish`.
pub struct FailingHandler;

impl Handler for FailingHandler {
    fn publish(
        &self,
        _record: &LogRecord,
    ) -> Result<(), HandlerError> {
        Err(HandlerError::PublishFailure("disk full".to_string()))
    }
}

/// Always panics in `publish`.
pub struct PanickingHandler;

impl Handler for PanickingHandler {
    fn publish(
        &self,
        _record: &LogRecord,
    ) -> Result<(), HandlerError> {
        panic!("handler blew up");
    }
}

/// Accepts and discards everything.
pub struct NullHandler;

impl Handler for NullHandler {
    fn publish(
        &self,
        _record: &LogRecord,
    ) -> Result<(), HandlerError> {
        Ok(())
    }
}

pub fn null_handler() -> HandlerRef {
    Arc::new(NullHandler)
}

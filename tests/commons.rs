use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use logtree::Handler;
use logtree::HandlerError;
use logtree::LogRecord;
use parking_lot::Mutex;

/// Collects `"<logger>|<message>"` lines.
#[derive(Default)]
pub struct CollectingHandler {
    pub lines: Mutex<Vec<String>>,
}

impl Handler for CollectingHandler {
    fn publish(
        &self,
        record: &LogRecord,
    ) -> Result<(), HandlerError> {
        self.lines
            .lock()
            .push(format!("{}|{}", record.logger_name, record.message));
        Ok(())
    }
}

/// Counts records and nothing else.
#[derive(Default)]
pub struct CountingHandler {
    pub count: AtomicUsize,
}

impl CountingHandler {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Handler for CountingHandler {
    fn publish(
        &self,
        _record: &LogRecord,
    ) -> Result<(), HandlerError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn shared<H: Handler + Default>() -> Arc<H> {
    Arc::new(H::default())
}

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::AttachmentKey;
use crate::FilterRef;
use crate::HandlerRef;
use crate::HandlerSnapshot;
use crate::Level;
use crate::LogRecord;
use crate::LoggerNode;
use crate::Result;

/// Application-facing handle on a logger node.
///
/// Cheap to clone; all clones share the node.
#[derive(Clone)]
pub struct Logger {
    node: Arc<LoggerNode>,
}

impl Logger {
    pub(crate) fn new(node: Arc<LoggerNode>) -> Self {
        Self { node }
    }

    pub fn name(&self) -> &str {
        self.node.full_name()
    }

    pub fn node(&self) -> &Arc<LoggerNode> {
        &self.node
    }

    pub fn parent(&self) -> Option<Logger> {
        self.node.parent().map(|p| p.create_logger())
    }

    //---
    // Levels

    pub fn level(&self) -> Option<Level> {
        self.node.level()
    }

    pub fn set_level(
        &self,
        level: Option<Level>,
    ) {
        self.node.set_level(level);
    }

    pub fn effective_level(&self) -> Level {
        Level::from_value(self.node.effective_level())
    }

    pub fn is_loggable(
        &self,
        level: Level,
    ) -> bool {
        self.node.is_loggable_level(level.value())
    }

    //---
    // Filters

    pub fn filter(&self) -> Option<FilterRef> {
        self.node.filter()
    }

    pub fn set_filter(
        &self,
        filter: Option<FilterRef>,
    ) {
        self.node.set_filter(filter);
    }

    pub fn use_parent_filters(&self) -> bool {
        self.node.use_parent_filters()
    }

    pub fn set_use_parent_filters(
        &self,
        use_parent_filters: bool,
    ) {
        self.node.set_use_parent_filters(use_parent_filters);
    }

    //---
    // Handlers

    pub fn handlers(&self) -> HandlerSnapshot {
        self.node.handlers()
    }

    pub fn add_handler(
        &self,
        handler: HandlerRef,
    ) {
        self.node.add_handler(handler);
    }

    pub fn remove_handler(
        &self,
        handler: &HandlerRef,
    ) {
        self.node.remove_handler(handler);
    }

    pub fn set_handlers(
        &self,
        handlers: Vec<HandlerRef>,
    ) -> HandlerSnapshot {
        self.node.set_handlers(handlers)
    }

    pub fn clear_handlers(&self) -> HandlerSnapshot {
        self.node.clear_handlers()
    }

    pub fn use_parent_handlers(&self) -> bool {
        self.node.use_parent_handlers()
    }

    pub fn set_use_parent_handlers(
        &self,
        use_parent_handlers: bool,
    ) {
        self.node.set_use_parent_handlers(use_parent_handlers);
    }

    //---
    // Attachments

    pub fn attachment<V>(
        &self,
        key: &AttachmentKey<V>,
    ) -> Option<Arc<V>>
    where
        V: Any + Send + Sync,
    {
        self.node.attachment(key)
    }

    pub fn attach<V>(
        &self,
        key: &AttachmentKey<V>,
        value: V,
    ) -> Result<Option<Arc<V>>>
    where
        V: Any + Send + Sync,
    {
        self.node.attach(key, value)
    }

    pub fn attach_if_absent<V>(
        &self,
        key: &AttachmentKey<V>,
        value: V,
    ) -> Result<Option<Arc<V>>>
    where
        V: Any + Send + Sync,
    {
        self.node.attach_if_absent(key, value)
    }

    pub fn detach<V>(
        &self,
        key: &AttachmentKey<V>,
    ) -> Option<Arc<V>>
    where
        V: Any + Send + Sync,
    {
        self.node.detach(key)
    }

    //---
    // Logging

    /// Level check, then filters, then publish. Records without a logger name get this
    /// logger's name.
    ///
    /// Returns whether the record was handed to the publish chain.
    pub fn log(
        &self,
        mut record: LogRecord,
    ) -> bool {
        if !self.node.is_loggable_level(record.level.value()) {
            return false;
        }
        if record.logger_name.is_empty() {
            record.logger_name = self.node.full_name().to_string();
        }
        if !self.node.is_loggable(&record) {
            return false;
        }
        self.node.publish(&record);
        true
    }

    pub fn log_message(
        &self,
        level: Level,
        message: impl Into<String>,
    ) -> bool {
        if !self.is_loggable(level) {
            return false;
        }
        self.log(LogRecord::new(level, message))
    }
}

impl fmt::Debug for Logger {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Logger").field("name", &self.name()).finish()
    }
}

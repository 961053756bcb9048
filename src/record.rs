use std::time::SystemTime;

use crate::Level;

/// A single log event travelling through the filter and publish pipeline.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: Level,
    pub logger_name: String,
    pub message: String,
    pub timestamp: SystemTime,
    pub fields: Vec<(String, String)>,
}

impl LogRecord {
    pub fn new(
        level: Level,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            logger_name: String::new(),
            message: message.into(),
            timestamp: SystemTime::now(),
            fields: Vec::new(),
        }
    }

    pub fn with_logger_name(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.logger_name = name.into();
        self
    }

    pub fn with_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn field(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

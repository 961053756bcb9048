//! A concurrent logger hierarchy.
//!
//! Loggers live in a tree keyed by dotted names (`"com.example.db"`). Each node carries an
//! optional explicit level, an effective level inherited from its ancestors, an optional
//! filter, a handler list and a handful of attachment slots. Level checks and record dispatch
//! are lock-free; reconfiguration serializes on a single tree-wide lock.
//!
//! ```ignore
//! let context = LogContext::new();
//! let logger = context.logger("com.example.db");
//! logger.set_level(Some(Level::DEBUG));
//! logger.log_message(Level::DEBUG, "connected");
//! ```

mod config;
mod context;
mod errors;
mod handler;
mod level;
mod logger;
pub mod metrics;
mod node;
mod record;

pub use crate::config::*;
pub use context::*;
pub use errors::*;
pub use handler::*;
pub use level::*;
pub use logger::*;
pub use node::*;
pub use record::*;

#[cfg(test)]
mod level_test;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;

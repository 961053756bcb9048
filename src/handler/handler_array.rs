use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use tracing::trace;

use super::same_handler;
use super::HandlerRef;

pub type HandlerSnapshot = Arc<Vec<HandlerRef>>;

/// Supplies the initial handler list the first time a snapshot is needed.
pub type HandlerSource = Box<dyn Fn() -> Vec<HandlerRef> + Send + Sync>;

/// Lock-free handler list.
///
/// The list is published as an immutable snapshot. Every mutation reads the current snapshot,
/// builds a new one and installs it with compare-and-swap, retrying from a fresh read when
/// another writer got there first. Readers never block.
pub struct HandlerArray {
    current: ArcSwapOption<Vec<HandlerRef>>,
    /// Only serializes the lazy first fetch; mutations never take it.
    init_lock: Mutex<()>,
    source: HandlerSource,
}

impl HandlerArray {
    pub fn new(source: HandlerSource) -> Self {
        Self {
            current: ArcSwapOption::empty(),
            init_lock: Mutex::new(()),
            source,
        }
    }

    pub fn with_handlers(handlers: Vec<HandlerRef>) -> Self {
        let array = Self::new(Box::new(Vec::new));
        array.current.store(Some(Arc::new(handlers)));
        array
    }

    /// Current snapshot, fetching it from the source on first use.
    pub fn get(&self) -> HandlerSnapshot {
        match self.current.load_full() {
            Some(handlers) => handlers,
            None => self.init_slow(),
        }
    }

    #[cold]
    fn init_slow(&self) -> HandlerSnapshot {
        let _guard = self.init_lock.lock();
        if let Some(handlers) = self.current.load_full() {
            return handlers;
        }
        let fetched = Arc::new((self.source)());
        trace!(count = fetched.len(), "Fetched initial handlers");
        let uninit: Option<HandlerSnapshot> = None;
        let prev = self
            .current
            .compare_and_swap(&uninit, Some(Arc::clone(&fetched)));
        match &*prev {
            None => fetched,
            // A concurrent `set` won; its value is the snapshot now.
            Some(winner) => Arc::clone(winner),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.current.load().is_some()
    }

    /// Install `new` only if the current snapshot is still `expected`.
    pub fn compare_and_set(
        &self,
        expected: &HandlerSnapshot,
        new: Vec<HandlerRef>,
    ) -> bool {
        let prev = self.current.compare_and_swap(expected, Some(Arc::new(new)));
        matches!(&*prev, Some(p) if Arc::ptr_eq(p, expected))
    }

    pub fn add(
        &self,
        handler: HandlerRef,
    ) {
        loop {
            let current = self.get();
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.push(Arc::clone(&handler));
            if self.compare_and_set(&current, next) {
                return;
            }
        }
    }

    /// Remove the first entry identical to `handler`. Absent handlers are ignored.
    pub fn remove(
        &self,
        handler: &HandlerRef,
    ) {
        loop {
            let current = self.get();
            let Some(index) = current.iter().position(|h| same_handler(h, handler)) else {
                return;
            };
            let mut next = Vec::with_capacity(current.len() - 1);
            next.extend(current[..index].iter().cloned());
            next.extend(current[index + 1..].iter().cloned());
            if self.compare_and_set(&current, next) {
                return;
            }
        }
    }

    /// Replace the list unconditionally, returning the previous snapshot.
    pub fn set(
        &self,
        handlers: Vec<HandlerRef>,
    ) -> HandlerSnapshot {
        self.current
            .swap(Some(Arc::new(handlers)))
            .unwrap_or_default()
    }

    pub fn clear(&self) -> HandlerSnapshot {
        self.set(Vec::new())
    }
}

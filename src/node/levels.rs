//! Level propagation.
//!
//! Invariant, for every node N:
//! `N.effective = max(N.min, N.level if set else N.parent.effective)`.
//! Explicit level changes run under the tree lock and push the new effective level down to
//! every inheriting descendant, stopping at descendants with an explicit level.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use tracing::debug;

use super::LoggerNode;
use super::DEFAULT_ROOT_LEVEL;
use crate::metrics::LEVEL_CHANGES;
use crate::Level;

impl LoggerNode {
    /// Set or clear the explicit level.
    ///
    /// Clearing the root resets it to [`DEFAULT_ROOT_LEVEL`]; clearing any other node makes it
    /// inherit its parent's effective level.
    pub fn set_level(
        &self,
        new_level: Option<Level>,
    ) {
        let _tree = self.tree.tree_lock.lock();
        let old_effective = self.effective_level.load(Ordering::Acquire);
        let computed = match new_level {
            Some(level) => {
                self.level.store(Some(Arc::new(level)));
                level.value()
            }
            None => match self.parent() {
                None => {
                    self.level.store(Some(Arc::new(DEFAULT_ROOT_LEVEL)));
                    DEFAULT_ROOT_LEVEL.value()
                }
                Some(parent) => {
                    self.level.store(None);
                    parent.effective_level()
                }
            },
        };
        let new_effective = self.effective_min_level.max(computed);
        self.effective_level.store(new_effective, Ordering::Release);

        if old_effective != new_effective {
            LEVEL_CHANGES.inc();
            debug!(
                logger = %self.full_name(),
                old_effective,
                new_effective,
                "Effective level changed, propagating to inheriting descendants"
            );
            self.for_each_child(|child| child.inherit_effective_level(new_effective));
        }
    }

    /// Adopt `parent_effective` if this node inherits, then recurse. Tree lock must be held.
    fn inherit_effective_level(
        &self,
        parent_effective: i32,
    ) {
        if self.level.load().is_some() {
            return;
        }
        let effective = self.effective_min_level.max(parent_effective);
        self.effective_level.store(effective, Ordering::Release);
        self.for_each_child(|child| child.inherit_effective_level(effective));
    }

    /// Re-read the parent's effective level after insertion, so a propagation that ran
    /// between this node's construction and its insertion is not lost.
    pub(super) fn resync_inherited_level(&self) {
        if let Some(parent) = self.parent() {
            let _tree = self.tree.tree_lock.lock();
            self.inherit_effective_level(parent.effective_level());
        }
    }

    /// The explicit level, if any.
    pub fn level(&self) -> Option<Level> {
        match &*self.level.load() {
            Some(level) => Some(**level),
            None => None,
        }
    }

    #[inline]
    pub fn effective_level(&self) -> i32 {
        self.effective_level.load(Ordering::Acquire)
    }

    pub fn effective_min_level(&self) -> i32 {
        self.effective_min_level
    }

    /// Lock-free hot-path check.
    #[inline]
    pub fn is_loggable_level(
        &self,
        level: i32,
    ) -> bool {
        level != Level::OFF.value()
            && level >= self.effective_min_level
            && level >= self.effective_level.load(Ordering::Acquire)
    }
}

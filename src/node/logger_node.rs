use std::any::Any;
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicI32;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Weak;

use arc_swap::ArcSwapOption;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::trace;

use super::AttachmentKey;
use super::AttachmentStore;
use super::TreeContext;
use super::DEFAULT_ROOT_LEVEL;
use crate::metrics::NODES_CREATED;
use crate::FilterRef;
use crate::HandlerArray;
use crate::HandlerRef;
use crate::HandlerSnapshot;
use crate::Level;
use crate::Logger;
use crate::Result;

/// A node in the tree of logger names.
///
/// Children are owned by their parent; the parent link is a non-owning back-reference that
/// stays valid for as long as the owning context keeps the tree alive.
pub struct LoggerNode {
    pub(crate) tree: Arc<TreeContext>,
    parent: Option<Weak<LoggerNode>>,
    full_name: String,
    children: DashMap<String, Arc<LoggerNode>>,

    pub(crate) handlers: HandlerArray,
    use_parent_handlers: AtomicBool,

    filter: ArcSwapOption<FilterRef>,
    use_parent_filter: AtomicBool,

    /// Explicit level. Written only under the tree lock, and every write is followed by
    /// propagation of the effective level to inheriting descendants.
    pub(super) level: ArcSwapOption<Level>,
    /// Written only under the tree lock.
    pub(super) effective_level: AtomicI32,
    pub(super) effective_min_level: i32,

    has_logger: AtomicBool,
    attachments: AttachmentStore,
}

impl LoggerNode {
    pub(crate) fn new_root(tree: Arc<TreeContext>) -> Arc<Self> {
        let configurator = Arc::clone(&tree.configurator);
        let full_name = String::new();
        let effective_min_level = configurator
            .minimum_level_of(&full_name)
            .unwrap_or(Level::INFO)
            .value();
        let level = configurator
            .level_of(&full_name)
            .unwrap_or(DEFAULT_ROOT_LEVEL);
        let effective_level = effective_min_level.max(level.value());

        Arc::new(Self::assemble(
            tree,
            None,
            full_name,
            Some(level),
            effective_level,
            effective_min_level,
        ))
    }

    fn new_child(
        parent: &Arc<LoggerNode>,
        segment: &str,
    ) -> Self {
        let full_name = if parent.is_root() {
            if segment.is_empty() {
                ".".to_string()
            } else {
                segment.to_string()
            }
        } else {
            format!("{}.{}", parent.full_name, segment)
        };

        let configurator = Arc::clone(&parent.tree.configurator);
        let effective_min_level = configurator
            .minimum_level_of(&full_name)
            .map(|l| l.value())
            .unwrap_or(parent.effective_min_level);
        let level = configurator.level_of(&full_name);
        let inherited = level.map_or_else(|| parent.effective_level(), |l| l.value());

        Self::assemble(
            Arc::clone(&parent.tree),
            Some(Arc::downgrade(parent)),
            full_name,
            level,
            effective_min_level.max(inherited),
            effective_min_level,
        )
    }

    fn assemble(
        tree: Arc<TreeContext>,
        parent: Option<Weak<LoggerNode>>,
        full_name: String,
        level: Option<Level>,
        effective_level: i32,
        effective_min_level: i32,
    ) -> Self {
        let configurator = Arc::clone(&tree.configurator);
        let source_name = full_name.clone();
        Self {
            tree,
            parent,
            full_name,
            children: DashMap::new(),
            handlers: HandlerArray::new(Box::new(move || configurator.handlers_of(&source_name))),
            use_parent_handlers: AtomicBool::new(true),
            filter: ArcSwapOption::empty(),
            use_parent_filter: AtomicBool::new(false),
            level: ArcSwapOption::new(level.map(Arc::new)),
            effective_level: AtomicI32::new(effective_level),
            effective_min_level,
            has_logger: AtomicBool::new(false),
            attachments: AttachmentStore::new(),
        }
    }

    //---
    // Registry

    /// Resolve `name` relative to this node, creating every missing segment.
    ///
    /// Concurrent callers racing on the same name all end up with the same node: a losing
    /// candidate is dropped and the winner is used for the rest of the path.
    pub fn get_or_create(
        self: &Arc<Self>,
        name: &str,
    ) -> Arc<LoggerNode> {
        let mut node = Arc::clone(self);
        let mut rest = name;
        while !rest.is_empty() {
            let (segment, tail) = split_first_segment(rest);
            let existing = node.children.get(segment).map(|c| Arc::clone(c.value()));
            node = match existing {
                Some(child) => child,
                None => node.create_child(segment),
            };
            rest = tail;
        }
        node
    }

    /// Resolve `name` relative to this node without creating anything.
    pub fn get_if_exists(
        self: &Arc<Self>,
        name: &str,
    ) -> Option<Arc<LoggerNode>> {
        let mut node = Arc::clone(self);
        let mut rest = name;
        while !rest.is_empty() {
            let (segment, tail) = split_first_segment(rest);
            let child = node.children.get(segment).map(|c| Arc::clone(c.value()))?;
            node = child;
            rest = tail;
        }
        Some(node)
    }

    fn create_child(
        self: &Arc<Self>,
        segment: &str,
    ) -> Arc<LoggerNode> {
        let candidate = Arc::new(LoggerNode::new_child(self, segment));
        match self.children.entry(segment.to_string()) {
            Entry::Occupied(winner) => {
                trace!(name = %candidate.full_name, "Lost node creation race, using existing node");
                Arc::clone(winner.get())
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&candidate));
                NODES_CREATED.inc();
                trace!(name = %candidate.full_name, "Created logger node");
                candidate.resync_inherited_level();
                candidate
            }
        }
    }

    /// Snapshot of the direct children.
    pub fn children(&self) -> Vec<Arc<LoggerNode>> {
        self.children.iter().map(|c| Arc::clone(c.value())).collect()
    }

    pub(super) fn child_names(&self) -> Vec<String> {
        self.children.iter().map(|c| c.key().clone()).collect()
    }

    pub(super) fn child(
        &self,
        segment: &str,
    ) -> Option<Arc<LoggerNode>> {
        self.children.get(segment).map(|c| Arc::clone(c.value()))
    }

    pub(super) fn for_each_child(
        &self,
        f: impl Fn(&LoggerNode),
    ) {
        for child in self.children.iter() {
            f(child.value());
        }
    }

    /// Drop descendant subtrees that carry no state of their own and are referenced by
    /// nothing but the tree. A pruned name is recreated from configuration on next use,
    /// indistinguishable from the removed node.
    ///
    /// Returns the number of nodes removed.
    pub(crate) fn prune(&self) -> usize {
        let _tree = self.tree.tree_lock.lock();
        self.prune_children()
    }

    fn prune_children(&self) -> usize {
        let mut removed = 0;
        for segment in self.child_names() {
            if let Some(child) = self.child(&segment) {
                removed += child.prune_children();
            }
            // The candidate's only owner must be this map, so the local clone is gone here.
            let pruned = self
                .children
                .remove_if(&segment, |_, child| {
                    Arc::strong_count(child) == 1 && child.children.is_empty() && child.is_pristine()
                })
                .is_some();
            if pruned {
                trace!(parent = %self.full_name, segment = %segment, "Pruned logger node");
                removed += 1;
            }
        }
        removed
    }

    /// True when recreating the node from configuration would yield an identical node.
    fn is_pristine(&self) -> bool {
        if self.has_logger()
            || self.level.load().is_some()
            || self.filter.load().is_some()
            || self.use_parent_filters()
            || !self.use_parent_handlers()
            || !self.attachments.is_empty()
        {
            return false;
        }
        !self.handlers.is_initialized()
            || (self.handlers.get().is_empty()
                && self.tree.configurator.handlers_of(&self.full_name).is_empty())
    }

    //---
    // Identity and flags

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn parent(&self) -> Option<Arc<LoggerNode>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Create a logger facade for this node and remember that one exists.
    pub fn create_logger(self: &Arc<Self>) -> Logger {
        self.has_logger.store(true, Ordering::Release);
        Logger::new(Arc::clone(self))
    }

    pub fn has_logger(&self) -> bool {
        self.has_logger.load(Ordering::Acquire)
    }

    //---
    // Filter state

    pub fn filter(&self) -> Option<FilterRef> {
        self.filter.load_full().map(|f| Arc::clone(&*f))
    }

    pub fn set_filter(
        &self,
        filter: Option<FilterRef>,
    ) {
        self.filter.store(filter.map(Arc::new));
    }

    pub fn use_parent_filters(&self) -> bool {
        self.use_parent_filter.load(Ordering::Acquire)
    }

    pub fn set_use_parent_filters(
        &self,
        use_parent_filter: bool,
    ) {
        self.use_parent_filter.store(use_parent_filter, Ordering::Release);
    }

    //---
    // Handlers

    pub fn handlers(&self) -> HandlerSnapshot {
        self.handlers.get()
    }

    pub fn add_handler(
        &self,
        handler: HandlerRef,
    ) {
        self.handlers.add(handler);
    }

    pub fn remove_handler(
        &self,
        handler: &HandlerRef,
    ) {
        self.handlers.remove(handler);
    }

    pub fn set_handlers(
        &self,
        handlers: Vec<HandlerRef>,
    ) -> HandlerSnapshot {
        self.handlers.set(handlers)
    }

    pub fn clear_handlers(&self) -> HandlerSnapshot {
        self.handlers.clear()
    }

    pub fn compare_and_set_handlers(
        &self,
        expected: &HandlerSnapshot,
        new: Vec<HandlerRef>,
    ) -> bool {
        self.handlers.compare_and_set(expected, new)
    }

    pub fn use_parent_handlers(&self) -> bool {
        self.use_parent_handlers.load(Ordering::Acquire)
    }

    pub fn set_use_parent_handlers(
        &self,
        use_parent_handlers: bool,
    ) {
        self.use_parent_handlers
            .store(use_parent_handlers, Ordering::Release);
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
        self.attachments.get(key)
    }

    pub fn attach<V>(
        &self,
        key: &AttachmentKey<V>,
        value: V,
    ) -> Result<Option<Arc<V>>>
    where
        V: Any + Send + Sync,
    {
        self.attachments.attach(key, value)
    }

    pub fn attach_if_absent<V>(
        &self,
        key: &AttachmentKey<V>,
        value: V,
    ) -> Result<Option<Arc<V>>>
    where
        V: Any + Send + Sync,
    {
        self.attachments.attach_if_absent(key, value)
    }

    pub fn detach<V>(
        &self,
        key: &AttachmentKey<V>,
    ) -> Option<Arc<V>>
    where
        V: Any + Send + Sync,
    {
        self.attachments.detach(key)
    }
}

impl fmt::Debug for LoggerNode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("LoggerNode")
            .field("full_name", &self.full_name)
            .field("level", &self.level())
            .field("effective_level", &self.effective_level())
            .field("effective_min_level", &self.effective_min_level)
            .finish()
    }
}

/// Split at the first dot. A trailing dot leaves an empty remainder, which ends the walk.
fn split_first_segment(name: &str) -> (&str, &str) {
    match name.find('.') {
        Some(i) => (&name[..i], &name[i + 1..]),
        None => (name, ""),
    }
}

//! Per-node attachment slots.
//!
//! Attachments let outer layers hang arbitrary values off a logger node without widening the
//! node itself. The store is a fixed array scanned linearly; it never grows, and a full store
//! rejects new keys with [`Error::CapacityExceeded`].

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::spin_lock::SpinLock;
use crate::Error;
use crate::Result;

/// Number of attachment slots carried by every logger node.
pub const NODE_ATTACHMENT_CAPACITY: usize = 3;

static NEXT_KEY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity token for an attachment slot.
///
/// Two keys are the same key only if they are the same instance: the type is not `Clone`, and
/// every `new()` call yields a distinct identity even for equal value types.
pub struct AttachmentKey<V> {
    id: u64,
    _marker: PhantomData<fn() -> V>,
}

impl<V> AttachmentKey<V> {
    pub fn new() -> Self {
        Self {
            id: NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed),
            _marker: PhantomData,
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}

impl<V> Default for AttachmentKey<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for AttachmentKey<V> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("AttachmentKey").field("id", &self.id).finish()
    }
}

type AttachedValue = Arc<dyn Any + Send + Sync>;
type Slot = Option<(u64, AttachedValue)>;

/// Fixed-capacity keyed store guarded by a spin lock.
pub struct AttachmentStore<const N: usize = NODE_ATTACHMENT_CAPACITY> {
    slots: SpinLock<[Slot; N]>,
}

impl<const N: usize> AttachmentStore<N> {
    pub fn new() -> Self {
        Self {
            slots: SpinLock::new(std::array::from_fn(|_| None)),
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Attach `value` under `key`, replacing any previous value for the same key.
    pub fn attach<V>(
        &self,
        key: &AttachmentKey<V>,
        value: V,
    ) -> Result<Option<Arc<V>>>
    where
        V: Any + Send + Sync,
    {
        let value: AttachedValue = Arc::new(value);
        let mut slots = self.slots.lock();
        let index = Self::slot_for(&slots, key.id())?;
        let previous = slots[index].replace((key.id(), value));
        Ok(previous.and_then(|(_, v)| downcast(v)))
    }

    /// Attach `value` under `key` only if the key is not yet present.
    ///
    /// Returns the existing value, untouched, when the key is already attached.
    pub fn attach_if_absent<V>(
        &self,
        key: &AttachmentKey<V>,
        value: V,
    ) -> Result<Option<Arc<V>>>
    where
        V: Any + Send + Sync,
    {
        let mut slots = self.slots.lock();
        let index = Self::slot_for(&slots, key.id())?;
        if let Some((_, existing)) = &slots[index] {
            return Ok(downcast(Arc::clone(existing)));
        }
        slots[index] = Some((key.id(), Arc::new(value)));
        Ok(None)
    }

    pub fn detach<V>(
        &self,
        key: &AttachmentKey<V>,
    ) -> Option<Arc<V>>
    where
        V: Any + Send + Sync,
    {
        let mut slots = self.slots.lock();
        slots
            .iter_mut()
            .find(|slot| matches!(slot, Some((id, _)) if *id == key.id()))
            .and_then(Option::take)
            .and_then(|(_, v)| downcast(v))
    }

    pub fn get<V>(
        &self,
        key: &AttachmentKey<V>,
    ) -> Option<Arc<V>>
    where
        V: Any + Send + Sync,
    {
        let slots = self.slots.lock();
        slots
            .iter()
            .flatten()
            .find(|(id, _)| *id == key.id())
            .and_then(|(_, v)| downcast(Arc::clone(v)))
    }

    pub fn len(&self) -> usize {
        self.slots.lock().iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the slot holding `id`, or else the first free slot.
    fn slot_for(
        slots: &[Slot; N],
        id: u64,
    ) -> Result<usize> {
        slots
            .iter()
            .position(|slot| matches!(slot, Some((k, _)) if *k == id))
            .or_else(|| slots.iter().position(Option::is_none))
            .ok_or(Error::CapacityExceeded { capacity: N })
    }
}

impl<const N: usize> Default for AttachmentStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

fn downcast<V>(value: AttachedValue) -> Option<Arc<V>>
where
    V: Any + Send + Sync,
{
    value.downcast::<V>().ok()
}

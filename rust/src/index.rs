//! Dense slot numbering for phase ids.
//!
//! Algorithms index `Vec`s by slot instead of hashing phase ids. Slots are
//! handed out in insertion order, so a lower slot means "seen first".

use rustc_hash::FxHashMap;

use crate::models::PhaseId;

/// Arena slot of a phase (u32 for compact adjacency lists).
pub type Slot = u32;

/// Bidirectional phase id <-> slot mapping.
#[derive(Debug, Clone)]
pub struct PhaseIndex {
    to_slot: FxHashMap<PhaseId, Slot>,
    from_slot: Vec<PhaseId>,
}

impl PhaseIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_slot: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_slot: Vec::with_capacity(capacity),
        }
    }

    /// Register a phase id. Returns `None` if the id is already present.
    pub fn insert(&mut self, id: PhaseId) -> Option<Slot> {
        if self.to_slot.contains_key(&id) {
            return None;
        }
        let slot = self.from_slot.len() as Slot;
        self.from_slot.push(id);
        self.to_slot.insert(id, slot);
        Some(slot)
    }

    #[inline]
    pub fn slot(&self, id: PhaseId) -> Option<Slot> {
        self.to_slot.get(&id).copied()
    }

    #[inline]
    pub fn id(&self, slot: Slot) -> PhaseId {
        self.from_slot[slot as usize]
    }

    pub fn ids(&self) -> &[PhaseId] {
        &self.from_slot
    }

    pub fn len(&self) -> usize {
        self.from_slot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_slot.is_empty()
    }
}

impl Default for PhaseIndex {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

use std::fmt::Debug;
use crate::error::{Error, Result};

/// Fixed-capacity slot table.
///
/// Maps a bounded number of hardware binding slots (texture units) to the
/// key currently occupying each of them. Allocation is a linear scan that
/// always picks the lowest free index, so the same sequence of acquire and
/// release calls yields the same slot assignment on every run.
///
/// A key occupies at most one slot. There is no eviction: a full table is
/// an error.
///
/// # Example
///
/// ```ignore
/// let mut slots = SlotTable::new(2);
/// let a = slots.acquire(10)?;  // 0
/// let b = slots.acquire(11)?;  // 1
/// slots.acquire(12);           // Err(NoFreeSlots)
/// slots.release(10)?;          // slot 0 is free again
/// let c = slots.acquire(12)?;  // 0
/// ```
#[derive(Debug, Clone)]
pub struct SlotTable<K> {
    slots: Vec<Option<K>>,
}

impl<K: Copy + Eq + Debug> SlotTable<K> {
    /// Create an empty table with `capacity` slots
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Number of slots (occupied or not)
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Slot currently holding `key`
    pub fn slot_of(&self, key: K) -> Option<u32> {
        self.slots
            .iter()
            .position(|slot| *slot == Some(key))
            .map(|index| index as u32)
    }

    /// Key currently held by `slot`
    pub fn occupant(&self, slot: u32) -> Option<K> {
        self.slots.get(slot as usize).copied().flatten()
    }

    /// Occupied slots as (slot, key), lowest slot first
    pub fn occupied(&self) -> impl Iterator<Item = (u32, K)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|key| (index as u32, key)))
    }

    /// Put `key` in the lowest free slot and return that slot
    ///
    /// # Errors
    ///
    /// - `AlreadyBound` if `key` already occupies a slot
    /// - `NoFreeSlots` if every slot is occupied
    pub fn acquire(&mut self, key: K) -> Result<u32> {
        if let Some(slot) = self.slot_of(key) {
            return Err(Error::AlreadyBound(format!(
                "{:?} already occupies slot {}", key, slot)));
        }
        let index = self.slots
            .iter()
            .position(Option::is_none)
            .ok_or_else(|| Error::NoFreeSlots(format!(
                "{:?}: all {} slots occupied", key, self.slots.len())))?;
        self.slots[index] = Some(key);
        Ok(index as u32)
    }

    /// Free the slot held by `key` and return it
    ///
    /// # Errors
    ///
    /// Returns `NotBound` if `key` does not occupy any slot.
    pub fn release(&mut self, key: K) -> Result<u32> {
        let slot = self.slot_of(key)
            .ok_or_else(|| Error::NotBound(format!("{:?} is not in any slot", key)))?;
        self.slots[slot as usize] = None;
        Ok(slot)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "slot_allocator_tests.rs"]
mod tests;

//! Indexed max-heap over per-item scalar keys
//!
//! Items are the integers `0..len`. The heap owns one key per item, keeps the
//! items in a binary-heap permutation, and tracks where each item currently
//! sits so a key can be lowered in place. Popping shrinks the active region
//! from the back of the storage, so after `k` pops storage slots
//! `len - k..len` hold the removed items, most recently removed first.

use crate::math::scalar::Scalar;

/// Max-heap keyed by item weight with a reverse position map
#[derive(Debug, Clone)]
pub struct IndexedMaxHeap<F> {
    /// Key of every item, indexed by item id
    keys: Vec<F>,
    /// Item ids in heap order; the first `active` entries form the heap
    heap: Vec<usize>,
    /// Storage slot of every item, indexed by item id
    position: Vec<usize>,
    /// Size of the active region
    active: usize,
}

impl<F: Scalar> IndexedMaxHeap<F> {
    /// Heapify `keys` in linear time; item `i` has key `keys[i]`
    pub fn build(keys: Vec<F>) -> Self {
        let len = keys.len();
        let mut heap = Self {
            keys,
            heap: (0..len).collect(),
            position: (0..len).collect(),
            active: len,
        };
        for slot in (0..len / 2).rev() {
            heap.sift_down(slot);
        }
        heap
    }

    /// Item with the largest key, if any item is still active
    pub fn top(&self) -> Option<usize> {
        if self.active == 0 {
            None
        } else {
            self.heap.first().copied()
        }
    }

    /// Remove the item with the largest key from the active region
    ///
    /// The removed item stays in storage just past the new active region.
    pub fn pop(&mut self) -> Option<usize> {
        let top = self.top()?;
        self.active -= 1;
        self.swap_slots(0, self.active);
        self.sift_down(0);
        Some(top)
    }

    /// Restore heap order after the key of `id` decreased
    ///
    /// Items outside the active region are left untouched.
    pub fn move_item_down(&mut self, id: usize) {
        if let Some(slot) = self.active_slot(id) {
            self.sift_down(slot);
        }
    }

    /// Subtract `amount` from the key of an active item and re-sift it
    ///
    /// `amount` must not be negative. Returns `false` and leaves the key
    /// alone when `id` is not active.
    pub fn decrease_key(&mut self, id: usize, amount: F) -> bool {
        if self.active_slot(id).is_none() {
            return false;
        }
        if let Some(key) = self.keys.get_mut(id) {
            *key = *key - amount;
        }
        self.move_item_down(id);
        true
    }

    /// Item stored in `slot` of the underlying storage
    ///
    /// Valid for every slot, not only the active region: after popping,
    /// slots `0..len()` hold the remaining items in storage order.
    pub fn id_at(&self, slot: usize) -> Option<usize> {
        self.heap.get(slot).copied()
    }

    /// Current key of an item
    pub fn key(&self, id: usize) -> Option<F> {
        self.keys.get(id).copied()
    }

    /// Keys of all items, indexed by item id
    pub fn keys(&self) -> &[F] {
        &self.keys
    }

    /// Items of the whole storage in slot order
    pub fn storage_order(&self) -> &[usize] {
        &self.heap
    }

    /// Whether `id` has not been popped yet
    pub fn is_active(&self, id: usize) -> bool {
        self.active_slot(id).is_some()
    }

    /// Number of active items
    pub const fn len(&self) -> usize {
        self.active
    }

    /// Whether every item has been popped
    pub const fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Total number of items, popped ones included
    pub fn capacity(&self) -> usize {
        self.heap.len()
    }

    fn active_slot(&self, id: usize) -> Option<usize> {
        self.position
            .get(id)
            .copied()
            .filter(|&slot| slot < self.active)
    }

    fn key_at(&self, slot: usize) -> F {
        self.heap
            .get(slot)
            .and_then(|&id| self.keys.get(id))
            .copied()
            .unwrap_or_else(F::neg_infinity)
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        if let Some(&id) = self.heap.get(a)
            && let Some(pos) = self.position.get_mut(id)
        {
            *pos = a;
        }
        if let Some(&id) = self.heap.get(b)
            && let Some(pos) = self.position.get_mut(id)
        {
            *pos = b;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            if left >= self.active {
                return;
            }
            let right = left + 1;
            let mut largest = slot;
            if self.key_at(left) > self.key_at(largest) {
                largest = left;
            }
            if right < self.active && self.key_at(right) > self.key_at(largest) {
                largest = right;
            }
            if largest == slot {
                return;
            }
            self.swap_slots(slot, largest);
            slot = largest;
        }
    }
}

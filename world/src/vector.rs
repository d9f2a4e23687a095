//! Sparse, growable storage underlying the concrete object indexers.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use starlance_core::signal::Signal;
use starlance_core::Index;

/// Maps a 1-based index to a zero-based slot position.
pub(crate) fn slot_of(index: Index) -> Option<usize> {
    let value = index.get();
    if value >= 1 {
        Some(value as usize - 1)
    } else {
        None
    }
}

/// Dense-by-slot, possibly sparse-by-content vector of shared entities.
///
/// Slot `k` holds the object at index `k + 1`; empty slots are legal and
/// skipped by the next/previous walk. Every mutation raises the
/// structure-changed signal so indexers layered on top can re-raise their
/// own set-changed events.
pub struct ObjectVector<T> {
    slots: RefCell<Vec<Option<Rc<T>>>>,
    structure_changed: Signal<Index>,
}

impl<T> ObjectVector<T> {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            structure_changed: Signal::new(),
        }
    }

    /// Highest allocated index, or zero when nothing was ever stored.
    #[must_use]
    pub fn size(&self) -> i32 {
        self.slots.borrow().len() as i32
    }

    /// Retrieves the object stored at the provided index, if any.
    #[must_use]
    pub fn get(&self, index: Index) -> Option<Rc<T>> {
        let slot = slot_of(index)?;
        self.slots.borrow().get(slot).and_then(Clone::clone)
    }

    /// Stores or clears the slot at the provided index, growing as needed.
    ///
    /// Out-of-range sentinel indices are ignored. Raises structure-changed
    /// with hint zero; callers with a better rehoming hint go through their
    /// indexer's explicit entry point instead.
    pub fn set(&self, index: Index, value: Option<Rc<T>>) {
        let Some(slot) = slot_of(index) else {
            return;
        };
        {
            let mut slots = self.slots.borrow_mut();
            if slots.len() <= slot {
                slots.resize_with(slot + 1, || None);
            }
            slots[slot] = value;
        }
        self.structure_changed.raise(&Index::NONE);
    }

    /// Drops every slot and raises structure-changed once.
    pub fn clear(&self) {
        self.slots.borrow_mut().clear();
        self.structure_changed.raise(&Index::NONE);
    }

    /// Next candidate index after `index`, skipping empty slots.
    #[must_use]
    pub fn next_index(&self, index: Index) -> Index {
        let slots = self.slots.borrow();
        let start = index.get().max(0) as usize;
        for slot in start..slots.len() {
            if slots[slot].is_some() {
                return Index::new(slot as i32 + 1);
            }
        }
        Index::NONE
    }

    /// Previous candidate index before `index`, skipping empty slots.
    ///
    /// The sentinel (and any out-of-range index) means "after last", so the
    /// walk starts from the top of the vector.
    #[must_use]
    pub fn previous_index(&self, index: Index) -> Index {
        let slots = self.slots.borrow();
        let value = index.get();
        let upper = if value < 1 || value as usize > slots.len() {
            slots.len()
        } else {
            value as usize - 1
        };
        for slot in (0..upper).rev() {
            if slots[slot].is_some() {
                return Index::new(slot as i32 + 1);
            }
        }
        Index::NONE
    }

    /// Signal raised after every structural mutation of the vector.
    #[must_use]
    pub fn structure_changed(&self) -> &Signal<Index> {
        &self.structure_changed
    }
}

impl<T> Default for ObjectVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ObjectVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectVector")
            .field("size", &self.size())
            .finish()
    }
}

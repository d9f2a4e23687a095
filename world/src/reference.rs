//! Durable, revalidating handles into object collections.
//!
//! An [`ObjectReference`] names "the object at this index of that
//! collection" without keeping either alive; resolution re-checks both on
//! every access, so a reference held across a restructuring simply stops
//! resolving instead of yielding a stale object. An [`ObjectList`] is an
//! ordered collection of such references that is itself an [`ObjectType`],
//! so everything built for live collections (cursors, filters, counting)
//! works on hand-assembled lists too.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use starlance_core::object::MapObject;
use starlance_core::signal::Signal;
use starlance_core::{Id, Index};

use crate::object_type::ObjectType;
use crate::{EntityKind, Universe};

/// Weak handle to one slot of an object collection.
#[derive(Clone)]
pub struct ObjectReference {
    object_type: Option<Weak<dyn ObjectType>>,
    index: Index,
}

impl ObjectReference {
    /// Creates a reference to the given index of the given collection.
    #[must_use]
    pub fn new(object_type: Rc<dyn ObjectType>, index: Index) -> Self {
        Self {
            object_type: Some(Rc::downgrade(&object_type)),
            index,
        }
    }

    /// Creates a reference that never resolves.
    #[must_use]
    pub fn invalid() -> Self {
        Self {
            object_type: None,
            index: Index::NONE,
        }
    }

    /// Index this reference points at within its collection.
    #[must_use]
    pub fn index(&self) -> Index {
        self.index
    }

    /// Collection this reference points into, while it is still alive.
    #[must_use]
    pub fn object_type(&self) -> Option<Rc<dyn ObjectType>> {
        self.object_type.as_ref()?.upgrade()
    }

    /// Resolves the reference to the object currently at its slot.
    ///
    /// Yields nothing when the collection is gone, the index is the
    /// sentinel, or the slot no longer holds an object.
    #[must_use]
    pub fn get(&self) -> Option<Rc<dyn MapObject>> {
        self.object_type()?.object_by_index(self.index)
    }

    /// Reports whether the reference currently resolves to an object.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.get().is_some()
    }

    /// Universe of the referenced collection, when both still exist.
    #[must_use]
    pub fn universe(&self) -> Option<Rc<Universe>> {
        self.object_type()?.universe()
    }
}

impl Default for ObjectReference {
    fn default() -> Self {
        Self::invalid()
    }
}

impl PartialEq for ObjectReference {
    fn eq(&self, other: &Self) -> bool {
        if self.index != other.index {
            return false;
        }
        match (&self.object_type, &other.object_type) {
            (Some(a), Some(b)) => Weak::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for ObjectReference {}

impl fmt::Debug for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectReference")
            .field("index", &self.index)
            .field("valid", &self.is_valid())
            .finish()
    }
}

/// Ordered, hand-assembled collection of object references.
///
/// Positions are dense and 1-based: entry `k` of the backing storage is
/// index `k + 1`. A reference that has stopped resolving keeps its position
/// but yields no object, so positional navigation stays stable while
/// individual entries go stale.
///
/// A list built with [`ObjectList::with_source`] keeps its source
/// collection alive for as long as the list exists, so references into a
/// temporary view keep resolving after the caller drops the view handle.
pub struct ObjectList {
    entries: RefCell<Vec<ObjectReference>>,
    source: Option<Rc<dyn ObjectType>>,
    set_changed: Signal<Index>,
}

impl ObjectList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            source: None,
            set_changed: Signal::new(),
        }
    }

    /// Creates an empty list pinning the given source collection.
    #[must_use]
    pub fn with_source(source: Rc<dyn ObjectType>) -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            source: Some(source),
            set_changed: Signal::new(),
        }
    }

    /// Number of entries, resolving or not.
    #[must_use]
    pub fn len(&self) -> i32 {
        self.entries.borrow().len() as i32
    }

    /// Appends a reference and raises set-changed with the sentinel hint.
    pub fn add(&self, reference: ObjectReference) {
        self.entries.borrow_mut().push(reference);
        self.set_changed.raise(&Index::NONE);
    }

    /// Appends a reference to the given index of the given collection.
    pub fn add_index(&self, object_type: Rc<dyn ObjectType>, index: Index) {
        self.add(ObjectReference::new(object_type, index));
    }

    /// Appends one reference per identity found in the universe's indexer
    /// for the given entity kind; identities not currently present are
    /// skipped.
    pub fn add_object_ids(&self, universe: &Rc<Universe>, kind: EntityKind, ids: &[Id]) {
        let object_type = universe.object_type_for(kind);
        for &id in ids {
            let index = object_type.find_index_for_id(id);
            if !index.is_none() {
                self.add_index(Rc::clone(&object_type), index);
            }
        }
    }

    /// Drops every entry and raises set-changed once.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.set_changed.raise(&Index::NONE);
    }

    /// List index of the first entry equal to the given reference, or the
    /// sentinel.
    #[must_use]
    pub fn index_of_reference(&self, reference: &ObjectReference) -> Index {
        let entries = self.entries.borrow();
        for (slot, entry) in entries.iter().enumerate() {
            if entry == reference {
                return Index::new(slot as i32 + 1);
            }
        }
        Index::NONE
    }

    /// List index of the first entry currently resolving to the given
    /// object, or the sentinel.
    #[must_use]
    pub fn index_of_object(&self, object: &Rc<dyn MapObject>) -> Index {
        let entries = self.entries.borrow();
        for (slot, entry) in entries.iter().enumerate() {
            if let Some(resolved) = entry.get() {
                if Rc::ptr_eq(&resolved, object) {
                    return Index::new(slot as i32 + 1);
                }
            }
        }
        Index::NONE
    }
}

impl ObjectType for ObjectList {
    fn object_by_index(&self, index: Index) -> Option<Rc<dyn MapObject>> {
        let slot = crate::vector::slot_of(index)?;
        let reference = self.entries.borrow().get(slot)?.clone();
        reference.get()
    }

    fn next_index(&self, index: Index) -> Index {
        let count = self.len();
        let value = index.get().max(0);
        if value < count {
            Index::new(value + 1)
        } else {
            Index::NONE
        }
    }

    fn previous_index(&self, index: Index) -> Index {
        let count = self.len();
        let value = index.get();
        if value <= 0 || value > count {
            Index::new(count)
        } else {
            Index::new(value - 1)
        }
    }

    fn set_changed(&self) -> &Signal<Index> {
        &self.set_changed
    }

    fn universe(&self) -> Option<Rc<Universe>> {
        self.source.as_ref()?.universe()
    }
}

impl Default for ObjectList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectList")
            .field("len", &self.len())
            .finish()
    }
}

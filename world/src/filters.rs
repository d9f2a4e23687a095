//! Composable read-only views over any object type.
//!
//! A filtered view delegates every primitive to its parent and skips
//! candidates failing the added predicate during the walk. Indices are the
//! parent's indices, not renumbered, so an index obtained from a view can
//! be used directly against the parent. Views copy nothing; the sort
//! operation is the exception and materializes its result into an
//! [`ObjectList`] up front, so traversing a sorted result is linear.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use starlance_core::object::MapObject;
use starlance_core::signal::Signal;
use starlance_core::{Index, PlayerSet, Point};

use crate::object_type::ObjectType;
use crate::reference::{ObjectList, ObjectReference};
use crate::Universe;

fn walk<F>(parent: &Rc<dyn ObjectType>, start: Index, forward: bool, accepts: F) -> Index
where
    F: Fn(&Rc<dyn MapObject>) -> bool,
{
    let step = |index: Index| {
        if forward {
            parent.next_index(index)
        } else {
            parent.previous_index(index)
        }
    };
    let mut candidate = step(start);
    while !candidate.is_none() {
        if let Some(object) = parent.object_by_index(candidate) {
            if accepts(&object) {
                break;
            }
        }
        candidate = step(candidate);
    }
    candidate
}

/// View restricted to objects at one exact map position.
pub struct PositionFilteredType {
    parent: Rc<dyn ObjectType>,
    position: Point,
}

impl PositionFilteredType {
    /// Wraps the parent type, keeping only objects at `position`.
    #[must_use]
    pub fn new(parent: Rc<dyn ObjectType>, position: Point) -> Self {
        Self { parent, position }
    }

    fn accepts(&self, object: &Rc<dyn MapObject>) -> bool {
        object.position() == Some(self.position)
    }
}

impl ObjectType for PositionFilteredType {
    fn object_by_index(&self, index: Index) -> Option<Rc<dyn MapObject>> {
        self.parent
            .object_by_index(index)
            .filter(|object| self.accepts(object))
    }

    fn next_index(&self, index: Index) -> Index {
        walk(&self.parent, index, true, |object| self.accepts(object))
    }

    fn previous_index(&self, index: Index) -> Index {
        walk(&self.parent, index, false, |object| self.accepts(object))
    }

    fn set_changed(&self) -> &Signal<Index> {
        self.parent.set_changed()
    }

    fn universe(&self) -> Option<Rc<Universe>> {
        self.parent.universe()
    }
}

impl fmt::Debug for PositionFilteredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionFilteredType")
            .field("position", &self.position)
            .finish()
    }
}

/// View restricted to objects owned by a member of a player set.
pub struct OwnerFilteredType {
    parent: Rc<dyn ObjectType>,
    owners: PlayerSet,
}

impl OwnerFilteredType {
    /// Wraps the parent type, keeping only objects owned within `owners`.
    /// Objects with an unknown owner are filtered out.
    #[must_use]
    pub fn new(parent: Rc<dyn ObjectType>, owners: PlayerSet) -> Self {
        Self { parent, owners }
    }

    fn accepts(&self, object: &Rc<dyn MapObject>) -> bool {
        object
            .owner()
            .map_or(false, |owner| self.owners.contains(owner))
    }
}

impl ObjectType for OwnerFilteredType {
    fn object_by_index(&self, index: Index) -> Option<Rc<dyn MapObject>> {
        self.parent
            .object_by_index(index)
            .filter(|object| self.accepts(object))
    }

    fn next_index(&self, index: Index) -> Index {
        walk(&self.parent, index, true, |object| self.accepts(object))
    }

    fn previous_index(&self, index: Index) -> Index {
        walk(&self.parent, index, false, |object| self.accepts(object))
    }

    fn set_changed(&self) -> &Signal<Index> {
        self.parent.set_changed()
    }

    fn universe(&self) -> Option<Rc<Universe>> {
        self.parent.universe()
    }
}

impl fmt::Debug for OwnerFilteredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnerFilteredType")
            .field("owners", &self.owners)
            .finish()
    }
}

/// View optionally restricted to marked objects.
pub struct MarkedFilteredType {
    parent: Rc<dyn ObjectType>,
    marked_only: bool,
}

impl MarkedFilteredType {
    /// Wraps the parent type; with `marked_only` false the view is
    /// transparent.
    #[must_use]
    pub fn new(parent: Rc<dyn ObjectType>, marked_only: bool) -> Self {
        Self {
            parent,
            marked_only,
        }
    }

    fn accepts(&self, object: &Rc<dyn MapObject>) -> bool {
        !self.marked_only || object.is_marked()
    }
}

impl ObjectType for MarkedFilteredType {
    fn object_by_index(&self, index: Index) -> Option<Rc<dyn MapObject>> {
        self.parent
            .object_by_index(index)
            .filter(|object| self.accepts(object))
    }

    fn next_index(&self, index: Index) -> Index {
        walk(&self.parent, index, true, |object| self.accepts(object))
    }

    fn previous_index(&self, index: Index) -> Index {
        walk(&self.parent, index, false, |object| self.accepts(object))
    }

    fn set_changed(&self) -> &Signal<Index> {
        self.parent.set_changed()
    }

    fn universe(&self) -> Option<Rc<Universe>> {
        self.parent.universe()
    }
}

impl fmt::Debug for MarkedFilteredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkedFilteredType")
            .field("marked_only", &self.marked_only)
            .finish()
    }
}

/// Conversion into a shared object-type handle.
///
/// Implemented for every shared concrete type and for the erased handle
/// itself, so the view constructors compose across both.
pub trait IntoObjectType {
    /// Returns this collection as a shared, type-erased handle.
    fn as_object_type(&self) -> Rc<dyn ObjectType>;
}

impl<T: ObjectType + 'static> IntoObjectType for Rc<T> {
    fn as_object_type(&self) -> Rc<dyn ObjectType> {
        let object_type = Rc::clone(self);
        object_type
    }
}

impl IntoObjectType for Rc<dyn ObjectType> {
    fn as_object_type(&self) -> Rc<dyn ObjectType> {
        Rc::clone(self)
    }
}

/// View and sort constructors available on every shared object type.
pub trait ObjectTypeExt: IntoObjectType {
    /// Derives a view keeping only objects at the given position.
    fn filter_position(&self, position: Point) -> Rc<PositionFilteredType> {
        Rc::new(PositionFilteredType::new(self.as_object_type(), position))
    }

    /// Derives a view keeping only objects owned within the given set.
    fn filter_owner(&self, owners: PlayerSet) -> Rc<OwnerFilteredType> {
        Rc::new(OwnerFilteredType::new(self.as_object_type(), owners))
    }

    /// Derives a view optionally keeping only marked objects.
    fn filter_marked(&self, marked_only: bool) -> Rc<MarkedFilteredType> {
        Rc::new(MarkedFilteredType::new(self.as_object_type(), marked_only))
    }

    /// Materializes this collection into a list ordered by the comparator,
    /// with ties broken by entity id and then by original index.
    ///
    /// The result is a concrete ordered list of references, so repeated
    /// traversal of a sorted result costs one resolution per step instead
    /// of a rescan of the whole chain.
    fn sorted<F>(&self, compare: F) -> ObjectList
    where
        F: Fn(&dyn MapObject, &dyn MapObject) -> Ordering,
        Self: Sized,
    {
        let parent = self.as_object_type();
        let mut entries: Vec<(Rc<dyn MapObject>, Index)> = Vec::new();
        let mut index = parent.find_next_index(Index::NONE);
        while !index.is_none() {
            if let Some(object) = parent.object_by_index(index) {
                entries.push((object, index));
            }
            index = parent.find_next_index(index);
        }
        entries.sort_by(|a, b| {
            compare(a.0.as_ref(), b.0.as_ref())
                .then_with(|| a.0.id().cmp(&b.0.id()))
                .then_with(|| a.1.cmp(&b.1))
        });

        // The list keeps the source alive, so sorting a temporary view
        // chain yields references that still resolve.
        let list = ObjectList::with_source(Rc::clone(&parent));
        for (_, original) in entries {
            list.add(ObjectReference::new(Rc::clone(&parent), original));
        }
        list
    }
}

impl<X: IntoObjectType> ObjectTypeExt for X {}

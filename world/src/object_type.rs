//! Core indexed-collection iteration protocol and its derived queries.

use std::rc::Rc;

use starlance_core::geometry::MapGeometry;
use starlance_core::object::MapObject;
use starlance_core::signal::Signal;
use starlance_core::{Id, Index, PlayerSet, Point};

use crate::Universe;

/// Uniform navigation protocol over an indexed, possibly sparse collection
/// of world objects.
///
/// Implementers supply the three primitives plus the set-changed signal;
/// every derived query is written once here in terms of those. Candidates
/// produced by the next/previous walk need not resolve to a present object,
/// but repeated steps must reach the sentinel within `count_objects() + 1`
/// steps from any starting index.
///
/// No operation fails: "not found" and "legitimately empty" are both the
/// [`Index::NONE`] sentinel or an absent object, by design. The only
/// mutating operation is [`ObjectType::notify_object_listeners`], which
/// drains dirty flags.
pub trait ObjectType {
    /// Resolves an index to the object occupying it, if any.
    fn object_by_index(&self, index: Index) -> Option<Rc<dyn MapObject>>;

    /// Next candidate index after `index`, or the sentinel at the end.
    fn next_index(&self, index: Index) -> Index;

    /// Previous candidate index before `index`, or the sentinel at the
    /// start; the sentinel itself means "after last".
    fn previous_index(&self, index: Index) -> Index;

    /// Signal raised when membership changes structurally, carrying an
    /// optional rehoming hint for selections into this collection.
    fn set_changed(&self) -> &Signal<Index>;

    /// Universe this collection belongs to, when it has a natural one.
    fn universe(&self) -> Option<Rc<Universe>> {
        None
    }

    /// Next index after `index` that resolves to a present object.
    fn find_next_index(&self, index: Index) -> Index {
        let mut candidate = self.next_index(index);
        while !candidate.is_none() && self.object_by_index(candidate).is_none() {
            candidate = self.next_index(candidate);
        }
        candidate
    }

    /// Previous index before `index` that resolves to a present object.
    fn find_previous_index(&self, index: Index) -> Index {
        let mut candidate = self.previous_index(index);
        while !candidate.is_none() && self.object_by_index(candidate).is_none() {
            candidate = self.previous_index(candidate);
        }
        candidate
    }

    /// Reports whether the collection contains no objects.
    fn is_empty(&self) -> bool {
        self.find_next_index(Index::NONE).is_none()
    }

    /// Reports whether the collection contains exactly one object.
    fn is_unit(&self) -> bool {
        let first = self.find_next_index(Index::NONE);
        !first.is_none() && self.find_next_index(first).is_none()
    }

    /// Number of objects in the collection.
    fn count_objects(&self) -> i32 {
        let mut count = 0;
        let mut index = self.find_next_index(Index::NONE);
        while !index.is_none() {
            count += 1;
            index = self.find_next_index(index);
        }
        count
    }

    /// Number of objects at the given position owned by a member of the
    /// given player set. Objects with unknown position or owner never
    /// match.
    fn count_objects_at(&self, position: Point, owners: PlayerSet) -> i32 {
        let mut count = 0;
        let mut index = self.find_next_index(Index::NONE);
        while !index.is_none() {
            if let Some(object) = self.object_by_index(index) {
                let at_position = object.position() == Some(position);
                let owned = object.owner().map_or(false, |owner| owners.contains(owner));
                if at_position && owned {
                    count += 1;
                }
            }
            index = self.find_next_index(index);
        }
        count
    }

    /// Index of the object nearest to the given position, or the sentinel
    /// when the collection has no object with a known position.
    ///
    /// A candidate whose circular extent contains the query point beats any
    /// best-so-far outside its own extent regardless of distance; otherwise
    /// strictly smaller squared distance wins and ties keep the candidate
    /// found first.
    fn find_nearest_index(&self, position: Point, geometry: &dyn MapGeometry) -> Index {
        let mut best = Index::NONE;
        let mut best_distance = 0;
        let mut best_inside = false;
        let mut index = self.find_next_index(Index::NONE);
        while !index.is_none() {
            if let Some(object) = self.object_by_index(index) {
                if let Some(object_position) = object.position() {
                    let distance = geometry.squared_distance(position, object_position);
                    let inside = object
                        .radius_squared()
                        .map_or(false, |radius| distance <= radius);
                    let replace = if best.is_none() {
                        true
                    } else if inside != best_inside {
                        inside
                    } else {
                        distance < best_distance
                    };
                    if replace {
                        best = index;
                        best_distance = distance;
                        best_inside = inside;
                    }
                }
            }
            index = self.find_next_index(index);
        }
        best
    }

    /// Next present object after `index`, optionally restricted to marked
    /// objects; the sentinel at the end, without wrapping.
    fn find_next_index_no_wrap(&self, index: Index, marked_only: bool) -> Index {
        let mut candidate = self.find_next_index(index);
        while !candidate.is_none() {
            if !marked_only {
                return candidate;
            }
            if let Some(object) = self.object_by_index(candidate) {
                if object.is_marked() {
                    return candidate;
                }
            }
            candidate = self.find_next_index(candidate);
        }
        Index::NONE
    }

    /// Previous twin of [`ObjectType::find_next_index_no_wrap`].
    fn find_previous_index_no_wrap(&self, index: Index, marked_only: bool) -> Index {
        let mut candidate = self.find_previous_index(index);
        while !candidate.is_none() {
            if !marked_only {
                return candidate;
            }
            if let Some(object) = self.object_by_index(candidate) {
                if object.is_marked() {
                    return candidate;
                }
            }
            candidate = self.find_previous_index(candidate);
        }
        Index::NONE
    }

    /// Like [`ObjectType::find_next_index_no_wrap`], but retries once from
    /// the start when the forward walk runs out. One retry only: a
    /// collection with no matching object yields the sentinel.
    fn find_next_index_wrap(&self, index: Index, marked_only: bool) -> Index {
        let found = self.find_next_index_no_wrap(index, marked_only);
        if found.is_none() {
            self.find_next_index_no_wrap(Index::NONE, marked_only)
        } else {
            found
        }
    }

    /// Previous twin of [`ObjectType::find_next_index_wrap`], retrying once
    /// from the "after last" sentinel.
    fn find_previous_index_wrap(&self, index: Index, marked_only: bool) -> Index {
        let found = self.find_previous_index_no_wrap(index, marked_only);
        if found.is_none() {
            self.find_previous_index_no_wrap(Index::NONE, marked_only)
        } else {
            found
        }
    }

    /// Next object at exactly the given position after `index`, optionally
    /// marked only; no wrapping.
    fn find_next_object_at(&self, position: Point, index: Index, marked_only: bool) -> Index {
        let mut candidate = self.find_next_index(index);
        while !candidate.is_none() {
            if let Some(object) = self.object_by_index(candidate) {
                if object.position() == Some(position) && (!marked_only || object.is_marked()) {
                    return candidate;
                }
            }
            candidate = self.find_next_index(candidate);
        }
        Index::NONE
    }

    /// Previous twin of [`ObjectType::find_next_object_at`].
    fn find_previous_object_at(&self, position: Point, index: Index, marked_only: bool) -> Index {
        let mut candidate = self.find_previous_index(index);
        while !candidate.is_none() {
            if let Some(object) = self.object_by_index(candidate) {
                if object.position() == Some(position) && (!marked_only || object.is_marked()) {
                    return candidate;
                }
            }
            candidate = self.find_previous_index(candidate);
        }
        Index::NONE
    }

    /// Wrapping variant of [`ObjectType::find_next_object_at`], with the
    /// same single-retry policy as [`ObjectType::find_next_index_wrap`].
    fn find_next_object_at_wrap(&self, position: Point, index: Index, marked_only: bool) -> Index {
        let found = self.find_next_object_at(position, index, marked_only);
        if found.is_none() {
            self.find_next_object_at(position, Index::NONE, marked_only)
        } else {
            found
        }
    }

    /// Wrapping variant of [`ObjectType::find_previous_object_at`].
    fn find_previous_object_at_wrap(
        &self,
        position: Point,
        index: Index,
        marked_only: bool,
    ) -> Index {
        let found = self.find_previous_object_at(position, index, marked_only);
        if found.is_none() {
            self.find_previous_object_at(position, Index::NONE, marked_only)
        } else {
            found
        }
    }

    /// Index of the object carrying the given identity, or the sentinel.
    fn find_index_for_id(&self, id: Id) -> Index {
        let mut index = self.find_next_index(Index::NONE);
        while !index.is_none() {
            if let Some(object) = self.object_by_index(index) {
                if object.id() == id {
                    return index;
                }
            }
            index = self.find_next_index(index);
        }
        Index::NONE
    }

    /// Index of the given object handle, or the sentinel.
    fn find_index_for_object(&self, object: &Rc<dyn MapObject>) -> Index {
        let mut index = self.find_next_index(Index::NONE);
        while !index.is_none() {
            if let Some(candidate) = self.object_by_index(index) {
                if Rc::ptr_eq(&candidate, object) {
                    return index;
                }
            }
            index = self.find_next_index(index);
        }
        Index::NONE
    }

    /// Fires the change signal of every dirty object and clears its dirty
    /// flag; reports whether any object was dirty.
    ///
    /// Collaborators call this exactly once after a batch of mutations, so
    /// observers see one event per changed object per batch.
    fn notify_object_listeners(&self) -> bool {
        let mut any = false;
        let mut index = self.find_next_index(Index::NONE);
        while !index.is_none() {
            if let Some(object) = self.object_by_index(index) {
                if object.is_dirty() {
                    object.notify_listeners();
                    any = true;
                }
            }
            index = self.find_next_index(index);
        }
        any
    }
}

/// Object type whose per-index result is a single concrete entity kind.
///
/// Purely a typing convenience for call sites that need the concrete
/// entity; it adds no behavior over [`ObjectType`].
pub trait TypedObjectType: ObjectType {
    /// Concrete entity kind stored in this collection.
    type Object: MapObject;

    /// Resolves an index to the concrete entity occupying it, if any.
    fn typed_object_by_index(&self, index: Index) -> Option<Rc<Self::Object>>;
}

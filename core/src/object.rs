//! Capability surface every indexed world object exposes.

use std::cell::Cell;

use crate::signal::Signal;
use crate::{Id, PlayerId, Point};

/// Minimal capability surface the object model requires of a world entity.
///
/// Implementations are shared single-threaded handles (`Rc<dyn MapObject>`)
/// with interior mutability; the framework never creates or destroys them,
/// it only indexes and observes. The dirty flag batches mutations: setters
/// mark the object dirty, and a later [`MapObject::notify_listeners`] call
/// (usually driven through an object type's `notify_object_listeners`)
/// fires the change signal exactly once per batch.
pub trait MapObject {
    /// Identity of the object; nonzero for every real entity.
    fn id(&self) -> Id;

    /// Owning player, if known.
    fn owner(&self) -> Option<PlayerId>;

    /// Map position, if known.
    fn position(&self) -> Option<Point>;

    /// Reports whether the UI marker is set on this object.
    fn is_marked(&self) -> bool;

    /// Sets or clears the UI marker, marking the object dirty on change.
    fn set_marked(&self, marked: bool);

    /// Reports whether a mutation is awaiting notification.
    fn is_dirty(&self) -> bool;

    /// Records that a mutation occurred and listeners have not yet heard.
    fn mark_dirty(&self);

    /// Clears the dirty flag and fires the change signal.
    fn notify_listeners(&self);

    /// Change signal fired by [`MapObject::notify_listeners`].
    fn changed(&self) -> &Signal<()>;

    /// Squared radius of the object's circular extent, if it has one.
    ///
    /// Objects without an extent are never considered "inside" during
    /// nearest-object tie-breaking.
    fn radius_squared(&self) -> Option<i64> {
        None
    }
}

/// Reusable marked/dirty/change-signal state block for entity types.
///
/// Entities embed one of these and delegate the corresponding
/// [`MapObject`] operations to it.
#[derive(Debug, Default)]
pub struct ObjectFlags {
    marked: Cell<bool>,
    dirty: Cell<bool>,
    changed: Signal<()>,
}

impl ObjectFlags {
    /// Creates a fresh state block: unmarked, clean, no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports whether the UI marker is set.
    #[must_use]
    pub fn is_marked(&self) -> bool {
        self.marked.get()
    }

    /// Sets or clears the UI marker; a change marks the object dirty.
    pub fn set_marked(&self, marked: bool) {
        if self.marked.get() != marked {
            self.marked.set(marked);
            self.dirty.set(true);
        }
    }

    /// Reports whether a mutation is awaiting notification.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Records a mutation.
    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    /// Clears the dirty flag and fires the change signal.
    pub fn notify_listeners(&self) {
        self.dirty.set(false);
        self.changed.raise(&());
    }

    /// The change signal fired by [`ObjectFlags::notify_listeners`].
    #[must_use]
    pub fn changed(&self) -> &Signal<()> {
        &self.changed
    }
}

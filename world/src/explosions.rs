//! Explosion reports and their accumulating collection.
//!
//! Explosion sightings arrive from several sources (own witnesses, allied
//! score reports, wreckage scans) describing the same event with different
//! subsets of the facts. Reports for the same position merge instead of
//! duplicating, with each unknown field filled in from whichever report
//! knows it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use starlance_core::object::{MapObject, ObjectFlags};
use starlance_core::signal::Signal;
use starlance_core::{Id, Index, PlayerId, Point};

use crate::object_type::{ObjectType, TypedObjectType};
use crate::vector::slot_of;
use crate::Universe;

/// A single (possibly partial) explosion report.
///
/// Position is the one mandatory fact; identity, the destroyed ship's name
/// and the destroyed ship's identity each start unknown and can be filled
/// in by a later merge.
pub struct Explosion {
    id: Cell<Id>,
    position: Point,
    ship_name: RefCell<String>,
    ship_id: Cell<Id>,
    flags: ObjectFlags,
}

impl Explosion {
    /// Creates a report of an explosion at the given position.
    #[must_use]
    pub fn new(id: Id, position: Point) -> Self {
        Self {
            id: Cell::new(id),
            position,
            ship_name: RefCell::new(String::new()),
            ship_id: Cell::new(Id::NONE),
            flags: ObjectFlags::new(),
        }
    }

    /// Name of the destroyed ship; empty when unknown.
    #[must_use]
    pub fn ship_name(&self) -> String {
        self.ship_name.borrow().clone()
    }

    /// Records the destroyed ship's name.
    pub fn set_ship_name(&self, name: &str) {
        *self.ship_name.borrow_mut() = name.to_owned();
        self.flags.mark_dirty();
    }

    /// Identity of the destroyed ship; [`Id::NONE`] when unknown.
    #[must_use]
    pub fn ship_id(&self) -> Id {
        self.ship_id.get()
    }

    /// Records the destroyed ship's identity.
    pub fn set_ship_id(&self, ship: Id) {
        self.ship_id.set(ship);
        self.flags.mark_dirty();
    }

    /// Folds another report into this one when the two can describe the
    /// same event; reports whether the merge happened.
    ///
    /// Two reports are mergeable when they sit at the same position and
    /// each identity-carrying field is compatible: unknown on at least one
    /// side, or equal. A merge only ever fills in unknowns; a known fact is
    /// never overwritten.
    pub fn merge(&self, other: &Explosion) -> bool {
        if self.position != other.position {
            return false;
        }
        let other_name = other.ship_name();
        {
            let own_id = self.id.get();
            let other_id = other.id.get();
            if own_id.is_known() && other_id.is_known() && own_id != other_id {
                return false;
            }
            let own_name = self.ship_name.borrow();
            if !own_name.is_empty() && !other_name.is_empty() && *own_name != other_name {
                return false;
            }
            let own_ship = self.ship_id.get();
            let other_ship = other.ship_id.get();
            if own_ship.is_known() && other_ship.is_known() && own_ship != other_ship {
                return false;
            }
        }

        if !self.id.get().is_known() && other.id.get().is_known() {
            self.id.set(other.id.get());
        }
        if self.ship_name.borrow().is_empty() && !other_name.is_empty() {
            *self.ship_name.borrow_mut() = other_name;
        }
        if !self.ship_id.get().is_known() && other.ship_id.get().is_known() {
            self.ship_id.set(other.ship_id.get());
        }
        self.flags.mark_dirty();
        true
    }
}

impl MapObject for Explosion {
    fn id(&self) -> Id {
        self.id.get()
    }

    fn owner(&self) -> Option<PlayerId> {
        None
    }

    fn position(&self) -> Option<Point> {
        Some(self.position)
    }

    fn is_marked(&self) -> bool {
        self.flags.is_marked()
    }

    fn set_marked(&self, marked: bool) {
        self.flags.set_marked(marked);
    }

    fn is_dirty(&self) -> bool {
        self.flags.is_dirty()
    }

    fn mark_dirty(&self) {
        self.flags.mark_dirty();
    }

    fn notify_listeners(&self) {
        self.flags.notify_listeners();
    }

    fn changed(&self) -> &Signal<()> {
        self.flags.changed()
    }
}

impl fmt::Debug for Explosion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Explosion")
            .field("id", &self.id.get())
            .field("position", &self.position)
            .field("ship_id", &self.ship_id.get())
            .finish()
    }
}

/// Accumulating, merging collection of explosion reports.
///
/// Indices are dense and positional; adding a report that merges into an
/// existing one changes that entry in place rather than growing the
/// collection.
pub struct ExplosionType {
    universe: Weak<Universe>,
    entries: RefCell<Vec<Rc<Explosion>>>,
    set_changed: Signal<Index>,
}

impl ExplosionType {
    pub(crate) fn new(universe: Weak<Universe>) -> Rc<Self> {
        Rc::new(Self {
            universe,
            entries: RefCell::new(Vec::new()),
            set_changed: Signal::new(),
        })
    }

    /// Folds a new report into the collection.
    ///
    /// The report merges into the first compatible existing entry; when no
    /// entry accepts it, the report joins the collection as a new entry and
    /// set-changed is raised with the sentinel hint. Either way the touched
    /// entry is left dirty for the next listener notification round.
    pub fn add(&self, explosion: Explosion) {
        {
            let entries = self.entries.borrow();
            for entry in entries.iter() {
                if entry.merge(&explosion) {
                    return;
                }
            }
        }
        explosion.mark_dirty();
        self.entries.borrow_mut().push(Rc::new(explosion));
        self.set_changed.raise(&Index::NONE);
    }

    /// Drops every report and raises set-changed once.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.set_changed.raise(&Index::NONE);
    }
}

impl ObjectType for ExplosionType {
    fn object_by_index(&self, index: Index) -> Option<Rc<dyn MapObject>> {
        let slot = slot_of(index)?;
        let explosion = self.entries.borrow().get(slot).cloned()?;
        Some(explosion)
    }

    fn next_index(&self, index: Index) -> Index {
        let count = self.entries.borrow().len() as i32;
        let value = index.get().max(0);
        if value < count {
            Index::new(value + 1)
        } else {
            Index::NONE
        }
    }

    fn previous_index(&self, index: Index) -> Index {
        let count = self.entries.borrow().len() as i32;
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
        self.universe.upgrade()
    }
}

impl TypedObjectType for ExplosionType {
    type Object = Explosion;

    fn typed_object_by_index(&self, index: Index) -> Option<Rc<Explosion>> {
        let slot = slot_of(index)?;
        self.entries.borrow().get(slot).cloned()
    }
}

impl fmt::Debug for ExplosionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplosionType")
            .field("entries", &self.entries.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Explosion;
    use starlance_core::{Id, Point};

    fn report(id: i32, x: i32, y: i32) -> Explosion {
        Explosion::new(Id::new(id), Point::new(x, y))
    }

    #[test]
    fn merge_requires_matching_position() {
        let a = report(0, 100, 100);
        let b = report(0, 100, 101);
        assert!(!a.merge(&b));
    }

    #[test]
    fn merge_fills_unknown_fields_from_the_other_report() {
        let a = report(0, 100, 100);
        a.set_ship_name("Vostok");
        let b = report(7, 100, 100);
        b.set_ship_id(Id::new(42));

        assert!(a.merge(&b));
        assert_eq!(a.id.get(), Id::new(7));
        assert_eq!(a.ship_name(), "Vostok");
        assert_eq!(a.ship_id(), Id::new(42));
    }

    #[test]
    fn merge_rejects_conflicting_known_facts() {
        let a = report(3, 100, 100);
        let b = report(4, 100, 100);
        assert!(!a.merge(&b));

        let c = report(0, 100, 100);
        c.set_ship_name("Vostok");
        let d = report(0, 100, 100);
        d.set_ship_name("Aurora");
        assert!(!c.merge(&d));

        let e = report(0, 100, 100);
        e.set_ship_id(Id::new(1));
        let f = report(0, 100, 100);
        f.set_ship_id(Id::new(2));
        assert!(!e.merge(&f));
    }

    #[test]
    fn merge_never_overwrites_known_facts() {
        let a = report(5, 100, 100);
        a.set_ship_id(Id::new(9));
        let b = report(0, 100, 100);

        assert!(a.merge(&b));
        assert_eq!(a.id.get(), Id::new(5));
        assert_eq!(a.ship_id(), Id::new(9));
    }

    #[test]
    fn merge_of_equal_known_facts_succeeds() {
        let a = report(5, 100, 100);
        let b = report(5, 100, 100);
        assert!(a.merge(&b));
        assert_eq!(a.id.get(), Id::new(5));
    }
}

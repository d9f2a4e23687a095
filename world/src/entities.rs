//! Minimal ship and planet entities.
//!
//! Only the capability surface the object model consumes lives here; combat
//! values, cargo, and the rest of the turn data belong to the collaborator
//! layers that create and destroy these entities.

use std::cell::{Cell, RefCell};

use starlance_core::object::{MapObject, ObjectFlags};
use starlance_core::signal::Signal;
use starlance_core::{Id, PlayerId, Point};

/// A starship as far as the object model is concerned.
///
/// Position and owner may be unknown for ships only seen through scanner
/// reports. A ship leads a fleet when its fleet number equals its own
/// identity.
#[derive(Debug)]
pub struct Ship {
    id: Id,
    name: RefCell<String>,
    owner: Cell<Option<PlayerId>>,
    position: Cell<Option<Point>>,
    fleet_number: Cell<Id>,
    playable: Cell<bool>,
    flags: ObjectFlags,
}

impl Ship {
    /// Creates a ship with the given identity and everything else unknown.
    #[must_use]
    pub fn new(id: Id) -> Self {
        Self {
            id,
            name: RefCell::new(String::new()),
            owner: Cell::new(None),
            position: Cell::new(None),
            fleet_number: Cell::new(Id::NONE),
            playable: Cell::new(false),
            flags: ObjectFlags::new(),
        }
    }

    /// Display name of the ship; empty when unknown.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    /// Updates the display name.
    pub fn set_name(&self, name: &str) {
        *self.name.borrow_mut() = name.to_owned();
        self.flags.mark_dirty();
    }

    /// Updates the owning player.
    pub fn set_owner(&self, owner: Option<PlayerId>) {
        self.owner.set(owner);
        self.flags.mark_dirty();
    }

    /// Updates the map position.
    pub fn set_position(&self, position: Option<Point>) {
        self.position.set(position);
        self.flags.mark_dirty();
    }

    /// Fleet this ship belongs to; [`Id::NONE`] when unfleeted.
    #[must_use]
    pub fn fleet_number(&self) -> Id {
        self.fleet_number.get()
    }

    /// Moves the ship into a fleet (or out of one with [`Id::NONE`]).
    ///
    /// Fleet membership is invisible to the ship vector's structure signal;
    /// callers route a rehoming hint through the fleet indexer's explicit
    /// entry point afterwards.
    pub fn set_fleet_number(&self, fleet: Id) {
        self.fleet_number.set(fleet);
        self.flags.mark_dirty();
    }

    /// Reports whether this ship leads its fleet.
    #[must_use]
    pub fn is_fleet_leader(&self) -> bool {
        self.id.is_known() && self.fleet_number.get() == self.id
    }

    /// Reports whether the current player can give this ship orders.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.playable.get()
    }

    /// Updates playability.
    pub fn set_playable(&self, playable: bool) {
        self.playable.set(playable);
        self.flags.mark_dirty();
    }
}

impl MapObject for Ship {
    fn id(&self) -> Id {
        self.id
    }

    fn owner(&self) -> Option<PlayerId> {
        self.owner.get()
    }

    fn position(&self) -> Option<Point> {
        self.position.get()
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

/// A planet as far as the object model is concerned.
///
/// Planets always sit at a known, immutable position. The optional gravity
/// well radius is the planet's circular extent for nearest-object
/// tie-breaking.
#[derive(Debug)]
pub struct Planet {
    id: Id,
    name: RefCell<String>,
    owner: Cell<Option<PlayerId>>,
    position: Point,
    gravity_radius_squared: Cell<Option<i64>>,
    flags: ObjectFlags,
}

impl Planet {
    /// Creates a planet at the given position with an unknown owner.
    #[must_use]
    pub fn new(id: Id, position: Point) -> Self {
        Self {
            id,
            name: RefCell::new(String::new()),
            owner: Cell::new(None),
            position,
            gravity_radius_squared: Cell::new(None),
            flags: ObjectFlags::new(),
        }
    }

    /// Display name of the planet; empty when unknown.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    /// Updates the display name.
    pub fn set_name(&self, name: &str) {
        *self.name.borrow_mut() = name.to_owned();
        self.flags.mark_dirty();
    }

    /// Updates the owning player.
    pub fn set_owner(&self, owner: Option<PlayerId>) {
        self.owner.set(owner);
        self.flags.mark_dirty();
    }

    /// Updates the squared gravity well radius.
    pub fn set_gravity_radius_squared(&self, radius: Option<i64>) {
        self.gravity_radius_squared.set(radius);
        self.flags.mark_dirty();
    }
}

impl MapObject for Planet {
    fn id(&self) -> Id {
        self.id
    }

    fn owner(&self) -> Option<PlayerId> {
        self.owner.get()
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

    fn radius_squared(&self) -> Option<i64> {
        self.gravity_radius_squared.get()
    }
}

#[cfg(test)]
mod tests {
    use super::{Planet, Ship};
    use starlance_core::object::MapObject;
    use starlance_core::{Id, PlayerId, Point};

    #[test]
    fn ship_setters_mark_dirty() {
        let ship = Ship::new(Id::new(12));
        assert!(!ship.is_dirty());
        ship.set_position(Some(Point::new(100, 200)));
        assert!(ship.is_dirty());
        ship.notify_listeners();
        assert!(!ship.is_dirty());
        ship.set_owner(Some(PlayerId::new(3)));
        assert!(ship.is_dirty());
    }

    #[test]
    fn fleet_leadership_requires_own_fleet_number() {
        let ship = Ship::new(Id::new(9));
        assert!(!ship.is_fleet_leader());
        ship.set_fleet_number(Id::new(9));
        assert!(ship.is_fleet_leader());
        ship.set_fleet_number(Id::new(4));
        assert!(!ship.is_fleet_leader());
    }

    #[test]
    fn planet_extent_comes_from_gravity_well() {
        let planet = Planet::new(Id::new(3), Point::new(1000, 1000));
        assert_eq!(planet.radius_squared(), None);
        planet.set_gravity_radius_squared(Some(9));
        assert_eq!(planet.radius_squared(), Some(9));
        assert_eq!(planet.position(), Some(Point::new(1000, 1000)));
    }
}

//! Concrete indexers over the universe's entity vectors.
//!
//! Each indexer wraps one [`ObjectVector`] and adds a single validity
//! predicate. Structural changes of the underlying vector are forwarded
//! into the indexer's own set-changed signal; the fleet indexer adds an
//! explicit entry point for membership changes the vector cannot observe.

use std::fmt;
use std::rc::{Rc, Weak};

use starlance_core::object::MapObject;
use starlance_core::signal::{Signal, Subscription};
use starlance_core::Index;

use crate::entities::{Planet, Ship};
use crate::object_type::{ObjectType, TypedObjectType};
use crate::vector::ObjectVector;
use crate::Universe;

/// Indexer over every ship in the universe.
pub struct AnyShipType {
    universe: Weak<Universe>,
    ships: Rc<ObjectVector<Ship>>,
    set_changed: Signal<Index>,
    _structure: Subscription,
}

impl AnyShipType {
    pub(crate) fn new(universe: Weak<Universe>, ships: Rc<ObjectVector<Ship>>) -> Rc<Self> {
        let set_changed = Signal::new();
        let forward = {
            let signal = set_changed.clone();
            ships
                .structure_changed()
                .subscribe(move |hint| signal.raise(hint))
        };
        Rc::new(Self {
            universe,
            ships,
            set_changed,
            _structure: forward,
        })
    }
}

impl ObjectType for AnyShipType {
    fn object_by_index(&self, index: Index) -> Option<Rc<dyn MapObject>> {
        let ship = self.ships.get(index)?;
        Some(ship)
    }

    fn next_index(&self, index: Index) -> Index {
        self.ships.next_index(index)
    }

    fn previous_index(&self, index: Index) -> Index {
        self.ships.previous_index(index)
    }

    fn set_changed(&self) -> &Signal<Index> {
        &self.set_changed
    }

    fn universe(&self) -> Option<Rc<Universe>> {
        self.universe.upgrade()
    }
}

impl TypedObjectType for AnyShipType {
    type Object = Ship;

    fn typed_object_by_index(&self, index: Index) -> Option<Rc<Ship>> {
        self.ships.get(index)
    }
}

impl fmt::Debug for AnyShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyShipType").finish()
    }
}

/// Indexer over every planet in the universe.
pub struct AnyPlanetType {
    universe: Weak<Universe>,
    planets: Rc<ObjectVector<Planet>>,
    set_changed: Signal<Index>,
    _structure: Subscription,
}

impl AnyPlanetType {
    pub(crate) fn new(universe: Weak<Universe>, planets: Rc<ObjectVector<Planet>>) -> Rc<Self> {
        let set_changed = Signal::new();
        let forward = {
            let signal = set_changed.clone();
            planets
                .structure_changed()
                .subscribe(move |hint| signal.raise(hint))
        };
        Rc::new(Self {
            universe,
            planets,
            set_changed,
            _structure: forward,
        })
    }
}

impl ObjectType for AnyPlanetType {
    fn object_by_index(&self, index: Index) -> Option<Rc<dyn MapObject>> {
        let planet = self.planets.get(index)?;
        Some(planet)
    }

    fn next_index(&self, index: Index) -> Index {
        self.planets.next_index(index)
    }

    fn previous_index(&self, index: Index) -> Index {
        self.planets.previous_index(index)
    }

    fn set_changed(&self) -> &Signal<Index> {
        &self.set_changed
    }

    fn universe(&self) -> Option<Rc<Universe>> {
        self.universe.upgrade()
    }
}

impl TypedObjectType for AnyPlanetType {
    type Object = Planet;

    fn typed_object_by_index(&self, index: Index) -> Option<Rc<Planet>> {
        self.planets.get(index)
    }
}

impl fmt::Debug for AnyPlanetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyPlanetType").finish()
    }
}

/// Indexer over playable fleet leaders.
///
/// A ship appears here while it leads its fleet and is playable. Fleet
/// membership changes through ship mutation, which the ship vector's
/// structure signal cannot see; collaborators that regroup fleets call
/// [`FleetType::fleet_changed`] with a rehoming hint afterwards.
pub struct FleetType {
    universe: Weak<Universe>,
    ships: Rc<ObjectVector<Ship>>,
    set_changed: Signal<Index>,
    _structure: Subscription,
}

impl FleetType {
    pub(crate) fn new(universe: Weak<Universe>, ships: Rc<ObjectVector<Ship>>) -> Rc<Self> {
        let set_changed = Signal::new();
        let forward = {
            let signal = set_changed.clone();
            ships
                .structure_changed()
                .subscribe(move |hint| signal.raise(hint))
        };
        Rc::new(Self {
            universe,
            ships,
            set_changed,
            _structure: forward,
        })
    }

    fn accepts(ship: &Ship) -> bool {
        ship.is_fleet_leader() && ship.is_playable()
    }

    /// Re-raises set-changed after a fleet restructuring, carrying the
    /// caller's rehoming hint (the new index of the moved selection, or
    /// the sentinel when there is none).
    pub fn fleet_changed(&self, hint: Index) {
        self.set_changed.raise(&hint);
    }
}

impl ObjectType for FleetType {
    fn object_by_index(&self, index: Index) -> Option<Rc<dyn MapObject>> {
        let ship = self.ships.get(index)?;
        if Self::accepts(&ship) {
            Some(ship)
        } else {
            None
        }
    }

    fn next_index(&self, index: Index) -> Index {
        let mut candidate = self.ships.next_index(index);
        while !candidate.is_none() {
            if let Some(ship) = self.ships.get(candidate) {
                if Self::accepts(&ship) {
                    break;
                }
            }
            candidate = self.ships.next_index(candidate);
        }
        candidate
    }

    fn previous_index(&self, index: Index) -> Index {
        let mut candidate = self.ships.previous_index(index);
        while !candidate.is_none() {
            if let Some(ship) = self.ships.get(candidate) {
                if Self::accepts(&ship) {
                    break;
                }
            }
            candidate = self.ships.previous_index(candidate);
        }
        candidate
    }

    fn set_changed(&self) -> &Signal<Index> {
        &self.set_changed
    }

    fn universe(&self) -> Option<Rc<Universe>> {
        self.universe.upgrade()
    }
}

impl TypedObjectType for FleetType {
    type Object = Ship;

    fn typed_object_by_index(&self, index: Index) -> Option<Rc<Ship>> {
        self.ships.get(index).filter(|ship| Self::accepts(ship))
    }
}

impl fmt::Debug for FleetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FleetType").finish()
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Client-side world object model for Starlance.
//!
//! The crate is built around one protocol: [`object_type::ObjectType`], a
//! uniform navigation surface over any indexed collection of map objects.
//! Concrete indexers over the universe's entity storage, filtered views,
//! explosion accumulators and hand-assembled reference lists all speak it,
//! so the UI-facing systems can iterate, count, search and observe any of
//! them through the same handle. Nothing in here fails loudly: absent
//! objects and empty collections both surface as the index sentinel, and
//! change notification flows through the signals of `starlance-core`.

pub mod entities;
pub mod explosions;
pub mod filters;
pub mod indexers;
pub mod object_type;
pub mod reference;
pub mod vector;

use std::fmt;
use std::rc::Rc;

use crate::entities::{Planet, Ship};
use crate::explosions::ExplosionType;
use crate::indexers::{AnyPlanetType, AnyShipType, FleetType};
use crate::object_type::ObjectType;
use crate::vector::ObjectVector;

/// Kind of entity an indexer enumerates, for call sites that select a
/// collection dynamically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Starships.
    Ship,
    /// Planets.
    Planet,
}

/// Root of the object model: entity storage plus the standard indexers
/// over it.
///
/// Construction wires every indexer to the storage it enumerates and back
/// to the universe itself. Indexers hold the universe weakly, so dropping
/// the last strong handle tears the whole graph down without leaking
/// cycles.
pub struct Universe {
    ships: Rc<ObjectVector<Ship>>,
    planets: Rc<ObjectVector<Planet>>,
    explosions: Rc<ExplosionType>,
    any_ships: Rc<AnyShipType>,
    any_planets: Rc<AnyPlanetType>,
    fleets: Rc<FleetType>,
}

impl Universe {
    /// Creates an empty universe with its indexers wired up.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|weak| {
            let ships = Rc::new(ObjectVector::new());
            let planets = Rc::new(ObjectVector::new());
            Self {
                explosions: ExplosionType::new(weak.clone()),
                any_ships: AnyShipType::new(weak.clone(), Rc::clone(&ships)),
                any_planets: AnyPlanetType::new(weak.clone(), Rc::clone(&planets)),
                fleets: FleetType::new(weak.clone(), Rc::clone(&ships)),
                ships,
                planets,
            }
        })
    }

    /// Backing storage for ships.
    #[must_use]
    pub fn ships(&self) -> &ObjectVector<Ship> {
        &self.ships
    }

    /// Backing storage for planets.
    #[must_use]
    pub fn planets(&self) -> &ObjectVector<Planet> {
        &self.planets
    }

    /// Accumulating explosion report collection.
    #[must_use]
    pub fn explosions(&self) -> Rc<ExplosionType> {
        Rc::clone(&self.explosions)
    }

    /// Indexer over every ship.
    #[must_use]
    pub fn any_ships(&self) -> Rc<AnyShipType> {
        Rc::clone(&self.any_ships)
    }

    /// Indexer over every planet.
    #[must_use]
    pub fn any_planets(&self) -> Rc<AnyPlanetType> {
        Rc::clone(&self.any_planets)
    }

    /// Indexer over playable fleet leaders.
    #[must_use]
    pub fn fleets(&self) -> Rc<FleetType> {
        Rc::clone(&self.fleets)
    }

    /// Type-erased indexer for the given entity kind.
    #[must_use]
    pub fn object_type_for(&self, kind: EntityKind) -> Rc<dyn ObjectType> {
        match kind {
            EntityKind::Ship => self.any_ships(),
            EntityKind::Planet => self.any_planets(),
        }
    }
}

impl fmt::Debug for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Universe")
            .field("ships", &self.ships)
            .field("planets", &self.planets)
            .field("explosions", &self.explosions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use starlance_core::geometry::{FlatGeometry, WrappedGeometry};
    use starlance_core::object::MapObject;
    use starlance_core::{Id, Index, PlayerId, PlayerSet, Point};

    use crate::entities::{Planet, Ship};
    use crate::explosions::Explosion;
    use crate::filters::ObjectTypeExt;
    use crate::object_type::ObjectType;
    use crate::reference::{ObjectList, ObjectReference};
    use crate::{EntityKind, Universe};

    fn universe_with_ships(indices: &[i32]) -> Rc<Universe> {
        let universe = Universe::new();
        for &value in indices {
            let ship = Rc::new(Ship::new(Id::new(value * 100)));
            ship.set_position(Some(Point::new(value * 10, value * 10)));
            ship.set_owner(Some(PlayerId::new(1)));
            universe.ships().set(Index::new(value), Some(ship));
        }
        universe
    }

    fn add_planet(universe: &Universe, index: i32, id: i32, position: Point) -> Rc<Planet> {
        let planet = Rc::new(Planet::new(Id::new(id), position));
        universe
            .planets()
            .set(Index::new(index), Some(Rc::clone(&planet)));
        planet
    }

    #[test]
    fn forward_chain_visits_every_present_object_in_order() {
        let universe = universe_with_ships(&[1, 3, 6, 9]);
        universe.ships().set(Index::new(10), None);
        let ships = universe.any_ships();

        let mut visited = Vec::new();
        let mut index = ships.find_next_index(Index::NONE);
        while !index.is_none() {
            visited.push(index.get());
            index = ships.find_next_index(index);
        }
        assert_eq!(visited, vec![1, 3, 6, 9]);
    }

    #[test]
    fn backward_chain_mirrors_the_forward_chain() {
        let universe = universe_with_ships(&[1, 3, 6, 9]);
        let ships = universe.any_ships();

        let mut visited = Vec::new();
        let mut index = ships.find_previous_index(Index::NONE);
        while !index.is_none() {
            visited.push(index.get());
            index = ships.find_previous_index(index);
        }
        assert_eq!(visited, vec![9, 6, 3, 1]);
    }

    #[test]
    fn iteration_terminates_within_the_population_bound() {
        let universe = universe_with_ships(&[2, 4, 7]);
        let ships = universe.any_ships();
        let bound = ships.count_objects() + 1;

        for start in -1..=12 {
            let mut steps = 0;
            let mut index = ships.next_index(Index::new(start));
            while !index.is_none() {
                steps += 1;
                assert!(steps <= bound);
                index = ships.next_index(index);
            }
        }
    }

    #[test]
    fn emptiness_and_unity_follow_the_population() {
        let empty = Universe::new();
        assert!(empty.any_ships().is_empty());
        assert!(!empty.any_ships().is_unit());

        let single = universe_with_ships(&[4]);
        assert!(!single.any_ships().is_empty());
        assert!(single.any_ships().is_unit());

        let double = universe_with_ships(&[4, 8]);
        assert!(!double.any_ships().is_unit());
        assert_eq!(double.any_ships().count_objects(), 2);
    }

    #[test]
    fn wrap_search_restarts_once_and_can_return_to_the_start() {
        let universe = universe_with_ships(&[2, 5]);
        let ships = universe.any_ships();

        assert_eq!(ships.find_next_index_wrap(Index::new(5), false).get(), 2);
        assert_eq!(
            ships.find_previous_index_wrap(Index::new(2), false).get(),
            5
        );

        let lone = universe_with_ships(&[3]);
        let only = lone.any_ships();
        assert_eq!(only.find_next_index_wrap(Index::new(3), false).get(), 3);
        assert_eq!(only.find_previous_index_wrap(Index::new(3), false).get(), 3);
    }

    #[test]
    fn marked_only_search_without_marked_objects_finds_nothing() {
        let universe = universe_with_ships(&[1, 2, 3]);
        let ships = universe.any_ships();
        assert!(ships.find_next_index_wrap(Index::new(2), true).is_none());
        assert!(ships
            .find_previous_index_wrap(Index::new(2), true)
            .is_none());

        ships
            .object_by_index(Index::new(3))
            .expect("ship present")
            .set_marked(true);
        assert_eq!(ships.find_next_index_wrap(Index::new(3), true).get(), 3);
    }

    #[test]
    fn position_search_walks_cohabiting_objects() {
        let universe = universe_with_ships(&[1, 2, 3, 4]);
        let ships = universe.any_ships();
        let shared = Point::new(500, 500);
        for value in [1, 3, 4] {
            universe
                .ships()
                .get(Index::new(value))
                .expect("ship present")
                .set_position(Some(shared));
        }

        assert_eq!(
            ships.find_next_object_at(shared, Index::NONE, false).get(),
            1
        );
        assert_eq!(
            ships.find_next_object_at(shared, Index::new(1), false).get(),
            3
        );
        assert_eq!(
            ships
                .find_next_object_at_wrap(shared, Index::new(4), false)
                .get(),
            1
        );
        assert_eq!(
            ships
                .find_previous_object_at(shared, Index::new(3), false)
                .get(),
            1
        );
    }

    #[test]
    fn counting_at_a_position_respects_owner_sets() {
        let universe = universe_with_ships(&[1, 2, 3]);
        let position = Point::new(40, 40);
        for (value, owner) in [(1, 2), (2, 2), (3, 5)] {
            let ship = universe.ships().get(Index::new(value)).expect("present");
            ship.set_position(Some(position));
            ship.set_owner(Some(PlayerId::new(owner)));
        }
        let unknown = Rc::new(Ship::new(Id::new(999)));
        unknown.set_position(Some(position));
        universe.ships().set(Index::new(4), Some(unknown));

        let ships = universe.any_ships();
        let twos = PlayerSet::EMPTY.with(PlayerId::new(2));
        assert_eq!(ships.count_objects_at(position, twos), 2);
        assert_eq!(ships.count_objects_at(position, PlayerSet::ALL), 3);
        assert_eq!(ships.count_objects_at(position, PlayerSet::EMPTY), 0);
        assert_eq!(ships.count_objects_at(Point::ORIGIN, PlayerSet::ALL), 0);
    }

    #[test]
    fn nearest_search_prefers_strictly_closer_objects() {
        let universe = Universe::new();
        let _near = add_planet(&universe, 1, 10, Point::new(100, 100));
        let _far = add_planet(&universe, 2, 11, Point::new(200, 200));

        let planets = universe.any_planets();
        let found = planets.find_nearest_index(Point::new(110, 110), &FlatGeometry);
        assert_eq!(found.get(), 1);
    }

    #[test]
    fn nearest_search_lets_an_enclosing_extent_win() {
        let universe = Universe::new();
        let _close = add_planet(&universe, 1, 10, Point::new(100, 100));
        let heavy = add_planet(&universe, 2, 11, Point::new(130, 100));
        heavy.set_gravity_radius_squared(Some(900));

        // The query sits 10 from the first planet but inside the second
        // one's gravity well, so the well wins despite the larger distance.
        let planets = universe.any_planets();
        let found = planets.find_nearest_index(Point::new(110, 100), &FlatGeometry);
        assert_eq!(found.get(), 2);
    }

    #[test]
    fn nearest_search_keeps_the_first_of_equally_distant_objects() {
        let universe = Universe::new();
        let _a = add_planet(&universe, 1, 10, Point::new(90, 100));
        let _b = add_planet(&universe, 2, 11, Point::new(110, 100));

        let planets = universe.any_planets();
        let found = planets.find_nearest_index(Point::new(100, 100), &FlatGeometry);
        assert_eq!(found.get(), 1);
    }

    #[test]
    fn nearest_search_honors_wrapped_geometry() {
        let universe = Universe::new();
        let _west = add_planet(&universe, 1, 10, Point::new(10, 100));
        let _middle = add_planet(&universe, 2, 11, Point::new(500, 100));

        let geometry = WrappedGeometry::new(1000, 1000);
        let planets = universe.any_planets();
        let found = planets.find_nearest_index(Point::new(990, 100), &geometry);
        assert_eq!(found.get(), 1);
    }

    #[test]
    fn identity_and_handle_lookup_agree() {
        let universe = universe_with_ships(&[2, 5, 8]);
        let ships = universe.any_ships();

        let index = ships.find_index_for_id(Id::new(500));
        assert_eq!(index.get(), 5);
        let handle = ships.object_by_index(index).expect("present");
        assert_eq!(ships.find_index_for_object(&handle), index);
        assert!(ships.find_index_for_id(Id::new(123)).is_none());
    }

    #[test]
    fn listener_notification_fires_once_per_dirty_object() {
        let universe = universe_with_ships(&[1, 2, 3]);
        let ships = universe.any_ships();
        for value in 1..=3 {
            universe
                .ships()
                .get(Index::new(value))
                .expect("present")
                .notify_listeners();
        }

        let hits = Rc::new(Cell::new(0));
        let first = universe.ships().get(Index::new(1)).expect("present");
        let _sub = first.changed().subscribe({
            let hits = Rc::clone(&hits);
            move |()| hits.set(hits.get() + 1)
        });

        first.set_name("Aurora");
        first.set_owner(Some(PlayerId::new(4)));
        assert!(ships.notify_object_listeners());
        assert_eq!(hits.get(), 1);
        assert!(!ships.notify_object_listeners());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn fleet_indexer_keeps_only_playable_leaders() {
        let universe = universe_with_ships(&[1, 2, 3]);
        for (value, fleet, playable) in [(1, 1, true), (2, 1, true), (3, 3, false)] {
            let ship = universe.ships().get(Index::new(value)).expect("present");
            ship.set_fleet_number(Id::new(fleet * 100));
            ship.set_playable(playable);
        }

        let fleets = universe.fleets();
        assert_eq!(fleets.count_objects(), 1);
        assert_eq!(fleets.find_next_index(Index::NONE).get(), 1);
        assert!(fleets.object_by_index(Index::new(2)).is_none());
    }

    #[test]
    fn fleet_restructuring_carries_the_rehoming_hint() {
        let universe = universe_with_ships(&[1, 2]);
        let fleets = universe.fleets();
        let hint = Rc::new(Cell::new(Index::NONE));
        let _sub = fleets.set_changed().subscribe({
            let hint = Rc::clone(&hint);
            move |value| hint.set(*value)
        });

        fleets.fleet_changed(Index::new(2));
        assert_eq!(hint.get(), Index::new(2));
    }

    #[test]
    fn structural_changes_reach_indexer_subscribers() {
        let universe = Universe::new();
        let ships = universe.any_ships();
        let hits = Rc::new(Cell::new(0));
        let _sub = ships.set_changed().subscribe({
            let hits = Rc::clone(&hits);
            move |_| hits.set(hits.get() + 1)
        });

        universe
            .ships()
            .set(Index::new(1), Some(Rc::new(Ship::new(Id::new(1)))));
        universe.ships().clear();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn position_filter_narrows_without_renumbering() {
        let universe = universe_with_ships(&[1, 2, 3]);
        let shared = Point::new(70, 70);
        for value in [1, 3] {
            universe
                .ships()
                .get(Index::new(value))
                .expect("present")
                .set_position(Some(shared));
        }

        let view = universe.any_ships().filter_position(shared);
        assert_eq!(view.count_objects(), 2);
        assert_eq!(view.find_next_index(Index::NONE).get(), 1);
        assert_eq!(view.find_next_index(Index::new(1)).get(), 3);
        assert!(view.object_by_index(Index::new(2)).is_none());
        assert!(universe
            .any_ships()
            .object_by_index(Index::new(2))
            .is_some());
    }

    #[test]
    fn owner_filter_excludes_unknown_owners() {
        let universe = universe_with_ships(&[1, 2]);
        universe
            .ships()
            .get(Index::new(2))
            .expect("present")
            .set_owner(None);

        let view = universe
            .any_ships()
            .filter_owner(PlayerSet::EMPTY.with(PlayerId::new(1)));
        assert_eq!(view.count_objects(), 1);
        assert_eq!(view.find_next_index(Index::NONE).get(), 1);
    }

    #[test]
    fn unrestricted_marked_filter_is_transparent() {
        let universe = universe_with_ships(&[1, 4, 7]);
        let parent = universe.any_ships();
        let view = parent.filter_marked(false);

        let mut index = Index::NONE;
        loop {
            let from_view = view.find_next_index(index);
            let from_parent = parent.find_next_index(index);
            assert_eq!(from_view, from_parent);
            if from_view.is_none() {
                break;
            }
            index = from_view;
        }
    }

    #[test]
    fn filters_compose_and_share_the_parent_signal() {
        let universe = universe_with_ships(&[1, 2, 3]);
        let shared = Point::new(70, 70);
        universe
            .ships()
            .get(Index::new(2))
            .expect("present")
            .set_position(Some(shared));

        let view = universe
            .any_ships()
            .filter_position(shared)
            .filter_owner(PlayerSet::ALL);
        assert_eq!(view.count_objects(), 1);

        let hits = Rc::new(Cell::new(0));
        let _sub = view.set_changed().subscribe({
            let hits = Rc::clone(&hits);
            move |_| hits.set(hits.get() + 1)
        });
        universe
            .ships()
            .set(Index::new(9), Some(Rc::new(Ship::new(Id::new(900)))));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn sorted_result_breaks_comparator_ties_by_identity() {
        let universe = universe_with_ships(&[1, 2, 3]);
        let sorted = universe.any_ships().sorted(|_, _| std::cmp::Ordering::Equal);

        let mut ids = Vec::new();
        let mut index = sorted.find_next_index(Index::NONE);
        while !index.is_none() {
            ids.push(sorted.object_by_index(index).expect("resolves").id());
            index = sorted.find_next_index(index);
        }
        assert_eq!(ids, vec![Id::new(100), Id::new(200), Id::new(300)]);
    }

    #[test]
    fn sorted_result_is_a_stable_materialized_list() {
        let universe = universe_with_ships(&[1, 2]);
        let reversed = universe.any_ships().sorted(|a, b| b.id().cmp(&a.id()));
        assert_eq!(reversed.count_objects(), 2);
        assert_eq!(
            reversed
                .object_by_index(Index::new(1))
                .expect("resolves")
                .id(),
            Id::new(200)
        );

        // Later population changes do not reorder the materialized result.
        universe
            .ships()
            .set(Index::new(5), Some(Rc::new(Ship::new(Id::new(500)))));
        assert_eq!(reversed.count_objects(), 2);
    }

    #[test]
    fn sorted_result_outlives_a_temporary_view_chain() {
        let universe = universe_with_ships(&[1, 2, 3]);
        let sorted = universe
            .any_ships()
            .filter_marked(false)
            .sorted(|a, b| a.id().cmp(&b.id()));

        // The view handles above are gone; the list keeps the chain alive.
        assert_eq!(sorted.count_objects(), 3);
        assert_eq!(
            sorted.object_by_index(Index::new(1)).expect("resolves").id(),
            Id::new(100)
        );
        let list_universe = sorted.universe().expect("reachable");
        assert!(Rc::ptr_eq(&list_universe, &universe));
    }

    #[test]
    fn object_references_revalidate_on_every_access() {
        let universe = universe_with_ships(&[3]);
        let ships = universe.any_ships();
        let reference = ObjectReference::new(ships, Index::new(3));

        assert!(reference.is_valid());
        assert_eq!(reference.get().expect("resolves").id(), Id::new(300));

        universe.ships().set(Index::new(3), None);
        assert!(!reference.is_valid());
        assert!(reference.get().is_none());
        assert!(ObjectReference::invalid().get().is_none());
    }

    #[test]
    fn object_reference_equality_is_slot_identity() {
        let universe = universe_with_ships(&[1, 2]);
        let ships: Rc<dyn ObjectType> = universe.any_ships();

        let a = ObjectReference::new(Rc::clone(&ships), Index::new(1));
        let b = ObjectReference::new(Rc::clone(&ships), Index::new(1));
        let c = ObjectReference::new(ships, Index::new(2));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(ObjectReference::invalid(), ObjectReference::invalid());
        assert_ne!(a, ObjectReference::invalid());
    }

    #[test]
    fn object_list_navigates_positionally_and_skips_stale_entries() {
        let universe = universe_with_ships(&[2, 5, 8]);
        let ships = universe.any_ships();

        let list = ObjectList::new();
        list.add_object_ids(
            &universe,
            EntityKind::Ship,
            &[Id::new(800), Id::new(200), Id::new(12345)],
        );
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.object_by_index(Index::new(1)).expect("resolves").id(),
            Id::new(800)
        );

        universe.ships().set(Index::new(8), None);
        assert_eq!(list.len(), 2);
        assert!(list.object_by_index(Index::new(1)).is_none());
        assert_eq!(list.count_objects(), 1);
        assert_eq!(list.find_next_index(Index::NONE).get(), 2);

        let handle = ships.object_by_index(Index::new(2)).expect("present");
        assert_eq!(list.index_of_object(&handle).get(), 2);
        let reference = ObjectReference::new(ships, Index::new(2));
        assert_eq!(list.index_of_reference(&reference).get(), 2);
    }

    #[test]
    fn object_list_signals_on_growth_and_clear() {
        let universe = universe_with_ships(&[1]);
        let list = ObjectList::new();
        let hits = Rc::new(Cell::new(0));
        let _sub = list.set_changed().subscribe({
            let hits = Rc::clone(&hits);
            move |_| hits.set(hits.get() + 1)
        });

        list.add_index(universe.any_ships(), Index::new(1));
        list.clear();
        assert_eq!(hits.get(), 2);
        assert!(list.is_empty());
    }

    #[test]
    fn explosion_collection_merges_instead_of_duplicating() {
        let universe = Universe::new();
        let explosions = universe.explosions();
        let raised = Rc::new(Cell::new(0));
        let _sub = explosions.set_changed().subscribe({
            let raised = Rc::clone(&raised);
            move |_| raised.set(raised.get() + 1)
        });

        explosions.add(Explosion::new(Id::NONE, Point::new(100, 100)));
        let named = Explosion::new(Id::new(7), Point::new(100, 100));
        named.set_ship_name("Vostok");
        explosions.add(named);
        explosions.add(Explosion::new(Id::NONE, Point::new(300, 300)));

        assert_eq!(explosions.count_objects(), 2);
        assert_eq!(raised.get(), 2);

        let merged = explosions.object_by_index(Index::new(1)).expect("resolves");
        assert_eq!(merged.id(), Id::new(7));
    }

    #[test]
    fn explosion_collection_drains_dirty_flags_once() {
        let universe = Universe::new();
        let explosions = universe.explosions();
        explosions.add(Explosion::new(Id::new(1), Point::new(10, 10)));

        assert!(explosions.notify_object_listeners());
        assert!(!explosions.notify_object_listeners());
        explosions.clear();
        assert!(explosions.is_empty());
    }

    #[test]
    fn dropping_the_universe_invalidates_indexer_backlinks() {
        let universe = universe_with_ships(&[1]);
        let ships = universe.any_ships();
        assert!(ships.universe().is_some());

        drop(universe);
        assert!(ships.universe().is_none());
        // The indexer still works against the storage it shares.
        assert_eq!(ships.count_objects(), 1);
    }

    #[test]
    fn kind_selection_yields_the_matching_indexer() {
        let universe = universe_with_ships(&[1]);
        let _planet = add_planet(&universe, 1, 77, Point::new(5, 5));

        let ships = universe.object_type_for(EntityKind::Ship);
        let planets = universe.object_type_for(EntityKind::Planet);
        assert_eq!(
            ships.object_by_index(Index::new(1)).expect("resolves").id(),
            Id::new(100)
        );
        assert_eq!(
            planets
                .object_by_index(Index::new(1))
                .expect("resolves")
                .id(),
            Id::new(77)
        );
    }

    #[test]
    fn reference_reaches_back_to_the_universe() {
        let universe = universe_with_ships(&[1]);
        let reference = ObjectReference::new(universe.any_ships(), Index::new(1));
        let via_reference = reference.universe().expect("backlink");
        assert!(Rc::ptr_eq(&via_reference, &universe));
    }

    #[test]
    fn object_change_events_observe_the_latest_state() {
        let universe = universe_with_ships(&[1]);
        let stored = universe.ships().get(Index::new(1)).expect("present");
        let names = Rc::new(RefCell::new(Vec::new()));
        let _sub = stored.changed().subscribe({
            let names = Rc::clone(&names);
            let stored = Rc::clone(&stored);
            move |()| names.borrow_mut().push(stored.name())
        });

        stored.set_name("Aurora");
        stored.notify_listeners();
        assert_eq!(names.borrow().as_slice(), ["Aurora".to_owned()]);
    }
}

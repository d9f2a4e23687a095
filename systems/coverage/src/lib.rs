#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Scanner coverage accumulation for map rendering.
//!
//! A [`RangeSet`] collects circular coverage ranges (scanner reach, minefield
//! sweeps, visual range) keyed by center position, together with the bounding
//! box of everything added so far. The map renderer uses the box to clip its
//! redraw and the per-center radii to shade coverage. Ranges only accumulate;
//! the set is rebuilt from scratch each turn rather than edited.

use std::collections::HashMap;

use starlance_core::{Index, PlayerSet, Point};
use starlance_world::object_type::ObjectType;

/// Accumulated circular coverage ranges with their bounding box.
#[derive(Clone, Debug, Default)]
pub struct RangeSet {
    ranges: HashMap<Point, i32>,
    min: Option<Point>,
    max: Option<Point>,
}

impl RangeSet {
    /// Creates an empty range set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a circular range around the given center.
    ///
    /// A non-positive radius adds nothing. A center added twice keeps its
    /// largest radius; the bounding box never shrinks.
    pub fn add(&mut self, center: Point, radius: i32) {
        if radius <= 0 {
            return;
        }
        let low = center.offset(-radius, -radius);
        let high = center.offset(radius, radius);
        self.min = Some(match self.min {
            None => low,
            Some(min) => Point::new(min.x().min(low.x()), min.y().min(low.y())),
        });
        self.max = Some(match self.max {
            None => high,
            Some(max) => Point::new(max.x().max(high.x()), max.y().max(high.y())),
        });
        let entry = self.ranges.entry(center).or_insert(radius);
        *entry = (*entry).max(radius);
    }

    /// Adds one range per matching object of the given collection.
    ///
    /// An object matches when its position is known, its owner is known and
    /// a member of `owners`, and it is marked if `marked_only` is set.
    pub fn add_object_type(
        &mut self,
        objects: &dyn ObjectType,
        owners: PlayerSet,
        marked_only: bool,
        radius: i32,
    ) {
        let mut index = objects.find_next_index(Index::NONE);
        while !index.is_none() {
            if let Some(object) = objects.object_by_index(index) {
                let owned = object.owner().map_or(false, |owner| owners.contains(owner));
                let marked = !marked_only || object.is_marked();
                if owned && marked {
                    if let Some(position) = object.position() {
                        self.add(position, radius);
                    }
                }
            }
            index = objects.find_next_index(index);
        }
    }

    /// Drops every range and the bounding box.
    pub fn clear(&mut self) {
        self.ranges.clear();
        self.min = None;
        self.max = None;
    }

    /// Reports whether nothing has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Lower corner of the bounding box, once anything was added.
    #[must_use]
    pub fn min(&self) -> Option<Point> {
        self.min
    }

    /// Upper corner of the bounding box, once anything was added.
    #[must_use]
    pub fn max(&self) -> Option<Point> {
        self.max
    }

    /// Largest radius added around the given center; zero when none was.
    #[must_use]
    pub fn radius_at(&self, center: Point) -> i32 {
        self.ranges.get(&center).copied().unwrap_or(0)
    }

    /// Iterates over every center with its largest radius.
    pub fn iter(&self) -> impl Iterator<Item = (Point, i32)> + '_ {
        self.ranges.iter().map(|(center, radius)| (*center, *radius))
    }
}

#[cfg(test)]
mod tests {
    use super::RangeSet;
    use starlance_core::object::MapObject;
    use starlance_core::{Id, Index, PlayerId, PlayerSet, Point};
    use starlance_world::entities::Ship;
    use starlance_world::Universe;
    use std::rc::Rc;

    fn ship_at(universe: &Universe, index: i32, owner: u8, position: Point) -> Rc<Ship> {
        let ship = Rc::new(Ship::new(Id::new(index)));
        ship.set_owner(Some(PlayerId::new(owner)));
        ship.set_position(Some(position));
        universe
            .ships()
            .set(Index::new(index), Some(Rc::clone(&ship)));
        ship
    }

    #[test]
    fn first_range_seeds_the_bounding_box() {
        let mut ranges = RangeSet::new();
        assert!(ranges.is_empty());
        assert!(ranges.min().is_none());

        ranges.add(Point::new(300, 400), 100);
        assert_eq!(ranges.min(), Some(Point::new(200, 300)));
        assert_eq!(ranges.max(), Some(Point::new(400, 500)));
        assert_eq!(ranges.radius_at(Point::new(300, 400)), 100);
    }

    #[test]
    fn later_ranges_only_widen_the_box() {
        let mut ranges = RangeSet::new();
        ranges.add(Point::new(300, 400), 100);
        ranges.add(Point::new(320, 400), 10);
        assert_eq!(ranges.min(), Some(Point::new(200, 300)));
        assert_eq!(ranges.max(), Some(Point::new(400, 500)));

        ranges.add(Point::new(600, 400), 50);
        assert_eq!(ranges.max(), Some(Point::new(650, 500)));
        assert_eq!(ranges.min(), Some(Point::new(200, 300)));
    }

    #[test]
    fn repeated_centers_keep_the_largest_radius() {
        let mut ranges = RangeSet::new();
        ranges.add(Point::new(100, 100), 40);
        ranges.add(Point::new(100, 100), 25);
        assert_eq!(ranges.radius_at(Point::new(100, 100)), 40);
        ranges.add(Point::new(100, 100), 60);
        assert_eq!(ranges.radius_at(Point::new(100, 100)), 60);
    }

    #[test]
    fn non_positive_radii_add_nothing() {
        let mut ranges = RangeSet::new();
        ranges.add(Point::new(100, 100), 0);
        ranges.add(Point::new(100, 100), -5);
        assert!(ranges.is_empty());
        assert!(ranges.min().is_none());
    }

    #[test]
    fn collection_sweep_filters_by_owner_and_marker() {
        let universe = Universe::new();
        let _own = ship_at(&universe, 1, 2, Point::new(100, 100));
        let marked = ship_at(&universe, 2, 2, Point::new(500, 500));
        marked.set_marked(true);
        let _foreign = ship_at(&universe, 3, 9, Point::new(900, 900));

        let twos = PlayerSet::EMPTY.with(PlayerId::new(2));
        let ships = universe.any_ships();

        let mut all = RangeSet::new();
        all.add_object_type(ships.as_ref(), twos, false, 30);
        assert_eq!(all.radius_at(Point::new(100, 100)), 30);
        assert_eq!(all.radius_at(Point::new(500, 500)), 30);
        assert_eq!(all.radius_at(Point::new(900, 900)), 0);

        let mut marked_only = RangeSet::new();
        marked_only.add_object_type(ships.as_ref(), twos, true, 30);
        assert_eq!(marked_only.radius_at(Point::new(100, 100)), 0);
        assert_eq!(marked_only.radius_at(Point::new(500, 500)), 30);
    }

    #[test]
    fn unknown_positions_are_skipped() {
        let universe = Universe::new();
        let ghost = Rc::new(Ship::new(Id::new(4)));
        ghost.set_owner(Some(PlayerId::new(2)));
        universe.ships().set(Index::new(4), Some(ghost));

        let mut ranges = RangeSet::new();
        ranges.add_object_type(
            universe.any_ships().as_ref(),
            PlayerSet::ALL,
            false,
            30,
        );
        assert!(ranges.is_empty());
    }

    #[test]
    fn clear_resets_ranges_and_box() {
        let mut ranges = RangeSet::new();
        ranges.add(Point::new(10, 10), 5);
        ranges.clear();
        assert!(ranges.is_empty());
        assert!(ranges.min().is_none());
        assert!(ranges.max().is_none());
        assert_eq!(ranges.iter().count(), 0);
    }
}

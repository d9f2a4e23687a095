#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared vocabulary for the Starlance client object model.
//!
//! This crate defines the value types that flow between the world model and
//! the UI-facing systems: entity and collection identities, map coordinates,
//! player sets, the capability surface every indexed world object exposes
//! ([`object::MapObject`]), the single-threaded signal plumbing used for
//! change notification, and the map geometry hooks that keep distance
//! queries correct on wrap-around maps. All of these are plain data or
//! synchronous call/return constructs; anything crossing a thread boundary
//! is the responsibility of an outer proxy layer and must be copied out of
//! these types first.

pub mod geometry;
pub mod object;
pub mod signal;

use serde::{Deserialize, Serialize};

/// Identity of a world entity.
///
/// Real entities always carry a nonzero identity; [`Id::NONE`] marks an
/// unknown or unnamed entity (transient explosion reports use it until a
/// later report fills the identity in).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id(i32);

impl Id {
    /// Identity of an unknown entity.
    pub const NONE: Id = Id(0);

    /// Creates a new identity with the provided numeric value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identity.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Reports whether the identity names a real entity.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.0 != 0
    }
}

/// Position of an object within an indexed collection.
///
/// Indices are 1-based; [`Index::NONE`] is the universal sentinel meaning
/// "no object", "before first" and "after last" at once. Indices are not
/// guaranteed contiguous or stable across restructuring of the underlying
/// collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Index(i32);

impl Index {
    /// Sentinel index meaning "no object".
    pub const NONE: Index = Index(0);

    /// Creates a new index with the provided numeric value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Reports whether this is the "no object" sentinel.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }
}

/// Identity of a player participating in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// Creates a new player identity with the provided numeric value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the player identity.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Set of players, used to filter objects by ownership.
///
/// Player slots 0 through 31 are representable; the game never allocates
/// identities outside that range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSet(u32);

impl PlayerSet {
    /// The empty player set.
    pub const EMPTY: PlayerSet = PlayerSet(0);

    /// The set containing every representable player.
    pub const ALL: PlayerSet = PlayerSet(u32::MAX);

    /// Returns a copy of this set with the provided player added.
    #[must_use]
    pub const fn with(self, player: PlayerId) -> Self {
        if player.0 < 32 {
            Self(self.0 | 1 << player.0)
        } else {
            self
        }
    }

    /// Reports whether the provided player is a member of the set.
    #[must_use]
    pub const fn contains(&self, player: PlayerId) -> bool {
        player.0 < 32 && self.0 & (1 << player.0) != 0
    }

    /// Reports whether the set contains no players.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<PlayerId> for PlayerSet {
    fn from_iter<I: IntoIterator<Item = PlayerId>>(players: I) -> Self {
        players.into_iter().fold(PlayerSet::EMPTY, PlayerSet::with)
    }
}

/// Location on the star map expressed in map units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// The map origin.
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    /// Creates a new point from its coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the point.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate of the point.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the point displaced by the provided deltas, saturating at
    /// the coordinate range bounds.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Id, Index, PlayerId, PlayerSet, Point};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn id_round_trips_through_bincode() {
        assert_round_trip(&Id::new(499));
    }

    #[test]
    fn index_round_trips_through_bincode() {
        assert_round_trip(&Index::new(42));
    }

    #[test]
    fn point_round_trips_through_bincode() {
        assert_round_trip(&Point::new(1200, -2800));
    }

    #[test]
    fn player_set_round_trips_through_bincode() {
        let set = PlayerSet::EMPTY
            .with(PlayerId::new(3))
            .with(PlayerId::new(11));
        assert_round_trip(&set);
    }

    #[test]
    fn none_sentinels_are_not_known() {
        assert!(!Id::NONE.is_known());
        assert!(Index::NONE.is_none());
        assert!(Id::new(7).is_known());
        assert!(!Index::new(7).is_none());
    }

    #[test]
    fn player_set_membership_matches_insertions() {
        let set = PlayerSet::EMPTY
            .with(PlayerId::new(2))
            .with(PlayerId::new(9));
        assert!(set.contains(PlayerId::new(2)));
        assert!(set.contains(PlayerId::new(9)));
        assert!(!set.contains(PlayerId::new(3)));
        assert!(!set.is_empty());
        assert!(PlayerSet::EMPTY.is_empty());
    }

    #[test]
    fn player_set_ignores_out_of_range_slots() {
        let set = PlayerSet::EMPTY.with(PlayerId::new(40));
        assert!(set.is_empty());
        assert!(!PlayerSet::ALL.contains(PlayerId::new(40)));
    }

    #[test]
    fn player_set_collects_from_iterator() {
        let set: PlayerSet = [PlayerId::new(1), PlayerId::new(4)].into_iter().collect();
        assert!(set.contains(PlayerId::new(1)));
        assert!(set.contains(PlayerId::new(4)));
        assert!(!set.contains(PlayerId::new(2)));
    }

    #[test]
    fn point_offset_saturates_at_bounds() {
        let point = Point::new(i32::MAX - 1, 10);
        let moved = point.offset(5, -20);
        assert_eq!(moved, Point::new(i32::MAX, -10));
    }
}

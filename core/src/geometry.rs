//! Map geometry hooks for distance queries.
//!
//! Nearest-object searches go through [`MapGeometry`] so the same query
//! stays correct on a toroidal map: the map configuration owns the wrap
//! rules, the object model only consumes squared distances.

use crate::Point;

/// Distance metric supplied by the map configuration.
pub trait MapGeometry {
    /// Squared distance between two points under this map's wrap rules.
    fn squared_distance(&self, a: Point, b: Point) -> i64;
}

/// Plain Euclidean geometry for non-wrapping maps.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatGeometry;

impl MapGeometry for FlatGeometry {
    fn squared_distance(&self, a: Point, b: Point) -> i64 {
        let dx = i64::from(a.x()) - i64::from(b.x());
        let dy = i64::from(a.y()) - i64::from(b.y());
        dx * dx + dy * dy
    }
}

/// Toroidal geometry: each axis wraps at the configured map size.
#[derive(Clone, Copy, Debug)]
pub struct WrappedGeometry {
    width: i32,
    height: i32,
}

impl WrappedGeometry {
    /// Creates a wrapping geometry; dimensions are clamped to at least 1.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    fn axis_distance(delta: i64, size: i64) -> i64 {
        let wrapped = delta.rem_euclid(size);
        wrapped.min(size - wrapped)
    }
}

impl MapGeometry for WrappedGeometry {
    fn squared_distance(&self, a: Point, b: Point) -> i64 {
        let dx = Self::axis_distance(
            i64::from(a.x()) - i64::from(b.x()),
            i64::from(self.width),
        );
        let dy = Self::axis_distance(
            i64::from(a.y()) - i64::from(b.y()),
            i64::from(self.height),
        );
        dx * dx + dy * dy
    }
}

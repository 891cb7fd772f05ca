//! `Sketch`: planar profiles in the XY plane backed by `geo` multipolygons.
//!
//! Plates and text are drawn as sketches, combined with 2D boolean
//! operations, and only then extruded into solids.

use crate::float_types::Real;
use geo::{
    Area, BooleanOps, BoundingRect, Coord, MapCoords, MultiPolygon, Orient, Polygon,
    orient::Direction,
};

pub mod extrude;
pub mod shapes;
pub mod text;

#[derive(Clone, Debug, PartialEq)]
pub struct Sketch {
    pub geometry: MultiPolygon<Real>,
}

impl Default for Sketch {
    fn default() -> Self {
        Sketch {
            geometry: MultiPolygon::new(Vec::new()),
        }
    }
}

impl Sketch {
    /// Returns a new empty Sketch
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_polygon(polygon: Polygon<Real>) -> Self {
        Sketch {
            geometry: MultiPolygon::new(vec![polygon]),
        }
    }

    pub fn from_multipolygon(geometry: MultiPolygon<Real>) -> Self {
        Sketch { geometry }
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }

    /// Number of disjoint pieces (outer rings) in the profile.
    pub fn piece_count(&self) -> usize {
        self.geometry.0.len()
    }

    /// Enclosed area with holes removed.
    pub fn area(&self) -> Real {
        self.geometry.unsigned_area()
    }

    /// `[min_x, min_y, max_x, max_y]`, or `None` for an empty sketch.
    pub fn bounds(&self) -> Option<[Real; 4]> {
        self.geometry
            .bounding_rect()
            .map(|r| [r.min().x, r.min().y, r.max().x, r.max().y])
    }

    /// Return a new Sketch covering the area of either sketch.
    pub fn union(&self, other: &Sketch) -> Sketch {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Sketch::from_multipolygon(self.geometry.union(&other.geometry))
    }

    /// Return a new Sketch with the area of `other` removed.
    ///
    /// ```text
    ///     +-----------+            +-----------+
    ///     |  +-----+  |            |  +-----+  |
    ///     |  |  b  |  |   =   c    |  |     |  |
    ///     |  +-----+  |            |  +-----+  |
    ///     +-----------+            +-----------+
    /// ```
    pub fn difference(&self, other: &Sketch) -> Sketch {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        Sketch::from_multipolygon(self.geometry.difference(&other.geometry))
    }

    /// Append the pieces of `other` without resolving overlaps. Only valid
    /// when the two sketches are known to be disjoint.
    pub fn extend_disjoint(&mut self, other: Sketch) {
        self.geometry.0.extend(other.geometry.0);
    }

    /// Scale about the origin, then translate.
    pub fn scale_translate(&self, sx: Real, sy: Real, dx: Real, dy: Real) -> Sketch {
        Sketch::from_multipolygon(
            self.geometry
                .map_coords(|Coord { x, y }| Coord { x: x * sx + dx, y: y * sy + dy }),
        )
    }

    /// Exterior rings counter-clockwise, holes clockwise.
    pub fn oriented(&self) -> Sketch {
        Sketch::from_multipolygon(self.geometry.orient(Direction::Default))
    }
}

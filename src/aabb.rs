use crate::float_types::Real;
use nalgebra::Point3;

/// Axis-aligned bounding box of a solid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl Aabb {
    #[inline]
    pub const fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Tightest box around `points`, or `None` when there are no points.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<Real>>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (mut mins, mut maxs) = (first, first);
        for p in iter {
            mins = mins.inf(p);
            maxs = maxs.sup(p);
        }
        Some(Self { mins, maxs })
    }

    /// Size along x, y and z.
    #[inline]
    pub fn extents(&self) -> [Real; 3] {
        [
            self.maxs.x - self.mins.x,
            self.maxs.y - self.mins.y,
            self.maxs.z - self.mins.z,
        ]
    }

    #[inline]
    pub fn center(&self) -> Point3<Real> {
        Point3::new(
            (self.mins.x + self.maxs.x) * 0.5,
            (self.mins.y + self.maxs.y) * 0.5,
            (self.mins.z + self.maxs.z) * 0.5,
        )
    }
}

//! Triangle view shared by the mesh kernel and the STL writers.
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// One corner of an exported triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<Real>,
    pub normal: Vector3<Real>,
}

/// A triangulated 3D surface.
///
/// Anything that can present itself as a bunch of triangles in 3D
/// can automatically use all the triangle-based IO backends.
pub trait Triangulated3D {
    /// Calls `f` once per facet, corners in counter-clockwise order
    /// seen from outside, each carrying the facet normal.
    fn visit_triangles<F>(&self, f: F)
    where
        F: FnMut([Vertex; 3]);
}

//! `Mesh`: an indexed triangle mesh for the solids the kernel produces.
//!
//! Vertices are shared by index, so two triangles meet along an edge exactly
//! when they reference the same pair of vertex indices. Watertightness is
//! checked on those indices (see [`manifold`]), never on quantized coordinates.

use crate::aabb::Aabb;
use crate::float_types::Real;
use crate::triangulated::{Triangulated3D, Vertex};
use nalgebra::{Point3, Vector3};
use std::sync::OnceLock;

pub mod manifold;

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Vertex positions in millimetres
    pub vertices: Vec<Point3<Real>>,

    /// Counter-clockwise (outward-facing) triangles as vertex indices
    pub triangles: Vec<[usize; 3]>,

    /// Lazily calculated AABB that spans `vertices`.
    bounding_box: OnceLock<Aabb>,
}

impl Mesh {
    /// Returns a new empty Mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a Mesh from existing vertex and triangle lists.
    pub fn from_parts(vertices: Vec<Point3<Real>>, triangles: Vec<[usize; 3]>) -> Self {
        Mesh {
            vertices,
            triangles,
            bounding_box: OnceLock::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Positions of the three corners of triangle `index`.
    pub fn triangle(&self, index: usize) -> [Point3<Real>; 3] {
        let [a, b, c] = self.triangles[index];
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    /// Unit facet normal from the winding of the triangle; zero for slivers.
    pub fn facet_normal(&self, index: usize) -> Vector3<Real> {
        let [a, b, c] = self.triangle(index);
        let n = (b - a).cross(&(c - a));
        n.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
    }

    /// **Mathematical Foundation: Divergence Theorem**
    ///
    /// The enclosed volume of a closed, outward-oriented triangle surface is
    /// the sum of the signed volumes of the tetrahedra spanned by the origin
    /// and each triangle:
    ///
    /// ```text
    /// V = 1/6 · Σ v0 · (v1 × v2)
    /// ```
    ///
    /// The result is only meaningful when the mesh is watertight; an inward
    /// oriented surface yields a negative volume.
    pub fn volume(&self) -> Real {
        self.triangles
            .iter()
            .map(|&[a, b, c]| {
                let (v0, v1, v2) = (
                    self.vertices[a].coords,
                    self.vertices[b].coords,
                    self.vertices[c].coords,
                );
                v0.dot(&v1.cross(&v2))
            })
            .sum::<Real>()
            / 6.0
    }

    /// Total area of all triangles.
    pub fn surface_area(&self) -> Real {
        (0..self.triangles.len())
            .map(|i| {
                let [a, b, c] = self.triangle(i);
                (b - a).cross(&(c - a)).norm() * 0.5
            })
            .sum()
    }

    /// Returns an [`Aabb`] indicating the 3D bounds of all vertices in use.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            Aabb::from_points(&self.vertices)
                .unwrap_or_else(|| Aabb::new(Point3::origin(), Point3::origin()))
        })
    }

    /// Place both meshes into one vertex/triangle buffer without any boolean
    /// resolution. Used for previews of solids that only touch.
    pub fn merge(&self, other: &Mesh) -> Mesh {
        let offset = self.vertices.len();
        let mut vertices = Vec::with_capacity(offset + other.vertices.len());
        vertices.extend_from_slice(&self.vertices);
        vertices.extend_from_slice(&other.vertices);

        let mut triangles = Vec::with_capacity(self.triangles.len() + other.triangles.len());
        triangles.extend_from_slice(&self.triangles);
        triangles.extend(
            other
                .triangles
                .iter()
                .map(|&[a, b, c]| [a + offset, b + offset, c + offset]),
        );

        Mesh::from_parts(vertices, triangles)
    }
}

impl Triangulated3D for Mesh {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        for i in 0..self.triangles.len() {
            let normal = self.facet_normal(i);
            let corners = self.triangle(i);
            f(corners.map(|position| Vertex { position, normal }));
        }
    }
}

//! Linear extrusion of a `Sketch` into a closed indexed `Mesh`.

use crate::float_types::{AREA_EPSILON, EPSILON, Real};
use crate::mesh::Mesh;
use crate::sketch::Sketch;
use geo::{Coord, LineString, Polygon as GeoPolygon, Triangle, TriangulateEarcut, TriangulateSpade};
use hashbrown::HashMap;
use log::debug;
use nalgebra::Point3;

/// Sine of the largest angle still treated as a straight continuation.
const COLLINEAR_TOLERANCE: Real = 1e-10;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtrudeError {
    #[error("extrusion height must be positive and finite, got {0}")]
    InvalidHeight(Real),
    #[error("profile contains a NaN or infinite coordinate")]
    InvalidCoordinate,
    #[error("could not triangulate a cap covering {area} mm²")]
    Triangulation { area: Real },
}

impl Sketch {
    /// Extrude the profile along +z from `z0` to `z0 + height`.
    ///
    /// Each point becomes a bottom/top vertex pair shared by the caps and the
    /// side walls. Walls are raised on the boundary edges of the cap
    /// triangulation itself, so every cap edge is matched by exactly one wall
    /// quad and the result is closed even where the triangulation splits a
    /// ring edge.
    ///
    /// Polygons or holes that collapse to fewer than three points after
    /// removing duplicate and collinear points are dropped.
    pub fn extrude(&self, z0: Real, height: Real) -> Result<Mesh, ExtrudeError> {
        if !height.is_finite() || height <= 0.0 {
            return Err(ExtrudeError::InvalidHeight(height));
        }
        let z1 = z0 + height;

        let mut vertices = Vec::new();
        let mut triangles = Vec::new();

        for polygon in &self.oriented().geometry.0 {
            let Some(exterior) = clean_ring(polygon.exterior())? else {
                continue;
            };
            if ring_area(&exterior).abs() <= AREA_EPSILON {
                continue;
            }
            let mut rings = vec![exterior];
            for hole in polygon.interiors() {
                if let Some(ring) = clean_ring(hole)? {
                    rings.push(ring);
                }
            }
            extrude_rings(&rings, z0, z1, &mut vertices, &mut triangles)?;
        }

        Ok(Mesh::from_parts(vertices, triangles))
    }
}

fn coord_key(c: &Coord<Real>) -> (u64, u64) {
    (c.x.to_bits(), c.y.to_bits())
}

/// Cap triangles of `polygon`, counter-clockwise, or `None` when they do not
/// tile `area`. The constrained Delaunay triangulation keeps every ring edge;
/// ear clipping is the fallback when it cannot be built.
fn triangulate_cap(polygon: &GeoPolygon<Real>, area: Real) -> Option<Vec<[Coord<Real>; 3]>> {
    let covers = |tris: &[[Coord<Real>; 3]]| {
        let total: Real = tris.iter().map(|&[a, b, c]| cross(a, b, c) * 0.5).sum();
        (total - area).abs() <= AREA_EPSILON.max(area.abs() * 1e-9)
    };
    let oriented = |tris: Vec<Triangle<Real>>| -> Vec<[Coord<Real>; 3]> {
        tris.into_iter()
            .filter_map(|t| {
                let twice = cross(t.0, t.1, t.2);
                if twice > 0.0 {
                    Some([t.0, t.1, t.2])
                } else if twice < 0.0 {
                    Some([t.0, t.2, t.1])
                } else {
                    None
                }
            })
            .collect()
    };

    if let Ok(tris) = polygon.constrained_triangulation(Default::default()) {
        let tris = oriented(tris);
        if covers(&tris) {
            return Some(tris);
        }
        debug!("constrained cap does not cover the profile, falling back to ear clipping");
    }
    let tris = oriented(polygon.earcut_triangles());
    covers(&tris).then_some(tris)
}

fn extrude_rings(
    rings: &[Vec<Coord<Real>>],
    z0: Real,
    z1: Real,
    vertices: &mut Vec<Point3<Real>>,
    triangles: &mut Vec<[usize; 3]>,
) -> Result<(), ExtrudeError> {
    let mut ring_iter = rings.iter().map(|r| LineString::from(r.clone()));
    let Some(outer) = ring_iter.next() else {
        return Ok(());
    };
    let polygon = GeoPolygon::new(outer, ring_iter.collect());
    // exterior counter-clockwise, holes clockwise
    let area: Real = rings.iter().map(|r| ring_area(r)).sum();
    let cap = triangulate_cap(&polygon, area).ok_or(ExtrudeError::Triangulation { area })?;

    // Bottom vertex at `id`, its top twin at `id + 1`. Points repeated across
    // rings (pinches) share one pair; points the triangulation adds get their own.
    let mut index_of: HashMap<(u64, u64), usize> = HashMap::new();
    let mut vertex_pair = |c: &Coord<Real>| {
        *index_of.entry(coord_key(c)).or_insert_with(|| {
            let id = vertices.len();
            vertices.push(Point3::new(c.x, c.y, z0));
            vertices.push(Point3::new(c.x, c.y, z1));
            id
        })
    };
    for c in rings.iter().flatten() {
        vertex_pair(c);
    }
    let cap: Vec<[usize; 3]> = cap
        .iter()
        .map(|[a, b, c]| [vertex_pair(a), vertex_pair(b), vertex_pair(c)])
        .filter(|[a, b, c]| a != b && b != c && c != a)
        .collect();

    // Net use of each undirected cap edge: +1 walked low to high, -1 high to low.
    // Interior edges cancel; what remains is the cap boundary.
    let mut net: HashMap<(usize, usize), i64> = HashMap::new();
    for &[a, b, c] in &cap {
        for (from, to) in [(a, b), (b, c), (c, a)] {
            let (key, dir) = if from < to { ((from, to), 1) } else { ((to, from), -1) };
            *net.entry(key).or_insert(0) += dir;
        }
    }

    for &[a, b, c] in &cap {
        triangles.push([a + 1, b + 1, c + 1]);
        triangles.push([a, c, b]);
    }

    // side walls on boundary edges, interior to the left
    for &[a, b, c] in &cap {
        for (from, to) in [(a, b), (b, c), (c, a)] {
            let (key, dir) = if from < to { ((from, to), 1) } else { ((to, from), -1) };
            let Some(count) = net.get_mut(&key) else {
                continue;
            };
            if *count * dir <= 0 {
                continue;
            }
            for _ in 0..count.abs() {
                triangles.push([from, to, to + 1]);
                triangles.push([from, to + 1, from + 1]);
            }
            *count = 0;
        }
    }

    Ok(())
}

/// Drops the closing point, repeated points and collinear points. Returns
/// `None` when fewer than three points remain.
fn clean_ring(ring: &LineString<Real>) -> Result<Option<Vec<Coord<Real>>>, ExtrudeError> {
    let mut pts: Vec<Coord<Real>> = ring.0.clone();
    if pts.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(ExtrudeError::InvalidCoordinate);
    }
    if pts.len() > 1 && near(pts[0], pts[pts.len() - 1]) {
        pts.pop();
    }
    pts.dedup_by(|a, b| near(*a, *b));

    loop {
        let n = pts.len();
        if n < 3 {
            return Ok(None);
        }
        let redundant = (0..n).find(|&i| {
            let (prev, cur, next) = (pts[(i + n - 1) % n], pts[i], pts[(i + 1) % n]);
            if near(prev, cur) || near(cur, next) {
                return true;
            }
            let l1 = ((cur.x - prev.x).powi(2) + (cur.y - prev.y).powi(2)).sqrt();
            let l2 = ((next.x - cur.x).powi(2) + (next.y - cur.y).powi(2)).sqrt();
            cross(prev, cur, next).abs() <= COLLINEAR_TOLERANCE * l1 * l2
        });
        match redundant {
            Some(i) => {
                pts.remove(i);
            },
            None => return Ok(Some(pts)),
        }
    }
}

#[inline]
fn near(a: Coord<Real>, b: Coord<Real>) -> bool {
    (a.x - b.x).abs() <= EPSILON && (a.y - b.y).abs() <= EPSILON
}

/// Twice the signed area of triangle `abc`.
#[inline]
fn cross(a: Coord<Real>, b: Coord<Real>, c: Coord<Real>) -> Real {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Shoelace area of an open ring.
fn ring_area(ring: &[Coord<Real>]) -> Real {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<Real>()
        * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_extrudes_to_closed_box() {
        let mesh = Sketch::rectangle(4.0, 2.0).extrude(1.0, 3.0).unwrap();
        assert!(mesh.is_watertight());
        assert!((mesh.volume() - 24.0).abs() < 1e-9);
        // 2 cap triangles top + bottom, 4 walls of 2 triangles
        assert_eq!(mesh.triangle_count(), 12);
        let bb = mesh.bounding_box();
        assert!((bb.mins.z - 1.0).abs() < 1e-12);
        assert!((bb.maxs.z - 4.0).abs() < 1e-12);
    }

    #[test]
    fn collinear_points_are_removed() {
        let ring = LineString::from(vec![
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (0.0, 2.0),
            (0.0, 0.0),
        ]);
        let cleaned = clean_ring(&ring).unwrap().unwrap();
        assert_eq!(cleaned.len(), 4);
    }

    #[test]
    fn sliver_ring_is_dropped() {
        let ring = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 0.0)]);
        assert_eq!(clean_ring(&ring).unwrap(), None);
    }

    #[test]
    fn non_positive_height_is_rejected() {
        let err = Sketch::rectangle(1.0, 1.0).extrude(0.0, 0.0).unwrap_err();
        assert_eq!(err, ExtrudeError::InvalidHeight(0.0));
    }

    #[test]
    fn plate_with_hole_is_closed() {
        let plate = Sketch::rectangle(10.0, 10.0);
        let hole = Sketch::rectangle(4.0, 4.0);
        let mesh = plate.difference(&hole).extrude(0.0, 1.0).unwrap();
        let analysis = mesh.analyze_manifold();
        assert!(analysis.is_watertight(), "{analysis:?}");
        assert!((mesh.volume() - 84.0).abs() < 1e-6);
        assert_eq!(analysis.connected_components, 1);
    }

    #[test]
    fn holes_with_aligned_edges_stay_closed() {
        // bars of neighbouring letters share their top and bottom lines
        let mut holes = Sketch::new();
        for x in [-12.0, -4.0, 4.0, 12.0] {
            holes = holes.union(&Sketch::rectangle(3.0, 1.0).scale_translate(1.0, 1.0, x, 3.0));
            holes = holes.union(&Sketch::rectangle(1.0, 7.0).scale_translate(1.0, 1.0, x, 0.0));
        }
        let cut = Sketch::rectangle(40.0, 10.0).difference(&holes);
        let mesh = cut.extrude(1.0, 0.2).unwrap();
        let analysis = mesh.analyze_manifold();
        assert!(analysis.is_watertight(), "{analysis:?}");
        assert!((mesh.volume() - cut.area() * 0.2).abs() < 1e-9);
    }

    #[test]
    fn every_ring_point_is_on_the_cap() {
        let cut = Sketch::rectangle(10.0, 10.0).difference(&Sketch::rectangle(2.0, 2.0));
        let mesh = cut.extrude(0.0, 1.0).unwrap();
        let used: hashbrown::HashSet<usize> = mesh.triangles.iter().flatten().copied().collect();
        assert_eq!(used.len(), mesh.vertices.len());
    }
}

//! Closedness and topology analysis for indexed meshes

use crate::mesh::Mesh;
use hashbrown::HashMap;

/// Edge and shell statistics of a [`Mesh`].
///
/// An undirected edge is *open* when the number of triangles walking it in one
/// direction differs from the number walking it in the other. A closed,
/// consistently oriented surface has no open edges. Edges used by more than
/// two triangles are counted separately: they still close the surface (pinch
/// points between touching cutouts) but are not 2-manifold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifoldAnalysis {
    /// Edges whose two directions are not used equally often
    pub open_edges: usize,
    /// Edges shared by more than two triangles
    pub non_manifold_edges: usize,
    /// Triangles that repeat a vertex index
    pub degenerate_triangles: usize,
    /// Number of edge-connected shells
    pub connected_components: usize,
    /// Euler characteristic (V - E + F) over referenced vertices
    pub euler_characteristic: i64,
}

impl ManifoldAnalysis {
    /// Closed and consistently oriented, with at least one triangle.
    pub fn is_watertight(&self) -> bool {
        self.open_edges == 0 && self.degenerate_triangles == 0 && self.connected_components > 0
    }
}

impl Mesh {
    /// Counts open, non-manifold and degenerate features and the number of shells.
    pub fn analyze_manifold(&self) -> ManifoldAnalysis {
        // (lo, hi) -> (lo->hi uses, hi->lo uses)
        let mut edges: HashMap<(usize, usize), (u32, u32)> = HashMap::new();
        let mut degenerate_triangles = 0;
        let mut shells = DisjointSet::new(self.vertices.len());

        for &[a, b, c] in &self.triangles {
            if a == b || b == c || c == a {
                degenerate_triangles += 1;
                continue;
            }
            for (from, to) in [(a, b), (b, c), (c, a)] {
                let entry = if from < to {
                    &mut edges.entry((from, to)).or_insert((0, 0)).0
                } else {
                    &mut edges.entry((to, from)).or_insert((0, 0)).1
                };
                *entry += 1;
                shells.union(from, to);
            }
        }

        let open_edges = edges.values().filter(|(f, b)| f != b).count();
        let non_manifold_edges = edges.values().filter(|(f, b)| f + b > 2).count();

        let mut used = vec![false; self.vertices.len()];
        for &[a, b, c] in &self.triangles {
            used[a] = true;
            used[b] = true;
            used[c] = true;
        }
        let used_vertices = used.iter().filter(|&&u| u).count();
        let connected_components = (0..self.vertices.len())
            .filter(|&v| used[v] && shells.find(v) == v)
            .count();

        ManifoldAnalysis {
            open_edges,
            non_manifold_edges,
            degenerate_triangles,
            connected_components,
            euler_characteristic: used_vertices as i64 - edges.len() as i64
                + (self.triangles.len() - degenerate_triangles) as i64,
        }
    }

    /// Returns `true` if every edge is walked equally often in both directions
    /// and no triangle is degenerate.
    pub fn is_watertight(&self) -> bool {
        self.analyze_manifold().is_watertight()
    }
}

/// Union-find over vertex indices with path halving.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut v: usize) -> usize {
        while self.parent[v] != v {
            self.parent[v] = self.parent[self.parent[v]];
            v = self.parent[v];
        }
        v
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[rb.max(ra)] = rb.min(ra);
        }
    }
}

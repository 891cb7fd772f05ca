//! 2D Shapes as `Sketch`s

use crate::float_types::{EPSILON, FRAC_PI_2, PI, Real};
use crate::sketch::Sketch;
use geo::{LineString, Polygon as GeoPolygon, line_string};

impl Sketch {
    /// Creates a 2D rectangle centred on the origin.
    ///
    /// # Example
    /// ```
    /// # use stencil_sign::sketch::Sketch;
    /// let plate = Sketch::rectangle(100.0, 25.0);
    /// assert!((plate.area() - 2500.0).abs() < 1e-9);
    /// ```
    pub fn rectangle(width: Real, height: Real) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        let outer = line_string![
            (x: -hw, y: -hh),
            (x:  hw, y: -hh),
            (x:  hw, y:  hh),
            (x: -hw, y:  hh),
            (x: -hw, y: -hh),
        ];
        Sketch::from_polygon(GeoPolygon::new(outer, vec![]))
    }

    /// Rectangle centred on the origin whose four corners are replaced by
    /// quarter arcs of `corner_radius`, each approximated by `corner_segments`
    /// chords. The radius is capped at half the shorter side.
    pub fn rounded_rectangle(
        width: Real,
        height: Real,
        corner_radius: Real,
        corner_segments: usize,
    ) -> Self {
        let r = corner_radius.min(width * 0.5).min(height * 0.5);
        if r <= EPSILON || corner_segments == 0 {
            return Sketch::rectangle(width, height);
        }
        let (hw, hh) = (width * 0.5, height * 0.5);
        let step = FRAC_PI_2 / corner_segments as Real;

        let corner = |cx: Real, cy: Real, start_angle: Real| {
            (0..=corner_segments).map(move |i| {
                let angle = start_angle + (i as Real) * step;
                (cx + r * angle.cos(), cy + r * angle.sin())
            })
        };

        let mut coords: Vec<(Real, Real)> = corner(-hw + r, -hh + r, PI) // Bottom-left
            .chain(corner(hw - r, -hh + r, 1.5 * PI)) // Bottom-right
            .chain(corner(hw - r, hh - r, 0.0)) // Top-right
            .chain(corner(-hw + r, hh - r, 0.5 * PI)) // Top-left
            .collect();

        // Adjacent arcs meet in a single point when r is exactly half a side.
        let same = |a: &(Real, Real), b: &(Real, Real)| {
            (a.0 - b.0).abs() <= EPSILON && (a.1 - b.1).abs() <= EPSILON
        };
        coords.dedup_by(|a, b| same(a, b));
        if coords.len() > 1 && same(&coords[0], &coords[coords.len() - 1]) {
            coords.pop();
        }
        coords.push(coords[0]);

        Sketch::from_polygon(GeoPolygon::new(LineString::from(coords), vec![]))
    }
}

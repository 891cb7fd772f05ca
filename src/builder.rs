//! Constructing the two printable layers.
//!
//! ```text
//!   z = bottom + top  +----+   +----+   +----+   top plate, text cut through
//!                     |    |   |    |   |    |
//!   z = bottom        +====+===+====+===+====+   base plate
//!                     |                      |
//!   z = 0             +----------------------+
//! ```
//!
//! Both layers share the rounded plate outline. The top plate is the outline
//! minus the text profile, computed as a 2D boolean and then extruded, so the
//! cutout walls are exact and both solids are closed by construction.

use crate::errors::{GenerationError, ParamEcho};
use crate::float_types::{AREA_EPSILON, EPSILON, Real};
use crate::heaviness::RenderProfile;
use crate::kernel::KernelHandle;
use crate::mesh::Mesh;
use crate::params::SignSpec;
use crate::sizing::SizingResult;
use crate::sketch::text::TextLayout;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Construction options that do not change what the sign looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Chords per rounded plate corner.
    pub corner_segments: usize,
    /// Also produce a merged mesh of both layers for previewing.
    pub combined_preview: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            corner_segments: 8,
            combined_preview: true,
        }
    }
}

/// Figures about the built layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerStats {
    pub base_volume_mm3: Real,
    pub top_volume_mm3: Real,
    /// Plate area removed by the text cutout.
    pub removed_area_mm2: Real,
    /// Disjoint pieces the top plate consists of (letter counters are islands).
    pub top_fragments: usize,
}

/// The builder's output. Owned by the caller and handed by value to a sink.
#[derive(Debug, Clone)]
pub struct GeneratedLayers {
    pub base: Mesh,
    pub top: Mesh,
    pub combined_preview: Option<Mesh>,
    pub stats: LayerStats,
}

/// Build the base and the cut top plate for `spec`.
///
/// The text is rendered at `sizing.resolved_font_size_mm` with the face of
/// `profile.font_kind`. Fails with [`GenerationError::EmptyTopLayer`] when the
/// cut leaves no material, and with [`GenerationError::GeometryOperationFailed`]
/// when either extrusion is not a closed solid.
///
/// Blocks until `kernel` is free and holds it for the whole construction.
pub fn build_layers(
    kernel: &KernelHandle,
    spec: &SignSpec,
    sizing: &SizingResult,
    profile: &RenderProfile,
    options: &BuildOptions,
) -> Result<GeneratedLayers, GenerationError> {
    kernel.acquire().run("layer construction", |kernel| {
        let started = Instant::now();
        let (bottom, top) = (spec.bottom_thickness_mm(), spec.top_thickness_mm());

        let plate = kernel.plate_profile(
            spec.width_mm(),
            spec.height_mm(),
            spec.corner_radius_mm(),
            options.corner_segments,
        );
        let base = kernel.extrude("base plate extrusion", &plate, 0.0, bottom)?;
        let base_check = base.analyze_manifold();
        let base_volume = base.volume();
        if !base_check.is_watertight() || base_volume <= EPSILON {
            return Err(GenerationError::GeometryOperationFailed {
                operation: "base plate extrusion",
                details: format!("base plate is not a closed solid: {base_check:?}, volume {base_volume}"),
            });
        }

        let layout = TextLayout::new(
            sizing.resolved_font_size_mm,
            sizing.width_ratio,
            profile.font_kind,
        );
        let text = kernel.text_profile(spec.lines(), &layout);
        if text.is_empty() {
            return Err(GenerationError::GeometryOperationFailed {
                operation: "text layout",
                details: format!("no renderable glyphs in {:?}", spec.text()),
            });
        }

        let cut = plate.difference(&text);
        let removed = plate.area() - cut.area();
        let echo = || ParamEcho {
            text: spec.text(),
            width_mm: spec.width_mm(),
            height_mm: spec.height_mm(),
            heaviness: spec.heaviness(),
            weight: profile.bucket,
            font_size_mm: sizing.resolved_font_size_mm,
            top_thickness_mm: top,
        };
        if cut.is_empty() || cut.area() <= AREA_EPSILON {
            return Err(GenerationError::EmptyTopLayer {
                params: echo(),
                detail: "the text covers the whole plate".to_string(),
            });
        }

        let top_mesh = kernel.extrude("top plate extrusion", &cut, bottom, top)?;
        let top_check = top_mesh.analyze_manifold();
        let top_volume = top_mesh.volume();
        if top_mesh.is_empty() || top_volume <= EPSILON {
            return Err(GenerationError::EmptyTopLayer {
                params: echo(),
                detail: format!("the cut top plate has no volume ({top_volume:.3e} mm³)"),
            });
        }
        if !top_check.is_watertight() {
            return Err(GenerationError::GeometryOperationFailed {
                operation: "top plate extrusion",
                details: format!(
                    "the cut top plate is not closed ({} open edges, {} degenerate triangles)",
                    top_check.open_edges, top_check.degenerate_triangles
                ),
            });
        }

        let stats = LayerStats {
            base_volume_mm3: base_volume,
            top_volume_mm3: top_volume,
            removed_area_mm2: removed,
            top_fragments: cut.piece_count(),
        };
        debug!(
            "layers built in {:?}: base {:.1} mm³, top {:.1} mm³ in {} piece(s), {} triangles",
            started.elapsed(),
            stats.base_volume_mm3,
            stats.top_volume_mm3,
            stats.top_fragments,
            base.triangle_count() + top_mesh.triangle_count(),
        );

        let combined_preview = options.combined_preview.then(|| base.merge(&top_mesh));
        Ok(GeneratedLayers {
            base,
            top: top_mesh,
            combined_preview,
            stats,
        })
    })
}

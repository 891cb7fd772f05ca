//! Pre-flight prediction of whether the text will cut the top layer apart.
//!
//! The score is a sum of independent terms, each bounded and each
//! non-decreasing in heaviness for fixed text and plate:
//!
//! | term       | grows with                                   | max |
//! |------------|----------------------------------------------|-----|
//! | coverage   | estimated ink area over plate area           | 45  |
//! | multiplier | bucket size multiplier                       | 25  |
//! | thickness  | thinness of the top layer                    | 30  |
//! | feature    | strokes thinner than the printable minimum   | 15  |
//! | floor      | the solver had to clamp to its minimum size  | 10  |
//!
//! The prediction is advisory; generation always proceeds.

use crate::float_types::Real;
use crate::font::FontKind;
use crate::font::face::ROWS;
use crate::heaviness::RenderProfile;
use crate::params::SignSpec;
use crate::sizing::SizingResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CutThroughPrediction {
    pub will_fail: bool,
    pub confidence_percent: u8,
    pub reason: String,
}

/// Weights and reference points of the scoring terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorTuning {
    /// Share of a line's bounding box inked by the regular face.
    pub coverage_regular: Real,
    /// Share of a line's bounding box inked by the bold face.
    pub coverage_bold: Real,
    /// Coverage at which the coverage term saturates.
    pub critical_coverage: Real,
    pub coverage_weight: Real,
    /// Multipliers mapped to 0 and to the full multiplier weight.
    pub multiplier_range: (Real, Real),
    pub multiplier_weight: Real,
    /// Top thickness at or below which the thickness term saturates.
    pub reference_thickness_mm: Real,
    pub thickness_weight: Real,
    /// Thinnest stroke that still prints reliably.
    pub min_feature_mm: Real,
    pub feature_weight: Real,
    pub floor_penalty: Real,
    /// Confidence at or above which failure is predicted.
    pub threshold_percent: u8,
}

impl Default for PredictorTuning {
    fn default() -> Self {
        Self {
            coverage_regular: 0.40,
            coverage_bold: 0.55,
            critical_coverage: 0.5,
            coverage_weight: 45.0,
            multiplier_range: (0.90, 1.30),
            multiplier_weight: 25.0,
            reference_thickness_mm: 0.4,
            thickness_weight: 30.0,
            min_feature_mm: 0.8,
            feature_weight: 15.0,
            floor_penalty: 10.0,
            threshold_percent: 70,
        }
    }
}

impl PredictorTuning {
    pub const fn coverage_constant(&self, kind: FontKind) -> Real {
        match kind {
            FontKind::Regular => self.coverage_regular,
            FontKind::Bold => self.coverage_bold,
        }
    }
}

#[inline]
fn unit(x: Real) -> Real {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Scores the risk that cutting `sizing`'s text through the top plate leaves
/// no usable layer.
pub fn predict(
    spec: &SignSpec,
    sizing: &SizingResult,
    profile: &RenderProfile,
    tuning: &PredictorTuning,
) -> CutThroughPrediction {
    let size = sizing.resolved_font_size_mm;
    let ink_area = size
        * sizing.estimated_text_width_mm
        * sizing.line_count as Real
        * tuning.coverage_constant(profile.font_kind)
        * (1.0 + Real::from(spec.heaviness()) / 100.0);
    let coverage = ink_area / spec.plate_area_mm2();

    let (m_lo, m_hi) = tuning.multiplier_range;
    let stroke = size / ROWS as Real;
    let terms = [
        (
            "text covers much of the plate",
            tuning.coverage_weight * unit(coverage / tuning.critical_coverage),
        ),
        (
            "heavy weight",
            tuning.multiplier_weight * unit((profile.size_multiplier - m_lo) / (m_hi - m_lo)),
        ),
        (
            "thin top layer",
            tuning.thickness_weight
                * unit(tuning.reference_thickness_mm / spec.top_thickness_mm()),
        ),
        (
            "strokes below the printable minimum",
            tuning.feature_weight * unit((tuning.min_feature_mm - stroke) / tuning.min_feature_mm),
        ),
        (
            "font clamped to the minimum size",
            if sizing.floor_clamped { tuning.floor_penalty } else { 0.0 },
        ),
    ];

    let score: Real = terms.iter().map(|(_, v)| v).sum();
    let confidence_percent = score.round().clamp(0.0, 100.0) as u8;
    let will_fail = confidence_percent >= tuning.threshold_percent;

    // the largest contributors, strongest first
    let mut ranked: Vec<_> = terms.iter().filter(|(_, v)| *v >= 5.0).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    let contributors: Vec<String> = ranked
        .iter()
        .take(3)
        .map(|(label, v)| format!("{label} (+{v:.0})"))
        .collect();
    let reason = format!(
        "{}; coverage {:.0}%",
        if contributors.is_empty() {
            "no significant risk factors".to_string()
        } else {
            contributors.join(", ")
        },
        coverage * 100.0
    );

    CutThroughPrediction {
        will_fail,
        confidence_percent,
        reason,
    }
}

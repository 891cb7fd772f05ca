//! Resolving the font size of a sign.
//!
//! Auto-sizing takes the largest size at which the longest line fits in 75% of
//! the plate width and all lines fit in 60% of the plate height. Heavier text
//! is wider per character, so heaviness shrinks the auto size.

use crate::float_types::Real;
use crate::font::metrics;
use crate::params::SignSpec;
use log::debug;
use serde::Serialize;

/// Share of the plate width the longest line may use.
pub const WIDTH_USAGE: Real = 0.75;
/// Share of the plate height available to each of the lines.
pub const HEIGHT_USAGE: Real = 0.6;
/// Extra width ratio at heaviness 100.
pub const HEAVINESS_WIDTH_GAIN: Real = 0.15;
/// Smallest font size the solver will produce.
pub const MIN_FONT_SIZE_MM: Real = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingResult {
    pub resolved_font_size_mm: Real,
    pub line_count: usize,
    pub estimated_text_width_mm: Real,
    pub longest_line_chars: usize,
    /// Family ratio widened by heaviness.
    pub width_ratio: Real,
    /// The auto size fell below [`MIN_FONT_SIZE_MM`] and was raised to it.
    pub floor_clamped: bool,
    pub auto_sized: bool,
    pub warnings: Vec<String>,
}

/// Effective character width ratio of `spec`'s family at its heaviness.
pub fn effective_width_ratio(spec: &SignSpec) -> Real {
    metrics::width_ratio(spec.font_family())
        + Real::from(spec.heaviness()) / 100.0 * HEAVINESS_WIDTH_GAIN
}

/// Pure function of `spec`: identical specs give bit-identical results.
pub fn solve(spec: &SignSpec) -> SizingResult {
    let width_ratio = effective_width_ratio(spec);
    let longest = spec.longest_line_chars().max(1);
    let line_count = spec.line_count().max(1);
    let usable_width = spec.width_mm() * WIDTH_USAGE;

    let mut warnings = Vec::new();
    let mut floor_clamped = false;

    let resolved = match spec.font_size_mm() {
        Some(size) => size,
        None => {
            let by_width = usable_width / (longest as Real * width_ratio);
            let by_height = spec.height_mm() * HEIGHT_USAGE / line_count as Real;
            let size = by_width.min(by_height);
            debug!("auto size: {by_width:.3} mm by width, {by_height:.3} mm by height");
            if size < MIN_FONT_SIZE_MM {
                floor_clamped = true;
                warnings.push(format!(
                    "text needs a {size:.2} mm font to fit; raised to the {MIN_FONT_SIZE_MM} mm minimum, \
                     so the result is low confidence and may overflow the plate"
                ));
                MIN_FONT_SIZE_MM
            } else {
                size
            }
        },
    };

    let estimated = longest as Real * resolved * width_ratio;
    if spec.font_size_mm().is_some() && estimated > usable_width {
        warnings.push(format!(
            "text is about {estimated:.0} mm wide at {resolved} mm, more than the {usable_width:.0} mm available"
        ));
    }

    SizingResult {
        resolved_font_size_mm: resolved,
        line_count,
        estimated_text_width_mm: estimated,
        longest_line_chars: longest,
        width_ratio,
        floor_clamped,
        auto_sized: spec.font_size_mm().is_none(),
        warnings,
    }
}

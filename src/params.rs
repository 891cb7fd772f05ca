//! The parameter model: raw requests, limits, and the validated `SignSpec`.
//!
//! A [`SignSpec`] can only be obtained from [`SignRequest::validate`], so every
//! downstream stage may assume its values are in range.

use crate::errors::{Field, ValidationError, Violation};
use crate::float_types::{Real, in_range};
use crate::font::{FontFamily, face};
use log::debug;
use serde::{Deserialize, Serialize};

/// A sign as requested by a user, before any checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignRequest {
    /// One or more lines separated by `\n`.
    pub text: String,
    pub width_mm: Real,
    pub height_mm: Real,
    /// 0 (light) to 100 (extra bold). Signed so out-of-range input can be reported.
    pub heaviness: i64,
    pub bottom_thickness_mm: Real,
    pub top_thickness_mm: Real,
    pub font_family: String,
    /// `None` sizes the text to fit the plate.
    pub font_size_mm: Option<Real>,
    pub corner_radius_mm: Real,
}

impl Default for SignRequest {
    fn default() -> Self {
        Self {
            text: "LABEL".to_string(),
            width_mm: 100.0,
            height_mm: 25.0,
            heaviness: 50,
            bottom_thickness_mm: 1.0,
            top_thickness_mm: 1.0,
            font_family: FontFamily::default().name().to_string(),
            font_size_mm: None,
            corner_radius_mm: 2.0,
        }
    }
}

/// Hard limits applied by [`SignRequest::validate`] and the soft limits that
/// only produce warnings.
///
/// The defaults are also the outer bounds of the hard limits: a configured
/// range may be narrower, but validation never accepts a plate, layer or font
/// size outside the default ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub width_mm: (Real, Real),
    pub height_mm: (Real, Real),
    pub thickness_mm: (Real, Real),
    /// Range for explicitly requested font sizes.
    pub font_size_mm: (Real, Real),
    /// Longer text is accepted with a warning.
    pub max_text_chars: usize,
    /// Width/height ratios outside this range are accepted with a warning.
    pub aspect_ratio: (Real, Real),
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            width_mm: (10.0, 500.0),
            height_mm: (5.0, 200.0),
            thickness_mm: (0.2, 5.0),
            font_size_mm: (2.0, 50.0),
            max_text_chars: 100,
            aspect_ratio: (0.1, 10.0),
        }
    }
}

impl Limits {
    /// The hard ranges of `self` intersected with the defaults. Soft limits
    /// are kept as configured.
    pub fn within_defaults(&self) -> Limits {
        let outer = Limits::default();
        // `max`/`min` also replace a NaN bound with the default one
        let narrow = |(lo, hi): (Real, Real), (outer_lo, outer_hi): (Real, Real)| {
            (lo.max(outer_lo), hi.min(outer_hi))
        };
        Limits {
            width_mm: narrow(self.width_mm, outer.width_mm),
            height_mm: narrow(self.height_mm, outer.height_mm),
            thickness_mm: narrow(self.thickness_mm, outer.thickness_mm),
            font_size_mm: narrow(self.font_size_mm, outer.font_size_mm),
            ..self.clone()
        }
    }
}

pub const HEAVINESS_RANGE: (i64, i64) = (0, 100);

/// A request that passed validation. Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct SignSpec {
    lines: Vec<String>,
    width_mm: Real,
    height_mm: Real,
    heaviness: u8,
    bottom_thickness_mm: Real,
    top_thickness_mm: Real,
    font_family: FontFamily,
    font_size_mm: Option<Real>,
    corner_radius_mm: Real,
}

impl SignSpec {
    /// Trimmed, non-empty lines in reading order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub const fn width_mm(&self) -> Real {
        self.width_mm
    }

    pub const fn height_mm(&self) -> Real {
        self.height_mm
    }

    pub const fn heaviness(&self) -> u8 {
        self.heaviness
    }

    pub const fn bottom_thickness_mm(&self) -> Real {
        self.bottom_thickness_mm
    }

    pub const fn top_thickness_mm(&self) -> Real {
        self.top_thickness_mm
    }

    pub const fn font_family(&self) -> FontFamily {
        self.font_family
    }

    /// The explicit font size, or `None` for auto-size.
    pub const fn font_size_mm(&self) -> Option<Real> {
        self.font_size_mm
    }

    pub const fn corner_radius_mm(&self) -> Real {
        self.corner_radius_mm
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Characters in the longest line.
    pub fn longest_line_chars(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0)
    }

    pub fn plate_area_mm2(&self) -> Real {
        self.width_mm * self.height_mm
    }
}

/// A valid spec plus the non-fatal findings of validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub spec: SignSpec,
    pub warnings: Vec<String>,
}

impl SignRequest {
    /// Check every field against `limits`, reporting all violations at once.
    /// Hard ranges wider than the defaults are narrowed to them first.
    pub fn validate(&self, limits: &Limits) -> Result<Validated, ValidationError> {
        let limits = &limits.within_defaults();
        let mut violations = Vec::new();

        let trimmed = self.text.trim();
        let lines: Vec<String> = trimmed.split('\n').map(|l| l.trim().to_string()).collect();
        if trimmed.is_empty() {
            violations.push(Violation::new(Field::Text, "must not be empty"));
        } else if let Some(blank) = lines.iter().position(String::is_empty) {
            violations.push(Violation::new(
                Field::Text,
                format!("line {} is blank", blank + 1),
            ));
        }

        check_range(&mut violations, Field::Width, self.width_mm, limits.width_mm, "mm");
        check_range(&mut violations, Field::Height, self.height_mm, limits.height_mm, "mm");
        check_range(
            &mut violations,
            Field::BottomThickness,
            self.bottom_thickness_mm,
            limits.thickness_mm,
            "mm",
        );
        check_range(
            &mut violations,
            Field::TopThickness,
            self.top_thickness_mm,
            limits.thickness_mm,
            "mm",
        );

        let (h_lo, h_hi) = HEAVINESS_RANGE;
        let heaviness = match u8::try_from(self.heaviness) {
            Ok(h) if (h_lo..=h_hi).contains(&self.heaviness) => h,
            _ => {
                violations.push(
                    Violation::new(
                        Field::Heaviness,
                        format!("must be between {h_lo} and {h_hi}, got {}", self.heaviness),
                    )
                    .with_range(h_lo as Real, h_hi as Real),
                );
                0
            },
        };

        let font_family = match self.font_family.parse::<FontFamily>() {
            Ok(family) => family,
            Err(err) => {
                let known: Vec<&str> = FontFamily::ALL.iter().map(|f| f.name()).collect();
                violations.push(Violation::new(
                    Field::FontFamily,
                    format!("{err}; expected one of {}", known.join(", ")),
                ));
                FontFamily::default()
            },
        };

        if let Some(size) = self.font_size_mm {
            check_range(&mut violations, Field::FontSize, size, limits.font_size_mm, "mm");
        }

        let radius = self.corner_radius_mm;
        let max_radius = self.width_mm.min(self.height_mm) * 0.5;
        if !radius.is_finite() || radius < 0.0 {
            violations.push(Violation::new(
                Field::CornerRadius,
                format!("must be a non-negative number, got {radius}"),
            ));
        } else if max_radius.is_finite() && radius > max_radius {
            violations.push(
                Violation::new(
                    Field::CornerRadius,
                    format!("{radius} mm exceeds half the shorter side ({max_radius} mm)"),
                )
                .with_range(0.0, max_radius),
            );
        }

        if !violations.is_empty() {
            debug!("rejected sign request with {} violation(s)", violations.len());
            return Err(ValidationError { violations });
        }

        let spec = SignSpec {
            lines,
            width_mm: self.width_mm,
            height_mm: self.height_mm,
            heaviness,
            bottom_thickness_mm: self.bottom_thickness_mm,
            top_thickness_mm: self.top_thickness_mm,
            font_family,
            font_size_mm: self.font_size_mm,
            corner_radius_mm: radius,
        };
        let warnings = collect_warnings(&spec, limits);
        Ok(Validated { spec, warnings })
    }
}

fn check_range(
    violations: &mut Vec<Violation>,
    field: Field,
    value: Real,
    range: (Real, Real),
    unit: &str,
) {
    if !in_range(value, range) {
        let (lo, hi) = range;
        violations.push(
            Violation::new(field, format!("must be between {lo} and {hi} {unit}, got {value}"))
                .with_range(lo, hi),
        );
    }
}

fn collect_warnings(spec: &SignSpec, limits: &Limits) -> Vec<String> {
    let mut warnings = Vec::new();

    let aspect = spec.width_mm / spec.height_mm;
    if !in_range(aspect, limits.aspect_ratio) {
        warnings.push(format!("unusual aspect ratio ({aspect:.1}:1)"));
    }

    if spec.bottom_thickness_mm < spec.top_thickness_mm {
        warnings.push(format!(
            "bottom layer ({} mm) is thinner than the top layer ({} mm)",
            spec.bottom_thickness_mm, spec.top_thickness_mm
        ));
    }

    let chars: usize = spec.lines.iter().map(|l| l.chars().count()).sum();
    if chars > limits.max_text_chars {
        warnings.push(format!(
            "text is {chars} characters long; more than {} may not be legible",
            limits.max_text_chars
        ));
    }

    let mut missing: Vec<char> = spec
        .lines
        .iter()
        .flat_map(|l| l.chars())
        .filter(|c| !face::has_glyph(*c))
        .collect();
    missing.sort_unstable();
    missing.dedup();
    if !missing.is_empty() {
        let listed: Vec<String> = missing.iter().map(|c| format!("'{c}'")).collect();
        warnings.push(format!(
            "no glyph for {}; rendered as blank space",
            listed.join(", ")
        ));
    }

    let h = spec.heaviness;
    let top = spec.top_thickness_mm;
    if h > 75 && spec.font_size_mm.is_some_and(|s| s > 20.0) && top < 1.5 {
        warnings.push("heavy text with a large font may cut through a thin top layer".to_string());
    }
    if h > 90 && top < 2.0 {
        warnings.push("extra bold text may require a thicker top layer".to_string());
    }

    warnings
}

/// Starting values for a new sign of the given text and plate size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSuggestion {
    pub font_size_mm: Real,
    pub heaviness: i64,
    pub bottom_thickness_mm: Real,
    pub top_thickness_mm: Real,
    /// Long text is easier to fit by auto-sizing.
    pub auto_size: bool,
}

impl ParameterSuggestion {
    /// Apply the suggestion to `request`, keeping its text, plate and family.
    pub fn apply_to(&self, request: &SignRequest) -> SignRequest {
        SignRequest {
            heaviness: self.heaviness,
            bottom_thickness_mm: self.bottom_thickness_mm,
            top_thickness_mm: self.top_thickness_mm,
            font_size_mm: (!self.auto_size).then_some(self.font_size_mm),
            ..request.clone()
        }
    }
}

/// Suggests a font size from the text length, a middle heaviness, and a
/// thicker top layer when the text is large relative to the plate.
pub fn suggest_parameters(text: &str, width_mm: Real, height_mm: Real, limits: &Limits) -> ParameterSuggestion {
    let len = text.trim().chars().count().max(1);
    let n = len as Real;
    let size = match len {
        0..=5 => (height_mm * 0.6).min(width_mm / (n * 0.8)),
        6..=10 => (height_mm * 0.5).min(width_mm / (n * 0.7)),
        _ => (height_mm * 0.4).min(width_mm / (n * 0.6)),
    };
    let (lo, hi) = limits.within_defaults().font_size_mm;
    let size = (size.max(lo).min(hi) * 10.0).round() / 10.0;

    ParameterSuggestion {
        font_size_mm: size,
        heaviness: 50,
        bottom_thickness_mm: 1.0,
        top_thickness_mm: if size > height_mm * 0.5 { 1.5 } else { 1.0 },
        auto_size: len > 15,
    }
}

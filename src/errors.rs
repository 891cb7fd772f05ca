//! Validation and generation errors

use crate::float_types::Real;
use crate::heaviness::WeightBucket;
use crate::predict::CutThroughPrediction;
use std::fmt::{self, Display};
use std::path::PathBuf;

/// The request field a [`Violation`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Text,
    Width,
    Height,
    Heaviness,
    BottomThickness,
    TopThickness,
    FontFamily,
    FontSize,
    CornerRadius,
}

impl Field {
    pub const fn name(self) -> &'static str {
        match self {
            Field::Text => "text",
            Field::Width => "width",
            Field::Height => "height",
            Field::Heaviness => "heaviness",
            Field::BottomThickness => "bottom thickness",
            Field::TopThickness => "top thickness",
            Field::FontFamily => "font family",
            Field::FontSize => "font size",
            Field::CornerRadius => "corner radius",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One violated constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub field: Field,
    pub message: String,
    pub valid_range: Option<(Real, Real)>,
}

impl Violation {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            valid_range: None,
        }
    }

    pub fn with_range(mut self, lo: Real, hi: Real) -> Self {
        self.valid_range = Some((lo, hi));
        self
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        if let Some((lo, hi)) = self.valid_range {
            write!(f, " (valid range: {lo}-{hi})")?;
        }
        Ok(())
    }
}

/// Every constraint a request violated, in field order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid sign parameters: {}", join(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Returns `true` if any violation names `field`.
    pub fn cites(&self, field: Field) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The parameters that led to an empty top layer, echoed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamEcho {
    pub text: String,
    pub width_mm: Real,
    pub height_mm: Real,
    pub heaviness: u8,
    pub weight: WeightBucket,
    pub font_size_mm: Real,
    pub top_thickness_mm: Real,
}

impl Display for ParamEcho {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "text {:?} on {}x{} mm, heaviness {} ({}), font {:.2} mm, top {} mm",
            self.text,
            self.width_mm,
            self.height_mm,
            self.heaviness,
            self.weight.label(),
            self.font_size_mm,
            self.top_thickness_mm,
        )
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Cutting the text removed the whole top plate, or left nothing printable.
    #[error("top layer is empty after cutting the text ({params}): {detail}")]
    EmptyTopLayer { params: ParamEcho, detail: String },

    /// The geometry kernel panicked or produced unusable output.
    #[error("geometry error during {operation}: {details}")]
    GeometryOperationFailed {
        operation: &'static str,
        details: String,
    },
}

impl GenerationError {
    /// Parameter changes likely to avoid this error.
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            GenerationError::Validation(_) => vec!["correct the listed parameters"],
            GenerationError::EmptyTopLayer { .. } => vec![
                "reduce the text heaviness",
                "increase the top layer thickness",
                "use shorter text or a smaller font size",
            ],
            GenerationError::GeometryOperationFailed { .. } => vec![
                "try a different font size",
                "remove unsupported characters from the text",
            ],
        }
    }
}

/// What the generator returns when a request fails: the hard error together
/// with the pre-flight prediction and any warnings gathered before failing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", describe_failure(.error, .prediction))]
pub struct GenerationFailure {
    #[source]
    pub error: GenerationError,
    pub prediction: Option<CutThroughPrediction>,
    pub warnings: Vec<String>,
}

impl GenerationFailure {
    pub fn new(error: impl Into<GenerationError>) -> Self {
        Self {
            error: error.into(),
            prediction: None,
            warnings: Vec::new(),
        }
    }

    /// `true` when the predictor saw this failure coming.
    pub fn was_predicted(&self) -> bool {
        self.prediction.as_ref().is_some_and(|p| p.will_fail)
    }
}

impl From<GenerationError> for GenerationFailure {
    fn from(error: GenerationError) -> Self {
        GenerationFailure::new(error)
    }
}

fn describe_failure(error: &GenerationError, prediction: &Option<CutThroughPrediction>) -> String {
    match prediction {
        Some(p) if p.will_fail => format!(
            "{error} (cut-through was predicted with {}% confidence: {})",
            p.confidence_percent, p.reason
        ),
        Some(p) => format!(
            "{error} (cut-through was not predicted, confidence {}%)",
            p.confidence_percent
        ),
        None => error.to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("refusing to export the {layer} layer: it has no triangles")]
    EmptyLayer { layer: &'static str },

    #[error("{} was written but is empty and has been removed", .path.display())]
    EmptyFile { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_violation() {
        let err = ValidationError {
            violations: vec![
                Violation::new(Field::Width, "must be between 10 and 500 mm").with_range(10.0, 500.0),
                Violation::new(Field::Text, "must not be empty"),
            ],
        };
        let message = err.to_string();
        assert!(message.contains("width: must be between 10 and 500 mm (valid range: 10-500)"));
        assert!(message.contains("text: must not be empty"));
        assert!(err.cites(Field::Width));
        assert!(!err.cites(Field::Height));
    }

    #[test]
    fn failure_display_cross_references_prediction() {
        let failure = GenerationFailure {
            error: GenerationError::GeometryOperationFailed {
                operation: "text layout",
                details: "nothing to cut".into(),
            },
            prediction: Some(CutThroughPrediction {
                will_fail: true,
                confidence_percent: 91,
                reason: "thin top layer".into(),
            }),
            warnings: vec![],
        };
        let message = failure.to_string();
        assert!(message.starts_with("geometry error during text layout"));
        assert!(message.contains("predicted with 91% confidence"));
        assert!(failure.was_predicted());
    }
}

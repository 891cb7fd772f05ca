//! Handing generated layers to the outside world.

use crate::builder::GeneratedLayers;
use crate::errors::ExportError;
use crate::heaviness::WeightBucket;
use std::path::{Path, PathBuf};

#[cfg(feature = "stl-io")]
pub mod stl;

/// File name suffix of the base layer, printed in the contrasting colour.
pub const BASE_SUFFIX: &str = "bottom_black";
/// File name suffix of the cut top layer.
pub const TOP_SUFFIX: &str = "top_yellow";
/// File name suffix of the merged preview.
pub const PREVIEW_SUFFIX: &str = "combined_preview";

const MAX_STEM_CHARS: usize = 30;

/// Something that persists generated layers.
pub trait ExportSink {
    /// Write `layers` under the stem `name` in `dir`, returning the created paths.
    fn export(&self, layers: GeneratedLayers, name: &str, dir: &Path) -> Result<Vec<PathBuf>, ExportError>;
}

/// Filesystem-safe stem for `text`: alphanumerics, spaces, `-` and `_` are
/// kept and anything else becomes `_`; cut to 30 characters, spaces turned
/// into `_`, and `sign` used when nothing remains.
pub fn sanitize_name(text: &str) -> String {
    let kept: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_STEM_CHARS)
        .collect();
    let stem = kept.trim().replace(' ', "_");
    if stem.is_empty() { "sign".to_string() } else { stem }
}

/// `{sanitized text}_{weight label}`.
pub fn file_stem(text: &str, bucket: WeightBucket) -> String {
    format!("{}_{}", sanitize_name(text), bucket.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_are_filesystem_safe() {
        assert_eq!(file_stem("EXIT", WeightBucket::Bold), "EXIT_bold");
        assert_eq!(sanitize_name("No Entry!"), "No_Entry_");
        assert_eq!(sanitize_name("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_name("   "), "sign");
        assert_eq!(sanitize_name(&"X".repeat(40)).len(), 30);
    }
}

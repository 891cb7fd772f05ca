//! Laying out lines of text as a 2D profile.

use crate::float_types::Real;
use crate::font::FontKind;
use crate::font::face::{GlyphCache, ROWS};
use crate::font::metrics::LINE_SPACING;
use crate::sketch::Sketch;

/// Placement of glyph cells for one font size and face.
///
/// The cap height equals the font size and one advance is
/// `font_size * width_ratio`. The advance is split into the face's
/// [`FontKind::columns`], the last of which is the blank gap between glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayout {
    pub font_size: Real,
    pub width_ratio: Real,
    pub kind: FontKind,
}

impl TextLayout {
    pub const fn new(font_size: Real, width_ratio: Real, kind: FontKind) -> Self {
        Self {
            font_size,
            width_ratio,
            kind,
        }
    }

    pub fn advance(&self) -> Real {
        self.font_size * self.width_ratio
    }

    /// Width of one bitmap column.
    pub fn column_width(&self) -> Real {
        self.advance() / self.kind.columns() as Real
    }

    /// Height of one bitmap row; also the thinnest horizontal stroke.
    pub fn row_height(&self) -> Real {
        self.font_size / ROWS as Real
    }

    pub fn line_pitch(&self) -> Real {
        self.font_size * LINE_SPACING
    }

    /// Inked width of a line of `chars` characters (no trailing gap).
    pub fn line_width(&self, chars: usize) -> Real {
        if chars == 0 {
            return 0.0;
        }
        chars as Real * self.advance() - self.column_width()
    }

    /// Height of a block of `lines` lines from the top of the first cap to the
    /// baseline of the last.
    pub fn block_height(&self, lines: usize) -> Real {
        if lines == 0 {
            return 0.0;
        }
        self.font_size + (lines - 1) as Real * self.line_pitch()
    }
}

impl Sketch {
    /// Lay out `lines` centred on the origin: every line centred horizontally
    /// and the block centred vertically.
    ///
    /// Characters without a glyph advance the pen like a space. Glyph cells
    /// never overlap, so the result is assembled without boolean unions.
    pub fn text<S: AsRef<str>>(lines: &[S], layout: &TextLayout, glyphs: &mut GlyphCache) -> Sketch {
        let (sx, sy) = (layout.column_width(), layout.row_height());
        let top = layout.block_height(lines.len()) * 0.5;

        let mut profile = Sketch::new();
        for (i, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let baseline = top - layout.font_size - i as Real * layout.line_pitch();
            let mut pen = -layout.line_width(line.chars().count()) * 0.5;
            for ch in line.chars() {
                if let Some(outline) = glyphs.outline(ch, layout.kind) {
                    if !outline.is_empty() {
                        profile.extend_disjoint(outline.scale_translate(sx, sy, pen, baseline));
                    }
                }
                pen += layout.advance();
            }
        }
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_width_excludes_trailing_gap() {
        let layout = TextLayout::new(7.0, 0.6, FontKind::Regular);
        // 6 columns of 0.7mm per advance
        assert!((layout.column_width() - 0.7).abs() < 1e-12);
        assert!((layout.line_width(3) - (3.0 * 4.2 - 0.7)).abs() < 1e-12);
        assert_eq!(layout.line_width(0), 0.0);
    }

    #[test]
    fn text_is_centred() {
        let mut cache = GlyphCache::new();
        let layout = TextLayout::new(7.0, 0.6, FontKind::Regular);
        let profile = Sketch::text(&["HI", "HH"], &layout, &mut cache);
        let [min_x, min_y, max_x, max_y] = profile.bounds().unwrap();
        assert!((min_x + max_x).abs() < 1e-9);
        assert!((min_y + max_y).abs() < 1e-9);
        assert!((max_y - min_y - layout.block_height(2)).abs() < 1e-9);
    }

    #[test]
    fn unsupported_characters_leave_a_gap() {
        let mut cache = GlyphCache::new();
        let layout = TextLayout::new(7.0, 0.6, FontKind::Bold);
        let with_gap = Sketch::text(&["I~I"], &layout, &mut cache);
        let plain = Sketch::text(&["III"], &layout, &mut cache);
        assert_eq!(with_gap.piece_count(), 2);
        assert!(with_gap.area() < plain.area());
        assert_eq!(with_gap.bounds(), plain.bounds());
        assert!(Sketch::text(&["~~"], &layout, &mut cache).is_empty());
    }
}

//! Built-in 5x7 bitmap faces and their outlines.
//!
//! Each glyph is seven rows, top row first, with the leftmost column in the
//! highest bit. The regular face is 5 columns wide. The bold face is drawn
//! separately on a 6 column grid with two-column stems, so its counters and
//! diagonals are shaped for the heavier stroke rather than smeared from the
//! regular one.
//!
//! Before outlining, cells that touch only at a corner are bridged by filling
//! the empty cell of the upper row. Outlines therefore never pinch at a single
//! point, which keeps the extruded cutout walls 2-manifold.

use crate::float_types::Real;
use crate::font::FontKind;
use crate::sketch::Sketch;
use geo::{Rect, coord};
use hashbrown::HashMap;

/// Rows per glyph.
pub const ROWS: usize = 7;

type Bitmap = [u8; ROWS];

/// Regular (5 columns) and bold (6 columns) bitmaps per character.
#[rustfmt::skip]
const GLYPHS: &[(char, Bitmap, Bitmap)] = &[
    (' ',
        [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        [0b000000, 0b000000, 0b000000, 0b000000, 0b000000, 0b000000, 0b000000]),
    ('A',
        [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        [0b011110, 0b110011, 0b110011, 0b111111, 0b110011, 0b110011, 0b110011]),
    ('B',
        [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        [0b111110, 0b110011, 0b110011, 0b111110, 0b110011, 0b110011, 0b111110]),
    ('C',
        [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        [0b011110, 0b111111, 0b110000, 0b110000, 0b110000, 0b111111, 0b011110]),
    ('D',
        [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        [0b111100, 0b110110, 0b110011, 0b110011, 0b110011, 0b110110, 0b111100]),
    ('E',
        [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        [0b111111, 0b110000, 0b110000, 0b111110, 0b110000, 0b110000, 0b111111]),
    ('F',
        [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        [0b111111, 0b110000, 0b110000, 0b111110, 0b110000, 0b110000, 0b110000]),
    ('G',
        [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        [0b011110, 0b110011, 0b110000, 0b110111, 0b110011, 0b110011, 0b011111]),
    ('H',
        [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        [0b110011, 0b110011, 0b110011, 0b111111, 0b110011, 0b110011, 0b110011]),
    ('I',
        [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        [0b011110, 0b001100, 0b001100, 0b001100, 0b001100, 0b001100, 0b011110]),
    ('J',
        [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        [0b001111, 0b000110, 0b000110, 0b000110, 0b000110, 0b110110, 0b011100]),
    ('K',
        [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        [0b110011, 0b110111, 0b111110, 0b111100, 0b111110, 0b110111, 0b110011]),
    ('L',
        [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        [0b110000, 0b110000, 0b110000, 0b110000, 0b110000, 0b110000, 0b111111]),
    ('M',
        [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        [0b110011, 0b111111, 0b111111, 0b110011, 0b110011, 0b110011, 0b110011]),
    ('N',
        [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        [0b110011, 0b111011, 0b111011, 0b110111, 0b110111, 0b110011, 0b110011]),
    ('O',
        [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        [0b011110, 0b111111, 0b110011, 0b110011, 0b110011, 0b111111, 0b011110]),
    ('P',
        [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        [0b111110, 0b110011, 0b110011, 0b111110, 0b110000, 0b110000, 0b110000]),
    ('Q',
        [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        [0b011110, 0b110011, 0b110011, 0b110011, 0b110111, 0b110110, 0b011011]),
    ('R',
        [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        [0b111110, 0b110011, 0b110011, 0b111110, 0b110110, 0b110111, 0b110011]),
    ('S',
        [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        [0b011111, 0b110000, 0b111110, 0b011111, 0b000011, 0b000011, 0b111110]),
    ('T',
        [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        [0b111111, 0b001100, 0b001100, 0b001100, 0b001100, 0b001100, 0b001100]),
    ('U',
        [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        [0b110011, 0b110011, 0b110011, 0b110011, 0b110011, 0b111111, 0b011110]),
    ('V',
        [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        [0b110011, 0b110011, 0b110011, 0b110011, 0b011110, 0b011110, 0b001100]),
    ('W',
        [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        [0b110011, 0b110011, 0b110011, 0b110011, 0b111111, 0b111111, 0b110011]),
    ('X',
        [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        [0b110011, 0b011110, 0b011110, 0b001100, 0b011110, 0b011110, 0b110011]),
    ('Y',
        [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        [0b110011, 0b110011, 0b011110, 0b011110, 0b001100, 0b001100, 0b001100]),
    ('Z',
        [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        [0b111111, 0b000011, 0b000111, 0b001110, 0b011100, 0b110000, 0b111111]),
    ('0',
        [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        [0b011110, 0b110011, 0b110111, 0b111011, 0b110011, 0b110011, 0b011110]),
    ('1',
        [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        [0b001100, 0b011100, 0b111100, 0b001100, 0b001100, 0b001100, 0b111111]),
    ('2',
        [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        [0b011110, 0b110011, 0b000011, 0b001110, 0b011100, 0b111000, 0b111111]),
    ('3',
        [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        [0b111111, 0b000111, 0b001110, 0b001111, 0b000011, 0b110011, 0b011110]),
    ('4',
        [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        [0b000110, 0b001110, 0b011110, 0b110110, 0b111111, 0b111111, 0b000110]),
    ('5',
        [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        [0b111111, 0b110000, 0b111110, 0b111111, 0b000011, 0b110011, 0b011110]),
    ('6',
        [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        [0b001110, 0b011000, 0b110000, 0b111110, 0b111111, 0b110011, 0b011110]),
    ('7',
        [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        [0b111111, 0b000011, 0b000111, 0b001110, 0b011100, 0b011000, 0b011000]),
    ('8',
        [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        [0b011110, 0b110011, 0b011110, 0b011110, 0b110011, 0b110011, 0b011110]),
    ('9',
        [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        [0b011110, 0b110011, 0b111111, 0b011111, 0b000011, 0b000110, 0b011100]),
    ('-',
        [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        [0b000000, 0b000000, 0b000000, 0b011110, 0b011110, 0b000000, 0b000000]),
    ('.',
        [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        [0b000000, 0b000000, 0b000000, 0b000000, 0b000000, 0b011100, 0b011100]),
    (',',
        [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        [0b000000, 0b000000, 0b000000, 0b000000, 0b011100, 0b001100, 0b011000]),
    ('!',
        [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        [0b001100, 0b001100, 0b001100, 0b001100, 0b001100, 0b000000, 0b001100]),
    ('?',
        [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        [0b011110, 0b110011, 0b000011, 0b000110, 0b001100, 0b000000, 0b001100]),
    (':',
        [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        [0b000000, 0b011100, 0b011100, 0b000000, 0b011100, 0b011100, 0b000000]),
    ('\'',
        [0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        [0b011100, 0b001100, 0b011000, 0b000000, 0b000000, 0b000000, 0b000000]),
    ('/',
        [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        [0b000011, 0b000011, 0b000110, 0b001100, 0b011000, 0b110000, 0b110000]),
    ('+',
        [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        [0b000000, 0b001100, 0b001100, 0b111111, 0b001100, 0b001100, 0b000000]),
    ('&',
        [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D],
        [0b011100, 0b110110, 0b111100, 0b011000, 0b111011, 0b110110, 0b011011]),
    ('(',
        [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        [0b000110, 0b001100, 0b011000, 0b011000, 0b011000, 0b001100, 0b000110]),
    (')',
        [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        [0b011000, 0b001100, 0b000110, 0b000110, 0b000110, 0b001100, 0b011000]),
    ('#',
        [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
        [0b011011, 0b011011, 0b111111, 0b011011, 0b111111, 0b011011, 0b011011]),
    ('=',
        [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        [0b000000, 0b000000, 0b111111, 0b000000, 0b111111, 0b000000, 0b000000]),
    ('_',
        [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        [0b000000, 0b000000, 0b000000, 0b000000, 0b000000, 0b000000, 0b111111]),
];

/// Folds lower case onto the upper-case glyphs.
fn bitmap(ch: char, kind: FontKind) -> Option<Bitmap> {
    let ch = ch.to_ascii_uppercase();
    GLYPHS
        .iter()
        .find(|(c, ..)| *c == ch)
        .map(|(_, regular, bold)| match kind {
            FontKind::Regular => *regular,
            FontKind::Bold => *bold,
        })
}

/// Returns `true` if `ch` can be drawn (after case folding).
pub fn has_glyph(ch: char) -> bool {
    bitmap(ch, FontKind::Regular).is_some()
}

/// Every character with a glyph, in table order.
pub fn supported_chars() -> impl Iterator<Item = char> {
    GLYPHS.iter().map(|(c, ..)| *c)
}

#[inline]
fn is_set(rows: &Bitmap, width: u32, r: usize, c: u32) -> bool {
    (rows[r] >> (width - 1 - c)) & 1 == 1
}

/// Fill the upper empty cell of every checkerboard 2x2 block until none remain.
fn close_diagonals(mut rows: Bitmap, width: u32) -> Bitmap {
    loop {
        let mut changed = false;
        for r in 0..ROWS - 1 {
            for c in 0..width - 1 {
                let tl = is_set(&rows, width, r, c);
                let tr = is_set(&rows, width, r, c + 1);
                let bl = is_set(&rows, width, r + 1, c);
                let br = is_set(&rows, width, r + 1, c + 1);
                if tl && br && !tr && !bl {
                    rows[r] |= 1 << (width - 2 - c);
                    changed = true;
                } else if tr && bl && !tl && !br {
                    rows[r] |= 1 << (width - 1 - c);
                    changed = true;
                }
            }
        }
        if !changed {
            return rows;
        }
    }
}

/// The rows actually outlined for `ch` in `kind`, after bridging diagonals.
pub fn glyph_rows(ch: char, kind: FontKind) -> Option<Bitmap> {
    let rows = bitmap(ch, kind)?;
    Some(close_diagonals(rows, kind.ink_columns()))
}

/// Outline of `ch` in glyph units: column `c` spans `x ∈ [c, c+1]`, row `r`
/// spans `y ∈ [6-r, 7-r]`, so the cell is `ink_columns × 7` with its origin at
/// the bottom-left. `None` when the face has no such glyph; blank glyphs
/// produce an empty sketch.
pub fn glyph_outline(ch: char, kind: FontKind) -> Option<Sketch> {
    let rows = glyph_rows(ch, kind)?;
    let width = kind.ink_columns();

    let mut outline = Sketch::new();
    for (r, &bits) in rows.iter().enumerate() {
        let y0 = (ROWS - 1 - r) as Real;
        let mut c = 0;
        while c < width {
            if (bits >> (width - 1 - c)) & 1 == 0 {
                c += 1;
                continue;
            }
            let start = c;
            while c < width && (bits >> (width - 1 - c)) & 1 == 1 {
                c += 1;
            }
            let run = Rect::new(
                coord! { x: start as Real, y: y0 },
                coord! { x: c as Real, y: y0 + 1.0 },
            );
            outline = outline.union(&Sketch::from_polygon(run.to_polygon()));
        }
    }
    Some(outline)
}

/// Memoized glyph outlines keyed by character and face.
#[derive(Debug, Default)]
pub struct GlyphCache {
    outlines: HashMap<(char, FontKind), Sketch>,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outline of `ch` in glyph units, computed once per face.
    pub fn outline(&mut self, ch: char, kind: FontKind) -> Option<&Sketch> {
        let ch = ch.to_ascii_uppercase();
        if !self.outlines.contains_key(&(ch, kind)) {
            let outline = glyph_outline(ch, kind)?;
            self.outlines.insert((ch, kind), outline);
        }
        self.outlines.get(&(ch, kind))
    }

    pub fn len(&self) -> usize {
        self.outlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink(rows: &Bitmap) -> u32 {
        rows.iter().map(|r| r.count_ones()).sum()
    }

    #[test]
    fn lower_case_folds_to_upper() {
        assert_eq!(bitmap('q', FontKind::Regular), bitmap('Q', FontKind::Regular));
        assert_eq!(bitmap('e', FontKind::Bold), bitmap('E', FontKind::Bold));
        assert!(has_glyph('z'));
        assert!(!has_glyph('é'));
        assert!(!has_glyph('☃'));
    }

    #[test]
    fn glyphs_fit_their_cells() {
        for (ch, regular, bold) in GLYPHS {
            assert!(regular.iter().all(|r| *r < 0x20), "{ch:?} wider than 5 columns");
            assert!(bold.iter().all(|r| *r < 0x40), "{ch:?} bold wider than 6 columns");
        }
    }

    #[test]
    fn bold_face_has_more_ink() {
        for ch in ['A', 'I', 'T', '7'] {
            let regular = glyph_rows(ch, FontKind::Regular).unwrap();
            let bold = glyph_rows(ch, FontKind::Bold).unwrap();
            assert!(ink(&bold) > ink(&regular), "{ch}");
        }
    }

    #[test]
    fn bold_face_is_not_a_widened_regular_face() {
        let widened = |rows: &Bitmap| rows.map(|r| (r << 1) | r);
        let redrawn = GLYPHS
            .iter()
            .filter(|(_, regular, bold)| widened(regular) != *bold)
            .count();
        assert!(redrawn > GLYPHS.len() / 2, "only {redrawn} bold glyphs differ");
        // two-column stems on the straight letters
        assert_eq!(bitmap('I', FontKind::Bold).unwrap()[3].count_ones(), 2);
        assert_eq!(bitmap('H', FontKind::Bold).unwrap()[0].count_ones(), 4);
    }

    #[test]
    fn bold_glyphs_are_one_piece_where_regular_ones_are() {
        for ch in supported_chars() {
            let regular = glyph_outline(ch, FontKind::Regular).unwrap();
            let bold = glyph_outline(ch, FontKind::Bold).unwrap();
            assert!(bold.piece_count() <= regular.piece_count().max(1), "{ch:?}");
        }
    }

    #[test]
    fn closed_glyphs_have_no_checkerboard() {
        for ch in supported_chars() {
            for kind in [FontKind::Regular, FontKind::Bold] {
                let rows = glyph_rows(ch, kind).unwrap();
                let w = kind.ink_columns();
                for r in 0..ROWS - 1 {
                    for c in 0..w - 1 {
                        let tl = is_set(&rows, w, r, c);
                        let tr = is_set(&rows, w, r, c + 1);
                        let bl = is_set(&rows, w, r + 1, c);
                        let br = is_set(&rows, w, r + 1, c + 1);
                        assert!(!(tl && br && !tr && !bl), "{ch:?} {kind}");
                        assert!(!(tr && bl && !tl && !br), "{ch:?} {kind}");
                    }
                }
            }
        }
    }

    #[test]
    fn outline_area_matches_ink() {
        let rows = glyph_rows('H', FontKind::Regular).unwrap();
        let outline = glyph_outline('H', FontKind::Regular).unwrap();
        assert!((outline.area() - ink(&rows) as Real).abs() < 1e-9);
        // the bars of an H form one piece
        assert_eq!(outline.piece_count(), 1);
    }

    #[test]
    fn blank_and_missing_glyphs() {
        assert!(glyph_outline(' ', FontKind::Bold).unwrap().is_empty());
        assert!(glyph_outline('~', FontKind::Regular).is_none());
    }

    #[test]
    fn cache_reuses_outlines() {
        let mut cache = GlyphCache::new();
        assert!(cache.outline('a', FontKind::Regular).is_some());
        assert!(cache.outline('A', FontKind::Regular).is_some());
        assert_eq!(cache.len(), 1);
        assert!(cache.outline('~', FontKind::Regular).is_none());
        assert_eq!(cache.len(), 1);
    }
}

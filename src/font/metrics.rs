//! Horizontal metrics per font family.
//!
//! A width ratio is the advance of one character divided by the cap height.
//! Vertical metrics are shared: every family has a cap height equal to the
//! font size and a line pitch of [`LINE_SPACING`] times that.

use crate::float_types::Real;
use crate::font::FontFamily;

/// Width ratio of the default family (Arial).
pub const DEFAULT_WIDTH_RATIO: Real = 0.55;

/// Line pitch as a multiple of the font size.
pub const LINE_SPACING: Real = 1.25;

/// Height of one line of text relative to the font size.
pub const HEIGHT_RATIO: Real = 1.0;

pub const fn width_ratio(family: FontFamily) -> Real {
    match family {
        FontFamily::Impact => 0.45,
        FontFamily::Arial => DEFAULT_WIDTH_RATIO,
        FontFamily::ArialBlack => 0.65,
        FontFamily::Helvetica => 0.55,
        FontFamily::Verdana => 0.65,
        FontFamily::Tahoma => 0.60,
        FontFamily::TrebuchetMs => 0.58,
        FontFamily::GillSans => 0.52,
        FontFamily::Futura => 0.60,
    }
}

//! Mapping the 0-100 heaviness slider onto discrete weight buckets.
//!
//! Each bucket picks the face the text is cut with and a size multiplier that
//! tells the cut-through predictor how aggressive the cut is.

use crate::float_types::Real;
use crate::font::{FontFamily, FontKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightBucket {
    Light,
    Regular,
    Bold,
    ExtraBold,
}

impl WeightBucket {
    pub const ALL: [WeightBucket; 4] = [
        WeightBucket::Light,
        WeightBucket::Regular,
        WeightBucket::Bold,
        WeightBucket::ExtraBold,
    ];

    /// Light `[0,25]`, Regular `[26,50]`, Bold `[51,75]`, ExtraBold `[76,100]`.
    /// Values above 100 land in ExtraBold; validation never lets them through.
    pub const fn from_heaviness(heaviness: u8) -> WeightBucket {
        match heaviness {
            0..=25 => WeightBucket::Light,
            26..=50 => WeightBucket::Regular,
            51..=75 => WeightBucket::Bold,
            _ => WeightBucket::ExtraBold,
        }
    }

    /// Inclusive heaviness range of the bucket.
    pub const fn range(self) -> (u8, u8) {
        match self {
            WeightBucket::Light => (0, 25),
            WeightBucket::Regular => (26, 50),
            WeightBucket::Bold => (51, 75),
            WeightBucket::ExtraBold => (76, 100),
        }
    }

    /// Weight label used in exported file names.
    pub const fn label(self) -> &'static str {
        match self {
            WeightBucket::Light => "light",
            WeightBucket::Regular => "regular",
            WeightBucket::Bold => "bold",
            WeightBucket::ExtraBold => "extrabold",
        }
    }

    /// Face used for this bucket. Heavy families already look bold at
    /// regular weight and take the bold face from `Regular` up.
    pub const fn font_kind(self, family: FontFamily) -> FontKind {
        match self {
            WeightBucket::Light => FontKind::Regular,
            WeightBucket::Regular if family.is_heavy() => FontKind::Bold,
            WeightBucket::Regular => FontKind::Regular,
            WeightBucket::Bold | WeightBucket::ExtraBold => FontKind::Bold,
        }
    }
}

/// Size multiplier per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketTable {
    pub light: Real,
    pub regular: Real,
    pub bold: Real,
    pub extra_bold: Real,
}

impl Default for BucketTable {
    fn default() -> Self {
        Self {
            light: 0.90,
            regular: 1.00,
            bold: 1.15,
            extra_bold: 1.30,
        }
    }
}

impl BucketTable {
    pub const fn multiplier(&self, bucket: WeightBucket) -> Real {
        match bucket {
            WeightBucket::Light => self.light,
            WeightBucket::Regular => self.regular,
            WeightBucket::Bold => self.bold,
            WeightBucket::ExtraBold => self.extra_bold,
        }
    }

    /// Returns `true` if the multipliers never decrease from Light to ExtraBold.
    pub fn is_monotone(&self) -> bool {
        self.light <= self.regular && self.regular <= self.bold && self.bold <= self.extra_bold
    }
}

/// How a request's text is rendered. Computed per request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderProfile {
    pub bucket: WeightBucket,
    pub size_multiplier: Real,
    pub font_kind: FontKind,
}

pub fn map_heaviness(heaviness: u8, family: FontFamily, table: &BucketTable) -> RenderProfile {
    let bucket = WeightBucket::from_heaviness(heaviness);
    RenderProfile {
        bucket,
        size_multiplier: table.multiplier(bucket),
        font_kind: bucket.font_kind(family),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_distinct() {
        let mut labels: Vec<_> = WeightBucket::ALL.iter().map(|b| b.label()).collect();
        labels.dedup();
        assert_eq!(labels.len(), 4);
    }

    #[test]
    fn ranges_cover_the_slider() {
        for bucket in WeightBucket::ALL {
            let (lo, hi) = bucket.range();
            assert_eq!(WeightBucket::from_heaviness(lo), bucket);
            assert_eq!(WeightBucket::from_heaviness(hi), bucket);
        }
    }

    #[test]
    fn default_table_is_monotone() {
        assert!(BucketTable::default().is_monotone());
    }
}

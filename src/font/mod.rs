//! Font families, faces and the glyph outlines used for cut-through text.
//!
//! The family only influences horizontal metrics (see [`metrics`]); the glyph
//! shapes come from two built-in bitmap faces selected by [`FontKind`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod face;
pub mod metrics;

/// The closed set of supported font families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontFamily {
    Impact,
    #[default]
    Arial,
    ArialBlack,
    Helvetica,
    Verdana,
    Tahoma,
    TrebuchetMs,
    GillSans,
    Futura,
}

impl FontFamily {
    pub const ALL: [FontFamily; 9] = [
        FontFamily::Impact,
        FontFamily::Arial,
        FontFamily::ArialBlack,
        FontFamily::Helvetica,
        FontFamily::Verdana,
        FontFamily::Tahoma,
        FontFamily::TrebuchetMs,
        FontFamily::GillSans,
        FontFamily::Futura,
    ];

    /// Display name as users type it.
    pub const fn name(self) -> &'static str {
        match self {
            FontFamily::Impact => "Impact",
            FontFamily::Arial => "Arial",
            FontFamily::ArialBlack => "Arial Black",
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Verdana => "Verdana",
            FontFamily::Tahoma => "Tahoma",
            FontFamily::TrebuchetMs => "Trebuchet MS",
            FontFamily::GillSans => "Gill Sans",
            FontFamily::Futura => "Futura",
        }
    }

    /// Families whose regular weight is already heavy; they switch to the
    /// bold face one bucket earlier.
    pub const fn is_heavy(self) -> bool {
        matches!(self, FontFamily::Impact | FontFamily::ArialBlack)
    }

    /// Parses `name`, falling back to [`FontFamily::default`] (Arial).
    pub fn from_name_or_default(name: &str) -> FontFamily {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown font family '{0}'")]
pub struct UnknownFontFamily(pub String);

impl FromStr for FontFamily {
    type Err = UnknownFontFamily;

    /// Case-insensitive; spaces, hyphens and underscores are ignored, so
    /// "arial black", "Arial-Black" and "ArialBlack" are the same family.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(*c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        FontFamily::ALL
            .into_iter()
            .find(|family| {
                family
                    .name()
                    .chars()
                    .filter(|c| *c != ' ')
                    .flat_map(char::to_lowercase)
                    .eq(key.chars())
            })
            .ok_or_else(|| UnknownFontFamily(s.to_string()))
    }
}

/// Which bitmap face a glyph is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontKind {
    Regular,
    Bold,
}

impl FontKind {
    /// Inked columns per glyph cell.
    pub const fn ink_columns(self) -> u32 {
        match self {
            FontKind::Regular => 5,
            FontKind::Bold => 6,
        }
    }

    /// Columns per advance: the ink plus one blank separating column.
    pub const fn columns(self) -> u32 {
        self.ink_columns() + 1
    }
}

impl fmt::Display for FontKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontKind::Regular => f.write_str("regular"),
            FontKind::Bold => f.write_str("bold"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_names_parse_loosely() {
        assert_eq!("arial black".parse(), Ok(FontFamily::ArialBlack));
        assert_eq!("Arial-Black".parse(), Ok(FontFamily::ArialBlack));
        assert_eq!("TREBUCHETMS".parse(), Ok(FontFamily::TrebuchetMs));
        assert_eq!("gill_sans".parse(), Ok(FontFamily::GillSans));
        assert!("Comic Sans".parse::<FontFamily>().is_err());
    }

    #[test]
    fn every_name_round_trips() {
        for family in FontFamily::ALL {
            assert_eq!(family.name().parse(), Ok(family));
        }
    }

    #[test]
    fn unknown_family_falls_back_to_arial() {
        assert_eq!(FontFamily::from_name_or_default("Wingdings"), FontFamily::Arial);
    }
}

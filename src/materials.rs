//! Which catalog reference each part of a window is priced from.

use serde::{Deserialize, Serialize};

use crate::types::{Color, SashFamily, Series};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileFamily {
    #[serde(rename = "40100")]
    Frame40100,
    #[serde(rename = "6007")]
    Sash6007,
    #[serde(rename = "40404")]
    Sash40404,
    #[serde(rename = "40112")]
    Separator40112,
}

impl ProfileFamily {
    pub fn code(&self) -> &'static str {
        match self {
            ProfileFamily::Frame40100 => "40100",
            ProfileFamily::Sash6007 => "6007",
            ProfileFamily::Sash40404 => "40404",
            ProfileFamily::Separator40112 => "40112",
        }
    }
}

impl From<SashFamily> for ProfileFamily {
    fn from(family: SashFamily) -> Self {
        match family {
            SashFamily::P6007 => ProfileFamily::Sash6007,
            SashFamily::P40404 => ProfileFamily::Sash40404,
        }
    }
}

/// Composite lookup key for a profile reference. The separator ignores
/// `series`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialKey {
    pub family: ProfileFamily,
    pub series: Series,
    pub color: Color,
}

impl MaterialKey {
    pub fn new(family: ProfileFamily, series: Series, color: Color) -> Self {
        Self {
            family,
            series,
            color,
        }
    }

    /// Catalog reference for this profile.
    ///
    /// Combinations the supplier does not stock fall back to the family's
    /// default: `3` (40100 white eurosist) for frames, `12` (6007 white
    /// inoforme) for sashes and `289` (40112 white eurosist) for separators.
    pub fn reference(&self) -> &'static str {
        use Color::*;
        use ProfileFamily::*;
        use Series::*;

        match (self.family, self.series, self.color) {
            (Frame40100, Eurosist, White | WoodFinish) => "3",
            (Frame40100, Inoforme, White) => "7",
            (Frame40100, EcoLoranzo, White) => "216",
            (Frame40100, Pral, WoodFinish) => "9",
            (Frame40100, Inter, WoodFinish) => "97",
            (Frame40100, Losanzo, Gray) => "208",
            (Frame40100, _, _) => "3",

            (Sash6007, Inoforme, White) => "12",
            (Sash6007, Gris, Gray) => "313",
            (Sash40404, Eurosist, White) => "94",
            (Sash40404, Inter, White) => "4",
            (Sash40404, Pral, WoodFinish) => "11",
            (Sash40404, Technoline, WoodFinish) => "156",
            (Sash40404, Eurosist, WoodFinish) => "400",
            (Sash6007 | Sash40404, _, _) => "12",

            (Separator40112, _, WoodFinish) => "96",
            (Separator40112, _, White | Gray) => "289",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareColor {
    Light,
    Dark,
}

impl HardwareColor {
    pub fn for_window(color: Color) -> Self {
        match color {
            Color::WoodFinish | Color::Gray => HardwareColor::Dark,
            Color::White => HardwareColor::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HardwareColor::Light => "white",
            HardwareColor::Dark => "black",
        }
    }

    pub fn refs(&self) -> HardwareRefs {
        match self {
            HardwareColor::Light => HardwareRefs {
                hinge: "35",
                espagnolette: "62",
            },
            HardwareColor::Dark => HardwareRefs {
                hinge: "36",
                espagnolette: "63",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareRefs {
    pub hinge: &'static str,
    pub espagnolette: &'static str,
}

/// Fixed references for parts that do not vary with color.
pub mod refs {
    pub const CORNER_BRACKET: &str = "43";
    pub const ALIGNMENT_BRACKET_PM: &str = "239";
    pub const ALIGNMENT_BRACKET_GM: &str = "91";
    pub const WEATHERSTRIP: &str = "90";
    pub const GLAZING_GASKET: &str = "89";
    pub const ESPAGNOLETTE_KIT: &str = "31";
    pub const LOCK_KIT: &str = "32";
    pub const ESPAGNOLETTE_ROD: &str = "61";
}

/// Prices used when the catalog has no entry for a reference.
pub mod fallback {
    pub const FRAME_PROFILE: f64 = 74.0;
    pub const SASH_PROFILE: f64 = 57.67;
    pub const SEPARATOR_PROFILE: f64 = 49.3;
    pub const CORNER_BRACKET: f64 = 1.2;
    /// Box of 100.
    pub const ALIGNMENT_BRACKET_PM: f64 = 4.5;
    /// Box of 100.
    pub const ALIGNMENT_BRACKET_GM: f64 = 5.5;
    pub const HINGE: f64 = 3.33;
    /// Roll of 50 m.
    pub const WEATHERSTRIP: f64 = 16.0;
    /// Roll of 50 m.
    pub const GLAZING_GASKET: f64 = 22.63;
    pub const ESPAGNOLETTE: f64 = 9.63;
    pub const ESPAGNOLETTE_KIT: f64 = 2.7;
    pub const LOCK_KIT: f64 = 2.76;
    pub const ESPAGNOLETTE_ROD: f64 = 1.7;
}

/// Pack sizes the catalog prices the above in.
pub const BRACKETS_PER_BOX: f64 = 100.0;
pub const GASKET_ROLL_METRES: f64 = 50.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_references() {
        let key = |series, color| MaterialKey::new(ProfileFamily::Frame40100, series, color);
        assert_eq!(key(Series::Eurosist, Color::White).reference(), "3");
        assert_eq!(key(Series::Eurosist, Color::WoodFinish).reference(), "3");
        assert_eq!(key(Series::Inoforme, Color::White).reference(), "7");
        assert_eq!(key(Series::Pral, Color::WoodFinish).reference(), "9");
        assert_eq!(key(Series::Losanzo, Color::Gray).reference(), "208");
    }

    #[test]
    fn test_unstocked_combination_uses_family_default() {
        let frame = MaterialKey::new(ProfileFamily::Frame40100, Series::Losanzo, Color::White);
        assert_eq!(frame.reference(), "3");
        let sash = MaterialKey::new(ProfileFamily::Sash40404, Series::Gris, Color::White);
        assert_eq!(sash.reference(), "12");
    }

    #[test]
    fn test_sash_references() {
        let key = |family, series, color| MaterialKey::new(family, series, color);
        assert_eq!(
            key(ProfileFamily::Sash6007, Series::Gris, Color::Gray).reference(),
            "313"
        );
        assert_eq!(
            key(ProfileFamily::Sash40404, Series::Eurosist, Color::White).reference(),
            "94"
        );
        assert_eq!(
            key(ProfileFamily::Sash40404, Series::Eurosist, Color::WoodFinish).reference(),
            "400"
        );
    }

    #[test]
    fn test_separator_follows_color() {
        let key = |color| MaterialKey::new(ProfileFamily::Separator40112, Series::Eurosist, color);
        assert_eq!(key(Color::White).reference(), "289");
        assert_eq!(key(Color::WoodFinish).reference(), "96");
        assert_eq!(key(Color::Gray).reference(), "289");
    }

    #[test]
    fn test_hardware_color_rule() {
        assert_eq!(HardwareColor::for_window(Color::White), HardwareColor::Light);
        assert_eq!(HardwareColor::for_window(Color::WoodFinish), HardwareColor::Dark);
        assert_eq!(HardwareColor::for_window(Color::Gray), HardwareColor::Dark);
        assert_eq!(HardwareColor::Dark.refs().hinge, "36");
        assert_eq!(HardwareColor::Light.refs().espagnolette, "62");
    }

    #[test]
    fn test_hardware_refs_per_color() {
        assert_eq!(
            HardwareColor::Light.refs(),
            HardwareRefs {
                hinge: "35",
                espagnolette: "62",
            }
        );
        assert_eq!(
            HardwareColor::Dark.refs(),
            HardwareRefs {
                hinge: "36",
                espagnolette: "63",
            }
        );
    }
}

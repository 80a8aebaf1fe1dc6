//! Core types for spark-map.
//!
//! Plain values that flow from component props into the map backend:
//! coordinates, colors, styles, ids and view-change flags.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::MapError;

// =============================================================================
// Coordinate
// =============================================================================

/// A geographic position in degrees, longitude first.
///
/// Stored exactly as supplied. Projection is the backend's business.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    /// Create a coordinate from longitude and latitude.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self::new(lon, lat)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self::new(lon, lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels.
///
/// Alpha 255 = fully opaque, 0 = fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Parse hex color string (#RGB, #RRGGBB, #RRGGBBAA).
    ///
    /// Returns None for invalid format.
    ///
    /// # Examples
    ///
    /// ```
    /// use spark_map::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#ff0000"), Some(Rgba::rgb(255, 0, 0)));
    /// assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::rgb(255, 255, 255)));
    /// assert_eq!(Rgba::from_hex("3399CC80"), Some(Rgba::new(0x33, 0x99, 0xcc, 0x80)));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => {
                let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
                Some(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl FromStr for Rgba {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgba::from_hex(s).ok_or_else(|| MapError::InvalidColor(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Style
// =============================================================================

/// Outline of a vector feature.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Stroke {
    pub color: Rgba,
    #[serde(default = "Stroke::default_width")]
    pub width: f32,
}

impl Stroke {
    fn default_width() -> f32 {
        1.25
    }
}

/// Style applied to every feature of a vector layer.
///
/// Both parts are optional; an empty style means "backend default".
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Style {
    #[serde(default)]
    pub fill: Option<Rgba>,
    #[serde(default)]
    pub stroke: Option<Stroke>,
}

impl Style {
    pub fn fill(color: Rgba) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    pub fn with_stroke(mut self, color: Rgba, width: f32) -> Self {
        self.stroke = Some(Stroke { color, width });
        self
    }
}

// =============================================================================
// Identifiers
// =============================================================================

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) u64);

        impl $name {
            /// Raw numeric value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Identity of one map instance, for logs and journals.
    MapId,
    "map#"
);
id_type!(
    /// Identity of one layer object.
    LayerId,
    "layer#"
);
id_type!(
    /// Identity of one control object.
    ControlId,
    "control#"
);

/// Either kind of bound object, for registry bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectId {
    Layer(LayerId),
    Control(ControlId),
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Layer(id) => id.fmt(f),
            ObjectId::Control(id) => id.fmt(f),
        }
    }
}

// =============================================================================
// View changes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Which view properties a setter actually changed.
    ///
    /// Empty when the new value equals the old one.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ViewChange: u8 {
        const CENTER = 1 << 0;
        const ZOOM = 1 << 1;
        const ZOOM_RANGE = 1 << 2;
    }
}

// =============================================================================
// Tests
// =============================================================================

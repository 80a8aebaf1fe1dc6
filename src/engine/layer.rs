//! Layer objects and their sources.
//!
//! A `Layer` is what a layer binder constructs and hands to the backend.
//! It carries its source, an optional style, and a z-index. Rendering the
//! source is the backend's job.

use serde::Deserialize;
use serde_json::{Value, json};

use super::registry::allocate_layer_id;
use crate::types::{LayerId, Style};

/// OpenStreetMap's public tile endpoint.
pub const OSM_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the OpenStreetMap tile usage policy.
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

// =============================================================================
// Sources
// =============================================================================

/// Where a tile layer gets its raster tiles.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TileSource {
    /// OpenStreetMap standard tiles.
    #[default]
    Osm,
    /// Any `{z}/{x}/{y}` URL template.
    Xyz {
        url: String,
        #[serde(default = "TileSource::default_max_zoom")]
        max_zoom: u8,
    },
}

impl TileSource {
    fn default_max_zoom() -> u8 {
        19
    }

    pub fn xyz(url: impl Into<String>) -> Self {
        TileSource::Xyz {
            url: url.into(),
            max_zoom: Self::default_max_zoom(),
        }
    }

    pub fn url_template(&self) -> &str {
        match self {
            TileSource::Osm => OSM_URL_TEMPLATE,
            TileSource::Xyz { url, .. } => url,
        }
    }

    pub fn max_zoom(&self) -> u8 {
        match self {
            TileSource::Osm => Self::default_max_zoom(),
            TileSource::Xyz { max_zoom, .. } => *max_zoom,
        }
    }

    pub fn attribution(&self) -> Option<&'static str> {
        match self {
            TileSource::Osm => Some(OSM_ATTRIBUTION),
            TileSource::Xyz { .. } => None,
        }
    }
}

/// Where a vector layer gets its features.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorSource {
    /// Inline GeoJSON (a `Feature` or `FeatureCollection`).
    #[serde(rename = "geojson")]
    GeoJson(Value),
    /// GeoJSON fetched by the backend.
    Url(String),
}

impl VectorSource {
    /// Number of inline features, or None when the backend loads them.
    pub fn feature_count(&self) -> Option<usize> {
        match self {
            VectorSource::GeoJson(value) => Some(match value.get("type").and_then(Value::as_str) {
                Some("FeatureCollection") => value
                    .get("features")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len),
                Some("Feature") => 1,
                _ => 0,
            }),
            VectorSource::Url(_) => None,
        }
    }
}

impl Default for VectorSource {
    fn default() -> Self {
        VectorSource::GeoJson(json!({ "type": "FeatureCollection", "features": [] }))
    }
}

// =============================================================================
// Layer
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    Tile(TileSource),
    Vector {
        source: VectorSource,
        style: Option<Style>,
    },
}

/// A layer object. Owned by the binder that built it until attached.
#[derive(Debug)]
pub struct Layer {
    id: LayerId,
    kind: LayerKind,
    z_index: i32,
}

impl Layer {
    pub fn tile(source: TileSource) -> Self {
        Self::new(LayerKind::Tile(source))
    }

    pub fn vector(source: VectorSource, style: Option<Style>) -> Self {
        Self::new(LayerKind::Vector { source, style })
    }

    fn new(kind: LayerKind) -> Self {
        Self {
            id: allocate_layer_id(),
            kind,
            z_index: 0,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    pub fn is_tile(&self) -> bool {
        matches!(self.kind, LayerKind::Tile(_))
    }

    pub fn is_vector(&self) -> bool {
        matches!(self.kind, LayerKind::Vector { .. })
    }
}

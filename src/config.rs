//! Declarative map configuration.
//!
//! A [`MapConfig`] describes a whole map tree as data: the view, the layers
//! in mount order, and the controls. [`mount_config`] turns it into the same
//! component tree you would write by hand.
//!
//! ```json
//! {
//!   "center": [-94.9065, 38.9884],
//!   "zoom": 9,
//!   "layers": [
//!     { "type": "tile", "source": { "kind": "osm" } },
//!     { "type": "vector", "source": { "url": "counties.geojson" }, "z_index": 1,
//!       "style": { "fill": "#319fd340", "stroke": { "color": "#319fd3", "width": 2 } } }
//!   ],
//!   "controls": [{ "type": "full_screen" }]
//! }
//! ```

use serde::Deserialize;

use crate::engine::{ControlKind, MapFactory, Surface, TileSource, VectorSource};
use crate::error::MapError;
use crate::primitives::{
    ControlProps, MapMount, MapProps, TileLayerProps, VectorLayerProps, control, controls, layers,
    map_container, tile_layer, vector_layer,
};
use crate::types::{Coordinate, Style};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapConfig {
    pub center: Coordinate,
    pub zoom: f64,
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
    #[serde(default)]
    pub controls: Vec<ControlKind>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerConfig {
    Tile {
        #[serde(default)]
        source: TileSource,
        #[serde(default)]
        z_index: i32,
    },
    Vector {
        source: VectorSource,
        #[serde(default)]
        style: Option<Style>,
        #[serde(default)]
        z_index: i32,
    },
}

impl MapConfig {
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Mount a container with one binder per configured layer and control.
///
/// Layers mount first, in order, then controls.
pub fn mount_config(
    config: &MapConfig,
    factory: Option<MapFactory>,
    target: Option<Surface>,
) -> Result<MapMount, MapError> {
    let layer_configs = config.layers.clone();
    let control_kinds = config.controls.clone();

    tracing::debug!(
        layers = layer_configs.len(),
        controls = control_kinds.len(),
        "mounting map from config"
    );

    map_container(MapProps {
        center: config.center.into(),
        zoom: config.zoom.into(),
        target,
        factory,
        children: Some(Box::new(move |ctx| {
            vec![
                layers(|| {
                    layer_configs
                        .into_iter()
                        .map(|layer| match layer {
                            LayerConfig::Tile { source, z_index } => tile_layer(ctx, TileLayerProps {
                                source,
                                z_index: Some(z_index.into()),
                                ..Default::default()
                            }),
                            LayerConfig::Vector {
                                source,
                                style,
                                z_index,
                            } => vector_layer(ctx, VectorLayerProps {
                                source,
                                style,
                                z_index: Some(z_index.into()),
                                ..Default::default()
                            }),
                        })
                        .collect()
                }),
                controls(|| {
                    control_kinds
                        .into_iter()
                        .map(|kind| control(ctx, ControlProps { kind, ..Default::default() }))
                        .collect()
                }),
            ]
        })),
        ..Default::default()
    })
}

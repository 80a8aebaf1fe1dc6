//! # spark-map
//!
//! Declarative, reactive bindings for an interactive map.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A map is described as a component tree. The container creates exactly one
//! map instance and publishes it through a [`MapContext`]; every binder below
//! it reads that context, attaches one layer or control once the map is there,
//! and detaches it when it unmounts.
//!
//! ```text
//! map_container ──publish──▶ MapContext ──read──▶ tile_layer / vector_layer / control
//!       │                                                  │
//!       └── factory(options) ──▶ MapBackend ◀──add/remove──┘
//! ```
//!
//! Prop changes are applied in place: a new zoom is pushed onto the live
//! view, a new z-index onto the attached layer. Nothing is rebuilt for them.
//!
//! ## Modules
//!
//! - [`types`] - Coordinates, colors, styles, ids
//! - [`engine`] - The [`MapBackend`] seam, bound objects, the in-memory backend
//! - [`state`] - [`MapHandle`] and [`MapContext`]
//! - [`primitives`] - Container, binders, groups, `show`
//! - [`config`] - JSON map descriptions
//! - [`error`] - [`MapError`]

pub mod config;
pub mod engine;
pub mod error;
pub mod primitives;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{LayerConfig, MapConfig, mount_config};

pub use engine::{
    Control, ControlKind, FullScreenOptions, Layer, LayerKind, MapBackend, MapEvent, MapFactory,
    MapJournal, MapOptions, MemoryMap, Surface, TileSource, VectorSource, View, reset_registry,
};

pub use error::MapError;

pub use primitives::{
    Children, Cleanup, ControlProps, FullScreenProps, MapMount, MapProps, PropValue,
    TileLayerProps, VectorLayerProps, control, controls, full_screen_control, layers,
    map_container, show, tile_layer, vector_layer,
};

pub use state::{MapContext, MapHandle};

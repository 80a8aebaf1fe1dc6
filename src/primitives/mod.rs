//! Map Primitives - Component building blocks.
//!
//! This module provides the components of a map tree:
//! - [`map_container`] - Creates the map instance and publishes it
//! - [`tile_layer`] / [`vector_layer`] - Layer binders
//! - [`control`] / [`full_screen_control`] - Control binders
//! - [`layers`] / [`controls`] - Grouping placeholders
//! - [`show`] - Conditional mounting
//!
//! # Architecture
//!
//! Components are functions, not objects. Each binder:
//! 1. Reads the map handle from the [`MapContext`](crate::state::MapContext) it is given
//! 2. Builds its bound object once a live map is there
//! 3. Attaches it and re-applies reactive props in place
//! 4. Returns a cleanup that detaches it
//!
//! # Reactivity
//!
//! Props can be:
//! - Static values: `z_index: Some(2.into())`
//! - Signals: `z_index: Some(z_signal.into())` (stays connected!)
//! - Getters: `visible: Some(PropValue::Getter(Rc::new(move || zoom.get() > 8.0)))`

mod binder;
mod control;
mod control_flow;
mod group;
mod layer;
mod map_container;
mod types;

pub use control::{control, full_screen_control};
pub use control_flow::show;
pub use group::{controls, layers};
pub use layer::{tile_layer, vector_layer};
pub use map_container::{MapMount, map_container};
pub use types::*;

//! Map Backend - The seam to the mapping library.
//!
//! Everything the binding layer does to a map goes through [`MapBackend`].
//! The trait mirrors the imperative API a mapping library exposes: layer and
//! control collections, a view with center and zoom, and a visual target.
//!
//! Backends are constructed through a [`MapFactory`] so the container decides
//! *when* a map exists while the application decides *which* library backs it.

use std::rc::Rc;

use super::control::Control;
use super::layer::Layer;
use super::surface::Surface;
use super::view::View;
use crate::error::MapError;
use crate::types::{ControlId, Coordinate, LayerId, MapId, ViewChange};

/// An overlay anchored to a map position (popups, markers).
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub element: String,
    pub position: Option<Coordinate>,
}

/// Everything a backend needs to construct one map instance.
#[derive(Debug)]
pub struct MapOptions {
    pub id: MapId,
    pub view: View,
    pub layers: Vec<Layer>,
    pub controls: Vec<Control>,
    pub overlays: Vec<Overlay>,
}

impl MapOptions {
    /// Options with the given view and empty layer, control and overlay sets.
    pub fn new(id: MapId, view: View) -> Self {
        Self {
            id,
            view,
            layers: Vec::new(),
            controls: Vec::new(),
            overlays: Vec::new(),
        }
    }
}

/// Imperative API of a map instance.
///
/// Implementations own their layers and controls once added. Ids are unique
/// per instance; adding an id twice is refused.
pub trait MapBackend {
    fn id(&self) -> MapId;

    // Layers
    /// Returns false if a layer with the same id is already attached.
    fn add_layer(&mut self, layer: Layer) -> bool;
    fn remove_layer(&mut self, id: LayerId) -> Option<Layer>;
    /// Returns false if no such layer is attached.
    fn set_layer_z_index(&mut self, id: LayerId, z_index: i32) -> bool;
    fn layers(&self) -> &[Layer];

    // Controls
    /// Returns false if a control with the same id is already attached.
    fn add_control(&mut self, control: Control) -> bool;
    fn remove_control(&mut self, id: ControlId) -> Option<Control>;
    fn controls(&self) -> &[Control];

    // View
    fn view(&self) -> &View;
    fn set_center(&mut self, center: Coordinate) -> ViewChange;
    fn set_zoom(&mut self, zoom: f64) -> ViewChange;
    /// Limit the zoom levels the view accepts. The current zoom is re-clamped.
    fn set_zoom_range(&mut self, min: f64, max: f64) -> ViewChange;

    // Target
    /// Bind to a surface, or unbind with `None`.
    fn set_target(&mut self, target: Option<Surface>) -> Result<(), MapError>;
    fn target(&self) -> Option<&Surface>;

    /// Layer ids bottom to top: ascending z-index, ties in insertion order.
    fn render_order(&self) -> Vec<LayerId> {
        let mut layers: Vec<&Layer> = self.layers().iter().collect();
        layers.sort_by_key(|layer| layer.z_index());
        layers.into_iter().map(Layer::id).collect()
    }
}

/// Builds one backend per container activation.
pub type MapFactory = Rc<dyn Fn(MapOptions) -> Box<dyn MapBackend>>;

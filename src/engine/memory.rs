//! In-process map backend.
//!
//! `MemoryMap` keeps layers, controls and the view in plain collections and
//! writes every mutation to a shared [`MapJournal`]. It is the default backend
//! for containers without a factory, and what the tests observe.

use std::cell::RefCell;
use std::rc::Rc;

use super::backend::{MapBackend, MapFactory, MapOptions, Overlay};
use super::control::Control;
use super::layer::Layer;
use super::surface::Surface;
use super::view::View;
use crate::error::MapError;
use crate::types::{ControlId, Coordinate, LayerId, MapId, ViewChange};

// =============================================================================
// Journal
// =============================================================================

/// One call observed on a backend.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    Created { map: MapId },
    LayerAdded { map: MapId, layer: LayerId },
    LayerRemoved { map: MapId, layer: LayerId },
    LayerZIndex { map: MapId, layer: LayerId, z_index: i32 },
    ControlAdded { map: MapId, control: ControlId },
    ControlRemoved { map: MapId, control: ControlId },
    ViewChanged { map: MapId, change: ViewChange },
    TargetSet { map: MapId, surface: String },
    TargetCleared { map: MapId },
}

/// Shared, append-only log of backend calls.
///
/// Clones share the same log, so one journal can watch every map a factory
/// creates.
#[derive(Debug, Clone, Default)]
pub struct MapJournal {
    events: Rc<RefCell<Vec<MapEvent>>>,
}

impl MapJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: MapEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Snapshot of all events so far.
    pub fn events(&self) -> Vec<MapEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&MapEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }

    pub fn maps_created(&self) -> usize {
        self.count(|e| matches!(e, MapEvent::Created { .. }))
    }

    /// Layer and control attaches.
    pub fn attaches(&self) -> usize {
        self.count(|e| matches!(e, MapEvent::LayerAdded { .. } | MapEvent::ControlAdded { .. }))
    }

    /// Layer and control detaches.
    pub fn detaches(&self) -> usize {
        self.count(|e| matches!(e, MapEvent::LayerRemoved { .. } | MapEvent::ControlRemoved { .. }))
    }

    /// Layers added, in order.
    pub fn layers_added(&self) -> Vec<LayerId> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                MapEvent::LayerAdded { layer, .. } => Some(*layer),
                _ => None,
            })
            .collect()
    }
}

// =============================================================================
// MemoryMap
// =============================================================================

#[derive(Debug)]
pub struct MemoryMap {
    id: MapId,
    view: View,
    layers: Vec<Layer>,
    controls: Vec<Control>,
    overlays: Vec<Overlay>,
    target: Option<Surface>,
    journal: MapJournal,
}

impl MemoryMap {
    pub fn new(options: MapOptions) -> Self {
        Self::with_journal(options, MapJournal::default())
    }

    pub fn with_journal(options: MapOptions, journal: MapJournal) -> Self {
        journal.record(MapEvent::Created { map: options.id });
        Self {
            id: options.id,
            view: options.view,
            layers: options.layers,
            controls: options.controls,
            overlays: options.overlays,
            target: None,
            journal,
        }
    }

    /// A factory producing `MemoryMap`s that all log to `journal`.
    pub fn factory(journal: MapJournal) -> MapFactory {
        Rc::new(move |options| -> Box<dyn MapBackend> {
            Box::new(MemoryMap::with_journal(options, journal.clone()))
        })
    }

    pub fn journal(&self) -> &MapJournal {
        &self.journal
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    fn record_view(&self, change: ViewChange) -> ViewChange {
        if !change.is_empty() {
            self.journal.record(MapEvent::ViewChanged { map: self.id, change });
        }
        change
    }
}

impl MapBackend for MemoryMap {
    fn id(&self) -> MapId {
        self.id
    }

    fn add_layer(&mut self, layer: Layer) -> bool {
        if self.layers.iter().any(|l| l.id() == layer.id()) {
            tracing::warn!(map = %self.id, layer = %layer.id(), "layer already on map");
            return false;
        }
        self.journal.record(MapEvent::LayerAdded { map: self.id, layer: layer.id() });
        self.layers.push(layer);
        true
    }

    fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        let index = self.layers.iter().position(|l| l.id() == id)?;
        self.journal.record(MapEvent::LayerRemoved { map: self.id, layer: id });
        Some(self.layers.remove(index))
    }

    fn set_layer_z_index(&mut self, id: LayerId, z_index: i32) -> bool {
        let Some(layer) = self.layers.iter_mut().find(|l| l.id() == id) else {
            return false;
        };
        layer.set_z_index(z_index);
        self.journal.record(MapEvent::LayerZIndex { map: self.id, layer: id, z_index });
        true
    }

    fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn add_control(&mut self, control: Control) -> bool {
        if self.controls.iter().any(|c| c.id() == control.id()) {
            tracing::warn!(map = %self.id, control = %control.id(), "control already on map");
            return false;
        }
        self.journal.record(MapEvent::ControlAdded { map: self.id, control: control.id() });
        self.controls.push(control);
        true
    }

    fn remove_control(&mut self, id: ControlId) -> Option<Control> {
        let index = self.controls.iter().position(|c| c.id() == id)?;
        self.journal.record(MapEvent::ControlRemoved { map: self.id, control: id });
        Some(self.controls.remove(index))
    }

    fn controls(&self) -> &[Control] {
        &self.controls
    }

    fn view(&self) -> &View {
        &self.view
    }

    fn set_center(&mut self, center: Coordinate) -> ViewChange {
        let change = self.view.set_center(center);
        self.record_view(change)
    }

    fn set_zoom(&mut self, zoom: f64) -> ViewChange {
        let change = self.view.set_zoom(zoom);
        self.record_view(change)
    }

    fn set_zoom_range(&mut self, min: f64, max: f64) -> ViewChange {
        let change = self.view.set_zoom_range(min, max);
        self.record_view(change)
    }

    fn set_target(&mut self, target: Option<Surface>) -> Result<(), MapError> {
        match target {
            Some(surface) => {
                if surface.is_empty() {
                    return Err(MapError::EmptySurface { id: surface.id().to_string() });
                }
                self.journal.record(MapEvent::TargetSet {
                    map: self.id,
                    surface: surface.id().to_string(),
                });
                self.target = Some(surface);
            }
            None => {
                if self.target.take().is_some() {
                    self.journal.record(MapEvent::TargetCleared { map: self.id });
                }
            }
        }
        Ok(())
    }

    fn target(&self) -> Option<&Surface> {
        self.target.as_ref()
    }
}

// =============================================================================
// Tests
// =============================================================================

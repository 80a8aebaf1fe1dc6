//! Primitive types - Props and cleanup.
//!
//! These types define the interface for component props.
//! Props support static values, signals, and getters for reactivity.

use std::rc::Rc;

use spark_signals::Signal;

use crate::engine::{ControlKind, FullScreenOptions, MapFactory, Surface, TileSource, VectorSource};
use crate::state::MapContext;
use crate::types::{Coordinate, Style};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by components.
///
/// Call this to unmount the component and release what it bound.
pub type Cleanup = Box<dyn FnOnce()>;

/// Children of a map container.
///
/// Called once with the container's context after the map is published.
/// Returned cleanups run in reverse order when the container unmounts.
pub type Children = Box<dyn FnOnce(&MapContext) -> Vec<Cleanup>>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// Binders read props inside effects, so signals and getters stay live:
/// changing the signal re-applies the value to the bound object.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value. Inside an effect this subscribes to signals.
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

impl From<(f64, f64)> for PropValue<Coordinate> {
    fn from(value: (f64, f64)) -> Self {
        PropValue::Static(Coordinate::from(value))
    }
}

// =============================================================================
// Map Props
// =============================================================================

/// Properties for the map container.
///
/// # Example
///
/// ```ignore
/// use spark_map::primitives::{map_container, tile_layer, MapProps, TileLayerProps};
/// use spark_signals::signal;
///
/// let zoom = signal(9.0);
///
/// let mount = map_container(MapProps {
///     center: (-94.9065, 38.9884).into(),
///     zoom: zoom.clone().into(),
///     children: Some(Box::new(|ctx| vec![
///         tile_layer(ctx, TileLayerProps::default()),
///     ])),
///     ..Default::default()
/// })?;
///
/// // Pushed onto the live view, same instance
/// zoom.set(10.0);
/// ```
#[derive(Default)]
pub struct MapProps {
    /// Initial and live view center.
    pub center: PropValue<Coordinate>,

    /// Initial and live zoom level.
    pub zoom: PropValue<f64>,

    /// Allowed `(min, max)` zoom (default: 0 to 28). Zoom is clamped to it.
    pub zoom_range: Option<PropValue<(f64, f64)>>,

    /// Surface to bind the instance to. None leaves it unbound.
    pub target: Option<Surface>,

    /// Backend constructor. Defaults to an unjournaled `MemoryMap`.
    pub factory: Option<MapFactory>,

    /// Publish into an existing context instead of a fresh one.
    pub context: Option<MapContext>,

    /// Binders and groups mounted against the published map.
    pub children: Option<Children>,
}

// =============================================================================
// Layer Props
// =============================================================================

/// Properties for a tile layer binder.
#[derive(Clone, Default)]
pub struct TileLayerProps {
    pub source: TileSource,

    /// Stacking order (default: 0). Re-applied in place when it changes.
    pub z_index: Option<PropValue<i32>>,

    /// Whether the layer is attached (default: true).
    pub visible: Option<PropValue<bool>>,
}

/// Properties for a vector layer binder.
#[derive(Clone, Default)]
pub struct VectorLayerProps {
    pub source: VectorSource,

    /// Feature style. None leaves styling to the backend.
    pub style: Option<Style>,

    /// Stacking order (default: 0). Re-applied in place when it changes.
    pub z_index: Option<PropValue<i32>>,

    /// Whether the layer is attached (default: true).
    pub visible: Option<PropValue<bool>>,
}

// =============================================================================
// Control Props
// =============================================================================

/// Properties for a generic control binder.
#[derive(Clone, Default)]
pub struct ControlProps {
    pub kind: ControlKind,

    /// Whether the control is attached (default: true).
    pub visible: Option<PropValue<bool>>,
}

/// Properties for the full-screen control binder.
#[derive(Clone, Default)]
pub struct FullScreenProps {
    pub options: FullScreenOptions,

    /// Whether the control is attached (default: true).
    pub visible: Option<PropValue<bool>>,
}

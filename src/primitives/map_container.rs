//! Map Container - Owns the map instance for its subtree.
//!
//! The container is the only component that creates or releases a map:
//!
//! ```text
//! mount:   factory(options) → set_target → publish(handle) → view effects → children
//! unmount: children cleanups (reverse) → stop view effects → invalidate
//!          → set_target(None) → publish(None)
//! ```
//!
//! View props are watched by effects bound to the instance they were created
//! for. A zoom, zoom range or center change is pushed onto that live view;
//! the instance is never rebuilt for it.
//!
//! # Remounting
//!
//! [`MapMount::remount`] swaps in a fresh instance built from the current
//! view props. Children stay mounted: every binder sees the new handle in the
//! context and re-attaches to it.

use std::rc::Rc;

use spark_signals::{effect, effect_scope};
use tracing::{debug, trace, warn};

use super::types::{Cleanup, MapProps, PropValue};
use crate::engine::{
    self, DEFAULT_MIN_ZOOM, MapBackend, MapFactory, MapOptions, MemoryMap, Surface, View,
};
use crate::error::MapError;
use crate::state::{MapContext, MapHandle};
use crate::types::{Coordinate, ViewChange};

// =============================================================================
// Mount Handle
// =============================================================================

/// One created map instance and the effects feeding its view.
struct Activation {
    handle: MapHandle,
    stop_view_effects: Cleanup,
}

/// Handle returned by [`map_container`].
///
/// Unmounts on drop. Hold it for as long as the map should exist.
pub struct MapMount {
    context: MapContext,
    center: PropValue<Coordinate>,
    zoom: PropValue<f64>,
    zoom_range: Option<PropValue<(f64, f64)>>,
    target: Option<Surface>,
    factory: MapFactory,
    active: Option<Activation>,
    children: Vec<Cleanup>,
}

impl MapMount {
    /// The context children were mounted with.
    pub fn context(&self) -> &MapContext {
        &self.context
    }

    /// The current instance, while mounted.
    pub fn map(&self) -> Option<MapHandle> {
        self.active.as_ref().map(|a| a.handle.clone())
    }

    /// Replace the instance with a fresh one built from the current props.
    ///
    /// The old instance is released first; if unbinding it fails, the error
    /// is returned and no new instance is created. On any error the context
    /// is cleared and binders stay unbound until the next successful remount.
    pub fn remount(&mut self) -> Result<(), MapError> {
        if let Some(active) = self.active.take() {
            self.release(active).inspect_err(|_| self.context.publish(None))?;
        }
        self.activate().inspect_err(|_| self.context.publish(None))
    }

    /// Unmount children and release the instance.
    ///
    /// Returns the backend's error if unbinding from the surface fails. The
    /// instance is released either way.
    pub fn unmount(mut self) -> Result<(), MapError> {
        self.teardown()
    }

    /// Convert into a plain component cleanup. Unbind errors are logged.
    pub fn into_cleanup(self) -> Cleanup {
        Box::new(move || drop(self))
    }

    fn activate(&mut self) -> Result<(), MapError> {
        let id = engine::allocate_map_id();
        let mut view = View::new(self.center.get(), DEFAULT_MIN_ZOOM);
        if let Some(range) = &self.zoom_range {
            let (min, max) = range.get();
            view.set_zoom_range(min, max);
        }
        view.set_zoom(self.zoom.get());
        let mut backend = (self.factory)(MapOptions::new(id, view));

        if let Some(target) = &self.target {
            backend.set_target(Some(target.clone()))?;
        }

        let handle = MapHandle::new(backend);
        debug!(map = %handle.id(), "map created");

        let stop_view_effects = watch_view(
            &handle,
            self.center.clone(),
            self.zoom.clone(),
            self.zoom_range.clone(),
        );
        self.context.publish(Some(handle.clone()));
        self.active = Some(Activation {
            handle,
            stop_view_effects,
        });
        Ok(())
    }

    /// Release an instance without touching the context.
    fn release(&self, active: Activation) -> Result<(), MapError> {
        let Activation {
            handle,
            stop_view_effects,
        } = active;

        stop_view_effects();
        handle.invalidate();
        let unbound = handle.with_mut(|backend| backend.set_target(None));
        debug!(
            map = %handle.id(),
            orphaned = engine::attached_count_on(handle.id()),
            "map released"
        );
        unbound
    }

    fn teardown(&mut self) -> Result<(), MapError> {
        for cleanup in self.children.drain(..).rev() {
            cleanup();
        }
        let Some(active) = self.active.take() else {
            return Ok(());
        };
        let released = self.release(active);
        self.context.publish(None);
        released
    }
}

impl Drop for MapMount {
    fn drop(&mut self) {
        if let Err(err) = self.teardown() {
            warn!(error = %err, "failed to unbind map from surface");
        }
    }
}

/// Push center, zoom and zoom-range changes onto `handle`'s view while it is live.
fn watch_view(
    handle: &MapHandle,
    center: PropValue<Coordinate>,
    zoom: PropValue<f64>,
    zoom_range: Option<PropValue<(f64, f64)>>,
) -> Cleanup {
    let scope = effect_scope(false);
    let for_zoom = handle.clone();
    let for_center = handle.clone();

    scope.run(move || {
        // Range first, so a widened range lets the requested zoom through
        let _zoom_effect = effect(move || {
            let range = zoom_range.as_ref().map(PropValue::get);
            let zoom = zoom.get();
            push_view(&for_zoom, |backend| {
                let change = match range {
                    Some((min, max)) => backend.set_zoom_range(min, max),
                    None => ViewChange::empty(),
                };
                change | backend.set_zoom(zoom)
            });
        });
        let _center_effect = effect(move || {
            let center = center.get();
            push_view(&for_center, |backend| backend.set_center(center));
        });
    });

    Box::new(move || {
        scope.stop();
    })
}

fn push_view(handle: &MapHandle, apply: impl FnOnce(&mut dyn MapBackend) -> ViewChange) {
    if !handle.is_live() {
        trace!(map = %handle.id(), "map released; ignoring view update");
        return;
    }
    let change = handle.with_mut(apply);
    if !change.is_empty() {
        trace!(map = %handle.id(), ?change, "view updated");
    }
}

// =============================================================================
// map_container()
// =============================================================================

/// Create a map container.
///
/// Builds one instance from `props.center` and `props.zoom` with empty layer,
/// control and overlay sets, binds it to `props.target`, publishes it, then
/// mounts `props.children` with the context.
///
/// Errors from the backend (binding the surface) are returned unchanged.
pub fn map_container(props: MapProps) -> Result<MapMount, MapError> {
    let MapProps {
        center,
        zoom,
        zoom_range,
        target,
        factory,
        context,
        children,
    } = props;

    let factory: MapFactory = match factory {
        Some(factory) => factory,
        None => Rc::new(|options| -> Box<dyn MapBackend> { Box::new(MemoryMap::new(options)) }),
    };

    let mut mount = MapMount {
        context: context.unwrap_or_default(),
        center,
        zoom,
        zoom_range,
        target,
        factory,
        active: None,
        children: Vec::new(),
    };
    mount.activate()?;

    if let Some(children) = children {
        let ctx = mount.context.clone();
        mount.children = children(&ctx);
    }

    Ok(mount)
}

// =============================================================================
// Tests
// =============================================================================

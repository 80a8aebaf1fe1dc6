//! Layer Binders - Tile and vector layers.
//!
//! Both binders construct a fresh [`Layer`] each time they bind, attach it
//! to the map in the context, then apply the z-index. A reactive `z_index`
//! is re-applied to the attached layer in place: no detach, no new layer.
//!
//! # Example
//!
//! ```ignore
//! use spark_map::primitives::{vector_layer, VectorLayerProps};
//! use spark_map::types::{Rgba, Style};
//! use spark_signals::signal;
//!
//! let z = signal(1);
//!
//! let cleanup = vector_layer(&ctx, VectorLayerProps {
//!     source: counties,
//!     style: Some(Style::fill(Rgba::rgb(49, 159, 211))),
//!     z_index: Some(z.clone().into()),
//!     ..Default::default()
//! });
//!
//! z.set(5); // same layer, new stacking order
//! cleanup(); // detached
//! ```

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::effect;
use tracing::trace;

use super::binder::{BindingCell, bind};
use super::types::{Cleanup, PropValue, TileLayerProps, VectorLayerProps};
use crate::engine::{Layer, MapBackend};
use crate::state::MapContext;
use crate::types::LayerId;

/// Create a tile layer binder.
///
/// Returns a cleanup function that detaches the layer.
pub fn tile_layer(ctx: &MapContext, props: TileLayerProps) -> Cleanup {
    let TileLayerProps {
        source,
        z_index,
        visible,
    } = props;

    bind_layer(ctx, move || Layer::tile(source.clone()), z_index, visible)
}

/// Create a vector layer binder.
///
/// Returns a cleanup function that detaches the layer.
pub fn vector_layer(ctx: &MapContext, props: VectorLayerProps) -> Cleanup {
    let VectorLayerProps {
        source,
        style,
        z_index,
        visible,
    } = props;

    bind_layer(ctx, move || Layer::vector(source.clone(), style), z_index, visible)
}

fn bind_layer(
    ctx: &MapContext,
    build: impl Fn() -> Layer + 'static,
    z_index: Option<PropValue<i32>>,
    visible: Option<PropValue<bool>>,
) -> Cleanup {
    // Latest z-index, read untracked by the attach path
    let current_z = Rc::new(Cell::new(0));
    let z_for_attach = current_z.clone();

    bind(
        ctx,
        build,
        visible,
        move |backend: &mut dyn MapBackend, id: LayerId| {
            backend.set_layer_z_index(id, z_for_attach.get());
        },
        move |binding: BindingCell<LayerId>| match z_index {
            None => {}
            Some(PropValue::Static(z)) => current_z.set(z),
            Some(reactive) => {
                let _effect_cleanup = effect(move || {
                    let z = reactive.get();
                    current_z.set(z);
                    reapply_z_index(&binding, z);
                });
            }
        },
    )
}

fn reapply_z_index(binding: &BindingCell<LayerId>, z_index: i32) {
    let binding = binding.borrow();
    let Some(bound) = binding.as_ref() else {
        return;
    };
    if !bound.map.is_live() {
        return;
    }
    let applied = bound.map.with_mut(|backend| backend.set_layer_z_index(bound.id, z_index));
    trace!(map = %bound.map.id(), layer = %bound.id, z_index, applied, "z-index re-applied");
}

// =============================================================================
// Tests
// =============================================================================

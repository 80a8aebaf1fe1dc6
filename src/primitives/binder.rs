//! Binder - Attach/detach machinery shared by layer and control binders.
//!
//! # Pattern: EffectScope-based Binding
//!
//! Every binder follows the same steps:
//! 1. Create an EffectScope that owns the binding's lifetime
//! 2. Inside `scope.run()`, create an effect that reads the context slot and
//!    the `visible` prop
//! 3. The effect reconciles: detach from the old map, build a fresh object,
//!    attach to the new map
//! 4. Register the final detach with `on_scope_dispose()`
//! 5. Return `Box::new(move || scope.stop())` as the Cleanup
//!
//! # State Machine
//!
//! ```text
//!            live map observed && visible
//!  Unbound ───────────────────────────────▶ Bound
//!     ▲                                       │
//!     └───── hidden / map changed / stop ─────┘
//! ```
//!
//! The effect only acts when the target map actually changes, so re-running
//! with the same map (for example `visible` set to true twice) never attaches
//! twice.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use spark_signals::{effect, effect_scope, on_scope_dispose};
use tracing::{debug, trace, warn};

use super::types::{Cleanup, PropValue};
use crate::engine::{self, Control, Layer, MapBackend};
use crate::state::{MapContext, MapHandle};
use crate::types::{ControlId, LayerId, ObjectId};

// =============================================================================
// Bindable objects
// =============================================================================

/// An object a binder can attach to a map.
pub(crate) trait Bindable: 'static {
    type Id: Copy + fmt::Display + 'static;

    const KIND: &'static str;

    fn id(&self) -> Self::Id;
    fn object_id(id: Self::Id) -> ObjectId;
    /// Returns false if the backend refused the object.
    fn attach(self, map: &mut dyn MapBackend) -> bool;
    fn detach(id: Self::Id, map: &mut dyn MapBackend) -> bool;
}

impl Bindable for Layer {
    type Id = LayerId;

    const KIND: &'static str = "layer";

    fn id(&self) -> LayerId {
        Layer::id(self)
    }

    fn object_id(id: LayerId) -> ObjectId {
        ObjectId::Layer(id)
    }

    fn attach(self, map: &mut dyn MapBackend) -> bool {
        map.add_layer(self)
    }

    fn detach(id: LayerId, map: &mut dyn MapBackend) -> bool {
        map.remove_layer(id).is_some()
    }
}

impl Bindable for Control {
    type Id = ControlId;

    const KIND: &'static str = "control";

    fn id(&self) -> ControlId {
        Control::id(self)
    }

    fn object_id(id: ControlId) -> ObjectId {
        ObjectId::Control(id)
    }

    fn attach(self, map: &mut dyn MapBackend) -> bool {
        map.add_control(self)
    }

    fn detach(id: ControlId, map: &mut dyn MapBackend) -> bool {
        map.remove_control(id).is_some()
    }
}

// =============================================================================
// Binding state
// =============================================================================

/// A bound object: which map it is on and its id there.
pub(crate) struct Binding<Id> {
    pub map: MapHandle,
    pub id: Id,
}

/// Shared slot holding the current binding (None = Unbound).
pub(crate) type BindingCell<Id> = Rc<RefCell<Option<Binding<Id>>>>;

/// Attach `object` to `map`. None (still Unbound) if the registry or the
/// backend already holds an object with the same id.
fn acquire<O: Bindable>(
    map: MapHandle,
    object: O,
    after_attach: &dyn Fn(&mut dyn MapBackend, O::Id),
) -> Option<Binding<O::Id>> {
    let id = object.id();
    if !engine::record_attach(O::object_id(id), map.id()) {
        return None;
    }
    let attached = map.with_mut(|backend| {
        let attached = object.attach(backend);
        if attached {
            after_attach(backend, id);
        }
        attached
    });
    if !attached {
        engine::record_detach(O::object_id(id));
        warn!(map = %map.id(), object = %id, kind = O::KIND, "backend refused object; staying unbound");
        return None;
    }
    debug!(map = %map.id(), object = %id, kind = O::KIND, "attached");
    Some(Binding { map, id })
}

fn release<O: Bindable>(binding: Binding<O::Id>) {
    let Binding { map, id } = binding;
    engine::record_detach(O::object_id(id));
    if !map.is_live() {
        trace!(map = %map.id(), object = %id, kind = O::KIND, "map released; nothing to detach");
        return;
    }
    let removed = map.with_mut(|backend| O::detach(id, backend));
    if removed {
        debug!(map = %map.id(), object = %id, kind = O::KIND, "detached");
    } else {
        trace!(map = %map.id(), object = %id, kind = O::KIND, "already gone from map");
    }
}

// =============================================================================
// bind()
// =============================================================================

/// Keep one object built by `build` attached to whatever live map `ctx` holds.
///
/// * `build` - Constructs a fresh object on every attach
/// * `visible` - Optional reactive gate (default: always attached)
/// * `after_attach` - Runs on the backend right after each attach
/// * `setup` - Runs inside the binder's scope before the attach effect, with
///   access to the binding slot (used for props re-applied in place)
pub(crate) fn bind<O, B, A, S>(
    ctx: &MapContext,
    build: B,
    visible: Option<PropValue<bool>>,
    after_attach: A,
    setup: S,
) -> Cleanup
where
    O: Bindable,
    B: Fn() -> O + 'static,
    A: Fn(&mut dyn MapBackend, O::Id) + 'static,
    S: FnOnce(BindingCell<O::Id>),
{
    let binding: BindingCell<O::Id> = Rc::new(RefCell::new(None));
    let binding_for_effect = binding.clone();
    let binding_for_dispose = binding.clone();
    let ctx = ctx.clone();

    let scope = effect_scope(false);

    scope.run(move || {
        setup(binding);

        let _effect_cleanup = effect(move || {
            // Both reads subscribe
            let shown = visible.as_ref().is_none_or(|v| v.get());
            let target = ctx.map().filter(|m| shown && m.is_live());

            let mut current = binding_for_effect.borrow_mut();
            if current.as_ref().map(|b| &b.map) == target.as_ref() {
                return;
            }

            if let Some(previous) = current.take() {
                release::<O>(previous);
            }
            if let Some(map) = target {
                *current = acquire(map, build(), &after_attach);
            }
        });

        on_scope_dispose(move || {
            if let Some(previous) = binding_for_dispose.borrow_mut().take() {
                release::<O>(previous);
            }
        });
    });

    Box::new(move || {
        scope.stop();
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        MapJournal, MapOptions, MemoryMap, TileSource, VectorSource, View, allocate_map_id,
        attached_count, reset_registry,
    };
    use spark_signals::signal;

    fn live_map(journal: &MapJournal) -> MapHandle {
        let options = MapOptions::new(allocate_map_id(), View::default());
        MapHandle::new(Box::new(MemoryMap::with_journal(options, journal.clone())))
    }

    fn bind_tile(ctx: &MapContext, visible: Option<PropValue<bool>>) -> Cleanup {
        bind(ctx, || Layer::tile(TileSource::Osm), visible, |_, _| {}, |_| {})
    }

    #[test]
    fn test_waits_for_map() {
        reset_registry();
        let journal = MapJournal::new();
        let ctx = MapContext::new();

        let cleanup = bind_tile(&ctx, None);
        assert_eq!(journal.attaches(), 0, "nothing to attach to yet");

        ctx.publish(Some(live_map(&journal)));
        assert_eq!(journal.attaches(), 1);
        assert_eq!(attached_count(), 1);

        cleanup();
        assert_eq!(journal.detaches(), 1);
        assert_eq!(attached_count(), 0);
    }

    #[test]
    fn test_follows_map_replacement() {
        reset_registry();
        let journal = MapJournal::new();
        let ctx = MapContext::new();
        let first = live_map(&journal);
        let second = live_map(&journal);

        ctx.publish(Some(first.clone()));
        let _cleanup = bind_tile(&ctx, None);
        assert_eq!(first.with(|m| m.layers().len()), 1);

        ctx.publish(Some(second.clone()));
        assert_eq!(first.with(|m| m.layers().len()), 0, "detached from old map");
        assert_eq!(second.with(|m| m.layers().len()), 1, "attached to new map");
        assert_eq!(attached_count(), 1);
    }

    #[test]
    fn test_dead_map_skips_detach() {
        reset_registry();
        let journal = MapJournal::new();
        let ctx = MapContext::new();
        let map = live_map(&journal);

        ctx.publish(Some(map.clone()));
        let cleanup = bind_tile(&ctx, None);

        map.invalidate();
        cleanup();

        assert_eq!(journal.detaches(), 0, "released map is not touched");
        assert_eq!(attached_count(), 0, "bookkeeping still cleared");
    }

    #[test]
    fn test_visible_gate() {
        reset_registry();
        let journal = MapJournal::new();
        let ctx = MapContext::new();
        ctx.publish(Some(live_map(&journal)));

        let visible = signal(false);
        let _cleanup = bind_tile(&ctx, Some(visible.clone().into()));
        assert_eq!(journal.attaches(), 0);

        visible.set(true);
        assert_eq!(journal.attaches(), 1);

        visible.set(false);
        assert_eq!(journal.detaches(), 1);
    }

    #[test]
    fn test_after_attach_runs_per_attach() {
        reset_registry();
        let journal = MapJournal::new();
        let ctx = MapContext::new();
        let calls = Rc::new(std::cell::Cell::new(0));
        let calls_clone = calls.clone();

        let _cleanup = bind(
            &ctx,
            || Control::new(Default::default()),
            None,
            move |_, _| calls_clone.set(calls_clone.get() + 1),
            |_| {},
        );
        assert_eq!(calls.get(), 0);

        ctx.publish(Some(live_map(&journal)));
        ctx.publish(Some(live_map(&journal)));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_backend_id_collision_stays_unbound() {
        reset_registry();
        let journal = MapJournal::new();
        let ctx = MapContext::new();
        let map = live_map(&journal);
        ctx.publish(Some(map.clone()));

        let first = bind_tile(&ctx, None);
        // Ids restart while the first layer is still on the map
        reset_registry();
        let second = bind(
            &ctx,
            || Layer::vector(VectorSource::default(), None),
            None,
            |_, _| {},
            |_| {},
        );

        assert_eq!(journal.attaches(), 1);
        assert!(map.with(|m| m.layers()[0].is_tile()));

        second();
        assert_eq!(journal.detaches(), 0, "other binder's layer left alone");
        assert_eq!(map.with(|m| m.layers().len()), 1);

        first();
        assert_eq!(journal.detaches(), 1);
    }

    #[test]
    fn test_registry_collision_stays_unbound() {
        reset_registry();
        let journal = MapJournal::new();
        let ctx = MapContext::new();
        let map = live_map(&journal);

        // The next object id is already recorded against another map
        let other = allocate_map_id();
        assert!(engine::record_attach(ObjectId::Layer(LayerId(1)), other));

        ctx.publish(Some(map.clone()));
        let cleanup = bind_tile(&ctx, None);
        assert_eq!(journal.attaches(), 0);
        assert!(map.with(|m| m.layers().is_empty()));

        cleanup();
        assert_eq!(engine::attached_to(ObjectId::Layer(LayerId(1))), Some(other));
    }
}

//! Bound Object Registry - Id allocation and attachment bookkeeping.
//!
//! Tracks, per thread:
//! - Monotonic ids for maps, layers and controls
//! - Which map each bound object is currently attached to
//!
//! The attachment table is what enforces "a bound object is attached to at
//! most one map". Binders record every attach and detach here, including
//! detaches that skip the backend because the map is already gone.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::types::{ControlId, LayerId, MapId, ObjectId};

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Next map id.
    static NEXT_MAP_ID: Cell<u64> = const { Cell::new(1) };

    /// Next layer or control id. Shared so object ids never collide in logs.
    static NEXT_OBJECT_ID: Cell<u64> = const { Cell::new(1) };

    /// Bound object -> map it is attached to.
    static ATTACHED: RefCell<HashMap<ObjectId, MapId>> = RefCell::new(HashMap::new());
}

fn next_object_id() -> u64 {
    NEXT_OBJECT_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    })
}

// =============================================================================
// Id Allocation
// =============================================================================

/// Allocate an id for a new map instance.
pub fn allocate_map_id() -> MapId {
    NEXT_MAP_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        MapId(id)
    })
}

/// Allocate an id for a new layer object.
pub fn allocate_layer_id() -> LayerId {
    LayerId(next_object_id())
}

/// Allocate an id for a new control object.
pub fn allocate_control_id() -> ControlId {
    ControlId(next_object_id())
}

// =============================================================================
// Attachment Tracking
// =============================================================================

/// Record that `object` was attached to `map`.
///
/// Returns false (and leaves the table untouched) if the object is already
/// attached somewhere.
pub fn record_attach(object: ObjectId, map: MapId) -> bool {
    ATTACHED.with(|table| {
        let mut table = table.borrow_mut();
        if let Some(existing) = table.get(&object) {
            tracing::warn!(%object, %map, attached_to = %existing, "object already attached");
            return false;
        }
        table.insert(object, map);
        true
    })
}

/// Record that `object` is no longer attached. Returns the map it was on.
pub fn record_detach(object: ObjectId) -> Option<MapId> {
    ATTACHED.with(|table| table.borrow_mut().remove(&object))
}

/// The map `object` is attached to, if any.
pub fn attached_to(object: ObjectId) -> Option<MapId> {
    ATTACHED.with(|table| table.borrow().get(&object).copied())
}

/// Number of bound objects currently attached to any map.
pub fn attached_count() -> usize {
    ATTACHED.with(|table| table.borrow().len())
}

/// Number of bound objects currently attached to `map`.
pub fn attached_count_on(map: MapId) -> usize {
    ATTACHED.with(|table| table.borrow().values().filter(|m| **m == map).count())
}

/// Reset all registry state (for testing).
pub fn reset_registry() {
    NEXT_MAP_ID.with(|next| next.set(1));
    NEXT_OBJECT_ID.with(|next| next.set(1));
    ATTACHED.with(|table| table.borrow_mut().clear());
}

// =============================================================================
// Tests
// =============================================================================

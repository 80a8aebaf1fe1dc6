//! Map Context - The shared handle slot passed to every binder.
//!
//! A container publishes its map instance here; binders read it. The slot is
//! a signal, so a binder's effect re-runs whenever the instance appears,
//! disappears, or is replaced.
//!
//! # Example
//!
//! ```ignore
//! use spark_map::state::MapContext;
//!
//! let ctx = MapContext::new();
//! assert!(ctx.map().is_none()); // "not yet set" is a normal state
//!
//! // Later, inside a binder effect:
//! if let Some(map) = ctx.map().filter(|m| m.is_live()) {
//!     map.with_mut(|backend| backend.add_layer(layer));
//! }
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::engine::MapBackend;
use crate::types::MapId;

// =============================================================================
// Map Handle
// =============================================================================

struct MapCell {
    id: MapId,
    backend: RefCell<Box<dyn MapBackend>>,
    live: Cell<bool>,
}

/// Shared reference to one map instance.
///
/// Equality is identity: two handles are equal only if they point at the
/// same instance. A handle stays valid to call after its container is torn
/// down, but `is_live()` turns false and binders stop touching it.
#[derive(Clone)]
pub struct MapHandle(Rc<MapCell>);

impl MapHandle {
    pub(crate) fn new(backend: Box<dyn MapBackend>) -> Self {
        Self(Rc::new(MapCell {
            id: backend.id(),
            backend: RefCell::new(backend),
            live: Cell::new(true),
        }))
    }

    pub fn id(&self) -> MapId {
        self.0.id
    }

    /// False once the owning container has released the instance.
    pub fn is_live(&self) -> bool {
        self.0.live.get()
    }

    pub(crate) fn invalidate(&self) {
        self.0.live.set(false);
    }

    /// Read the backend.
    pub fn with<R>(&self, f: impl FnOnce(&dyn MapBackend) -> R) -> R {
        let backend = self.0.backend.borrow();
        f(&**backend)
    }

    /// Mutate the backend.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut dyn MapBackend) -> R) -> R {
        let mut backend = self.0.backend.borrow_mut();
        f(&mut **backend)
    }
}

impl PartialEq for MapHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for MapHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapHandle")
            .field("id", &self.0.id)
            .field("live", &self.0.live.get())
            .finish()
    }
}

// =============================================================================
// Map Context
// =============================================================================

/// The slot a container writes and binders read.
///
/// Cloning is cheap; clones share the slot.
#[derive(Clone)]
pub struct MapContext {
    slot: Signal<Option<MapHandle>>,
}

impl MapContext {
    /// An empty context. Binders mounted against it wait for a container.
    pub fn new() -> Self {
        Self { slot: signal(None) }
    }

    /// The published map, if any. Reactive: reading inside an effect
    /// subscribes to changes.
    pub fn map(&self) -> Option<MapHandle> {
        self.slot.get()
    }

    /// True if a live map is published.
    pub fn is_ready(&self) -> bool {
        self.map().is_some_and(|m| m.is_live())
    }

    pub(crate) fn publish(&self, map: Option<MapHandle>) {
        tracing::trace!(map = ?map.as_ref().map(MapHandle::id), "publishing map handle");
        self.slot.set(map);
    }
}

impl Default for MapContext {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Grouping placeholders - `layers` and `controls`.
//!
//! Purely organizational: they mount their children as given and hand back
//! one cleanup for the lot. No state, no effects.
//!
//! ```ignore
//! Box::new(|ctx| vec![
//!     layers(|| vec![
//!         tile_layer(ctx, TileLayerProps::default()),
//!         vector_layer(ctx, counties),
//!     ]),
//!     controls(|| vec![full_screen_control(ctx, FullScreenProps::default())]),
//! ])
//! ```

use super::types::Cleanup;

/// Group layer binders.
pub fn layers(children: impl FnOnce() -> Vec<Cleanup>) -> Cleanup {
    group(children)
}

/// Group control binders.
pub fn controls(children: impl FnOnce() -> Vec<Cleanup>) -> Cleanup {
    group(children)
}

/// Run children in order; the cleanup runs theirs in reverse.
pub(crate) fn group(children: impl FnOnce() -> Vec<Cleanup>) -> Cleanup {
    let cleanups = children();
    Box::new(move || {
        for cleanup in cleanups.into_iter().rev() {
            cleanup();
        }
    })
}

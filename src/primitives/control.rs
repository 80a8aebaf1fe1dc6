//! Control Binders - Widgets on the map's control collection.
//!
//! Same lifecycle as the layer binders, against `add_control` and
//! `remove_control`. Controls have no stacking order.

use super::binder::bind;
use super::types::{Cleanup, ControlProps, FullScreenProps};
use crate::engine::{Control, ControlKind};
use crate::state::MapContext;

/// Create a control binder for any control kind.
///
/// Returns a cleanup function that detaches the control.
pub fn control(ctx: &MapContext, props: ControlProps) -> Cleanup {
    let ControlProps { kind, visible } = props;

    bind(ctx, move || Control::new(kind.clone()), visible, |_, _| {}, |_| {})
}

/// Create a full-screen toggle control binder.
///
/// # Example
///
/// ```ignore
/// use spark_map::primitives::{full_screen_control, FullScreenProps};
///
/// let cleanup = full_screen_control(&ctx, FullScreenProps::default());
/// ```
pub fn full_screen_control(ctx: &MapContext, props: FullScreenProps) -> Cleanup {
    control(ctx, ControlProps {
        kind: ControlKind::FullScreen(props.options),
        visible: props.visible,
    })
}

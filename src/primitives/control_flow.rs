//! Control Flow - Conditional mounting.
//!
//! [`show`] mounts one of two branches depending on a reactive condition.
//! Every flip runs the previous branch's cleanup before mounting the next,
//! so a binder inside a branch gets exactly one attach and one detach per
//! cycle.
//!
//! # Pattern: EffectScope-based Cleanup
//!
//! 1. Create an EffectScope to own the condition effect
//! 2. Run the effect inside `scope.run()`
//! 3. Register the live branch's cleanup with `on_scope_dispose()`
//! 4. Return `Box::new(move || scope.stop())` as the Cleanup

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{effect, effect_scope, on_scope_dispose};
use tracing::trace;

use crate::primitives::Cleanup;

/// Conditionally mount components based on a reactive condition.
///
/// # Arguments
///
/// * `condition` - Getter that returns boolean (creates reactive dependency)
/// * `then_fn` - Mounts the true branch, returns its cleanup
/// * `else_fn` - Optional false branch
///
/// # Example
///
/// ```ignore
/// use spark_map::primitives::{show, vector_layer, Cleanup};
/// use spark_signals::signal;
///
/// let show_counties = signal(true);
/// let flag = show_counties.clone();
/// let ctx_for_branch = ctx.clone();
///
/// let cleanup = show(
///     move || flag.get(),
///     move || vector_layer(&ctx_for_branch, counties.clone()),
///     None::<fn() -> Cleanup>,
/// );
///
/// show_counties.set(false); // layer detached
/// cleanup();
/// ```
pub fn show<ThenF, ElseF, ThenR, ElseR>(
    condition: impl Fn() -> bool + 'static,
    then_fn: ThenF,
    else_fn: Option<ElseF>,
) -> Cleanup
where
    ThenF: Fn() -> ThenR + 'static,
    ElseF: Fn() -> ElseR + 'static,
    ThenR: Into<Cleanup>,
    ElseR: Into<Cleanup>,
{
    let branch: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(None));
    let last: Rc<Cell<Option<bool>>> = Rc::new(Cell::new(None));

    let branch_for_effect = branch.clone();
    let branch_for_dispose = branch;

    let scope = effect_scope(false);

    scope.run(move || {
        let _effect_cleanup = effect(move || {
            let current = condition();
            if last.get() == Some(current) {
                return;
            }
            last.set(Some(current));
            trace!(condition = current, "show branch flip");

            let previous = branch_for_effect.borrow_mut().take();
            if let Some(cleanup) = previous {
                cleanup();
            }

            let next = if current {
                Some(then_fn().into())
            } else {
                else_fn.as_ref().map(|f| f().into())
            };
            *branch_for_effect.borrow_mut() = next;
        });

        on_scope_dispose(move || {
            let live = branch_for_dispose.borrow_mut().take();
            if let Some(cleanup) = live {
                cleanup();
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
    use crate::engine::{MapJournal, MapOptions, MemoryMap, View, allocate_map_id, reset_registry};
    use crate::primitives::{TileLayerProps, tile_layer};
    use crate::state::{MapContext, MapHandle};
    use spark_signals::signal;

    fn counter(count: &Rc<Cell<i32>>) -> Cleanup {
        count.set(count.get() + 1);
        let count = count.clone();
        Box::new(move || count.set(count.get() - 1))
    }

    #[test]
    fn test_show_toggles_branches() {
        let condition = signal(true);
        let cond_clone = condition.clone();
        let then_live = Rc::new(Cell::new(0));
        let else_live = Rc::new(Cell::new(0));
        let (t, e) = (then_live.clone(), else_live.clone());

        let cleanup = show(
            move || cond_clone.get(),
            move || counter(&t),
            Some(move || counter(&e)),
        );
        assert_eq!((then_live.get(), else_live.get()), (1, 0));

        condition.set(false);
        assert_eq!((then_live.get(), else_live.get()), (0, 1));

        cleanup();
        assert_eq!((then_live.get(), else_live.get()), (0, 0));
    }

    #[test]
    fn test_show_no_else() {
        let condition = signal(false);
        let cond_clone = condition.clone();
        let live = Rc::new(Cell::new(0));
        let l = live.clone();

        let _cleanup = show(move || cond_clone.get(), move || counter(&l), None::<fn() -> Cleanup>);
        assert_eq!(live.get(), 0);

        condition.set(true);
        assert_eq!(live.get(), 1);
    }

    #[test]
    fn test_show_mounts_binder() {
        reset_registry();
        let journal = MapJournal::new();
        let options = MapOptions::new(allocate_map_id(), View::default());
        let map = MapHandle::new(Box::new(MemoryMap::with_journal(options, journal.clone())));
        let ctx = MapContext::new();
        ctx.publish(Some(map));

        let mounted = signal(true);
        let flag = mounted.clone();
        let ctx_for_branch = ctx.clone();

        let cleanup = show(
            move || flag.get(),
            move || tile_layer(&ctx_for_branch, TileLayerProps::default()),
            None::<fn() -> Cleanup>,
        );

        for _ in 0..3 {
            mounted.set(false);
            mounted.set(true);
        }
        cleanup();

        assert_eq!(journal.attaches(), 4);
        assert_eq!(journal.detaches(), 4);
    }
}

#![forbid(unsafe_code)]

//! Random operation sequences for property tests.

use proptest::prelude::*;
use scenestack_core::Spring;
use scenestack_nav::{Navigator, NavigatorError, SceneHost};

/// One public navigator operation with its arguments abstracted.
///
/// Route arguments are picked by position so generated sequences stay
/// meaningful however the stack has changed.
#[derive(Debug, Clone, PartialEq)]
pub enum NavOp {
    Push,
    PushToFront,
    Pop,
    PopToTop,
    PopToRoute(usize),
    Replace,
    ReplaceAtIndex(isize),
    ReplacePrevious,
    ReplacePreviousAndPop,
    ResetTo,
    ImmediatelyReset(usize),
    JumpTo(usize),
    JumpForward,
    JumpBack,
    /// Advance this many frames.
    Frames(u8),
}

/// Strategy over [`NavOp`], weighted toward animated operations.
pub fn nav_op() -> impl Strategy<Value = NavOp> {
    prop_oneof![
        4 => Just(NavOp::Push),
        1 => Just(NavOp::PushToFront),
        3 => Just(NavOp::Pop),
        1 => Just(NavOp::PopToTop),
        1 => (0_usize..8).prop_map(NavOp::PopToRoute),
        1 => Just(NavOp::Replace),
        1 => (-4_isize..6).prop_map(NavOp::ReplaceAtIndex),
        1 => Just(NavOp::ReplacePrevious),
        1 => Just(NavOp::ReplacePreviousAndPop),
        1 => Just(NavOp::ResetTo),
        1 => (1_usize..5).prop_map(NavOp::ImmediatelyReset),
        1 => (0_usize..8).prop_map(NavOp::JumpTo),
        2 => Just(NavOp::JumpForward),
        2 => Just(NavOp::JumpBack),
        4 => any::<u8>().prop_map(NavOp::Frames),
    ]
}

/// Applies [`NavOp`]s with fresh `u32` routes.
#[derive(Debug, Clone, Default)]
pub struct OpRunner {
    next_route: u32,
}

impl OpRunner {
    /// Start numbering fresh routes after `first_free`.
    #[must_use]
    pub fn starting_at(first_free: u32) -> Self {
        Self {
            next_route: first_free,
        }
    }

    fn fresh(&mut self) -> u32 {
        let route = self.next_route;
        self.next_route += 1;
        route
    }

    /// Apply `op`. Precondition errors are returned, never panicked on.
    pub fn apply<H: SceneHost, S: Spring>(
        &mut self,
        nav: &mut Navigator<u32, H, S>,
        op: &NavOp,
    ) -> Result<(), NavigatorError> {
        let pick = |nav: &Navigator<u32, H, S>, slot: usize| {
            let routes = nav.routes();
            routes[slot % routes.len()]
        };
        match *op {
            NavOp::Push => nav.push(self.fresh()),
            NavOp::PushToFront => {
                nav.push_to_front(self.fresh());
                Ok(())
            }
            NavOp::Pop => nav.pop(),
            NavOp::PopToTop => nav.pop_to_top(),
            NavOp::PopToRoute(slot) => {
                let route = pick(nav, slot);
                nav.pop_to_route(&route)
            }
            NavOp::Replace => {
                nav.replace(self.fresh());
                Ok(())
            }
            NavOp::ReplaceAtIndex(index) => {
                nav.replace_at_index(self.fresh(), index);
                Ok(())
            }
            NavOp::ReplacePrevious => {
                nav.replace_previous(self.fresh());
                Ok(())
            }
            NavOp::ReplacePreviousAndPop => nav.replace_previous_and_pop(self.fresh()),
            NavOp::ResetTo => nav.reset_to(self.fresh()),
            NavOp::ImmediatelyReset(len) => {
                let routes = (0..len).map(|_| self.fresh()).collect();
                nav.immediately_reset_route_stack(routes)
            }
            NavOp::JumpTo(slot) => {
                let route = pick(nav, slot);
                nav.jump_to(&route)
            }
            NavOp::JumpForward => nav.jump_forward(),
            NavOp::JumpBack => nav.jump_back(),
            NavOp::Frames(frames) => {
                for _ in 0..frames {
                    nav.advance(crate::driver::FRAME)?;
                }
                Ok(())
            }
        }
    }
}

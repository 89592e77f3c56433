#![no_main]

//! Random navigator operation sequences interleaved with frames and drags.
//!
//! Panics are findings; precondition errors are expected and ignored.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scenestack_core::{GestureState, Stage};
use scenestack_nav::{Navigator, NavigatorConfig, SceneConfig, SceneHost};
use scenestack_style::SceneProps;
use std::time::Duration;

const STAGE: Stage = Stage::new(360.0, 640.0);

struct NullHost {
    updates: usize,
}

impl SceneHost for NullHost {
    fn set_scene_props(&mut self, _index: usize, props: &SceneProps) {
        assert!(!props.is_empty());
        self.updates += 1;
    }
}

#[derive(Arbitrary, Debug)]
enum Op {
    Push,
    PushToFront,
    Pop,
    PopToTop,
    PopToRoute(u8),
    Replace,
    ReplaceAtIndex(i8),
    ReplacePrevious,
    ReplacePreviousAndPop,
    ResetTo,
    ImmediatelyReset(u8),
    JumpTo(u8),
    JumpForward,
    JumpBack,
    Frames(u8),
    TouchStart,
    Move { x: i16, y: i16, dx: i16, dy: i16 },
    Release { dx: i16, dy: i16, vx: i8, vy: i8 },
    Terminate,
}

#[derive(Arbitrary, Debug)]
struct Input {
    preset: u8,
    depth: u8,
    ops: Vec<Op>,
}

fn preset(choice: u8) -> SceneConfig {
    match choice % 6 {
        0 => SceneConfig::push_from_right(STAGE),
        1 => SceneConfig::float_from_left(STAGE),
        2 => SceneConfig::float_from_bottom(STAGE),
        3 => SceneConfig::fade(),
        4 => SceneConfig::horizontal_swipe_jump(STAGE),
        _ => SceneConfig::vertical_up_swipe_jump(STAGE),
    }
}

fuzz_target!(|input: Input| {
    let depth = u32::from(input.depth % 6) + 1;
    let choice = input.preset;
    let Ok(mut nav) = Navigator::builder()
        .config(NavigatorConfig::default().with_stage(STAGE))
        .initial_route_stack(0..depth)
        .configure_scene(move |route: &u32| preset(choice.wrapping_add(*route as u8)))
        .host(NullHost { updates: 0 })
        .build()
    else {
        return;
    };
    nav.mount();

    let mut next = depth;
    let mut fresh = || {
        next += 1;
        next
    };
    let mut origin = GestureState::at(0.0, 0.0);

    for op in input.ops.iter().take(256) {
        let routes = nav.current_routes();
        let pick = |slot: u8| routes[usize::from(slot) % routes.len()];
        let _ = match *op {
            Op::Push => nav.push(fresh()),
            Op::PushToFront => {
                nav.push_to_front(fresh());
                Ok(())
            }
            Op::Pop => nav.pop(),
            Op::PopToTop => nav.pop_to_top(),
            Op::PopToRoute(slot) => nav.pop_to_route(&pick(slot)),
            Op::Replace => {
                nav.replace(fresh());
                Ok(())
            }
            Op::ReplaceAtIndex(index) => {
                nav.replace_at_index(fresh(), isize::from(index));
                Ok(())
            }
            Op::ReplacePrevious => {
                nav.replace_previous(fresh());
                Ok(())
            }
            Op::ReplacePreviousAndPop => nav.replace_previous_and_pop(fresh()),
            Op::ResetTo => nav.reset_to(fresh()),
            Op::ImmediatelyReset(len) => {
                let routes = (0..len % 5).map(|_| fresh()).collect();
                nav.immediately_reset_route_stack(routes)
            }
            Op::JumpTo(slot) => nav.jump_to(&pick(slot)),
            Op::JumpForward => nav.jump_forward(),
            Op::JumpBack => nav.jump_back(),
            Op::Frames(frames) => (0..frames).try_for_each(|_| nav.advance(Duration::from_millis(16))),
            Op::TouchStart => {
                nav.touch_start();
                Ok(())
            }
            Op::Move { x, y, dx, dy } => {
                origin = GestureState::at(f64::from(x.rem_euclid(360)), f64::from(y.rem_euclid(640)));
                let sample = origin.moved_by(f64::from(dx), f64::from(dy));
                if nav.should_capture_touch_start() || nav.active_gesture().is_some() {
                    nav.responder_move(&sample);
                    Ok(())
                } else if nav.move_should_set_responder(&sample) {
                    nav.responder_grant()
                } else {
                    Ok(())
                }
            }
            Op::Release { dx, dy, vx, vy } => {
                let sample = origin
                    .moved_by(f64::from(dx), f64::from(dy))
                    .with_velocity(f64::from(vx) / 4.0, f64::from(vy) / 4.0);
                nav.responder_release(&sample)
            }
            Op::Terminate => nav.responder_terminate(),
        };
        assert!(!nav.routes().is_empty());
        assert!(nav.presented_index() < nav.routes().len());
    }

    for _ in 0..2_000 {
        if !nav.is_animating() {
            break;
        }
        let _ = nav.advance(Duration::from_millis(16));
    }
});

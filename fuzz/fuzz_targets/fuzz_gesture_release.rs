#![no_main]

//! Release decisions and drag progress over arbitrary pointer samples.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scenestack_core::{GestureState, Stage};
use scenestack_nav::gesture::{ReleaseDecision, decide_release, drag_progress, overswipe_friction};
use scenestack_nav::{GestureConfig, OverswipeConfig};

#[derive(Arbitrary, Debug)]
struct Input {
    direction: u8,
    width: u16,
    height: u16,
    dx: i32,
    dy: i32,
    vx: i32,
    vy: i32,
    overswipe: bool,
}

fuzz_target!(|input: Input| {
    let stage = Stage::new(f64::from(input.width.max(1)), f64::from(input.height.max(1)));
    let config = match input.direction % 4 {
        0 => GestureConfig::left_to_right(stage),
        1 => GestureConfig::right_to_left(stage),
        2 => GestureConfig::top_to_bottom(stage),
        _ => GestureConfig::bottom_to_top(stage),
    };
    let sample = GestureState::at(0.0, 0.0)
        .moved_by(f64::from(input.dx), f64::from(input.dy))
        .with_velocity(f64::from(input.vx) / 100.0, f64::from(input.vy) / 100.0);

    let progress = drag_progress(&config, &sample);
    assert!(progress.is_finite());
    let damped = overswipe_friction(progress, &OverswipeConfig::default());
    assert!(damped.is_finite());
    assert!(damped.abs() <= progress.abs() + f64::EPSILON);

    let velocity = match decide_release(&config, &sample, input.overswipe) {
        ReleaseDecision::Commit { velocity } => {
            assert!(!input.overswipe);
            velocity
        }
        ReleaseDecision::Revert { velocity } => velocity,
    };
    assert!(velocity.is_finite());
    assert!(velocity >= 0.0 || input.overswipe);
});

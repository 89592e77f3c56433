#![forbid(unsafe_code)]

//! Property tests over random operation sequences.

use proptest::prelude::*;
use scenestack_harness::{FrameDriver, OpRunner, RecordingHost, nav_op};
use scenestack_nav::{Navigator, SceneConfig};

fn build(depth: u32) -> Navigator<u32, RecordingHost> {
    let mut nav = Navigator::builder()
        .initial_route_stack(0..depth)
        .host(RecordingHost::new())
        .build()
        .unwrap();
    nav.mount();
    nav
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn stack_stays_consistent(
        depth in 4_u32..7,
        ops in prop::collection::vec(nav_op(), 1..48),
    ) {
        let mut nav = build(depth);
        let mut runner = OpRunner::starting_at(depth);
        for op in &ops {
            // Precondition failures are part of the contract; the stack must
            // survive them untouched.
            let _ = runner.apply(&mut nav, op);
            prop_assert!(!nav.routes().is_empty());
            prop_assert!(nav.presented_index() < nav.routes().len());
            prop_assert!(nav.presented_route().is_some());
        }

        let mut driver = FrameDriver::new();
        // A queued destination may have been truncated away; the navigator
        // reports it and keeps going.
        while driver.settle(&mut nav).is_err() {
            prop_assert!(driver.frames() < 10_000);
        }
        prop_assert!(!nav.is_animating());
        prop_assert_eq!(nav.queued_transitions(), 0);
        prop_assert!(nav.presented_index() < nav.routes().len());
        let len = nav.routes().len();
        prop_assert_eq!(nav.host().enabled_scenes(len), vec![nav.presented_index()]);

        let mut routes = nav.current_routes();
        routes.sort_unstable();
        routes.dedup();
        prop_assert_eq!(routes.len(), len, "routes must stay unique");
    }

    #[test]
    fn push_behind_backward_jumps_stays_in_bounds(depth in 4_u32..7, jumps in 1_u32..4) {
        let mut nav = build(depth);
        for _ in 0..jumps.min(depth - 1) {
            nav.jump_back().unwrap();
        }
        nav.push(100).unwrap();
        prop_assert!(nav.presented_index() < nav.routes().len());
        FrameDriver::new().settle(&mut nav).unwrap();
        prop_assert_eq!(nav.presented_route(), Some(&100));
        prop_assert_eq!(nav.routes().len(), depth as usize + 1);
    }

    #[test]
    fn push_then_pop_restores_the_stack(depth in 1_u32..6) {
        let mut nav = build(depth);
        let before = nav.current_routes();
        let mut driver = FrameDriver::new();
        nav.push(100).unwrap();
        driver.settle(&mut nav).unwrap();
        nav.pop().unwrap();
        driver.settle(&mut nav).unwrap();
        prop_assert_eq!(nav.current_routes(), before);
        prop_assert_eq!(nav.presented_index(), depth as usize - 1);
    }

    #[test]
    fn pop_to_route_matches_repeated_pops(depth in 2_u32..7, keep in 0_u32..6) {
        let keep = keep % depth;
        let mut direct = build(depth);
        let mut stepwise = build(depth);
        let mut driver = FrameDriver::new();

        direct.pop_to_route(&keep).unwrap();
        driver.settle(&mut direct).unwrap();
        for _ in keep + 1..depth {
            stepwise.pop().unwrap();
        }
        driver.settle(&mut stepwise).unwrap();

        prop_assert_eq!(direct.current_routes(), stepwise.current_routes());
        prop_assert_eq!(direct.presented_index(), keep as usize);
        prop_assert_eq!(stepwise.presented_index(), keep as usize);
    }

    #[test]
    fn jumps_never_change_routes(moves in prop::collection::vec(-2_i8..=2, 1..12)) {
        let mut nav = Navigator::builder()
            .initial_route_stack(0_u32..4)
            .configure_scene(|_| SceneConfig::fade())
            .host(RecordingHost::new())
            .build()
            .unwrap();
        let mut driver = FrameDriver::new();
        for step in moves {
            let _ = match step {
                s if s < 0 => nav.jump_back(),
                s if s > 0 => nav.jump_forward(),
                _ => driver.run(&mut nav, 3),
            };
        }
        driver.settle(&mut nav).unwrap();
        prop_assert_eq!(nav.current_routes(), vec![0, 1, 2, 3]);
    }
}

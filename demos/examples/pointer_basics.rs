// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer routing basics.
//!
//! A two-output desktop with two windows: motion clamps to the output
//! union, focus follows the pointer with paired enter/leave transitions,
//! and a mid-click drag pins focus in place.
//!
//! Run:
//! - `cargo run -p tiller_demos --example pointer_basics`

use kurbo::{Point, Rect, Vec2};
use tiller_channel::event::{ButtonEvent, ButtonId, ButtonState, DeviceId, MotionEvent};
use tiller_focus::core::InputCore;
use tiller_focus::shell::{EventCtx, HitCandidate, SeatSink, Shell};
use tiller_focus::target::{FocusTarget, SurfaceId, WindowId};
use tiller_pointer::outputs::{Output, OutputId};

struct Desktop {
    outputs: Vec<Output>,
    windows: Vec<(SurfaceId, Rect, WindowId)>,
}

impl Shell for Desktop {
    fn outputs(&self) -> &[Output] {
        &self.outputs
    }
    fn hit_test(&self, position: Point) -> Option<HitCandidate> {
        self.windows
            .iter()
            .find(|(_, rect, _)| rect.contains(position))
            .map(|(id, rect, window)| HitCandidate {
                target: FocusTarget::Surface {
                    id: *id,
                    offset: rect.origin(),
                },
                origin: rect.origin(),
                window: Some(*window),
            })
    }
    fn is_alive(&self, _target: &FocusTarget) -> bool {
        true
    }
    fn active_window(&self) -> Option<WindowId> {
        None
    }
}

#[derive(Default)]
struct PrintSeat;

impl SeatSink for PrintSeat {
    fn enter(&mut self, target: &FocusTarget, local: Point, _ctx: &mut EventCtx) {
        println!("  enter {target:?} at local {local:?}");
    }
    fn leave(&mut self, target: &FocusTarget, _ctx: &mut EventCtx) {
        println!("  leave {target:?}");
    }
    fn set_pointer_position(&mut self, global: Point) {
        println!("  position -> {global:?}");
    }
}

fn motion(to: Point, time_ms: u64) -> MotionEvent {
    MotionEvent {
        position: to,
        delta: Vec2::ZERO,
        unaccel_delta: Vec2::ZERO,
        time_ms,
        device: DeviceId(1),
    }
}

fn main() {
    let desktop = Desktop {
        outputs: vec![
            Output::new(OutputId(1), 0.0, 0.0, 1280.0, 1024.0),
            Output::new(OutputId(2), 1280.0, 0.0, 1280.0, 1024.0),
        ],
        windows: vec![
            (SurfaceId(1), Rect::new(50.0, 50.0, 600.0, 600.0), WindowId(1)),
            (SurfaceId(2), Rect::new(1400.0, 50.0, 2000.0, 600.0), WindowId(2)),
        ],
    };
    let mut seat = PrintSeat;
    let mut core = InputCore::new();

    println!("== Motion into the first window ==");
    core.process_motion(&desktop, &mut seat, motion(Point::new(100.0, 100.0), 1));

    println!("== Motion across to the second window (leave, then enter) ==");
    core.process_motion(&desktop, &mut seat, motion(Point::new(1500.0, 100.0), 2));

    println!("== A held button pins focus while the pointer moves ==");
    core.process_button(
        &desktop,
        &mut seat,
        ButtonEvent {
            button: ButtonId::LEFT,
            state: ButtonState::Pressed,
            time_ms: 3,
            device: DeviceId(1),
        },
    );
    core.process_motion(&desktop, &mut seat, motion(Point::new(100.0, 100.0), 4));
    assert_eq!(
        core.focused_target().and_then(|t| t.surface()),
        Some(SurfaceId(2)),
        "focus stays on the second window mid-drag"
    );
    println!("  focus pinned to {:?}", core.focused_target());
    core.process_button(
        &desktop,
        &mut seat,
        ButtonEvent {
            button: ButtonId::LEFT,
            state: ButtonState::Released,
            time_ms: 5,
            device: DeviceId(1),
        },
    );

    println!("== Overshoot past the right edge clamps to the union ==");
    core.process_motion(&desktop, &mut seat, motion(Point::new(5000.0, 500.0), 6));
    assert_eq!(core.position(), Point::new(2559.0, 500.0));
}

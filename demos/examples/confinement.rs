// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer confinement and locking.
//!
//! A client declares a confinement region over its surface; motion inside
//! flows freely, motion out of the region slides along the contained axis
//! or stays put. Swapping the declaration for a lock freezes the position
//! entirely until it is revoked, at which point the client's position hint
//! is applied.
//!
//! Run:
//! - `cargo run -p tiller_demos --example confinement`

use kurbo::{Point, Rect, Vec2};
use tiller_channel::event::{DeviceId, MotionEvent};
use tiller_focus::core::InputCore;
use tiller_focus::shell::{HitCandidate, SeatSink, Shell};
use tiller_focus::target::{FocusTarget, SurfaceId, WindowId};
use tiller_pointer::constraint::Region;
use tiller_pointer::outputs::{Output, OutputId};

struct OneWindow {
    outputs: [Output; 1],
    window: Rect,
}

impl Shell for OneWindow {
    fn outputs(&self) -> &[Output] {
        &self.outputs
    }
    fn hit_test(&self, position: Point) -> Option<HitCandidate> {
        self.window.contains(position).then(|| HitCandidate {
            target: FocusTarget::Surface {
                id: SurfaceId(1),
                offset: self.window.origin(),
            },
            origin: self.window.origin(),
            window: Some(WindowId(1)),
        })
    }
    fn is_alive(&self, _target: &FocusTarget) -> bool {
        true
    }
    fn active_window(&self) -> Option<WindowId> {
        // The one window is the active window, so constraints may activate.
        Some(WindowId(1))
    }
}

#[derive(Default)]
struct Seat;

impl SeatSink for Seat {
    fn relative_motion(&mut self, delta: Vec2, _unaccel: Vec2, _time_ms: u64) {
        println!("  relative motion {delta:?} (position frozen)");
    }
}

fn motion(to: Point, time_ms: u64) -> MotionEvent {
    MotionEvent {
        position: to,
        delta: Vec2::new(4.0, 4.0),
        unaccel_delta: Vec2::new(4.0, 4.0),
        time_ms,
        device: DeviceId(1),
    }
}

fn main() {
    let shell = OneWindow {
        outputs: [Output::new(OutputId(1), 0.0, 0.0, 1920.0, 1080.0)],
        window: Rect::new(0.0, 0.0, 800.0, 800.0),
    };
    let mut seat = Seat;
    let mut core = InputCore::new();

    // The client confines the pointer to a surface-local box.
    core.declare_confinement(
        SurfaceId(1),
        Region::rect(Rect::new(100.0, 100.0, 150.0, 150.0)),
    );

    println!("== Enter the confinement region ==");
    core.process_motion(&shell, &mut seat, motion(Point::new(120.0, 120.0), 1));
    println!("  position {:?}", core.position());

    println!("== Escape attempt: neither axis helps, stay put ==");
    core.process_motion(&shell, &mut seat, motion(Point::new(200.0, 200.0), 2));
    assert_eq!(core.position(), Point::new(120.0, 120.0));
    println!("  position {:?}", core.position());

    println!("== Escape in x only: slide along y ==");
    core.process_motion(&shell, &mut seat, motion(Point::new(200.0, 130.0), 3));
    assert_eq!(core.position(), Point::new(120.0, 130.0));
    println!("  position {:?}", core.position());

    println!("== Replace the confinement with a lock ==");
    core.declare_lock(SurfaceId(1), Region::Infinite, Some(Point::new(400.0, 400.0)));
    // The lock activates on the next committed motion.
    core.process_motion(&shell, &mut seat, motion(Point::new(125.0, 135.0), 4));
    core.process_motion(&shell, &mut seat, motion(Point::new(700.0, 700.0), 5));
    assert_eq!(core.position(), Point::new(125.0, 135.0));
    println!("  position {:?} (frozen)", core.position());

    println!("== Revoking the lock applies the client hint ==");
    core.revoke_constraint(&shell, &mut seat, SurfaceId(1));
    assert_eq!(core.position(), Point::new(400.0, 400.0));
    println!("  position {:?}", core.position());
}

// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tiller_focus --heading-base-level=0

//! Tiller Focus: pointer-focus tracking and input routing for compositors.
//!
//! ## Overview
//!
//! This crate is the decision layer between "a device produced an event" and
//! "the rest of the compositor is told what it means." It owns nothing the
//! compositor renders; it decides, for every pointer/button/axis event:
//!
//! - which on-screen target (client surface, decoration, or internal
//!   surface) owns the pointer, with *paired* enter/leave transitions —
//!   no consumer ever sees two enters without an intervening leave;
//! - how the reported position is clamped to the output union, confined,
//!   or locked by client-declared constraints;
//! - which cursor image is shown, resolved across a fixed priority of
//!   override sources.
//!
//! ## Where this fits
//!
//! Collaborators stay behind two narrow traits. [`Shell`](crate::shell::Shell)
//! is the read side: outputs, hit testing, the active window, keyboard
//! modifiers, mode flags. [`SeatSink`](crate::shell::SeatSink) is the push
//! side: focus notifications, positions, forwarded events, cursor changes.
//! The [`InputCore`](crate::core::InputCore) in between is a plain value —
//! no globals, no threads — so several independent cores can run (and be
//! tested) in one process.
//!
//! ## Reentrancy
//!
//! Everything runs on one event-processing thread, synchronously. The one
//! control-flow hazard is reentrancy: a handler or focus hook may want to
//! warp the pointer while a motion is still being processed. Listeners and
//! hooks record such requests on an [`EventCtx`](crate::shell::EventCtx);
//! the core's deferral queue replays them strictly after the current update
//! commits, in submission order. See `tiller_channel` for the queue itself.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Point, Rect, Vec2};
//! use tiller_channel::event::{DeviceId, MotionEvent};
//! use tiller_focus::core::InputCore;
//! use tiller_focus::shell::{HitCandidate, SeatSink, Shell};
//! use tiller_focus::target::{FocusTarget, SurfaceId, WindowId};
//! use tiller_pointer::outputs::{Output, OutputId};
//!
//! struct OneScreen {
//!     outputs: [Output; 1],
//! }
//!
//! impl Shell for OneScreen {
//!     fn outputs(&self) -> &[Output] {
//!         &self.outputs
//!     }
//!     fn hit_test(&self, position: Point) -> Option<HitCandidate> {
//!         let rect = Rect::new(100.0, 100.0, 700.0, 500.0);
//!         rect.contains(position).then(|| HitCandidate {
//!             target: FocusTarget::Surface {
//!                 id: SurfaceId(1),
//!                 offset: rect.origin(),
//!             },
//!             origin: rect.origin(),
//!             window: Some(WindowId(1)),
//!         })
//!     }
//!     fn is_alive(&self, _target: &FocusTarget) -> bool {
//!         true
//!     }
//!     fn active_window(&self) -> Option<WindowId> {
//!         Some(WindowId(1))
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Seat;
//! impl SeatSink for Seat {}
//!
//! let shell = OneScreen {
//!     outputs: [Output::new(OutputId(1), 0.0, 0.0, 1920.0, 1080.0)],
//! };
//! let mut seat = Seat;
//! let mut core = InputCore::new();
//! core.process_motion(
//!     &shell,
//!     &mut seat,
//!     MotionEvent {
//!         position: Point::new(300.0, 200.0),
//!         delta: Vec2::new(5.0, 5.0),
//!         unaccel_delta: Vec2::new(5.0, 5.0),
//!         time_ms: 1,
//!         device: DeviceId(1),
//!     },
//! );
//! assert_eq!(
//!     core.focused_target().and_then(|t| t.surface()),
//!     Some(SurfaceId(1))
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod core;
pub mod shell;
pub mod target;
pub mod tracker;

pub use crate::core::{InputCore, Settings, WARP_DEVICE};
pub use shell::{EventCtx, HitCandidate, SeatSink, Shell};
pub use target::{DecorationId, FocusTarget, InternalId, SurfaceId, WindowId};
pub use tracker::FocusTracker;

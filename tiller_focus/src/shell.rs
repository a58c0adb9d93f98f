// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits: what the core reads, and what it pushes.
//!
//! ## Overview
//!
//! The core never owns topology, windows, or protocol state. It consumes
//! read-only snapshots through [`Shell`] at the start of each evaluation and
//! pushes resolved results through [`SeatSink`]. Both are deliberately
//! narrow: a test can implement them in a dozen lines, and multiple
//! independent cores can run against different implementations in one
//! process.
//!
//! ## Reentrancy surface
//!
//! Observer callbacks, handler callbacks, and the [`SeatSink`] focus hooks
//! all receive an [`EventCtx`]. Code that wants to move the pointer while an
//! update is still in flight does not call back into the core (the borrow
//! checker would not let it); it records a request on the context, and the
//! core's deferral queue replays it strictly after the current update
//! commits.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};
use tiller_channel::event::{AxisEvent, ButtonEvent, Modifiers};
use tiller_pointer::cursor::{CursorImage, CursorSource};
use tiller_pointer::outputs::Output;
use tiller_pointer::state::ButtonMask;

use crate::target::{FocusTarget, SurfaceId, WindowId};

/// A hit-test result: the topmost interactive target at a position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitCandidate {
    /// The target under the position.
    pub target: FocusTarget,
    /// Global position of the target's local origin, for coordinate
    /// translation. For surfaces this equals the target's input offset.
    pub origin: Point,
    /// The toplevel window owning the target, when there is one.
    pub window: Option<WindowId>,
}

/// Read-only snapshot interface over the rest of the compositor.
///
/// Snapshots are taken at the start of an evaluation and never retained
/// past the current synchronous call.
pub trait Shell {
    /// The current outputs, ordered.
    fn outputs(&self) -> &[Output];

    /// Resolve a global position to the topmost interactive target.
    fn hit_test(&self, position: Point) -> Option<HitCandidate>;

    /// Whether a target's owner still exists. Lookups fail closed: a target
    /// this returns `false` for is treated as gone.
    fn is_alive(&self, target: &FocusTarget) -> bool;

    /// The current active (focused) toplevel window.
    fn active_window(&self) -> Option<WindowId>;

    /// Current keyboard modifier state.
    fn modifiers(&self) -> Modifiers {
        Modifiers::empty()
    }

    /// Whether a drag-and-drop operation is in progress.
    fn is_drag_in_progress(&self) -> bool {
        false
    }

    /// Whether a multi-touch gesture sequence is active.
    fn is_touch_sequence_active(&self) -> bool {
        false
    }

    /// Whether interactive window-selection mode is active.
    fn is_window_selection_active(&self) -> bool {
        false
    }

    /// Whether the session is locked.
    fn is_screen_locked(&self) -> bool {
        false
    }
}

/// Push interface toward the protocol-serving collaborator.
///
/// Every method has a no-op default so implementations override only what
/// they serve. The core guarantees pairing: for any implementation,
/// [`enter`](Self::enter) and [`leave`](Self::leave) alternate per target,
/// and no second `enter` arrives without an intervening `leave`.
pub trait SeatSink {
    /// The pointer entered `target`; `local` is in the target's space.
    fn enter(&mut self, target: &FocusTarget, local: Point, ctx: &mut EventCtx) {
        let _ = (target, local, ctx);
    }

    /// The pointer left `target`.
    fn leave(&mut self, target: &FocusTarget, ctx: &mut EventCtx) {
        let _ = (target, ctx);
    }

    /// The seat's focused pointer surface changed. Only `Surface` targets
    /// set this; decorations and internals clear it.
    fn set_focused_surface(&mut self, surface: Option<SurfaceId>, local: Point) {
        let _ = (surface, local);
    }

    /// A new global pointer position was committed.
    fn set_pointer_position(&mut self, global: Point) {
        let _ = global;
    }

    /// Motion within the current target.
    fn motion(&mut self, target: &FocusTarget, local: Point, time_ms: u64) {
        let _ = (target, local, time_ms);
    }

    /// Relative motion, always delivered; the only motion a locked pointer
    /// produces.
    fn relative_motion(&mut self, delta: Vec2, unaccel_delta: Vec2, time_ms: u64) {
        let _ = (delta, unaccel_delta, time_ms);
    }

    /// An unclaimed button event, with the aggregate mask after the edge.
    fn button(&mut self, event: &ButtonEvent, mask: ButtonMask) {
        let _ = (event, mask);
    }

    /// An unclaimed axis event.
    fn axis(&mut self, event: &AxisEvent) {
        let _ = event;
    }

    /// Begin tracking geometry changes of the focused target.
    fn watch_geometry(&mut self, target: &FocusTarget) {
        let _ = target;
    }

    /// Stop tracking geometry changes of a previously watched target.
    fn unwatch_geometry(&mut self, target: &FocusTarget) {
        let _ = target;
    }

    /// The resolved cursor changed. De-duplicated: only called when the
    /// winning source actually differs from the previous resolution.
    fn cursor_changed(&mut self, source: CursorSource, image: CursorImage) {
        let _ = (source, image);
    }
}

/// Requests a listener or hook can make while an update is in flight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Request {
    /// Reposition the pointer.
    Warp(Point),
    /// Reset focus to none.
    ClearFocus,
}

/// Per-dispatch context threaded to listeners and focus hooks.
///
/// Carries the keyboard modifier snapshot for this event and collects
/// deferred requests. Requests are replayed in submission order strictly
/// after the current update (and its own drains) complete.
#[derive(Clone, Debug)]
pub struct EventCtx {
    /// Keyboard modifiers at dispatch time, identical for every listener in
    /// the pass.
    pub modifiers: Modifiers,
    requests: Vec<Request>,
}

impl EventCtx {
    pub(crate) fn new(modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            requests: Vec::new(),
        }
    }

    /// Request a pointer warp, processed after the current update commits.
    pub fn request_warp(&mut self, to: Point) {
        self.requests.push(Request::Warp(to));
    }

    /// Request a focus reset to none, processed after the current update
    /// commits.
    pub fn request_clear_focus(&mut self) {
        self.requests.push(Request::ClearFocus);
    }

    /// Number of queued requests.
    pub fn pending_requests(&self) -> usize {
        self.requests.len()
    }

    pub(crate) fn take_requests(&mut self) -> Vec<Request> {
        core::mem::take(&mut self.requests)
    }
}

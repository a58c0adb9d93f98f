// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The input core: one object that routes raw events to resolved state.
//!
//! ## Pipeline
//!
//! Every entry point runs the same shape: observers see the event, handlers
//! may claim it, and unclaimed events flow into the pointer pipeline —
//! lock check, output clamp, confinement, commit, focus update (unless
//! suppressed), pushes to the seat, constraint re-evaluation, cursor
//! re-resolution. The deferral queue serializes the whole thing: a warp
//! requested while an update is in flight is appended and replayed strictly
//! after that update (and its own drains) commit, in submission order.
//!
//! ## Suppression
//!
//! Focus does not follow the pointer while a drag-and-drop is in progress,
//! a touch gesture sequence is active, window-selection mode is active, or
//! any pointer button is held — the last rule is what keeps focus from
//! sliding out from under a mid-click drag.
//!
//! ## Failure behavior
//!
//! Nothing in here panics. Proposals with no outputs are rejected, dead
//! targets fall back to no focus, invalid lock hints are discarded, and
//! malformed regions never activate; each case logs and degrades.

use kurbo::Point;
use tiller_channel::channel::{EventChannel, ListenerId};
use tiller_channel::defer::DeferQueue;
use tiller_channel::event::{AxisEvent, ButtonEvent, Claim, DeviceId, InputEvent, MotionEvent};
use tiller_pointer::constraint::{ConstraintSet, Region};
use tiller_pointer::cursor::{CursorImage, CursorResolver, CursorSource};
use tiller_pointer::outputs::clamp_to_outputs;
use tiller_pointer::state::{ButtonMask, PointerState};

use crate::shell::{EventCtx, Request, SeatSink, Shell};
use crate::target::{FocusTarget, SurfaceId};
use crate::tracker::FocusTracker;

/// The device id the core stamps on its own synthetic warp motions.
pub const WARP_DEVICE: DeviceId = DeviceId(u64::MAX);

/// Tunables owned by the embedder.
#[derive(Copy, Clone, Debug)]
pub struct Settings {
    /// Master switch for client pointer constraints.
    pub constraints_enabled: bool,
    /// Whether pointer motion re-evaluates focus at all. When off, focus
    /// only changes through explicit requests.
    pub focus_follows_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            constraints_enabled: true,
            focus_follows_motion: true,
        }
    }
}

/// Work items serialized by the deferral queue.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Pending {
    Motion(MotionEvent),
    Button(ButtonEvent),
    Axis(AxisEvent),
    ClearFocus,
}

/// The input-event routing and pointer-focus core.
///
/// Owns the channel, the deferral queue, the pointer state, the focus
/// tracker, the constraint registry, and the cursor resolver. Collaborators
/// are passed per call: a read-only [`Shell`] snapshot and a mutable
/// [`SeatSink`] push interface. Multiple independent cores can coexist in
/// one process.
pub struct InputCore {
    channel: EventChannel<InputEvent, EventCtx>,
    pending: DeferQueue<Pending>,
    pointer: PointerState,
    tracker: FocusTracker,
    constraints: ConstraintSet<SurfaceId>,
    cursor: CursorResolver,
    settings: Settings,
    last_time_ms: u64,
}

impl core::fmt::Debug for InputCore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InputCore")
            .field("position", &self.pointer.position())
            .field("focus", &self.tracker.current())
            .field("pending", &self.pending.pending())
            .finish_non_exhaustive()
    }
}

impl Default for InputCore {
    fn default() -> Self {
        Self::new()
    }
}

impl InputCore {
    /// A core with default settings.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// A core with explicit settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            channel: EventChannel::new(),
            pending: DeferQueue::new(),
            pointer: PointerState::new(),
            tracker: FocusTracker::new(),
            constraints: ConstraintSet::new(),
            cursor: CursorResolver::new(),
            settings,
            last_time_ms: 0,
        }
    }

    // --- state reads ---

    /// The committed global pointer position.
    pub fn position(&self) -> Point {
        self.pointer.position()
    }

    /// The aggregate pressed-button mask.
    pub fn button_mask(&self) -> ButtonMask {
        self.pointer.mask()
    }

    /// The focused target, if any.
    pub fn focused_target(&self) -> Option<&FocusTarget> {
        self.tracker.current()
    }

    /// The image and hotspot that should currently be shown.
    pub fn current_cursor_image(&self) -> CursorImage {
        self.cursor.current_image()
    }

    /// The cursor source currently winning the priority scan.
    pub fn current_cursor_source(&self) -> CursorSource {
        self.cursor.current_source()
    }

    // --- listener registration ---

    /// Register a passive observer; it sees every event.
    pub fn register_observer(
        &mut self,
        f: impl FnMut(&InputEvent, &mut EventCtx) + 'static,
    ) -> ListenerId {
        self.channel.register_observer(f)
    }

    /// Remove an observer. Idempotent.
    pub fn unregister_observer(&mut self, id: ListenerId) {
        self.channel.unregister_observer(id);
    }

    /// Register a claiming handler (e.g. a global shortcut).
    pub fn register_handler(
        &mut self,
        f: impl FnMut(&InputEvent, &mut EventCtx) -> Claim + 'static,
    ) -> ListenerId {
        self.channel.register_handler(f)
    }

    /// Remove a handler. Idempotent.
    pub fn unregister_handler(&mut self, id: ListenerId) {
        self.channel.unregister_handler(id);
    }

    // --- entry points ---

    /// Route a pointer motion event.
    pub fn process_motion<S: Shell, K: SeatSink>(
        &mut self,
        shell: &S,
        seat: &mut K,
        event: MotionEvent,
    ) {
        self.submit(shell, seat, Pending::Motion(event));
    }

    /// Route a pointer button event.
    pub fn process_button<S: Shell, K: SeatSink>(
        &mut self,
        shell: &S,
        seat: &mut K,
        event: ButtonEvent,
    ) {
        self.submit(shell, seat, Pending::Button(event));
    }

    /// Route a scroll event.
    pub fn process_axis<S: Shell, K: SeatSink>(
        &mut self,
        shell: &S,
        seat: &mut K,
        event: AxisEvent,
    ) {
        self.submit(shell, seat, Pending::Axis(event));
    }

    /// Programmatically reposition the pointer.
    ///
    /// Re-enters the motion pipeline as a synthetic zero-delta motion from
    /// [`WARP_DEVICE`], so it clamps, confines, refocuses, and defers
    /// exactly like device motion.
    pub fn warp<S: Shell, K: SeatSink>(&mut self, shell: &S, seat: &mut K, to: Point) {
        let event = self.warp_event(to);
        self.submit(shell, seat, Pending::Motion(event));
    }

    /// Re-run the pipeline at the current position.
    ///
    /// Call after output topology or watched-target geometry changes: the
    /// position is re-clamped into the (possibly new) output union and
    /// focus is re-evaluated.
    pub fn refresh<S: Shell, K: SeatSink>(&mut self, shell: &S, seat: &mut K) {
        let event = self.warp_event(self.pointer.position());
        self.submit(shell, seat, Pending::Motion(event));
    }

    /// Explicitly reset focus to none.
    ///
    /// Used when entering window-selection mode; call it *before* raising
    /// the mode flag, since the reset obeys the same suppression rules as
    /// any other transition.
    pub fn clear_focus<S: Shell, K: SeatSink>(&mut self, shell: &S, seat: &mut K) {
        self.submit(shell, seat, Pending::ClearFocus);
    }

    /// A focus target's owner reported destruction.
    ///
    /// Unregisters synchronously: no notification is sent to the dead
    /// target, its geometry subscription and the seat's focused-surface
    /// reference are dropped, and any constraint it declared is revoked
    /// (its lock hint, coming from a dead owner, is discarded).
    pub fn target_destroyed<S: Shell, K: SeatSink>(
        &mut self,
        shell: &S,
        seat: &mut K,
        target: &FocusTarget,
    ) {
        if let Some(id) = target.surface() {
            let _ = self.constraints.revoke(id);
        }
        if self.tracker.drop_dead(seat, target) {
            let _ = self.constraints.reset();
            self.sync_cursor(shell, seat);
        }
    }

    // --- constraints ---

    /// Declare (or replace) a pointer confinement for a surface.
    pub fn declare_confinement(&mut self, surface: SurfaceId, region: Region) {
        self.constraints.declare_confinement(surface, region);
    }

    /// Declare (or replace) a pointer lock for a surface.
    pub fn declare_lock(&mut self, surface: SurfaceId, region: Region, hint: Option<Point>) {
        self.constraints.declare_lock(surface, region, hint);
    }

    /// Update the position hint of a surface's declared lock.
    pub fn set_lock_hint(&mut self, surface: SurfaceId, hint: Point) {
        self.constraints.set_lock_hint(surface, hint);
    }

    /// A client revoked its constraint. If an active lock is deactivated,
    /// its position hint becomes the next committed position when valid.
    pub fn revoke_constraint<S: Shell, K: SeatSink>(
        &mut self,
        shell: &S,
        seat: &mut K,
        surface: SurfaceId,
    ) {
        let origin = self.tracker.origin();
        if let Some(hint) = self.constraints.revoke(surface) {
            self.apply_lock_hint(shell, seat, origin, hint);
        }
    }

    /// Toggle the master constraints switch. Follow with
    /// [`evaluate_constraints`](Self::evaluate_constraints).
    pub fn set_constraints_enabled(&mut self, enabled: bool) {
        self.settings.constraints_enabled = enabled;
    }

    /// Re-run constraint activation, e.g. after the active window changed.
    pub fn evaluate_constraints<S: Shell, K: SeatSink>(&mut self, shell: &S, seat: &mut K) {
        let origin = self.tracker.origin();
        if let Some(hint) = self.evaluate_constraints_inner(shell) {
            self.apply_lock_hint(shell, seat, origin, hint);
        }
    }

    // --- cursor ---

    /// Update a source's cursor image.
    ///
    /// For [`CursorSource::EffectsOverride`] and [`CursorSource::MoveResize`]
    /// the image doubles as the activation switch: `Some` activates the
    /// source, `None` deactivates it. Other sources activate from focus and
    /// mode state. The change is pushed on the next update, or immediately
    /// via [`sync_cursor`](Self::sync_cursor).
    pub fn set_cursor_image(&mut self, source: CursorSource, image: Option<CursorImage>) {
        if matches!(
            source,
            CursorSource::EffectsOverride | CursorSource::MoveResize
        ) {
            self.cursor.set_active(source, image.is_some());
        }
        self.cursor.set_image(source, image);
    }

    /// Re-resolve the cursor now and push a change if the winning source
    /// differs from the previous resolution.
    pub fn sync_cursor<S: Shell, K: SeatSink>(&mut self, shell: &S, seat: &mut K) {
        self.sync_cursor_flags(shell);
        if let Some(source) = self.cursor.resolve_change() {
            seat.cursor_changed(source, self.cursor.image_for(source));
        }
    }

    // --- the serialized pipeline ---

    fn submit<S: Shell, K: SeatSink>(&mut self, shell: &S, seat: &mut K, update: Pending) {
        if self.pending.is_held() {
            self.pending.defer(update);
            return;
        }
        let mut next = Some(update);
        while let Some(update) = next.take() {
            self.pending.enter();
            self.run_update(shell, seat, update);
            next = self.pending.exit();
        }
    }

    fn run_update<S: Shell, K: SeatSink>(&mut self, shell: &S, seat: &mut K, update: Pending) {
        let mut ctx = EventCtx::new(shell.modifiers());
        match update {
            Pending::Motion(event) => {
                self.last_time_ms = event.time_ms;
                let input = InputEvent::Motion(event);
                self.channel.notify_observers(&input, &mut ctx);
                if !self.channel.dispatch_handlers(&input, &mut ctx) {
                    self.route_motion(shell, seat, event, &mut ctx);
                }
            }
            Pending::Button(event) => {
                self.last_time_ms = event.time_ms;
                let input = InputEvent::Button(event);
                self.channel.notify_observers(&input, &mut ctx);
                // The mask tracks the physical device truth whether or not
                // a shortcut claims the event.
                let (previous, current) = self.pointer.set_button(event.button, event.state);
                if previous != current {
                    log::trace!("button mask {previous:?} -> {current:?}");
                }
                if !self.channel.dispatch_handlers(&input, &mut ctx) {
                    seat.button(&event, current);
                }
            }
            Pending::Axis(event) => {
                let input = InputEvent::Axis(event);
                self.channel.notify_observers(&input, &mut ctx);
                if !self.channel.dispatch_handlers(&input, &mut ctx) {
                    seat.axis(&event);
                }
            }
            Pending::ClearFocus => self.route_clear_focus(shell, seat, &mut ctx),
        }
        self.finish(shell, seat, ctx);
    }

    fn route_motion<S: Shell, K: SeatSink>(
        &mut self,
        shell: &S,
        seat: &mut K,
        event: MotionEvent,
        ctx: &mut EventCtx,
    ) {
        // A locked pointer's absolute position is frozen; only relative
        // motion flows to the focused target.
        if self.constraints.is_locked() {
            seat.relative_motion(event.delta, event.unaccel_delta, event.time_ms);
            return;
        }

        let Some(mut committed) = clamp_to_outputs(shell.outputs(), event.position) else {
            log::debug!("position proposal with no outputs; leaving position unchanged");
            return;
        };

        if self.constraints.is_confined() {
            let prev_local = self.tracker.local(self.pointer.position());
            let cand_local = self.tracker.local(committed);
            let adjusted = self.constraints.confine(prev_local, cand_local);
            committed = self.tracker.global(adjusted);
        }

        self.pointer.commit_position(committed);
        seat.set_pointer_position(committed);

        if self.settings.focus_follows_motion && !self.focus_suppressed(shell) {
            let candidate = shell.hit_test(committed);
            let origin = self.tracker.origin();
            if self.tracker.retarget(shell, seat, candidate, committed, ctx) {
                // Focus moved away: the old target's constraint state resets,
                // and a deactivated lock may leave a position hint behind.
                if let Some(hint) = self.constraints.reset() {
                    self.apply_lock_hint(shell, seat, origin, hint);
                }
            }
        }

        if let Some(target) = self.tracker.current().copied() {
            let local = self.tracker.local(self.pointer.position());
            seat.motion(&target, local, event.time_ms);
        }
        seat.relative_motion(event.delta, event.unaccel_delta, event.time_ms);

        // Activate a pending constraint if the committed position now
        // satisfies it.
        let _ = self.evaluate_constraints_inner(shell);
    }

    fn route_clear_focus<S: Shell, K: SeatSink>(
        &mut self,
        shell: &S,
        seat: &mut K,
        ctx: &mut EventCtx,
    ) {
        if self.focus_suppressed(shell) {
            log::debug!("focus reset requested while transitions are suppressed; ignoring");
            return;
        }
        let origin = self.tracker.origin();
        if self
            .tracker
            .retarget(shell, seat, None, self.pointer.position(), ctx)
        {
            if let Some(hint) = self.constraints.reset() {
                self.apply_lock_hint(shell, seat, origin, hint);
            }
        }
    }

    fn finish<S: Shell, K: SeatSink>(&mut self, shell: &S, seat: &mut K, mut ctx: EventCtx) {
        self.sync_cursor(shell, seat);
        for request in ctx.take_requests() {
            match request {
                Request::Warp(to) => {
                    let event = self.warp_event(to);
                    self.pending.defer(Pending::Motion(event));
                }
                Request::ClearFocus => self.pending.defer(Pending::ClearFocus),
            }
        }
    }

    fn focus_suppressed<S: Shell>(&self, shell: &S) -> bool {
        shell.is_drag_in_progress()
            || shell.is_touch_sequence_active()
            || shell.is_window_selection_active()
            || self.pointer.any_pressed()
    }

    fn evaluate_constraints_inner<S: Shell>(&mut self, shell: &S) -> Option<Point> {
        let focused = self.tracker.focused_surface();
        let window_is_active = match (self.tracker.window(), shell.active_window()) {
            (Some(w), Some(a)) => w == a,
            _ => false,
        };
        let local = self.tracker.local(self.pointer.position());
        self.constraints.evaluate(
            self.settings.constraints_enabled,
            focused,
            window_is_active,
            local,
        )
    }

    /// Apply a deactivated lock's position hint, if valid: non-negative
    /// coordinates and a focused target. `origin` is the locking surface's
    /// origin at deactivation time (hints are surface-local).
    fn apply_lock_hint<S: Shell, K: SeatSink>(
        &mut self,
        shell: &S,
        seat: &mut K,
        origin: Point,
        hint: Point,
    ) {
        if hint.x < 0.0 || hint.y < 0.0 {
            log::debug!("discarding lock hint with negative coordinates: {hint:?}");
            return;
        }
        if self.tracker.current().is_none() {
            log::debug!("discarding lock hint with no focused target");
            return;
        }
        let global = origin + hint.to_vec2();
        let Some(clamped) = clamp_to_outputs(shell.outputs(), global) else {
            return;
        };
        self.pointer.commit_position(clamped);
        seat.set_pointer_position(clamped);
    }

    fn sync_cursor_flags<S: Shell>(&mut self, shell: &S) {
        self.cursor
            .set_active(CursorSource::DragAndDrop, shell.is_drag_in_progress());
        self.cursor
            .set_active(CursorSource::LockScreen, shell.is_screen_locked());
        self.cursor.set_active(
            CursorSource::WindowSelector,
            shell.is_window_selection_active(),
        );
        let (decoration, surface) = match self.tracker.current() {
            Some(FocusTarget::Decoration(_)) => (true, false),
            Some(FocusTarget::Surface { .. }) => (false, true),
            _ => (false, false),
        };
        self.cursor.set_active(CursorSource::Decoration, decoration);
        self.cursor.set_active(CursorSource::FocusedSurface, surface);
    }

    fn warp_event(&self, to: Point) -> MotionEvent {
        MotionEvent {
            position: to,
            delta: kurbo::Vec2::ZERO,
            unaccel_delta: kurbo::Vec2::ZERO,
            time_ms: self.last_time_ms,
            device: WARP_DEVICE,
        }
    }
}

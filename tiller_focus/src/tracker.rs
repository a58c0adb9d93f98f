// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus tracker: who owns the pointer, with paired transitions.
//!
//! ## Overview
//!
//! [`FocusTracker`] owns the currently focused target and performs the
//! enter/leave choreography when a hit-test result disagrees with it. The
//! guarantee downstream consumers rely on: transitions are always *paired*.
//! For any sequence of retargets, enters and leaves alternate per target —
//! a consumer never sees two enters for different targets without an
//! intervening leave, and the only unpaired notification is the very first
//! enter out of the initial unfocused state.
//!
//! ## Transition sequence
//!
//! On a retarget to a different identity:
//!
//! 1. Leave the current target: synthetic leave, drop its geometry
//!    subscription, and clear the seat's focused pointer surface when it
//!    was a client surface. (The caller resets constraint state around
//!    this; see the core.)
//! 2. Enter the new target: liveness is validated first — a candidate whose
//!    owner is already gone falls back to no focus rather than entering a
//!    dead object. The synthetic enter carries the position translated into
//!    the target's local space; a client surface also becomes the seat's
//!    focused pointer surface.
//!
//! The two steps are never interleaved with another transition. The tracker
//! is not reentrant: hooks that want to move focus again record a request
//! on the [`EventCtx`](crate::shell::EventCtx) and the core's deferral
//! queue replays it after the current update commits.

use kurbo::Point;

use crate::shell::{EventCtx, HitCandidate, SeatSink, Shell};
use crate::target::{FocusTarget, SurfaceId, WindowId};

/// Tracks the focused target and runs paired enter/leave transitions.
#[derive(Clone, Debug, Default)]
pub struct FocusTracker {
    current: Option<FocusTarget>,
    origin: Point,
    window: Option<WindowId>,
}

impl FocusTracker {
    /// An unfocused tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused target, if any.
    pub const fn current(&self) -> Option<&FocusTarget> {
        self.current.as_ref()
    }

    /// The focused target's surface id, when it is a client surface.
    pub fn focused_surface(&self) -> Option<SurfaceId> {
        self.current.as_ref().and_then(FocusTarget::surface)
    }

    /// The toplevel window owning the focused target, when known.
    pub const fn window(&self) -> Option<WindowId> {
        self.window
    }

    /// Global position of the focused target's local origin.
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Translate a global position into the focused target's local space.
    pub fn local(&self, global: Point) -> Point {
        (global - self.origin).to_point()
    }

    /// Translate a target-local position back to global space.
    pub fn global(&self, local: Point) -> Point {
        self.origin + local.to_vec2()
    }

    /// Apply a hit-test result at `position`, transitioning if needed.
    ///
    /// Returns whether a transition occurred. A candidate whose owner is no
    /// longer alive is treated as no candidate (logged, not fatal). A
    /// candidate with the current target's identity refreshes the stored
    /// origin and window without any notifications.
    pub fn retarget<S: Shell, K: SeatSink>(
        &mut self,
        shell: &S,
        seat: &mut K,
        candidate: Option<HitCandidate>,
        position: Point,
        ctx: &mut EventCtx,
    ) -> bool {
        let candidate = candidate.filter(|c| {
            let alive = shell.is_alive(&c.target);
            if !alive {
                log::warn!("hit test produced a dead target {:?}; ignoring", c.target);
            }
            alive
        });

        match (&self.current, &candidate) {
            (Some(current), Some(c)) if current.same_target(&c.target) => {
                // Same identity; the window may have moved under us.
                self.current = Some(c.target);
                self.origin = c.origin;
                self.window = c.window;
                return false;
            }
            (None, None) => return false,
            _ => {}
        }

        if let Some(old) = self.current.take() {
            seat.leave(&old, ctx);
            seat.unwatch_geometry(&old);
            if old.surface().is_some() {
                seat.set_focused_surface(None, Point::ZERO);
            }
            self.origin = Point::ZERO;
            self.window = None;
        }

        if let Some(c) = candidate {
            let local = (position - c.origin).to_point();
            seat.enter(&c.target, local, ctx);
            seat.watch_geometry(&c.target);
            if let Some(id) = c.target.surface() {
                seat.set_focused_surface(Some(id), local);
            }
            self.current = Some(c.target);
            self.origin = c.origin;
            self.window = c.window;
        }

        true
    }

    /// Synchronously unregister a destroyed target.
    ///
    /// No leave is emitted — the owner is gone and must not be notified —
    /// but the geometry subscription and the seat's focused surface
    /// reference are dropped so nothing dangles. Returns whether the
    /// destroyed target was the focused one.
    pub fn drop_dead<K: SeatSink>(&mut self, seat: &mut K, target: &FocusTarget) -> bool {
        let Some(current) = &self.current else {
            return false;
        };
        if !current.same_target(target) {
            return false;
        }
        let old = self.current.take();
        if let Some(old) = old {
            seat.unwatch_geometry(&old);
            if old.surface().is_some() {
                seat.set_focused_surface(None, Point::ZERO);
            }
        }
        self.origin = Point::ZERO;
        self.window = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use tiller_channel::event::Modifiers;
    use tiller_pointer::outputs::Output;

    use crate::target::{DecorationId, InternalId};

    #[derive(Copy, Clone, Debug, PartialEq)]
    enum Note {
        Enter(FocusTarget, Point),
        Leave(FocusTarget),
        Focused(Option<SurfaceId>),
        Watch(FocusTarget),
        Unwatch(FocusTarget),
    }

    #[derive(Default)]
    struct NoteSeat {
        notes: Vec<Note>,
    }

    impl SeatSink for NoteSeat {
        fn enter(&mut self, target: &FocusTarget, local: Point, _ctx: &mut EventCtx) {
            self.notes.push(Note::Enter(*target, local));
        }
        fn leave(&mut self, target: &FocusTarget, _ctx: &mut EventCtx) {
            self.notes.push(Note::Leave(*target));
        }
        fn set_focused_surface(&mut self, surface: Option<SurfaceId>, _local: Point) {
            self.notes.push(Note::Focused(surface));
        }
        fn watch_geometry(&mut self, target: &FocusTarget) {
            self.notes.push(Note::Watch(*target));
        }
        fn unwatch_geometry(&mut self, target: &FocusTarget) {
            self.notes.push(Note::Unwatch(*target));
        }
    }

    struct TestShell {
        outputs: Vec<Output>,
        dead: Vec<SurfaceId>,
    }

    impl TestShell {
        fn new() -> Self {
            Self {
                outputs: Vec::new(),
                dead: Vec::new(),
            }
        }
    }

    impl Shell for TestShell {
        fn outputs(&self) -> &[Output] {
            &self.outputs
        }
        fn hit_test(&self, _position: Point) -> Option<HitCandidate> {
            None
        }
        fn is_alive(&self, target: &FocusTarget) -> bool {
            match target.surface() {
                Some(id) => !self.dead.contains(&id),
                None => true,
            }
        }
        fn active_window(&self) -> Option<WindowId> {
            None
        }
    }

    fn surface_hit(id: u64, origin: Point) -> HitCandidate {
        HitCandidate {
            target: FocusTarget::Surface {
                id: SurfaceId(id),
                offset: origin,
            },
            origin,
            window: Some(WindowId(id)),
        }
    }

    fn ctx() -> EventCtx {
        EventCtx::new(Modifiers::empty())
    }

    #[test]
    fn first_enter_has_no_preceding_leave() {
        let shell = TestShell::new();
        let mut seat = NoteSeat::default();
        let mut tracker = FocusTracker::new();
        let hit = surface_hit(1, Point::new(10.0, 10.0));
        assert!(tracker.retarget(&shell, &mut seat, Some(hit), Point::new(15.0, 18.0), &mut ctx()));
        assert_eq!(
            seat.notes,
            vec![
                Note::Enter(hit.target, Point::new(5.0, 8.0)),
                Note::Watch(hit.target),
                Note::Focused(Some(SurfaceId(1))),
            ]
        );
    }

    #[test]
    fn transitions_are_paired_across_any_sequence() {
        let shell = TestShell::new();
        let mut seat = NoteSeat::default();
        let mut tracker = FocusTracker::new();
        let a = surface_hit(1, Point::ZERO);
        let b = surface_hit(2, Point::new(100.0, 0.0));
        let deco = HitCandidate {
            target: FocusTarget::Decoration(DecorationId(7)),
            origin: Point::new(100.0, 0.0),
            window: Some(WindowId(2)),
        };
        let sequence = [
            Some(a),
            Some(a),
            Some(b),
            None,
            Some(deco),
            Some(b),
            None,
            None,
        ];
        for candidate in sequence {
            tracker.retarget(&shell, &mut seat, candidate, Point::new(110.0, 5.0), &mut ctx());
        }

        let enters: Vec<_> = seat
            .notes
            .iter()
            .filter(|n| matches!(n, Note::Enter(..)))
            .collect();
        let leaves: Vec<_> = seat
            .notes
            .iter()
            .filter(|n| matches!(n, Note::Leave(..)))
            .collect();
        assert_eq!(enters.len(), 4);
        assert_eq!(leaves.len(), 4);

        // No two enters for different targets without an intervening leave.
        let mut inside: Option<FocusTarget> = None;
        for note in &seat.notes {
            match note {
                Note::Enter(t, _) => {
                    assert!(inside.is_none(), "enter while already inside {inside:?}");
                    inside = Some(*t);
                }
                Note::Leave(t) => {
                    let current = inside.take().expect("leave without enter");
                    assert!(current.same_target(t), "leave for a different target");
                }
                _ => {}
            }
        }
    }

    #[test]
    fn same_identity_refreshes_origin_without_notifications() {
        let shell = TestShell::new();
        let mut seat = NoteSeat::default();
        let mut tracker = FocusTracker::new();
        tracker.retarget(
            &shell,
            &mut seat,
            Some(surface_hit(1, Point::ZERO)),
            Point::new(5.0, 5.0),
            &mut ctx(),
        );
        let before = seat.notes.len();
        // The window moved; same surface, new origin.
        let moved = surface_hit(1, Point::new(50.0, 0.0));
        assert!(!tracker.retarget(&shell, &mut seat, Some(moved), Point::new(60.0, 5.0), &mut ctx()));
        assert_eq!(seat.notes.len(), before, "no notifications for a move");
        assert_eq!(tracker.origin(), Point::new(50.0, 0.0));
        assert_eq!(tracker.local(Point::new(60.0, 5.0)), Point::new(10.0, 5.0));
    }

    #[test]
    fn dead_candidate_falls_back_to_unfocused() {
        let mut shell = TestShell::new();
        shell.dead.push(SurfaceId(2));
        let mut seat = NoteSeat::default();
        let mut tracker = FocusTracker::new();
        tracker.retarget(
            &shell,
            &mut seat,
            Some(surface_hit(1, Point::ZERO)),
            Point::ZERO,
            &mut ctx(),
        );
        // The new candidate's owner is already gone: leave the old target,
        // enter nothing.
        assert!(tracker.retarget(
            &shell,
            &mut seat,
            Some(surface_hit(2, Point::ZERO)),
            Point::ZERO,
            &mut ctx()
        ));
        assert_eq!(tracker.current(), None);
        assert!(matches!(seat.notes.last(), Some(Note::Focused(None))));
    }

    #[test]
    fn internal_targets_do_not_touch_the_focused_surface() {
        let shell = TestShell::new();
        let mut seat = NoteSeat::default();
        let mut tracker = FocusTracker::new();
        let internal = HitCandidate {
            target: FocusTarget::Internal(InternalId(3)),
            origin: Point::ZERO,
            window: None,
        };
        tracker.retarget(&shell, &mut seat, Some(internal), Point::ZERO, &mut ctx());
        assert!(
            !seat.notes.iter().any(|n| matches!(n, Note::Focused(_))),
            "internal surfaces never set the seat's focused pointer surface"
        );
    }

    #[test]
    fn drop_dead_unregisters_silently() {
        let shell = TestShell::new();
        let mut seat = NoteSeat::default();
        let mut tracker = FocusTracker::new();
        let hit = surface_hit(1, Point::ZERO);
        tracker.retarget(&shell, &mut seat, Some(hit), Point::ZERO, &mut ctx());
        seat.notes.clear();

        assert!(tracker.drop_dead(&mut seat, &hit.target));
        assert_eq!(tracker.current(), None);
        assert!(
            !seat.notes.iter().any(|n| matches!(n, Note::Leave(_))),
            "a destroyed target is never notified"
        );
        assert!(seat.notes.contains(&Note::Unwatch(hit.target)));
        assert!(seat.notes.contains(&Note::Focused(None)));

        // Unrelated targets are ignored.
        assert!(!tracker.drop_dead(&mut seat, &hit.target));
    }
}

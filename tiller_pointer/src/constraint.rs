// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer confinement and locking: declarations, activation, arbitration.
//!
//! ## Overview
//!
//! Clients declare constraints against their own surfaces: a *confinement*
//! (the pointer may not be reported outside a region while the surface is
//! focused) or a *lock* (the position freezes; only relative motion flows).
//! [`ConstraintSet`] holds those declarations keyed by a stable surface key
//! and arbitrates which one — at most one — is active for the currently
//! focused target.
//!
//! ## Activation rules
//!
//! A declared constraint activates only if all of these hold: constraints
//! are globally enabled, the focused target's owning window is the current
//! active window, a region is declared, and the current target-local
//! position lies inside that region. Confinement is checked before locking;
//! a surface declaring both only ever confines.
//!
//! ## Deactivation
//!
//! Active state belongs to the focused target: it resets whenever focus
//! moves away or the declaring client revokes. A confinement whose
//! containment condition has stopped holding is cleared on the next position
//! proposal and that proposal passes through unclamped — deciding whether to
//! then refocus is the focus tracker's job, not the arbiter's. Deactivating
//! a lock surfaces the client's last position hint; the caller applies it as
//! the next committed position only if it is valid (non-negative, with a
//! focused target).
//!
//! ## Regions
//!
//! Regions are target-local, half-open unions of rectangles, or infinite.
//! Empty and degenerate rectangles never contain anything, so a malformed
//! region simply never activates its constraint.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

/// A target-local input region.
#[derive(Clone, Debug, PartialEq)]
pub enum Region {
    /// Contains every point. A constraint declared without an explicit
    /// region applies to the whole surface.
    Infinite,
    /// A union of rectangles, half-open on both axes.
    Union(Vec<Rect>),
}

impl Region {
    /// A region of a single rectangle.
    pub fn rect(r: Rect) -> Self {
        Self::Union(Vec::from([r]))
    }

    /// Half-open containment; degenerate rectangles contain nothing.
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Self::Infinite => true,
            Self::Union(rects) => rects.iter().any(|r| {
                r.width() > 0.0
                    && r.height() > 0.0
                    && p.x >= r.x0
                    && p.x < r.x1
                    && p.y >= r.y0
                    && p.y < r.y1
            }),
        }
    }

    /// True when the region can never contain a point.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Infinite => false,
            Self::Union(rects) => !rects.iter().any(|r| r.width() > 0.0 && r.height() > 0.0),
        }
    }
}

/// What kind of constraint a client declared.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConstraintKind {
    /// Keep the pointer inside the region.
    Confine,
    /// Freeze the pointer; report only relative motion.
    Lock,
}

#[derive(Clone, Debug)]
struct Declaration {
    kind: ConstraintKind,
    region: Region,
    /// Client-provided cursor position hint, applied when a lock deactivates.
    hint: Option<Point>,
}

/// Declarations plus the single active constraint for the focused target.
///
/// Generic over the surface key `K` so this crate does not dictate the
/// handle type; the owning core keys it by its surface id.
#[derive(Clone, Debug, Default)]
pub struct ConstraintSet<K: Ord + Copy> {
    declared: BTreeMap<K, Declaration>,
    active: Option<(K, ConstraintKind)>,
}

impl<K: Ord + Copy> ConstraintSet<K> {
    /// An empty set.
    pub const fn new() -> Self {
        Self {
            declared: BTreeMap::new(),
            active: None,
        }
    }

    /// Declare (or replace) a confinement for `key`.
    ///
    /// Replacing a declaration deactivates any active constraint for `key`;
    /// the next [`evaluate`](Self::evaluate) pass decides afresh.
    pub fn declare_confinement(&mut self, key: K, region: Region) {
        if region.is_empty() {
            log::debug!("declared confinement region is degenerate; it will never activate");
        }
        self.declared.insert(
            key,
            Declaration {
                kind: ConstraintKind::Confine,
                region,
                hint: None,
            },
        );
        self.deactivate_if(key);
    }

    /// Declare (or replace) a lock for `key`, with an optional position hint.
    pub fn declare_lock(&mut self, key: K, region: Region, hint: Option<Point>) {
        if region.is_empty() {
            log::debug!("declared lock region is degenerate; it will never activate");
        }
        self.declared.insert(
            key,
            Declaration {
                kind: ConstraintKind::Lock,
                region,
                hint,
            },
        );
        self.deactivate_if(key);
    }

    /// Update the position hint of a declared lock. Ignored for
    /// confinements and unknown keys.
    pub fn set_lock_hint(&mut self, key: K, hint: Point) {
        if let Some(decl) = self.declared.get_mut(&key) {
            if decl.kind == ConstraintKind::Lock {
                decl.hint = Some(hint);
            }
        }
    }

    /// Remove `key`'s declaration entirely.
    ///
    /// Returns the lock hint when this revocation deactivated an active
    /// lock, for the caller to apply if valid.
    pub fn revoke(&mut self, key: K) -> Option<Point> {
        let hint = match self.active {
            Some((k, ConstraintKind::Lock)) if k == key => {
                self.declared.get(&key).and_then(|d| d.hint)
            }
            _ => None,
        };
        self.declared.remove(&key);
        self.deactivate_if(key);
        hint
    }

    /// Reset the active constraint, e.g. because focus moved away.
    ///
    /// Returns the lock hint when an active lock was deactivated.
    pub fn reset(&mut self) -> Option<Point> {
        match self.active.take() {
            Some((key, ConstraintKind::Lock)) => self.declared.get(&key).and_then(|d| d.hint),
            _ => None,
        }
    }

    fn deactivate_if(&mut self, key: K) {
        if matches!(self.active, Some((k, _)) if k == key) {
            self.active = None;
        }
    }

    /// Re-run the activation check for the focused surface.
    ///
    /// `focused` is the focused target's surface key (`None` when no surface
    /// is focused), `window_is_active` whether that target's owning window
    /// is the current active window, and `local` the current position in
    /// target-local space. Activation requires all of: globally `enabled`,
    /// `window_is_active`, a declaration, and containment of `local`.
    /// Confinement is checked first; if it applies, the lock is not
    /// evaluated this pass.
    ///
    /// Returns the lock hint when this pass deactivated a previously
    /// active lock, for the caller to apply if valid.
    pub fn evaluate(
        &mut self,
        enabled: bool,
        focused: Option<K>,
        window_is_active: bool,
        local: Point,
    ) -> Option<Point> {
        let previous = self.active.take();
        if enabled && window_is_active {
            if let Some(key) = focused {
                if let Some(decl) = self.declared.get(&key) {
                    if decl.region.contains(local) {
                        self.active = Some((key, decl.kind));
                    }
                }
            }
        }
        match previous {
            Some((key, ConstraintKind::Lock))
                if !matches!(self.active, Some((k, _)) if k == key) =>
            {
                self.declared.get(&key).and_then(|d| d.hint)
            }
            _ => None,
        }
    }

    /// The active constraint, if any.
    pub fn active(&self) -> Option<(K, ConstraintKind)> {
        self.active
    }

    /// True if a confinement is active.
    pub fn is_confined(&self) -> bool {
        matches!(self.active, Some((_, ConstraintKind::Confine)))
    }

    /// True if a lock is active.
    pub fn is_locked(&self) -> bool {
        matches!(self.active, Some((_, ConstraintKind::Lock)))
    }

    /// Check the active confinement's containment condition and clamp.
    ///
    /// Called on every position proposal with the previous and candidate
    /// positions in target-local space. If no confinement is active, the
    /// candidate passes through. If the *previous* position has fallen
    /// outside the region (the region shrank under us), the confinement is
    /// deactivated and the candidate passes through unclamped for this call.
    /// Otherwise the candidate is kept inside the region by axis
    /// preservation: candidate, then `(prev.x, cand.y)`, then
    /// `(cand.x, prev.y)`, then the previous position.
    pub fn confine(&mut self, prev_local: Point, cand_local: Point) -> Point {
        let Some((key, ConstraintKind::Confine)) = self.active else {
            return cand_local;
        };
        let Some(decl) = self.declared.get(&key) else {
            // Declaration vanished under an active constraint; fail open.
            self.active = None;
            return cand_local;
        };
        if !decl.region.contains(prev_local) {
            log::debug!("confinement region no longer contains the pointer; deactivating");
            self.active = None;
            return cand_local;
        }
        if decl.region.contains(cand_local) {
            return cand_local;
        }
        let keep_x = Point::new(prev_local.x, cand_local.y);
        if decl.region.contains(keep_x) {
            return keep_x;
        }
        let keep_y = Point::new(cand_local.x, prev_local.y);
        if decl.region.contains(keep_y) {
            return keep_y;
        }
        prev_local
    }
}

// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output snapshots and the clamp-to-union position rule.
//!
//! ## Overview
//!
//! Outputs are owned by the output-topology collaborator; this core only
//! reads ordered geometry snapshots for the duration of one call. A proposed
//! pointer position must land inside the union of output rectangles:
//! positions already inside pass through unchanged, positions outside are
//! pulled to the nearest representable point on some output, and with no
//! outputs at all the proposal is rejected so the pointer never reports a
//! position outside all known geometry.
//!
//! Edges are inclusive-exclusive: the rightmost representable column of an
//! output spanning `[x0, x1)` is `x1 - 1`, matching how production
//! compositors clip pointer motion against output bounds.

use kurbo::{Point, Rect};

/// Stable identifier of an output, assigned by the topology collaborator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct OutputId(pub u64);

/// A read-only snapshot of one output's placement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Output {
    /// Stable identity across hot-plug events.
    pub id: OutputId,
    /// Placement in the shared global coordinate space.
    pub rect: Rect,
    /// Scale factor (only carried through; clamping is scale-independent).
    pub scale: f64,
}

impl Output {
    /// A snapshot from position and size, with scale 1.
    pub fn new(id: OutputId, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            rect: Rect::new(x, y, x + width, y + height),
            scale: 1.0,
        }
    }

    /// Half-open containment test against this output's rectangle.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.rect.x0 && p.x < self.rect.x1 && p.y >= self.rect.y0 && p.y < self.rect.y1
    }

    /// Clamp a point to this output's inclusive-exclusive bounds.
    fn clamp(&self, p: Point) -> Point {
        // Degenerate rects collapse to their origin rather than inverting.
        let hi_x = (self.rect.x1 - 1.0).max(self.rect.x0);
        let hi_y = (self.rect.y1 - 1.0).max(self.rect.y0);
        Point::new(p.x.clamp(self.rect.x0, hi_x), p.y.clamp(self.rect.y0, hi_y))
    }
}

/// Whether a point lies inside the union of outputs.
pub fn union_contains(outputs: &[Output], p: Point) -> bool {
    outputs.iter().any(|o| o.contains(p))
}

/// Clamp a candidate position into the output union.
///
/// Returns the candidate unchanged when it is already inside some output;
/// otherwise the nearest per-output clamp by squared distance, with ties
/// going to the earliest output in the snapshot. Returns `None` when the
/// snapshot is empty — the proposal is rejected and the caller leaves the
/// position untouched.
pub fn clamp_to_outputs(outputs: &[Output], candidate: Point) -> Option<Point> {
    if union_contains(outputs, candidate) {
        return Some(candidate);
    }
    let mut best: Option<(Point, f64)> = None;
    for output in outputs {
        let clamped = output.clamp(candidate);
        let dx = clamped.x - candidate.x;
        let dy = clamped.y - candidate.y;
        let dist = dx * dx + dy * dy;
        match best {
            Some((_, best_dist)) if best_dist <= dist => {}
            _ => best = Some((clamped, dist)),
        }
    }
    best.map(|(p, _)| p)
}

// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tiller_pointer --heading-base-level=0

//! Tiller Pointer: the pointer-side state a compositor's input core acts on.
//!
//! ## Overview
//!
//! Four small, pure pieces:
//!
//! - [`PointerState`](crate::state::PointerState): sub-pixel global position,
//!   per-button state, and the aggregate button mask, recomputed in full on
//!   every change (never patched incrementally).
//! - [`outputs`](crate::outputs): read-only output snapshots and the
//!   clamp-to-union rule that keeps a proposed position on screen. With no
//!   outputs the proposal is rejected rather than committed out of bounds.
//! - [`ConstraintSet`](crate::constraint::ConstraintSet): client-declared
//!   pointer confinement and locking, the activation rules, and the
//!   axis-preserving confinement clamp.
//! - [`CursorResolver`](crate::cursor::CursorResolver): a fixed-priority
//!   list of cursor override sources; the highest active source wins, and
//!   changes are reported de-duplicated so downstream never re-uploads an
//!   unchanged image.
//!
//! ## Coordinate spaces
//!
//! Positions are `kurbo::Point` in the shared global space unless a name
//! says otherwise; constraint regions are target-local. Containment is
//! half-open (`x0 <= x < x1`), and clamping treats output edges as
//! inclusive-exclusive (the rightmost representable column is `x1 - 1`).
//!
//! ## No I/O, no blocking
//!
//! Everything here is bounded synchronous computation over small snapshots.
//! Anomalies (degenerate regions, missing cursor images, rejected
//! proposals) degrade gracefully and log via the `log` facade.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod constraint;
pub mod cursor;
pub mod outputs;
pub mod state;

pub use constraint::{ConstraintKind, ConstraintSet, Region};
pub use cursor::{CursorIcon, CursorImage, CursorResolver, CursorShape, CursorSource};
pub use outputs::{Output, OutputId, clamp_to_outputs, union_contains};
pub use state::{ButtonMask, PointerState};

// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tiller_channel --heading-base-level=0

//! Tiller Channel: ordered, synchronous dispatch for raw input events.
//!
//! ## Overview
//!
//! This crate is the event plumbing under an input-routing core. It carries no
//! policy of its own; it guarantees *ordering*.
//!
//! - [`EventChannel`](crate::channel::EventChannel) fans an event out to two
//!   independently-ordered listener lists: *observers* (always all invoked, in
//!   registration order) and *handlers* (invoked in registration order until
//!   one claims the event).
//! - [`DeferQueue`](crate::defer::DeferQueue) is a scoped reentrancy guard: a
//!   depth counter plus a FIFO of deferred work. Work submitted while an
//!   update is already in flight is appended, never processed in place, and
//!   drained one element at a time once the outermost update finishes.
//!
//! ## Event model
//!
//! Raw device events are tagged unions ([`InputEvent`](crate::event::InputEvent)
//! over motion, button, and axis payloads), dispatched by exhaustive match.
//! A new event kind is a compile error at every call site that forgets it,
//! which is the point.
//!
//! ## Ordering
//!
//! - Observers run before handlers and always all run; an observer cannot
//!   short-circuit the pass.
//! - Handlers run until the first [`Claim::Claimed`](crate::event::Claim).
//! - Listeners registered during a pass do not run in that pass.
//! - Listeners unregistered during a pass are tombstoned immediately and
//!   compacted once no pass is in flight, so the in-flight iteration is never
//!   corrupted.
//!
//! ## Reentrancy
//!
//! The channel invokes listeners synchronously, so a listener may want to
//! feed new work (a warp, a refocus) back into the same pipeline before the
//! current event has committed. [`DeferQueue`](crate::defer::DeferQueue)
//! exists for exactly that: the entry point enters the queue, runs, and on
//! exit drains deferred items in strict submission order. Draining an item
//! may defer more items; the same loop picks them up. No recursion, no
//! merged or dropped updates.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod channel;
pub mod defer;
pub mod event;

pub use channel::{EventChannel, ListenerId};
pub use defer::DeferQueue;
pub use event::{
    Axis, AxisEvent, AxisSource, ButtonEvent, ButtonId, ButtonState, Claim, DeviceId, DeviceKind,
    InputEvent, Modifiers, MotionEvent,
};

// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reentrancy guard: a scoped depth counter plus a FIFO deferral queue.
//!
//! ## Overview
//!
//! An input-routing core is driven synchronously, and the code it calls out
//! to (handlers, focus hooks) may feed new position updates back in before
//! the current one has committed. Processing those in place would interleave
//! two updates and can reorder commits; ignoring them would drop input.
//!
//! [`DeferQueue`] implements the contract instead: the outermost update
//! enters the guard, recursive submissions are appended to a FIFO, and when
//! the outermost update exits, the queue is drained one element at a time
//! through the same entry point that would have been used originally.
//! Draining an element may itself append new elements; the same drain loop
//! picks them up in submission order. If nothing recursive happened, the
//! queue is untouched.
//!
//! This is a value owned by its core, not a process-wide flag, so multiple
//! independent cores can coexist (and be tested) in one process.
//!
//! ## Usage
//!
//! ```
//! use tiller_channel::defer::DeferQueue;
//!
//! let mut queue: DeferQueue<u32> = DeferQueue::new();
//! let mut committed = Vec::new();
//!
//! // The entry point: defer if an update is already in flight, otherwise
//! // process, then drain whatever the processing deferred.
//! fn update(queue: &mut DeferQueue<u32>, committed: &mut Vec<u32>, item: u32) {
//!     if queue.is_held() {
//!         queue.defer(item);
//!         return;
//!     }
//!     let mut next = Some(item);
//!     while let Some(item) = next.take() {
//!         queue.enter();
//!         // A real core would hit-test, clamp, and commit here; a recursive
//!         // submission during this step lands in the queue.
//!         committed.push(item);
//!         next = queue.exit();
//!     }
//! }
//!
//! update(&mut queue, &mut committed, 1);
//! assert_eq!(committed, vec![1]);
//! ```

use alloc::collections::VecDeque;

/// A scoped reentrancy counter with a FIFO of deferred work.
///
/// The queue itself is mechanism only; the owning entry point decides what a
/// deferred item is and how to re-process it. See the module docs for the
/// drain discipline.
#[derive(Clone, Debug)]
pub struct DeferQueue<T> {
    depth: usize,
    queue: VecDeque<T>,
}

impl<T> Default for DeferQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferQueue<T> {
    /// Create an empty, unheld queue.
    pub const fn new() -> Self {
        Self {
            depth: 0,
            queue: VecDeque::new(),
        }
    }

    /// True while any update scope is in flight.
    ///
    /// Submissions arriving while held must be [deferred](Self::defer), not
    /// processed in place.
    pub const fn is_held(&self) -> bool {
        self.depth > 0
    }

    /// Current scope depth.
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Number of deferred items waiting to drain.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Append a deferred item.
    pub fn defer(&mut self, item: T) {
        self.queue.push_back(item);
    }

    /// Enter an update scope.
    pub fn enter(&mut self) {
        self.depth += 1;
    }

    /// Exit an update scope.
    ///
    /// When this exit closes the outermost scope, the oldest deferred item
    /// (if any) is handed back for the caller to re-process through the
    /// original entry point; that re-processing enters the guard again.
    /// Inner exits never drain.
    pub fn exit(&mut self) -> Option<T> {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.queue.pop_front()
        } else {
            None
        }
    }
}

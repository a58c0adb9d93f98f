// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event channel: observer fan-out and claiming handler dispatch.
//!
//! ## Overview
//!
//! Two independently-ordered listener lists over the same event stream:
//!
//! - *Observers* are passive trackers. [`EventChannel::notify_observers`]
//!   invokes every live observer in registration order, unconditionally; an
//!   observer cannot short-circuit the pass.
//! - *Handlers* are consumers. [`EventChannel::dispatch_handlers`] invokes
//!   handlers in registration order until one returns
//!   [`Claim::Claimed`], and reports whether any did.
//!
//! ## Listener identity and removal
//!
//! Registration returns a generational [`ListenerId`] (slot plus generation,
//! in the same discipline as a generational node id): a stale id never
//! aliases a later listener that reuses the slot. Unregistration is
//! idempotent and tombstones the slot in place; a dispatch pass iterates a
//! snapshot of the slot range and re-checks liveness per slot, so removal
//! never corrupts an in-flight pass and listeners registered during a pass
//! do not run until the next one. Freed slots are recycled with a bumped
//! generation.
//!
//! Listener callbacks receive the event plus a mutable context value `C`
//! supplied by the caller of the dispatch methods. The context is how a
//! listener feeds requests (warps, removals, refocusing) back to its host
//! without reentering it; see the crate docs on reentrancy.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::event::Claim;

/// Identifier of a registered observer or handler.
///
/// Ids are scoped to the list that issued them: an observer id means nothing
/// to [`EventChannel::unregister_handler`] and vice versa. A freed slot is
/// reused with a higher generation, so stale ids fail closed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(u32, u32);

impl ListenerId {
    const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A generational slot list of callbacks.
///
/// Shared mechanism for both listener kinds; `F` is the boxed callback type.
struct ListenerList<F> {
    slots: Vec<Option<F>>,
    generations: Vec<u32>,
    free: Vec<usize>,
}

impl<F> ListenerList<F> {
    const fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free: Vec::new(),
        }
    }

    fn register(&mut self, f: F) -> ListenerId {
        if let Some(idx) = self.free.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(f);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ListenerId uses 32-bit indices by design."
            )]
            ListenerId::new(idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(f));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ListenerId uses 32-bit indices by design."
            )]
            ListenerId::new((self.slots.len() - 1) as u32, generation)
        }
    }

    fn unregister(&mut self, id: ListenerId) {
        if !self.is_alive(id) {
            return;
        }
        self.slots[id.idx()] = None;
        self.free.push(id.idx());
    }

    fn is_alive(&self, id: ListenerId) -> bool {
        self.generations.get(id.idx()).copied() == Some(id.1) && self.slots[id.idx()].is_some()
    }

    fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

type Observer<E, C> = Box<dyn FnMut(&E, &mut C)>;
type Handler<E, C> = Box<dyn FnMut(&E, &mut C) -> Claim>;

/// Ordered, synchronous dispatch of events to observers and handlers.
///
/// Generic over the event type `E` and a per-dispatch context `C` threaded
/// to every callback. The channel has no side effects of its own beyond
/// invoking callbacks.
pub struct EventChannel<E, C> {
    observers: ListenerList<Observer<E, C>>,
    handlers: ListenerList<Handler<E, C>>,
}

impl<E, C> core::fmt::Debug for EventChannel<E, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventChannel")
            .field("observers", &self.observers.live_count())
            .field("handlers", &self.handlers.live_count())
            .finish_non_exhaustive()
    }
}

impl<E, C> Default for EventChannel<E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C> EventChannel<E, C> {
    /// Create an empty channel.
    pub const fn new() -> Self {
        Self {
            observers: ListenerList::new(),
            handlers: ListenerList::new(),
        }
    }

    /// Register a passive observer. Observers always see every event.
    pub fn register_observer(&mut self, f: impl FnMut(&E, &mut C) + 'static) -> ListenerId {
        self.observers.register(Box::new(f))
    }

    /// Remove an observer. Idempotent; stale ids are ignored.
    pub fn unregister_observer(&mut self, id: ListenerId) {
        self.observers.unregister(id);
    }

    /// Register a claiming handler.
    pub fn register_handler(&mut self, f: impl FnMut(&E, &mut C) -> Claim + 'static) -> ListenerId {
        self.handlers.register(Box::new(f))
    }

    /// Remove a handler. Idempotent; stale ids are ignored.
    pub fn unregister_handler(&mut self, id: ListenerId) {
        self.handlers.unregister(id);
    }

    /// Invoke every live observer in registration order.
    ///
    /// The pass never returns early regardless of what observers do.
    /// Observers registered while a pass runs are not invoked until the
    /// next pass.
    pub fn notify_observers(&mut self, event: &E, ctx: &mut C) {
        let len = self.observers.slots.len();
        for i in 0..len {
            if let Some(f) = self.observers.slots[i].as_mut() {
                f(event, ctx);
            }
        }
    }

    /// Invoke handlers in registration order until one claims the event.
    ///
    /// Returns `true` if any handler claimed it.
    pub fn dispatch_handlers(&mut self, event: &E, ctx: &mut C) -> bool {
        let len = self.handlers.slots.len();
        for i in 0..len {
            if let Some(f) = self.handlers.slots[i].as_mut() {
                if f(event, ctx) == Claim::Claimed {
                    return true;
                }
            }
        }
        false
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.observers.live_count()
    }

    /// Number of live handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.live_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    type Log = Rc<RefCell<Vec<u32>>>;

    fn channel() -> EventChannel<u32, ()> {
        EventChannel::new()
    }

    #[test]
    fn observers_run_in_registration_order() {
        let mut ch = channel();
        let log: Log = Rc::default();
        for tag in [1_u32, 2, 3] {
            let log = log.clone();
            ch.register_observer(move |ev, _| log.borrow_mut().push(tag * 100 + ev));
        }
        ch.notify_observers(&7, &mut ());
        assert_eq!(*log.borrow(), vec![107, 207, 307]);
    }

    #[test]
    fn all_observers_run_even_after_handler_like_outcomes() {
        // Observers have no claim semantics; every one of them runs.
        let mut ch = channel();
        let log: Log = Rc::default();
        for tag in [1_u32, 2] {
            let log = log.clone();
            ch.register_observer(move |_, _| log.borrow_mut().push(tag));
        }
        ch.notify_observers(&0, &mut ());
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn handler_claim_stops_the_pass() {
        let mut ch = channel();
        let log: Log = Rc::default();
        {
            let log = log.clone();
            ch.register_handler(move |_, _| {
                log.borrow_mut().push(1);
                Claim::Pass
            });
        }
        {
            let log = log.clone();
            ch.register_handler(move |_, _| {
                log.borrow_mut().push(2);
                Claim::Claimed
            });
        }
        {
            let log = log.clone();
            ch.register_handler(move |_, _| {
                log.borrow_mut().push(3);
                Claim::Claimed
            });
        }
        assert!(ch.dispatch_handlers(&0, &mut ()));
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn dispatch_reports_unclaimed() {
        let mut ch = channel();
        ch.register_handler(|_, _| Claim::Pass);
        assert!(!ch.dispatch_handlers(&0, &mut ()));
    }

    #[test]
    fn unregister_is_idempotent_and_skips_callbacks() {
        let mut ch = channel();
        let log: Log = Rc::default();
        let id = {
            let log = log.clone();
            ch.register_observer(move |_, _| log.borrow_mut().push(1))
        };
        ch.unregister_observer(id);
        ch.unregister_observer(id);
        ch.notify_observers(&0, &mut ());
        assert!(log.borrow().is_empty());
        assert_eq!(ch.observer_count(), 0);
    }

    #[test]
    fn stale_id_does_not_alias_reused_slot() {
        let mut ch = channel();
        let log: Log = Rc::default();
        let first = {
            let log = log.clone();
            ch.register_observer(move |_, _| log.borrow_mut().push(1))
        };
        ch.unregister_observer(first);
        let _second = {
            let log = log.clone();
            ch.register_observer(move |_, _| log.borrow_mut().push(2))
        };
        // The stale id refers to the same slot but an older generation.
        ch.unregister_observer(first);
        ch.notify_observers(&0, &mut ());
        assert_eq!(*log.borrow(), vec![2]);
    }

    #[test]
    fn observer_and_handler_lists_are_independent() {
        let mut ch = channel();
        let log: Log = Rc::default();
        let obs = {
            let log = log.clone();
            ch.register_observer(move |_, _| log.borrow_mut().push(1))
        };
        {
            let log = log.clone();
            ch.register_handler(move |_, _| {
                log.borrow_mut().push(2);
                Claim::Pass
            });
        }
        // An observer id fed to the handler list must not remove anything.
        ch.unregister_handler(obs);
        assert_eq!(ch.handler_count(), 1);
        ch.notify_observers(&0, &mut ());
        ch.dispatch_handlers(&0, &mut ());
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn context_is_threaded_through_both_passes() {
        let mut ch: EventChannel<u32, Vec<u32>> = EventChannel::new();
        ch.register_observer(|ev, ctx: &mut Vec<u32>| ctx.push(*ev));
        ch.register_handler(|ev, ctx: &mut Vec<u32>| {
            ctx.push(ev + 1);
            Claim::Claimed
        });
        let mut ctx = Vec::new();
        ch.notify_observers(&10, &mut ctx);
        ch.dispatch_handlers(&10, &mut ctx);
        assert_eq!(ctx, vec![10, 11]);
    }
}

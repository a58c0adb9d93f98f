// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer position and button state.
//!
//! ## Overview
//!
//! [`PointerState`] is the object the routing pipeline acts on: the committed
//! global position, the per-button pressed/released map, and the derived
//! aggregate [`ButtonMask`]. The mask is always recomputed from scratch by
//! scanning the currently-pressed entries; there is no incremental patching
//! to drift out of sync.

use alloc::collections::BTreeMap;

use kurbo::Point;
use tiller_channel::event::{ButtonId, ButtonState};

bitflags::bitflags! {
    /// Aggregate pressed-button mask.
    ///
    /// Derived from [`PointerState::set_button`]; the named bits cover the
    /// common evdev buttons, and everything else folds into `OTHER` so the
    /// mask still reflects "some button is down" for exotic devices.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ButtonMask: u8 {
        /// `BTN_LEFT` is pressed.
        const LEFT   = 0b0000_0001;
        /// `BTN_RIGHT` is pressed.
        const RIGHT  = 0b0000_0010;
        /// `BTN_MIDDLE` is pressed.
        const MIDDLE = 0b0000_0100;
        /// `BTN_SIDE` is pressed.
        const SIDE   = 0b0000_1000;
        /// `BTN_EXTRA` is pressed.
        const EXTRA  = 0b0001_0000;
        /// Any button outside the named set is pressed.
        const OTHER  = 0b0010_0000;
    }
}

impl ButtonMask {
    /// The mask bit a button contributes.
    pub fn bit(button: ButtonId) -> Self {
        match button {
            ButtonId::LEFT => Self::LEFT,
            ButtonId::RIGHT => Self::RIGHT,
            ButtonId::MIDDLE => Self::MIDDLE,
            ButtonId::SIDE => Self::SIDE,
            ButtonId::EXTRA => Self::EXTRA,
            _ => Self::OTHER,
        }
    }
}

/// The pointer: committed position, per-button state, aggregate mask.
///
/// Position is committed only by the owning core after clamping and
/// constraint arbitration; nothing here moves it on its own.
#[derive(Clone, Debug, Default)]
pub struct PointerState {
    position: Point,
    buttons: BTreeMap<ButtonId, ButtonState>,
    mask: ButtonMask,
}

impl PointerState {
    /// A pointer at the origin with no buttons down.
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed global position.
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Commit a new global position. The caller has already clamped it.
    pub const fn commit_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Record a button edge and return `(previous, new)` aggregate masks.
    ///
    /// The new mask is recomputed in full from the button map, so replaying
    /// any press/release interleaving always converges to the state the map
    /// describes. Dependent systems diff the two masks to detect edges.
    pub fn set_button(&mut self, button: ButtonId, state: ButtonState) -> (ButtonMask, ButtonMask) {
        let previous = self.mask;
        self.buttons.insert(button, state);
        self.mask = self.recompute_mask();
        (previous, self.mask)
    }

    /// Whether a specific button is currently pressed.
    pub fn is_pressed(&self, button: ButtonId) -> bool {
        self.buttons.get(&button) == Some(&ButtonState::Pressed)
    }

    /// Whether any button is currently pressed.
    ///
    /// This is what suppresses focus transitions mid-click-drag.
    pub fn any_pressed(&self) -> bool {
        self.buttons.values().any(|s| *s == ButtonState::Pressed)
    }

    /// Number of currently pressed buttons.
    pub fn pressed_count(&self) -> usize {
        self.buttons
            .values()
            .filter(|s| **s == ButtonState::Pressed)
            .count()
    }

    /// The aggregate mask over currently pressed buttons.
    pub const fn mask(&self) -> ButtonMask {
        self.mask
    }

    fn recompute_mask(&self) -> ButtonMask {
        let mut mask = ButtonMask::empty();
        for (button, state) in &self.buttons {
            if *state == ButtonState::Pressed {
                mask |= ButtonMask::bit(*button);
            }
        }
        mask
    }
}

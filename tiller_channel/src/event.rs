// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The raw event model: tagged unions for device events and their payloads.
//!
//! ## Overview
//!
//! Every event names the device that produced it by stable identifier, never
//! by reference. A device that disappears leaves behind ids that simply stop
//! matching anything; lookups against them fail closed.

use kurbo::{Point, Vec2};

/// Stable identifier of an input device.
///
/// Assigned by the device-management collaborator. The core never stores a
/// reference back to a device object; it carries this id instead, so a
/// destroyed device cannot leave a dangling reference behind.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DeviceId(pub u64);

/// The class of an input device.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DeviceKind {
    /// Relative pointing device (mouse, trackball, pointing stick).
    Pointer,
    /// Absolute touch device.
    Touch,
    /// Tablet tool (pen, eraser).
    TabletTool,
    /// Keyboard.
    Keyboard,
    /// Synthetic device owned by the compositor itself (e.g. a warp source).
    Virtual,
}

/// A button identifier, in evdev code space (`BTN_LEFT` is `0x110`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ButtonId(pub u32);

impl ButtonId {
    /// Left button (`BTN_LEFT`).
    pub const LEFT: Self = Self(0x110);
    /// Right button (`BTN_RIGHT`).
    pub const RIGHT: Self = Self(0x111);
    /// Middle button (`BTN_MIDDLE`).
    pub const MIDDLE: Self = Self(0x112);
    /// Side button (`BTN_SIDE`).
    pub const SIDE: Self = Self(0x113);
    /// Extra button (`BTN_EXTRA`).
    pub const EXTRA: Self = Self(0x114);
}

/// Pressed or released.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ButtonState {
    /// The button is down.
    Pressed,
    /// The button is up.
    Released,
}

/// Scroll axis.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Axis {
    /// Horizontal scrolling.
    Horizontal,
    /// Vertical scrolling.
    Vertical,
}

/// What produced an axis event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AxisSource {
    /// A physical wheel with detents.
    Wheel,
    /// Finger motion on a touchpad.
    Finger,
    /// Continuous motion (e.g. button-based scrolling).
    Continuous,
    /// Tilting a wheel sideways.
    WheelTilt,
}

bitflags::bitflags! {
    /// Keyboard modifier bitmask, snapshotted from the keyboard collaborator
    /// at dispatch time so every listener in a pass sees the same state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt.
        const ALT   = 0b0000_0100;
        /// Logo (super).
        const LOGO  = 0b0000_1000;
        /// Caps lock is latched.
        const CAPS_LOCK = 0b0001_0000;
        /// Num lock is latched.
        const NUM_LOCK  = 0b0010_0000;
    }
}

/// A pointer motion event.
///
/// `position` is the already-integrated candidate global position; `delta`
/// and `unaccel_delta` carry the accelerated and raw relative motion for
/// consumers that want them (locked pointers receive only the deltas).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotionEvent {
    /// Candidate global position, sub-pixel.
    pub position: Point,
    /// Accelerated motion delta.
    pub delta: Vec2,
    /// Unaccelerated (raw) motion delta.
    pub unaccel_delta: Vec2,
    /// Event timestamp in milliseconds.
    pub time_ms: u64,
    /// Producing device.
    pub device: DeviceId,
}

/// A pointer button event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ButtonEvent {
    /// Which button.
    pub button: ButtonId,
    /// Pressed or released.
    pub state: ButtonState,
    /// Event timestamp in milliseconds.
    pub time_ms: u64,
    /// Producing device.
    pub device: DeviceId,
}

/// A scroll event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisEvent {
    /// Which axis.
    pub axis: Axis,
    /// Continuous delta in logical pixels.
    pub delta: f64,
    /// Discrete detent count, when the source has detents.
    pub discrete: Option<i32>,
    /// What produced the event.
    pub source: AxisSource,
    /// Event timestamp in milliseconds.
    pub time_ms: u64,
    /// Producing device.
    pub device: DeviceId,
}

/// A raw input event, dispatched through the channel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer motion.
    Motion(MotionEvent),
    /// Pointer button.
    Button(ButtonEvent),
    /// Scroll axis.
    Axis(AxisEvent),
}

impl InputEvent {
    /// The device that produced this event.
    pub fn device(&self) -> DeviceId {
        match self {
            Self::Motion(m) => m.device,
            Self::Button(b) => b.device,
            Self::Axis(a) => a.device,
        }
    }

    /// Event timestamp in milliseconds.
    pub fn time_ms(&self) -> u64 {
        match self {
            Self::Motion(m) => m.time_ms,
            Self::Button(b) => b.time_ms,
            Self::Axis(a) => a.time_ms,
        }
    }
}

/// Handler outcome: did the handler consume the event?
///
/// Returned by handlers registered on
/// [`EventChannel`](crate::channel::EventChannel). A claimed event does not
/// reach later handlers nor the routing pipeline behind them.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Claim {
    /// The event is consumed; stop the handler pass.
    Claimed,
    /// Not interested; keep going.
    Pass,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_accessors_cover_all_variants() {
        let dev = DeviceId(3);
        let motion = InputEvent::Motion(MotionEvent {
            position: Point::new(1.0, 2.0),
            delta: Vec2::new(0.5, 0.5),
            unaccel_delta: Vec2::new(1.0, 1.0),
            time_ms: 10,
            device: dev,
        });
        let button = InputEvent::Button(ButtonEvent {
            button: ButtonId::LEFT,
            state: ButtonState::Pressed,
            time_ms: 11,
            device: dev,
        });
        let axis = InputEvent::Axis(AxisEvent {
            axis: Axis::Vertical,
            delta: 15.0,
            discrete: Some(1),
            source: AxisSource::Wheel,
            time_ms: 12,
            device: dev,
        });
        assert_eq!(motion.device(), dev);
        assert_eq!(button.device(), dev);
        assert_eq!(axis.device(), dev);
        assert_eq!(motion.time_ms(), 10);
        assert_eq!(button.time_ms(), 11);
        assert_eq!(axis.time_ms(), 12);
    }

    #[test]
    fn modifiers_compose() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(!mods.contains(Modifiers::LOGO));
    }

    #[test]
    fn device_kinds_classify_exhaustively() {
        // A host's device registry dispatches on the kind; the match is
        // exhaustive so a new kind cannot be forgotten at a call site.
        let absolute = |kind: DeviceKind| match kind {
            DeviceKind::Touch | DeviceKind::TabletTool => true,
            DeviceKind::Pointer | DeviceKind::Keyboard | DeviceKind::Virtual => false,
        };
        assert!(absolute(DeviceKind::Touch));
        assert!(!absolute(DeviceKind::Pointer));
    }
}

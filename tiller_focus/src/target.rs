// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus target handles.
//!
//! ## Overview
//!
//! Everything the pointer can focus is named by a stable identifier, never
//! by reference: the owning collaborator keeps the registry, this core keeps
//! the id. A destroyed owner leaves behind ids that stop resolving, and
//! every lookup fails closed ([`Shell::is_alive`](crate::shell::Shell::is_alive)
//! returning `false` means the target is treated as gone).

use kurbo::Point;

/// Identifier of a client surface.
///
/// Stays stable for the surface's lifetime; never reused while any holder
/// could still name it. Assigned by the surface-management collaborator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SurfaceId(pub u64);

/// Identifier of a server-side window decoration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DecorationId(pub u64);

/// Identifier of a compositor-owned internal surface (an on-screen display,
/// a lock screen, an effect overlay).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct InternalId(pub u64);

/// Identifier of a toplevel window, for active-window comparisons.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct WindowId(pub u64);

/// What the pointer is focused on. `Option<FocusTarget>` expresses
/// "nothing"; exactly one target is focused at a time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FocusTarget {
    /// A client surface, with the global position of its input origin.
    ///
    /// The offset moves with the surface's window; it is not part of the
    /// target's identity.
    Surface {
        /// The surface.
        id: SurfaceId,
        /// Global position of the surface's input origin.
        offset: Point,
    },
    /// A server-side decoration.
    Decoration(DecorationId),
    /// A compositor-owned internal surface.
    Internal(InternalId),
}

impl FocusTarget {
    /// Identity comparison: same underlying object, ignoring the surface
    /// input offset (a window may move without a refocus).
    pub fn same_target(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Surface { id: a, .. }, Self::Surface { id: b, .. }) => a == b,
            (Self::Decoration(a), Self::Decoration(b)) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a == b,
            _ => false,
        }
    }

    /// The surface id, when this target is a client surface.
    pub const fn surface(&self) -> Option<SurfaceId> {
        match self {
            Self::Surface { id, .. } => Some(*id),
            _ => None,
        }
    }
}

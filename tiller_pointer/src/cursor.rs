// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor source resolution: which image and hotspot is shown right now.
//!
//! ## Overview
//!
//! Several parts of a compositor want to own the cursor at once: an active
//! drag-and-drop, the lock screen, window-selection mode, an effect, an
//! interactive move/resize, a hovered decoration, the focused client
//! surface. [`CursorResolver`] arbitrates with a fixed total priority order
//! ([`CursorSource`]); each source keeps its own independently-updated
//! [`CursorImage`], and the highest-priority source whose activation flag is
//! set wins. [`CursorSource::Fallback`] is always active and terminates
//! every scan.
//!
//! ## De-duplication
//!
//! Callers re-resolve after any state change that could affect an
//! activation flag. [`CursorResolver::resolve_change`] reports a change only
//! when the winning source actually differs from the previous resolution,
//! so downstream consumers never re-upload an image that did not change.

use kurbo::Point;

/// A named cursor shape from the cursor theme.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum CursorIcon {
    /// The default arrow.
    #[default]
    Default,
    /// Crosshair, e.g. for region selection.
    Crosshair,
    /// Open hand.
    Grab,
    /// Closed hand, mid-drag.
    Grabbing,
    /// Four-way move.
    Move,
    /// Text caret.
    Text,
    /// Horizontal resize.
    EwResize,
    /// Vertical resize.
    NsResize,
    /// Diagonal resize, north-east/south-west.
    NeswResize,
    /// Diagonal resize, north-west/south-east.
    NwseResize,
    /// Action not allowed.
    NotAllowed,
}

/// Identifier of a client-provided cursor surface.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CursorSurface(pub u64);

/// What a cursor image is made of.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CursorShape {
    /// A named theme cursor.
    Named(CursorIcon),
    /// A client-committed cursor surface.
    Surface(CursorSurface),
    /// No visible cursor (a client may set an empty cursor).
    Hidden,
}

/// An image plus its hotspot, as pushed downstream for display.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CursorImage {
    /// The image content.
    pub shape: CursorShape,
    /// Hotspot offset within the image.
    pub hotspot: Point,
}

impl CursorImage {
    /// A named theme cursor with a hotspot.
    pub const fn named(icon: CursorIcon, hotspot: Point) -> Self {
        Self {
            shape: CursorShape::Named(icon),
            hotspot,
        }
    }

    /// An invisible cursor.
    pub const fn hidden() -> Self {
        Self {
            shape: CursorShape::Hidden,
            hotspot: Point::ZERO,
        }
    }
}

impl Default for CursorImage {
    fn default() -> Self {
        Self::named(CursorIcon::Default, Point::ZERO)
    }
}

/// Cursor override sources, highest priority first.
///
/// The declaration order *is* the priority order; scans walk
/// [`CursorSource::PRIORITY`] top to bottom and stop at the first active
/// source.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CursorSource {
    /// An active drag-and-drop operation.
    DragAndDrop,
    /// The screen locker.
    LockScreen,
    /// Interactive window-selection mode.
    WindowSelector,
    /// A compositor effect overriding the cursor.
    EffectsOverride,
    /// An interactive move or resize.
    MoveResize,
    /// The hovered window decoration.
    Decoration,
    /// The focused client surface's own cursor.
    FocusedSurface,
    /// The theme default; always active.
    Fallback,
}

impl CursorSource {
    /// All sources, highest priority first.
    pub const PRIORITY: [Self; 8] = [
        Self::DragAndDrop,
        Self::LockScreen,
        Self::WindowSelector,
        Self::EffectsOverride,
        Self::MoveResize,
        Self::Decoration,
        Self::FocusedSurface,
        Self::Fallback,
    ];

    const fn index(self) -> usize {
        match self {
            Self::DragAndDrop => 0,
            Self::LockScreen => 1,
            Self::WindowSelector => 2,
            Self::EffectsOverride => 3,
            Self::MoveResize => 4,
            Self::Decoration => 5,
            Self::FocusedSurface => 6,
            Self::Fallback => 7,
        }
    }
}

const SOURCE_COUNT: usize = CursorSource::PRIORITY.len();

/// Arbitrates the shown cursor across override sources.
#[derive(Clone, Debug)]
pub struct CursorResolver {
    images: [Option<CursorImage>; SOURCE_COUNT],
    active: [bool; SOURCE_COUNT],
    last: Option<CursorSource>,
}

impl Default for CursorResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorResolver {
    /// A resolver with only the fallback active, showing the theme default.
    pub fn new() -> Self {
        let mut resolver = Self {
            images: [None; SOURCE_COUNT],
            active: [false; SOURCE_COUNT],
            last: None,
        };
        resolver.active[CursorSource::Fallback.index()] = true;
        resolver.images[CursorSource::Fallback.index()] = Some(CursorImage::default());
        resolver
    }

    /// Update a source's cached image. `None` clears it back to fallback
    /// content (the source may still be active).
    pub fn set_image(&mut self, source: CursorSource, image: Option<CursorImage>) {
        if source == CursorSource::Fallback && image.is_none() {
            // The fallback always has an image; clearing resets the default.
            self.images[source.index()] = Some(CursorImage::default());
            return;
        }
        self.images[source.index()] = image;
    }

    /// Set a source's activation flag. The fallback cannot be deactivated.
    pub fn set_active(&mut self, source: CursorSource, active: bool) {
        if source == CursorSource::Fallback && !active {
            log::debug!("ignoring attempt to deactivate the fallback cursor source");
            return;
        }
        self.active[source.index()] = active;
    }

    /// Whether a source's activation flag is set.
    pub const fn is_active(&self, source: CursorSource) -> bool {
        self.active[source.index()]
    }

    /// The highest-priority active source. The fallback terminates the scan.
    pub fn current_source(&self) -> CursorSource {
        for source in CursorSource::PRIORITY {
            if self.active[source.index()] {
                return source;
            }
        }
        // The fallback flag is never cleared; this is unreachable in
        // practice but harmless.
        CursorSource::Fallback
    }

    /// The cached image for a source, or the fallback default when the
    /// source never supplied one.
    pub fn image_for(&self, source: CursorSource) -> CursorImage {
        match self.images[source.index()] {
            Some(image) => image,
            None => {
                log::trace!("cursor source {source:?} has no cached image; using default");
                CursorImage::default()
            }
        }
    }

    /// The image that should currently be shown.
    pub fn current_image(&self) -> CursorImage {
        self.image_for(self.current_source())
    }

    /// Re-resolve and report a change only if the winning source differs
    /// from the previous resolution.
    pub fn resolve_change(&mut self) -> Option<CursorSource> {
        let source = self.current_source();
        if self.last == Some(source) {
            return None;
        }
        self.last = Some(source);
        Some(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_wins_when_nothing_is_active() {
        let resolver = CursorResolver::new();
        assert_eq!(resolver.current_source(), CursorSource::Fallback);
        assert_eq!(resolver.current_image(), CursorImage::default());
    }

    #[test]
    fn drag_outranks_lock_screen() {
        let mut resolver = CursorResolver::new();
        resolver.set_active(CursorSource::LockScreen, true);
        resolver.set_active(CursorSource::DragAndDrop, true);
        assert_eq!(resolver.current_source(), CursorSource::DragAndDrop);

        resolver.set_active(CursorSource::DragAndDrop, false);
        assert_eq!(resolver.current_source(), CursorSource::LockScreen);
    }

    #[test]
    fn every_source_outranks_the_ones_below_it() {
        let mut resolver = CursorResolver::new();
        // Activate bottom-up; the newest activation must win each time.
        for source in CursorSource::PRIORITY.iter().rev() {
            resolver.set_active(*source, true);
            assert_eq!(resolver.current_source(), *source);
        }
    }

    #[test]
    fn resolve_change_deduplicates() {
        let mut resolver = CursorResolver::new();
        assert_eq!(resolver.resolve_change(), Some(CursorSource::Fallback));
        assert_eq!(resolver.resolve_change(), None, "no change, no report");

        resolver.set_active(CursorSource::MoveResize, true);
        assert_eq!(resolver.resolve_change(), Some(CursorSource::MoveResize));
        assert_eq!(resolver.resolve_change(), None);

        resolver.set_active(CursorSource::MoveResize, false);
        assert_eq!(resolver.resolve_change(), Some(CursorSource::Fallback));
    }

    #[test]
    fn images_are_per_source() {
        let mut resolver = CursorResolver::new();
        let grab = CursorImage::named(CursorIcon::Grabbing, Point::new(4.0, 4.0));
        resolver.set_image(CursorSource::DragAndDrop, Some(grab));
        resolver.set_active(CursorSource::DragAndDrop, true);
        assert_eq!(resolver.current_image(), grab);

        resolver.set_active(CursorSource::DragAndDrop, false);
        assert_eq!(resolver.current_image(), CursorImage::default());
    }

    #[test]
    fn missing_image_falls_back_to_default() {
        let mut resolver = CursorResolver::new();
        resolver.set_active(CursorSource::WindowSelector, true);
        assert_eq!(resolver.current_image(), CursorImage::default());
    }

    #[test]
    fn fallback_cannot_be_deactivated_or_emptied() {
        let mut resolver = CursorResolver::new();
        resolver.set_active(CursorSource::Fallback, false);
        assert!(resolver.is_active(CursorSource::Fallback));
        resolver.set_image(CursorSource::Fallback, None);
        assert_eq!(resolver.current_image(), CursorImage::default());
    }

    #[test]
    fn hidden_cursor_is_a_valid_image() {
        let mut resolver = CursorResolver::new();
        resolver.set_image(CursorSource::FocusedSurface, Some(CursorImage::hidden()));
        resolver.set_active(CursorSource::FocusedSurface, true);
        assert_eq!(resolver.current_image().shape, CursorShape::Hidden);
    }
}

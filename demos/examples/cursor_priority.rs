// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor source priority.
//!
//! Several override sources compete for the cursor at once; the resolver
//! picks the highest-priority active one and reports changes de-duplicated.
//!
//! Run:
//! - `cargo run -p tiller_demos --example cursor_priority`

use kurbo::Point;
use tiller_pointer::cursor::{CursorIcon, CursorImage, CursorResolver, CursorSource};

fn main() {
    let mut resolver = CursorResolver::new();
    println!("idle: {:?}", resolver.current_source());

    // A move/resize starts, then the screen locks, then a drag begins.
    resolver.set_image(
        CursorSource::MoveResize,
        Some(CursorImage::named(CursorIcon::Move, Point::ZERO)),
    );
    resolver.set_active(CursorSource::MoveResize, true);
    println!("move/resize: {:?}", resolver.current_source());

    resolver.set_active(CursorSource::LockScreen, true);
    println!("screen locked: {:?}", resolver.current_source());

    resolver.set_image(
        CursorSource::DragAndDrop,
        Some(CursorImage::named(CursorIcon::Grabbing, Point::new(4.0, 4.0))),
    );
    resolver.set_active(CursorSource::DragAndDrop, true);
    assert_eq!(resolver.current_source(), CursorSource::DragAndDrop);
    println!("drag started: {:?}", resolver.current_source());

    // Unwinding in the opposite order hands the cursor back down the list.
    resolver.set_active(CursorSource::DragAndDrop, false);
    assert_eq!(resolver.current_source(), CursorSource::LockScreen);
    resolver.set_active(CursorSource::LockScreen, false);
    assert_eq!(resolver.current_source(), CursorSource::MoveResize);
    resolver.set_active(CursorSource::MoveResize, false);
    assert_eq!(resolver.current_source(), CursorSource::Fallback);
    println!("unwound to: {:?}", resolver.current_source());

    // De-duplicated change reporting: only actual winner changes report.
    let mut changes = 0;
    for _ in 0..3 {
        if resolver.resolve_change().is_some() {
            changes += 1;
        }
    }
    assert_eq!(changes, 1, "same resolution reported once");
    println!("changes reported across three identical resolves: {changes}");
}

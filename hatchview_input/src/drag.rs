// Copyright 2025 the Hatchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-pan tracking: turn successive pointer positions into pan deltas.
//!
//! ## Usage
//!
//! 1) Call [`DragPan::start`] on pointer-down with the canvas-relative position.
//! 2) On each pointer-move, ask [`DragPan::pan_delta`] for the scaled motion
//!    since the last accepted position, apply it, then [`DragPan::advance`].
//!    [`DragPan::update`] does both steps at speed 1 when nothing can fail.
//! 3) Optionally call [`DragPan::total_offset`] for the motion since the drag started.
//! 4) Call [`DragPan::end`] on pointer-up or pointer-cancel.
//!
//! Splitting the delta from the advance lets a caller whose pan is rejected
//! keep the old position, so the next move still covers the full motion.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use hatchview_input::DragPan;
//!
//! let mut drag = DragPan::default();
//! drag.start(Point::new(10.0, 20.0));
//! assert!(drag.is_dragging());
//!
//! let pos = Point::new(15.0, 25.0);
//! assert_eq!(drag.pan_delta(pos, 2.0), Some(Vec2::new(10.0, 10.0)));
//! drag.advance(pos);
//! assert_eq!(drag.last_pos(), Some(pos));
//! assert_eq!(drag.total_offset(pos), Some(Vec2::new(5.0, 5.0)));
//! ```

use kurbo::{Point, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Grab {
    start: Point,
    last: Point,
}

/// Tracks an in-progress pan drag.
///
/// Idle, or grabbed with both a start and a last accepted position.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct DragPan {
    grab: Option<Grab>,
}

impl DragPan {
    /// Start tracking a new drag from `pos`, discarding any previous one.
    pub fn start(&mut self, pos: Point) {
        self.grab = Some(Grab {
            start: pos,
            last: pos,
        });
    }

    /// Motion from the last accepted position to `pos`, times `speed`.
    ///
    /// Does not move the drag forward. Returns `None` when no drag is active.
    #[must_use]
    pub fn pan_delta(&self, pos: Point, speed: f64) -> Option<Vec2> {
        self.grab.map(|grab| (pos - grab.last) * speed)
    }

    /// Accept `pos` as the new reference for the next delta. Ignored when idle.
    pub fn advance(&mut self, pos: Point) {
        if let Some(grab) = &mut self.grab {
            grab.last = pos;
        }
    }

    /// Unscaled [`pan_delta`](Self::pan_delta) followed by [`advance`](Self::advance).
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let delta = self.pan_delta(pos, 1.0);
        self.advance(pos);
        delta
    }

    /// Motion from the drag start to `current_pos`.
    #[must_use]
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.grab.map(|grab| current_pos - grab.start)
    }

    /// Where the active drag started.
    #[must_use]
    pub fn start_pos(&self) -> Option<Point> {
        self.grab.map(|grab| grab.start)
    }

    /// The last accepted position of the active drag.
    #[must_use]
    pub fn last_pos(&self) -> Option<Point> {
        self.grab.map(|grab| grab.last)
    }

    /// End the drag and return to idle.
    pub fn end(&mut self) {
        self.grab = None;
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }
}

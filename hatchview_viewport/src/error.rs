// Copyright 2025 the Hatchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by viewport operations.

use core::fmt;

use kurbo::Rect;

/// Which argument of an operation was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InvalidArgument {
    /// A screen or world coordinate (or pan delta) was NaN or infinite.
    Coordinate,
    /// A zoom factor was non-positive or non-finite.
    ZoomFactor,
    /// An absolute zoom value was non-positive or non-finite.
    Zoom,
    /// Zoom limits were non-finite, non-positive, or `min > max`.
    ZoomLimits,
    /// A fit margin was outside `(0, 1]`.
    MarginFactor,
    /// A viewport size was negative, non-finite, or empty where an area is needed.
    ViewportSize,
    /// A pan speed multiplier was non-positive or non-finite.
    PanSpeed,
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            Self::Coordinate => "coordinate must be finite",
            Self::ZoomFactor => "zoom factor must be finite and positive",
            Self::Zoom => "zoom must be finite and positive",
            Self::ZoomLimits => "zoom limits must satisfy 0 < min <= max",
            Self::MarginFactor => "margin factor must be in (0, 1]",
            Self::ViewportSize => "viewport size must be finite and non-negative",
            Self::PanSpeed => "pan speed multiplier must be finite and positive",
        };
        f.write_str(what)
    }
}

/// Error returned by a rejected viewport operation.
///
/// A rejected operation never mutates the viewport and never notifies
/// listeners, so callers can simply drop the error and keep rendering the
/// last good state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ViewportError {
    /// Non-finite or out-of-domain input.
    InvalidArgument(InvalidArgument),
    /// Bounds with a non-positive (or non-finite) width or height.
    DegenerateBounds(Rect),
    /// The operation would push the zoom or offset out of the finite `f64`
    /// range, e.g. content bounds near `f64::MAX` scaled by the zoom.
    Overflow,
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(arg) => write!(f, "invalid argument: {arg}"),
            Self::DegenerateBounds(r) => write!(
                f,
                "degenerate bounds ({}, {})..({}, {}): width and height must be positive",
                r.x0, r.y0, r.x1, r.y1
            ),
            Self::Overflow => f.write_str("viewport state would overflow the finite range"),
        }
    }
}

impl core::error::Error for ViewportError {}

impl From<InvalidArgument> for ViewportError {
    fn from(arg: InvalidArgument) -> Self {
        Self::InvalidArgument(arg)
    }
}

/// Returns `Ok(bounds)` when `bounds` is finite with positive width and height.
pub(crate) fn check_bounds(bounds: Rect) -> Result<Rect, ViewportError> {
    let finite = bounds.x0.is_finite()
        && bounds.y0.is_finite()
        && bounds.x1.is_finite()
        && bounds.y1.is_finite();
    // `Rect::width` is signed, so inverted rects are caught here too.
    if finite && bounds.width() > 0.0 && bounds.height() > 0.0 {
        Ok(bounds)
    } else {
        Err(ViewportError::DegenerateBounds(bounds))
    }
}

// Copyright 2025 the Hatchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Wheel sensitivity used by [`WheelZoom::default`], per pixel of wheel delta.
pub const DEFAULT_WHEEL_SENSITIVITY: f64 = 0.0015;

/// Converts wheel deltas into multiplicative zoom factors.
///
/// The factor is `exp(-delta_y * sensitivity)`: scrolling up (negative
/// `delta_y`) zooms in, and equal and opposite deltas cancel exactly, so a
/// trackpad flick back and forth returns to the starting zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelZoom {
    /// Exponent per pixel of vertical wheel delta.
    pub sensitivity: f64,
}

impl Default for WheelZoom {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_WHEEL_SENSITIVITY,
        }
    }
}

impl WheelZoom {
    /// Zoom factor for a vertical wheel delta in pixels.
    ///
    /// The result is not validated here; NaN or overflowing deltas produce a
    /// factor the viewport rejects.
    #[must_use]
    pub fn factor(&self, delta_y: f64) -> f64 {
        (-delta_y * self.sensitivity).exp()
    }
}

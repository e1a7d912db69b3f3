// Copyright 2025 the Hatchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time viewport configuration.

use crate::error::{InvalidArgument, ViewportError};

/// Configuration accepted by [`ViewportTransform::new`](crate::ViewportTransform::new).
///
/// With the `serde` feature enabled this can be loaded from a host settings
/// file; missing fields fall back to [`ViewportConfig::default`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ViewportConfig {
    /// Smallest allowed zoom factor. Must be finite and positive.
    pub min_zoom: f64,
    /// Largest allowed zoom factor. Must be finite and `>= min_zoom`.
    pub max_zoom: f64,
    /// Zoom used at construction and by `reset_to_default`.
    ///
    /// Clamped into `[min_zoom, max_zoom]`.
    pub initial_zoom: f64,
    /// Multiplier input adapters apply to raw drag deltas before panning.
    pub pan_speed_multiplier: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 10.0,
            initial_zoom: 1.0,
            pan_speed_multiplier: 1.0,
        }
    }
}

impl ViewportConfig {
    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ViewportError> {
        validate_zoom_limits(self.min_zoom, self.max_zoom)?;
        if !self.initial_zoom.is_finite() || self.initial_zoom <= 0.0 {
            return Err(InvalidArgument::Zoom.into());
        }
        if !self.pan_speed_multiplier.is_finite() || self.pan_speed_multiplier <= 0.0 {
            return Err(InvalidArgument::PanSpeed.into());
        }
        Ok(())
    }

    /// The initial zoom clamped into the configured range.
    #[must_use]
    pub fn clamped_initial_zoom(&self) -> f64 {
        self.initial_zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

pub(crate) fn validate_zoom_limits(min_zoom: f64, max_zoom: f64) -> Result<(), ViewportError> {
    if min_zoom.is_finite() && max_zoom.is_finite() && min_zoom > 0.0 && max_zoom >= min_zoom {
        Ok(())
    } else {
        Err(InvalidArgument::ZoomLimits.into())
    }
}

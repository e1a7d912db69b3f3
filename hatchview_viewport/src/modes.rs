// Copyright 2025 the Hatchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Clamp behavior for panning and zooming relative to the content bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClampMode {
    /// Do not apply any clamping; the view may move/zoom freely.
    None,
    /// Clamp the offset so the content box stays reachable.
    ///
    /// When the content is larger than the viewport on an axis, the viewport
    /// edge may not move past the content edge. When it is smaller, the
    /// [`UndersizedAxis`] policy decides.
    #[default]
    ContentBounds,
}

/// What clamping does on an axis where the content is smaller than the viewport.
///
/// On such an axis the content-bounds offset range is inverted
/// (`min_offset > max_offset`), so a plain clamp would pin the content to one
/// edge regardless of the requested pan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UndersizedAxis {
    /// Center the content on that axis. Panning along it has no effect.
    #[default]
    Center,
    /// Let the content move freely, but keep it entirely inside the viewport.
    Contain,
}

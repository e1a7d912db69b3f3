// Copyright 2025 the Hatchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::config::{ViewportConfig, validate_zoom_limits};
use crate::error::{InvalidArgument, ViewportError, check_bounds};
use crate::listeners::{ListenerId, Listeners};
use crate::modes::{ClampMode, UndersizedAxis};

/// Margin used by [`ViewportTransform::fit_to_bounds`] callers that have no preference.
pub const DEFAULT_FIT_MARGIN: f64 = 0.9;

/// Content box a fresh viewport starts with, before the host reports real content.
pub const DEFAULT_CONTENT_BOUNDS: Rect = Rect::new(0.0, 0.0, 1000.0, 1000.0);

/// Snapshot of the viewport state handed to renderers and change listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// World-to-screen scale factor.
    pub zoom: f64,
    /// Screen-space translation applied after scaling.
    pub offset: Vec2,
    /// Canvas size in pixels.
    pub viewport_size: Size,
    /// World-space box of the displayed content.
    pub content_bounds: Rect,
    /// Revision counter at the time of the snapshot.
    pub revision: u64,
}

impl ViewState {
    /// The world-to-screen transform a renderer applies before drawing.
    #[must_use]
    pub fn world_to_screen(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// The screen-to-world transform, for hit-testing in the renderer.
    #[must_use]
    pub fn screen_to_world(&self) -> Affine {
        self.world_to_screen().inverse()
    }
}

/// Valid offset range for the current zoom, per axis. Always ordered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetLimits {
    /// Smallest allowed offset on each axis.
    pub min: Vec2,
    /// Largest allowed offset on each axis.
    pub max: Vec2,
}

impl OffsetLimits {
    /// Width of the allowed range on each axis.
    #[must_use]
    pub fn span(&self) -> Vec2 {
        self.max - self.min
    }

    /// Whether `offset` lies inside the limits.
    #[must_use]
    pub fn contains(&self, offset: Vec2) -> bool {
        (self.min.x..=self.max.x).contains(&offset.x)
            && (self.min.y..=self.max.y).contains(&offset.y)
    }
}

/// The parts of the state whose change is reported to listeners.
#[derive(Clone, Copy, PartialEq)]
struct Geometry {
    zoom: f64,
    offset: Vec2,
    viewport_size: Size,
    content_bounds: Rect,
}

/// Everything a failed mutation has to put back.
#[derive(Clone, Copy)]
struct Undo {
    geometry: Geometry,
    config: ViewportConfig,
    clamp_mode: ClampMode,
    undersized_axis: UndersizedAxis,
}

/// Keeps `batch_depth` balanced even if the batch body unwinds.
struct BatchScope<'a>(&'a mut ViewportTransform);

impl Drop for BatchScope<'_> {
    fn drop(&mut self) {
        self.0.batch_depth -= 1;
    }
}

/// Pan/zoom mapping between canvas pixels and world (content) coordinates.
///
/// ```text
/// screen = world * zoom + offset
/// world  = (screen - offset) / zoom
/// ```
///
/// Every mutating operation validates its input first and leaves the state
/// untouched on error, including when the result would overflow `f64`
/// ([`ViewportError::Overflow`]). Successful operations end by clamping the offset
/// against the content bounds (see [`ClampMode`]), bump the
/// [revision](Self::revision) if anything changed, and call each
/// [subscribed](Self::subscribe) listener once.
#[derive(Debug)]
pub struct ViewportTransform {
    viewport_size: Size,
    content_bounds: Rect,
    zoom: f64,
    offset: Vec2,
    config: ViewportConfig,
    clamp_mode: ClampMode,
    undersized_axis: UndersizedAxis,
    revision: u64,
    batch_depth: u32,
    listeners: Listeners,
}

impl ViewportTransform {
    /// Creates a viewport for a canvas of `viewport_size` pixels.
    ///
    /// - Zoom starts at `config.initial_zoom`, clamped into the zoom limits.
    /// - Offset starts at zero, then is clamped against
    ///   [`DEFAULT_CONTENT_BOUNDS`].
    pub fn new(viewport_size: Size, config: ViewportConfig) -> Result<Self, ViewportError> {
        if let Err(err) = config.validate() {
            tracing::warn!(?config, %err, "rejecting viewport configuration");
            return Err(err);
        }
        check_size(viewport_size)?;
        let mut vp = Self {
            viewport_size,
            content_bounds: DEFAULT_CONTENT_BOUNDS,
            zoom: config.clamped_initial_zoom(),
            offset: Vec2::ZERO,
            config,
            clamp_mode: ClampMode::default(),
            undersized_axis: UndersizedAxis::default(),
            revision: 0,
            batch_depth: 0,
            listeners: Listeners::default(),
        };
        vp.clamp_offset();
        if !vp.is_representable() {
            tracing::warn!(?config, "default content bounds overflow at the initial zoom");
            return Err(ViewportError::Overflow);
        }
        Ok(vp)
    }

    /// Current zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pan offset in screen pixels.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Smallest allowed zoom.
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.config.min_zoom
    }

    /// Largest allowed zoom.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.config.max_zoom
    }

    /// Multiplier input adapters apply to raw drag deltas.
    #[must_use]
    pub fn pan_speed_multiplier(&self) -> f64 {
        self.config.pan_speed_multiplier
    }

    /// The configuration, including any zoom limits changed since construction.
    #[must_use]
    pub fn config(&self) -> ViewportConfig {
        self.config
    }

    /// Canvas size in pixels.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// World-space box of the displayed content.
    #[must_use]
    pub fn content_bounds(&self) -> Rect {
        self.content_bounds
    }

    /// Current clamp mode.
    #[must_use]
    pub fn clamp_mode(&self) -> ClampMode {
        self.clamp_mode
    }

    /// Current policy for axes where the content is smaller than the viewport.
    #[must_use]
    pub fn undersized_axis(&self) -> UndersizedAxis {
        self.undersized_axis
    }

    /// Counter bumped once per observable change.
    ///
    /// Hosts that prefer polling over listeners can compare this against the
    /// revision they last painted.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ViewState {
        ViewState {
            zoom: self.zoom,
            offset: self.offset,
            viewport_size: self.viewport_size,
            content_bounds: self.content_bounds,
            revision: self.revision,
        }
    }

    /// Registers a callback run once after every change.
    ///
    /// Callbacks are not run for no-ops, rejected operations, or intermediate
    /// steps of a [`batch`](Self::batch).
    pub fn subscribe(&mut self, listener: impl FnMut(&ViewState) + 'static) -> ListenerId {
        self.listeners.add(alloc::boxed::Box::new(listener))
    }

    /// Removes a callback. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Runs `f` as one logical change.
    ///
    /// Listeners fire at most once, after `f` returns, and only if the state
    /// differs from the state before the batch. Nested batches coalesce into
    /// the outermost one.
    ///
    /// If `f` panics, whatever it already applied stays applied without a
    /// notification; later operations notify as usual.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let before = self.geometry();
        self.batch_depth += 1;
        let out = {
            let mut scope = BatchScope(self);
            f(&mut *scope.0)
        };
        if self.batch_depth == 0 {
            self.commit(before);
        }
        out
    }

    /// Converts a screen-space point into world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, pt: Point) -> Point {
        Point::new(
            (pt.x - self.offset.x) / self.zoom,
            (pt.y - self.offset.y) / self.zoom,
        )
    }

    /// Converts a world-space point into screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, pt: Point) -> Point {
        Point::new(
            pt.x * self.zoom + self.offset.x,
            pt.y * self.zoom + self.offset.y,
        )
    }

    /// Like [`screen_to_world`](Self::screen_to_world), rejecting non-finite input.
    pub fn checked_screen_to_world(&self, pt: Point) -> Result<Point, ViewportError> {
        check_point(pt)?;
        Ok(self.screen_to_world(pt))
    }

    /// Like [`world_to_screen`](Self::world_to_screen), rejecting non-finite input.
    pub fn checked_world_to_screen(&self, pt: Point) -> Result<Point, ViewportError> {
        check_point(pt)?;
        Ok(self.world_to_screen(pt))
    }

    /// Converts a world-space rectangle into screen coordinates.
    #[must_use]
    pub fn world_to_screen_rect(&self, rect: Rect) -> Rect {
        // Uniform positive scale: mapping the two corners is enough.
        Rect::from_points(
            self.world_to_screen(rect.origin()),
            self.world_to_screen(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Converts a screen-space rectangle into world coordinates.
    #[must_use]
    pub fn screen_to_world_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.screen_to_world(rect.origin()),
            self.screen_to_world(Point::new(rect.x1, rect.y1)),
        )
    }

    /// World-space rectangle currently visible through the canvas.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        self.screen_to_world_rect(Rect::from_origin_size(Point::ZERO, self.viewport_size))
    }

    /// World units covered by one screen pixel.
    #[must_use]
    pub fn world_units_per_pixel(&self) -> f64 {
        1.0 / self.zoom
    }

    /// Spacing in world units for reference grid or hatch guide lines.
    ///
    /// Picks the smallest value on the 1-2-5 ladder (`..., 0.1, 0.2, 0.5, 1,
    /// 2, 5, 10, ...`) that puts neighbouring lines at least 64 pixels apart
    /// at the current zoom. `base` is a floor in world units; a non-finite
    /// `base` counts as 1.
    #[must_use]
    pub fn suggest_grid_spacing(&self, base: f64) -> f64 {
        const MIN_LINE_GAP_PX: f64 = 64.0;
        let base = if base.is_finite() {
            base.abs().max(f64::MIN_POSITIVE)
        } else {
            1.0
        };
        let desired = (self.world_units_per_pixel() * MIN_LINE_GAP_PX).max(base);

        // Find the decade holding `desired`. Zoomed far in it is below 1, and
        // the grid keeps subdividing into 0.5, 0.2, 0.1, ... instead of
        // stopping at one world unit.
        let mut unit = 1.0_f64;
        while unit * 10.0 <= desired {
            unit *= 10.0;
        }
        while unit > desired {
            unit /= 10.0;
        }

        // Now `unit <= desired < 10 * unit`.
        [1.0, 2.0, 5.0]
            .into_iter()
            .map(|m| m * unit)
            .find(|&step| step >= desired)
            .unwrap_or(unit * 10.0)
    }

    /// Zooms by `factor` keeping the world point under `anchor` fixed on screen.
    ///
    /// The new zoom is clamped into the zoom limits; if it is already at the
    /// relevant limit this is a no-op. Offset clamping runs last, so the anchor
    /// only stays fixed where the content bounds allow it.
    pub fn zoom_to_point(&mut self, anchor: Point, factor: f64) -> Result<(), ViewportError> {
        if let Err(err) = check_point(anchor) {
            return rejected("zoom_to_point", err);
        }
        if !factor.is_finite() || factor <= 0.0 {
            return rejected("zoom_to_point", InvalidArgument::ZoomFactor.into());
        }
        self.zoom_about("zoom_to_point", anchor, self.zoom * factor)
    }

    /// Zooms by `factor` around the center of the canvas.
    pub fn zoom_to_center(&mut self, factor: f64) -> Result<(), ViewportError> {
        self.zoom_to_point(self.viewport_center(), factor)
    }

    /// Sets an absolute zoom (clamped into the limits), anchored at the canvas center.
    pub fn set_zoom(&mut self, zoom: f64) -> Result<(), ViewportError> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return rejected("set_zoom", InvalidArgument::Zoom.into());
        }
        self.zoom_about("set_zoom", self.viewport_center(), zoom)
    }

    /// Pans by a delta in screen pixels.
    ///
    /// The delta is applied as-is; input adapters scale raw pointer motion by
    /// [`pan_speed_multiplier`](Self::pan_speed_multiplier) first.
    pub fn pan(&mut self, delta: Vec2) -> Result<(), ViewportError> {
        if !delta.is_finite() {
            return rejected("pan", InvalidArgument::Coordinate.into());
        }
        if delta == Vec2::ZERO {
            return Ok(());
        }
        self.mutate("pan", |vp| {
            vp.offset += delta;
            vp.clamp_offset();
        })
    }

    /// Restores the initial zoom and a zero offset, then clamps.
    ///
    /// Fails only with [`ViewportError::Overflow`], when the content bounds
    /// cannot be represented at the initial zoom.
    pub fn reset_to_default(&mut self) -> Result<(), ViewportError> {
        let zoom = self.config.clamped_initial_zoom();
        self.mutate("reset_to_default", |vp| {
            vp.zoom = zoom;
            vp.offset = Vec2::ZERO;
            vp.clamp_offset();
        })
    }

    /// Fits `bounds` into the canvas, leaving `1 - margin_factor` of blank space.
    ///
    /// The zoom is the largest that fits both axes, times `margin_factor`,
    /// clamped into the zoom limits. The bounds center lands on the canvas
    /// center (before offset clamping).
    pub fn fit_to_bounds(&mut self, bounds: Rect, margin_factor: f64) -> Result<(), ViewportError> {
        let bounds = match check_bounds(bounds) {
            Ok(b) => b,
            Err(err) => return rejected("fit_to_bounds", err),
        };
        if !(margin_factor > 0.0 && margin_factor <= 1.0) {
            return rejected("fit_to_bounds", InvalidArgument::MarginFactor.into());
        }
        let size = self.viewport_size;
        if !(size.width > 0.0 && size.height > 0.0) {
            return rejected("fit_to_bounds", InvalidArgument::ViewportSize.into());
        }

        let sx = size.width / bounds.width();
        let sy = size.height / bounds.height();
        let zoom = (sx.min(sy) * margin_factor).clamp(self.config.min_zoom, self.config.max_zoom);
        let center = bounds.center().to_vec2();
        self.mutate("fit_to_bounds", |vp| {
            vp.zoom = zoom;
            vp.offset = size.to_vec2() * 0.5 - center * zoom;
            vp.clamp_offset();
        })
    }

    /// Fits the current content bounds into the canvas.
    pub fn fit_content(&mut self, margin_factor: f64) -> Result<(), ViewportError> {
        self.fit_to_bounds(self.content_bounds, margin_factor)
    }

    /// Clamps the offset so the content stays reachable.
    ///
    /// Every mutating operation already ends with this; it is public for hosts
    /// that want to re-assert the constraint explicitly.
    pub fn clamp_to_content_bounds(&mut self) -> Result<(), ViewportError> {
        self.mutate("clamp_to_content_bounds", Self::clamp_offset)
    }

    /// Allowed offset range at the current zoom.
    ///
    /// This reports the content-bounds range even when [`ClampMode::None`] is
    /// active. On an axis where the content is smaller than the canvas the
    /// [`UndersizedAxis`] policy has already been applied, so `min <= max`
    /// always holds.
    #[must_use]
    pub fn offset_limits(&self) -> OffsetLimits {
        let b = self.content_bounds;
        let size = self.viewport_size;
        let (min_x, max_x) = self.axis_limits(size.width, b.x0, b.x1);
        let (min_y, max_y) = self.axis_limits(size.height, b.y0, b.y1);
        OffsetLimits {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Feeds a new canvas size after a resize.
    pub fn set_viewport_size(&mut self, size: Size) -> Result<(), ViewportError> {
        if let Err(err) = check_size(size) {
            return rejected("set_viewport_size", err);
        }
        self.mutate("set_viewport_size", |vp| {
            vp.viewport_size = size;
            vp.clamp_offset();
        })
    }

    /// Feeds the bounding box of newly loaded content.
    ///
    /// Bounds that are finite in world space but overflow once scaled by the
    /// current zoom are rejected with [`ViewportError::Overflow`].
    pub fn set_content_bounds(&mut self, bounds: Rect) -> Result<(), ViewportError> {
        let bounds = match check_bounds(bounds) {
            Ok(b) => b,
            Err(err) => return rejected("set_content_bounds", err),
        };
        self.mutate("set_content_bounds", |vp| {
            vp.content_bounds = bounds;
            vp.clamp_offset();
        })
    }

    /// Changes the zoom limits. The current zoom is clamped into the new
    /// range around the canvas center.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) -> Result<(), ViewportError> {
        if let Err(err) = validate_zoom_limits(min_zoom, max_zoom) {
            return rejected("set_zoom_limits", err);
        }
        let anchor = self.viewport_center();
        self.mutate("set_zoom_limits", |vp| {
            vp.config.min_zoom = min_zoom;
            vp.config.max_zoom = max_zoom;
            vp.rezoom(anchor, vp.zoom.clamp(min_zoom, max_zoom));
        })
    }

    /// Sets the clamp mode and re-clamps.
    pub fn set_clamp_mode(&mut self, mode: ClampMode) -> Result<(), ViewportError> {
        self.mutate("set_clamp_mode", |vp| {
            vp.clamp_mode = mode;
            vp.clamp_offset();
        })
    }

    /// Sets the undersized-axis policy and re-clamps.
    pub fn set_undersized_axis(&mut self, policy: UndersizedAxis) -> Result<(), ViewportError> {
        self.mutate("set_undersized_axis", |vp| {
            vp.undersized_axis = policy;
            vp.clamp_offset();
        })
    }

    fn viewport_center(&self) -> Point {
        (self.viewport_size.to_vec2() * 0.5).to_point()
    }

    /// Moves to `target_zoom` (clamped) keeping the world point under `anchor` fixed.
    fn zoom_about(
        &mut self,
        op: &'static str,
        anchor: Point,
        target_zoom: f64,
    ) -> Result<(), ViewportError> {
        let new_zoom = target_zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        self.mutate(op, |vp| vp.rezoom(anchor, new_zoom))
    }

    fn rezoom(&mut self, anchor: Point, new_zoom: f64) {
        // Exact: zoom limits can be far below `f64::EPSILON`.
        if new_zoom != self.zoom {
            let world_anchor = self.screen_to_world(anchor);
            self.zoom = new_zoom;
            let reprojected = self.world_to_screen(world_anchor);
            self.offset += anchor - reprojected;
        }
        self.clamp_offset();
    }

    fn axis_limits(&self, extent: f64, lo: f64, hi: f64) -> (f64, f64) {
        let min = extent - hi * self.zoom;
        let max = -lo * self.zoom;
        if min <= max {
            return (min, max);
        }
        tracing::trace!(min, max, policy = ?self.undersized_axis, "content smaller than viewport");
        match self.undersized_axis {
            UndersizedAxis::Center => {
                let mid = (min + max) * 0.5;
                (mid, mid)
            }
            UndersizedAxis::Contain => (max, min),
        }
    }

    fn clamp_offset(&mut self) {
        if self.clamp_mode == ClampMode::None {
            return;
        }
        let limits = self.offset_limits();
        // Not `f64::clamp`: overflowed limits may be NaN, and `mutate` rolls
        // those back instead of panicking here.
        self.offset = Vec2::new(
            self.offset.x.max(limits.min.x).min(limits.max.x),
            self.offset.y.max(limits.min.y).min(limits.max.y),
        );
    }

    fn geometry(&self) -> Geometry {
        Geometry {
            zoom: self.zoom,
            offset: self.offset,
            viewport_size: self.viewport_size,
            content_bounds: self.content_bounds,
        }
    }

    /// Whether the mapping and the active clamp range are finite.
    fn is_representable(&self) -> bool {
        if !(self.zoom.is_finite() && self.offset.is_finite()) {
            return false;
        }
        if self.clamp_mode == ClampMode::None {
            return true;
        }
        let limits = self.offset_limits();
        limits.min.is_finite() && limits.max.is_finite()
    }

    fn undo_point(&self) -> Undo {
        Undo {
            geometry: self.geometry(),
            config: self.config,
            clamp_mode: self.clamp_mode,
            undersized_axis: self.undersized_axis,
        }
    }

    fn restore(&mut self, undo: Undo) {
        let Undo {
            geometry,
            config,
            clamp_mode,
            undersized_axis,
        } = undo;
        self.zoom = geometry.zoom;
        self.offset = geometry.offset;
        self.viewport_size = geometry.viewport_size;
        self.content_bounds = geometry.content_bounds;
        self.config = config;
        self.clamp_mode = clamp_mode;
        self.undersized_axis = undersized_axis;
    }

    /// Applies `f`, rolling it back if the result is no longer finite.
    fn mutate(&mut self, op: &'static str, f: impl FnOnce(&mut Self)) -> Result<(), ViewportError> {
        let undo = self.undo_point();
        f(self);
        if !self.is_representable() {
            self.restore(undo);
            return rejected(op, ViewportError::Overflow);
        }
        if self.batch_depth == 0 {
            self.commit(undo.geometry);
        }
        Ok(())
    }

    fn commit(&mut self, before: Geometry) {
        if self.geometry() == before {
            return;
        }
        self.revision += 1;
        let state = self.state();
        self.listeners.notify(&state);
    }
}

fn rejected(op: &'static str, err: ViewportError) -> Result<(), ViewportError> {
    tracing::debug!(op, %err, "viewport operation rejected");
    Err(err)
}

fn check_point(pt: Point) -> Result<(), ViewportError> {
    if pt.is_finite() {
        Ok(())
    } else {
        Err(InvalidArgument::Coordinate.into())
    }
}

fn check_size(size: Size) -> Result<(), ViewportError> {
    if size.width.is_finite() && size.height.is_finite() && size.width >= 0.0 && size.height >= 0.0
    {
        Ok(())
    } else {
        Err(InvalidArgument::ViewportSize.into())
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;

    use kurbo::{Point, Rect, Size, Vec2};

    use super::{ClampMode, UndersizedAxis, ViewportConfig, ViewportTransform};

    fn viewport(width: f64, height: f64) -> ViewportTransform {
        ViewportTransform::new(Size::new(width, height), ViewportConfig::default()).unwrap()
    }

    #[test]
    fn new_starts_at_initial_zoom_and_zero_offset() {
        let vp = viewport(800.0, 600.0);
        assert_eq!(vp.zoom(), 1.0);
        assert_eq!(vp.offset(), Vec2::ZERO);
        assert_eq!(vp.revision(), 0);
        assert_eq!(vp.content_bounds(), super::DEFAULT_CONTENT_BOUNDS);
    }

    #[test]
    fn new_clamps_initial_zoom_into_limits() {
        let config = ViewportConfig {
            min_zoom: 2.0,
            max_zoom: 4.0,
            initial_zoom: 1.0,
            ..ViewportConfig::default()
        };
        let vp = ViewportTransform::new(Size::new(100.0, 100.0), config).unwrap();
        assert_eq!(vp.zoom(), 2.0);
    }

    #[test]
    fn new_rejects_bad_size() {
        assert!(ViewportTransform::new(Size::new(-1.0, 10.0), ViewportConfig::default()).is_err());
        assert!(
            ViewportTransform::new(Size::new(f64::NAN, 10.0), ViewportConfig::default()).is_err()
        );
    }

    #[test]
    fn inverted_axis_centers_by_default() {
        let mut vp = viewport(800.0, 600.0);
        vp.set_content_bounds(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        let limits = vp.offset_limits();
        assert_eq!(limits.min, limits.max);
        // Content center (50, 50) sits at the canvas center.
        let center = vp.world_to_screen(Point::new(50.0, 50.0));
        assert!((center.x - 400.0).abs() < 1e-9);
        assert!((center.y - 300.0).abs() < 1e-9);

        // Panning along a centered axis is swallowed by the clamp.
        let before = vp.offset();
        vp.pan(Vec2::new(25.0, -25.0)).unwrap();
        assert_eq!(vp.offset(), before);
    }

    #[test]
    fn inverted_axis_contain_keeps_content_inside() {
        let mut vp = viewport(800.0, 600.0);
        vp.set_undersized_axis(UndersizedAxis::Contain).unwrap();
        vp.set_content_bounds(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();

        vp.pan(Vec2::new(250.0, 0.0)).unwrap();
        assert_eq!(vp.offset().x, 250.0);

        vp.pan(Vec2::new(10_000.0, 10_000.0)).unwrap();
        let screen = vp.world_to_screen_rect(vp.content_bounds());
        assert!((screen.x1 - 800.0).abs() < 1e-9);
        assert!((screen.y1 - 600.0).abs() < 1e-9);

        vp.pan(Vec2::new(-10_000.0, -10_000.0)).unwrap();
        assert_eq!(vp.offset(), Vec2::ZERO);
    }

    #[test]
    fn clamp_mode_none_allows_free_panning() {
        let mut vp = viewport(800.0, 600.0);
        vp.set_clamp_mode(ClampMode::None).unwrap();
        vp.pan(Vec2::new(5_000.0, -5_000.0)).unwrap();
        assert_eq!(vp.offset(), Vec2::new(5_000.0, -5_000.0));

        // Switching clamping back on pulls the content back into reach.
        vp.set_clamp_mode(ClampMode::ContentBounds).unwrap();
        assert!(vp.offset_limits().contains(vp.offset()));
    }

    #[test]
    fn revision_bumps_once_per_change_and_not_on_noops() {
        let mut vp = viewport(800.0, 600.0);
        vp.set_content_bounds(Rect::new(-5_000.0, -5_000.0, 5_000.0, 5_000.0))
            .unwrap();
        assert_eq!(vp.revision(), 1);

        vp.pan(Vec2::new(10.0, 0.0)).unwrap();
        assert_eq!(vp.revision(), 2);

        vp.pan(Vec2::ZERO).unwrap();
        assert!(vp.pan(Vec2::new(f64::NAN, 0.0)).is_err());
        vp.clamp_to_content_bounds().unwrap();
        assert_eq!(vp.revision(), 2);
    }

    #[test]
    fn batch_coalesces_notifications() {
        let mut vp = viewport(800.0, 600.0);
        vp.set_content_bounds(Rect::new(-5_000.0, -5_000.0, 5_000.0, 5_000.0))
            .unwrap();
        let calls = Rc::new(Cell::new(0_u32));
        let seen = Rc::clone(&calls);
        vp.subscribe(move |_| seen.set(seen.get() + 1));

        // A batch that ends where it started notifies nobody.
        vp.batch(|vp| {
            vp.pan(Vec2::new(40.0, 0.0)).unwrap();
            vp.pan(Vec2::new(-40.0, 0.0)).unwrap();
        });
        assert_eq!(calls.get(), 0);
        assert_eq!(vp.revision(), 1);

        vp.batch(|vp| {
            for _ in 0..10 {
                vp.pan(Vec2::new(3.0, 1.0)).unwrap();
            }
            vp.batch(|vp| vp.zoom_to_center(1.5).unwrap());
        });
        assert_eq!(calls.get(), 1);
        assert_eq!(vp.revision(), 2);
    }

    #[test]
    fn set_zoom_limits_clamps_current_zoom() {
        let mut vp = viewport(800.0, 600.0);
        vp.set_zoom(5.0).unwrap();
        vp.set_zoom_limits(0.5, 2.0).unwrap();
        assert_eq!(vp.zoom(), 2.0);
        assert_eq!(vp.min_zoom(), 0.5);
        assert!(vp.set_zoom_limits(3.0, 1.0).is_err());
        assert_eq!(vp.max_zoom(), 2.0);
    }

    #[test]
    fn suggest_grid_spacing_tracks_zoom() {
        let mut vp = viewport(400.0, 300.0);
        let base = 0.01;
        let s0 = vp.suggest_grid_spacing(base);
        assert!(s0 >= base);
        assert_eq!(s0, 100.0);

        vp.set_zoom(10.0).unwrap();
        let s1 = vp.suggest_grid_spacing(base);
        assert!(s1 <= s0);
        assert!((s1 - 10.0).abs() < 1e-9);

        vp.set_zoom(0.1).unwrap();
        let s2 = vp.suggest_grid_spacing(base);
        assert!(s2 >= s1);
    }

    #[test]
    fn grid_spacing_subdivides_below_one_world_unit() {
        let config = ViewportConfig {
            max_zoom: 1_000.0,
            ..ViewportConfig::default()
        };
        let mut vp = ViewportTransform::new(Size::new(400.0, 300.0), config).unwrap();

        // 64 px at zoom 200 is 0.32 world units.
        vp.set_zoom(200.0).unwrap();
        assert!((vp.suggest_grid_spacing(0.001) - 0.5).abs() < 1e-12);

        // 0.064 world units.
        vp.set_zoom(1_000.0).unwrap();
        assert!((vp.suggest_grid_spacing(0.001) - 0.1).abs() < 1e-12);

        // The floor still wins over the ladder.
        assert!((vp.suggest_grid_spacing(0.3) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zoom_that_overflows_the_content_rolls_back() {
        let config = ViewportConfig {
            max_zoom: 1e10,
            ..ViewportConfig::default()
        };
        let mut vp = ViewportTransform::new(Size::new(800.0, 600.0), config).unwrap();
        vp.set_content_bounds(Rect::new(0.0, 0.0, 1e300, 1e300)).unwrap();
        let state = vp.state();

        assert_eq!(vp.set_zoom(1e9), Err(super::ViewportError::Overflow));
        assert_eq!(vp.state(), state);

        // Raising the limits alone is fine; the zoom has not moved.
        vp.set_zoom_limits(0.1, 1e12).unwrap();
        assert_eq!(vp.zoom(), state.zoom);
    }

    #[test]
    fn mode_switch_that_overflows_keeps_the_old_mode() {
        let config = ViewportConfig {
            max_zoom: 1e10,
            ..ViewportConfig::default()
        };
        let mut vp = ViewportTransform::new(Size::new(800.0, 600.0), config).unwrap();
        vp.set_clamp_mode(ClampMode::None).unwrap();
        vp.set_zoom(1e9).unwrap();
        vp.set_content_bounds(Rect::new(0.0, 0.0, 1e300, 1e300)).unwrap();

        assert!(vp.set_clamp_mode(ClampMode::ContentBounds).is_err());
        assert_eq!(vp.clamp_mode(), ClampMode::None);
        assert!(vp.offset().is_finite());
    }

    #[test]
    fn state_transform_matches_conversions() {
        let mut vp = viewport(800.0, 600.0);
        vp.fit_content(0.9).unwrap();
        let state = vp.state();
        let world = Point::new(123.0, 456.0);
        let via_affine = state.world_to_screen() * world;
        let direct = vp.world_to_screen(world);
        assert!((via_affine - direct).hypot() < 1e-9);
        let back = state.screen_to_world() * direct;
        assert!((back - world).hypot() < 1e-9);
    }
}

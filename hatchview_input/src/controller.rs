// Copyright 2025 the Hatchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hatchview_viewport::{DEFAULT_FIT_MARGIN, InvalidArgument, ViewportError, ViewportTransform};
use kurbo::Point;

use crate::drag::DragPan;
use crate::wheel::WheelZoom;

/// Zoom step used by [`ViewCommand::ZoomIn`] and [`ViewCommand::ZoomOut`].
pub const DEFAULT_ZOOM_STEP: f64 = 1.2;

/// Discrete view actions bound to toolbar buttons or keyboard shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewCommand {
    /// Return to the initial zoom with no pan.
    ResetView,
    /// Fit the loaded content into the canvas with the default margin.
    FitContent,
    /// Zoom in one step around the canvas center.
    ZoomIn,
    /// Zoom out one step around the canvas center.
    ZoomOut,
}

/// Applies pointer, wheel and command input to a [`ViewportTransform`].
///
/// The controller only holds gesture state; the viewport is passed in on each
/// call so it stays owned by the canvas. Every method returns the viewport's
/// result, and a rejected input leaves both the viewport and the gesture
/// state unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportController {
    drag: DragPan,
    wheel: WheelZoom,
    zoom_step: f64,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self {
            drag: DragPan::default(),
            wheel: WheelZoom::default(),
            zoom_step: DEFAULT_ZOOM_STEP,
        }
    }
}

impl ViewportController {
    /// Creates a controller with the given wheel mapping and command zoom step.
    ///
    /// `zoom_step` must be finite and greater than 1, so that
    /// [`ViewCommand::ZoomIn`] zooms in. The wheel sensitivity must be finite
    /// and positive. Anything else is rejected with
    /// [`InvalidArgument::ZoomFactor`].
    pub fn new(wheel: WheelZoom, zoom_step: f64) -> Result<Self, ViewportError> {
        let step_ok = zoom_step.is_finite() && zoom_step > 1.0;
        let wheel_ok = wheel.sensitivity.is_finite() && wheel.sensitivity > 0.0;
        if !(step_ok && wheel_ok) {
            tracing::warn!(zoom_step, ?wheel, "rejecting input controller settings");
            return Err(InvalidArgument::ZoomFactor.into());
        }
        Ok(Self {
            wheel,
            zoom_step,
            ..Self::default()
        })
    }

    /// Zoom factor applied by [`ViewCommand::ZoomIn`].
    #[must_use]
    pub fn zoom_step(&self) -> f64 {
        self.zoom_step
    }

    /// Whether a pan drag is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Begins a pan drag at a canvas-relative position.
    pub fn pointer_down(&mut self, pos: Point) -> Result<(), ViewportError> {
        check_point(pos)?;
        self.drag.start(pos);
        Ok(())
    }

    /// Pans by the pointer motion since the last accepted event, scaled by
    /// the viewport's pan speed multiplier. Moves outside a drag are ignored.
    pub fn pointer_move(
        &mut self,
        viewport: &mut ViewportTransform,
        pos: Point,
    ) -> Result<(), ViewportError> {
        check_point(pos)?;
        let Some(delta) = self.drag.pan_delta(pos, viewport.pan_speed_multiplier()) else {
            return Ok(());
        };
        viewport.pan(delta)?;
        self.drag.advance(pos);
        Ok(())
    }

    /// Ends the current pan drag, if any.
    pub fn pointer_up(&mut self) {
        self.drag.end();
    }

    /// Zooms around `anchor` for a vertical wheel delta in pixels.
    pub fn wheel(
        &mut self,
        viewport: &mut ViewportTransform,
        anchor: Point,
        delta_y: f64,
    ) -> Result<(), ViewportError> {
        viewport.zoom_to_point(anchor, self.wheel.factor(delta_y))
    }

    /// Runs a discrete view command.
    pub fn command(
        &mut self,
        viewport: &mut ViewportTransform,
        command: ViewCommand,
    ) -> Result<(), ViewportError> {
        tracing::trace!(?command, "view command");
        match command {
            ViewCommand::ResetView => viewport.reset_to_default(),
            ViewCommand::FitContent => viewport.fit_content(DEFAULT_FIT_MARGIN),
            ViewCommand::ZoomIn => viewport.zoom_to_center(self.zoom_step),
            ViewCommand::ZoomOut => viewport.zoom_to_center(1.0 / self.zoom_step),
        }
    }
}

fn check_point(pos: Point) -> Result<(), ViewportError> {
    if pos.is_finite() {
        Ok(())
    } else {
        tracing::debug!(?pos, "ignoring non-finite pointer position");
        Err(InvalidArgument::Coordinate.into())
    }
}

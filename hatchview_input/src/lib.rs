// Copyright 2025 the Hatchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hatchview Input: wire raw canvas input into a [`ViewportTransform`].
//!
//! The host UI layer owns the event loop. It forwards canvas-relative pointer
//! positions, wheel deltas and toolbar/keyboard commands to a
//! [`ViewportController`], which keeps the little gesture state needed and
//! calls the matching viewport operation:
//!
//! - [`DragPan`]: pointer-down/move/up into pan deltas, scaled by the
//!   viewport's pan speed multiplier.
//! - [`WheelZoom`]: wheel deltas into multiplicative zoom factors, applied
//!   around the pointer.
//! - [`ViewCommand`]: reset, fit-to-content and stepped zoom.
//!
//! ```rust
//! use hatchview_input::{ViewCommand, ViewportController};
//! use hatchview_viewport::{ViewportConfig, ViewportTransform};
//! use kurbo::{Point, Size};
//!
//! let mut view = ViewportTransform::new(Size::new(800.0, 600.0), ViewportConfig::default())?;
//! let mut input = ViewportController::default();
//!
//! input.command(&mut view, ViewCommand::FitContent)?;
//! input.wheel(&mut view, Point::new(400.0, 300.0), -240.0)?;
//!
//! input.pointer_down(Point::new(400.0, 300.0))?;
//! input.pointer_move(&mut view, Point::new(380.0, 290.0))?;
//! input.pointer_up();
//! # Ok::<(), hatchview_viewport::ViewportError>(())
//! ```
//!
//! Coalescing repaints is left to the host: subscribe on the viewport, or
//! wrap a burst of events in [`ViewportTransform::batch`].

mod controller;
pub mod drag;
mod wheel;

pub use controller::{DEFAULT_ZOOM_STEP, ViewCommand, ViewportController};
pub use drag::DragPan;
pub use hatchview_viewport::ViewportTransform;
pub use wheel::{DEFAULT_WHEEL_SENSITIVITY, WheelZoom};

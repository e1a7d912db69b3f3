// Copyright 2025 the Hatchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hatchview Viewport: the pan/zoom transform behind the hatch-pattern canvas.
//!
//! [`ViewportTransform`] maps canvas pixels (origin top-left) to the world
//! coordinates pattern and drawing geometry is authored in, using a uniform
//! scale plus translation:
//!
//! ```text
//! screen = world * zoom + offset
//! ```
//!
//! It supports:
//! - Point and rectangle conversion in both directions.
//! - Panning by screen-space deltas.
//! - Zooming about an anchor, keeping the world point under it fixed.
//! - Fitting a world box into the canvas with a margin.
//! - Clamping the offset so the content box never drifts out of reach.
//! - Change notification via listeners or a revision counter.
//!
//! It does **not** draw anything or own any event loop. The host feeds in
//! pointer positions, canvas resizes and the bounding box of loaded content,
//! and applies [`ViewState::world_to_screen`] before drawing. See the
//! `hatchview_input` crate for turning raw pointer/wheel input into calls here.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use hatchview_viewport::{DEFAULT_FIT_MARGIN, ViewportConfig, ViewportTransform};
//!
//! let mut view = ViewportTransform::new(Size::new(800.0, 600.0), ViewportConfig::default())?;
//! view.set_content_bounds(Rect::new(0.0, 0.0, 1000.0, 1000.0))?;
//! view.fit_content(DEFAULT_FIT_MARGIN)?;
//! assert!((view.zoom() - 0.54).abs() < 1e-12);
//!
//! // The content center lands on the canvas center.
//! let center = view.world_to_screen(Point::new(500.0, 500.0));
//! assert!((center.x - 400.0).abs() < 1e-9 && (center.y - 300.0).abs() < 1e-9);
//!
//! // Zooming keeps the world point under the cursor in place.
//! let cursor = Point::new(300.0, 250.0);
//! let before = view.screen_to_world(cursor);
//! view.zoom_to_point(cursor, 2.0)?;
//! let after = view.screen_to_world(cursor);
//! assert!((before - after).hypot() < 1e-9);
//! # Ok::<(), hatchview_viewport::ViewportError>(())
//! ```
//!
//! ## Repainting once per change
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::{Size, Vec2};
//! use hatchview_viewport::{ViewportConfig, ViewportTransform};
//!
//! let mut view = ViewportTransform::new(Size::new(800.0, 600.0), ViewportConfig::default())?;
//! let repaints = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&repaints);
//! view.subscribe(move |_state| counter.set(counter.get() + 1));
//!
//! // Many pointer-move ticks, one logical change.
//! view.batch(|view| {
//!     for _ in 0..16 {
//!         let _ = view.pan(Vec2::new(-4.0, -2.0));
//!     }
//! });
//! assert_eq!(repaints.get(), 1);
//! # Ok::<(), hatchview_viewport::ViewportError>(())
//! ```
//!
//! ## Errors
//!
//! Operations reject NaN/infinite input, non-positive zoom factors and
//! degenerate bounds with a [`ViewportError`] and leave the state untouched.
//! Rejections are also reported through `tracing` at debug level.
//!
//! This crate is `no_std` and requires `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod listeners;
mod modes;
mod viewport;

pub use config::ViewportConfig;
pub use error::{InvalidArgument, ViewportError};
pub use listeners::ListenerId;
pub use modes::{ClampMode, UndersizedAxis};
pub use viewport::{
    DEFAULT_CONTENT_BOUNDS, DEFAULT_FIT_MARGIN, OffsetLimits, ViewState, ViewportTransform,
};

//! Geometry types and the draw-primitive interface for Horizon VScroll.
//!
//! This crate holds everything the list needs to describe a frame without
//! owning a graphics backend: points, sizes, rectangles and colors, font and
//! texture handles, and the [`Painter`] trait the host implements.
//!
//! # Drawing
//!
//! ```
//! use horizon_vscroll_render::{Color, Painter, Rect, RecordingPainter};
//!
//! let mut painter = RecordingPainter::new();
//! painter.fill_rect(Rect::new(10.0, 10.0, 100.0, 50.0), Color::RED);
//! painter.stroke_rect(Rect::new(10.0, 10.0, 100.0, 50.0), Color::WHITE, 1.0);
//!
//! assert_eq!(painter.stats().draw_calls, 2);
//! ```
//!
//! Hosts with a real canvas implement [`Painter`] over it. The headless
//! [`RecordingPainter`] keeps a display list of [`DrawCommand`]s instead.

mod painter;
mod recording;
mod text;
mod texture;
mod types;

// Painter API
pub use painter::Painter;
pub use recording::{DrawCommand, FrameStats, RecordingPainter};

// Drawing types
pub use text::{Font, FontFamily, FontWeight, HorizontalAlign};
pub use texture::{Texture, TextureId};
pub use types::{Color, Point, Rect, Size};

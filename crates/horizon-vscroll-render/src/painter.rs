//! Core painter trait defining the draw primitives the list relies on.
//!
//! The [`Painter`] trait is the whole rendering contract between the list and
//! its host: three primitives, all in widget-local coordinates. Hosts adapt
//! their own canvas to it; [`RecordingPainter`](crate::RecordingPainter)
//! records the calls into a display list instead.

use crate::text::{Font, HorizontalAlign};
use crate::texture::Texture;
use crate::types::{Color, Point, Rect};

/// The 2D draw-primitive interface.
///
/// # Frame Lifecycle
///
/// The list issues primitives in painter's order (earlier calls are drawn
/// below later ones) during a single paint pass:
///
/// ```ignore
/// painter.draw_rect(item_rect, Color::RED, false, 2.0);
/// painter.draw_text(baseline, "Apple", HorizontalAlign::Left, &font, 16.0, 120.0);
/// ```
pub trait Painter {
    /// Draw a rectangle.
    ///
    /// When `filled` is `false` only the outline is drawn, `border_width`
    /// pixels wide. `border_width` is ignored for filled rectangles.
    fn draw_rect(&mut self, rect: Rect, color: Color, filled: bool, border_width: f32);

    /// Draw a run of text.
    ///
    /// `position` is the left end of the first baseline. Text wraps at
    /// `wrap_width` and is aligned within it.
    fn draw_text(
        &mut self,
        position: Point,
        text: &str,
        align: HorizontalAlign,
        font: &Font,
        size: f32,
        wrap_width: f32,
    );

    /// Draw a texture stretched (or tiled) into a rectangle, multiplied by `modulate`.
    fn draw_texture_rect(&mut self, rect: Rect, texture: &Texture, tile: bool, modulate: Color);

    // =========================================================================
    // Convenience
    // =========================================================================

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.draw_rect(rect, color, true, 0.0);
    }

    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.draw_rect(rect, color, false, width);
    }
}

impl<P: Painter + ?Sized> Painter for &mut P {
    fn draw_rect(&mut self, rect: Rect, color: Color, filled: bool, border_width: f32) {
        (**self).draw_rect(rect, color, filled, border_width);
    }

    fn draw_text(
        &mut self,
        position: Point,
        text: &str,
        align: HorizontalAlign,
        font: &Font,
        size: f32,
        wrap_width: f32,
    ) {
        (**self).draw_text(position, text, align, font, size, wrap_width);
    }

    fn draw_texture_rect(&mut self, rect: Rect, texture: &Texture, tile: bool, modulate: Color) {
        (**self).draw_texture_rect(rect, texture, tile, modulate);
    }
}

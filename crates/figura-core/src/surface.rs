//! The drawing-surface capability consumed by the scene graph.
//!
//! Figura does not draw pixels itself; a [`Surface`] implementation is
//! supplied by the embedding shell (a window backend, or the SVG exporter for
//! headless rendering). The scene graph issues stroke/fill/text calls against
//! it during the draw pass.
//!
//! Surface failures are surfaced as [`RenderError`] and propagated, never
//! retried: draw is idempotent given current state, so the caller may simply
//! run the next frame or abort.

use thiserror::Error;

use crate::{
    color::Color,
    geometry::{Point, Size},
};

/// Error type for drawing-surface and text-rendering failures.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The underlying surface rejected a drawing primitive.
    #[error("surface error: {0}")]
    Surface(String),

    /// Text shaping or rendering failed.
    #[error("text error: {0}")]
    Text(String),
}

/// Styling for a single text draw call.
///
/// `background`, when set, fills the measured text rectangle before the
/// glyphs are drawn; line labels use this to erase the stroke passing
/// beneath them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub font_size: u16,
    /// Glyph color.
    pub color: Color,
    /// Optional opaque fill behind the text.
    pub background: Option<Color>,
}

/// A drawing surface accepting stroke, fill, and text primitives.
///
/// Coordinates follow the [`geometry`](crate::geometry) convention: origin
/// top-left, y growing downward. All methods are fallible; implementations
/// that cannot fail simply return `Ok(())`.
pub trait Surface {
    /// Returns the drawable dimensions of the surface.
    fn size(&self) -> Size;

    /// Returns the canvas background color, used by labels that erase the
    /// geometry beneath them.
    fn background_color(&self) -> Color;

    /// Fills the whole surface with the given color.
    fn clear(&mut self, color: Color) -> Result<(), RenderError>;

    /// Strokes a single line segment.
    fn stroke_line(
        &mut self,
        from: Point,
        to: Point,
        width: f32,
        color: Color,
    ) -> Result<(), RenderError>;

    /// Fills a closed polygon over the given vertices.
    fn fill_polygon(&mut self, vertices: &[Point], color: Color) -> Result<(), RenderError>;

    /// Fills a circle centered at `center`.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color)
    -> Result<(), RenderError>;

    /// Renders `content` with its measured rectangle centered at `center`.
    fn draw_text(
        &mut self,
        content: &str,
        center: Point,
        style: TextStyle,
    ) -> Result<(), RenderError>;

    /// Commits the frame to the output (flip, write, or no-op).
    fn present(&mut self) -> Result<(), RenderError>;
}

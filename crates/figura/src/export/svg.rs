//! The SVG drawing surface.
//!
//! [`SvgSurface`] implements the core [`Surface`] trait by accumulating SVG
//! elements in draw-call order and assembling the final document when the
//! frame is complete. Because the scene graph already emits primitives in
//! layer order, document order is z-order and no grouping is needed.

use svg::{
    Document,
    node::{Node, element},
};

use figura_core::{
    color::Color,
    geometry::{Point, Size},
    surface::{RenderError, Surface, TextStyle},
    text,
};

/// A [`Surface`] that renders to an in-memory SVG document.
pub struct SvgSurface {
    size: Size,
    background: Color,
    nodes: Vec<Box<dyn Node>>,
}

impl SvgSurface {
    /// Creates an empty surface of the given size and canvas background.
    ///
    /// The background color is what [`Surface::background_color`] reports;
    /// the canvas itself is painted by the first [`Surface::clear`] call.
    pub fn new(size: Size, background: Color) -> Self {
        Self {
            size,
            background,
            nodes: Vec::new(),
        }
    }

    /// Assembles and serializes the accumulated document.
    pub fn into_document(self) -> String {
        let mut document = Document::new()
            .set("width", self.size.width())
            .set("height", self.size.height())
            .set(
                "viewBox",
                (0.0f32, 0.0f32, self.size.width(), self.size.height()),
            );
        for node in self.nodes {
            document = document.add(node);
        }
        document.to_string()
    }

    fn push(&mut self, node: impl Node + 'static) {
        self.nodes.push(Box::new(node));
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn background_color(&self) -> Color {
        self.background
    }

    fn clear(&mut self, color: Color) -> Result<(), RenderError> {
        let rect = element::Rectangle::new()
            .set("x", 0.0f32)
            .set("y", 0.0f32)
            .set("width", self.size.width())
            .set("height", self.size.height())
            .set("fill", color.to_string());
        self.push(rect);
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: Point,
        to: Point,
        width: f32,
        color: Color,
    ) -> Result<(), RenderError> {
        let line = element::Line::new()
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y())
            .set("stroke", color.to_string())
            .set("stroke-opacity", color.alpha())
            .set("stroke-width", width);
        self.push(line);
        Ok(())
    }

    fn fill_polygon(&mut self, vertices: &[Point], color: Color) -> Result<(), RenderError> {
        let points = vertices
            .iter()
            .map(|p| format!("{},{}", p.x(), p.y()))
            .collect::<Vec<_>>()
            .join(" ");
        let polygon = element::Polygon::new()
            .set("points", points)
            .set("fill", color.to_string())
            .set("fill-opacity", color.alpha());
        self.push(polygon);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f32,
        color: Color,
    ) -> Result<(), RenderError> {
        let circle = element::Circle::new()
            .set("cx", center.x())
            .set("cy", center.y())
            .set("r", radius)
            .set("fill", color.to_string())
            .set("fill-opacity", color.alpha());
        self.push(circle);
        Ok(())
    }

    fn draw_text(
        &mut self,
        content: &str,
        center: Point,
        style: TextStyle,
    ) -> Result<(), RenderError> {
        if content.is_empty() {
            return Ok(());
        }

        if let Some(background) = style.background {
            // The opaque rectangle spans the measured text box, erasing
            // whatever was drawn beneath it.
            let measured = text::measure(content, style.font_size);
            let rect = element::Rectangle::new()
                .set("x", center.x() - measured.width() / 2.0)
                .set("y", center.y() - measured.height() / 2.0)
                .set("width", measured.width())
                .set("height", measured.height())
                .set("fill", background.to_string());
            self.push(rect);
        }

        let rendered = element::Text::new(content)
            .set("x", center.x())
            .set("y", center.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", text::FONT_FAMILY)
            .set("font-size", style.font_size)
            .set("fill", style.color.to_string())
            .set("fill-opacity", style.color.alpha());
        self.push(rendered);
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        // The document is assembled lazily by `into_document`.
        Ok(())
    }
}

//! The entity group: ordered ownership, update dispatch, and draw ordering.

use log::trace;

use crate::{
    color::Color,
    geometry::{self, Point, Size},
    interact::{self, InputState},
    scene::entity::{
        Anchor, CubicCurve, CURVE_RESOLUTION, DrawLayer, Entity, Label, Line, LineLabel,
        PointEntity, PointId, QuadraticCurve, Triangle,
    },
    surface::{RenderError, Surface, TextStyle},
};

/// An ordered, owning collection of entities forming one diagram.
///
/// The group owns a point arena alongside the entity list; entities that
/// depend on points hold [`PointId`]s into the arena. There is no removal
/// API, so an id handed out by [`add_point`](Self::add_point) stays valid
/// for the life of the group.
///
/// The group also owns the exclusive-drag slot: at most one of its points is
/// dragged at a time, and drags in one group never affect another.
#[derive(Debug, Default)]
pub struct Group {
    points: Vec<PointEntity>,
    entities: Vec<Entity>,
    dragged: Option<PointId>,
}

impl Group {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a point to the arena and the entity list, returning its id.
    pub fn add_point(&mut self, point: PointEntity) -> PointId {
        let id = PointId::new(self.points.len());
        self.points.push(point);
        self.entities.push(Entity::Point(id));
        id
    }

    /// Adds a line between two arena points.
    pub fn add_line(&mut self, line: Line) {
        self.entities.push(Entity::Line(line));
    }

    /// Adds a triangle over three arena points.
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.entities.push(Entity::Triangle(triangle));
    }

    /// Adds a quadratic Bézier curve.
    pub fn add_quadratic_curve(&mut self, curve: QuadraticCurve) {
        self.entities.push(Entity::QuadraticCurve(curve));
    }

    /// Adds a cubic Bézier curve.
    pub fn add_cubic_curve(&mut self, curve: CubicCurve) {
        self.entities.push(Entity::CubicCurve(curve));
    }

    /// Adds a foreground label.
    pub fn add_label(&mut self, label: Label) {
        self.entities.push(Entity::Label(label));
    }

    /// Adds a background label, drawn beneath all geometry.
    pub fn add_background_label(&mut self, label: Label) {
        self.entities.push(Entity::BackgroundLabel(label));
    }

    /// Adds a line label, refreshing it immediately so its position and
    /// auto-distance content are valid before the first update pass.
    pub fn add_line_label(&mut self, mut label: LineLabel) {
        let a = self.points[label.a.index()].position();
        let b = self.points[label.b.index()].position();
        label.refresh(a, b);
        self.entities.push(Entity::LineLabel(label));
    }

    /// Returns the point behind an id.
    pub fn point(&self, id: PointId) -> &PointEntity {
        &self.points[id.index()]
    }

    /// Returns the point arena in insertion order.
    pub fn points(&self) -> &[PointEntity] {
        &self.points
    }

    /// Returns the entities in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns the id of the currently dragged point, if any.
    pub fn dragged(&self) -> Option<PointId> {
        self.dragged
    }

    /// Runs one update pass: the drag state machine, then dependent-entity
    /// refresh.
    ///
    /// Line labels re-derive position and auto content from the live arena
    /// every pass, whether or not anything moved.
    pub fn update(&mut self, input: &InputState, bounds: Size) {
        let Self {
            points,
            entities,
            dragged,
        } = self;

        interact::apply_drag(points, dragged, input, bounds);

        for entity in entities.iter_mut() {
            if let Entity::LineLabel(label) = entity {
                let a = points[label.a.index()].position();
                let b = points[label.b.index()].position();
                label.refresh(a, b);
            }
        }
    }

    /// Returns entity indices in draw order: sorted by [`DrawLayer`] rank,
    /// insertion order preserved within a layer.
    pub fn draw_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.entities.len()).collect();
        order.sort_by_key(|&index| self.entities[index].layer());
        order
    }

    /// Draws every entity onto the surface in layer order.
    ///
    /// The surface is assumed already cleared; the group draws only its own
    /// entities and does not present.
    pub fn draw(&self, surface: &mut dyn Surface) -> Result<(), RenderError> {
        trace!(entities = self.entities.len(); "Drawing group");
        for index in self.draw_order() {
            self.draw_entity(&self.entities[index], surface)?;
        }
        Ok(())
    }

    fn position(&self, id: PointId) -> Point {
        self.points[id.index()].position()
    }

    fn draw_entity(&self, entity: &Entity, surface: &mut dyn Surface) -> Result<(), RenderError> {
        match entity {
            Entity::Point(id) => {
                let point = &self.points[id.index()];
                surface.fill_circle(point.position(), point.radius(), point.color())
            }
            Entity::Line(line) => surface.stroke_line(
                self.position(line.a),
                self.position(line.b),
                line.width,
                line.color,
            ),
            Entity::Triangle(triangle) => self.draw_triangle(triangle, surface),
            Entity::QuadraticCurve(curve) => {
                let p0 = self.position(curve.start);
                let p1 = self.position(curve.control);
                let p2 = self.position(curve.end);
                self.draw_flattened(
                    |t| geometry::quadratic_bezier(p0, p1, p2, t),
                    curve.width,
                    curve.color,
                    surface,
                )
            }
            Entity::CubicCurve(curve) => {
                let p0 = self.position(curve.p0);
                let p1 = self.position(curve.p1);
                let p2 = self.position(curve.p2);
                let p3 = self.position(curve.p3);
                self.draw_flattened(
                    |t| geometry::cubic_bezier(p0, p1, p2, p3, t),
                    curve.width,
                    curve.color,
                    surface,
                )
            }
            Entity::Label(label) | Entity::BackgroundLabel(label) => surface.draw_text(
                &label.content,
                label.anchor_position(&self.points),
                TextStyle {
                    font_size: label.font_size,
                    color: label.color,
                    background: None,
                },
            ),
            Entity::LineLabel(label) => surface.draw_text(
                &label.content,
                label.position,
                TextStyle {
                    font_size: label.font_size,
                    color: label.color,
                    // Erase the segment passing beneath the text.
                    background: Some(surface.background_color()),
                },
            ),
        }
    }

    fn draw_triangle(
        &self,
        triangle: &Triangle,
        surface: &mut dyn Surface,
    ) -> Result<(), RenderError> {
        let a = self.position(triangle.a);
        let b = self.position(triangle.b);
        let c = self.position(triangle.c);

        if let Some(fill) = triangle.fill {
            surface.fill_polygon(&[a, b, c], fill)?;
        }
        if let Some(outline) = triangle.outline {
            surface.stroke_line(a, b, triangle.width, outline)?;
            surface.stroke_line(b, c, triangle.width, outline)?;
            surface.stroke_line(c, a, triangle.width, outline)?;
        }
        Ok(())
    }

    /// Strokes a curve as [`CURVE_RESOLUTION`] straight segments sampled at
    /// uniform parameter steps.
    fn draw_flattened(
        &self,
        evaluate: impl Fn(f32) -> Point,
        width: f32,
        color: Color,
        surface: &mut dyn Surface,
    ) -> Result<(), RenderError> {
        let mut previous = evaluate(0.0);
        for step in 1..=CURVE_RESOLUTION {
            let t = step as f32 / CURVE_RESOLUTION as f32;
            let sample = evaluate(t);
            surface.stroke_line(previous, sample, width, color)?;
            previous = sample;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::scene::entity::DEFAULT_LINE_LABEL_OFFSET;

    /// A surface that records the primitive calls made against it.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        calls: Vec<String>,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Size {
            Size::new(960.0, 540.0)
        }

        fn background_color(&self) -> Color {
            Color::default()
        }

        fn clear(&mut self, _color: Color) -> Result<(), RenderError> {
            self.calls.push("clear".to_string());
            Ok(())
        }

        fn stroke_line(
            &mut self,
            _from: Point,
            _to: Point,
            _width: f32,
            _color: Color,
        ) -> Result<(), RenderError> {
            self.calls.push("line".to_string());
            Ok(())
        }

        fn fill_polygon(&mut self, _vertices: &[Point], _color: Color) -> Result<(), RenderError> {
            self.calls.push("polygon".to_string());
            Ok(())
        }

        fn fill_circle(
            &mut self,
            _center: Point,
            _radius: f32,
            _color: Color,
        ) -> Result<(), RenderError> {
            self.calls.push("circle".to_string());
            Ok(())
        }

        fn draw_text(
            &mut self,
            content: &str,
            _center: Point,
            _style: TextStyle,
        ) -> Result<(), RenderError> {
            self.calls.push(format!("text:{content}"));
            Ok(())
        }

        fn present(&mut self) -> Result<(), RenderError> {
            self.calls.push("present".to_string());
            Ok(())
        }
    }

    fn two_point_group() -> (Group, PointId, PointId) {
        let mut group = Group::new();
        let a = group.add_point(PointEntity::new(
            Point::new(100.0, 100.0),
            8.0,
            Color::default(),
            true,
        ));
        let b = group.add_point(PointEntity::new(
            Point::new(103.0, 104.0),
            8.0,
            Color::default(),
            true,
        ));
        (group, a, b)
    }

    #[test]
    fn test_draw_order_layers_entities() {
        let (mut group, a, b) = two_point_group();
        // Insertion order deliberately scrambled relative to draw order.
        group.add_label(Label::new(
            "front",
            Color::default(),
            Anchor::Position(Point::default()),
            12,
        ));
        group.add_line(Line::new(a, b, 2.0, Color::default()));
        group.add_background_label(Label::new(
            "back",
            Color::default(),
            Anchor::Position(Point::default()),
            12,
        ));

        let order = group.draw_order();
        let layers: Vec<DrawLayer> = order
            .iter()
            .map(|&i| group.entities()[i].layer())
            .collect();
        assert_eq!(
            layers,
            vec![
                DrawLayer::Background,
                DrawLayer::Shape,
                DrawLayer::Point,
                DrawLayer::Point,
                DrawLayer::Text,
            ]
        );
    }

    #[test]
    fn test_draw_order_is_stable_within_layer() {
        let (mut group, a, b) = two_point_group();
        group.add_line(Line::new(a, b, 1.0, Color::default()));
        group.add_line(Line::new(b, a, 1.0, Color::default()));

        // Both lines share a layer, so they keep insertion order (entity
        // indices 2 and 3 after the two points).
        let order = group.draw_order();
        let line_positions: Vec<usize> = order
            .iter()
            .copied()
            .filter(|&i| matches!(group.entities()[i], Entity::Line(_)))
            .collect();
        assert_eq!(line_positions, vec![2, 3]);
    }

    #[test]
    fn test_draw_order_ranks_every_variant() {
        let mut group = Group::new();
        let color = Color::default();
        let point = |x, y| PointEntity::new(Point::new(x, y), 4.0, color, false);

        // Scrambled authoring order covering every entity variant.
        let a = group.add_point(point(0.0, 0.0)); // entity 0
        group.add_label(Label::new(
            "front",
            color,
            Anchor::Position(Point::default()),
            12,
        )); // entity 1
        let b = group.add_point(point(100.0, 0.0)); // entity 2
        group.add_line(Line::new(a, b, 2.0, color)); // entity 3
        group.add_background_label(Label::new(
            "title",
            color,
            Anchor::Position(Point::default()),
            22,
        )); // entity 4
        let c = group.add_point(point(50.0, 80.0)); // entity 5
        group.add_triangle(Triangle::new(a, b, c, 1.0, Some(color), None)); // entity 6
        let d = group.add_point(point(150.0, 80.0)); // entity 7
        group.add_quadratic_curve(QuadraticCurve::new(a, c, b, color, 1.0)); // entity 8
        group.add_line_label(LineLabel::new(
            a,
            b,
            color,
            12,
            10.0,
            Some("side".to_string()),
        )); // entity 9
        group.add_cubic_curve(CubicCurve::new(a, b, c, d, color, 1.0)); // entity 10

        // Background label first, then shapes, then points, then text,
        // insertion order preserved within each layer.
        assert_eq!(group.draw_order(), vec![4, 3, 6, 8, 10, 0, 2, 5, 7, 1, 9]);
    }

    #[test]
    fn test_draw_emits_in_layer_order() {
        let (mut group, a, b) = two_point_group();
        group.add_label(Label::new(
            "front",
            Color::default(),
            Anchor::Position(Point::default()),
            12,
        ));
        group.add_line(Line::new(a, b, 2.0, Color::default()));

        let mut surface = RecordingSurface::default();
        group.draw(&mut surface).unwrap();

        assert_eq!(surface.calls, vec!["line", "circle", "circle", "text:front"]);
    }

    #[test]
    fn test_curve_flattens_to_fixed_segments() {
        let mut group = Group::new();
        let p0 = group.add_point(PointEntity::new(
            Point::new(0.0, 100.0),
            4.0,
            Color::default(),
            false,
        ));
        let p1 = group.add_point(PointEntity::new(
            Point::new(50.0, 0.0),
            4.0,
            Color::default(),
            false,
        ));
        let p2 = group.add_point(PointEntity::new(
            Point::new(100.0, 100.0),
            4.0,
            Color::default(),
            false,
        ));
        group.add_quadratic_curve(QuadraticCurve::new(p0, p1, p2, Color::default(), 2.0));

        let mut surface = RecordingSurface::default();
        group.draw(&mut surface).unwrap();

        let segments = surface.calls.iter().filter(|c| *c == "line").count();
        assert_eq!(segments, CURVE_RESOLUTION);
    }

    #[test]
    fn test_triangle_fill_and_outline() {
        let mut group = Group::new();
        let a = group.add_point(PointEntity::new(
            Point::new(0.0, 0.0),
            4.0,
            Color::default(),
            false,
        ));
        let b = group.add_point(PointEntity::new(
            Point::new(50.0, 0.0),
            4.0,
            Color::default(),
            false,
        ));
        let c = group.add_point(PointEntity::new(
            Point::new(25.0, 40.0),
            4.0,
            Color::default(),
            false,
        ));
        group.add_triangle(Triangle::new(
            a,
            b,
            c,
            2.0,
            Some(Color::default()),
            Some(Color::default()),
        ));

        let mut surface = RecordingSurface::default();
        group.draw(&mut surface).unwrap();

        let polygons = surface.calls.iter().filter(|c| *c == "polygon").count();
        let lines = surface.calls.iter().filter(|c| *c == "line").count();
        assert_eq!(polygons, 1);
        assert_eq!(lines, 3);
    }

    #[test]
    fn test_triangle_without_styles_draws_nothing() {
        let mut group = Group::new();
        let a = group.add_point(PointEntity::new(
            Point::new(0.0, 0.0),
            4.0,
            Color::default(),
            false,
        ));
        let b = group.add_point(PointEntity::new(
            Point::new(50.0, 0.0),
            4.0,
            Color::default(),
            false,
        ));
        let c = group.add_point(PointEntity::new(
            Point::new(25.0, 40.0),
            4.0,
            Color::default(),
            false,
        ));
        group.add_triangle(Triangle::new(a, b, c, 2.0, None, None));

        let mut surface = RecordingSurface::default();
        group.draw(&mut surface).unwrap();

        assert!(surface.calls.iter().all(|c| c == "circle"));
    }

    #[test]
    fn test_update_refreshes_auto_line_label() {
        let mut group = Group::new();
        // The fixed origin point cannot steal the drag even though the hit
        // boxes overlap.
        let a = group.add_point(PointEntity::new(
            Point::new(0.0, 0.0),
            8.0,
            Color::default(),
            false,
        ));
        let b = group.add_point(PointEntity::new(
            Point::new(3.0, 4.0),
            8.0,
            Color::default(),
            true,
        ));
        group.add_line_label(LineLabel::new(
            a,
            b,
            Color::default(),
            12,
            DEFAULT_LINE_LABEL_OFFSET,
            None,
        ));

        // Content is valid already at insertion.
        let label_content = |group: &Group| match &group.entities()[2] {
            Entity::LineLabel(label) => label.content().to_string(),
            _ => unreachable!(),
        };
        assert_eq!(label_content(&group), "5");

        // Drag point b to (6, 8): distance becomes 10.
        let bounds = Size::new(960.0, 540.0);
        group.update(
            &InputState {
                pointer: Point::new(3.0, 4.0),
                pressed: true,
            },
            bounds,
        );
        group.update(
            &InputState {
                pointer: Point::new(6.0, 8.0),
                pressed: true,
            },
            bounds,
        );

        // Point b follows the pointer but is clamped by its radius, so the
        // label must show the distance to wherever b actually landed.
        assert_eq!(group.dragged(), Some(b));
        let a_pos = group.point(a).position();
        let b_pos = group.point(b).position();
        let expected = geometry::advance_distance(a_pos, b_pos)
            .signed_distance
            .abs();
        let shown: f32 = label_content(&group).parse().unwrap();
        assert_approx_eq!(f32, shown, expected, epsilon = 0.001);
    }

    #[test]
    fn test_update_idle_refreshes_positions() {
        let (mut group, a, b) = two_point_group();
        group.add_line_label(LineLabel::new(
            a,
            b,
            Color::default(),
            12,
            10.0,
            Some("side".to_string()),
        ));

        group.update(&InputState::idle(), Size::new(960.0, 540.0));

        let Entity::LineLabel(label) = &group.entities()[2] else {
            unreachable!();
        };
        let mid = group.point(a).position().midpoint(group.point(b).position());
        assert_approx_eq!(f32, label.position().x(), mid.x());
        assert_approx_eq!(f32, label.position().y(), mid.y() - 10.0);
        assert_eq!(label.content(), "side");
    }
}

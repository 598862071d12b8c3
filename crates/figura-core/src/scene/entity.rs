//! The entity model: the closed set of drawable diagram elements.
//!
//! Every element of a diagram is one variant of [`Entity`]. Entities that
//! depend on points (lines, triangles, curves, line labels) hold non-owning
//! [`PointId`] references into their [`Group`](super::Group)'s point arena;
//! the group is the sole owner and topology never changes after load, so the
//! references cannot dangle.
//!
//! Draw order is not insertion order: each variant maps to a [`DrawLayer`]
//! and the group performs a stable sort by layer before drawing, so strokes
//! never occlude the points that anchor them and points never occlude their
//! own labels.

use crate::{
    color::Color,
    geometry::{self, Point},
};

/// Number of straight segments a curve is flattened into when drawn.
///
/// Fixed quality/cost trade-off; not configurable per instance.
pub const CURVE_RESOLUTION: usize = 50;

/// Vertical gap between a point's circle and a label anchored to it.
pub const LABEL_RISE: f32 = 15.0;

/// Default vertical offset of a line label above its segment midpoint.
pub const DEFAULT_LINE_LABEL_OFFSET: f32 = 20.0;

/// A non-owning reference to a point in a group's point arena.
///
/// Ids are handed out by [`Group::add_point`](super::Group::add_point) and
/// are only meaningful within the group that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointId(usize);

impl PointId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index of the referenced point.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A draggable (or fixed) point, the only entity directly mutated by input.
///
/// The position is kept clamped to the surface bounds minus the radius by
/// the interaction engine; see [`interact`](crate::interact).
#[derive(Debug, Clone)]
pub struct PointEntity {
    position: Point,
    radius: f32,
    color: Color,
    draggable: bool,
    dragged: bool,
}

impl PointEntity {
    /// Creates a new point entity in the `Idle` state.
    pub fn new(position: Point, radius: f32, color: Color, draggable: bool) -> Self {
        Self {
            position,
            radius,
            color,
            draggable,
            dragged: false,
        }
    }

    /// Returns the current position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the circle radius, which is also the hit-test half-extent.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Returns the fill color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns `true` if user input may move this point.
    pub fn draggable(&self) -> bool {
        self.draggable
    }

    /// Returns `true` while this point is being dragged.
    pub fn dragged(&self) -> bool {
        self.dragged
    }

    /// Returns `true` if `pointer` lies within the axis-aligned box of half
    /// extent `radius` around the point.
    pub fn hit_test(&self, pointer: Point) -> bool {
        pointer.x() < self.position.x() + self.radius
            && pointer.x() > self.position.x() - self.radius
            && pointer.y() < self.position.y() + self.radius
            && pointer.y() > self.position.y() - self.radius
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_dragged(&mut self, dragged: bool) {
        self.dragged = dragged;
    }
}

/// A stroked segment between two referenced points.
#[derive(Debug, Clone)]
pub struct Line {
    pub(crate) a: PointId,
    pub(crate) b: PointId,
    pub(crate) width: f32,
    pub(crate) color: Color,
}

impl Line {
    pub fn new(a: PointId, b: PointId, width: f32, color: Color) -> Self {
        Self { a, b, width, color }
    }

    /// Returns the two endpoint references.
    pub fn endpoints(&self) -> (PointId, PointId) {
        (self.a, self.b)
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }
}

/// A triangle over three referenced points.
///
/// Fill and outline are independent; with neither set the triangle draws
/// nothing, which is valid.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub(crate) a: PointId,
    pub(crate) b: PointId,
    pub(crate) c: PointId,
    pub(crate) width: f32,
    pub(crate) fill: Option<Color>,
    pub(crate) outline: Option<Color>,
}

impl Triangle {
    pub fn new(
        a: PointId,
        b: PointId,
        c: PointId,
        width: f32,
        fill: Option<Color>,
        outline: Option<Color>,
    ) -> Self {
        Self {
            a,
            b,
            c,
            width,
            fill,
            outline,
        }
    }

    /// Returns the three vertex references.
    pub fn vertices(&self) -> (PointId, PointId, PointId) {
        (self.a, self.b, self.c)
    }

    /// Returns the fill color, if any.
    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    /// Returns the outline color, if any.
    pub fn outline(&self) -> Option<Color> {
        self.outline
    }
}

/// A quadratic Bézier curve: start, control, end point references.
#[derive(Debug, Clone)]
pub struct QuadraticCurve {
    pub(crate) start: PointId,
    pub(crate) control: PointId,
    pub(crate) end: PointId,
    pub(crate) color: Color,
    pub(crate) width: f32,
}

impl QuadraticCurve {
    pub fn new(start: PointId, control: PointId, end: PointId, color: Color, width: f32) -> Self {
        Self {
            start,
            control,
            end,
            color,
            width,
        }
    }

    /// Returns the start, control, and end references.
    pub fn control_points(&self) -> (PointId, PointId, PointId) {
        (self.start, self.control, self.end)
    }
}

/// A cubic Bézier curve over four point references.
#[derive(Debug, Clone)]
pub struct CubicCurve {
    pub(crate) p0: PointId,
    pub(crate) p1: PointId,
    pub(crate) p2: PointId,
    pub(crate) p3: PointId,
    pub(crate) color: Color,
    pub(crate) width: f32,
}

impl CubicCurve {
    pub fn new(
        p0: PointId,
        p1: PointId,
        p2: PointId,
        p3: PointId,
        color: Color,
        width: f32,
    ) -> Self {
        Self {
            p0,
            p1,
            p2,
            p3,
            color,
            width,
        }
    }

    /// Returns the four control references in order.
    pub fn control_points(&self) -> (PointId, PointId, PointId, PointId) {
        (self.p0, self.p1, self.p2, self.p3)
    }
}

/// Where a label centers its text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// A literal surface position.
    Position(Point),
    /// A referenced point; the text centers [`LABEL_RISE`] above the circle.
    Point(PointId),
}

/// A static text label, optionally anchored to a point.
///
/// The same struct backs both [`Entity::Label`] and
/// [`Entity::BackgroundLabel`]; the variants differ only in draw layer.
#[derive(Debug, Clone)]
pub struct Label {
    pub(crate) content: String,
    pub(crate) color: Color,
    pub(crate) anchor: Anchor,
    pub(crate) font_size: u16,
}

impl Label {
    pub fn new(content: impl Into<String>, color: Color, anchor: Anchor, font_size: u16) -> Self {
        Self {
            content: content.into(),
            color,
            anchor,
            font_size,
        }
    }

    /// Returns the label text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the anchor.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Returns the font size in points.
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Resolves the text center from the anchor against the given arena.
    pub(crate) fn anchor_position(&self, points: &[PointEntity]) -> Point {
        match self.anchor {
            Anchor::Position(position) => position,
            Anchor::Point(id) => {
                let point = &points[id.index()];
                point
                    .position()
                    .sub_point(Point::new(0.0, point.radius() + LABEL_RISE))
            }
        }
    }
}

/// A label tracking the segment between two referenced points.
///
/// Its position is re-derived every update as the segment midpoint raised by
/// `offset`. In auto mode (no literal content) the text is the absolute
/// [`advance_distance`](geometry::advance_distance) between the points,
/// recomputed from live positions each frame and never cached across frames.
#[derive(Debug, Clone)]
pub struct LineLabel {
    pub(crate) a: PointId,
    pub(crate) b: PointId,
    pub(crate) color: Color,
    pub(crate) font_size: u16,
    pub(crate) offset: f32,
    pub(crate) content: String,
    pub(crate) auto: bool,
    pub(crate) position: Point,
}

impl LineLabel {
    /// Creates a line label; `content` of `None` selects auto-distance mode.
    ///
    /// The position is a placeholder until the first
    /// [`refresh`](Self::refresh); groups refresh at insertion so the label
    /// is correct even before the first update pass.
    pub fn new(
        a: PointId,
        b: PointId,
        color: Color,
        font_size: u16,
        offset: f32,
        content: Option<String>,
    ) -> Self {
        let auto = content.is_none();
        Self {
            a,
            b,
            color,
            font_size,
            offset,
            content: content.unwrap_or_default(),
            auto,
            position: Point::default(),
        }
    }

    /// Returns the current (possibly derived) text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` if the content is distance-derived.
    pub fn is_auto(&self) -> bool {
        self.auto
    }

    /// Returns the current text center.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the two endpoint references.
    pub fn endpoints(&self) -> (PointId, PointId) {
        (self.a, self.b)
    }

    /// Returns the vertical offset above the segment midpoint.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Recomputes the position and, in auto mode, the content from the
    /// current endpoint positions.
    pub(crate) fn refresh(&mut self, a: Point, b: Point) {
        if self.auto {
            let advance = geometry::advance_distance(a, b);
            self.content = format_distance(advance.signed_distance.abs());
        }
        self.position = a.midpoint(b).sub_point(Point::new(0.0, self.offset));
    }
}

/// Formats a distance for display: up to three decimals, trailing zeros
/// trimmed, so `5.0` displays as `5` and `1.4140` as `1.414`.
pub(crate) fn format_distance(value: f32) -> String {
    let mut text = format!("{value:.3}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

/// Any drawable/updatable diagram element.
///
/// This is a closed sum type: draw ranking dispatches on the concrete
/// variant, never on duck-typed attributes, so the rank table is exhaustive
/// and statically checked.
#[derive(Debug, Clone)]
pub enum Entity {
    /// A point, stored in the owning group's arena.
    Point(PointId),
    Line(Line),
    Triangle(Triangle),
    QuadraticCurve(QuadraticCurve),
    CubicCurve(CubicCurve),
    Label(Label),
    /// Same shape as [`Entity::Label`] but drawn before everything else.
    BackgroundLabel(Label),
    LineLabel(LineLabel),
}

/// The z-ordering rank of an entity variant.
///
/// Layers render bottom to top in declaration order; the derived `Ord` uses
/// declaration order, so the first variant draws first. Within one layer the
/// group's stable sort preserves insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DrawLayer {
    /// Background text, drawn first and non-interactive.
    Background,
    /// Lines, triangles, and curves.
    Shape,
    /// Points, above the strokes that reference them.
    Point,
    /// Foreground text (labels and line labels), drawn last.
    Text,
}

impl Entity {
    /// Returns the draw layer for this variant.
    pub fn layer(&self) -> DrawLayer {
        match self {
            Entity::BackgroundLabel(_) => DrawLayer::Background,
            Entity::Line(_)
            | Entity::Triangle(_)
            | Entity::QuadraticCurve(_)
            | Entity::CubicCurve(_) => DrawLayer::Shape,
            Entity::Point(_) => DrawLayer::Point,
            Entity::Label(_) | Entity::LineLabel(_) => DrawLayer::Text,
        }
    }
}

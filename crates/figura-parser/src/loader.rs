//! The scene loader: line dispatch plus winnow argument grammars.
//!
//! Each statement line is split into a keyword and an argument tail; the
//! tail is parsed by a winnow grammar specific to the keyword. `ADDR<n>`
//! references are resolved against the open group's entity list as it is
//! built, so forward references fail immediately at their use site.

use std::ops::Range;

use log::debug;
use winnow::{
    ModalResult, Parser,
    ascii::{dec_int, dec_uint, space0, space1},
    combinator::{alt, delimited, opt, preceded, separated_pair},
    error::{ContextError, StrContext, StrContextValue},
    token::take_while,
};

use figura_core::{
    color::Color,
    geometry::Point,
    scene::{
        Anchor, CubicCurve, Entity, Group, Label, Line, LineLabel, PointEntity, PointId,
        QuadraticCurve, Scenes, Triangle,
        entity::DEFAULT_LINE_LABEL_OFFSET,
    },
};

use crate::error::{LoadError, LoadErrorKind};

/// Loads a scene description, returning the groups it declares.
///
/// The whole source is validated: the first failing line aborts the load and
/// no partially built scene escapes.
pub fn load_scenes(source: &str) -> Result<Scenes, LoadError> {
    let mut groups = Vec::new();
    let mut open: Option<OpenGroup> = None;

    for (index, raw_line) in source.lines().enumerate() {
        let number = index + 1;
        let start = raw_line.as_ptr() as usize - source.as_ptr() as usize;
        let span = start..start + raw_line.len();
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix('@') {
            if let Some(unfinished) = &open {
                return Err(LoadError {
                    line: unfinished.line,
                    span: unfinished.span.clone(),
                    kind: LoadErrorKind::UnterminatedGroup,
                });
            }
            debug!(scene = name, line = number; "Opening scene group");
            open = Some(OpenGroup::new(number, span));
            continue;
        }

        if line == "END" {
            match open.take() {
                Some(builder) => groups.push(builder.group),
                None => {
                    return Err(LoadError {
                        line: number,
                        span,
                        kind: LoadErrorKind::StatementOutsideGroup,
                    });
                }
            }
            continue;
        }

        let Some(builder) = open.as_mut() else {
            return Err(LoadError {
                line: number,
                span,
                kind: LoadErrorKind::StatementOutsideGroup,
            });
        };
        builder
            .statement(line)
            .map_err(|kind| LoadError {
                line: number,
                span,
                kind,
            })?;
    }

    if let Some(unfinished) = open {
        return Err(LoadError {
            line: unfinished.line,
            span: unfinished.span,
            kind: LoadErrorKind::UnterminatedGroup,
        });
    }

    debug!(groups = groups.len(); "Scene load complete");
    Ok(Scenes::new(groups))
}

/// A group under construction plus the location of its opening `@` line,
/// kept for the unterminated-block error.
struct OpenGroup {
    line: usize,
    span: Range<usize>,
    group: Group,
}

impl OpenGroup {
    fn new(line: usize, span: Range<usize>) -> Self {
        Self {
            line,
            span,
            group: Group::new(),
        }
    }

    /// Parses one statement line and adds the entity it declares.
    fn statement(&mut self, line: &str) -> Result<(), LoadErrorKind> {
        let (keyword, args) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        match keyword {
            "POINT" => {
                let (x, y, radius, color, draggable) = point_args
                    .parse(args)
                    .map_err(|e| malformed("POINT", e))?;
                let color = color.into_color()?;
                self.group.add_point(PointEntity::new(
                    Point::new(x as f32, y as f32),
                    radius as f32,
                    color,
                    draggable,
                ));
            }
            "LINE" => {
                let (a, b, width, color) =
                    line_args.parse(args).map_err(|e| malformed("LINE", e))?;
                let a = self.resolve_point(a)?;
                let b = self.resolve_point(b)?;
                let color = color.into_color()?;
                self.group.add_line(Line::new(a, b, width as f32, color));
            }
            "TRI" => {
                let (a, b, c, width, fill, outline) = triangle_args
                    .parse(args)
                    .map_err(|e| malformed("TRI", e))?;
                let a = self.resolve_point(a)?;
                let b = self.resolve_point(b)?;
                let c = self.resolve_point(c)?;
                let fill = fill.map(ColorSpec::into_color).transpose()?;
                let outline = outline.map(ColorSpec::into_color).transpose()?;
                self.group
                    .add_triangle(Triangle::new(a, b, c, width as f32, fill, outline));
            }
            "BCURVEQ" => {
                // Statement order is start, end, control.
                let (start, end, control, color, width) = quadratic_args
                    .parse(args)
                    .map_err(|e| malformed("BCURVEQ", e))?;
                let start = self.resolve_point(start)?;
                let control = self.resolve_point(control)?;
                let end = self.resolve_point(end)?;
                let color = color.into_color()?;
                self.group.add_quadratic_curve(QuadraticCurve::new(
                    start,
                    control,
                    end,
                    color,
                    width as f32,
                ));
            }
            "BCURVEC" => {
                let (p0, p1, p2, p3, color, width) = cubic_args
                    .parse(args)
                    .map_err(|e| malformed("BCURVEC", e))?;
                let p0 = self.resolve_point(p0)?;
                let p1 = self.resolve_point(p1)?;
                let p2 = self.resolve_point(p2)?;
                let p3 = self.resolve_point(p3)?;
                let color = color.into_color()?;
                self.group
                    .add_cubic_curve(CubicCurve::new(p0, p1, p2, p3, color, width as f32));
            }
            "TEXT" | "BGTXT" => {
                let statement: &'static str = if keyword == "TEXT" { "TEXT" } else { "BGTXT" };
                let (content, color, anchor, size) = label_args
                    .parse(args)
                    .map_err(|e| malformed(statement, e))?;
                let color = color.into_color()?;
                let anchor = match anchor {
                    AnchorSpec::Position(x, y) => Anchor::Position(Point::new(x as f32, y as f32)),
                    AnchorSpec::Address(address) => Anchor::Point(self.resolve_point(address)?),
                };
                let label = Label::new(content, color, anchor, size);
                if statement == "BGTXT" {
                    self.group.add_background_label(label);
                } else {
                    self.group.add_label(label);
                }
            }
            "LNTXT" => {
                let (a, b, color, size, offset, content) = line_label_args
                    .parse(args)
                    .map_err(|e| malformed("LNTXT", e))?;
                let a = self.resolve_point(a)?;
                let b = self.resolve_point(b)?;
                let color = color.into_color()?;
                let offset = offset.map_or(DEFAULT_LINE_LABEL_OFFSET, |o| o as f32);
                self.group
                    .add_line_label(LineLabel::new(a, b, color, size, offset, content));
            }
            _ => {
                return Err(LoadErrorKind::UnknownKeyword {
                    keyword: keyword.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Resolves an `ADDR<n>` index against the statements seen so far.
    fn resolve_point(&self, address: usize) -> Result<PointId, LoadErrorKind> {
        match self.group.entities().get(address) {
            Some(Entity::Point(id)) => Ok(*id),
            Some(_) => Err(LoadErrorKind::NotAPoint { address }),
            None => Err(LoadErrorKind::UnresolvedAddress {
                address,
                defined: self.group.entities().len(),
            }),
        }
    }
}

fn malformed(
    keyword: &'static str,
    err: winnow::error::ParseError<&str, ContextError>,
) -> LoadErrorKind {
    let expected = err.inner().to_string();
    let expected = if expected.is_empty() {
        "unexpected arguments".to_string()
    } else {
        expected
    };
    LoadErrorKind::Malformed { keyword, expected }
}

/// A color argument before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ColorSpec {
    Rgb(u8, u8, u8),
    Css(String),
}

impl ColorSpec {
    fn into_color(self) -> Result<Color, LoadErrorKind> {
        match self {
            ColorSpec::Rgb(r, g, b) => Ok(Color::from_rgb8(r, g, b)),
            ColorSpec::Css(token) => {
                Color::new(&token).map_err(|message| LoadErrorKind::InvalidColor { message })
            }
        }
    }
}

/// A label anchor argument before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnchorSpec {
    Position(i32, i32),
    Address(usize),
}

// ===================
// Argument grammars
// ===================

fn integer(input: &mut &str) -> ModalResult<i32> {
    dec_int
        .context(StrContext::Expected(StrContextValue::Description(
            "integer",
        )))
        .parse_next(input)
}

fn unsigned(input: &mut &str) -> ModalResult<u32> {
    dec_uint
        .context(StrContext::Expected(StrContextValue::Description(
            "unsigned integer",
        )))
        .parse_next(input)
}

fn font_size(input: &mut &str) -> ModalResult<u16> {
    dec_uint
        .context(StrContext::Expected(StrContextValue::Description(
            "font size",
        )))
        .parse_next(input)
}

fn comma(input: &mut &str) -> ModalResult<()> {
    (space0, ',', space0).void().parse_next(input)
}

fn rgb_component(input: &mut &str) -> ModalResult<u8> {
    dec_uint
        .context(StrContext::Expected(StrContextValue::Description(
            "color component 0-255",
        )))
        .parse_next(input)
}

fn color_spec(input: &mut &str) -> ModalResult<ColorSpec> {
    alt((
        delimited(
            '(',
            (rgb_component, preceded(comma, rgb_component), preceded(comma, rgb_component)),
            ')',
        )
        .map(|(r, g, b)| ColorSpec::Rgb(r, g, b)),
        word.map(ColorSpec::Css),
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "color name or (r,g,b) tuple",
    )))
    .parse_next(input)
}

fn position(input: &mut &str) -> ModalResult<(i32, i32)> {
    delimited('(', separated_pair(integer, comma, integer), ')')
        .context(StrContext::Expected(StrContextValue::Description(
            "(x,y) tuple",
        )))
        .parse_next(input)
}

fn address(input: &mut &str) -> ModalResult<usize> {
    preceded("ADDR", dec_uint)
        .context(StrContext::Expected(StrContextValue::Description(
            "ADDR<n> reference",
        )))
        .parse_next(input)
}

fn anchor_spec(input: &mut &str) -> ModalResult<AnchorSpec> {
    alt((
        position.map(|(x, y)| AnchorSpec::Position(x, y)),
        address.map(AnchorSpec::Address),
    ))
    .parse_next(input)
}

fn bool_token(input: &mut &str) -> ModalResult<bool> {
    alt(("True".value(true), "False".value(false)))
        .context(StrContext::Expected(StrContextValue::Description(
            "True or False",
        )))
        .parse_next(input)
}

/// One whitespace-free token; backtick escapes a space and `Bezier` gains
/// its accent for display.
fn word(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |c: char| !c.is_whitespace())
        .map(|s: &str| s.to_string())
        .parse_next(input)
}

fn display_text(input: &mut &str) -> ModalResult<String> {
    word.map(|token| token.replace('`', " ").replace("Bezier", "Bézier"))
        .parse_next(input)
}

#[allow(clippy::type_complexity)]
fn point_args(input: &mut &str) -> ModalResult<(i32, i32, u32, ColorSpec, bool)> {
    (
        integer,
        preceded(space1, integer),
        preceded(space1, unsigned),
        preceded(space1, color_spec),
        opt(preceded(space1, bool_token)),
    )
        .map(|(x, y, radius, color, draggable)| {
            (x, y, radius, color, draggable.unwrap_or(true))
        })
        .parse_next(input)
}

fn line_args(input: &mut &str) -> ModalResult<(usize, usize, u32, ColorSpec)> {
    (
        address,
        preceded(space1, address),
        preceded(space1, unsigned),
        preceded(space1, color_spec),
    )
        .parse_next(input)
}

#[allow(clippy::type_complexity)]
fn triangle_args(
    input: &mut &str,
) -> ModalResult<(usize, usize, usize, u32, Option<ColorSpec>, Option<ColorSpec>)> {
    (
        address,
        preceded(space1, address),
        preceded(space1, address),
        preceded(space1, unsigned),
        opt(preceded(space1, color_spec)),
        opt(preceded(space1, color_spec)),
    )
        .parse_next(input)
}

fn quadratic_args(input: &mut &str) -> ModalResult<(usize, usize, usize, ColorSpec, u32)> {
    (
        address,
        preceded(space1, address),
        preceded(space1, address),
        preceded(space1, color_spec),
        preceded(space1, unsigned),
    )
        .parse_next(input)
}

#[allow(clippy::type_complexity)]
fn cubic_args(
    input: &mut &str,
) -> ModalResult<(usize, usize, usize, usize, ColorSpec, u32)> {
    (
        address,
        preceded(space1, address),
        preceded(space1, address),
        preceded(space1, address),
        preceded(space1, color_spec),
        preceded(space1, unsigned),
    )
        .parse_next(input)
}

fn label_args(input: &mut &str) -> ModalResult<(String, ColorSpec, AnchorSpec, u16)> {
    (
        display_text,
        preceded(space1, color_spec),
        preceded(space1, anchor_spec),
        preceded(space1, font_size),
    )
        .parse_next(input)
}

#[allow(clippy::type_complexity)]
fn line_label_args(
    input: &mut &str,
) -> ModalResult<(usize, usize, ColorSpec, u16, Option<i32>, Option<String>)> {
    (
        address,
        preceded(space1, address),
        preceded(space1, color_spec),
        preceded(space1, font_size),
        opt(preceded(space1, integer)),
        opt(preceded(space1, display_text)),
    )
        .parse_next(input)
}

//! Geometric primitives for diagram positioning and curve evaluation.
//!
//! This module provides the fundamental geometric types used throughout
//! Figura for positioning entities and flattening Bézier curves.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in surface space
//! - [`Size`] - Width and height dimensions (also used as surface bounds)
//! - [`lerp`] / [`quadratic_bezier`] / [`cubic_bezier`] - Curve evaluators
//! - [`advance_distance`] - The signed distance measurement shown by
//!   auto-distance labels
//!
//! # Coordinate System
//!
//! Figura uses a screen-style coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

/// A 2D point representing a position in surface coordinate space.
///
/// Points use `f32` coordinates and provide operations for basic vector math.
/// The coordinate system has origin at top-left with Y increasing downward
/// (see [module documentation](self) for details).
///
/// # Examples
///
/// ```
/// # use figura_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Clamps both coordinates so that a circle of the given radius centered
    /// here stays fully within `bounds`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use figura_core::geometry::{Point, Size};
    /// let bounds = Size::new(960.0, 540.0);
    /// let clamped = Point::new(-10.0, 600.0).clamp_to(bounds, 8.0);
    /// assert_eq!(clamped.x(), 8.0);
    /// assert_eq!(clamped.y(), 532.0);
    /// ```
    pub fn clamp_to(self, bounds: Size, radius: f32) -> Self {
        Self {
            x: self.x.clamp(radius, bounds.width() - radius),
            y: self.y.clamp(radius, bounds.height() - radius),
        }
    }
}

/// Represents the dimensions of a surface or element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Linear interpolation between two points: `a + (b - a) * t`.
///
/// Callers only ever pass `t` from a 0..1 sweep; values outside that range
/// extrapolate along the same line and are not rejected.
pub fn lerp(a: Point, b: Point, t: f32) -> Point {
    a.add_point(b.sub_point(a).scale(t))
}

/// Evaluates a quadratic Bézier curve at parameter `t` by De Casteljau
/// reduction: two [`lerp`] calls, then one more on the results.
///
/// The evaluation is recomputed per sample rather than cached because the
/// control points are live positions that can move between frames.
pub fn quadratic_bezier(p0: Point, p1: Point, p2: Point, t: f32) -> Point {
    let a = lerp(p0, p1, t);
    let b = lerp(p1, p2, t);
    lerp(a, b, t)
}

/// Evaluates a cubic Bézier curve at parameter `t` by De Casteljau
/// reduction: two quadratic reductions, then one final [`lerp`].
pub fn cubic_bezier(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let a = quadratic_bezier(p0, p1, p2, t);
    let b = quadratic_bezier(p1, p2, p3, t);
    lerp(a, b, t)
}

/// The component-wise advance between two points plus the signed distance.
///
/// Produced by [`advance_distance`]; the `signed_distance` field is the value
/// displayed (as an absolute value) by auto-distance line labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvanceDistance {
    /// Absolute horizontal advance `|x2 - x1|`.
    pub dx: f32,
    /// Absolute vertical advance `|y2 - y1|`.
    pub dy: f32,
    /// Euclidean distance rounded to three decimals, negated when the second
    /// point lies below the first.
    pub signed_distance: f32,
}

/// Measures the advance between two points.
///
/// Returns `(|dx|, |dy|, round(hypot, 3))`, with the distance negated when
/// `p2.y > p1.y`. The sign encodes "p2 is below p1", a vertical-direction
/// convention rather than a true directional distance; the magnitude is
/// symmetric but the sign is not, so `advance_distance(a, b)` is not simply
/// the negation of `advance_distance(b, a)`. The formula is preserved exactly
/// for compatibility with existing label output.
pub fn advance_distance(p1: Point, p2: Point) -> AdvanceDistance {
    let dx = (p2.x() - p1.x()).abs();
    let dy = (p2.y() - p1.y()).abs();
    let mut dist = round_to_places(dx.hypot(dy), 3);
    if p2.y() > p1.y() {
        dist = -dist;
    }
    AdvanceDistance {
        dx,
        dy,
        signed_distance: dist,
    }
}

/// Rounds to the given number of decimal places (half away from zero).
fn round_to_places(value: f32, places: u32) -> f32 {
    let factor = 10f32.powi(places as i32);
    (value * factor).round() / factor
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn bounds_strategy() -> impl Strategy<Value = Size> {
        (100.0f32..2000.0, 100.0f32..2000.0).prop_map(|(w, h)| Size::new(w, h))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Clamping keeps the full circle inside the bounds.
    fn check_clamp_keeps_circle_inside(
        p: Point,
        bounds: Size,
        radius: f32,
    ) -> Result<(), TestCaseError> {
        let clamped = p.clamp_to(bounds, radius);

        prop_assert!(clamped.x() >= radius);
        prop_assert!(clamped.x() <= bounds.width() - radius);
        prop_assert!(clamped.y() >= radius);
        prop_assert!(clamped.y() <= bounds.height() - radius);
        Ok(())
    }

    /// Bézier evaluation at t=0 and t=1 returns the curve endpoints.
    fn check_bezier_endpoints(
        p0: Point,
        p1: Point,
        p2: Point,
        p3: Point,
    ) -> Result<(), TestCaseError> {
        let quad_start = quadratic_bezier(p0, p1, p2, 0.0);
        let quad_end = quadratic_bezier(p0, p1, p2, 1.0);
        prop_assert!(approx_eq!(f32, quad_start.x(), p0.x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, quad_start.y(), p0.y(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, quad_end.x(), p2.x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, quad_end.y(), p2.y(), epsilon = 0.001));

        let cubic_start = cubic_bezier(p0, p1, p2, p3, 0.0);
        let cubic_end = cubic_bezier(p0, p1, p2, p3, 1.0);
        prop_assert!(approx_eq!(f32, cubic_start.x(), p0.x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, cubic_start.y(), p0.y(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, cubic_end.x(), p3.x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, cubic_end.y(), p3.y(), epsilon = 0.001));
        Ok(())
    }

    /// The signed distance magnitude matches the rounded hypotenuse and the
    /// sign is negative exactly when the second point is lower.
    fn check_advance_distance_contract(p1: Point, p2: Point) -> Result<(), TestCaseError> {
        let adv = advance_distance(p1, p2);
        let expected = (p2.x() - p1.x()).abs().hypot((p2.y() - p1.y()).abs());

        prop_assert!(approx_eq!(
            f32,
            adv.signed_distance.abs(),
            expected,
            epsilon = 0.0006 * (1.0 + expected)
        ));
        if p2.y() > p1.y() {
            prop_assert!(adv.signed_distance <= 0.0);
        } else {
            prop_assert!(adv.signed_distance >= 0.0);
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn clamp_keeps_circle_inside(p in point_strategy(), bounds in bounds_strategy(), radius in 0.0f32..50.0) {
            check_clamp_keeps_circle_inside(p, bounds, radius)?;
        }

        #[test]
        fn bezier_endpoints(p0 in point_strategy(), p1 in point_strategy(), p2 in point_strategy(), p3 in point_strategy()) {
            check_bezier_endpoints(p0, p1, p2, p3)?;
        }

        #[test]
        fn advance_distance_contract(p1 in point_strategy(), p2 in point_strategy()) {
            check_advance_distance_contract(p1, p2)?;
        }
    }
}

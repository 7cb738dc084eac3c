#![forbid(unsafe_code)]

//! Geometric primitives: points, sizes, margins and the measured box record.
//!
//! All values are CSS-pixel style `f64`. The carousel only ever moves along
//! one axis (the *main* axis), so most helpers come in main/cross pairs keyed
//! by [`Direction`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Cells advance along x.
    #[default]
    Horizontal,
    /// Cells advance along y.
    Vertical,
}

impl Direction {
    /// Whether this is the horizontal direction.
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }

    /// Build a point with `main` on the main axis and `cross` on the other.
    #[inline]
    #[must_use]
    pub const fn point(self, main: f64, cross: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(main, cross),
            Self::Vertical => Point::new(cross, main),
        }
    }
}

/// A 2D position or displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component on the main axis of `direction`.
    #[inline]
    #[must_use]
    pub const fn main(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Horizontal => self.x,
            Direction::Vertical => self.y,
        }
    }

    /// Component on the cross axis of `direction`.
    #[inline]
    #[must_use]
    pub const fn cross(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Horizontal => self.y,
            Direction::Vertical => self.x,
        }
    }

    /// Replace the main-axis component, keeping the cross one.
    #[inline]
    #[must_use]
    pub const fn with_main(self, direction: Direction, value: f64) -> Self {
        match direction {
            Direction::Horizontal => Self::new(value, self.y),
            Direction::Vertical => Self::new(self.x, value),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Width and height of the container viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent along the main axis.
    #[inline]
    #[must_use]
    pub const fn main(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Horizontal => self.width,
            Direction::Vertical => self.height,
        }
    }
}

/// Margins on all four sides, CSS order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    /// Equal margin on every side.
    pub const fn all(val: f64) -> Self {
        Self::new(val, val, val, val)
    }

    /// Margin on left and right only.
    pub const fn horizontal(val: f64) -> Self {
        Self::new(0.0, val, 0.0, val)
    }

    /// Create with explicit values.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Margin before the content on the main axis (left or top).
    #[inline]
    #[must_use]
    pub const fn leading(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Horizontal => self.left,
            Direction::Vertical => self.top,
        }
    }

    /// Margin after the content on the main axis (right or bottom).
    #[inline]
    #[must_use]
    pub const fn trailing(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Horizontal => self.right,
            Direction::Vertical => self.bottom,
        }
    }
}

impl From<[f64; 4]> for Margin {
    fn from([top, right, bottom, left]: [f64; 4]) -> Self {
        Self::new(top, right, bottom, left)
    }
}

/// A measured element box, as reported by the host's measurement provider.
///
/// `outer_*` includes the margins; the carousel lays cells out by outer size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    pub outer_width: f64,
    pub outer_height: f64,
    pub margin: Margin,
}

impl BoxSize {
    /// A box with no padding, border or margin.
    #[must_use]
    pub const fn fixed(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            inner_width: width,
            inner_height: height,
            outer_width: width,
            outer_height: height,
            margin: Margin::all(0.0),
        }
    }

    /// A content box of `width` x `height` surrounded by `margin`.
    #[must_use]
    pub fn with_margin(width: f64, height: f64, margin: Margin) -> Self {
        Self {
            width,
            height,
            inner_width: width,
            inner_height: height,
            outer_width: width + margin.left + margin.right,
            outer_height: height + margin.top + margin.bottom,
            margin,
        }
    }

    /// Outer extent on the main axis.
    #[inline]
    #[must_use]
    pub const fn outer_main(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Horizontal => self.outer_width,
            Direction::Vertical => self.outer_height,
        }
    }

    /// Outer extent on the cross axis.
    #[inline]
    #[must_use]
    pub const fn outer_cross(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Horizontal => self.outer_height,
            Direction::Vertical => self.outer_width,
        }
    }

    /// First non-finite field, if any, as `(name, value)`.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        [
            ("width", self.width),
            ("height", self.height),
            ("innerWidth", self.inner_width),
            ("innerHeight", self.inner_height),
            ("outerWidth", self.outer_width),
            ("outerHeight", self.outer_height),
            ("marginTop", self.margin.top),
            ("marginRight", self.margin.right),
            ("marginBottom", self.margin.bottom),
            ("marginLeft", self.margin.left),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_main_and_cross_follow_direction() {
        let p = Point::new(3.0, 7.0);
        assert_eq!(p.main(Direction::Horizontal), 3.0);
        assert_eq!(p.cross(Direction::Horizontal), 7.0);
        assert_eq!(p.main(Direction::Vertical), 7.0);
        assert_eq!(p.with_main(Direction::Vertical, 1.0), Point::new(3.0, 1.0));
    }

    #[test]
    fn direction_point_places_main_component() {
        assert_eq!(Direction::Horizontal.point(5.0, 0.0), Point::new(5.0, 0.0));
        assert_eq!(Direction::Vertical.point(5.0, 0.0), Point::new(0.0, 5.0));
    }

    #[test]
    fn box_with_margin_accumulates_outer() {
        let b = BoxSize::with_margin(100.0, 50.0, Margin::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(b.outer_width, 106.0);
        assert_eq!(b.outer_height, 54.0);
        assert_eq!(b.margin.leading(Direction::Horizontal), 4.0);
        assert_eq!(b.margin.trailing(Direction::Vertical), 3.0);
    }

    #[test]
    fn margin_from_css_array() {
        let m = Margin::from([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m, Margin::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn non_finite_fields_are_reported() {
        let mut b = BoxSize::fixed(10.0, 10.0);
        assert_eq!(b.first_non_finite(), None);
        b.outer_height = f64::NAN;
        assert_eq!(b.first_non_finite().map(|(n, _)| n), Some("outerHeight"));
    }
}

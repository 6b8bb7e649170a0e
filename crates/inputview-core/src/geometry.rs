#![forbid(unsafe_code)]

//! Screen-space geometry.
//!
//! Rendered bounds are whole pixels; pointer positions are fractional and
//! are compared against them unrounded through [`Span`]. Coordinates are
//! signed: a popup can sit on a monitor left of or above the primary one,
//! and edge tolerances push bounds past zero.

use serde::{Deserialize, Serialize};

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// True if the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Horizontal extent `[x, right)`.
    #[inline]
    pub fn horizontal(&self) -> Span {
        Span::new(f64::from(self.x), f64::from(self.right()))
    }

    /// Vertical extent `[y, bottom)`.
    #[inline]
    pub fn vertical(&self) -> Span {
        Span::new(f64::from(self.y), f64::from(self.bottom()))
    }
}

/// A one-dimensional extent along an axis, in fractional pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    /// Create a new span.
    #[inline]
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Grow the span outward: `lead` moves the start down, `trail` moves the
    /// end up.
    #[inline]
    #[must_use]
    pub fn grow(self, lead: f64, trail: f64) -> Self {
        Self {
            start: self.start - lead,
            end: self.end + trail,
        }
    }

    /// Open-interval test: both edges exclusive. NaN is never contained.
    #[inline]
    pub fn strictly_contains(&self, v: f64) -> bool {
        self.start < v && self.end > v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
        assert_eq!(r.origin(), Point::new(10, 20));
        assert_eq!(r.horizontal(), Span::new(10.0, 40.0));
        assert_eq!(r.vertical(), Span::new(20.0, 60.0));
    }

    #[test]
    fn negative_origin() {
        let r = Rect::new(-1920, -5, 100, 10);
        assert_eq!(r.right(), -1820);
        assert!(r.horizontal().strictly_contains(-1900.0));
    }

    #[test]
    fn empty_rects() {
        assert!(Rect::new(0, 0, 0, 5).is_empty());
        assert!(Rect::new(0, 0, 5, -1).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn strict_containment_excludes_edges() {
        let s = Span::new(0.0, 10.0);
        assert!(!s.strictly_contains(0.0));
        assert!(s.strictly_contains(0.4));
        assert!(s.strictly_contains(9.6));
        assert!(!s.strictly_contains(10.0));
        assert!(!s.strictly_contains(f64::NAN));
    }

    #[test]
    fn grow_edges() {
        assert_eq!(Span::new(0.0, 10.0).grow(3.0, 0.0), Span::new(-3.0, 10.0));
        assert_eq!(Span::new(0.0, 10.0).grow(0.0, 2.5), Span::new(0.0, 12.5));
    }

    #[test]
    fn extreme_rect_edges_stay_ordered() {
        let r = Rect::new(i32::MAX - 1, 0, 10, 10);
        let span = r.horizontal().grow(5.0, 5.0);
        assert!(span.start < span.end);
    }

    #[test]
    fn rect_serde_shape() {
        let json = serde_json::to_string(&Rect::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2,"width":3,"height":4}"#);
    }
}

//! Geometric primitives for text regions and annotation placement.
//!
//! All coordinates use the page surface convention: origin at the top-left
//! corner of the page, x grows to the right and y grows downward. Backends
//! that work in PDF user space convert at their boundary.

use serde::Serialize;

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_partmark::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Return this point moved by `(dx, dy)`.
    pub fn offset(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// X coordinate of top-left corner
    pub x: f32,
    /// Y coordinate of top-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner points.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_partmark::geometry::Rect;
    ///
    /// let rect = Rect::from_points(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(rect.x, 10.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Compute the union of this rectangle with another.
    ///
    /// Returns the smallest rectangle that contains both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.left().min(other.left());
        let y0 = self.top().min(other.top());
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Rect::from_points(x0, y0, x1, y1)
    }

    /// Check whether the rectangle encloses no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A quadrilateral given by its four corners.
///
/// Regions returned by a page search and border outlines are quads. For
/// horizontal text the quad is the rectangle spanned by the text, but the
/// corners can be moved independently (see [`Quad::offset_corners`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quad {
    /// Upper-left corner
    pub ul: Point,
    /// Upper-right corner
    pub ur: Point,
    /// Lower-left corner
    pub ll: Point,
    /// Lower-right corner
    pub lr: Point,
}

impl Quad {
    /// Create a quad from its corners.
    pub fn new(ul: Point, ur: Point, ll: Point, lr: Point) -> Self {
        Self { ul, ur, ll, lr }
    }

    /// Create the quad covering a rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_partmark::geometry::{Quad, Rect};
    ///
    /// let quad = Quad::from_rect(&Rect::new(10.0, 20.0, 30.0, 12.0));
    /// assert_eq!(quad.ll.x, 10.0);
    /// assert_eq!(quad.ll.y, 32.0);
    /// assert_eq!(quad.ur.x, 40.0);
    /// ```
    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            ul: Point::new(rect.left(), rect.top()),
            ur: Point::new(rect.right(), rect.top()),
            ll: Point::new(rect.left(), rect.bottom()),
            lr: Point::new(rect.right(), rect.bottom()),
        }
    }

    /// Smallest rectangle containing all four corners.
    pub fn rect(&self) -> Rect {
        let xs = [self.ul.x, self.ur.x, self.ll.x, self.lr.x];
        let ys = [self.ul.y, self.ur.y, self.ll.y, self.lr.y];
        let x0 = xs.iter().copied().fold(f32::INFINITY, f32::min);
        let x1 = xs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let y0 = ys.iter().copied().fold(f32::INFINITY, f32::min);
        let y1 = ys.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        Rect::from_points(x0, y0, x1, y1)
    }

    /// Check whether the quad encloses no area.
    pub fn is_empty(&self) -> bool {
        self.rect().is_empty()
    }

    /// Move each corner by its own `(dx, dy)` delta.
    ///
    /// Deltas are given in `[ul, ur, ll, lr]` order.
    pub fn offset_corners(&self, deltas: [(f32, f32); 4]) -> Quad {
        Quad {
            ul: self.ul.offset(deltas[0].0, deltas[0].1),
            ur: self.ur.offset(deltas[1].0, deltas[1].1),
            ll: self.ll.offset(deltas[2].0, deltas[2].1),
            lr: self.lr.offset(deltas[3].0, deltas[3].1),
        }
    }

    /// Lower-left corner truncated toward zero to whole units.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_partmark::geometry::{Quad, Rect};
    ///
    /// let quad = Quad::from_rect(&Rect::new(72.9, 100.2, 40.0, 11.5));
    /// assert_eq!(quad.lower_left_key(), (72, 111));
    /// ```
    pub fn lower_left_key(&self) -> (i64, i64) {
        (self.ll.x.trunc() as i64, self.ll.y.trunc() as i64)
    }
}

//! Geometry primitives shared by every layer of the canvas.
//!
//! `Point` is a location (graph or canvas space, depending on who holds it),
//! `Vector` is a displacement. Keeping the two apart makes it hard to
//! accidentally add two positions together.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

// ─── Point ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement that takes `other` to `self`.
    pub fn vector_from(self, other: Point) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }

    pub fn translate(self, v: Vector) -> Point {
        Point::new(self.x + v.dx, self.y + v.dy)
    }

    /// Scale the coordinates about the origin.
    pub fn scale(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        self.vector_from(other).length()
    }

    /// Displacement from the origin to this point.
    pub fn to_vector(self) -> Vector {
        Vector::new(self.x, self.y)
    }

    /// Distance from this point to the segment `a`..`b` (clamped to the
    /// segment, not the infinite line through it).
    pub fn distance_to_segment(self, a: Point, b: Point) -> f64 {
        let ab = b.vector_from(a);
        let len_sq = ab.dot(ab);
        if len_sq == 0.0 {
            return self.distance_to(a);
        }
        let t = (self.vector_from(a).dot(ab) / len_sq).clamp(0.0, 1.0);
        self.distance_to(a.translate(ab * t))
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        self.translate(rhs)
    }
}

impl AddAssign<Vector> for Point {
    fn add_assign(&mut self, rhs: Vector) {
        *self = self.translate(rhs);
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        self.vector_from(rhs)
    }
}

// ─── Vector ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn plus(self, other: Vector) -> Vector {
        Vector::new(self.dx + other.dx, self.dy + other.dy)
    }

    pub fn minus(self, other: Vector) -> Vector {
        Vector::new(self.dx - other.dx, self.dy - other.dy)
    }

    pub fn scale(self, factor: f64) -> Vector {
        Vector::new(self.dx * factor, self.dy * factor)
    }

    pub fn invert(self) -> Vector {
        Vector::new(-self.dx, -self.dy)
    }

    pub fn length(self) -> f64 {
        self.dx.hypot(self.dy)
    }

    pub fn dot(self, other: Vector) -> f64 {
        self.dx * other.dx + self.dy * other.dy
    }

    /// Angle in radians measured from the positive x axis.
    pub fn angle(self) -> f64 {
        self.dy.atan2(self.dx)
    }

    pub fn rotate(self, radians: f64) -> Vector {
        let (sin, cos) = radians.sin_cos();
        Vector::new(self.dx * cos - self.dy * sin, self.dx * sin + self.dy * cos)
    }

    pub fn to_point(self) -> Point {
        Point::new(self.dx, self.dy)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.plus(rhs)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self.minus(rhs)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.scale(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.invert()
    }
}

// ─── Size ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Shrink by `padding` on every side, never below zero.
    pub fn shrink(self, padding: f64) -> Size {
        Size::new(
            (self.width - padding * 2.0).max(0.0),
            (self.height - padding * 2.0).max(0.0),
        )
    }
}

// ─── BoundingBox ─────────────────────────────────────────────────────────

/// Axis-aligned rectangle stored by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Normalized box spanning two arbitrary corners (marquee drags).
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Smallest box containing every point, `None` for an empty input.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        points
            .into_iter()
            .map(|p| Self::new(p.x, p.y, p.x, p.y))
            .reduce(Self::union)
    }

    /// Box of side `2 * radius` centred on `center`.
    pub fn around(center: Point, radius: f64) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    pub fn union(self, other: BoundingBox) -> BoundingBox {
        Self::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    pub fn combine<I: IntoIterator<Item = BoundingBox>>(boxes: I) -> Option<BoundingBox> {
        boxes.into_iter().reduce(Self::union)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    pub fn expand(&self, margin: f64) -> BoundingBox {
        Self::new(
            self.left - margin,
            self.top - margin,
            self.right + margin,
            self.bottom + margin,
        )
    }
}

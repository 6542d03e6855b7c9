//! Plane geometry shared by the document model, hit-testing and rendering.
//!
//! All coordinates are room-local CSS pixels with the origin at the top-left
//! corner of the room and y growing downward.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in room space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// Width and height of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Whether `pt` lies inside the rectangle. Edges count as inside.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    /// Whether the rectangle lies fully within `[0, bounds.width] x [0, bounds.height]`.
    #[must_use]
    pub fn fits_within(&self, bounds: Size) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x + self.width <= bounds.width && self.y + self.height <= bounds.height
    }
}

/// Clamp `value` into `[0, upper]`.
///
/// Unlike [`f64::clamp`] this never panics: when `upper` is negative the
/// lower bound wins and the result is `0`.
#[must_use]
pub fn clamp_span(value: f64, upper: f64) -> f64 {
    value.min(upper).max(0.0)
}

use crate::error::Result;
use crate::math::distance_2d::point_to_line_dist;
use crate::math::{normalize_or_zero, Point2, Vector2};

use super::Line2;

/// A directed line segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    /// Start point.
    pub start: Point2,
    /// End point.
    pub end: Point2,
}

impl Segment2 {
    /// Creates a new segment.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Returns `end - start`.
    #[must_use]
    pub fn vector(&self) -> Vector2 {
        self.end - self.start
    }

    /// Returns the unit direction, or zero for a degenerate segment.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        normalize_or_zero(&self.vector())
    }

    /// Returns the length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Returns the infinite line supporting this segment.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the segment has zero length.
    pub fn to_line(&self) -> Result<Line2> {
        Line2::new(self.start, self.vector())
    }

    /// Perpendicular distance from `p` to the supporting line.
    #[must_use]
    pub fn line_distance(&self, p: &Point2) -> f64 {
        point_to_line_dist(p, &self.start, &self.vector())
    }
}

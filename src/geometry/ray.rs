use crate::math::intersect_2d::{line_line_intersect_2d, point_at};
use crate::math::{normalize_or_zero, Point2, Vector2};

/// How far behind its origin a ray still accepts an intersection, absorbing
/// round-off when two rays meet exactly at an origin.
const BACKWARD_SLACK: f64 = 1e-9;

/// A half-line starting at `origin` and extending along `direction`.
///
/// The direction is stored normalized. A degenerate (zero) direction is kept
/// as zero and never intersects anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2 {
    origin: Point2,
    direction: Vector2,
}

impl Ray2 {
    /// Creates a new ray.
    #[must_use]
    pub fn new(origin: Point2, direction: Vector2) -> Self {
        Self {
            origin,
            direction: normalize_or_zero(&direction),
        }
    }

    /// Returns the origin of the ray.
    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    /// Returns the unit direction of the ray (zero when degenerate).
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    /// Whether the parameter `t` lies on the forward half of the ray.
    pub(crate) fn accepts(&self, t: f64) -> bool {
        t >= -BACKWARD_SLACK
    }

    /// Intersection point with another ray, `None` when parallel or when the
    /// supporting lines cross behind either origin.
    #[must_use]
    pub fn intersect_ray(&self, other: &Ray2) -> Option<Point2> {
        let (t, u) = line_line_intersect_2d(
            &self.origin,
            &self.direction,
            &other.origin,
            &other.direction,
        )?;
        if !self.accepts(t) || !other.accepts(u) {
            return None;
        }
        Some(point_at(&self.origin, &self.direction, t.max(0.0)))
    }
}

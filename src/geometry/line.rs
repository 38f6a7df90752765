use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::{line_line_intersect_2d, point_at};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::Ray2;

/// An infinite line defined by an origin point and a direction vector.
///
/// The parametric form is: `P(t) = origin + t * direction`.
#[derive(Debug, Clone, Copy)]
pub struct Line2 {
    origin: Point2,
    direction: Vector2,
}

impl Line2 {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point2, direction: Vector2) -> Result<Self> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    /// Intersection point with another line, `None` when parallel.
    #[must_use]
    pub fn intersect_line(&self, other: &Line2) -> Option<Point2> {
        let (t, _) =
            line_line_intersect_2d(&self.origin, &self.direction, &other.origin, &other.direction)?;
        Some(point_at(&self.origin, &self.direction, t))
    }

    /// Intersection point with a ray, `None` when parallel or behind the ray origin.
    #[must_use]
    pub fn intersect_ray(&self, ray: &Ray2) -> Option<Point2> {
        let (t, u) =
            line_line_intersect_2d(&self.origin, &self.direction, ray.origin(), ray.direction())?;
        if !ray.accepts(u) {
            return None;
        }
        Some(point_at(&self.origin, &self.direction, t))
    }
}

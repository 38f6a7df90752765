use crate::geometry::{Ray2, Segment2};
use crate::math::{cross_2d, normalize_or_zero, Point2, Vector2, ANGULAR_TOLERANCE};

slotmap::new_key_type! {
    /// Unique identifier for an original polygon edge in the ring store.
    pub struct EdgeId;
}

/// An edge of the input polygon, fixed for the whole sweep.
///
/// Besides the segment itself it keeps the bisectors of its two original
/// endpoints. Together with the segment they bound the wedge of the plane
/// that this edge sweeps while shrinking, which is where a split event
/// against it may land.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// The segment, oriented along the ring.
    pub segment: Segment2,
    /// Bisector of the vertex at `segment.start`.
    pub bisector_left: Ray2,
    /// Bisector of the vertex at `segment.end`.
    pub bisector_right: Ray2,
}

impl EdgeData {
    /// Whether `p` lies in the region swept by this edge: on its interior
    /// side and between the bisectors of its endpoints.
    #[must_use]
    pub fn sweeps_point(&self, p: &Point2) -> bool {
        let side = |dir: &Vector2, origin: &Point2| cross_2d(dir, &normalize_or_zero(&(p - origin)));

        let after_start =
            side(self.bisector_left.direction(), self.bisector_left.origin()) < ANGULAR_TOLERANCE;
        let before_end =
            side(self.bisector_right.direction(), self.bisector_right.origin()) > -ANGULAR_TOLERANCE;
        let interior = side(&self.segment.direction(), &self.segment.start) > -ANGULAR_TOLERANCE;

        after_start && before_end && interior
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bottom_of_unit_square() -> EdgeData {
        let start = Point2::new(0.0, 0.0);
        let end = Point2::new(1.0, 0.0);
        EdgeData {
            segment: Segment2::new(start, end),
            bisector_left: Ray2::new(start, Vector2::new(1.0, 1.0)),
            bisector_right: Ray2::new(end, Vector2::new(-1.0, 1.0)),
        }
    }

    #[test]
    fn point_above_the_edge_is_swept() {
        let edge = bottom_of_unit_square();
        assert!(edge.sweeps_point(&Point2::new(0.5, 0.2)));
        assert!(edge.sweeps_point(&Point2::new(0.5, 0.5)));
    }

    #[test]
    fn points_outside_the_wedge_are_not_swept() {
        let edge = bottom_of_unit_square();
        // Below the edge.
        assert!(!edge.sweeps_point(&Point2::new(0.5, -0.2)));
        // Left of the start bisector.
        assert!(!edge.sweeps_point(&Point2::new(0.1, 0.6)));
        // Right of the end bisector.
        assert!(!edge.sweeps_point(&Point2::new(0.9, 0.6)));
    }
}

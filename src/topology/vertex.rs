use crate::geometry::{Ray2, Segment2};
use crate::math::{cross_2d, Point2, Vector2};

use super::edge::EdgeId;
use super::lav::LavId;

slotmap::new_key_type! {
    /// Unique identifier for an active vertex in the ring store.
    ///
    /// Keys are generational: once a vertex is removed its key never resolves
    /// again, which is what makes outdated events cheap to detect.
    pub struct VertexId;
}

/// Inward angular bisector of a ring corner.
#[derive(Debug, Clone, Copy)]
pub struct Bisector {
    /// The ray the vertex travels along while the front shrinks.
    pub ray: Ray2,
    /// Whether the interior angle exceeds 180 degrees.
    pub is_reflex: bool,
}

impl Bisector {
    /// Computes the bisector of the corner at `point` between the incoming
    /// edge `left` and the outgoing edge `right`.
    ///
    /// Rings are counter-clockwise with the interior on the left. `orientation`
    /// overrides the pair of vectors used to classify the corner as reflex;
    /// a vertex created by collapsing two others passes their bisector
    /// directions, `(next, prev)`, since its edges alone may be parallel.
    #[must_use]
    pub fn new(
        point: Point2,
        left: &Segment2,
        right: &Segment2,
        orientation: Option<(Vector2, Vector2)>,
    ) -> Self {
        let to_prev = -left.direction();
        let to_next = right.direction();
        let (a, b) = orientation.unwrap_or((to_prev, to_next));
        let is_reflex = cross_2d(&a, &b) > 0.0;
        let sum = to_prev + to_next;
        let direction = if is_reflex { -sum } else { sum };
        Self {
            ray: Ray2::new(point, direction),
            is_reflex,
        }
    }
}

/// Data associated with an active vertex of the shrinking front.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// Position where the vertex was created.
    pub point: Point2,
    /// Original edge arriving at this vertex.
    pub edge_left: EdgeId,
    /// Original edge leaving this vertex.
    pub edge_right: EdgeId,
    /// Inward bisector.
    pub bisector: Bisector,
    /// Previous vertex in the ring.
    pub prev: VertexId,
    /// Next vertex in the ring.
    pub next: VertexId,
    /// The ring this vertex belongs to.
    pub lav: LavId,
}

impl VertexData {
    /// Creates an unlinked vertex; `prev`/`next` must be set by the ring store.
    #[must_use]
    pub fn new(
        point: Point2,
        edge_left: EdgeId,
        edge_right: EdgeId,
        bisector: Bisector,
        lav: LavId,
    ) -> Self {
        Self {
            point,
            edge_left,
            edge_right,
            bisector,
            prev: VertexId::default(),
            next: VertexId::default(),
            lav,
        }
    }

    /// Whether the interior angle at this vertex exceeds 180 degrees.
    #[must_use]
    pub fn is_reflex(&self) -> bool {
        self.bisector.is_reflex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn convex_corner_points_inward() {
        // Lower-left corner of a counter-clockwise square.
        let left = Segment2::new(p(0.0, 1.0), p(0.0, 0.0));
        let right = Segment2::new(p(0.0, 0.0), p(1.0, 0.0));
        let b = Bisector::new(p(0.0, 0.0), &left, &right, None);
        assert!(!b.is_reflex);
        let d = b.ray.direction();
        assert!((d.x - d.y).abs() < TOLERANCE);
        assert!(d.x > 0.0);
    }

    #[test]
    fn reflex_corner_points_inward() {
        // Inner corner of an L shape: (2,1) -> (1,1) -> (1,2).
        let left = Segment2::new(p(2.0, 1.0), p(1.0, 1.0));
        let right = Segment2::new(p(1.0, 1.0), p(1.0, 2.0));
        let b = Bisector::new(p(1.0, 1.0), &left, &right, None);
        assert!(b.is_reflex);
        let d = b.ray.direction();
        assert!(d.x < 0.0 && d.y < 0.0);
        assert!((d.x - d.y).abs() < TOLERANCE);
    }

    #[test]
    fn orientation_hint_classifies_collapsed_vertex() {
        // Collapse of the bottom edge of a unit square: parallel left/right edges.
        let left = Segment2::new(p(0.0, 1.0), p(0.0, 0.0));
        let right = Segment2::new(p(1.0, 0.0), p(1.0, 1.0));
        let hint = (Vector2::new(-1.0, 1.0), Vector2::new(1.0, 1.0));
        let b = Bisector::new(p(0.5, 0.5), &left, &right, Some(hint));
        assert!(!b.is_reflex);
        let d = b.ray.direction();
        assert!(d.x.abs() < TOLERANCE);
        assert!((d.y - 1.0).abs() < TOLERANCE);
    }
}

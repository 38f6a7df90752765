use crate::math::polygon_2d::{point_in_polygon, segment_direction, signed_area_2d};
use crate::math::{cross_2d, Point2, TOLERANCE};

use super::Segment2;

/// One closed ring of a polygon: the outer boundary or a hole.
///
/// Vertices are cyclic, the last connects back to the first. The outer
/// boundary is expected counter-clockwise and holes clockwise.
///
/// Construction drops repeated consecutive points and vertices where the
/// ring runs straight through, so every remaining vertex is a real corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<Point2>,
}

impl Contour {
    /// Creates a contour from an ordered ring of points.
    #[must_use]
    pub fn new(points: impl IntoIterator<Item = Point2>) -> Self {
        let raw: Vec<Point2> = points.into_iter().collect();
        Self {
            points: drop_redundant_vertices(&raw),
        }
    }

    /// Returns the ring vertices.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the contour has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed area, positive when counter-clockwise.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    /// Whether the ring winds counter-clockwise.
    #[must_use]
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// The same ring traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Even-odd containment test against this ring.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        point_in_polygon(p, &self.points)
    }

    /// Iterates the ring edges, `points[i] -> points[i + 1]`, wrapping around.
    pub fn segments(&self) -> impl Iterator<Item = Segment2> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Segment2::new(self.points[i], self.points[(i + 1) % n]))
    }
}

impl From<Vec<Point2>> for Contour {
    fn from(points: Vec<Point2>) -> Self {
        Self::new(points)
    }
}

/// Single pass over `(prev, point, next)` windows keeping only real corners.
fn drop_redundant_vertices(points: &[Point2]) -> Vec<Point2> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    (0..n)
        .filter(|&i| {
            let prev = &points[(i + n - 1) % n];
            let point = &points[i];
            let next = &points[(i + 1) % n];
            if (next - point).norm() < TOLERANCE {
                return false;
            }
            match (segment_direction(prev, point), segment_direction(point, next)) {
                (Ok(incoming), Ok(outgoing)) => {
                    cross_2d(&incoming, &outgoing).abs() > TOLERANCE || incoming.dot(&outgoing) < 0.0
                }
                _ => true,
            }
        })
        .map(|i| points[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn keeps_real_corners() {
        let c = Contour::new(vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 1.0), p(0.0, 1.0)]);
        assert_eq!(c.len(), 4);
        assert!(c.is_counter_clockwise());
        assert!(!c.reversed().is_counter_clockwise());
    }

    #[test]
    fn drops_duplicates_and_straight_vertices() {
        let c = Contour::new(vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 2.0),
            p(2.0, 2.0),
            p(0.0, 2.0),
        ]);
        assert_eq!(c.points(), &[p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)]);
    }

    #[test]
    fn segments_wrap_around() {
        let c = Contour::new(vec![p(0.0, 0.0), p(3.0, 0.0), p(0.0, 4.0)]);
        let segs: Vec<Segment2> = c.segments().collect();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2], Segment2::new(p(0.0, 4.0), p(0.0, 0.0)));
        assert!((segs.iter().map(Segment2::length).sum::<f64>() - 12.0).abs() < TOLERANCE);
    }

    #[test]
    fn containment() {
        let c = Contour::new(vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)]);
        assert!(c.contains_point(&p(1.0, 3.0)));
        assert!(!c.contains_point(&p(5.0, 3.0)));
    }
}

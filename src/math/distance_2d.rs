use super::{cross_2d, Point2, Vector2, TOLERANCE};

/// Returns the perpendicular distance from `p` to the infinite line through
/// `origin` with direction `dir`.
///
/// A zero direction degrades to the distance from `origin`.
#[must_use]
pub fn point_to_line_dist(p: &Point2, origin: &Point2, dir: &Vector2) -> f64 {
    let len = dir.norm();
    if len < TOLERANCE {
        return (p - origin).norm();
    }
    cross_2d(dir, &(p - origin)).abs() / len
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn line_dist_ignores_segment_extent() {
        // Beyond the end of (0,0)→(2,0) the line distance stays perpendicular.
        let d = point_to_line_dist(&p(5.0, 3.0), &p(0.0, 0.0), &Vector2::new(2.0, 0.0));
        assert!((d - 3.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn line_dist_diagonal() {
        let d = point_to_line_dist(&p(0.0, 2.0), &p(0.0, 0.0), &Vector2::new(1.0, 1.0));
        assert!((d - 2.0_f64.sqrt()).abs() < TOL, "d={d}");
    }

    #[test]
    fn line_dist_zero_direction() {
        let d = point_to_line_dist(&p(3.0, 4.0), &p(0.0, 0.0), &Vector2::zeros());
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }
}

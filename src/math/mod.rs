pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for sign tests on cross products of unit vectors.
pub const ANGULAR_TOLERANCE: f64 = 1e-5;

/// Z component of the 3D cross product of two planar vectors.
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Returns `v` scaled to unit length, or the zero vector when `v` is degenerate.
#[must_use]
pub fn normalize_or_zero(v: &Vector2) -> Vector2 {
    let len = v.norm();
    if len < TOLERANCE {
        Vector2::zeros()
    } else {
        v / len
    }
}

/// Checks whether two points coincide within `tolerance`.
#[must_use]
pub fn points_coincide(a: &Point2, b: &Point2, tolerance: f64) -> bool {
    (a - b).norm() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_sign_follows_turn_direction() {
        let x = Vector2::new(1.0, 0.0);
        let y = Vector2::new(0.0, 1.0);
        assert!((cross_2d(&x, &y) - 1.0).abs() < TOLERANCE);
        assert!((cross_2d(&y, &x) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn normalize_zero_vector_stays_zero() {
        let v = normalize_or_zero(&Vector2::new(0.0, 0.0));
        assert!(v.norm() < TOLERANCE);
        let u = normalize_or_zero(&Vector2::new(3.0, 4.0));
        assert!((u.x - 0.6).abs() < TOLERANCE);
        assert!((u.y - 0.8).abs() < TOLERANCE);
    }

    #[test]
    fn coincidence_respects_tolerance() {
        let a = Point2::new(1.0, 1.0);
        assert!(points_coincide(&a, &Point2::new(1.0, 1.0 + 1e-9), 1e-8));
        assert!(!points_coincide(&a, &Point2::new(1.0, 1.001), 1e-8));
    }
}

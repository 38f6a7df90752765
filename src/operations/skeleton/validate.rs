use crate::error::{InputError, RingKind};
use crate::geometry::{Contour, Segment2};
use crate::math::intersect_2d::segment_segment_intersect_2d;

/// Every ring needs 3 distinct corners, whether validation is on or not.
pub(crate) fn check_ring_sizes(contour: &Contour, holes: &[Contour]) -> Result<(), InputError> {
    for (ring, points) in rings(contour, holes) {
        if points.len() < 3 {
            return Err(InputError::TooFewVertices {
                ring,
                count: points.len(),
            });
        }
    }
    Ok(())
}

/// Checks that the rings describe a simple polygon with simple holes.
///
/// # Errors
///
/// Returns the first violation found, checking in this order: finite
/// coordinates, ring sizes, orientation, self-intersection, ring/ring
/// intersection, hole placement.
pub(crate) fn validate_rings(contour: &Contour, holes: &[Contour]) -> Result<(), InputError> {
    for (ring, points) in rings(contour, holes) {
        if points.points().iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(InputError::NonFinite { ring });
        }
    }
    check_ring_sizes(contour, holes)?;

    if !contour.is_counter_clockwise() {
        return Err(InputError::WrongOrientation {
            ring: RingKind::Outer,
            expected: "counter-clockwise",
        });
    }
    for (i, hole) in holes.iter().enumerate() {
        if hole.signed_area() >= 0.0 {
            return Err(InputError::WrongOrientation {
                ring: RingKind::Hole(i),
                expected: "clockwise",
            });
        }
    }

    for (ring, points) in rings(contour, holes) {
        if self_intersects(points) {
            return Err(InputError::SelfIntersecting { ring });
        }
    }

    let all: Vec<(RingKind, &Contour)> = rings(contour, holes).collect();
    for (i, (first, a)) in all.iter().enumerate() {
        for (second, b) in &all[i + 1..] {
            if rings_intersect(a, b) {
                return Err(InputError::RingsIntersect {
                    first: *first,
                    second: *second,
                });
            }
        }
    }

    for (i, hole) in holes.iter().enumerate() {
        // Rings do not cross, so one point decides containment.
        let sample = &hole.points()[0];
        if !contour.contains_point(sample) {
            return Err(InputError::HoleOutsideContour { hole: i });
        }
        for (j, other) in holes.iter().enumerate() {
            if i != j && other.contains_point(sample) {
                return Err(InputError::NestedHoles { outer: j, inner: i });
            }
        }
    }
    Ok(())
}

fn rings<'a>(
    contour: &'a Contour,
    holes: &'a [Contour],
) -> impl Iterator<Item = (RingKind, &'a Contour)> {
    std::iter::once((RingKind::Outer, contour))
        .chain(holes.iter().enumerate().map(|(i, h)| (RingKind::Hole(i), h)))
}

fn crosses(a: &Segment2, b: &Segment2) -> bool {
    segment_segment_intersect_2d(&a.start, &a.end, &b.start, &b.end).is_some()
}

fn self_intersects(ring: &Contour) -> bool {
    let segments: Vec<Segment2> = ring.segments().collect();
    let n = segments.len();
    (0..n).any(|i| {
        // Skip `i + 1` and, for the first segment, the last one: both share a corner.
        let last = if i == 0 { n - 1 } else { n };
        (i + 2..last).any(|j| crosses(&segments[i], &segments[j]))
    })
}

fn rings_intersect(a: &Contour, b: &Contour) -> bool {
    a.segments()
        .any(|sa| b.segments().any(|sb| crosses(&sa, &sb)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn ring(points: &[(f64, f64)]) -> Contour {
        Contour::new(points.iter().map(|&(x, y)| Point2::new(x, y)))
    }

    fn outer() -> Contour {
        ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
    }

    fn hole_at(x: f64, y: f64) -> Contour {
        ring(&[(x, y), (x, y + 2.0), (x + 2.0, y + 2.0), (x + 2.0, y)])
    }

    #[test]
    fn accepts_polygon_with_holes() {
        assert_eq!(
            validate_rings(&outer(), &[hole_at(1.0, 1.0), hole_at(6.0, 6.0)]),
            Ok(())
        );
    }

    #[test]
    fn rejects_small_ring() {
        let line = ring(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(
            check_ring_sizes(&line, &[]),
            Err(InputError::TooFewVertices {
                ring: RingKind::Outer,
                count: 2
            })
        );
    }

    #[test]
    fn rejects_non_finite() {
        let bad = ring(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert_eq!(
            validate_rings(&bad, &[]),
            Err(InputError::NonFinite {
                ring: RingKind::Outer
            })
        );
    }

    #[test]
    fn rejects_wrong_orientation() {
        assert!(matches!(
            validate_rings(&outer().reversed(), &[]),
            Err(InputError::WrongOrientation {
                ring: RingKind::Outer,
                ..
            })
        ));
        assert!(matches!(
            validate_rings(&outer(), &[hole_at(1.0, 1.0).reversed()]),
            Err(InputError::WrongOrientation {
                ring: RingKind::Hole(0),
                ..
            })
        ));
    }

    #[test]
    fn rejects_bow_tie() {
        // Counter-clockwise overall, but the two long edges cross.
        let bow = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (2.0, -1.0), (0.0, 4.0)]);
        assert_eq!(
            validate_rings(&bow, &[]),
            Err(InputError::SelfIntersecting {
                ring: RingKind::Outer
            })
        );
    }

    #[test]
    fn rejects_crossing_rings() {
        assert_eq!(
            validate_rings(&outer(), &[hole_at(9.0, 4.0)]),
            Err(InputError::RingsIntersect {
                first: RingKind::Outer,
                second: RingKind::Hole(0)
            })
        );
    }

    #[test]
    fn rejects_hole_outside() {
        assert_eq!(
            validate_rings(&outer(), &[hole_at(20.0, 20.0)]),
            Err(InputError::HoleOutsideContour { hole: 0 })
        );
    }

    #[test]
    fn rejects_nested_holes() {
        let big = ring(&[(1.0, 1.0), (1.0, 8.0), (8.0, 8.0), (8.0, 1.0)]);
        assert_eq!(
            validate_rings(&outer(), &[big, hole_at(3.0, 3.0)]),
            Err(InputError::NestedHoles { outer: 0, inner: 1 })
        );
    }
}

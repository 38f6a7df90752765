//! Straight skeletons of simple polygons with holes.
//!
//! The skeleton is computed by shrinking every ring of the polygon at unit
//! speed and recording where its vertices collide. The entry points are
//! [`skeletonize`] for raw point rings and [`Skeletonize`] for full control
//! over the options.

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{Result, RooflineError};
pub use geometry::{Contour, Segment2};
pub use math::{Point2, Vector2};
pub use operations::{
    skeletonize, skeletonize_contour, SkeletonOptions, Skeletonize, StraightSkeleton, Subtree,
};
